pub mod callback;
pub mod context;
pub mod processor;
pub mod transform;
