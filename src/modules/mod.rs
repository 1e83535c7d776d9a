pub mod content;
pub mod task;
