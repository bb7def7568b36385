pub mod render;
pub mod task;
