pub mod field;
pub mod render;
pub mod report;
