pub mod merge;
pub mod repair;
