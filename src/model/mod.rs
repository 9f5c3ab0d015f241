pub mod report;
pub mod topic;
