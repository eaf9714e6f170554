pub mod daemon;
pub mod report;
