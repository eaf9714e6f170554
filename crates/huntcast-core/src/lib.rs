pub mod ai;
pub mod config;
pub mod error;
pub mod job;
pub mod scheduler;
pub mod telegram;
pub mod trends;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use job::{JobOrchestrator, JobOutcome, JobStage};
