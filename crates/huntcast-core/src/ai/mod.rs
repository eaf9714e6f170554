mod analyzer;
mod prompt;
pub mod providers;
mod registry;

pub use analyzer::Analyzer;
pub use providers::{AnalysisResult, ContentAnalyzer};
pub use registry::ProviderRegistry;
