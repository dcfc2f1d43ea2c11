pub mod analysis;
pub mod analyzer;
pub mod client;
pub mod config;
pub mod error;
pub mod traits;

pub use analysis::{AnalysisOutcome, ContentAnalysis, Sentiment};
pub use analyzer::AiAnalyzer;
pub use client::ChatClient;
pub use config::AiConfig;
pub use error::AiError;
pub use traits::{CompletionBackend, ContentAnalyzer};
