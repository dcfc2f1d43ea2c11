use async_trait::async_trait;

use crate::analysis::AnalysisOutcome;
use crate::error::AiError;

/// A text-completion transport: one prompt in, one reply out.
///
/// The production implementation is [`crate::client::ChatClient`]; tests
/// substitute a scripted backend.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}

/// Produces a summary, sentiment label, and topic list for a text blob.
///
/// Held by the server as `Arc<dyn ContentAnalyzer>` so handlers and tests can
/// swap implementations.
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<AnalysisOutcome, AiError>;
}
