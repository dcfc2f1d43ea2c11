use async_trait::async_trait;
use serde::Deserialize;

use crate::analysis::{AnalysisOutcome, ContentAnalysis, Sentiment, TopicsField, strip_code_fences};
use crate::client::ChatClient;
use crate::config::AiConfig;
use crate::error::AiError;
use crate::traits::{CompletionBackend, ContentAnalyzer};

/// Expected shape of the combined-request reply.
#[derive(Debug, Deserialize)]
struct CombinedReply {
    summary: String,
    sentiment: String,
    topics: TopicsField,
}

/// Two-stage content analyzer.
///
/// One combined request asks the provider for all three fields as JSON; if
/// that call or its parse fails, three sequential single-field requests are
/// made instead. Both stages failing propagates as an error — an empty
/// analysis is never fabricated.
pub struct AiAnalyzer<B: CompletionBackend> {
    backend: B,
}

impl AiAnalyzer<ChatClient> {
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        Ok(Self::new(ChatClient::new(config)?))
    }
}

impl<B: CompletionBackend> AiAnalyzer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    async fn analyze_combined(&self, text: &str) -> Result<ContentAnalysis, AiError> {
        let prompt = format!(
            "Perform the following analyses on the given content:\n\
             1. Generate a concise summary (2-3 sentences)\n\
             2. Determine sentiment (positive/negative/neutral)\n\
             3. Extract 3-5 main topics as comma-separated values\n\n\
             Respond ONLY with a JSON object with these keys: summary, sentiment, topics\n\n\
             Content: {text}"
        );

        let reply = self.backend.complete(&prompt).await?;
        let reply: CombinedReply = serde_json::from_str(strip_code_fences(&reply))
            .map_err(|e| AiError::Malformed(format!("combined reply is not valid JSON: {e}")))?;

        let sentiment = Sentiment::parse(&reply.sentiment).ok_or_else(|| {
            AiError::Malformed(format!("unrecognized sentiment label: {:?}", reply.sentiment))
        })?;

        Ok(ContentAnalysis {
            summary: reply.summary.trim().to_string(),
            sentiment,
            topics: reply.topics.into_csv(),
        })
    }

    async fn analyze_individually(&self, text: &str) -> Result<ContentAnalysis, AiError> {
        let summary = self.generate_summary(text).await?;
        let sentiment = self.analyze_sentiment(text).await?;
        let topics = self.extract_topics(text).await?;

        Ok(ContentAnalysis {
            summary,
            sentiment,
            topics,
        })
    }

    async fn generate_summary(&self, text: &str) -> Result<String, AiError> {
        let prompt = format!("Summarize this content in 2-3 concise sentences:\n\n{text}");
        let reply = self.backend.complete(&prompt).await?;
        Ok(reply.trim().to_string())
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<Sentiment, AiError> {
        let prompt = format!(
            "Analyze the sentiment of this content. Respond with ONLY one word: \
             positive, negative, or neutral:\n\n{text}"
        );
        let reply = self.backend.complete(&prompt).await?;
        Sentiment::parse(&reply)
            .ok_or_else(|| AiError::Malformed(format!("unrecognized sentiment label: {reply:?}")))
    }

    async fn extract_topics(&self, text: &str) -> Result<String, AiError> {
        let prompt = format!(
            "Extract 3-5 main topics from this content as comma-separated values. \
             Respond with ONLY the topics:\n\n{text}"
        );
        let reply = self.backend.complete(&prompt).await?;
        Ok(reply.trim().to_string())
    }
}

#[async_trait]
impl<B: CompletionBackend> ContentAnalyzer for AiAnalyzer<B> {
    async fn analyze(&self, text: &str) -> Result<AnalysisOutcome, AiError> {
        match self.analyze_combined(text).await {
            Ok(analysis) => Ok(AnalysisOutcome::Combined(analysis)),
            Err(err) if err.is_auth_failure() => Err(err),
            Err(err) => {
                tracing::debug!("combined analysis failed, falling back to per-field calls: {err}");
                self.analyze_individually(text)
                    .await
                    .map(AnalysisOutcome::Fallback)
            }
        }
    }
}
