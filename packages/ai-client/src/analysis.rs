use serde::{Deserialize, Serialize};

/// Sentiment label for a piece of content.
///
/// The storage form is the lower-cased label; anything the provider returns
/// outside these three is rejected before it reaches the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Parse a provider-returned label. Case-insensitive, tolerant of
    /// surrounding whitespace and trailing punctuation ("Positive.", "neutral!").
    pub fn parse(raw: &str) -> Option<Sentiment> {
        let label = raw
            .trim()
            .trim_matches(|c: char| c.is_ascii_punctuation())
            .to_ascii_lowercase();
        match label.as_str() {
            "positive" => Some(Sentiment::Positive),
            "negative" => Some(Sentiment::Negative),
            "neutral" => Some(Sentiment::Neutral),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three derived fields for one piece of content.
///
/// `topics` is stored as a comma-separated ordered list of 3-5 short phrases;
/// the order is provider-determined and significant downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub summary: String,
    pub sentiment: Sentiment,
    pub topics: String,
}

/// Which path produced the analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The single all-in-one request succeeded.
    Combined(ContentAnalysis),
    /// The combined request failed and the per-field fallback succeeded.
    Fallback(ContentAnalysis),
}

impl AnalysisOutcome {
    pub fn into_analysis(self) -> ContentAnalysis {
        match self {
            AnalysisOutcome::Combined(a) | AnalysisOutcome::Fallback(a) => a,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback(_))
    }
}

/// Topics as they appear in the provider's JSON: either an already
/// comma-separated string or an array of phrases.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TopicsField {
    Text(String),
    List(Vec<String>),
}

impl TopicsField {
    pub(crate) fn into_csv(self) -> String {
        match self {
            TopicsField::Text(s) => s.trim().to_string(),
            TopicsField::List(items) => items
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Strip a Markdown code fence from a reply that was asked for bare JSON.
pub(crate) fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
