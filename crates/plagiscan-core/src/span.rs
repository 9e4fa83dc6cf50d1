//! Flagged spans as returned by the analysis service.

use serde::{Deserialize, Serialize};

/// Where a flagged passage is believed to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    /// Copied from a page found on the web.
    #[serde(rename = "WEB")]
    Web,
    /// Stylistically characteristic of machine-generated text.
    #[serde(rename = "AI")]
    Ai,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "WEB",
            Self::Ai => "AI",
        }
    }
}

/// A passage of the analyzed text flagged by the service.
///
/// `sentence` is expected to be a verbatim substring of the analyzed text.
/// Nothing checks this on receipt; see `ReplyPolicy::strict` in `plagiscan-ai`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedSpan {
    pub sentence: String,
    /// URL for web matches, a fixed attribution note for AI matches.
    pub source: String,
    pub source_type: SourceType,
}

impl FlaggedSpan {
    pub fn new(sentence: impl Into<String>, source: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            sentence: sentence.into(),
            source: source.into(),
            source_type,
        }
    }

    pub fn is_web(&self) -> bool {
        self.source_type == SourceType::Web
    }

    pub fn is_ai(&self) -> bool {
        self.source_type == SourceType::Ai
    }
}

/// Parsed body of the service's fenced JSON reply.
///
/// The wire key is `plagiarizedSentences`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "plagiarizedSentences")]
    pub spans: Vec<FlaggedSpan>,
}

impl AnalysisResult {
    pub fn new(spans: Vec<FlaggedSpan>) -> Self {
        Self { spans }
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Drop spans whose sentence repeats an earlier span's sentence.
    ///
    /// The first occurrence wins, so its source and type are kept.
    pub fn dedup_sentences(&mut self) -> usize {
        let before = self.spans.len();
        let mut seen = std::collections::HashSet::new();
        self.spans.retain(|s| seen.insert(s.sentence.clone()));
        before - self.spans.len()
    }
}
