//! Extraction and validation of the fenced JSON block in a model reply.
//!
//! The reply contract: free-form text holding a ```` ```json ```` block whose
//! body is `{"plagiarizedSentences": [{"sentence", "sourceType", "source"}]}`.
//! Only the first block is consulted; anything outside it is ignored.

use once_cell::sync::Lazy;
use plagiscan_core::AnalysisResult;
use regex::Regex;
use thiserror::Error;

static JSON_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```json\n(.+?)\n```").unwrap());

/// How strictly a reply is held to its contract.
///
/// The default is lenient: a reply that cannot be interpreted is treated the
/// same as one that flags nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplyPolicy {
    /// Report unparsable replies as errors, and reject spans whose sentence
    /// does not occur in the analyzed text.
    pub strict: bool,
    /// Drop spans repeating an earlier span's sentence.
    pub dedupe: bool,
}

impl ReplyPolicy {
    pub fn lenient() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }
}

/// Why a reply could not be interpreted.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("no ```json block in reply")]
    NoJsonBlock,

    #[error("reply JSON does not match schema: {0}")]
    Schema(#[from] serde_json::Error),

    /// A flagged sentence that is not a substring of the analyzed text.
    #[error("flagged sentence not found in text: {0:?}")]
    NotInText(String),
}

/// Body of the first ```` ```json ```` block, if any.
pub fn extract_json_block(reply: &str) -> Option<&str> {
    JSON_BLOCK
        .captures(reply)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Parse a raw reply into an [`AnalysisResult`].
///
/// Every element must carry a string `sentence`, a string `source`, and a
/// `sourceType` of exactly `"WEB"` or `"AI"`; one bad element rejects the
/// whole reply. Under `policy.strict` each sentence must also occur in
/// `text`. Under `policy.dedupe` repeated sentences are dropped.
pub fn parse_reply(reply: &str, text: &str, policy: ReplyPolicy) -> Result<AnalysisResult, ReplyError> {
    let block = extract_json_block(reply).ok_or(ReplyError::NoJsonBlock)?;
    let mut result: AnalysisResult = serde_json::from_str(block)?;

    if policy.strict
        && let Some(missing) = result.spans.iter().find(|s| !text.contains(s.sentence.as_str()))
    {
        return Err(ReplyError::NotInText(missing.sentence.clone()));
    }

    if policy.dedupe {
        let dropped = result.dedup_sentences();
        if dropped > 0 {
            tracing::debug!(dropped, "dropped repeated flagged sentences");
        }
    }
    Ok(result)
}
