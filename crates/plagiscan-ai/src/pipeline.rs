//! Request flow from user text to a displayable report.
//!
//! A [`Checker`] holds the state of the last check. Each check discards that
//! state first, so a result and an error are never shown together.
//! [`Checker::check`] takes `&mut self`, which keeps one request in flight
//! per checker. There is no cancellation.

use plagiscan_core::{GroundingSource, ScoredResult, clean_result, synthesize_analysis};
use tracing::{info, warn};

use crate::{AnalyzeError, Analyzer};

/// Shown when a strict-policy reply could not be interpreted.
pub const UNINTERPRETABLE_MESSAGE: &str =
    "Could not interpret the response from the API. The format may be invalid.";

/// Shown for any transport or service failure.
pub const SERVICE_MESSAGE: &str = "An error occurred while communicating with the API. Please try again.";

/// What the user sees after a check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Report {
    /// No check has run yet.
    #[default]
    Idle,
    Findings {
        scored: ScoredResult,
        sources: Vec<GroundingSource>,
    },
    Failed {
        message: String,
    },
}

impl Report {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

pub struct Checker {
    analyzer: Analyzer,
    report: Report,
}

impl Checker {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            report: Report::Idle,
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Run one check of `text` and return the new report.
    ///
    /// Blank text starts no request and leaves the current report untouched.
    pub async fn check(&mut self, text: &str) -> &Report {
        if text.trim().is_empty() {
            return &self.report;
        }
        self.report = Report::Idle;

        self.report = match self.analyzer.analyze(text).await {
            Ok(analysis) => {
                let scored = match analysis.result {
                    Some(result) => synthesize_analysis(text, result),
                    None => clean_result(),
                };
                info!(score = scored.score, spans = scored.spans.len(), "check complete");
                Report::Findings {
                    scored,
                    sources: analysis.sources,
                }
            }
            Err(AnalyzeError::Configuration(message)) => {
                warn!("check failed: missing configuration");
                Report::failed(message)
            }
            Err(AnalyzeError::UnparsableReply(detail)) => {
                warn!(%detail, "check failed: uninterpretable reply");
                Report::failed(UNINTERPRETABLE_MESSAGE)
            }
            Err(e) => {
                warn!(error = %e, "check failed");
                Report::failed(SERVICE_MESSAGE)
            }
        };
        &self.report
    }
}
