use std::sync::Arc;

use plagiscan_core::{AnalysisResult, GroundingSource};
use tracing::{debug, info, warn};

use crate::client::GenerativeClient;
use crate::prompt::build_prompt;
use crate::reply::{ReplyPolicy, parse_reply};
use crate::AnalyzeError;

/// Outcome of one analysis call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    /// `None` when the reply could not be interpreted (lenient policy only).
    pub result: Option<AnalysisResult>,
    pub sources: Vec<GroundingSource>,
}

/// Sends text to the remote model and interprets its reply.
///
/// Holds no state between calls beyond the injected client handle.
pub struct Analyzer {
    client: Arc<dyn GenerativeClient>,
    policy: ReplyPolicy,
}

impl Analyzer {
    pub fn new(client: Arc<dyn GenerativeClient>, policy: ReplyPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> ReplyPolicy {
        self.policy
    }

    /// Analyze `text`.
    ///
    /// Blank text is rejected before any request. Under the lenient policy a
    /// reply without a valid JSON block yields `result: None`; under the
    /// strict policy it is an [`AnalyzeError::UnparsableReply`].
    pub async fn analyze(&self, text: &str) -> Result<Analysis, AnalyzeError> {
        if text.trim().is_empty() {
            return Err(AnalyzeError::EmptyInput);
        }

        let prompt = build_prompt(text);
        debug!(prompt_bytes = prompt.len(), "built analysis prompt");
        let generation = self.client.generate(&prompt, true).await?;

        let result = match parse_reply(&generation.text, text, self.policy) {
            Ok(result) => {
                info!(
                    spans = result.spans.len(),
                    sources = generation.sources.len(),
                    "analysis reply parsed"
                );
                Some(result)
            }
            Err(e) if self.policy.strict => return Err(AnalyzeError::UnparsableReply(e.to_string())),
            Err(e) => {
                warn!(error = %e, "could not interpret analysis reply");
                None
            }
        };

        Ok(Analysis {
            result,
            sources: generation.sources,
        })
    }
}
