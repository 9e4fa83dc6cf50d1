//! Seams for the remote model and the credential it needs.

use async_trait::async_trait;
use plagiscan_core::GroundingSource;

use crate::AnalyzeError;

/// Raw output of one generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    /// Free-form reply text, expected to contain one fenced JSON block.
    pub text: String,
    /// Citation metadata attached by the search tool, possibly empty.
    pub sources: Vec<GroundingSource>,
}

/// A text-generation service taking a single prompt.
///
/// The host creates one handle and injects it into the [`Analyzer`](crate::Analyzer).
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Generate a reply. `web_search` asks the service to ground the answer
    /// with a search tool when it has one.
    async fn generate(&self, prompt: &str, web_search: bool) -> Result<Generation, AnalyzeError>;
}

/// Read-only accessor for the API credential.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// The credential, or `None` when none is configured.
    async fn api_key(&self) -> Option<String>;
}

/// A credential fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(pub Option<String>);

#[async_trait]
impl CredentialSource for StaticCredentials {
    async fn api_key(&self) -> Option<String> {
        self.0.clone().filter(|k| !k.trim().is_empty())
    }
}
