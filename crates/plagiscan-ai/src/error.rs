use thiserror::Error;

/// Message shown when no API credential could be found.
pub const CONFIGURATION_MESSAGE: &str =
    "API key is not configured. Set the GEMINI_API_KEY (or API_KEY) environment variable.";

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// No credential available. Needs fixing outside the program; never retried.
    #[error("{0}")]
    Configuration(String),

    #[error("no text to analyze")]
    EmptyInput,

    /// Transport, HTTP status, or response decoding failure.
    #[error("analysis service error: {0}")]
    Service(String),

    /// Reply had no valid JSON block. Only raised under `ReplyPolicy::strict`.
    #[error("could not interpret the service reply: {0}")]
    UnparsableReply(String),
}

impl AnalyzeError {
    pub fn missing_credential() -> Self {
        Self::Configuration(CONFIGURATION_MESSAGE.to_string())
    }
}
