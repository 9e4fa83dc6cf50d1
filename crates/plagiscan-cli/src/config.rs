//! Command-line options and credential lookup.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use plagiscan_ai::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use plagiscan_ai::{CredentialSource, GeminiConfig, ReplyPolicy};

/// Fallback variable consulted after `GEMINI_API_KEY`.
const LEGACY_KEY_VAR: &str = "API_KEY";

#[derive(Parser, Debug)]
#[command(
    name = "plagiscan",
    version,
    about = "Check text for passages copied from the web or generated by AI"
)]
pub struct Cli {
    /// File to analyze (reads stdin if omitted)
    pub file: Option<PathBuf>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used for the analysis
    #[arg(long, env = "PLAGISCAN_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the Gemini API
    #[arg(long, env = "PLAGISCAN_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Fail when the reply cannot be interpreted instead of reporting no findings
    #[arg(long)]
    pub strict: bool,

    /// Drop flagged sentences that repeat an earlier one
    #[arg(long)]
    pub dedupe: bool,

    /// Give up on the request after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Score a saved raw model reply instead of calling the service
    #[arg(long, value_name = "FILE")]
    pub reply: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable ANSI colours
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn policy(&self) -> ReplyPolicy {
        ReplyPolicy {
            strict: self.strict,
            dedupe: self.dedupe,
        }
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn credentials(&self) -> EnvCredentials {
        EnvCredentials {
            explicit: self.api_key.clone(),
        }
    }
}

/// Credential from `--api-key` / `GEMINI_API_KEY`, falling back to `API_KEY`.
///
/// Blank values count as missing.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials {
    pub explicit: Option<String>,
}

#[async_trait]
impl CredentialSource for EnvCredentials {
    async fn api_key(&self) -> Option<String> {
        non_blank(self.explicit.clone()).or_else(|| non_blank(std::env::var(LEGACY_KEY_VAR).ok()))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
