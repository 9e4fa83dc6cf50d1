//! HTTP client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use plagiscan_core::GroundingSource;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::client::{CredentialSource, Generation, GenerativeClient};
use crate::AnalyzeError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response has no candidate text")]
    EmptyResponse,
}

impl From<GeminiError> for AnalyzeError {
    fn from(err: GeminiError) -> Self {
        AnalyzeError::Service(err.to_string())
    }
}

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub model: String,
    /// Like `https://generativelanguage.googleapis.com` (no trailing slash needed).
    pub base_url: String,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Gemini client holding one `reqwest` connection pool and the API key.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

// ── Wire types ──

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Default)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingSource>,
}

impl GenerateResponse {
    /// Joined text parts and grounding chunks of the first candidate.
    fn into_generation(self) -> Result<Generation, GeminiError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(GeminiError::EmptyResponse)?;

        let parts: Vec<String> = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        if parts.is_empty() {
            return Err(GeminiError::EmptyResponse);
        }

        let sources = candidate
            .grounding_metadata
            .map(|g| g.grounding_chunks)
            .unwrap_or_default();

        Ok(Generation {
            text: parts.concat(),
            sources,
        })
    }
}

impl GeminiClient {
    /// Create a client with an explicit API key.
    pub fn new(api_key: String, config: GeminiConfig) -> Result<Self, GeminiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            api_key,
            model: config.model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve the API key once from `credentials` and build the client.
    ///
    /// Fails with [`AnalyzeError::Configuration`] when no key is available.
    pub async fn from_credentials(
        credentials: &dyn CredentialSource,
        config: GeminiConfig,
    ) -> Result<Self, AnalyzeError> {
        let api_key = credentials
            .api_key()
            .await
            .ok_or_else(AnalyzeError::missing_credential)?;
        Ok(Self::new(api_key, config)?)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn generate_content(&self, prompt: &str, web_search: bool) -> Result<Generation, GeminiError> {
        let url = self.endpoint();
        let request = build_request(prompt, web_search);

        info!(model = %self.model, prompt_bytes = prompt.len(), web_search, "requesting generation");
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        let generation = parsed.into_generation()?;
        info!(
            reply_bytes = generation.text.len(),
            sources = generation.sources.len(),
            "generation complete"
        );
        Ok(generation)
    }
}

fn build_request(prompt: &str, web_search: bool) -> GenerateRequest<'_> {
    let tools = if web_search {
        vec![Tool {
            google_search: GoogleSearch {},
        }]
    } else {
        Vec::new()
    };
    GenerateRequest {
        contents: vec![Content {
            parts: vec![RequestPart { text: prompt }],
        }],
        tools,
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, prompt: &str, web_search: bool) -> Result<Generation, AnalyzeError> {
        Ok(self.generate_content(prompt, web_search).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticCredentials;

    #[test]
    fn request_carries_prompt_and_search_tool() {
        let json = serde_json::to_value(build_request("hello", true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{"parts": [{"text": "hello"}]}],
                "tools": [{"google_search": {}}]
            })
        );
    }

    #[test]
    fn request_without_search_omits_tools() {
        let json = serde_json::to_value(build_request("hello", false)).unwrap();
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn response_joins_parts_and_reads_grounding() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "```json\n"}, {"text": "{}\n```"}]},
                "finishReason": "STOP",
                "groundingMetadata": {
                    "webSearchQueries": ["fox"],
                    "groundingChunks": [
                        {"web": {"uri": "https://example.com/fox", "title": "example.com"}}
                    ]
                }
            }]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        let generation = parsed.into_generation().unwrap();
        assert_eq!(generation.text, "```json\n{}\n```");
        assert_eq!(generation.sources.len(), 1);
        assert_eq!(generation.sources[0].uri(), Some("https://example.com/fox"));
        assert_eq!(generation.sources[0].title(), Some("example.com"));
    }

    #[test]
    fn response_without_grounding_has_no_sources() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "plain"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        let generation = parsed.into_generation().unwrap();
        assert_eq!(generation.text, "plain");
        assert!(generation.sources.is_empty());
    }

    #[test]
    fn response_without_candidates_is_an_error() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"promptFeedback": {}}"#).unwrap();
        assert!(matches!(
            parsed.into_generation(),
            Err(GeminiError::EmptyResponse)
        ));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let config = GeminiConfig {
            base_url: "http://localhost:8080/".into(),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new("k".into(), config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_credential_is_configuration_error() {
        let result = GeminiClient::from_credentials(&StaticCredentials(None), GeminiConfig::default()).await;
        match result {
            Err(AnalyzeError::Configuration(msg)) => assert!(msg.contains("API key")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("client built without a key"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_service_error() {
        let config = GeminiConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout: Some(Duration::from_secs(5)),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new("k".into(), config).unwrap();
        let err = client.generate("prompt", true).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::Service(_)));
    }
}
