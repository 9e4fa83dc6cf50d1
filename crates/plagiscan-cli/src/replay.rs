//! Offline client that answers with a saved model reply.

use async_trait::async_trait;
use plagiscan_ai::{AnalyzeError, Generation, GenerativeClient};
use tracing::info;

pub struct ReplayClient {
    reply: String,
}

impl ReplayClient {
    pub fn new(reply: String) -> Self {
        Self { reply }
    }
}

#[async_trait]
impl GenerativeClient for ReplayClient {
    async fn generate(&self, _prompt: &str, _web_search: bool) -> Result<Generation, AnalyzeError> {
        info!(reply_bytes = self.reply.len(), "replaying saved reply");
        Ok(Generation {
            text: self.reply.clone(),
            sources: Vec::new(),
        })
    }
}
