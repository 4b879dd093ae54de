mod client;
mod prompt;

pub use client::GeminiVision;
pub use prompt::ANALYSIS_INSTRUCTION;

use async_trait::async_trait;
use bytes::Bytes;

/// One outbound call to the hosted multimodal model. Returns the model's raw
/// textual output unmodified; transport and quota failures propagate to the
/// caller without retries.
#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn analyze(
        &self,
        image: Bytes,
        mime_type: &str,
        instruction: &str,
    ) -> anyhow::Result<String>;
}
