use async_trait::async_trait;

use super::types::{SynthesisRequest, SynthesizedAudio, Voice};
use crate::error::SpeechError;

/// A speech synthesis backend. The request/response schema is the provider's;
/// implementations only translate to and from it.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Issue a single synthesis call. Text is sent exactly as given.
    async fn synthesize_speech(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SynthesizedAudio, SpeechError>;

    /// List the voices the provider offers, optionally for one language code
    async fn list_voices(&self, language_code: Option<&str>) -> Result<Vec<Voice>, SpeechError>;
}
