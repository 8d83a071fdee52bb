use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aws_sdk_polly::primitives::ByteStream;
use aws_smithy_types::body::SdkBody;

use super::synthesizer::SpeechSynthesizer;
use super::types::{SynthesisRequest, SynthesizedAudio, Voice};
use crate::error::SpeechError;

/// Mock behavior for the mock synthesizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockBehavior {
    /// Return the given audio bytes for every request
    Success { audio: Vec<u8> },
    /// Answer without an audio payload
    MissingAudio,
    /// Answer with a zero length payload
    EmptyAudio,
    /// Hand back a stream whose body fails on the first read
    StreamError,
    /// Fail the provider call
    ProviderError { message: String },
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self::Success {
            audio: b"ID3mock-audio".to_vec(),
        }
    }
}

/// Deterministic synthesizer for tests
#[derive(Clone, Default)]
pub struct MockSynthesizer {
    behavior: Arc<Mutex<MockBehavior>>,
    captured_requests: Arc<Mutex<Vec<SynthesisRequest>>>,
}

impl MockSynthesizer {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn captured_requests(&self) -> Vec<SynthesisRequest> {
        self.captured_requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.captured_requests.lock().unwrap().len()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn synthesize_speech(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SynthesizedAudio, SpeechError> {
        self.captured_requests.lock().unwrap().push(request.clone());
        let behavior = self.behavior.lock().unwrap().clone();

        let audio_stream = match behavior {
            MockBehavior::Success { audio } => Some(ByteStream::from(audio)),
            MockBehavior::EmptyAudio => Some(ByteStream::from(Vec::new())),
            MockBehavior::MissingAudio => None,
            MockBehavior::StreamError => Some(ByteStream::new(SdkBody::taken())),
            MockBehavior::ProviderError { message } => {
                return Err(SpeechError::synthesis(message));
            }
        };

        Ok(SynthesizedAudio {
            content_type: Some(request.output_format.mime_type().to_string()),
            request_characters: i32::try_from(request.text.chars().count()).ok(),
            audio_stream,
        })
    }

    async fn list_voices(&self, language_code: Option<&str>) -> Result<Vec<Voice>, SpeechError> {
        let voices = [
            ("Joey", "Male", "en-US"),
            ("Ivy", "Female", "en-US"),
            ("Amy", "Female", "en-GB"),
        ]
        .into_iter()
        .filter(|(_, _, code)| language_code.map_or(true, |wanted| wanted == *code))
        .map(|(id, gender, code)| Voice {
            id: id.to_string(),
            name: id.to_string(),
            gender: Some(gender.to_string()),
            language_code: Some(code.to_string()),
            language_name: None,
        })
        .collect();
        Ok(voices)
    }
}
