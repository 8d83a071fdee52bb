use aws_sdk_polly::primitives::ByteStream;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::SpeechError;
use crate::voice::VoiceId;

/// How the provider should interpret the request text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum TextType {
    /// Speech Synthesis Markup Language, rooted at `<speak>`
    #[default]
    #[strum(serialize = "ssml")]
    Ssml,
    #[serde(alias = "plain")]
    #[strum(to_string = "text", serialize = "plain")]
    Text,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    #[strum(serialize = "mp3")]
    Mp3,
    #[serde(alias = "ogg")]
    #[strum(to_string = "ogg_vorbis", serialize = "ogg")]
    OggVorbis,
    #[strum(serialize = "pcm")]
    Pcm,
    /// Speech marks metadata rather than audio
    #[strum(serialize = "json")]
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::OggVorbis => "ogg",
            OutputFormat::Pcm => "pcm",
            OutputFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "audio/mpeg",
            OutputFormat::OggVorbis => "audio/ogg",
            OutputFormat::Pcm => "audio/pcm",
            OutputFormat::Json => "application/x-json-stream",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Engine {
    Standard,
    Neural,
}

/// A single synthesis call. Built per request and consumed by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: VoiceId,
    pub text_type: TextType,
    pub output_format: OutputFormat,
    pub engine: Option<Engine>,
    pub sample_rate: Option<u32>,
}

impl SynthesisRequest {
    pub fn new(
        text: impl Into<String>,
        voice_id: VoiceId,
        text_type: TextType,
        output_format: OutputFormat,
    ) -> Self {
        Self {
            text: text.into(),
            voice_id,
            text_type,
            output_format,
            engine: None,
            sample_rate: None,
        }
    }

    pub fn with_engine(mut self, engine: Option<Engine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: Option<u32>) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn validate(&self) -> Result<(), SpeechError> {
        if self.text.trim().is_empty() {
            return Err(SpeechError::InvalidRequest(
                "text to synthesize is empty".to_string(),
            ));
        }
        if self.voice_id.as_str().trim().is_empty() {
            return Err(SpeechError::InvalidRequest("voice id is empty".to_string()));
        }
        Ok(())
    }
}

/// Provider response for a synthesis call.
///
/// `audio_stream` is `None` when the provider answered without an audio
/// payload; callers treat that as a failed synthesis.
#[derive(Debug)]
pub struct SynthesizedAudio {
    pub content_type: Option<String>,
    pub request_characters: Option<i32>,
    pub audio_stream: Option<ByteStream>,
}

/// A voice as reported by the provider's voice listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub gender: Option<String>,
    pub language_code: Option<String>,
    pub language_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_text_type_accepts_plain_alias() {
        assert_eq!(TextType::from_str("plain").unwrap(), TextType::Text);
        assert_eq!(TextType::from_str("ssml").unwrap(), TextType::Ssml);
        assert_eq!(TextType::Text.to_string(), "text");
    }

    #[test]
    fn test_output_format_names_and_extensions() {
        assert_eq!(OutputFormat::from_str("ogg").unwrap(), OutputFormat::OggVorbis);
        assert_eq!(
            OutputFormat::from_str("ogg_vorbis").unwrap(),
            OutputFormat::OggVorbis
        );
        assert_eq!(OutputFormat::OggVorbis.to_string(), "ogg_vorbis");
        assert_eq!(OutputFormat::OggVorbis.extension(), "ogg");
        assert_eq!(OutputFormat::Mp3.extension(), "mp3");
        assert!(OutputFormat::from_str("wav").is_err());
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let request =
            SynthesisRequest::new("   ", VoiceId::from("Joey"), TextType::Text, OutputFormat::Mp3);
        assert!(matches!(
            request.validate(),
            Err(SpeechError::InvalidRequest(_))
        ));
    }
}
