//! Caller-facing operations with defaults applied.
//!
//! [`SpeechClient`] always wants every parameter spelled out. This layer fills
//! in language, gender, text type and output format from [`SpeechDefaults`]
//! when the caller leaves them out.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::error::SpeechError;
use crate::settings::{DefaultSettings, Settings};
use crate::speech::types::Voice;
use crate::speech::{OutputFormat, PollySynthesizer, SpeechClient, TextType};
use crate::voice::{Gender, VoiceId, VoiceTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechDefaults {
    pub language: String,
    pub gender: Gender,
    pub text_type: TextType,
    pub output_format: OutputFormat,
}

impl Default for SpeechDefaults {
    fn default() -> Self {
        Self::from(&DefaultSettings::default())
    }
}

impl SpeechDefaults {
    /// Resolve a voice, taking language and gender from the defaults when
    /// the caller leaves them out.
    pub fn resolve_voice(
        &self,
        language: Option<&str>,
        gender: Option<Gender>,
    ) -> Result<VoiceId, SpeechError> {
        let language = language.unwrap_or(self.language.as_str());
        VoiceTable::resolve(language, gender.unwrap_or(self.gender))
    }
}

impl From<&DefaultSettings> for SpeechDefaults {
    fn from(settings: &DefaultSettings) -> Self {
        Self {
            language: settings.language.clone(),
            gender: settings.gender,
            text_type: settings.text_type,
            output_format: settings.output_format,
        }
    }
}

#[derive(Clone)]
pub struct SpeechService {
    client: SpeechClient,
    defaults: Arc<SpeechDefaults>,
}

impl SpeechService {
    pub fn new(client: SpeechClient, defaults: SpeechDefaults) -> Self {
        Self {
            client,
            defaults: Arc::new(defaults),
        }
    }

    /// Polly-backed service configured entirely from settings
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let polly = PollySynthesizer::from_settings(&settings.aws).await?;

        let mut client = SpeechClient::new(Arc::new(polly))
            .with_engine(settings.defaults.engine)
            .with_sample_rate(settings.defaults.sample_rate);
        if let Some(dir) = &settings.output_dir {
            client = client.with_output_dir(dir);
        }

        Ok(Self::new(client, SpeechDefaults::from(&settings.defaults)))
    }

    pub fn defaults(&self) -> &SpeechDefaults {
        &self.defaults
    }

    pub fn client(&self) -> &SpeechClient {
        &self.client
    }

    pub fn get_voice_id(
        &self,
        language: Option<&str>,
        gender: Option<Gender>,
    ) -> Result<VoiceId, SpeechError> {
        self.defaults.resolve_voice(language, gender)
    }

    pub async fn get_audio(
        &self,
        text: &str,
        voice_id: &VoiceId,
        text_type: Option<TextType>,
        output_format: Option<OutputFormat>,
    ) -> Result<Vec<u8>, SpeechError> {
        self.client
            .get_speech_bytes(
                text,
                voice_id,
                text_type.unwrap_or(self.defaults.text_type),
                output_format.unwrap_or(self.defaults.output_format),
            )
            .await
    }

    pub async fn get_audio_file(
        &self,
        text: &str,
        voice_id: &VoiceId,
        filename_stem: &str,
        text_type: Option<TextType>,
        output_format: Option<OutputFormat>,
    ) -> Result<PathBuf, SpeechError> {
        self.client
            .get_speech_file(
                text,
                voice_id,
                filename_stem,
                text_type.unwrap_or(self.defaults.text_type),
                output_format.unwrap_or(self.defaults.output_format),
            )
            .await
    }

    pub async fn remove_audio_file(&self, path: &Path) {
        self.client.remove_speech_file(path).await
    }

    pub async fn list_voices(&self, language_code: Option<&str>) -> Result<Vec<Voice>, SpeechError> {
        self.client.list_voices(language_code).await
    }
}
