//! AWS Polly speech synthesis backend

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::Region;
use aws_sdk_polly::config::Credentials;
use aws_sdk_polly::types::{
    Engine as PollyEngine, LanguageCode, OutputFormat as PollyOutputFormat,
    TextType as PollyTextType, VoiceId as PollyVoiceId,
};
use aws_sdk_polly::Client;

use super::synthesizer::SpeechSynthesizer;
use super::types::{Engine, OutputFormat, SynthesisRequest, SynthesizedAudio, TextType, Voice};
use crate::error::SpeechError;
use crate::settings::AwsSettings;

const CREDENTIALS_PROVIDER_NAME: &str = "voicebox-settings";

#[derive(Clone)]
pub struct PollySynthesizer {
    client: Client,
}

impl PollySynthesizer {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a Polly client from settings. Explicit keys win over the named
    /// profile; with neither, the default AWS credential chain is used.
    pub async fn from_settings(settings: &AwsSettings) -> anyhow::Result<Self> {
        if settings.region.trim().is_empty() {
            anyhow::bail!("AWS region is empty")
        }

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .retry_config(RetryConfig::disabled());

        match (&settings.access_key_id, &settings.secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => {
                let credentials = Credentials::new(
                    access_key_id,
                    secret_access_key,
                    settings.session_token.clone(),
                    None,
                    CREDENTIALS_PROVIDER_NAME,
                );
                loader = loader.credentials_provider(credentials);
            }
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("AWS access key id and secret access key must be set together")
            }
            (None, None) => {
                if let Some(profile) = &settings.profile {
                    loader = loader.profile_name(profile);
                }
            }
        }

        if settings.connect_timeout_secs.is_some() || settings.operation_timeout_secs.is_some() {
            let mut timeouts = TimeoutConfig::builder();
            if let Some(secs) = settings.connect_timeout_secs {
                timeouts = timeouts.connect_timeout(Duration::from_secs(secs));
            }
            if let Some(secs) = settings.operation_timeout_secs {
                timeouts = timeouts.operation_timeout(Duration::from_secs(secs));
            }
            loader = loader.timeout_config(timeouts.build());
        }

        let aws_config = loader.load().await;
        tracing::debug!(region = %settings.region, "Created AWS Polly client");
        Ok(Self::new(Client::new(&aws_config)))
    }

    fn text_type(text_type: TextType) -> PollyTextType {
        match text_type {
            TextType::Ssml => PollyTextType::Ssml,
            TextType::Text => PollyTextType::Text,
        }
    }

    fn output_format(format: OutputFormat) -> PollyOutputFormat {
        match format {
            OutputFormat::Mp3 => PollyOutputFormat::Mp3,
            OutputFormat::OggVorbis => PollyOutputFormat::OggVorbis,
            OutputFormat::Pcm => PollyOutputFormat::Pcm,
            OutputFormat::Json => PollyOutputFormat::Json,
        }
    }

    fn engine(engine: Engine) -> PollyEngine {
        match engine {
            Engine::Standard => PollyEngine::Standard,
            Engine::Neural => PollyEngine::Neural,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for PollySynthesizer {
    fn name(&self) -> &'static str {
        "aws_polly"
    }

    async fn synthesize_speech(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SynthesizedAudio, SpeechError> {
        let mut call = self
            .client
            .synthesize_speech()
            .text(&request.text)
            .voice_id(PollyVoiceId::from(request.voice_id.as_str()))
            .text_type(Self::text_type(request.text_type))
            .output_format(Self::output_format(request.output_format));

        if let Some(engine) = request.engine {
            call = call.engine(Self::engine(engine));
        }
        if let Some(sample_rate) = request.sample_rate {
            call = call.sample_rate(sample_rate.to_string());
        }

        let response = call
            .send()
            .await
            .context("Polly SynthesizeSpeech request failed")
            .map_err(SpeechError::Synthesis)?;

        Ok(SynthesizedAudio {
            content_type: response.content_type,
            request_characters: Some(response.request_characters),
            audio_stream: Some(response.audio_stream),
        })
    }

    async fn list_voices(&self, language_code: Option<&str>) -> Result<Vec<Voice>, SpeechError> {
        let mut voices = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut call = self.client.describe_voices().set_next_token(next_token);
            if let Some(code) = language_code {
                call = call.language_code(LanguageCode::from(code));
            }

            let response = call
                .send()
                .await
                .context("Polly DescribeVoices request failed")
                .map_err(SpeechError::Synthesis)?;

            voices.extend(response.voices.unwrap_or_default().into_iter().filter_map(|v| {
                let id = v.id?.as_str().to_string();
                Some(Voice {
                    name: v.name.unwrap_or_else(|| id.clone()),
                    id,
                    gender: v.gender.map(|g| g.as_str().to_string()),
                    language_code: v.language_code.map(|c| c.as_str().to_string()),
                    language_name: v.language_name,
                })
            }));

            next_token = response.next_token;
            if next_token.is_none() {
                break;
            }
        }

        Ok(voices)
    }
}
