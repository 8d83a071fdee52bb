use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::anyhow;
use aws_sdk_polly::primitives::ByteStream;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use super::synthesizer::SpeechSynthesizer;
use super::text::normalize_text;
use super::types::{Engine, OutputFormat, SynthesisRequest, TextType, Voice};
use crate::error::SpeechError;
use crate::voice::{Gender, VoiceId, VoiceTable};

/// Thin wrapper around a [`SpeechSynthesizer`] that normalizes request text
/// and hands the audio back either as bytes or as a file.
///
/// Every call needs explicit text type and output format; defaults belong to
/// [`crate::service::SpeechService`].
#[derive(Clone)]
pub struct SpeechClient {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    output_dir: PathBuf,
    engine: Option<Engine>,
    sample_rate: Option<u32>,
}

impl SpeechClient {
    /// Audio files land in the system temporary directory unless
    /// [`SpeechClient::with_output_dir`] says otherwise.
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            synthesizer,
            output_dir: std::env::temp_dir(),
            engine: None,
            sample_rate: None,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_engine(mut self, engine: Option<Engine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: Option<u32>) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn provider_name(&self) -> &'static str {
        self.synthesizer.name()
    }

    pub fn resolve_voice(&self, language: &str, gender: Gender) -> Result<VoiceId, SpeechError> {
        VoiceTable::resolve(language, gender)
    }

    pub async fn list_voices(&self, language_code: Option<&str>) -> Result<Vec<Voice>, SpeechError> {
        self.synthesizer.list_voices(language_code).await
    }

    /// Synthesize `text` and return the provider's audio stream.
    pub async fn synthesize(
        &self,
        text: &str,
        voice_id: &VoiceId,
        text_type: TextType,
        output_format: OutputFormat,
    ) -> Result<ByteStream, SpeechError> {
        let mut request = SynthesisRequest::new(text, voice_id.clone(), text_type, output_format)
            .with_engine(self.engine)
            .with_sample_rate(self.sample_rate);
        request.validate()?;
        request.text = normalize_text(&request.text, text_type);

        tracing::debug!(
            provider = self.synthesizer.name(),
            voice = %request.voice_id,
            text_type = %request.text_type,
            output_format = %request.output_format,
            chars = request.text.chars().count(),
            "Requesting speech synthesis"
        );

        let response = self.synthesizer.synthesize_speech(&request).await?;
        response.audio_stream.ok_or_else(|| {
            SpeechError::synthesis(format!(
                "{} returned no audio stream for voice {}",
                self.synthesizer.name(),
                request.voice_id
            ))
        })
    }

    /// Synthesize and read the whole stream into memory.
    pub async fn get_speech_bytes(
        &self,
        text: &str,
        voice_id: &VoiceId,
        text_type: TextType,
        output_format: OutputFormat,
    ) -> Result<Vec<u8>, SpeechError> {
        let stream = self
            .synthesize(text, voice_id, text_type, output_format)
            .await?;
        let bytes = stream
            .collect()
            .await
            .map_err(|e| {
                SpeechError::Synthesis(anyhow::Error::new(e).context("Failed to read audio stream"))
            })?
            .into_bytes()
            .to_vec();

        if bytes.is_empty() {
            return Err(SpeechError::synthesis("audio stream was empty"));
        }
        Ok(bytes)
    }

    /// Synthesize into `{output_dir}/{filename_stem}.{ext}` and return the
    /// absolute path. A partially written file is removed before any error is
    /// returned.
    pub async fn get_speech_file(
        &self,
        text: &str,
        voice_id: &VoiceId,
        filename_stem: &str,
        text_type: TextType,
        output_format: OutputFormat,
    ) -> Result<PathBuf, SpeechError> {
        validate_stem(filename_stem)?;
        let path = self
            .absolute_output_dir()?
            .join(format!("{filename_stem}.{}", output_format.extension()));

        let mut stream = self
            .synthesize(text, voice_id, text_type, output_format)
            .await?;

        let mut file = File::create(&path)
            .await
            .map_err(|source| SpeechError::FileWrite {
                path: path.clone(),
                source,
            })?;

        let written = write_stream(&mut stream, &mut file, &path).await;
        drop(file);

        match written {
            Ok(0) => {
                discard_partial(&path).await;
                Err(SpeechError::synthesis("audio stream was empty"))
            }
            Ok(bytes) => {
                tracing::info!(?path, bytes, "Wrote synthesized speech");
                Ok(path)
            }
            Err(e) => {
                discard_partial(&path).await;
                Err(e)
            }
        }
    }

    /// Remove a file produced by [`SpeechClient::get_speech_file`]. Missing
    /// paths and non-files are ignored and failures are only logged.
    pub async fn remove_speech_file(&self, path: &Path) {
        match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => match tokio::fs::remove_file(path).await {
                Ok(()) => tracing::info!(?path, "Removed speech file"),
                Err(e) => tracing::warn!(?path, error = %e, "Failed to remove speech file"),
            },
            Ok(_) => tracing::debug!(?path, "Not a regular file, leaving it in place"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(?path, "Speech file does not exist")
            }
            Err(e) => tracing::warn!(?path, error = %e, "Failed to inspect speech file"),
        }
    }

    fn absolute_output_dir(&self) -> Result<PathBuf, SpeechError> {
        if self.output_dir.is_absolute() {
            return Ok(self.output_dir.clone());
        }
        std::env::current_dir()
            .map(|cwd| cwd.join(&self.output_dir))
            .map_err(|source| SpeechError::FileWrite {
                path: self.output_dir.clone(),
                source,
            })
    }
}

/// The stem must name a file directly inside the output directory.
fn validate_stem(stem: &str) -> Result<(), SpeechError> {
    let mut components = Path::new(stem).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !stem.contains(['/', '\\']) => Ok(()),
        _ => Err(SpeechError::InvalidRequest(format!(
            "invalid audio file name {stem:?}"
        ))),
    }
}

async fn write_stream(
    stream: &mut ByteStream,
    file: &mut File,
    path: &Path,
) -> Result<usize, SpeechError> {
    let write_error = |source| SpeechError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut written = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            SpeechError::Synthesis(anyhow!(e).context("Audio stream failed mid-transfer"))
        })?;
        file.write_all(&chunk).await.map_err(write_error)?;
        written += chunk.len();
    }
    file.flush().await.map_err(write_error)?;
    file.sync_all().await.map_err(write_error)?;
    Ok(written)
}

async fn discard_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(?path, error = %e, "Failed to remove partial speech file");
    }
}
