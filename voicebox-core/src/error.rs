use std::path::PathBuf;

use thiserror::Error;

use crate::voice::Gender;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("No voice available for language {language:?} ({gender})")]
    NoVoiceAvailable { language: String, gender: Gender },

    #[error("Speech synthesis failed: {0:#}")]
    Synthesis(anyhow::Error),

    #[error("Failed to write audio to {path:?}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl SpeechError {
    pub fn synthesis(message: impl std::fmt::Display) -> Self {
        Self::Synthesis(anyhow::anyhow!("{message}"))
    }
}
