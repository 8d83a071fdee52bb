use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::speech::{Engine, OutputFormat, TextType};
use crate::voice::Gender;

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_language() -> String {
    "US English".to_string()
}

/// Provider connection settings. Keys are optional so the usual AWS profile
/// and environment chain still works.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AwsSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_timeout_secs: Option<u64>,
}

impl Default for AwsSettings {
    fn default() -> Self {
        Self {
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            profile: None,
            region: default_region(),
            connect_timeout_secs: None,
            operation_timeout_secs: None,
        }
    }
}

impl AwsSettings {
    /// Overlay the standard AWS environment variables on top of the file values
    pub fn apply_env(self) -> Self {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    pub(crate) fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(value) = var("AWS_ACCESS_KEY_ID") {
            self.access_key_id = Some(value);
        }
        if let Some(value) = var("AWS_SECRET_ACCESS_KEY") {
            self.secret_access_key = Some(value);
        }
        if let Some(value) = var("AWS_SESSION_TOKEN") {
            self.session_token = Some(value);
        }
        if let Some(value) = var("AWS_REGION") {
            self.region = value;
        }
        self
    }
}

/// Values used when a caller leaves a parameter out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultSettings {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub text_type: TextType,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<Engine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            gender: Gender::Female,
            text_type: TextType::Ssml,
            output_format: OutputFormat::Mp3,
            engine: None,
            sample_rate: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Settings {
    /// Where audio files are written; the system temp directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub aws: AwsSettings,

    #[serde(default)]
    pub defaults: DefaultSettings,
}

impl Settings {
    pub fn apply_env(mut self) -> Self {
        self.aws = self.aws.apply_env();
        self
    }
}
