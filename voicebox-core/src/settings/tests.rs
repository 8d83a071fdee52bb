use std::collections::HashMap;
use std::path::PathBuf;

use crate::settings::loader::SettingsLoader;
use crate::settings::{AwsSettings, Settings};
use crate::speech::{Engine, OutputFormat, TextType};
use crate::voice::Gender;
use tempfile::TempDir;

#[test]
fn test_missing_file_is_created_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("nested").join("settings.toml");

    let loader = SettingsLoader::from_path(settings_path.clone());
    let settings = loader.load().unwrap();

    assert_eq!(settings, Settings::default());
    assert!(settings_path.exists());
}

#[test]
fn test_defaults_match_documented_values() {
    let settings = Settings::default();

    assert_eq!(settings.defaults.language, "US English");
    assert_eq!(settings.defaults.gender, Gender::Female);
    assert_eq!(settings.defaults.text_type, TextType::Ssml);
    assert_eq!(settings.defaults.output_format, OutputFormat::Mp3);
    assert_eq!(settings.aws.region, "us-east-1");
    assert!(settings.output_dir.is_none());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");
    std::fs::write(
        &settings_path,
        r#"
output_dir = "/var/tmp/voicebox"

[aws]
region = "eu-west-1"
profile = "speech"

[defaults]
gender = "Male"
output_format = "ogg"
engine = "neural"
"#,
    )
    .unwrap();

    let settings = SettingsLoader::from_path(settings_path).load().unwrap();

    assert_eq!(settings.output_dir, Some(PathBuf::from("/var/tmp/voicebox")));
    assert_eq!(settings.aws.region, "eu-west-1");
    assert_eq!(settings.aws.profile.as_deref(), Some("speech"));
    assert_eq!(settings.defaults.language, "US English");
    assert_eq!(settings.defaults.gender, Gender::Male);
    assert_eq!(settings.defaults.output_format, OutputFormat::OggVorbis);
    assert_eq!(settings.defaults.text_type, TextType::Ssml);
    assert_eq!(settings.defaults.engine, Some(Engine::Neural));
}

#[test]
fn test_plain_text_type_alias() {
    let settings: Settings = toml::from_str(
        r#"
[defaults]
text_type = "plain"
"#,
    )
    .unwrap();

    assert_eq!(settings.defaults.text_type, TextType::Text);
}

#[test]
fn test_corrupt_file_is_backed_up_and_reset() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");
    std::fs::write(&settings_path, "this is [not valid toml").unwrap();

    let settings = SettingsLoader::from_path(settings_path.clone())
        .load()
        .unwrap();

    assert_eq!(settings, Settings::default());
    let backup = temp_dir.path().join("settings.toml.backup");
    assert_eq!(
        std::fs::read_to_string(backup).unwrap(),
        "this is [not valid toml"
    );
    assert!(settings_path.exists());
}

#[test]
fn test_unknown_gender_is_a_parse_error() {
    let parsed: Result<Settings, _> = toml::from_str(
        r#"
[defaults]
gender = "Other"
"#,
    );
    assert!(parsed.is_err());
}

#[test]
fn test_save_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.toml");
    let loader = SettingsLoader::from_path(settings_path);

    let mut settings = Settings::default();
    settings.aws.access_key_id = Some("AKIDEXAMPLE".to_string());
    settings.aws.secret_access_key = Some("secret".to_string());
    settings.defaults.language = "Korean".to_string();
    loader.save(&settings).unwrap();

    assert_eq!(loader.load().unwrap(), settings);
}

#[test]
fn test_environment_overrides_credentials() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("AWS_ACCESS_KEY_ID", "AKIDENV"),
        ("AWS_SECRET_ACCESS_KEY", "env-secret"),
        ("AWS_REGION", "ap-northeast-1"),
        ("AWS_SESSION_TOKEN", "  "),
    ]);

    let aws = AwsSettings {
        access_key_id: Some("AKIDFILE".to_string()),
        session_token: Some("file-token".to_string()),
        ..AwsSettings::default()
    }
    .apply_vars(|name| env.get(name).map(|v| v.to_string()));

    assert_eq!(aws.access_key_id.as_deref(), Some("AKIDENV"));
    assert_eq!(aws.secret_access_key.as_deref(), Some("env-secret"));
    assert_eq!(aws.region, "ap-northeast-1");
    // Blank variables do not clobber file values
    assert_eq!(aws.session_token.as_deref(), Some("file-token"));
}
