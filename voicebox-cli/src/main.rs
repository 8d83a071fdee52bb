use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use voicebox_core::{
    Gender, OutputFormat, SettingsLoader, SpeechDefaults, SpeechService, TextType, VoiceId,
    VoiceTable,
};

#[derive(Parser, Debug)]
#[command(name = "voicebox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Text to speech through AWS Polly")]
struct Args {
    /// Settings file to use instead of ~/.voicebox/settings.toml
    #[arg(long, value_name = "PATH", global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the voice id for a language and gender
    Voice {
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        gender: Option<Gender>,
    },
    /// Print the voice table
    Languages,
    /// Synthesize text into an audio file
    Say {
        text: String,
        /// Voice id, e.g. Joey. Resolved from language and gender when absent
        #[arg(long, conflicts_with_all = ["language", "gender"])]
        voice: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        gender: Option<Gender>,
        /// ssml or text
        #[arg(long)]
        text_type: Option<TextType>,
        /// mp3, ogg_vorbis, pcm or json
        #[arg(long)]
        format: Option<OutputFormat>,
        /// File name (without extension) inside the output directory
        #[arg(long, default_value = "speech")]
        stem: String,
        /// Write the audio here instead of the output directory
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// List the voices the provider offers
    Voices {
        /// Provider language code, e.g. en-US
        #[arg(long)]
        language_code: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    setup_tracing()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = Args::parse();
    info!("CLI startup: settings={:?}", args.settings);

    if let Command::Languages = args.command {
        print_languages();
        return Ok(());
    }

    let loader = match args.settings {
        Some(path) => SettingsLoader::from_path(path),
        None => SettingsLoader::new()?,
    };
    let settings = loader.load_with_env()?;

    if let Command::Voice { language, gender } = &args.command {
        let defaults = SpeechDefaults::from(&settings.defaults);
        println!("{}", defaults.resolve_voice(language.as_deref(), *gender)?);
        return Ok(());
    }

    let service = SpeechService::from_settings(&settings)
        .await
        .context("Failed to create speech service")?;

    match args.command {
        Command::Say {
            text,
            voice,
            language,
            gender,
            text_type,
            format,
            stem,
            output,
        } => {
            let voice_id = match voice {
                Some(voice) => VoiceId::from(voice),
                None => service.get_voice_id(language.as_deref(), gender)?,
            };
            info!(%voice_id, "Synthesizing");

            match output {
                Some(output) => {
                    let audio = service
                        .get_audio(&text, &voice_id, text_type, format)
                        .await?;
                    write_output(&output, &audio).await?;
                    println!("{}", output.display());
                }
                None => {
                    let path = service
                        .get_audio_file(&text, &voice_id, &stem, text_type, format)
                        .await?;
                    println!("{}", path.display());
                }
            }
        }
        Command::Voices {
            language_code,
            json,
        } => {
            let voices = service.list_voices(language_code.as_deref()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&voices)?);
            } else {
                for voice in voices {
                    println!(
                        "{:<12} {:<8} {}",
                        voice.id,
                        voice.gender.as_deref().unwrap_or("-"),
                        voice.language_name.as_deref().unwrap_or("-"),
                    );
                }
            }
        }
        Command::Voice { .. } | Command::Languages => {}
    }

    Ok(())
}

/// Write audio to a caller-chosen path, removing anything half written.
async fn write_output(output: &Path, audio: &[u8]) -> Result<()> {
    if let Err(e) = tokio::fs::write(output, audio).await {
        if let Err(cleanup) = tokio::fs::remove_file(output).await {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                warn!(?output, error = %cleanup, "Failed to remove partial audio file");
            }
        }
        return Err(e).with_context(|| format!("Failed to write audio to {output:?}"));
    }
    Ok(())
}

fn print_languages() {
    for language in VoiceTable::languages() {
        let pair = VoiceTable::voices(language);
        println!(
            "{:<20} {:<10} {}",
            language.to_string(),
            pair.get(Gender::Male).unwrap_or("-"),
            pair.get(Gender::Female).unwrap_or("-"),
        );
    }
}

fn setup_tracing() -> Result<()> {
    use std::fs;
    use tracing_subscriber::fmt;

    let home = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
    let trace_dir = home.join(".voicebox").join("trace");
    fs::create_dir_all(&trace_dir)?;

    let log_file = trace_dir.join("voicebox.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    info!("Tracing initialized to {:?}", log_file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_output_writes_audio() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("hello.mp3");

        write_output(&output, b"ID3audio").await.unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"ID3audio");
    }

    #[tokio::test]
    async fn test_failed_write_leaves_nothing_behind() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("missing").join("hello.mp3");

        let err = write_output(&output, b"ID3audio").await.unwrap_err();

        assert!(err.to_string().contains("Failed to write audio"));
        assert!(!output.exists());
    }
}
