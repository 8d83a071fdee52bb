pub mod error;
pub mod service;
pub mod settings;
pub mod speech;
pub mod voice;

// Public library API. Most callers only need the service, the settings and
// the error type; the lower layers stay public for custom providers.
pub use error::SpeechError;
pub use service::{SpeechDefaults, SpeechService};
pub use settings::{Settings, SettingsLoader};
pub use speech::{
    OutputFormat, SpeechClient, SpeechSynthesizer, SynthesisRequest, SynthesizedAudio, TextType,
};
pub use voice::{Gender, Language, VoiceId, VoiceTable};
