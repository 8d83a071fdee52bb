pub mod client;
pub mod mock;
pub mod polly;
pub mod synthesizer;
pub mod text;
pub mod types;

pub use client::SpeechClient;
pub use polly::PollySynthesizer;
pub use synthesizer::SpeechSynthesizer;
pub use text::normalize_text;
pub use types::*;
