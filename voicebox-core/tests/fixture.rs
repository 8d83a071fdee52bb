use std::sync::Arc;

use tempfile::TempDir;
use voicebox_core::speech::mock::{MockBehavior, MockSynthesizer};
use voicebox_core::speech::SpeechClient;
use voicebox_core::{SpeechDefaults, SpeechService};

pub struct Fixture {
    pub mock: MockSynthesizer,
    pub client: SpeechClient,
    pub output_dir: TempDir,
}

impl Fixture {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::with_behavior(MockBehavior::default())
    }

    pub fn with_behavior(behavior: MockBehavior) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let output_dir = TempDir::new().unwrap();
        let mock = MockSynthesizer::new(behavior);
        let client = SpeechClient::new(Arc::new(mock.clone())).with_output_dir(output_dir.path());

        Self {
            mock,
            client,
            output_dir,
        }
    }

    #[allow(dead_code)]
    pub fn service(&self) -> SpeechService {
        SpeechService::new(self.client.clone(), SpeechDefaults::default())
    }

    #[allow(dead_code)]
    pub fn files_in_output_dir(&self) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(self.output_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }
}
