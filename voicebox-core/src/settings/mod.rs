pub mod config;
pub mod loader;

#[cfg(test)]
mod tests;

pub use config::{AwsSettings, DefaultSettings, Settings};
pub use loader::SettingsLoader;
