//! Static mapping from language and gender to an AWS Polly voice.
//!
//! Polly does not ship both genders for every language, so each slot is an
//! `Option`. Resolution falls back to the other gender before giving up.

use std::str::FromStr;

use strum::IntoEnumIterator;

use super::types::{Gender, Language, VoiceId};
use crate::error::SpeechError;

/// Male and female slots for a single language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoicePair {
    pub male: Option<&'static str>,
    pub female: Option<&'static str>,
}

impl VoicePair {
    const fn new(male: Option<&'static str>, female: Option<&'static str>) -> Self {
        Self { male, female }
    }

    pub fn get(&self, gender: Gender) -> Option<&'static str> {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VoiceTable;

impl VoiceTable {
    pub fn voices(language: Language) -> VoicePair {
        match language {
            Language::Danish => VoicePair::new(Some("Mads"), Some("Naja")),
            Language::Dutch => VoicePair::new(Some("Ruben"), Some("Lotte")),
            Language::AustralianEnglish => VoicePair::new(Some("Russell"), Some("Nicole")),
            Language::BritishEnglish => VoicePair::new(Some("Brian"), Some("Amy")),
            Language::IndianEnglish => VoicePair::new(None, Some("Aditi")),
            Language::UsEnglish => VoicePair::new(Some("Joey"), Some("Ivy")),
            Language::WelshEnglish => VoicePair::new(Some("Geraint"), None),
            Language::French => VoicePair::new(Some("Mathieu"), Some("Celine")),
            Language::CanadianFrench => VoicePair::new(None, Some("Chantal")),
            Language::German => VoicePair::new(Some("Hans"), Some("Vicki")),
            Language::Icelandic => VoicePair::new(Some("Karl"), Some("Dora")),
            Language::Italian => VoicePair::new(Some("Giorgio"), Some("Carla")),
            Language::Japanese => VoicePair::new(Some("Takumi"), Some("Mizuki")),
            Language::Korean => VoicePair::new(None, Some("Seoyeon")),
            Language::Norwegian => VoicePair::new(None, Some("Liv")),
            Language::Polish => VoicePair::new(Some("Jan"), Some("Ewa")),
        }
    }

    pub fn languages() -> impl Iterator<Item = Language> {
        Language::iter()
    }

    /// Exact slot lookup, no fallback.
    pub fn lookup(language: Language, gender: Gender) -> Option<VoiceId> {
        Self::voices(language).get(gender).map(VoiceId::from)
    }

    /// Resolve a voice by table language name. Unknown names are reported as
    /// `NoVoiceAvailable` rather than a parse failure.
    pub fn resolve(language: &str, gender: Gender) -> Result<VoiceId, SpeechError> {
        let Ok(parsed) = Language::from_str(language.trim()) else {
            return Err(SpeechError::NoVoiceAvailable {
                language: language.to_string(),
                gender,
            });
        };
        Self::resolve_language(parsed, gender)
    }

    /// Requested gender first, then the other one.
    pub fn resolve_language(language: Language, gender: Gender) -> Result<VoiceId, SpeechError> {
        if let Some(voice) = Self::lookup(language, gender) {
            return Ok(voice);
        }

        let fallback = gender.opposite();
        match Self::lookup(language, fallback) {
            Some(voice) => {
                tracing::debug!(
                    %language,
                    requested = %gender,
                    %fallback,
                    %voice,
                    "No voice for requested gender, using fallback"
                );
                Ok(voice)
            }
            None => Err(SpeechError::NoVoiceAvailable {
                language: language.to_string(),
                gender,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_a_usable_voice() {
        for language in VoiceTable::languages() {
            let male = VoiceTable::resolve_language(language, Gender::Male);
            let female = VoiceTable::resolve_language(language, Gender::Female);
            assert!(
                male.is_ok() || female.is_ok(),
                "{language} has no usable voice"
            );
        }
    }

    #[test]
    fn test_table_slots_are_non_empty_when_present() {
        for language in VoiceTable::languages() {
            let pair = VoiceTable::voices(language);
            for id in [pair.male, pair.female].into_iter().flatten() {
                assert!(!id.is_empty(), "{language} has an empty voice id");
            }
        }
    }

    #[test]
    fn test_us_english_male_is_joey() {
        let voice = VoiceTable::resolve("US English", Gender::Male).unwrap();
        assert_eq!(voice, "Joey");
    }

    #[test]
    fn test_welsh_english_female_falls_back_to_male() {
        let voice = VoiceTable::resolve("Welsh English", Gender::Female).unwrap();
        assert_eq!(voice, "Geraint");
    }

    #[test]
    fn test_korean_male_falls_back_to_female() {
        let voice = VoiceTable::resolve("Korean", Gender::Male).unwrap();
        assert_eq!(voice, "Seoyeon");
    }

    #[test]
    fn test_unknown_language_has_no_voice() {
        let err = VoiceTable::resolve("UnknownLanguage", Gender::Male).unwrap_err();
        match err {
            SpeechError::NoVoiceAvailable { language, gender } => {
                assert_eq!(language, "UnknownLanguage");
                assert_eq!(gender, Gender::Male);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lookup_does_not_fall_back() {
        assert_eq!(VoiceTable::lookup(Language::Norwegian, Gender::Male), None);
        assert_eq!(
            VoiceTable::lookup(Language::Norwegian, Gender::Female),
            Some(VoiceId::from("Liv"))
        );
    }

    #[test]
    fn test_table_has_sixteen_languages() {
        assert_eq!(VoiceTable::languages().count(), 16);
    }
}
