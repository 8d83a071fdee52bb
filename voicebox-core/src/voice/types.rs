use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Voice gender as used by the voice table. There is no third value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[strum(ascii_case_insensitive)]
pub enum Gender {
    Male,
    #[default]
    Female,
}

impl Gender {
    pub fn opposite(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

/// Languages known to the voice table, named the way the table names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    Danish,
    Dutch,
    #[strum(serialize = "Australian English")]
    AustralianEnglish,
    #[strum(serialize = "British English")]
    BritishEnglish,
    #[strum(serialize = "Indian English")]
    IndianEnglish,
    #[strum(serialize = "US English")]
    UsEnglish,
    #[strum(serialize = "Welsh English")]
    WelshEnglish,
    French,
    #[strum(serialize = "Canadian French")]
    CanadianFrench,
    German,
    Icelandic,
    Italian,
    Japanese,
    Korean,
    Norwegian,
    Polish,
}

/// Provider-defined voice name, e.g. `Joey`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VoiceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for VoiceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<&str> for VoiceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_gender_parses_both_values() {
        assert_eq!(Gender::from_str("Male").unwrap(), Gender::Male);
        assert_eq!(Gender::from_str("female").unwrap(), Gender::Female);
    }

    #[test]
    fn test_gender_rejects_third_value() {
        assert!(Gender::from_str("Neutral").is_err());
        assert!(Gender::from_str("").is_err());
    }

    #[test]
    fn test_gender_opposite() {
        assert_eq!(Gender::Male.opposite(), Gender::Female);
        assert_eq!(Gender::Female.opposite(), Gender::Male);
    }

    #[test]
    fn test_language_round_trips_table_names() {
        assert_eq!(Language::UsEnglish.to_string(), "US English");
        assert_eq!(
            Language::from_str("Welsh English").unwrap(),
            Language::WelshEnglish
        );
        assert_eq!(Language::from_str("korean").unwrap(), Language::Korean);
        assert!(Language::from_str("UnknownLanguage").is_err());
    }
}
