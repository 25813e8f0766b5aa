// 👤 Household Member

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        }
    }
}

/// Boolean survey answer that may have been corrupted into free text.
///
/// Serializes untagged: `true` / `false` for real answers, a JSON string for
/// corrupted ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Answer(bool),
    Text(String),
}

impl FlagValue {
    /// The boolean answer, or None if the value was corrupted
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Answer(value) => Some(*value),
            FlagValue::Text(_) => None,
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Answer(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub household_id: String,
    pub submission_id: String,

    /// 1-based position within the household, contiguous
    pub member_index: u32,

    pub member_name: String,
    pub sex: Sex,
    pub age_years: u32,

    /// Diarrhoea episode in the last 14 days
    pub had_diarrhoea_14d: FlagValue,
}
