// 🏠 Household - one per submission, embeds its members

use super::member::Member;
use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORICAL DOMAINS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterFilterType {
    None,
    Candle,
    Ceramic,
    Ro,
    Biosand,
    Other,
}

impl WaterFilterType {
    /// Table order used by the weighted sampler
    pub const ALL: [WaterFilterType; 6] = [
        WaterFilterType::None,
        WaterFilterType::Candle,
        WaterFilterType::Ceramic,
        WaterFilterType::Ro,
        WaterFilterType::Biosand,
        WaterFilterType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WaterFilterType::None => "none",
            WaterFilterType::Candle => "candle",
            WaterFilterType::Ceramic => "ceramic",
            WaterFilterType::Ro => "ro",
            WaterFilterType::Biosand => "biosand",
            WaterFilterType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryWaterSource {
    Piped,
    ProtectedWell,
    Spring,
    UnprotectedWell,
    River,
    Tanker,
    Other,
}

impl PrimaryWaterSource {
    /// Table order used by the weighted sampler
    pub const ALL: [PrimaryWaterSource; 7] = [
        PrimaryWaterSource::Piped,
        PrimaryWaterSource::ProtectedWell,
        PrimaryWaterSource::Spring,
        PrimaryWaterSource::UnprotectedWell,
        PrimaryWaterSource::River,
        PrimaryWaterSource::Tanker,
        PrimaryWaterSource::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryWaterSource::Piped => "piped",
            PrimaryWaterSource::ProtectedWell => "protected_well",
            PrimaryWaterSource::Spring => "spring",
            PrimaryWaterSource::UnprotectedWell => "unprotected_well",
            PrimaryWaterSource::River => "river",
            PrimaryWaterSource::Tanker => "tanker",
            PrimaryWaterSource::Other => "other",
        }
    }
}

// ============================================================================
// HOUSEHOLD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub household_id: String,
    pub submission_id: String,
    pub ward_id: String,
    pub household_head_name: String,

    /// Last four digits of the contact phone, zero padded ("0042")
    pub phone_last4: String,

    /// Size as reported by the respondent (2-9 when clean, signed so a
    /// corrupted negative value can still be represented)
    pub hh_size_reported: i32,

    pub water_filter_type: WaterFilterType,
    pub primary_water_source: PrimaryWaterSource,
    pub has_toilet: bool,

    /// Enumerated members, never more than hh_size_reported
    pub members: Vec<Member>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_wire_names_match_as_str() {
        for filter in WaterFilterType::ALL {
            assert_eq!(
                serde_json::to_value(filter).unwrap(),
                serde_json::json!(filter.as_str())
            );
        }
        for source in PrimaryWaterSource::ALL {
            assert_eq!(
                serde_json::to_value(source).unwrap(),
                serde_json::json!(source.as_str())
            );
        }
    }
}
