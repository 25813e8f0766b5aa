// 📋 Submission - root aggregate of one household survey event

use super::household::Household;
use super::water_point::WaterPoint;
use serde::{Deserialize, Serialize};

/// Lifecycle of a submission. Generation only ever produces `Submitted`; the
/// other states exist for downstream consumers that round-trip the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted,
    Draft,
    Rejected,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    // ========================================================================
    // SURVEY FIELDS
    // ========================================================================
    pub submission_id: String,
    pub status: SubmissionStatus,

    /// ISO-8601 UTC ("...Z"), unless corrupted
    pub submitted_at: String,
    pub collected_at: String,

    pub enumerator_id: String,
    pub device_id: String,
    pub ward_id: String,
    pub municipality: String,
    pub district: String,
    pub gps_lat: f64,
    pub gps_lon: f64,

    /// Respondent consent. Nullable only so a missing answer can be emitted
    /// as JSON `null`.
    pub consent: Option<bool>,

    // ========================================================================
    // PROVENANCE (copied from the batch)
    // ========================================================================
    #[serde(rename = "_loaded_at")]
    pub loaded_at: String,

    #[serde(rename = "_batch_id")]
    pub batch_id: String,

    #[serde(rename = "_source_file")]
    pub source_file: String,

    #[serde(rename = "_is_deleted")]
    pub is_deleted: bool,

    // ========================================================================
    // EMBEDDED RECORDS
    // ========================================================================
    pub household: Household,
    pub water_point: WaterPoint,
}
