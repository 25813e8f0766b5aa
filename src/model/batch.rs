// 📦 Batch Document - the single JSON object written per run

use super::submission::Submission;
use serde::{Deserialize, Serialize};

/// Invocation-level metadata stamped onto every submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProvenance {
    pub batch_id: String,
    pub loaded_at: String,
    pub source_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchMeta {
    pub generated_at: String,
    pub batch_id: String,
    pub n_households: usize,
    pub bad_row_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDocument {
    pub batch_meta: BatchMeta,
    pub submissions: Vec<Submission>,
}
