// 💣 Defect Injector - controlled data-quality failures
//
// For a configurable share of submissions, corrupt exactly one field so the
// record trips a type / range / format check downstream. The catalog mirrors
// the failures staging most often rejects in real field data.

use crate::model::{FlagValue, Submission};
use crate::sampling::{chance, pick};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ward id outside every configured pool
pub const BAD_WARD: &str = "99";
pub const BAD_GPS: (f64, f64) = (123.456, 987.654);
pub const BAD_SUBMITTED_AT: &str = "02-02-2026 10:00";
pub const BAD_PHONE_LAST4: &str = "12A4";
pub const BAD_HH_SIZE: i32 = -3;
pub const BAD_DIARRHOEA_FLAG: &str = "yes";
pub const BAD_DISTANCE_MINUTES: i32 = -5;

// ============================================================================
// DEFECT CATALOG
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectCase {
    /// Ward id set to "99" on submission, household and water point
    BadWard,
    /// Submission coordinates outside any valid lat/lon range
    BadGps,
    /// submitted_at in a non ISO-8601 layout
    BadSubmittedAt,
    /// consent emitted as null
    ConsentNull,
    /// phone_last4 with a letter in it
    PhoneBad,
    /// Negative reported household size
    HhSizeNegative,
    /// First member's diarrhoea flag turned into a string
    MemberBadBoolType,
    /// Negative water point distance
    WaterpointDistanceNegative,
}

impl DefectCase {
    pub const ALL: [DefectCase; 8] = [
        DefectCase::BadWard,
        DefectCase::BadGps,
        DefectCase::BadSubmittedAt,
        DefectCase::ConsentNull,
        DefectCase::PhoneBad,
        DefectCase::HhSizeNegative,
        DefectCase::MemberBadBoolType,
        DefectCase::WaterpointDistanceNegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DefectCase::BadWard => "bad_ward",
            DefectCase::BadGps => "bad_gps",
            DefectCase::BadSubmittedAt => "bad_submitted_at",
            DefectCase::ConsentNull => "consent_null",
            DefectCase::PhoneBad => "phone_bad",
            DefectCase::HhSizeNegative => "hh_size_negative",
            DefectCase::MemberBadBoolType => "member_bad_bool_type",
            DefectCase::WaterpointDistanceNegative => "waterpoint_distance_negative",
        }
    }

    /// Apply this defect in place. Only the fields named by the case change.
    pub fn apply(&self, sub: &mut Submission) {
        match self {
            DefectCase::BadWard => {
                sub.ward_id = BAD_WARD.to_string();
                sub.household.ward_id = BAD_WARD.to_string();
                sub.water_point.ward_id = BAD_WARD.to_string();
            }
            DefectCase::BadGps => {
                sub.gps_lat = BAD_GPS.0;
                sub.gps_lon = BAD_GPS.1;
            }
            DefectCase::BadSubmittedAt => {
                sub.submitted_at = BAD_SUBMITTED_AT.to_string();
            }
            DefectCase::ConsentNull => {
                sub.consent = None;
            }
            DefectCase::PhoneBad => {
                sub.household.phone_last4 = BAD_PHONE_LAST4.to_string();
            }
            DefectCase::HhSizeNegative => {
                sub.household.hh_size_reported = BAD_HH_SIZE;
            }
            DefectCase::MemberBadBoolType => {
                if let Some(first) = sub.household.members.first_mut() {
                    first.had_diarrhoea_14d = FlagValue::Text(BAD_DIARRHOEA_FLAG.to_string());
                }
            }
            DefectCase::WaterpointDistanceNegative => {
                sub.water_point.distance_minutes = BAD_DISTANCE_MINUTES;
            }
        }
    }
}

impl fmt::Display for DefectCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// INJECTOR
// ============================================================================

pub struct DefectInjector {
    rate: f64,
}

impl DefectInjector {
    /// `rate` is the probability in [0, 1] that a submission gets a defect
    pub fn new(rate: f64) -> Self {
        DefectInjector { rate }
    }

    /// Decide whether to corrupt `sub`, then pick the case uniformly.
    ///
    /// The two draws are independent and a record that already looks invalid
    /// is not special-cased. Returns the applied case, if any.
    pub fn maybe_inject<R: Rng>(&self, sub: &mut Submission, rng: &mut R) -> Option<DefectCase> {
        if !chance(rng, self.rate) {
            return None;
        }

        let case = *pick(rng, &DefectCase::ALL);
        case.apply(sub);
        log::debug!("injected {} into submission {}", case, sub.submission_id);
        Some(case)
    }

    /// Run the injector over a whole batch, counting what was applied
    pub fn inject_all<R: Rng>(&self, submissions: &mut [Submission], rng: &mut R) -> DefectTally {
        let mut tally = DefectTally::default();
        for sub in submissions.iter_mut() {
            if let Some(case) = self.maybe_inject(sub, rng) {
                tally.record(case);
            }
        }
        tally
    }
}

// ============================================================================
// TALLY
// ============================================================================

/// Per-case counts of injected defects for one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DefectTally {
    pub by_case: BTreeMap<DefectCase, usize>,
}

impl DefectTally {
    pub fn record(&mut self, case: DefectCase) {
        *self.by_case.entry(case).or_insert(0) += 1;
    }

    pub fn total(&self) -> usize {
        self.by_case.values().sum()
    }

    pub fn summary(&self) -> String {
        if self.by_case.is_empty() {
            return "no defects injected".to_string();
        }
        let parts: Vec<String> = self
            .by_case
            .iter()
            .map(|(case, count)| format!("{}={}", case, count))
            .collect();
        format!("{} defects injected ({})", self.total(), parts.join(", "))
    }
}

// ============================================================================
// TESTS
// ============================================================================
