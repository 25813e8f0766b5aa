// 🧪 Record Synthesizer - plausible fake WASH survey submissions
//
// One call produces `n_households` independent submission trees:
//   Submission → Household → [Member, ...]
//   Submission → WaterPoint
//
// All randomness comes from the caller's `Rng` handle; timestamps are offsets
// from a caller-supplied `now`. Same seed + same `now` → same records.

use crate::config::GeneratorConfig;
use crate::model::{
    BatchProvenance, FlagValue, Household, Member, PrimaryWaterSource, Sex, Submission,
    SubmissionStatus, WaterFilterType, WaterPoint, WaterSourceType,
};
use crate::sampling::{chance, pick, round6, uuid_v4, WeightedTable};
use anyhow::Result;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;

// ============================================================================
// FIXED DOMAINS
// ============================================================================

pub const FIRST_NAMES: [&str; 17] = [
    "Sita", "Gita", "Maya", "Anita", "Sunita", "Rita", "Bina", "Laxmi", "Nirmala", "Ramesh",
    "Suresh", "Bikash", "Prakash", "Deepak", "Hari", "Krishna", "Nabin",
];

pub const LAST_NAMES: [&str; 13] = [
    "Ghimire", "Wagle", "Sharma", "Karki", "Thapa", "Adhikari", "Gurung", "Tamang", "Rai",
    "Magar", "Poudel", "Bhattarai", "Shrestha",
];

/// Weights aligned with `WaterFilterType::ALL`
pub const FILTER_TYPE_WEIGHTS: [u32; 6] = [55, 20, 10, 5, 4, 6];

/// Weights aligned with `PrimaryWaterSource::ALL`
pub const WATER_SOURCE_WEIGHTS: [u32; 7] = [30, 18, 16, 12, 10, 8, 6];

/// Bounding box of the survey region (lat, lon)
pub const LAT_RANGE: (f64, f64) = (26.5, 28.8);
pub const LON_RANGE: (f64, f64) = (80.0, 88.2);

/// Maximum per-axis offset between a submission and its water point
pub const WATER_POINT_JITTER: f64 = 0.005;

const CONSENT_RATE: f64 = 0.92;
const TOILET_RATE: f64 = 0.78;
const FUNCTIONAL_RATE: f64 = 0.86;
const DIARRHOEA_RATE_UNDER_FIVE: f64 = 0.12;
const DIARRHOEA_RATE: f64 = 0.08;

/// ISO-8601 UTC with a `Z` suffix and microsecond precision
pub fn iso_utc(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ============================================================================
// SYNTHESIZER
// ============================================================================

pub struct RecordSynthesizer {
    config: GeneratorConfig,
    filter_types: WeightedTable<WaterFilterType>,
    water_sources: WeightedTable<PrimaryWaterSource>,
}

impl RecordSynthesizer {
    /// Validates the config and builds the weighted tables
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;

        Ok(RecordSynthesizer {
            filter_types: WeightedTable::new(&WaterFilterType::ALL, &FILTER_TYPE_WEIGHTS)?,
            water_sources: WeightedTable::new(&PrimaryWaterSource::ALL, &WATER_SOURCE_WEIGHTS)?,
            config,
        })
    }

    /// Generate `n_households` submissions in generation order
    pub fn generate<R: Rng>(
        &self,
        provenance: &BatchProvenance,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<Submission> {
        (0..self.config.n_households)
            .map(|_| self.generate_one(provenance, now, rng))
            .collect()
    }

    /// Generate a single submission tree
    pub fn generate_one<R: Rng>(
        &self,
        provenance: &BatchProvenance,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Submission {
        let submission_id = uuid_v4(rng).to_string();
        let household_id = uuid_v4(rng).to_string();
        let ward_id = pick(rng, &self.config.wards).clone();
        let municipality = pick(rng, &self.config.municipality_pool).clone();

        let gps_lat = round6(rng.random_range(LAT_RANGE.0..=LAT_RANGE.1));
        let gps_lon = round6(rng.random_range(LON_RANGE.0..=LON_RANGE.1));

        // Independent offsets: collected_at usually precedes submitted_at, but
        // nothing forces it.
        let collected_at = iso_utc(now - Duration::minutes(rng.random_range(10..=240)));
        let submitted_at = iso_utc(now - Duration::minutes(rng.random_range(0..=60)));

        let household = self.make_household(&household_id, &submission_id, &ward_id, rng);
        let water_point = make_water_point(&submission_id, &ward_id, (gps_lat, gps_lon), rng);

        Submission {
            submission_id,
            status: SubmissionStatus::Submitted,
            submitted_at,
            collected_at,
            enumerator_id: format!("enum-{}", rng.random_range(1001..=1099)),
            device_id: format!("android-{}", rng.random_range(10_000..=99_999)),
            ward_id,
            municipality,
            district: self.config.district.clone(),
            gps_lat,
            gps_lon,
            consent: Some(chance(rng, CONSENT_RATE)),
            loaded_at: provenance.loaded_at.clone(),
            batch_id: provenance.batch_id.clone(),
            source_file: provenance.source_file.clone(),
            is_deleted: false,
            household,
            water_point,
        }
    }

    fn make_household<R: Rng>(
        &self,
        household_id: &str,
        submission_id: &str,
        ward_id: &str,
        rng: &mut R,
    ) -> Household {
        let hh_size: u32 = rng.random_range(2..=9);

        Household {
            household_id: household_id.to_string(),
            submission_id: submission_id.to_string(),
            ward_id: ward_id.to_string(),
            household_head_name: random_name(rng),
            phone_last4: format!("{:04}", rng.random_range(0..=9999)),
            hh_size_reported: hh_size as i32,
            water_filter_type: self.filter_types.sample(rng),
            primary_water_source: self.water_sources.sample(rng),
            has_toilet: chance(rng, TOILET_RATE),
            members: make_members(
                household_id,
                submission_id,
                hh_size,
                self.config.max_members_per_household,
                rng,
            ),
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn random_name<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, &FIRST_NAMES), pick(rng, &LAST_NAMES))
}

/// Between 1 and min(hh_size, max_members) members, indexed from 1
fn make_members<R: Rng>(
    household_id: &str,
    submission_id: &str,
    hh_size: u32,
    max_members: u32,
    rng: &mut R,
) -> Vec<Member> {
    let count = hh_size.min(rng.random_range(2..=max_members)).max(1);

    (1..=count)
        .map(|member_index| {
            let age_years: u32 = rng.random_range(0..=80);
            let rate = if age_years < 5 {
                DIARRHOEA_RATE_UNDER_FIVE
            } else {
                DIARRHOEA_RATE
            };
            let had_diarrhoea = chance(rng, rate);

            Member {
                household_id: household_id.to_string(),
                submission_id: submission_id.to_string(),
                member_index,
                member_name: random_name(rng),
                sex: *pick(rng, &Sex::ALL),
                age_years,
                had_diarrhoea_14d: FlagValue::from(had_diarrhoea),
            }
        })
        .collect()
}

fn make_water_point<R: Rng>(
    submission_id: &str,
    ward_id: &str,
    (lat, lon): (f64, f64),
    rng: &mut R,
) -> WaterPoint {
    WaterPoint {
        water_point_id: uuid_v4(rng).to_string(),
        submission_id: submission_id.to_string(),
        ward_id: ward_id.to_string(),
        source_type: *pick(rng, &WaterSourceType::ALL),
        functional: chance(rng, FUNCTIONAL_RATE),
        distance_minutes: rng.random_range(2..=45),
        gps_lat: round6(lat + rng.random_range(-WATER_POINT_JITTER..=WATER_POINT_JITTER)),
        gps_lon: round6(lon + rng.random_range(-WATER_POINT_JITTER..=WATER_POINT_JITTER)),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn provenance() -> BatchProvenance {
        BatchProvenance {
            batch_id: "0a1b2c3d-4".to_string(),
            loaded_at: "2026-02-02T10:00:00.000000Z".to_string(),
            source_file: "raw/2026/02/02/wash_submissions_100000_0a1b2c3d-4.json".to_string(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 2, 10, 0, 0).unwrap()
    }

    fn generate(n: usize, seed: u64) -> Vec<Submission> {
        let synth = RecordSynthesizer::new(GeneratorConfig::new(n, 0.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        synth.generate(&provenance(), fixed_now(), &mut rng)
    }

    #[test]
    fn test_generates_exact_count_with_distinct_ids() {
        let subs = generate(500, 1);
        assert_eq!(subs.len(), 500);

        let ids: HashSet<&str> = subs.iter().map(|s| s.submission_id.as_str()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_zero_households_yields_empty_batch() {
        assert!(generate(0, 1).is_empty());
    }

    #[test]
    fn test_member_count_and_indices() {
        let cfg = GeneratorConfig::default();
        for sub in generate(1_000, 2) {
            let hh = &sub.household;
            let limit = (hh.hh_size_reported as usize).min(cfg.max_members_per_household as usize);

            assert!(!hh.members.is_empty());
            assert!(hh.members.len() <= limit, "{} > {}", hh.members.len(), limit);

            let indices: Vec<u32> = hh.members.iter().map(|m| m.member_index).collect();
            let expected: Vec<u32> = (1..=hh.members.len() as u32).collect();
            assert_eq!(indices, expected);
        }
    }

    #[test]
    fn test_foreign_keys_link_the_tree() {
        for sub in generate(50, 3) {
            assert_eq!(sub.household.submission_id, sub.submission_id);
            assert_eq!(sub.water_point.submission_id, sub.submission_id);
            assert_eq!(sub.household.ward_id, sub.ward_id);
            assert_eq!(sub.water_point.ward_id, sub.ward_id);
            for member in &sub.household.members {
                assert_eq!(member.household_id, sub.household.household_id);
                assert_eq!(member.submission_id, sub.submission_id);
            }
        }
    }

    #[test]
    fn test_water_point_near_submission() {
        let tolerance = WATER_POINT_JITTER + 1e-9;
        for sub in generate(1_000, 4) {
            assert!((sub.water_point.gps_lat - sub.gps_lat).abs() <= tolerance);
            assert!((sub.water_point.gps_lon - sub.gps_lon).abs() <= tolerance);
        }
    }

    #[test]
    fn test_value_ranges() {
        let cfg = GeneratorConfig::default();
        for sub in generate(1_000, 5) {
            assert!(cfg.wards.contains(&sub.ward_id));
            assert!(cfg.municipality_pool.contains(&sub.municipality));
            assert_eq!(sub.district, "Kavrepalanchok");
            assert!((LAT_RANGE.0..=LAT_RANGE.1).contains(&sub.gps_lat));
            assert!((LON_RANGE.0..=LON_RANGE.1).contains(&sub.gps_lon));
            assert!(sub.consent.is_some());
            assert!(sub.enumerator_id.starts_with("enum-"));
            assert!(sub.device_id.starts_with("android-"));

            let hh = &sub.household;
            assert!((2..=9).contains(&hh.hh_size_reported));
            assert_eq!(hh.phone_last4.len(), 4);
            assert!(hh.phone_last4.chars().all(|c| c.is_ascii_digit()));
            for member in &hh.members {
                assert!(member.age_years <= 80);
                assert!(member.had_diarrhoea_14d.as_bool().is_some());
            }

            assert!((2..=45).contains(&sub.water_point.distance_minutes));
        }
    }

    #[test]
    fn test_provenance_and_status() {
        for sub in generate(10, 6) {
            assert_eq!(sub.status, SubmissionStatus::Submitted);
            assert!(!sub.is_deleted);
            assert_eq!(sub.batch_id, "0a1b2c3d-4");
            assert_eq!(sub.loaded_at, "2026-02-02T10:00:00.000000Z");
            assert!(sub.source_file.ends_with("_0a1b2c3d-4.json"));
        }
    }

    #[test]
    fn test_timestamps_are_iso_offsets_from_now() {
        let now = fixed_now();
        for sub in generate(200, 7) {
            let collected = DateTime::parse_from_rfc3339(&sub.collected_at)
                .unwrap()
                .with_timezone(&Utc);
            let submitted = DateTime::parse_from_rfc3339(&sub.submitted_at)
                .unwrap()
                .with_timezone(&Utc);
            assert!(sub.collected_at.ends_with('Z'));

            let collected_age = now.signed_duration_since(collected).num_minutes();
            let submitted_age = now.signed_duration_since(submitted).num_minutes();
            assert!((10..=240).contains(&collected_age));
            assert!((0..=60).contains(&submitted_age));
        }
    }

    fn share<F: Fn(&Submission) -> bool>(subs: &[Submission], pred: F) -> f64 {
        subs.iter().filter(|s| pred(s)).count() as f64 / subs.len() as f64
    }

    #[test]
    fn test_filter_types_follow_weights() {
        let subs = generate(20_000, 8);
        let expected = [
            (WaterFilterType::None, 0.55),
            (WaterFilterType::Candle, 0.20),
            (WaterFilterType::Ceramic, 0.10),
            (WaterFilterType::Ro, 0.05),
            (WaterFilterType::Biosand, 0.04),
            (WaterFilterType::Other, 0.06),
        ];
        for (filter, weight) in expected {
            let observed = share(&subs, |s| s.household.water_filter_type == filter);
            assert!(
                (observed - weight).abs() < 0.015,
                "{} share = {}, expected {}",
                filter.as_str(),
                observed,
                weight
            );
        }
    }

    #[test]
    fn test_water_sources_follow_weights() {
        let subs = generate(20_000, 9);
        let expected = [
            (PrimaryWaterSource::Piped, 0.30),
            (PrimaryWaterSource::ProtectedWell, 0.18),
            (PrimaryWaterSource::Spring, 0.16),
            (PrimaryWaterSource::UnprotectedWell, 0.12),
            (PrimaryWaterSource::River, 0.10),
            (PrimaryWaterSource::Tanker, 0.08),
            (PrimaryWaterSource::Other, 0.06),
        ];
        for (source, weight) in expected {
            let observed = share(&subs, |s| s.household.primary_water_source == source);
            assert!(
                (observed - weight).abs() < 0.015,
                "{} share = {}, expected {}",
                source.as_str(),
                observed,
                weight
            );
        }
    }

    #[test]
    fn test_boolean_rates() {
        let subs = generate(20_000, 10);

        let consent = share(&subs, |s| s.consent == Some(true));
        assert!((consent - 0.92).abs() < 0.015, "consent rate = {}", consent);

        let functional = share(&subs, |s| s.water_point.functional);
        assert!((functional - 0.86).abs() < 0.015, "functional rate = {}", functional);

        let toilet = share(&subs, |s| s.household.has_toilet);
        assert!((toilet - 0.78).abs() < 0.015, "toilet rate = {}", toilet);
    }

    #[test]
    fn test_diarrhoea_rate_depends_on_age() {
        let subs = generate(20_000, 11);
        let members: Vec<&Member> = subs.iter().flat_map(|s| &s.household.members).collect();

        let rate = |under_five: bool| {
            let group: Vec<&&Member> = members
                .iter()
                .filter(|m| (m.age_years < 5) == under_five)
                .collect();
            let sick = group
                .iter()
                .filter(|m| m.had_diarrhoea_14d == FlagValue::Answer(true))
                .count();
            sick as f64 / group.len() as f64
        };

        let young = rate(true);
        let older = rate(false);
        assert!((young - 0.12).abs() < 0.02, "under-five rate = {}", young);
        assert!((older - 0.08).abs() < 0.01, "five-and-over rate = {}", older);
    }

    #[test]
    fn test_same_seed_same_records() {
        assert_eq!(generate(25, 99), generate(25, 99));
        assert_ne!(generate(25, 99), generate(25, 100));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut cfg = GeneratorConfig::default();
        cfg.wards.clear();
        assert!(RecordSynthesizer::new(cfg).is_err());
    }

    #[test]
    fn test_iso_utc_format() {
        assert_eq!(iso_utc(fixed_now()), "2026-02-02T10:00:00.000000Z");
    }
}
