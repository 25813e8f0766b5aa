// 🚚 Batch Assembler - one invocation, one object
//
// Flow:
//   RunConfig → RNG (seeded or not) → batch id + key
//            → synthesize → inject defects → serialize → single put_object
//
// `now` comes from the caller: the binary passes the wall clock, tests pass a
// fixed instant so seeded runs are byte-identical.

use crate::config::RunConfig;
use crate::defects::{DefectInjector, DefectTally};
use crate::model::{BatchDocument, BatchMeta, BatchProvenance};
use crate::sampling::{rng_from_seed, uuid_v4};
use crate::storage::{ObjectStore, PutObject};
use crate::synthesizer::{iso_utc, RecordSynthesizer};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const CONTENT_TYPE: &str = "application/json";
pub const BATCH_ID_LEN: usize = 10;

// ============================================================================
// RUN SUMMARY
// ============================================================================

/// Returned to the invoker after the object has been written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub status: String,
    pub bucket: String,
    pub key: String,
    pub batch_id: String,
    pub n_households: usize,
    pub bad_row_rate: f64,
}

/// A serialized batch ready to be written
#[derive(Debug, Clone)]
pub struct AssembledBatch {
    pub key: String,
    pub batch_id: String,
    pub body: Vec<u8>,
    pub tally: DefectTally,
}

// ============================================================================
// NAMING
// ============================================================================

/// First 10 characters of a UUID drawn from the handle
pub fn new_batch_id<R: Rng>(rng: &mut R) -> String {
    uuid_v4(rng).to_string().chars().take(BATCH_ID_LEN).collect()
}

/// `<prefix>/<YYYY>/<MM>/<DD>/wash_submissions_<HHMMSS>_<batch_id>.json`
///
/// Trailing slashes on the prefix are dropped so `raw/` and `raw` give the
/// same key. An empty prefix puts the date path at the bucket root.
pub fn object_key(prefix: &str, now: DateTime<Utc>, batch_id: &str) -> String {
    let dated = format!(
        "{}/wash_submissions_{}_{}.json",
        now.format("%Y/%m/%d"),
        now.format("%H%M%S"),
        batch_id
    );
    match prefix.trim_end_matches('/') {
        "" => dated,
        prefix => format!("{}/{}", prefix, dated),
    }
}

// ============================================================================
// ASSEMBLY
// ============================================================================

/// Build and serialize a batch without writing it anywhere
pub fn assemble<R: Rng>(
    config: &RunConfig,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<AssembledBatch> {
    let generator = &config.generator;
    let synthesizer = RecordSynthesizer::new(generator.clone())?;
    let injector = DefectInjector::new(generator.bad_row_rate);

    let batch_id = new_batch_id(rng);
    let key = object_key(&config.prefix, now, &batch_id);
    let loaded_at = iso_utc(now);

    let provenance = BatchProvenance {
        batch_id: batch_id.clone(),
        loaded_at: loaded_at.clone(),
        source_file: key.clone(),
    };

    let mut submissions = synthesizer.generate(&provenance, now, rng);
    let tally = injector.inject_all(&mut submissions, rng);

    let document = BatchDocument {
        batch_meta: BatchMeta {
            generated_at: loaded_at,
            batch_id: batch_id.clone(),
            n_households: generator.n_households,
            bad_row_rate: generator.bad_row_rate,
        },
        submissions,
    };

    // serde_json writes UTF-8 and leaves non-ASCII characters unescaped
    let body = serde_json::to_vec(&document).context("Failed to serialize batch document")?;

    Ok(AssembledBatch {
        key,
        batch_id,
        body,
        tally,
    })
}

/// Full invocation: assemble, write once, summarize
pub fn run<S: ObjectStore + ?Sized>(
    config: &RunConfig,
    store: &S,
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    let mut rng = rng_from_seed(config.seed.as_deref());
    if config.seed.is_some() {
        log::info!("using deterministic seed");
    }

    let batch = assemble(config, now, &mut rng)?;
    log::info!(
        "generated {} submissions for batch {} ({})",
        config.generator.n_households,
        batch.batch_id,
        batch.tally.summary()
    );

    let receipt = store
        .put_object(PutObject {
            bucket: &config.bucket,
            key: &batch.key,
            body: &batch.body,
            content_type: CONTENT_TYPE,
        })
        .with_context(|| format!("Failed to write {}/{}", config.bucket, batch.key))?;
    log::info!(
        "wrote {} bytes to {}/{} (sha256 {})",
        receipt.size,
        receipt.bucket,
        receipt.key,
        receipt.sha256
    );

    Ok(RunSummary {
        status: "ok".to_string(),
        bucket: config.bucket.clone(),
        key: batch.key,
        batch_id: batch.batch_id,
        n_households: config.generator.n_households,
        bad_row_rate: config.generator.bad_row_rate,
    })
}

// ============================================================================
// TESTS
// ============================================================================
