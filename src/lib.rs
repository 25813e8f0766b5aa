// WASH Submission Synthesizer - Core Library
// Generates fake household survey batches (with controlled defects) for
// exercising downstream staging and validation.

pub mod assembler;
pub mod config;
pub mod defects;
pub mod model;
pub mod sampling;
pub mod storage;
pub mod synthesizer;

// Re-export commonly used types
pub use assembler::{
    assemble, new_batch_id, object_key, run,
    AssembledBatch, RunSummary,
};
pub use config::{ConfigError, GeneratorConfig, RunConfig};
pub use defects::{DefectCase, DefectInjector, DefectTally};
pub use model::{
    BatchDocument, BatchMeta, BatchProvenance,
    Household, Member, Submission, WaterPoint,
};
pub use sampling::{rng_from_seed, WeightedTable};
pub use storage::{
    LocalObjectStore, MemoryObjectStore, ObjectStore,
    PutObject, PutReceipt,
};
pub use synthesizer::RecordSynthesizer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
