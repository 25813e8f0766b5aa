// 🎲 Sampling Primitives
//
// Everything random in the pipeline flows through an explicit `Rng` handle.
// Seeded runs use `StdRng`, so the same seed always yields the same batch.

use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use uuid::Uuid;

// ============================================================================
// WEIGHTED TABLE
// ============================================================================

/// Discrete distribution over a fixed item list.
///
/// Stores running totals of the weights; a uniform draw in `[0, total)` is
/// mapped to an item by binary search over the totals.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    items: Vec<T>,
    cumulative: Vec<u64>,
    total: u64,
}

impl<T: Copy> WeightedTable<T> {
    pub fn new(items: &[T], weights: &[u32]) -> Result<Self> {
        ensure!(
            items.len() == weights.len(),
            "weighted table has {} items but {} weights",
            items.len(),
            weights.len()
        );
        ensure!(!items.is_empty(), "weighted table is empty");

        let mut cumulative = Vec::with_capacity(weights.len());
        let mut total = 0u64;
        for &weight in weights {
            total += u64::from(weight);
            cumulative.push(total);
        }
        ensure!(total > 0, "weighted table has zero total weight");

        Ok(WeightedTable {
            items: items.to_vec(),
            cumulative,
            total,
        })
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> T {
        let draw = rng.random_range(0..self.total);
        // First running total strictly above the draw; zero-weight items are
        // never selected because their total equals the previous one.
        let idx = self.cumulative.partition_point(|&c| c <= draw);
        self.items[idx]
    }
}

// ============================================================================
// SMALL DRAWS
// ============================================================================

/// Bernoulli draw: true with probability `p`
pub fn chance<R: Rng>(rng: &mut R, p: f64) -> bool {
    rng.random::<f64>() < p
}

/// Uniform pick from a pool. Panics if the pool is empty.
pub fn pick<'a, T, R: Rng>(rng: &mut R, pool: &'a [T]) -> &'a T {
    &pool[rng.random_range(0..pool.len())]
}

/// Version 4 UUID built from the handle's bytes rather than OS entropy
pub fn uuid_v4<R: Rng>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// Round to 6 decimal places (~0.1 m of latitude)
pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

// ============================================================================
// SEEDING
// ============================================================================

/// Map a seed string to a 64-bit seed.
///
/// Decimal integers are used as-is; any other string is hashed with SHA-256
/// and the first 8 bytes are read big-endian.
pub fn seed_from_str(seed: &str) -> u64 {
    let trimmed = seed.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return value;
    }

    let digest = Sha256::digest(trimmed.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

/// Seeded generator when a non-blank seed is given, OS entropy otherwise
pub fn rng_from_seed(seed: Option<&str>) -> StdRng {
    match seed.filter(|s| !s.trim().is_empty()) {
        Some(seed) => StdRng::seed_from_u64(seed_from_str(seed)),
        None => StdRng::from_os_rng(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
