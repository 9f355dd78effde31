//! Simulated upstream data sources.
//!
//! Each source generates a batch of candidate purchase records, applies
//! [`crate::filter::matches`] to every candidate and returns the matches
//! only. Sources are independently substitutable: the trait is object-safe
//! and the shipped implementations take an explicit seed, so tests can run
//! them deterministically.

pub mod catalog;
mod source_a;
mod source_b;

pub use source_a::OnlineStoreSource;
pub use source_b::PhysicalStoreSource;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::types::{DataRecord, FilterParams};

/// One simulated upstream system.
pub trait SourceGenerator: Send + Sync + 'static {
    /// Stable tag used in `filter_params.data_sources` and stored on records.
    fn id(&self) -> &'static str;

    /// Generate candidates and return those matching `params`.
    ///
    /// The candidate count is a pre-filter volume; the post-filter yield is
    /// variable and may be zero.
    fn fetch(&self, params: &FilterParams) -> Vec<DataRecord>;
}

/// The two sources shipped by default.
pub fn default_sources() -> Vec<Box<dyn SourceGenerator>> {
    vec![
        Box::new(OnlineStoreSource::default()),
        Box::new(PhysicalStoreSource::default()),
    ]
}

// ── Shared generation helpers ─────────────────────────────────────────────────

pub(crate) fn random_seed() -> u64 {
    rand::random()
}

pub(crate) fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

pub(crate) fn pick<'a>(rng: &mut SmallRng, items: &'a [&'static str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// Uniformly random instant within `[year_from-01-01, year_to-12-31]`.
pub(crate) fn random_date(rng: &mut SmallRng, year_from: i32, year_to: i32) -> DateTime<Utc> {
    let start = Utc.with_ymd_and_hms(year_from, 1, 1, 0, 0, 0).single();
    let end = Utc.with_ymd_and_hms(year_to, 12, 31, 0, 0, 0).single();
    let (Some(start), Some(end)) = (start, end) else {
        return Utc::now();
    };
    let days = (end - start).num_days().max(1);
    start + Duration::days(rng.gen_range(0..days))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
