use rand::Rng;

use super::catalog::{ONLINE_PAYMENTS, PRODUCT_CATEGORIES, brands_for};
use super::{SourceGenerator, pick, random_date, random_seed, round1, round2, seeded_rng};
use crate::filter;
use crate::types::{DataRecord, FilterParams, Source};

/// Source A – simulated online-store purchase feed.
///
/// Emits 750–800 candidates per fetch. Every record carries a rating and no
/// location.
pub struct OnlineStoreSource {
    seed: u64,
}

impl OnlineStoreSource {
    /// Build a source with a fixed seed for deterministic output.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Default for OnlineStoreSource {
    fn default() -> Self {
        Self::new(random_seed())
    }
}

impl SourceGenerator for OnlineStoreSource {
    fn id(&self) -> &'static str {
        "source_a"
    }

    fn fetch(&self, params: &FilterParams) -> Vec<DataRecord> {
        let mut rng = seeded_rng(self.seed);
        let candidates = rng.gen_range(750..=800);

        let year_from = params.year_from.unwrap_or(2020);
        let year_to = params.year_to.unwrap_or(2025);

        let mut records = Vec::new();
        for _ in 0..candidates {
            let category = pick(&mut rng, &PRODUCT_CATEGORIES);
            let brand = pick(&mut rng, brands_for(category));

            let record = DataRecord {
                source: Source::SourceA,
                category: category.to_owned(),
                brand: brand.to_owned(),
                price: round2(rng.gen_range(10.0..1000.0)),
                purchase_date: random_date(&mut rng, year_from, year_to),
                quantity: rng.gen_range(1..=5),
                rating: Some(round1(rng.gen_range(1.0..5.0))),
                platform: "Online".to_owned(),
                location: None,
                payment_method: pick(&mut rng, &ONLINE_PAYMENTS).to_owned(),
                product_id: format!("P{}", rng.gen_range(1000..=9999)),
            };

            if filter::matches(&record, params) {
                records.push(record);
            }
        }
        records
    }
}
