use rand::Rng;

use super::catalog::{LOCATIONS, PRODUCT_CATEGORIES, STORE_PAYMENTS, all_brands, brands_for};
use super::{SourceGenerator, pick, random_date, random_seed, round2, seeded_rng};
use crate::filter;
use crate::types::{DataRecord, FilterParams, Source};

/// Source B – simulated physical-store purchase feed.
///
/// Emits 350–400 candidates per fetch with slightly higher prices and smaller
/// basket sizes than the online feed. Every record carries a location and no
/// rating.
pub struct PhysicalStoreSource {
    seed: u64,
}

impl PhysicalStoreSource {
    /// Build a source with a fixed seed for deterministic output.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Default for PhysicalStoreSource {
    fn default() -> Self {
        Self::new(random_seed())
    }
}

impl SourceGenerator for PhysicalStoreSource {
    fn id(&self) -> &'static str {
        "source_b"
    }

    fn fetch(&self, params: &FilterParams) -> Vec<DataRecord> {
        let mut rng = seeded_rng(self.seed);
        let candidates = rng.gen_range(350..=400);

        let year_from = params.year_from.unwrap_or(2020);
        let year_to = params.year_to.unwrap_or(2025);

        // Draw brands from the requested company set when possible so fewer
        // candidates are discarded. The filter predicate still has the final
        // say; when the intersection is empty the category's full brand list
        // is used instead.
        let requested: Vec<&'static str> = if params.companies.is_empty() {
            Vec::new()
        } else {
            all_brands()
                .filter(|brand| params.companies.iter().any(|c| c == brand))
                .collect()
        };

        let mut records = Vec::new();
        for _ in 0..candidates {
            let category = pick(&mut rng, &PRODUCT_CATEGORIES);
            let brand = if requested.is_empty() {
                pick(&mut rng, brands_for(category))
            } else {
                requested[rng.gen_range(0..requested.len())]
            };

            let record = DataRecord {
                source: Source::SourceB,
                category: category.to_owned(),
                brand: brand.to_owned(),
                price: round2(rng.gen_range(15.0..1200.0)),
                purchase_date: random_date(&mut rng, year_from, year_to),
                quantity: rng.gen_range(1..=3),
                rating: None,
                platform: "Store".to_owned(),
                location: Some(pick(&mut rng, &LOCATIONS).to_owned()),
                payment_method: pick(&mut rng, &STORE_PAYMENTS).to_owned(),
                product_id: format!("S{}", rng.gen_range(1000..=9999)),
            };

            if filter::matches(&record, params) {
                records.push(record);
            }
        }
        records
    }
}
