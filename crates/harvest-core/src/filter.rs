//! The matching rule applied to candidate records against a task's filter
//! parameters.

use chrono::Datelike;

use crate::types::{DataRecord, FilterParams};

/// Returns `true` when `record` satisfies every constraint in `params`.
///
/// Pure and total: any well-formed record/params pair yields an answer.
/// The year rule applies only when both bounds are present; absent or empty
/// keys impose no restriction.
pub fn matches(record: &DataRecord, params: &FilterParams) -> bool {
    if let (Some(from), Some(to)) = (params.year_from, params.year_to) {
        let year = record.purchase_date.year();
        if year < from || year > to {
            return false;
        }
    }

    if !params.companies.is_empty() && !params.companies.iter().any(|c| c == &record.brand) {
        return false;
    }

    if !params.categories.is_empty() && !params.categories.iter().any(|c| c == &record.category) {
        return false;
    }

    true
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::types::Source;

    fn record(brand: &str, category: &str, year: i32) -> DataRecord {
        DataRecord {
            source: Source::SourceA,
            category: category.to_owned(),
            brand: brand.to_owned(),
            price: 99.99,
            purchase_date: Utc
                .with_ymd_and_hms(year, 6, 15, 12, 0, 0)
                .single()
                .expect("valid test date"),
            quantity: 1,
            rating: Some(4.5),
            platform: "Online".to_owned(),
            location: None,
            payment_method: "PayPal".to_owned(),
            product_id: "P1234".to_owned(),
        }
    }

    #[test]
    fn empty_params_match_everything() {
        let params = FilterParams::default();
        assert!(matches(&record("Nike", "Clothing", 2022), &params));
    }

    #[test]
    fn year_range_is_inclusive() {
        let params = FilterParams {
            year_from: Some(2021),
            year_to: Some(2023),
            ..Default::default()
        };
        assert!(matches(&record("Nike", "Clothing", 2021), &params));
        assert!(matches(&record("Nike", "Clothing", 2023), &params));
        assert!(!matches(&record("Nike", "Clothing", 2020), &params));
        assert!(!matches(&record("Nike", "Clothing", 2024), &params));
    }

    #[test]
    fn year_rule_needs_both_bounds() {
        // A single bound imposes no restriction.
        let params = FilterParams {
            year_from: Some(2024),
            ..Default::default()
        };
        assert!(matches(&record("Nike", "Clothing", 2020), &params));
    }

    #[test]
    fn company_membership_is_required_when_present() {
        let params = FilterParams {
            companies: vec!["Adidas".to_owned(), "Puma".to_owned()],
            ..Default::default()
        };
        assert!(matches(&record("Puma", "Clothing", 2022), &params));
        assert!(!matches(&record("Nike", "Clothing", 2022), &params));
    }

    #[test]
    fn category_membership_is_required_when_present() {
        let params = FilterParams {
            categories: vec!["Electronics".to_owned()],
            ..Default::default()
        };
        assert!(matches(&record("Sony", "Electronics", 2022), &params));
        assert!(!matches(&record("Nike", "Clothing", 2022), &params));
    }

    #[test]
    fn all_constraints_are_anded() {
        let params = FilterParams {
            year_from: Some(2021),
            year_to: Some(2021),
            companies: vec!["Nike".to_owned()],
            categories: vec!["Clothing".to_owned()],
            ..Default::default()
        };
        assert!(matches(&record("Nike", "Clothing", 2021), &params));
        assert!(!matches(&record("Nike", "Clothing", 2022), &params));
        assert!(!matches(&record("Nike", "Sports", 2021), &params));
        assert!(!matches(&record("Adidas", "Clothing", 2021), &params));
    }
}
