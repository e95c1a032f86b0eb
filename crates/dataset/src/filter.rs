//! Filter stage — inclusive date range AND category membership.

use chrono::NaiveDate;
use pulse_core::types::SalesRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// User-chosen dashboard filters. `None` fields apply no constraint; an
/// explicit empty category set selects nothing, which is valid and flows
/// through every pipeline as empty aggregates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub categories: Option<BTreeSet<String>>,
}

impl FilterQuery {
    pub fn matches(&self, record: &SalesRecord) -> bool {
        if let Some(start) = self.start {
            if record.date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if record.date > end {
                return false;
            }
        }
        if let Some(categories) = &self.categories {
            if !categories.contains(&record.category) {
                return false;
            }
        }
        true
    }

    /// Applies both predicates, cloning the surviving rows.
    pub fn apply(&self, records: &[SalesRecord]) -> Vec<SalesRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::types::MonthKey;

    fn record(date: &str, category: &str) -> SalesRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        SalesRecord {
            date,
            month: MonthKey::from_date(date),
            category: category.to_string(),
            quantity: 1,
            total_amount: 10.0,
            age: 30,
            gender: "Female".to_string(),
        }
    }

    fn sample() -> Vec<SalesRecord> {
        vec![
            record("2023-01-05", "Beauty"),
            record("2023-01-31", "Clothing"),
            record("2023-02-14", "Beauty"),
        ]
    }

    #[test]
    fn test_no_constraints_keeps_everything() {
        let filter = FilterQuery::default();
        assert_eq!(filter.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let filter = FilterQuery {
            start: NaiveDate::from_ymd_opt(2023, 1, 5),
            end: NaiveDate::from_ymd_opt(2023, 1, 31),
            categories: None,
        };
        let rows = filter.apply(&sample());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Beauty");
        assert_eq!(rows[1].category, "Clothing");
    }

    #[test]
    fn test_category_and_date_compose_with_and() {
        let filter = FilterQuery {
            start: NaiveDate::from_ymd_opt(2023, 1, 1),
            end: NaiveDate::from_ymd_opt(2023, 1, 31),
            categories: Some(["Beauty".to_string()].into_iter().collect()),
        };
        let rows = filter.apply(&sample());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "Beauty");
    }

    #[test]
    fn test_empty_category_set_selects_nothing() {
        let filter = FilterQuery {
            start: None,
            end: None,
            categories: Some(BTreeSet::new()),
        };
        assert!(filter.apply(&sample()).is_empty());
    }

    #[test]
    fn test_unknown_category_yields_empty_not_error() {
        let filter = FilterQuery {
            start: None,
            end: None,
            categories: Some(["Electronics".to_string()].into_iter().collect()),
        };
        assert!(filter.apply(&sample()).is_empty());
    }
}
