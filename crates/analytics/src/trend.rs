//! Daily revenue trend — group by date, sum amount, ascending by date.

use chrono::NaiveDate;
use pulse_core::types::SalesRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
}

pub fn daily_revenue(records: &[SalesRecord]) -> Vec<DailyRevenue> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *by_date.entry(record.date).or_insert(0.0) += record.total_amount;
    }
    by_date
        .into_iter()
        .map(|(date, revenue)| DailyRevenue { date, revenue })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::types::MonthKey;

    fn record(date: &str, amount: f64) -> SalesRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        SalesRecord {
            date,
            month: MonthKey::from_date(date),
            category: "Beauty".to_string(),
            quantity: 1,
            total_amount: amount,
            age: 30,
            gender: "Female".to_string(),
        }
    }

    #[test]
    fn test_groups_and_sorts_ascending() {
        let rows = vec![
            record("2023-01-07", 40.0),
            record("2023-01-05", 100.0),
            record("2023-01-05", 60.0),
        ];
        let trend = daily_revenue(&rows);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date.to_string(), "2023-01-05");
        assert!((trend[0].revenue - 160.0).abs() < 1e-9);
        assert_eq!(trend[1].date.to_string(), "2023-01-07");
        assert!((trend[1].revenue - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        assert!(daily_revenue(&[]).is_empty());
    }
}
