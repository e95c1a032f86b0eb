//! Tabular export of pipeline results in CSV and JSON record formats.

use crate::{categories, demographics, growth, heatmap, pareto, trend};
use pulse_core::error::PulseResult;
use pulse_core::types::SalesRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExportPipeline {
    DailyTrend,
    CategoryRevenue,
    Pareto,
    Heatmap,
    AgeSpending,
    GenderBreakdown,
    PriceElasticity,
    GrowthConsistency,
}

impl FromStr for ExportPipeline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily_trend" => Ok(Self::DailyTrend),
            "category_revenue" => Ok(Self::CategoryRevenue),
            "pareto" => Ok(Self::Pareto),
            "heatmap" => Ok(Self::Heatmap),
            "age_spending" => Ok(Self::AgeSpending),
            "gender_breakdown" => Ok(Self::GenderBreakdown),
            "price_elasticity" => Ok(Self::PriceElasticity),
            "growth_consistency" => Ok(Self::GrowthConsistency),
            other => Err(format!("unknown pipeline '{other}'")),
        }
    }
}

/// A pipeline result flattened to columns and rows.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Table {
    pub columns: Vec<String>,
    #[schema(value_type = Vec<Vec<Object>>)]
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl Table {
    pub fn to_csv(&self) -> String {
        let mut csv = self.columns.join(",");
        csv.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => format!("\"{}\"", s.replace('"', "\"\"")),
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect();
            csv.push_str(&cells.join(","));
            csv.push('\n');
        }
        csv
    }

    pub fn to_json_records(&self) -> PulseResult<String> {
        let mut records: Vec<HashMap<String, serde_json::Value>> = Vec::new();
        for row in &self.rows {
            let mut record = HashMap::new();
            for (i, column) in self.columns.iter().enumerate() {
                if let Some(value) = row.get(i) {
                    record.insert(column.clone(), value.clone());
                }
            }
            records.push(record);
        }
        Ok(serde_json::to_string_pretty(&records)?)
    }
}

/// Run one pipeline over the filtered rows and flatten its output.
pub fn build_table(pipeline: ExportPipeline, records: &[SalesRecord]) -> Table {
    use serde_json::json;

    match pipeline {
        ExportPipeline::DailyTrend => Table {
            columns: cols(&["date", "revenue"]),
            rows: trend::daily_revenue(records)
                .into_iter()
                .map(|r| vec![json!(r.date), json!(r.revenue)])
                .collect(),
        },
        ExportPipeline::CategoryRevenue => Table {
            columns: cols(&["category", "revenue"]),
            rows: categories::revenue_by_category(records)
                .into_iter()
                .map(|r| vec![json!(r.category), json!(r.revenue)])
                .collect(),
        },
        ExportPipeline::Pareto => Table {
            columns: cols(&["category", "revenue", "cumulative_share"]),
            rows: pareto::cumulative_rows(records)
                .into_iter()
                .map(|r| vec![json!(r.category), json!(r.revenue), json!(r.cumulative_share)])
                .collect(),
        },
        ExportPipeline::Heatmap => {
            let matrix = heatmap::monthly_by_category(records);
            let mut columns = vec!["category".to_string()];
            columns.extend(matrix.months.iter().cloned());
            let rows = matrix
                .categories
                .iter()
                .zip(&matrix.values)
                .map(|(category, values)| {
                    let mut row = vec![json!(category)];
                    row.extend(values.iter().map(|v| json!(v)));
                    row
                })
                .collect();
            Table { columns, rows }
        }
        ExportPipeline::AgeSpending => Table {
            columns: cols(&["age", "total_spend", "transactions", "avg_spend"]),
            rows: demographics::spending_by_age(records)
                .into_iter()
                .map(|r| {
                    vec![
                        json!(r.age),
                        json!(r.total_spend),
                        json!(r.transactions),
                        json!(r.avg_spend),
                    ]
                })
                .collect(),
        },
        ExportPipeline::GenderBreakdown => Table {
            columns: cols(&[
                "gender",
                "total_revenue",
                "transaction_count",
                "avg_order_value",
            ]),
            rows: demographics::breakdown_by_gender(records)
                .into_iter()
                .map(|r| {
                    vec![
                        json!(r.gender),
                        json!(r.total_revenue),
                        json!(r.transaction_count),
                        json!(r.avg_order_value),
                    ]
                })
                .collect(),
        },
        ExportPipeline::PriceElasticity => Table {
            columns: cols(&[
                "category",
                "total_amount",
                "total_quantity",
                "price_per_unit",
            ]),
            rows: growth::price_per_unit(records)
                .into_iter()
                .map(|r| {
                    vec![
                        json!(r.category),
                        json!(r.total_amount),
                        json!(r.total_quantity),
                        json!(r.price_per_unit),
                    ]
                })
                .collect(),
        },
        ExportPipeline::GrowthConsistency => Table {
            columns: cols(&["category", "consistency"]),
            rows: growth::growth_consistency(records)
                .into_iter()
                .map(|r| vec![json!(r.category), json!(r.consistency)])
                .collect(),
        },
    }
}

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pulse_core::types::MonthKey;

    fn record(date: &str, category: &str, amount: f64) -> SalesRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        SalesRecord {
            date,
            month: MonthKey::from_date(date),
            category: category.to_string(),
            quantity: 1,
            total_amount: amount,
            age: 30,
            gender: "Female".to_string(),
        }
    }

    #[test]
    fn test_pipeline_from_str() {
        assert_eq!(
            "daily_trend".parse::<ExportPipeline>().unwrap(),
            ExportPipeline::DailyTrend
        );
        assert!("bogus".parse::<ExportPipeline>().is_err());
    }

    #[test]
    fn test_csv_escapes_quotes() {
        let rows = vec![record("2023-01-05", "Kids \"XL\"", 10.0)];
        let table = build_table(ExportPipeline::CategoryRevenue, &rows);
        let csv = table.to_csv();
        assert!(csv.starts_with("category,revenue\n"));
        assert!(csv.contains("\"Kids \"\"XL\"\"\""));
    }

    #[test]
    fn test_json_records_parse_back() {
        let rows = vec![
            record("2023-01-05", "Beauty", 100.0),
            record("2023-01-06", "Clothing", 50.0),
        ];
        let table = build_table(ExportPipeline::CategoryRevenue, &rows);
        let json = table.to_json_records().unwrap();
        let parsed: Vec<HashMap<String, serde_json::Value>> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].contains_key("category"));
    }

    #[test]
    fn test_heatmap_table_has_month_columns() {
        let rows = vec![
            record("2023-01-05", "Beauty", 100.0),
            record("2023-02-05", "Beauty", 50.0),
        ];
        let table = build_table(ExportPipeline::Heatmap, &rows);
        assert_eq!(table.columns, vec!["category", "2023-01", "2023-02"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_empty_input_yields_header_only_csv() {
        let table = build_table(ExportPipeline::DailyTrend, &[]);
        assert_eq!(table.to_csv(), "date,revenue\n");
    }
}
