use crate::stats::mean;
use core_types::{AbcClass, EnrichedRecord, StrategicStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The headline indicators of an analysed inventory snapshot.
///
/// This is what the report header shows; it is derived from the enriched
/// records and never fed back into the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub record_count: usize,

    // I. Financial and volume totals
    pub total_revenue: Decimal,
    pub total_stock_value: Decimal,
    pub total_stock_units: Decimal,
    pub mean_turnover: Option<Decimal>, // Option<> because every turnover may be undefined
    pub mean_margin: Option<Decimal>,   // Option<> for an empty snapshot

    // II. Operational status
    pub class_a_count: usize,
    pub stockout_risk_count: usize,
    pub mico_count: usize,
}

impl InventorySummary {
    /// Creates a new, zeroed-out summary.
    pub fn new() -> Self {
        Self {
            record_count: 0,
            total_revenue: Decimal::ZERO,
            total_stock_value: Decimal::ZERO,
            total_stock_units: Decimal::ZERO,
            mean_turnover: None,
            mean_margin: None,
            class_a_count: 0,
            stockout_risk_count: 0,
            mico_count: 0,
        }
    }

    /// Aggregates the enriched records.
    ///
    /// `stockout_days` is the coverage below which a class A item is flagged.
    pub fn from_records(records: &[EnrichedRecord], stockout_days: Decimal) -> Self {
        let mut summary = Self::new();
        if records.is_empty() {
            return summary;
        }

        summary.record_count = records.len();
        for e in records {
            summary.total_revenue += e.record.net_revenue;
            summary.total_stock_value += e.record.stock_cost_value;
            summary.total_stock_units += e.record.stock_quantity;
            if e.abc_class == AbcClass::A {
                summary.class_a_count += 1;
            }
            if is_stockout_risk(e, stockout_days) {
                summary.stockout_risk_count += 1;
            }
            if e.strategic_status == StrategicStatus::Mico {
                summary.mico_count += 1;
            }
        }

        summary.mean_turnover = mean(records.iter().filter_map(|e| e.turnover));
        summary.mean_margin = mean(records.iter().map(|e| e.record.margin_percent));
        summary
    }
}

impl Default for InventorySummary {
    fn default() -> Self {
        Self::new()
    }
}

/// A class A item about to run out: coverage is defined and below `stockout_days`.
pub fn is_stockout_risk(record: &EnrichedRecord, stockout_days: Decimal) -> bool {
    record.abc_class == AbcClass::A
        && record.coverage_days.is_some_and(|days| days < stockout_days)
}

/// Class A items at risk of an imminent stockout, in analysis order.
pub fn stockout_risks(records: &[EnrichedRecord], stockout_days: Decimal) -> Vec<&EnrichedRecord> {
    records
        .iter()
        .filter(|e| is_stockout_risk(e, stockout_days))
        .collect()
}

/// Idle stock: items with low turnover and low margin.
pub fn micos(records: &[EnrichedRecord]) -> Vec<&EnrichedRecord> {
    records
        .iter()
        .filter(|e| e.strategic_status == StrategicStatus::Mico)
        .collect()
}

pub fn filter_by_class<'a>(records: &'a [EnrichedRecord], classes: &[AbcClass]) -> Vec<&'a EnrichedRecord> {
    records
        .iter()
        .filter(|e| classes.contains(&e.abc_class))
        .collect()
}
