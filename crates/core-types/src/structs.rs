use crate::enums::{AbcClass, StrategicStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One stock-keeping unit's aggregated data for the analysed period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub reference: String,
    pub net_revenue: Decimal,
    /// Average units sold per period. May be zero.
    pub avg_net_quantity_sold: Decimal,
    /// Margin in percentage points (35 means 35%).
    pub margin_percent: Decimal,
    pub cogs_sold: Decimal,
    pub stock_quantity: Decimal,
    pub stock_cost_value: Decimal,
    /// Values of the non-required input columns, in input column order.
    #[serde(default)]
    pub extra: Vec<String>,
}

impl ProductRecord {
    /// `cogs_sold / stock_cost_value`, undefined when there is no stock value.
    pub fn turnover(&self) -> Option<Decimal> {
        ratio(self.cogs_sold, self.stock_cost_value)
    }

    /// `stock_quantity / avg_net_quantity_sold`, undefined when nothing sells.
    pub fn coverage_days(&self) -> Option<Decimal> {
        ratio(self.stock_quantity, self.avg_net_quantity_sold)
    }
}

/// A `ProductRecord` together with its derived indicators.
///
/// Instances are produced by the analytics crate. The classification fields
/// depend on the whole dataset, so they are never computed for a record alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: ProductRecord,
    /// Position of the record in the analysed input.
    pub source_index: usize,
    pub turnover: Option<Decimal>,
    pub coverage_days: Option<Decimal>,
    /// `None` when total revenue of the dataset is zero.
    pub cumulative_revenue_share: Option<Decimal>,
    pub abc_class: AbcClass,
    pub strategic_status: StrategicStatus,
}

/// `numerator / denominator`, `None` when the denominator is zero.
///
/// A quotient beyond the `Decimal` range (about 7.9e28, e.g. a cost of 1e28
/// over a stock value of 0.01) is also `None`; such a row then sorts and
/// classifies like one without stock value.
fn ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        return None;
    }
    numerator.checked_div(denominator)
}
