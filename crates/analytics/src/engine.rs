use crate::error::AnalyticsError;
use crate::stats::median;
use configuration::{AnalysisSettings, ColumnMap};
use core_types::{AbcClass, EnrichedRecord, ProductRecord, StrategicStatus};
use dataset::Table;
use rust_decimal::Decimal;

/// A stateless calculator for inventory performance indicators.
#[derive(Debug, Clone, Default)]
pub struct PerformanceAnalyzer {
    settings: AnalysisSettings,
}

/// Per-row values computed before the dataset-wide passes.
struct RowMetrics<'a> {
    source_index: usize,
    record: &'a ProductRecord,
    turnover: Option<Decimal>,
    coverage_days: Option<Decimal>,
}

impl PerformanceAnalyzer {
    /// Creates an analyzer with custom ABC thresholds.
    ///
    /// Fails unless `0 < abc_a_threshold <= abc_b_threshold <= 1`.
    pub fn new(settings: AnalysisSettings) -> Result<Self, AnalyticsError> {
        settings
            .validate()
            .map_err(|e| AnalyticsError::InvalidParameters(e.to_string()))?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// The main entry point: enriches every record with turnover, coverage,
    /// cumulative revenue share, ABC class and strategic status.
    ///
    /// # Arguments
    ///
    /// * `records` - The complete snapshot to analyse. Classes are relative to it.
    ///
    /// # Returns
    ///
    /// New records sorted by `net_revenue` descending. Rows with equal revenue
    /// keep their input order; `source_index` gives each row's input position.
    pub fn analyze(&self, records: &[ProductRecord]) -> Vec<EnrichedRecord> {
        if records.is_empty() {
            return Vec::new();
        }

        // 1 & 2. Per-row ratios.
        let mut rows: Vec<RowMetrics<'_>> = records
            .iter()
            .enumerate()
            .map(|(source_index, record)| RowMetrics {
                source_index,
                record,
                turnover: record.turnover(),
                coverage_days: record.coverage_days(),
            })
            .collect();

        // 3. ABC. `sort_by` is stable, which pins the tie-break to input order.
        rows.sort_by(|a, b| b.record.net_revenue.cmp(&a.record.net_revenue));
        let shares = cumulative_shares(rows.iter().map(|r| r.record.net_revenue));

        // 4. Medians over the whole set. Undefined turnovers are left out.
        let turnover_median = median(rows.iter().filter_map(|r| r.turnover).collect());
        let margin_median = median(rows.iter().map(|r| r.record.margin_percent).collect());

        tracing::debug!(
            rows = rows.len(),
            ?turnover_median,
            ?margin_median,
            undefined_turnover = rows.iter().filter(|r| r.turnover.is_none()).count(),
            "Computed dataset aggregates."
        );

        let (a_upper, b_upper) = (self.settings.abc_a_threshold, self.settings.abc_b_threshold);
        rows.into_iter()
            .zip(shares)
            .map(|(row, share)| EnrichedRecord {
                record: row.record.clone(),
                source_index: row.source_index,
                turnover: row.turnover,
                coverage_days: row.coverage_days,
                cumulative_revenue_share: share,
                abc_class: AbcClass::from_share(share, a_upper, b_upper),
                strategic_status: classify_quadrant(
                    row.turnover,
                    row.record.margin_percent,
                    turnover_median,
                    margin_median,
                ),
            })
            .collect()
    }

    /// Analyses raw spreadsheet rows.
    ///
    /// Aborts without partial results when a required column is absent
    /// (`MissingColumns`), a required cell is blank (`MissingField`) or a cell
    /// is not a number (`InvalidNumber`).
    pub fn analyze_table(
        &self,
        table: &Table,
        columns: &ColumnMap,
        decimal_comma: bool,
    ) -> Result<Vec<EnrichedRecord>, AnalyticsError> {
        let records = table.to_records(columns, decimal_comma)?;
        let enriched = self.analyze(&records);
        tracing::info!(records = enriched.len(), "Inventory analysis complete.");
        Ok(enriched)
    }
}

/// Running share of the total for each value, in the given order.
///
/// Every share is `None` when the total is zero, since 0/0 has no meaning.
pub fn cumulative_shares<I>(revenues: I) -> Vec<Option<Decimal>>
where
    I: IntoIterator<Item = Decimal>,
{
    let revenues: Vec<Decimal> = revenues.into_iter().collect();
    let total: Decimal = revenues.iter().sum();
    if total.is_zero() {
        return vec![None; revenues.len()];
    }

    let mut running = Decimal::ZERO;
    revenues
        .into_iter()
        .map(|revenue| {
            running += revenue;
            running.checked_div(total)
        })
        .collect()
}

/// Places a row in the turnover/margin matrix.
///
/// A value equal to its median counts as high. An undefined turnover, or a
/// dataset where no turnover is defined, counts as low turnover.
pub fn classify_quadrant(
    turnover: Option<Decimal>,
    margin: Decimal,
    turnover_median: Option<Decimal>,
    margin_median: Option<Decimal>,
) -> StrategicStatus {
    let high_turnover = matches!((turnover, turnover_median), (Some(t), Some(m)) if t >= m);
    let high_margin = margin_median.is_some_and(|m| margin >= m);
    StrategicStatus::from_quadrant(high_turnover, high_margin)
}
