use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `giro.toml`; missing sections fall back to
/// their `Default` implementations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub columns: ColumnMap,
    pub analysis: AnalysisSettings,
    pub ingest: IngestSettings,
    pub report: ReportSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// Checks the cross-field rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.columns.validate()?;
        self.analysis.validate()?;
        self.ingest.validate()?;
        self.report.validate()
    }
}

/// Labels of the required input columns, as they appear in the spreadsheet header.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub reference: String,
    pub net_revenue: String,
    pub avg_net_quantity_sold: String,
    pub margin_percent: String,
    pub cogs_sold: String,
    pub stock_quantity: String,
    pub stock_cost_value: String,
}

impl ColumnMap {
    /// The required labels, in canonical field order.
    pub fn required(&self) -> [&str; 7] {
        [
            self.reference.as_str(),
            self.net_revenue.as_str(),
            self.avg_net_quantity_sold.as_str(),
            self.margin_percent.as_str(),
            self.cogs_sold.as_str(),
            self.stock_quantity.as_str(),
            self.stock_cost_value.as_str(),
        ]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for label in self.required() {
            if label.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "column labels must not be empty".to_string(),
                ));
            }
            if !seen.insert(label) {
                return Err(ConfigError::ValidationError(format!(
                    "column label '{label}' is mapped to more than one field"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            reference: "reference".to_string(),
            net_revenue: "net_revenue".to_string(),
            avg_net_quantity_sold: "avg_net_quantity_sold".to_string(),
            margin_percent: "margin_percent".to_string(),
            cogs_sold: "cogs_sold".to_string(),
            stock_quantity: "stock_quantity".to_string(),
            stock_cost_value: "stock_cost_value".to_string(),
        }
    }
}

/// Thresholds for the ABC revenue classification.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Inclusive upper bound of the cumulative revenue share for class A.
    pub abc_a_threshold: Decimal,
    /// Inclusive upper bound of the cumulative revenue share for class B.
    pub abc_b_threshold: Decimal,
}

impl AnalysisSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (a, b) = (self.abc_a_threshold, self.abc_b_threshold);
        if a <= Decimal::ZERO || a > b || b > Decimal::ONE {
            return Err(ConfigError::ValidationError(format!(
                "ABC thresholds must satisfy 0 < a <= b <= 1 (got a = {a}, b = {b})"
            )));
        }
        Ok(())
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            abc_a_threshold: dec!(0.80),
            abc_b_threshold: dec!(0.95),
        }
    }
}

/// How the input spreadsheet export is parsed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Single-byte field delimiter (`,` or `;` in practice).
    pub delimiter: String,
    /// Read numbers as `1.234,56` instead of `1,234.56`.
    pub decimal_comma: bool,
}

impl IngestSettings {
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter.len() != 1 || !self.delimiter.is_ascii() {
            return Err(ConfigError::ValidationError(format!(
                "ingest.delimiter must be a single ASCII character (got '{}')",
                self.delimiter
            )));
        }
        Ok(())
    }
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            decimal_comma: false,
        }
    }
}

/// Row order of the exported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RowOrder {
    /// Descending net revenue, the order the ABC pass produces.
    #[default]
    Revenue,
    /// The order rows had in the input file.
    Input,
}

/// Parameters of the presentation layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Class A items with fewer days of coverage than this are stockout risks.
    pub stockout_days: Decimal,
    pub currency_symbol: String,
    pub order: RowOrder,
}

impl ReportSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.stockout_days <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "report.stockout_days must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            stockout_days: dec!(7),
            currency_symbol: "R$".to_string(),
            order: RowOrder::Revenue,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "giro.log".to_string(),
        }
    }
}
