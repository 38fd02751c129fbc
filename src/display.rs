//! Terminal rendering of the analysis report.

use analytics::{InventorySummary, micos, stockout_risks};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use configuration::{ColumnMap, ReportSettings};
use core_types::EnrichedRecord;
use rust_decimal::{Decimal, RoundingStrategy};

pub fn print_report(
    summary: &InventorySummary,
    records: &[EnrichedRecord],
    selected: &[&EnrichedRecord],
    settings: &ReportSettings,
) {
    let currency = settings.currency_symbol.as_str();

    println!("Performance Indicators");
    let mut kpis = new_table();
    kpis.set_header(vec![
        "Total Revenue",
        "Stock Value (Cost)",
        "Stock Units",
        "Mean Turnover",
        "Mean Margin",
    ]);
    kpis.add_row(vec![
        right(money(summary.total_revenue, currency)),
        right(money(summary.total_stock_value, currency)),
        right(grouped(summary.total_stock_units, 0)),
        right(optional(summary.mean_turnover, 2)),
        right(percent(summary.mean_margin)),
    ]);
    println!("{kpis}");

    let mut status = new_table();
    status.set_header(vec!["Class A Items", "Stockout Risk (A)", "Idle Items (Mico)"]);
    status.add_row(vec![
        right(summary.class_a_count.to_string()),
        right(summary.stockout_risk_count.to_string()),
        right(summary.mico_count.to_string()),
    ]);
    println!("{status}");

    println!("\nAnalysed Data ({} of {} rows)", selected.len(), records.len());
    let mut data = new_table();
    data.set_header(vec![
        "Reference",
        "ABC",
        "Turnover",
        "Coverage (days)",
        "Strategic Status",
        "Net Revenue",
        "Margin",
        "Stock Units",
        "Stock Value (Cost)",
    ]);
    for e in selected {
        data.add_row(vec![
            Cell::new(&e.record.reference),
            Cell::new(e.abc_class),
            right(optional(e.turnover, 2)),
            right(optional(e.coverage_days, 1)),
            Cell::new(e.strategic_status.description()),
            right(money(e.record.net_revenue, currency)),
            right(percent(Some(e.record.margin_percent))),
            right(grouped(e.record.stock_quantity, 0)),
            right(money(e.record.stock_cost_value, currency)),
        ]);
    }
    println!("{data}");

    println!("\nAlerts");
    let risks = stockout_risks(records, settings.stockout_days);
    if risks.is_empty() {
        println!("No class A item is at critical stockout risk.");
    } else {
        println!(
            "{} class A item(s) have less than {} days of coverage:",
            risks.len(),
            settings.stockout_days.normalize()
        );
        let mut table = new_table();
        table.set_header(vec!["Reference", "Units in Stock", "Coverage (days)", "Avg Qty Sold"]);
        for e in risks {
            table.add_row(vec![
                Cell::new(&e.record.reference),
                right(grouped(e.record.stock_quantity, 0)),
                right(optional(e.coverage_days, 1)),
                right(grouped(e.record.avg_net_quantity_sold, 1)),
            ]);
        }
        println!("{table}");
    }

    let idle = micos(records);
    if idle.is_empty() {
        println!("No idle stock ('Mico') was detected.");
    } else {
        println!("{} item(s) classified as 'Mico' (low turnover, low margin):", idle.len());
        let mut table = new_table();
        table.set_header(vec!["Reference", "Turnover", "Margin", "Stock Value (Cost)", "Idle Units"]);
        for e in idle {
            table.add_row(vec![
                Cell::new(&e.record.reference),
                right(optional(e.turnover, 2)),
                right(percent(Some(e.record.margin_percent))),
                right(money(e.record.stock_cost_value, currency)),
                right(grouped(e.record.stock_quantity, 0)),
            ]);
        }
        println!("{table}");
    }
}

pub fn print_columns(columns: &ColumnMap) {
    let fields = [
        "reference",
        "net_revenue",
        "avg_net_quantity_sold",
        "margin_percent",
        "cogs_sold",
        "stock_quantity",
        "stock_cost_value",
    ];
    let mut table = new_table();
    table.set_header(vec!["Field", "Expected Column Label"]);
    for (field, label) in fields.iter().zip(columns.required()) {
        table.add_row(vec![*field, label]);
    }
    println!("{table}");
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn money(value: Decimal, symbol: &str) -> String {
    format!("{symbol} {}", grouped(value, 2))
}

fn percent(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{}%", grouped(v, 1)))
}

fn optional(value: Option<Decimal>, dp: u32) -> String {
    value.map_or_else(|| "-".to_string(), |v| grouped(v, dp))
}

/// Rounds to `dp` places and separates thousands with commas: `1234567.891` -> `1,234,567.89`.
fn grouped(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", dp as usize, rounded);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    match frac_part {
        Some(f) => format!("{sign}{out}.{f}"),
        None => format!("{sign}{out}"),
    }
}
