use crate::error::DatasetError;
use crate::table::Table;
use configuration::{ColumnMap, RowOrder};
use core_types::EnrichedRecord;
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;

/// Names of the columns appended by the analysis, in output order.
pub const DERIVED_COLUMNS: [&str; 5] = [
    "turnover",
    "coverage_days",
    "cumulative_revenue_share",
    "abc_class",
    "strategic_status",
];

/// Column layout of the exported sheet: the required labels as they were
/// configured, followed by the pass-through columns of the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub required: Vec<String>,
    pub extra: Vec<String>,
}

impl SheetLayout {
    pub fn new(columns: &ColumnMap, extra: Vec<String>) -> Self {
        Self {
            required: columns.required().iter().map(|s| s.to_string()).collect(),
            extra,
        }
    }

    pub fn from_table(table: &Table, columns: &ColumnMap) -> Self {
        Self::new(columns, table.extra_headers(columns))
    }

    fn header(&self) -> Vec<&str> {
        self.required
            .iter()
            .chain(self.extra.iter())
            .map(String::as_str)
            .chain(DERIVED_COLUMNS)
            .collect()
    }
}

/// Writes the enriched dataset as a single delimited sheet with no index column.
///
/// Undefined values (turnover without stock value, coverage without sales,
/// share without revenue) are written as empty cells.
pub fn write_enriched<W: Write>(
    writer: W,
    layout: &SheetLayout,
    records: &[EnrichedRecord],
    order: RowOrder,
    delimiter: u8,
) -> Result<(), DatasetError> {
    let mut wrt = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    wrt.write_record(layout.header())?;

    let mut ordered: Vec<&EnrichedRecord> = records.iter().collect();
    if order == RowOrder::Input {
        ordered.sort_by_key(|r| r.source_index);
    }

    for e in ordered {
        let r = &e.record;
        let mut row: Vec<String> = vec![
            r.reference.clone(),
            fmt_decimal(r.net_revenue),
            fmt_decimal(r.avg_net_quantity_sold),
            fmt_decimal(r.margin_percent),
            fmt_decimal(r.cogs_sold),
            fmt_decimal(r.stock_quantity),
            fmt_decimal(r.stock_cost_value),
        ];
        for i in 0..layout.extra.len() {
            row.push(r.extra.get(i).cloned().unwrap_or_default());
        }
        row.push(fmt_optional(e.turnover));
        row.push(fmt_optional(e.coverage_days));
        row.push(fmt_optional(e.cumulative_revenue_share));
        row.push(e.abc_class.to_string());
        row.push(e.strategic_status.to_string());
        wrt.write_record(&row)?;
    }

    wrt.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the sheet into it.
pub fn write_enriched_file(
    path: &Path,
    layout: &SheetLayout,
    records: &[EnrichedRecord],
    order: RowOrder,
    delimiter: u8,
) -> Result<(), DatasetError> {
    let file = std::fs::File::create(path)?;
    write_enriched(std::io::BufWriter::new(file), layout, records, order, delimiter)?;
    tracing::info!(path = %path.display(), rows = records.len(), "Analysis exported.");
    Ok(())
}

fn fmt_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

fn fmt_optional(value: Option<Decimal>) -> String {
    value.map(fmt_decimal).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{AbcClass, ProductRecord, StrategicStatus};
    use rust_decimal_macros::dec;

    fn enriched(reference: &str, source_index: usize, turnover: Option<Decimal>) -> EnrichedRecord {
        EnrichedRecord {
            record: ProductRecord {
                reference: reference.to_string(),
                net_revenue: dec!(100.50),
                avg_net_quantity_sold: dec!(0),
                margin_percent: dec!(30),
                cogs_sold: dec!(50),
                stock_quantity: dec!(10),
                stock_cost_value: dec!(25),
                extra: vec!["Shoes".to_string()],
            },
            source_index,
            turnover,
            coverage_days: None,
            cumulative_revenue_share: Some(dec!(0.5)),
            abc_class: AbcClass::A,
            strategic_status: StrategicStatus::BoiLeiteiro,
        }
    }

    #[test]
    fn header_has_input_columns_then_derived_and_no_index() {
        let layout = SheetLayout::new(&ColumnMap::default(), vec!["category".to_string()]);
        let mut out = Vec::new();
        write_enriched(&mut out, &layout, &[], RowOrder::Revenue, b',').unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.trim_end(),
            "reference,net_revenue,avg_net_quantity_sold,margin_percent,cogs_sold,\
             stock_quantity,stock_cost_value,category,turnover,coverage_days,\
             cumulative_revenue_share,abc_class,strategic_status"
        );
    }

    #[test]
    fn undefined_values_are_blank_cells() {
        let layout = SheetLayout::new(&ColumnMap::default(), vec!["category".to_string()]);
        let mut out = Vec::new();
        write_enriched(&mut out, &layout, &[enriched("SKU-1", 0, None)], RowOrder::Revenue, b',')
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let line = text.lines().nth(1).unwrap();
        assert_eq!(line, "SKU-1,100.5,0,30,50,10,25,Shoes,,,0.5,A,BoiLeiteiro");
    }

    #[test]
    fn repeated_required_label_is_exported_under_its_own_header() {
        let columns = ColumnMap::default();
        let table = Table::new(
            [
                "reference",
                "net_revenue",
                "avg_net_quantity_sold",
                "margin_percent",
                "cogs_sold",
                "stock_quantity",
                "stock_cost_value",
                "reference",
                "brand",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            vec![
                ["SKU-1", "100", "0", "30", "50", "10", "25", "DUP", "Rainha"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ],
        );
        let record = table.to_records(&columns, false).unwrap().remove(0);
        let mut row = enriched("SKU-1", 0, None);
        row.record = record;

        let layout = SheetLayout::from_table(&table, &columns);
        assert_eq!(layout.extra, vec!["reference", "brand"]);

        let mut out = Vec::new();
        write_enriched(&mut out, &layout, &[row], RowOrder::Revenue, b',').unwrap();
        let mut reader = csv::Reader::from_reader(out.as_slice());
        let header = reader.headers().unwrap().clone();
        let line = reader.records().next().unwrap().unwrap();
        assert_eq!(&header[7], "reference");
        assert_eq!(&line[7], "DUP");
        assert_eq!(&header[8], "brand");
        assert_eq!(&line[8], "Rainha");
    }

    #[test]
    fn input_order_restores_source_positions() {
        let layout = SheetLayout::new(&ColumnMap::default(), vec![]);
        let records = vec![enriched("second", 1, Some(dec!(2))), enriched("first", 0, Some(dec!(2)))];
        let mut out = Vec::new();
        write_enriched(&mut out, &layout, &records, RowOrder::Input, b';').unwrap();
        let text = String::from_utf8(out).unwrap();
        let refs: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.split(';').next().unwrap())
            .collect();
        assert_eq!(refs, vec!["first", "second"]);
    }
}
