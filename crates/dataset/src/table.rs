use crate::error::DatasetError;
use crate::number::parse_decimal;
use configuration::ColumnMap;
use core_types::{CoreError, ProductRecord};
use rust_decimal::Decimal;

/// A spreadsheet sheet as read from disk: one header row and raw string cells.
///
/// Rows may be shorter than the header; absent trailing cells read as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Header positions of the seven required columns, in `ColumnMap::required` order.
#[derive(Debug, Clone, Copy)]
struct RequiredIndices([usize; 7]);

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == label)
    }

    /// Required labels that do not appear in the header, in canonical order.
    pub fn missing_columns(&self, columns: &ColumnMap) -> Vec<String> {
        columns
            .required()
            .into_iter()
            .filter(|label| self.column_index(label).is_none())
            .map(str::to_string)
            .collect()
    }

    /// Fails with every missing required column named, so the user can fix the file in one go.
    pub fn validate_columns(&self, columns: &ColumnMap) -> Result<(), DatasetError> {
        let missing = self.missing_columns(columns);
        if missing.is_empty() {
            Ok(())
        } else {
            tracing::warn!(?missing, "Input is missing required columns.");
            Err(DatasetError::MissingColumns(missing))
        }
    }

    /// Header positions of the required columns, or `None` if one is absent.
    ///
    /// A label that appears twice binds to its first occurrence.
    fn required_indices(&self, columns: &ColumnMap) -> Option<RequiredIndices> {
        let mut indices = [0usize; 7];
        for (slot, label) in indices.iter_mut().zip(columns.required()) {
            *slot = self.column_index(label)?;
        }
        Some(RequiredIndices(indices))
    }

    /// Positions of the pass-through columns: every header not bound to a
    /// required column, in input order. A repeated required label is passed
    /// through like any other column.
    pub fn extra_indices(&self, columns: &ColumnMap) -> Vec<usize> {
        let bound = self.required_indices(columns);
        (0..self.headers.len())
            .filter(|i| !bound.is_some_and(|b| b.0.contains(i)))
            .collect()
    }

    /// Headers of the pass-through columns, aligned with `ProductRecord::extra`.
    pub fn extra_headers(&self, columns: &ColumnMap) -> Vec<String> {
        self.extra_indices(columns)
            .into_iter()
            .map(|i| self.headers[i].clone())
            .collect()
    }

    /// Converts every row into a `ProductRecord`.
    ///
    /// Validates the column set first. A blank or absent required cell fails
    /// with `CoreError::MissingField`; an unparseable number with
    /// `CoreError::InvalidNumber`. Line numbers count the header as line 1.
    pub fn to_records(
        &self,
        columns: &ColumnMap,
        decimal_comma: bool,
    ) -> Result<Vec<ProductRecord>, DatasetError> {
        self.validate_columns(columns)?;
        let indices = self
            .required_indices(columns)
            .ok_or_else(|| DatasetError::MissingColumns(self.missing_columns(columns)))?;
        let extra_indices = self.extra_indices(columns);

        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let reader = RowReader {
                    row,
                    line: i + 2,
                    headers: &self.headers,
                    decimal_comma,
                };
                reader.record(&indices, &extra_indices)
            })
            .collect()
    }
}

struct RowReader<'a> {
    row: &'a [String],
    line: usize,
    headers: &'a [String],
    decimal_comma: bool,
}

impl RowReader<'_> {
    fn text(&self, index: usize) -> Result<String, CoreError> {
        match self.row.get(index).map(|c| c.trim()) {
            Some(cell) if !cell.is_empty() => Ok(cell.to_string()),
            _ => Err(CoreError::MissingField {
                line: self.line,
                column: self.headers[index].clone(),
            }),
        }
    }

    fn number(&self, index: usize) -> Result<Decimal, CoreError> {
        let cell = self.text(index)?;
        parse_decimal(&cell, self.decimal_comma).ok_or_else(|| CoreError::InvalidNumber {
            line: self.line,
            column: self.headers[index].clone(),
            value: cell,
        })
    }

    fn record(
        &self,
        indices: &RequiredIndices,
        extra_indices: &[usize],
    ) -> Result<ProductRecord, DatasetError> {
        let [reference, revenue, avg_sold, margin, cogs, stock_qty, stock_value] = indices.0;
        Ok(ProductRecord {
            reference: self.text(reference)?,
            net_revenue: self.number(revenue)?,
            avg_net_quantity_sold: self.number(avg_sold)?,
            margin_percent: self.number(margin)?,
            cogs_sold: self.number(cogs)?,
            stock_quantity: self.number(stock_qty)?,
            stock_cost_value: self.number(stock_value)?,
            extra: extra_indices
                .iter()
                .map(|&i| self.row.get(i).cloned().unwrap_or_default())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn headers() -> Vec<String> {
        [
            "reference",
            "category",
            "net_revenue",
            "avg_net_quantity_sold",
            "margin_percent",
            "cogs_sold",
            "stock_quantity",
            "stock_cost_value",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let table = Table::new(row(&["reference", "net_revenue", "extra"]), vec![]);
        let missing = table.missing_columns(&ColumnMap::default());
        assert_eq!(
            missing,
            vec![
                "avg_net_quantity_sold",
                "margin_percent",
                "cogs_sold",
                "stock_quantity",
                "stock_cost_value"
            ]
        );
        assert!(matches!(
            table.validate_columns(&ColumnMap::default()),
            Err(DatasetError::MissingColumns(m)) if m.len() == 5
        ));
    }

    #[test]
    fn rows_convert_with_extras_passed_through() {
        let table = Table::new(
            headers(),
            vec![row(&["SKU-1", "Shoes", "1000", "10", "35", "600", "40", "2400"])],
        );
        let columns = ColumnMap::default();
        let records = table.to_records(&columns, false).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.reference, "SKU-1");
        assert_eq!(r.net_revenue, dec!(1000));
        assert_eq!(r.stock_cost_value, dec!(2400));
        assert_eq!(r.extra, vec!["Shoes".to_string()]);
        assert_eq!(table.extra_headers(&columns), vec!["category".to_string()]);
    }

    #[test]
    fn repeated_required_label_stays_aligned_with_its_header() {
        let mut header = headers();
        header.push("reference".to_string());
        header.push("brand".to_string());
        let table = Table::new(
            header,
            vec![row(&["SKU-1", "Shoes", "1000", "10", "35", "600", "40", "2400", "DUP", "Rainha"])],
        );
        let columns = ColumnMap::default();
        let records = table.to_records(&columns, false).unwrap();

        assert_eq!(records[0].reference, "SKU-1");
        assert_eq!(table.extra_indices(&columns), vec![1, 8, 9]);
        assert_eq!(table.extra_headers(&columns), vec!["category", "reference", "brand"]);
        assert_eq!(records[0].extra, vec!["Shoes", "DUP", "Rainha"]);
    }

    #[test]
    fn blank_required_cell_is_a_missing_field() {
        let table = Table::new(
            headers(),
            vec![
                row(&["SKU-1", "Shoes", "1000", "10", "35", "600", "40", "2400"]),
                row(&["SKU-2", "Bags", "", "10", "35", "600", "40", "2400"]),
            ],
        );
        let err = table.to_records(&ColumnMap::default(), false).unwrap_err();
        match err {
            DatasetError::Core(CoreError::MissingField { line, column }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "net_revenue");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_row_is_a_missing_field() {
        let table = Table::new(headers(), vec![row(&["SKU-1", "Shoes", "1000"])]);
        assert!(matches!(
            table.to_records(&ColumnMap::default(), false),
            Err(DatasetError::Core(CoreError::MissingField { line: 2, .. }))
        ));
    }

    #[test]
    fn unparseable_number_is_reported() {
        let table = Table::new(
            headers(),
            vec![row(&["SKU-1", "Shoes", "abc", "10", "35", "600", "40", "2400"])],
        );
        assert!(matches!(
            table.to_records(&ColumnMap::default(), false),
            Err(DatasetError::Core(CoreError::InvalidNumber { value, .. })) if value == "abc"
        ));
    }
}
