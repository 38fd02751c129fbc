use crate::error::DatasetError;
use crate::table::Table;
use configuration::IngestSettings;
use std::io::Read;
use std::path::Path;

/// Reads a delimited spreadsheet export into a `Table`.
///
/// The first record is the header. Cells are trimmed and rows may have fewer
/// cells than the header. Fully blank lines are skipped by the CSV reader.
pub fn load_table<R: Read>(reader: R, settings: &IngestSettings) -> Result<Table, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(settings.delimiter_byte())
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!(columns = headers.len(), rows = rows.len(), "Spreadsheet loaded.");
    Ok(Table::new(headers, rows))
}

/// Opens `path` and reads it with `load_table`.
pub fn load_table_file(path: &Path, settings: &IngestSettings) -> Result<Table, DatasetError> {
    let file = std::fs::File::open(path)?;
    tracing::info!(path = %path.display(), "Reading spreadsheet.");
    load_table(std::io::BufReader::new(file), settings)
}
