use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read or write the spreadsheet file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed spreadsheet data: {0}")]
    Csv(#[from] csv::Error),

    #[error("The following required columns were not found: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error(transparent)]
    Core(#[from] core_types::CoreError),
}
