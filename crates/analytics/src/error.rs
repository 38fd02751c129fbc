use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid analysis parameters: {0}")]
    InvalidParameters(String),

    #[error(transparent)]
    Dataset(#[from] dataset::DatasetError),
}
