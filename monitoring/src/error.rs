use monitor_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitoringError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

pub type Result<T> = std::result::Result<T, MonitoringError>;
