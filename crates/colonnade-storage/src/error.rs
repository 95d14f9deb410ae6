use colonnade_core::error::CoreError;
use thiserror::Error;

/// Engine-level failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("malformed object key: {0}")]
    MalformedKey(String),

    #[error("S3 GetObject error: {0}")]
    GetObject(String),

    #[error("S3 PutObject error: {0}")]
    PutObject(String),

    #[error("S3 ListObjects error: {0}")]
    ListObjects(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage config error: {0}")]
    Config(String),
}

/// Errors surfaced by the query engine and the record stores.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] StorageError),

    #[error("corrupt row: {0}")]
    CorruptRow(String),
}

impl From<CoreError> for QueryError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidKey(msg) => QueryError::InvalidKey(msg),
            CoreError::InvalidArgument(msg) => QueryError::InvalidArgument(msg),
            CoreError::Serialization(e) => QueryError::CorruptRow(e.to_string()),
        }
    }
}

impl From<StorageError> for QueryError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::MalformedKey(key) => {
                QueryError::CorruptRow(format!("malformed key {key}"))
            }
            other => QueryError::StorageUnavailable(other),
        }
    }
}
