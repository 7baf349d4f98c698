//! Error types for the comments DAO

use thiserror::Error;

/// Everything a `CommentsDao` operation can fail with
#[derive(Debug, Error)]
pub enum DaoError {
    /// A string could not be coerced into an ObjectId
    #[error("Invalid identifier '{value}': {source}")]
    InvalidId {
        value: String,
        #[source]
        source: bson::oid::Error,
    },

    /// Connectivity or query failure reported by the driver
    #[error("Store error: {0}")]
    Store(#[from] mongodb::error::Error),

    /// An operation ran before `inject_db` succeeded
    #[error("Comments collection handle is not initialized")]
    Uninitialized,

    /// The configured database namespace cannot be used
    #[error("Invalid database namespace: {0}")]
    InvalidNamespace(String),

    /// An aggregation row did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] bson::de::Error),
}

pub type Result<T> = std::result::Result<T, DaoError>;
