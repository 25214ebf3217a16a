use coin_collection_common::BackupError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoinCollectionError {
    #[error(transparent)]
    Common(#[from] coin_collection_common::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Invalid collection name: {0}")]
    InvalidName(String),

    #[error("No slot {identifier} {mint} in collection {collection}")]
    SlotNotFound {
        collection: String,
        identifier: String,
        mint: String,
    },
}

impl From<BackupError> for CoinCollectionError {
    fn from(error: BackupError) -> Self {
        CoinCollectionError::Common(error.into())
    }
}

pub type Result<T> = std::result::Result<T, CoinCollectionError>;
