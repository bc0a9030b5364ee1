use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Record store driver error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("Failed to serialize record: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),

    /// A persisted record that cannot be decoded or carries an unknown schema
    /// version. Surfaced as its own kind so callers never see garbage data.
    #[error("Stored record is corrupted: {0}")]
    Corruption(String),
}
