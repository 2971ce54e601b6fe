use std::io;

/// Failures at the key-value persistence boundary.
///
/// None of these escape the public service methods: reads fall back to
/// defaults and writes are logged.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read key {key}: {source}")]
    Read { key: String, source: io::Error },

    #[error("failed to write key {key}: {source}")]
    Write { key: String, source: io::Error },

    #[error("stored value for {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    #[error("failed to encode value for {key}: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

/// Failures of the external movie metadata collaborator.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("no {kind} with id {id}")]
    NotFound { kind: &'static str, id: u64 },

    #[error("metadata service unavailable: {0}")]
    Unavailable(String),
}
