use std::path::PathBuf;

use thiserror::Error;

use crate::types::{ItemId, MIN_CATALOGUE_LEN};

/// Failure to read or parse a catalogue source.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to read catalogue [{path}]: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalogue: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Catalogue cannot drive a round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("catalogue has {len} item(s), at least {} are needed", MIN_CATALOGUE_LEN)]
    TooFewItems { len: usize },
    #[error("catalogue contains item id {0} more than once")]
    DuplicateId(ItemId),
    #[error("item id {0} is not in the catalogue")]
    UnknownItem(ItemId),
    #[error("a pair needs two different items, got id {0} twice")]
    SameItem(ItemId),
}
