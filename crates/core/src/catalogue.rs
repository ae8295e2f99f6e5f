//! Catalogue module - the static list of items
//!
//! The default catalogue is compiled into the binary. A JSON file with the
//! same shape can replace it. Loading never fails to the caller: a bad source
//! is logged and yields an empty list, which the session refuses to start on.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::error::CatalogueError;
use crate::types::Item;

const BUNDLED_ITEMS: &str = include_str!("../data/items.json");

/// Where the item list comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogueSource {
    #[default]
    Bundled,
    File(PathBuf),
}

impl CatalogueSource {
    pub fn load(&self) -> Vec<Item> {
        match self {
            CatalogueSource::Bundled => load_items(),
            CatalogueSource::File(path) => load_items_from_path(path),
        }
    }
}

/// Parse a JSON array of items.
pub fn parse_items(json: &str) -> Result<Vec<Item>, CatalogueError> {
    Ok(serde_json::from_str(json)?)
}

/// Bundled catalogue.
pub fn load_items() -> Vec<Item> {
    load_items_from_str(BUNDLED_ITEMS)
}

pub fn load_items_from_str(json: &str) -> Vec<Item> {
    match parse_items(json) {
        Ok(items) => {
            debug!(count = items.len(), "loaded catalogue");
            items
        }
        Err(e) => {
            error!("Error loading game items: {}", e);
            Vec::new()
        }
    }
}

pub fn load_items_from_path(path: &Path) -> Vec<Item> {
    let read = fs::read_to_string(path).map_err(|source| CatalogueError::Io {
        path: path.to_path_buf(),
        source,
    });
    match read {
        Ok(json) => load_items_from_str(&json),
        Err(e) => {
            error!("Error loading game items: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bundled_catalogue_is_playable() {
        let items = load_items();
        assert!(items.len() >= crate::types::MIN_CATALOGUE_LEN);

        let ids: HashSet<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), items.len(), "bundled ids must be unique");
        assert!(items.iter().all(|i| !i.keyword.is_empty()));
    }

    #[test]
    fn test_bundled_source_matches_load_items() {
        assert_eq!(CatalogueSource::Bundled.load(), load_items());
    }

    #[test]
    fn test_malformed_json_yields_empty() {
        assert!(load_items_from_str("{not json").is_empty());
        assert!(load_items_from_str(r#"[{"id":1}]"#).is_empty());
        assert!(matches!(parse_items("[1,2]"), Err(CatalogueError::Parse(_))));
    }

    #[test]
    fn test_missing_file_yields_empty() {
        let path = std::env::temp_dir().join("higher-lower-no-such-catalogue.json");
        assert!(load_items_from_path(&path).is_empty());
        assert!(CatalogueSource::File(path).load().is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let items = load_items_from_str(
            r#"[{"id":3,"keyword":"c","searchVolume":1},
                {"id":1,"keyword":"a","searchVolume":2}]"#,
        );
        let ids: Vec<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
