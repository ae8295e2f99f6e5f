//! High-score persistence.
//!
//! The game persists exactly one value: the high score, as a decimal string
//! under [`HIGH_SCORE_KEY`]. Storage is a [`KeyValueStore`] so tests can use
//! [`MemoryStore`] and the binary a [`JsonFileStore`] in the data directory.
//!
//! Storage problems never stop a game. Failed or garbled reads count as 0 and
//! failed writes are logged and dropped.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::types::HIGH_SCORE_KEY;

/// String key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-process store. Nothing outlives the value itself.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// All keys in one JSON object on disk.
///
/// The file is read on every `get`, so values written by another process
/// are seen. Writes go through a temp file and a rename; a file that does not
/// parse is replaced by the next write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/storage.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).with_context(|| format!("parsing {}", self.path.display()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all().unwrap_or_else(|e| {
            warn!("Replacing unreadable {}: {:#}", self.path.display(), e);
            BTreeMap::new()
        });
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&values)?)
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

/// High-score view over a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct HighScores<S> {
    store: S,
    /// Last value read from or written to the store.
    known: Option<u32>,
}

impl<S: KeyValueStore> HighScores<S> {
    pub fn new(store: S) -> Self {
        Self { store, known: None }
    }

    /// Stored high score; 0 when absent, unparsable or unreadable.
    pub fn load(&mut self) -> u32 {
        let value = match self.store.get(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => parse_score(&raw),
            Ok(None) => 0,
            Err(e) => {
                warn!("Error getting high score: {:#}", e);
                0
            }
        };
        self.known = Some(value);
        value
    }

    /// Last known stored value, loading it on first use.
    pub fn known(&mut self) -> u32 {
        match self.known {
            Some(v) => v,
            None => self.load(),
        }
    }

    /// Persist `score` if it beats the stored value.
    ///
    /// The stored value is re-read first so a higher score written by someone
    /// else is never overwritten. Returns whether a write happened.
    pub fn save_if_higher(&mut self, score: u32) -> bool {
        let current = self.load();
        if score <= current {
            debug!(score, current, "score does not beat stored high score");
            return false;
        }
        match self.store.set(HIGH_SCORE_KEY, &score.to_string()) {
            Ok(()) => {
                self.known = Some(score);
                info!("New high score saved: {}", score);
                true
            }
            Err(e) => {
                warn!("Error saving high score: {:#}", e);
                false
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

/// Decimal non-negative integer, anything else is 0.
fn parse_score(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("disk on fire"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("disk on fire"))
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("higher-lower-{}-{}", name, std::process::id()))
            .join("storage.json")
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("12"), 12);
        assert_eq!(parse_score(" 7\n"), 7);
        assert_eq!(parse_score("-3"), 0);
        assert_eq!(parse_score("lots"), 0);
        assert_eq!(parse_score(""), 0);
    }

    #[test]
    fn test_absent_value_is_zero() {
        let mut scores = HighScores::new(MemoryStore::new());
        assert_eq!(scores.load(), 0);
        assert_eq!(scores.known(), 0);
    }

    #[test]
    fn test_non_numeric_value_is_zero() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "banana").unwrap();
        assert_eq!(HighScores::new(store).load(), 0);
    }

    #[test]
    fn test_save_if_higher_never_lowers() {
        let mut scores = HighScores::new(MemoryStore::new());
        assert!(scores.save_if_higher(5));
        assert!(!scores.save_if_higher(3));
        assert!(!scores.save_if_higher(5));
        assert_eq!(scores.load(), 5);
        assert_eq!(
            scores.store().get(HIGH_SCORE_KEY).unwrap().as_deref(),
            Some("5")
        );
    }

    #[test]
    fn test_save_rereads_external_value() {
        let mut scores = HighScores::new(MemoryStore::new());
        assert_eq!(scores.known(), 0);
        scores.store_mut().set(HIGH_SCORE_KEY, "10").unwrap();

        assert!(!scores.save_if_higher(8));
        assert_eq!(scores.known(), 10);
    }

    #[test]
    fn test_broken_store_degrades() {
        let mut scores = HighScores::new(BrokenStore);
        assert_eq!(scores.load(), 0);
        assert!(!scores.save_if_higher(4));
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let path = temp_path("roundtrip");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap(), None);
        store.set(HIGH_SCORE_KEY, "21").unwrap();
        store.set("other", "x").unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("21"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_json_file_store_garbage_is_an_error() {
        let path = temp_path("garbage");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.get(HIGH_SCORE_KEY).is_err());
        assert_eq!(HighScores::new(store).load(), 0);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_recovers_on_next_save() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{\"@higher-lower:highScore\": ").unwrap();

        let mut scores = HighScores::new(JsonFileStore::new(&path));
        assert_eq!(scores.load(), 0);
        assert!(scores.save_if_higher(3));

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("3"));
        assert_eq!(HighScores::new(reopened).load(), 3);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
