//! Runtime configuration.
//!
//! Layers, lowest to highest precedence: built-in defaults, an optional TOML
//! file, `HIGHER_LOWER_*` environment variables, then whatever the binary's
//! command line sets on the returned [`Config`].
//!
//! ```toml
//! data_dir = "/home/me/.local/share/higher-lower"
//! catalogue = "/home/me/items.json"
//! seed = 42
//!
//! [sound]
//! enabled = true
//! volume = 0.6
//! sounds_dir = "/home/me/sounds"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::core::{clock_seed, CatalogueSource};

const APP_DIR: &str = "higher-lower";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Holds the high-score storage, the log file and the default sounds dir.
    pub data_dir: PathBuf,
    /// Replacement catalogue; the bundled one when unset.
    pub catalogue: Option<PathBuf>,
    /// Fixed RNG seed; clock-seeded when unset.
    pub seed: Option<u32>,
    pub sound: SoundConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SoundConfig {
    pub enabled: bool,
    pub volume: f32,
    /// Defaults to `<data_dir>/sounds`.
    pub sounds_dir: Option<PathBuf>,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.8,
            sounds_dir: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalogue: None,
            seed: None,
            sound: SoundConfig::default(),
        }
    }
}

impl Config {
    /// Defaults, then the file at `path` (or the default config file if it
    /// exists), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply `HIGHER_LOWER_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| {
            var(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        if let Some(dir) = non_empty("HIGHER_LOWER_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = non_empty("HIGHER_LOWER_CATALOGUE") {
            self.catalogue = Some(PathBuf::from(path));
        }
        if let Some(seed) = non_empty("HIGHER_LOWER_SEED").and_then(|s| s.parse().ok()) {
            self.seed = Some(seed);
        }
        if non_empty("HIGHER_LOWER_SOUND_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
        {
            self.sound.enabled = false;
        }
    }

    pub fn catalogue_source(&self) -> CatalogueSource {
        match &self.catalogue {
            Some(path) => CatalogueSource::File(path.clone()),
            None => CatalogueSource::Bundled,
        }
    }

    pub fn sounds_dir(&self) -> PathBuf {
        self.sound
            .sounds_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("sounds"))
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("higher-lower.log")
    }

    /// Configured seed, or one from the clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

/// `<platform data dir>/higher-lower`, or `./.higher-lower` without one.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".higher-lower"))
}

/// `<platform config dir>/higher-lower/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.sound.enabled);
        assert_eq!(config.catalogue_source(), CatalogueSource::Bundled);
        assert_eq!(config.sounds_dir(), config.data_dir.join("sounds"));
        assert!(config.log_path().ends_with("higher-lower.log"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("seed = 42\n[sound]\nvolume = 0.25\n").unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.sound.volume, 0.25);
        assert!(config.sound.enabled);
        assert_eq!(config.data_dir, default_data_dir());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::from_toml("colour = \"blue\"\n").is_err());
        assert!(Config::from_toml("[sound]\nlouder = true\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("HIGHER_LOWER_DATA_DIR", "/tmp/hl"),
            ("HIGHER_LOWER_CATALOGUE", "/tmp/items.json"),
            ("HIGHER_LOWER_SEED", "7"),
            ("HIGHER_LOWER_SOUND_DISABLED", "TRUE"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/hl"));
        assert_eq!(
            config.catalogue_source(),
            CatalogueSource::File(PathBuf::from("/tmp/items.json"))
        );
        assert_eq!(config.seed_or_clock(), 7);
        assert!(!config.sound.enabled);
        assert_eq!(config.sounds_dir(), PathBuf::from("/tmp/hl/sounds"));
    }

    #[test]
    fn test_bad_env_values_ignored() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("HIGHER_LOWER_DATA_DIR", "  "),
            ("HIGHER_LOWER_SEED", "many"),
            ("HIGHER_LOWER_SOUND_DISABLED", "0"),
        ]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("higher-lower-missing-config.toml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
