//! Adapter module - connects the game core to a front end
//!
//! The core crate knows nothing about storage, sound or screens. This crate
//! adds them around a [`Round`](higher_lower_core::Round):
//!
//! - [`session`]: [`GameSession`], the observable game the UI talks to
//!   (start, guess, play again, subscribe)
//! - [`storage`]: the persisted high score on top of a key/value store
//! - [`audio`]: correct/wrong feedback sounds (rodio behind the `sound` feature)
//! - [`config`]: defaults, TOML file and environment overrides
//!
//! Collaborators are passed in, never global, so tests run a session against
//! a [`MemoryStore`] and [`SilentAudio`]:
//!
//! ```
//! use higher_lower_adapter::{GameSession, MemoryStore, SilentAudio};
//! use higher_lower_adapter::types::{Guess, Item};
//!
//! let mut session = GameSession::new(MemoryStore::new(), SilentAudio, 1);
//! session
//!     .start_with_pair(vec![Item::new(1, "a", 10), Item::new(2, "b", 20)], 1, 2)
//!     .unwrap();
//!
//! assert!(session.submit_guess(Guess::Higher));
//! assert_eq!(session.snapshot().score, 1);
//! ```
//!
//! # Environment Variables
//!
//! - `HIGHER_LOWER_DATA_DIR`: where high scores, logs and sounds live
//! - `HIGHER_LOWER_CATALOGUE`: JSON catalogue replacing the bundled one
//! - `HIGHER_LOWER_SEED`: fixed RNG seed
//! - `HIGHER_LOWER_SOUND_DISABLED`: set to "1" or "true" to mute

pub mod audio;
pub mod config;
pub mod session;
pub mod storage;

pub use higher_lower_core as core;
pub use higher_lower_types as types;

pub use audio::{AudioSink, SilentAudio};
#[cfg(feature = "sound")]
pub use audio::RodioAudio;
pub use config::{Config, SoundConfig};
pub use session::{GameSession, SessionError, SubscriptionId};
pub use storage::{HighScores, JsonFileStore, KeyValueStore, MemoryStore};
