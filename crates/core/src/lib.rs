//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the rules of Higher or Lower and the state they act on.
//! It has no dependencies on the terminal, audio or persistent storage:
//!
//! - **Deterministic**: draws come from a seeded RNG, so tests can replay them
//! - **Testable**: the state machine is a plain struct with plain methods
//! - **Portable**: the same core drives the terminal front end and the benches
//!
//! # Module Structure
//!
//! - [`catalogue`]: loads the item list (bundled JSON or a file)
//! - [`deck`]: random draws that avoid repeats until every item was shown
//! - [`round`]: the current pair, streak score and high score
//! - [`rules`]: guess correctness (ties count for both directions) and scoring
//! - [`rng`]: small LCG used by the deck
//! - [`snapshot`]: copies of the state for observers
//!
//! # Example
//!
//! ```
//! use higher_lower_core::{Round, types::{Guess, Item}};
//!
//! let items = vec![
//!     Item::new(1, "coffee", 100),
//!     Item::new(2, "tea", 50),
//!     Item::new(3, "cocoa", 200),
//! ];
//!
//! let mut round = Round::new(12345);
//! round.initialize_with_pair(items, 1, 2).unwrap();
//!
//! // 50 <= 100
//! assert!(round.handle_guess(Guess::Lower));
//! assert_eq!(round.score(), 1);
//! assert_eq!(round.current_item().unwrap().id, 2);
//! ```

pub mod catalogue;
pub mod deck;
pub mod error;
pub mod rng;
pub mod round;
pub mod rules;
pub mod snapshot;

pub use higher_lower_types as types;

// Re-export commonly used types for convenience
pub use catalogue::{load_items, load_items_from_path, load_items_from_str, parse_items, CatalogueSource};
pub use deck::ItemDeck;
pub use error::{CatalogueError, RoundError};
pub use rng::{clock_seed, SimpleRng};
pub use round::Round;
pub use rules::is_correct;
pub use snapshot::{RoundSnapshot, SessionSnapshot};
