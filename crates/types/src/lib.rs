//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! Everything here is plain data: the only dependency is `serde`, so the types
//! can be used by the game core, the presentation adapter and the terminal view
//! alike.
//!
//! # Items
//!
//! An [`Item`] is one keyword/search-volume record. The bundled catalogue is a
//! JSON array of items using camelCase field names:
//!
//! ```json
//! { "id": 1, "keyword": "weather", "searchVolume": 24900000,
//!   "author": "...", "link": "...", "image": "..." }
//! ```
//!
//! # Storage
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `HIGH_SCORE_KEY` | `@higher-lower:highScore` | Key of the persisted high score |
//! | `MIN_CATALOGUE_LEN` | 2 | Smallest catalogue that can form a pair |
//!
//! # Examples
//!
//! ```
//! use higher_lower_types::{format_volume, Guess};
//!
//! let guess = Guess::from_str("HIGHER").unwrap();
//! assert_eq!(guess, Guess::Higher);
//! assert_eq!(guess.opposite(), Guess::Lower);
//!
//! assert_eq!(format_volume(1234567), "1,234,567");
//! ```

use serde::{Deserialize, Serialize};

/// Storage key holding the decimal high score.
pub const HIGH_SCORE_KEY: &str = "@higher-lower:highScore";

/// A pair needs two distinct items.
pub const MIN_CATALOGUE_LEN: usize = 2;

/// Stable identifier of a catalogue item.
pub type ItemId = u32;

/// One keyword shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub keyword: String,
    /// Monthly search count.
    pub search_volume: u64,
    /// Credit for the image.
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub image: String,
}

impl Item {
    /// Build an item with only the fields the game logic looks at.
    pub fn new(id: ItemId, keyword: impl Into<String>, search_volume: u64) -> Self {
        Self {
            id,
            keyword: keyword.into(),
            search_volume,
            author: String::new(),
            link: String::new(),
            image: String::new(),
        }
    }
}

/// Player's guess about the next item's volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Guess {
    Higher,
    Lower,
}

impl Guess {
    /// Parse a guess (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use higher_lower_types::Guess;
    ///
    /// assert_eq!(Guess::from_str("higher"), Some(Guess::Higher));
    /// assert_eq!(Guess::from_str("Lower"), Some(Guess::Lower));
    /// assert_eq!(Guess::from_str("same"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "higher" => Some(Guess::Higher),
            "lower" => Some(Guess::Lower),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Guess::Higher => "higher",
            Guess::Lower => "lower",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Guess::Higher => Guess::Lower,
            Guess::Lower => Guess::Higher,
        }
    }
}

/// Feedback sound played after a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    Correct,
    Wrong,
}

impl Clip {
    /// File stem looked up in the sounds directory.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Clip::Correct => "correct",
            Clip::Wrong => "false",
        }
    }

    pub fn for_result(correct: bool) -> Self {
        if correct {
            Clip::Correct
        } else {
            Clip::Wrong
        }
    }
}

/// Session phase as seen by the front end.
///
/// `NotStarted -> InRound -> (InRound | GameOver)`, and `GameOver -> InRound`
/// on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    NotStarted,
    InRound,
    GameOver,
}

/// Front-end actions produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Guess(Guess),
    /// Play from the menu, or play again after a game over.
    Confirm,
    HowToPlay,
    Back,
}

impl Action {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "higher" => Some(Action::Guess(Guess::Higher)),
            "lower" => Some(Action::Guess(Guess::Lower)),
            "confirm" | "play" | "playagain" => Some(Action::Confirm),
            "howtoplay" => Some(Action::HowToPlay),
            "back" => Some(Action::Back),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Guess(g) => g.as_str(),
            Action::Confirm => "confirm",
            Action::HowToPlay => "howToPlay",
            Action::Back => "back",
        }
    }
}

/// Format a volume with thousands separators (`1234567` -> `"1,234,567"`).
pub fn format_volume(volume: u64) -> String {
    let digits = volume.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_uses_camel_case_json() {
        let json = r#"{"id":7,"keyword":"coffee","searchVolume":450000,
            "author":"A. Person","link":"https://example.com","image":"coffee.jpg"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.search_volume, 450_000);
        assert_eq!(item.author, "A. Person");
    }

    #[test]
    fn item_attribution_fields_are_optional() {
        let item: Item = serde_json::from_str(r#"{"id":1,"keyword":"tea","searchVolume":3}"#).unwrap();
        assert_eq!(item, Item::new(1, "tea", 3));
    }

    #[test]
    fn negative_volume_is_rejected() {
        let res = serde_json::from_str::<Item>(r#"{"id":1,"keyword":"tea","searchVolume":-3}"#);
        assert!(res.is_err());
    }

    #[test]
    fn format_volume_groups_thousands() {
        assert_eq!(format_volume(0), "0");
        assert_eq!(format_volume(999), "999");
        assert_eq!(format_volume(1000), "1,000");
        assert_eq!(format_volume(24_900_000), "24,900,000");
        assert_eq!(format_volume(100_000), "100,000");
    }

    #[test]
    fn clip_for_result() {
        assert_eq!(Clip::for_result(true), Clip::Correct);
        assert_eq!(Clip::for_result(false), Clip::Wrong);
        assert_eq!(Clip::Wrong.file_stem(), "false");
    }

    #[test]
    fn action_parsing() {
        assert_eq!(Action::from_str("Higher"), Some(Action::Guess(Guess::Higher)));
        assert_eq!(Action::from_str("playAgain"), Some(Action::Confirm));
        assert_eq!(Action::from_str("nope"), None);
    }
}
