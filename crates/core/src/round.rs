//! Round module - the higher/lower state machine
//!
//! A [`Round`] owns the catalogue, the item deck, the current pair and the
//! score. It always keeps a valid next pair ready: [`Round::advance_round`]
//! runs after every guess, right or wrong. Deciding that a wrong guess ends
//! the game is left to the caller (see the adapter's `GameSession`).

use std::collections::HashSet;

use tracing::debug;

use crate::deck::ItemDeck;
use crate::error::RoundError;
use crate::rules::{high_score_after, is_correct, score_after};
use crate::snapshot::RoundSnapshot;
use crate::types::{Guess, Item, ItemId, MIN_CATALOGUE_LEN};

#[derive(Debug, Clone)]
pub struct Round {
    items: Vec<Item>,
    deck: ItemDeck,
    /// Index into `items`.
    current: Option<usize>,
    /// Index into `items`.
    next: Option<usize>,
    score: u32,
    high_score: u32,
    /// Increments on every (re)initialization.
    episode_id: u32,
    /// Pairs shown in the current episode, starting at 1.
    round_id: u32,
}

impl Round {
    /// Create an empty, not yet initialized round with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            items: Vec::new(),
            deck: ItemDeck::new(seed),
            current: None,
            next: None,
            score: 0,
            high_score: 0,
            episode_id: 0,
            round_id: 0,
        }
    }

    /// Take ownership of the catalogue and deal the first pair.
    ///
    /// The high score carries over from any previous catalogue.
    pub fn initialize(&mut self, items: Vec<Item>) -> Result<(), RoundError> {
        validate(&items)?;
        self.items = items;
        self.deal();
        Ok(())
    }

    /// Like [`Round::initialize`] but with a chosen first pair.
    pub fn initialize_with_pair(
        &mut self,
        items: Vec<Item>,
        current_id: ItemId,
        next_id: ItemId,
    ) -> Result<(), RoundError> {
        validate(&items)?;
        if current_id == next_id {
            return Err(RoundError::SameItem(current_id));
        }
        let current = position(&items, current_id)?;
        let next = position(&items, next_id)?;

        self.items = items;
        self.deck.clear();
        self.deck.mark_used(current_id);
        self.deck.mark_used(next_id);
        self.current = Some(current);
        self.next = Some(next);
        self.start_episode();
        Ok(())
    }

    fn deal(&mut self) {
        self.deck.clear();
        self.current = self.deck.draw(&self.items);
        self.next = self.deck.draw(&self.items);
        self.start_episode();
    }

    fn start_episode(&mut self) {
        self.score = 0;
        self.round_id = 1;
        self.episode_id = self.episode_id.wrapping_add(1);
        debug!(
            episode = self.episode_id,
            current = ?self.current_item().map(|i| i.id),
            next = ?self.next_item().map(|i| i.id),
            "dealt first pair"
        );
    }

    /// Draw a not-yet-shown item, restarting the cycle when all were shown.
    ///
    /// Returns `None` only before initialization.
    pub fn draw_item(&mut self) -> Option<&Item> {
        let idx = self.deck.draw(&self.items)?;
        self.items.get(idx)
    }

    /// Check a guess against the current pair without changing anything.
    ///
    /// Returns `false` when there is no pair yet.
    pub fn evaluate_guess(&self, guess: Guess) -> bool {
        match (self.current_item(), self.next_item()) {
            (Some(current), Some(next)) => {
                is_correct(guess, current.search_volume, next.search_volume)
            }
            _ => false,
        }
    }

    pub fn apply_result(&mut self, correct: bool) {
        self.score = score_after(self.score, correct);
        self.high_score = high_score_after(self.high_score, self.score);
    }

    /// Shift the pair: next becomes current and a fresh item is drawn.
    pub fn advance_round(&mut self) {
        if self.next.is_none() {
            return;
        }
        self.current = self.next;
        self.next = self.deck.draw(&self.items);
        self.round_id = self.round_id.wrapping_add(1);
    }

    /// Evaluate, score and advance in one step. Returns whether the guess was
    /// right.
    pub fn handle_guess(&mut self, guess: Guess) -> bool {
        if !self.is_initialized() {
            return false;
        }
        let correct = self.evaluate_guess(guess);
        self.apply_result(correct);
        self.advance_round();
        correct
    }

    /// Start over with the same catalogue, keeping the high score.
    pub fn reset_game(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.deal();
    }

    /// Fold in a high score from elsewhere (e.g. persisted storage).
    pub fn merge_high_score(&mut self, high_score: u32) {
        self.high_score = high_score_after(self.high_score, high_score);
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some() && self.next.is_some()
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.current.and_then(|i| self.items.get(i))
    }

    pub fn next_item(&self) -> Option<&Item> {
        self.next.and_then(|i| self.items.get(i))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn is_used(&self, id: ItemId) -> bool {
        self.deck.is_used(id)
    }

    pub fn used_len(&self) -> usize {
        self.deck.used_len()
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            score: self.score,
            high_score: self.high_score,
            current: self.current_item().cloned(),
            next: self.next_item().cloned(),
            episode_id: self.episode_id,
            round_id: self.round_id,
        }
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new(1)
    }
}

fn validate(items: &[Item]) -> Result<(), RoundError> {
    if items.len() < MIN_CATALOGUE_LEN {
        return Err(RoundError::TooFewItems { len: items.len() });
    }
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(RoundError::DuplicateId(item.id));
        }
    }
    Ok(())
}

fn position(items: &[Item], id: ItemId) -> Result<usize, RoundError> {
    items
        .iter()
        .position(|item| item.id == id)
        .ok_or(RoundError::UnknownItem(id))
}
