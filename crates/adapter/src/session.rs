//! Game session - the round state machine as the front end sees it.
//!
//! [`GameSession`] wraps a [`Round`] with the pieces the core does not know
//! about: the game-over phase, the persisted high score and the feedback
//! sound. Every mutation is followed by a synchronous notification of all
//! subscribers with a fresh [`SessionSnapshot`], before the call returns.
//!
//! The round always advances after a guess. On a wrong guess the session
//! keeps the new pair but switches to [`Phase::GameOver`], and the front end
//! shows the game-over screen until [`GameSession::reset_session`].

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::audio::AudioSink;
use crate::core::{CatalogueSource, Round, RoundError, SessionSnapshot};
use crate::storage::{HighScores, KeyValueStore};
use crate::types::{Clip, Guess, Item, Phase};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot start a game: {0}")]
    Round(#[from] RoundError),
}

/// Handle returned by [`GameSession::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&SessionSnapshot)>;

pub struct GameSession<S, A> {
    round: Round,
    high_scores: HighScores<S>,
    audio: A,
    phase: Phase,
    final_score: u32,
    /// High score when the current game began.
    best_before: u32,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: KeyValueStore, A: AudioSink> GameSession<S, A> {
    pub fn new(store: S, audio: A, seed: u32) -> Self {
        Self {
            round: Round::new(seed),
            high_scores: HighScores::new(store),
            audio,
            phase: Phase::NotStarted,
            final_score: 0,
            best_before: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Load the catalogue and start the first round.
    pub fn start_session(&mut self, source: &CatalogueSource) -> Result<(), SessionError> {
        self.start_with_items(source.load())
    }

    /// Start with an already loaded catalogue.
    ///
    /// The persisted high score is read and merged; the stored value wins
    /// over a fresh round's 0.
    pub fn start_with_items(&mut self, items: Vec<Item>) -> Result<(), SessionError> {
        let count = items.len();
        self.round.initialize(items)?;
        self.begin(count);
        Ok(())
    }

    /// Start with a chosen first pair.
    pub fn start_with_pair(
        &mut self,
        items: Vec<Item>,
        current_id: u32,
        next_id: u32,
    ) -> Result<(), SessionError> {
        let count = items.len();
        self.round.initialize_with_pair(items, current_id, next_id)?;
        self.begin(count);
        Ok(())
    }

    fn begin(&mut self, item_count: usize) {
        let stored = self.high_scores.load();
        self.round.merge_high_score(stored);
        self.phase = Phase::InRound;
        self.final_score = 0;
        self.best_before = self.round.high_score();
        info!(
            items = item_count,
            high_score = self.round.high_score(),
            "session started"
        );
        self.notify();
    }

    /// Guess on the current pair. Returns whether the guess was right.
    ///
    /// Ignored (returns `false`) unless a round is in progress.
    pub fn submit_guess(&mut self, guess: Guess) -> bool {
        if self.phase != Phase::InRound {
            debug!(phase = ?self.phase, "guess ignored outside of a round");
            return false;
        }

        let score_before = self.round.score();
        let correct = self.round.evaluate_guess(guess);
        self.round.apply_result(correct);
        self.round.advance_round();
        debug!(guess = guess.as_str(), correct, score = self.round.score(), "guess");

        if !correct {
            self.phase = Phase::GameOver;
            self.final_score = score_before;
            if score_before > self.high_scores.known()
                && self.high_scores.save_if_higher(score_before)
            {
                self.round.merge_high_score(score_before);
            }
        }

        self.play(Clip::for_result(correct));
        self.notify();
        correct
    }

    /// Play again: new pair, score 0, high score kept.
    pub fn reset_session(&mut self) {
        if self.phase == Phase::NotStarted {
            return;
        }
        self.round.reset_game();
        self.phase = Phase::InRound;
        self.final_score = 0;
        self.best_before = self.round.high_score();
        self.notify();
    }

    fn play(&mut self, clip: Clip) {
        if let Err(e) = self.audio.play(clip) {
            warn!("Error playing {:?} sound: {:#}", clip, e);
        }
    }

    /// Call `f` with a snapshot after every change.
    pub fn subscribe(&mut self, f: impl FnMut(&SessionSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snap = self.snapshot();
        for (_, f) in self.subscribers.iter_mut() {
            f(&snap);
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from_round(
            self.round.snapshot(),
            self.phase,
            self.final_score,
            self.best_before,
        )
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn final_score(&self) -> u32 {
        self.final_score
    }

    pub fn score(&self) -> u32 {
        self.round.score()
    }

    pub fn high_score(&self) -> u32 {
        self.round.high_score()
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn store(&self) -> &S {
        self.high_scores.store()
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// End the session, handing the collaborators back.
    pub fn into_parts(self) -> (S, A) {
        (self.high_scores.into_store(), self.audio)
    }
}
