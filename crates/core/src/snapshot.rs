use crate::types::{Item, Phase};

/// Plain copy of a [`Round`](crate::Round)'s observable state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoundSnapshot {
    pub score: u32,
    pub high_score: u32,
    pub current: Option<Item>,
    pub next: Option<Item>,
    pub episode_id: u32,
    pub round_id: u32,
}

/// What the front end renders: round state plus the session's game-over view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub current_item: Option<Item>,
    pub next_item: Option<Item>,
    pub is_game_over: bool,
    /// Score at the moment of the wrong guess; 0 while playing.
    pub final_score: u32,
    /// Game over with a score above the best known when the game began.
    pub new_high_score: bool,
    pub episode_id: u32,
    pub round_id: u32,
}

impl SessionSnapshot {
    /// `best_before` is the high score as it stood when the current game
    /// started; a final score that only ties it is not a new record.
    pub fn from_round(
        round: RoundSnapshot,
        phase: Phase,
        final_score: u32,
        best_before: u32,
    ) -> Self {
        let is_game_over = phase == Phase::GameOver;
        Self {
            phase,
            score: round.score,
            high_score: round.high_score,
            current_item: round.current,
            next_item: round.next,
            is_game_over,
            final_score,
            new_high_score: is_game_over && final_score > best_before,
            episode_id: round.episode_id,
            round_id: round.round_id,
        }
    }

    /// Guess buttons are live.
    pub fn playable(&self) -> bool {
        self.phase == Phase::InRound && self.current_item.is_some() && self.next_item.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(score: u32, high_score: u32) -> RoundSnapshot {
        RoundSnapshot {
            score,
            high_score,
            current: Some(Item::new(1, "a", 1)),
            next: Some(Item::new(2, "b", 2)),
            episode_id: 1,
            round_id: 3,
        }
    }

    #[test]
    fn new_high_score_flag() {
        let snap = SessionSnapshot::from_round(round(0, 4), Phase::GameOver, 4, 0);
        assert!(snap.is_game_over);
        assert!(snap.new_high_score);

        let snap = SessionSnapshot::from_round(round(0, 5), Phase::GameOver, 4, 5);
        assert!(!snap.new_high_score);

        let snap = SessionSnapshot::from_round(round(0, 0), Phase::GameOver, 0, 0);
        assert!(!snap.new_high_score);

        let snap = SessionSnapshot::from_round(round(4, 4), Phase::InRound, 0, 0);
        assert!(!snap.new_high_score);
    }

    #[test]
    fn tying_previous_best_is_not_a_record() {
        let snap = SessionSnapshot::from_round(round(0, 4), Phase::GameOver, 4, 4);
        assert!(!snap.new_high_score);

        let snap = SessionSnapshot::from_round(round(0, 5), Phase::GameOver, 5, 4);
        assert!(snap.new_high_score);
    }

    #[test]
    fn playable_only_in_round() {
        assert!(SessionSnapshot::from_round(round(1, 1), Phase::InRound, 0, 0).playable());
        assert!(!SessionSnapshot::from_round(round(0, 1), Phase::GameOver, 1, 0).playable());
        assert!(!SessionSnapshot::default().playable());
    }
}
