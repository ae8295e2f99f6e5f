//! Rules module - guess correctness and streak scoring
//!
//! Equal volumes count as correct for both directions. This is the game's
//! tie rule and must stay non-strict.

use crate::types::Guess;

/// Whether `guess` is right for a pair with the given volumes.
///
/// # Examples
///
/// ```
/// use higher_lower_core::rules::is_correct;
/// use higher_lower_core::types::Guess;
///
/// assert!(is_correct(Guess::Higher, 100, 200));
/// assert!(is_correct(Guess::Lower, 100, 50));
/// assert!(is_correct(Guess::Higher, 100, 100));
/// assert!(is_correct(Guess::Lower, 100, 100));
/// assert!(!is_correct(Guess::Lower, 100, 200));
/// ```
pub fn is_correct(guess: Guess, current_volume: u64, next_volume: u64) -> bool {
    match guess {
        Guess::Higher => next_volume >= current_volume,
        Guess::Lower => next_volume <= current_volume,
    }
}

/// Streak after a guess: +1 when correct, back to 0 otherwise.
pub fn score_after(score: u32, correct: bool) -> u32 {
    if correct {
        score.saturating_add(1)
    } else {
        0
    }
}

/// High score never goes down.
pub fn high_score_after(high_score: u32, score: u32) -> u32 {
    high_score.max(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_are_correct_both_ways() {
        for v in [0u64, 1, 50, u64::MAX] {
            assert!(is_correct(Guess::Higher, v, v));
            assert!(is_correct(Guess::Lower, v, v));
        }
    }

    #[test]
    fn test_strict_differences() {
        assert!(is_correct(Guess::Higher, 50, 200));
        assert!(!is_correct(Guess::Lower, 50, 200));
        assert!(is_correct(Guess::Lower, 100, 50));
        assert!(!is_correct(Guess::Higher, 100, 50));
    }

    #[test]
    fn test_exactly_one_direction_wins_unless_tied() {
        for (a, b) in [(1u64, 2u64), (2, 1), (0, 1_000_000)] {
            let higher = is_correct(Guess::Higher, a, b);
            let lower = is_correct(Guess::Lower, a, b);
            assert!(higher ^ lower);
        }
    }

    #[test]
    fn test_score_after() {
        assert_eq!(score_after(0, true), 1);
        assert_eq!(score_after(41, true), 42);
        assert_eq!(score_after(41, false), 0);
        assert_eq!(score_after(u32::MAX, true), u32::MAX);
    }

    #[test]
    fn test_high_score_after() {
        assert_eq!(high_score_after(3, 5), 5);
        assert_eq!(high_score_after(7, 5), 7);
        assert_eq!(high_score_after(0, 0), 0);
    }
}
