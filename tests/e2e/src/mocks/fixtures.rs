//! Card Fixtures
//!
//! Provides ready-made cards and parameter sets:
//! - Cards in each pipeline state with a given memory state
//! - Legacy weight vectors from earlier FSRS versions
//! - A fixed epoch so expected dates are exact

use cadence_core::{Card, State, DEFAULT_WEIGHTS};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Factory for test cards
pub struct CardFactory;

impl CardFactory {
    /// 2024-01-01T00:00:00Z
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid fixed date")
    }

    /// Empty card enrolled at the epoch
    pub fn new_card() -> Card {
        Card::new(Self::epoch())
    }

    /// Review card last seen `elapsed_days` before the epoch and due at it
    pub fn review_card(difficulty: f64, stability: f64, elapsed_days: i64) -> Card {
        let mut card = Card::new(Self::epoch());
        card.state = State::Review;
        card.difficulty = difficulty;
        card.stability = stability;
        card.reps = 3;
        card.scheduled_days = elapsed_days;
        card.elapsed_days = elapsed_days;
        card.last_review = Some(Self::epoch() - Duration::days(elapsed_days));
        card
    }

    /// Relearning card at its first step, reviewed ten minutes ago
    pub fn relearning_card(difficulty: f64, stability: f64) -> Card {
        let mut card = Self::review_card(difficulty, stability, 0);
        card.state = State::Relearning;
        card.lapses = 1;
        card.last_review = Some(Self::epoch() - Duration::minutes(10));
        card
    }

    /// Grid of review cards covering easy/hard material and short/long memories
    pub fn review_grid() -> Vec<Card> {
        let mut cards = Vec::new();
        for difficulty in [1.0, 3.0, 5.0, 7.5, 10.0] {
            for stability in [0.5, 2.0, 10.0, 60.0, 400.0] {
                for elapsed in [1, 7, 30, 180] {
                    cards.push(Self::review_card(difficulty, stability, elapsed));
                }
            }
        }
        cards
    }

    /// FSRS-4.5 weight vector (17 entries, all 1.0)
    pub fn legacy_v4_weights() -> Vec<f64> {
        vec![1.0; 17]
    }

    /// FSRS-5 weight vector (the first 19 default weights)
    pub fn legacy_v5_weights() -> Vec<f64> {
        DEFAULT_WEIGHTS[..19].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_card_is_due_at_epoch() {
        let card = CardFactory::review_card(5.0, 10.0, 10);
        assert_eq!(card.due, CardFactory::epoch());
        assert_eq!(
            card.last_review,
            Some(CardFactory::epoch() - Duration::days(10))
        );
    }

    #[test]
    fn test_review_grid_size() {
        assert_eq!(CardFactory::review_grid().len(), 100);
    }
}
