//! Learning Journey Tests
//!
//! A card's life from enrollment to long-term review:
//! 1. New card graded Good enters the learning steps
//! 2. Finishing the steps graduates it to Review
//! 3. Successful reviews grow the interval
//! 4. A lapse sends it through relearning and back

use cadence_core::{Fsrs, PartialParameters, Rating, State};
use cadence_e2e_tests::harness::ReviewSession;
use cadence_e2e_tests::mocks::CardFactory;
use chrono::Duration;

// ============================================================================
// ENROLLMENT
// ============================================================================

#[test]
fn test_first_good_enters_learning() {
    let mut session = ReviewSession::new(Fsrs::default(), CardFactory::epoch());
    let item = session.review(Rating::Good).clone();

    assert_eq!(item.card.state, State::Learning);
    assert_eq!(item.card.reps, 1);
    assert_eq!(item.card.scheduled_days, 0);
    assert!(item.card.due > CardFactory::epoch());
    assert!(item.card.due <= CardFactory::epoch() + Duration::minutes(10));
}

#[test]
fn test_first_again_waits_one_step() {
    let fsrs = Fsrs::default();
    let item = fsrs
        .next(&CardFactory::new_card(), CardFactory::epoch(), Rating::Again)
        .unwrap();
    assert_eq!(item.card.state, State::Learning);
    assert_eq!(item.card.due, CardFactory::epoch() + Duration::minutes(1));
}

#[test]
fn test_two_goods_graduate() {
    let mut session = ReviewSession::new(Fsrs::default(), CardFactory::epoch());
    session.review_sequence(&[Rating::Good, Rating::Good]);

    let card = session.card();
    assert_eq!(card.state, State::Review);
    assert_eq!(card.reps, 2);
    assert!(card.scheduled_days > 0);
    assert_eq!(card.due, session.now() + Duration::days(card.scheduled_days));
}

// ============================================================================
// LONG-TERM GROWTH
// ============================================================================

#[test]
fn test_intervals_grow_with_successful_reviews() {
    let mut session = ReviewSession::new(Fsrs::default(), CardFactory::epoch());
    session.review_sequence(&[Rating::Good, Rating::Good]);

    let mut previous = session.card().scheduled_days;
    for _ in 0..6 {
        session.advance_to_due();
        session.review(Rating::Good);
        let card = session.card();
        assert_eq!(card.state, State::Review);
        assert!(
            card.scheduled_days > previous,
            "{} should exceed {}",
            card.scheduled_days,
            previous
        );
        previous = card.scheduled_days;
    }
    assert_eq!(session.card().reps, 8);
    assert_eq!(session.card().lapses, 0);
}

#[test]
fn test_retrievability_decays_until_review() {
    let mut session = ReviewSession::new(Fsrs::default(), CardFactory::epoch());
    assert_eq!(session.retrievability(), 0.0);

    session.review_sequence(&[Rating::Good, Rating::Good]);
    let fresh = session.retrievability();
    assert_eq!(fresh, 1.0);

    session.advance_to_due();
    let at_due = session.retrievability();
    assert!(at_due < fresh);
    // Due dates target the requested 90% retention
    assert!((at_due - 0.9).abs() < 0.05, "retrievability at due was {}", at_due);
}

// ============================================================================
// LAPSE AND RELEARNING
// ============================================================================

#[test]
fn test_lapse_relearns_then_returns_to_review() {
    let fsrs = Fsrs::default();
    let card = CardFactory::review_card(5.0, 10.0, 10);
    let mut session = ReviewSession::with_card(fsrs, card, CardFactory::epoch());

    session.review(Rating::Again);
    assert_eq!(session.card().state, State::Relearning);
    assert_eq!(session.card().lapses, 1);
    assert_eq!(session.card().due, CardFactory::epoch() + Duration::minutes(10));
    let lapsed_stability = session.card().stability;
    assert!(lapsed_stability < 10.0);

    session.advance_to_due();
    session.review(Rating::Good);
    assert_eq!(session.card().state, State::Review);
    assert_eq!(session.card().lapses, 1);
    assert!(session.card().scheduled_days >= 1);
}

#[test]
fn test_lapse_without_relearning_steps_stays_in_review() {
    let fsrs = Fsrs::new(PartialParameters::new().relearning_steps(Vec::<String>::new())).unwrap();
    let item = fsrs
        .next(
            &CardFactory::review_card(5.0, 10.0, 10),
            CardFactory::epoch(),
            Rating::Again,
        )
        .unwrap();

    assert_eq!(item.card.state, State::Review);
    assert_eq!(item.card.lapses, 1);
    assert!(item.card.scheduled_days >= 1);
    assert!(item.card.scheduled_days < 10);
}

// ============================================================================
// LONG-TERM POLICY
// ============================================================================

#[test]
fn test_long_term_policy_skips_learning_steps() {
    let fsrs = Fsrs::new(PartialParameters::new().enable_short_term(false)).unwrap();
    let preview = fsrs
        .repeat(&CardFactory::new_card(), CardFactory::epoch())
        .unwrap();

    for (_, item) in preview.iter() {
        assert_eq!(item.card.state, State::Review);
        assert!(item.card.scheduled_days >= 1);
    }
    assert!(preview.good.card.scheduled_days < preview.easy.card.scheduled_days);
}

#[test]
fn test_preview_is_side_effect_free() {
    let fsrs = Fsrs::default();
    let card = CardFactory::review_card(4.0, 20.0, 20);
    let before = card.clone();

    let preview = fsrs.repeat(&card, CardFactory::epoch()).unwrap();
    assert_eq!(card, before);

    let good = fsrs
        .next(&card, CardFactory::epoch(), Rating::Good)
        .unwrap();
    assert_eq!(&good, preview.get(Rating::Good).unwrap());
}
