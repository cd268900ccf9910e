//! Reproducibility Tests
//!
//! Fuzzed intervals must be reproducible from their seed, across generator
//! instances and across hosts (fixture values from the reference generator).

use cadence_core::{
    alea, fuzz_range, Alea, AleaSeed, Algorithm, CardIdSeedStrategy, Fsrs, PartialParameters,
    Rating, SeedContext,
};
use cadence_e2e_tests::mocks::CardFactory;

// ============================================================================
// PRNG
// ============================================================================

#[test]
fn test_alea_matches_reference_fixtures() {
    let mut prng = Alea::new("hello.");
    assert_eq!(prng.next_f64(), 0.478_325_490_374_118_1);
    assert_eq!(prng.next_f64(), 0.829_700_686_503_201_7);
    assert_eq!(prng.next_f64(), 0.469_243_305_269_628_76);

    assert_eq!(Alea::new(12345_i64).next_f64(), 0.271_381_911_123_171_45);
}

#[test]
fn test_same_seed_same_sequence() {
    for seed in ["", "a", "1704067200_3_52.4", "card-42/7", "ünïcödé"] {
        let a: Vec<f64> = alea(Some(AleaSeed::from(seed))).take(100).collect();
        let b: Vec<f64> = alea(Some(AleaSeed::from(seed))).take(100).collect();
        assert_eq!(a, b, "seed {:?}", seed);
    }
}

#[test]
fn test_different_seeds_diverge() {
    let first: Vec<Vec<f64>> = (0..50)
        .map(|i| Alea::new(format!("seed-{}", i)).take(3).collect())
        .collect();
    for i in 0..first.len() {
        for j in (i + 1)..first.len() {
            assert_ne!(first[i], first[j]);
        }
    }
}

#[test]
fn test_state_export_resumes_sequence() {
    let mut prng = Alea::new("resume");
    for _ in 0..17 {
        prng.next_f64();
    }
    let state = prng.state();
    let json = serde_json::to_string(&state).unwrap();

    let expected: Vec<f64> = prng.take(10).collect();
    let restored = Alea::from_state(serde_json::from_str(&json).unwrap());
    assert_eq!(restored.take(10).collect::<Vec<_>>(), expected);
}

// ============================================================================
// FUZZED SCHEDULING
// ============================================================================

#[test]
fn test_fuzzed_review_is_deterministic() {
    let fsrs = Fsrs::new(PartialParameters::new().enable_fuzz(true)).unwrap();
    for card in CardFactory::review_grid() {
        let a = fsrs.repeat(&card, CardFactory::epoch()).unwrap();
        let b = fsrs.repeat(&card, CardFactory::epoch()).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_fuzz_stays_within_range() {
    let fuzzed = Algorithm::new(PartialParameters::new().enable_fuzz(true)).unwrap();
    let plain = Algorithm::default();

    for i in 0..200 {
        let seed = AleaSeed::from(format!("fuzz-{}", i));
        for stability in [3.0, 8.0, 25.0, 90.0, 400.0] {
            let interval = plain.next_interval(stability, 0);
            let range = fuzz_range(interval as f64, 0, 36500);
            let drawn = fuzzed.next_interval_seeded(stability, 0, Some(&seed));
            assert!(
                (range.min_ivl..=range.max_ivl).contains(&drawn),
                "{} outside {:?}",
                drawn,
                range
            );
        }
    }
}

#[test]
fn test_fuzz_spreads_intervals() {
    let fuzzed = Algorithm::new(PartialParameters::new().enable_fuzz(true)).unwrap();
    let distinct: std::collections::BTreeSet<i64> = (0..200)
        .map(|i| fuzzed.next_interval_seeded(100.0, 0, Some(&AleaSeed::from(i as i64))))
        .collect();
    assert!(distinct.len() > 5);
}

#[test]
fn test_card_id_seed_ignores_review_time() {
    let mut fsrs = Fsrs::new(PartialParameters::new().enable_fuzz(true)).unwrap();
    fsrs.use_seed_strategy(CardIdSeedStrategy::new("card-42"));

    let card = CardFactory::review_card(5.0, 60.0, 60);
    let on_time = fsrs.next(&card, CardFactory::epoch(), Rating::Good).unwrap();

    let seed = fsrs.scheduler(&card, CardFactory::epoch()).seed();
    assert_eq!(seed, AleaSeed::from("card-424"));

    // Same reps, same seed: the draw repeats even at another time of day
    let later = CardFactory::epoch() + chrono::Duration::hours(3);
    let seed_later = fsrs.scheduler(&card, later).seed();
    assert_eq!(seed, seed_later);
    assert!(on_time.card.scheduled_days >= 1);
}

fn constant_seed(_: &SeedContext<'_>) -> AleaSeed {
    AleaSeed::from("hello.")
}

#[test]
fn test_custom_seed_controls_the_draw() {
    let mut fsrs = Fsrs::new(PartialParameters::new().enable_fuzz(true)).unwrap();
    fsrs.use_seed_strategy(constant_seed);

    // New card graded Easy graduates with round(8.2956) = 8 days, fuzzed over
    // [6, 10]; the first draw for "hello." is 0.4783..., landing on 8
    let item = fsrs
        .next(&CardFactory::new_card(), CardFactory::epoch(), Rating::Easy)
        .unwrap();
    assert_eq!(item.card.scheduled_days, 8);
}
