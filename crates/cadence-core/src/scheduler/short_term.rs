//! Short-term policy: (re)learning steps at minute granularity

use super::Scheduler;
use crate::card::{Rating, RecordLogItem, State};
use crate::error::Result;
use crate::fsrs::AleaSeed;

pub(super) fn review(s: &Scheduler<'_>, grade: Rating) -> Result<RecordLogItem> {
    let seed = s.seed();
    match s.current.state {
        State::New => new_card(s, grade, &seed),
        State::Learning | State::Relearning => learning_card(s, grade, &seed),
        State::Review => review_card(s, grade, &seed),
    }
}

fn new_card(s: &Scheduler<'_>, grade: Rating, seed: &AleaSeed) -> Result<RecordLogItem> {
    let memory = s.algorithm().next_state(None, 0.0, grade, None)?;

    let mut next = s.current.clone();
    next.difficulty = memory.difficulty;
    next.stability = memory.stability;
    s.apply_learning_steps(&mut next, grade, State::Learning, seed)?;

    Ok(s.record(grade, next))
}

fn learning_card(s: &Scheduler<'_>, grade: Rating, seed: &AleaSeed) -> Result<RecordLogItem> {
    let memory = s.algorithm().next_state(
        Some(s.last.memory_state()),
        s.elapsed_days as f64,
        grade,
        None,
    )?;

    let mut next = s.current.clone();
    next.difficulty = memory.difficulty;
    next.stability = memory.stability;

    let to_state = if s.current.state == State::Relearning {
        State::Relearning
    } else {
        State::Learning
    };
    s.apply_learning_steps(&mut next, grade, to_state, seed)?;

    Ok(s.record(grade, next))
}

fn review_card(s: &Scheduler<'_>, grade: Rating, seed: &AleaSeed) -> Result<RecordLogItem> {
    let algorithm = s.algorithm();
    let last = Some(s.last.memory_state());
    let t = s.elapsed_days as f64;

    let mut next = s.current.clone();

    if grade == Rating::Again {
        let memory = algorithm.next_state(last, t, Rating::Again, None)?;
        next.difficulty = memory.difficulty;
        next.stability = memory.stability;
        next.lapses += 1;
        s.apply_learning_steps(&mut next, grade, State::Relearning, seed)?;
        return Ok(s.record(grade, next));
    }

    let hard = algorithm.next_state(last, t, Rating::Hard, None)?;
    let good = algorithm.next_state(last, t, Rating::Good, None)?;
    let easy = algorithm.next_state(last, t, Rating::Easy, None)?;

    // Each better grade earns at least one more day than the one below it
    let hard_ivl = s.next_interval(hard.stability, seed);
    let good_ivl = s.next_interval(good.stability, seed);
    let hard_ivl = hard_ivl.min(good_ivl);
    let good_ivl = good_ivl.max(hard_ivl + 1);
    let easy_ivl = s.next_interval(easy.stability, seed).max(good_ivl + 1);

    let (memory, days) = match grade {
        Rating::Hard => (hard, hard_ivl),
        Rating::Good => (good, good_ivl),
        _ => (easy, easy_ivl),
    };
    next.difficulty = memory.difficulty;
    next.stability = memory.stability;
    s.schedule_review(&mut next, days)?;

    Ok(s.record(grade, next))
}
