//! Long-term policy: day-granularity intervals for every grade

use super::Scheduler;
use crate::card::{MemoryState, Rating, RecordLogItem, State};
use crate::error::Result;
use crate::fsrs::AleaSeed;

pub(super) fn review(s: &Scheduler<'_>, grade: Rating) -> Result<RecordLogItem> {
    let seed = s.seed();
    match s.current.state {
        State::New => new_card(s, grade, &seed),
        State::Learning | State::Relearning | State::Review => review_card(s, grade, &seed),
    }
}

fn new_card(s: &Scheduler<'_>, grade: Rating, seed: &AleaSeed) -> Result<RecordLogItem> {
    let algorithm = s.algorithm();
    let memory = algorithm.next_state(None, 0.0, grade, None)?;

    let mut next = s.current.clone();
    next.difficulty = memory.difficulty;
    next.stability = memory.stability;
    let days = algorithm.next_interval_seeded(memory.stability, 0, Some(seed));
    s.schedule_review(&mut next, days)?;

    Ok(s.record(grade, next))
}

fn review_card(s: &Scheduler<'_>, grade: Rating, seed: &AleaSeed) -> Result<RecordLogItem> {
    let algorithm = s.algorithm();
    let last = Some(s.last.memory_state());
    let t = s.elapsed_days as f64;

    let mut states = [MemoryState::default(); 4];
    let mut intervals = [0_i64; 4];
    for (i, g) in Rating::GRADES.into_iter().enumerate() {
        states[i] = algorithm.next_state(last, t, g, None)?;
        intervals[i] = s.next_interval(states[i].stability, seed);
    }
    order_intervals(&mut intervals, algorithm.parameters().maximum_interval);

    let index = usize::from(grade.value()) - 1;
    let mut next = s.current.clone();
    next.difficulty = states[index].difficulty;
    next.stability = states[index].stability;
    if grade == Rating::Again {
        next.lapses += 1;
    }
    s.schedule_review(&mut next, intervals[index])?;

    Ok(s.record(grade, next))
}

/// again <= hard < good < easy, nudging only intervals that are out of order
/// and sit below the maximum
fn order_intervals(intervals: &mut [i64; 4], maximum_interval: i64) {
    intervals[0] = intervals[0].min(intervals[1]);
    for i in 1..intervals.len() {
        let prev = intervals[i - 1];
        if intervals[i] <= prev && prev < maximum_interval {
            intervals[i] = prev + 1;
        }
    }
}
