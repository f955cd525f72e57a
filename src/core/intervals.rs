use std::collections::HashMap;
use crate::models::TimeSlot;

/// Candidate id -> that candidate's slots intersecting the coarse window
pub type IntervalIndex = HashMap<String, Vec<TimeSlot>>;

/// Calculate the window covering every required interval
///
/// This is much cheaper than exact overlap testing and is what the store
/// pre-filters candidate slots against. `required` does not need to be
/// sorted; returns `None` when it is empty.
pub fn covering_window(required: &[TimeSlot]) -> Option<TimeSlot> {
    let start = required.iter().map(|slot| slot.start).min()?;
    let end = required.iter().map(|slot| slot.end).max()?;
    Some(TimeSlot { start, end })
}

/// Check whether a slot intersects the coarse window
#[inline]
pub fn intersects_window(slot: &TimeSlot, window: &TimeSlot) -> bool {
    slot.overlaps(window)
}

/// Count required intervals that have an overlapping candidate slot
///
/// Both slices must be sorted by start. For each required interval the
/// cursor skips candidate slots ending at or before the interval's start,
/// then the slot under the cursor is tested once. A required interval is
/// credited at most once, however many slots overlap it, and the cursor never
/// rewinds, so the whole pass is O(required + slots).
pub fn count_overlaps(required: &[TimeSlot], slots: &[TimeSlot]) -> usize {
    let mut cursor = 0;
    let mut overlaps = 0;

    for wanted in required {
        while cursor < slots.len() && slots[cursor].end <= wanted.start {
            cursor += 1;
        }
        if cursor == slots.len() {
            break;
        }
        if slots[cursor].start < wanted.end {
            overlaps += 1;
        }
    }

    overlaps
}
