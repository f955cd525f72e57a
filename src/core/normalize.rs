use crate::models::{NormalizedRequirement, Requirement, TimeSlot};

/// Fold a skill label into its comparison key
///
/// Returns `None` for blank or whitespace-only labels.
#[inline]
pub fn skill_key(label: &str) -> Option<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Keep only valid slots, sorted by start and deduplicated
pub fn clean_slots(slots: &[TimeSlot]) -> Vec<TimeSlot> {
    let mut cleaned: Vec<TimeSlot> = slots.iter().copied().filter(TimeSlot::is_valid).collect();
    cleaned.sort_unstable();
    cleaned.dedup();
    cleaned
}

/// Normalize a raw requirement
///
/// Skills become a case-insensitive label -> multiplicity map with blank
/// labels dropped. Intervals with `end <= start` are dropped and the rest are
/// deduplicated and sorted by start.
pub fn normalize_requirement(requirement: &Requirement) -> NormalizedRequirement {
    let mut normalized = NormalizedRequirement::default();

    for label in &requirement.skills {
        if let Some(key) = skill_key(label) {
            *normalized.skill_weights.entry(key).or_insert(0) += 1;
        }
    }

    normalized.intervals = clean_slots(&requirement.intervals);
    normalized
}
