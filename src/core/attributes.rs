use std::collections::{HashMap, HashSet};
use crate::core::normalize::skill_key;
use crate::models::{NormalizedRequirement, ScoringWeights};

/// Candidate id -> that candidate's skills that are in the required set
pub type AttributeIndex = HashMap<String, Vec<String>>;

/// Restrict a candidate's skills to the required label set
///
/// `required` holds folded keys (see [`skill_key`]). Used by stores that
/// cannot push the membership test down into a query.
pub fn matching_skills(skills: &[String], required: &HashSet<String>) -> Vec<String> {
    skills
        .iter()
        .filter(|skill| skill_key(skill).is_some_and(|key| required.contains(&key)))
        .cloned()
        .collect()
}

/// Drop blank labels and case-insensitive repeats, keeping the first spelling
pub fn dedup_skills(skills: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .filter_map(|skill| {
            let key = skill_key(skill)?;
            seen.insert(key).then(|| skill.trim().to_string())
        })
        .collect()
}

/// Attribute part of a candidate's score
///
/// Each matched skill earns `weights.attribute` times the number of times
/// the requirement asked for it.
#[inline]
pub fn attribute_score(
    matched: &[String],
    requirement: &NormalizedRequirement,
    weights: &ScoringWeights,
) -> i64 {
    matched
        .iter()
        .map(|skill| weights.attribute * i64::from(requirement.multiplicity(skill)))
        .sum()
}
