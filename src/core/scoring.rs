use crate::core::{
    attributes::{attribute_score, AttributeIndex},
    intervals::{count_overlaps, IntervalIndex},
};
use crate::models::{NormalizedRequirement, ScoringWeights};

/// Score breakdown for a single candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateScore {
    pub attribute: i64,
    pub interval: i64,
}

impl CandidateScore {
    #[inline]
    pub fn total(&self) -> i64 {
        self.attribute + self.interval
    }
}

/// Calculate a candidate's score from the restricted indexes only
///
/// Scoring formula:
/// score = (
///     Σ matched skills: attribute_weight × multiplicity   # repeated labels count more
///     + overlapping required intervals × overlap_weight   # one credit per interval
/// )
///
/// Candidates missing from an index contribute 0 for that part.
pub fn calculate_candidate_score(
    candidate_id: &str,
    attributes: &AttributeIndex,
    intervals: &IntervalIndex,
    requirement: &NormalizedRequirement,
    weights: &ScoringWeights,
) -> CandidateScore {
    let attribute = attributes
        .get(candidate_id)
        .map(|matched| attribute_score(matched, requirement, weights))
        .unwrap_or(0);

    let interval = intervals
        .get(candidate_id)
        .map(|slots| count_overlaps(&requirement.intervals, slots) as i64 * weights.overlap)
        .unwrap_or(0);

    CandidateScore { attribute, interval }
}
