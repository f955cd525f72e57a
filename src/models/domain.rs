use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Half-open availability interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// A slot is only usable when it has positive length
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    #[inline]
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Identity row streamed during scoring (no skills or slots attached)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateIdentity {
    pub id: String,
    pub name: String,
}

/// Full candidate record, only loaded for the final ranked ids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub availability: Vec<TimeSlot>,
}

/// Caller-supplied ranking requirement
///
/// `skills` is a multiset: repeating a label raises its weight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub intervals: Vec<TimeSlot>,
}

/// Requirement after label folding and interval cleanup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRequirement {
    /// Lower-cased label -> number of times it was requested
    pub skill_weights: HashMap<String, u32>,
    /// Valid, deduplicated, sorted by start
    pub intervals: Vec<TimeSlot>,
}

impl NormalizedRequirement {
    pub fn is_empty(&self) -> bool {
        self.skill_weights.is_empty() && self.intervals.is_empty()
    }

    /// Distinct required labels, sorted so store queries are deterministic
    pub fn distinct_skills(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.skill_weights.keys().cloned().collect();
        labels.sort();
        labels
    }

    #[inline]
    pub fn multiplicity(&self, label: &str) -> u32 {
        self.skill_weights
            .get(&label.trim().to_lowercase())
            .copied()
            .unwrap_or(0)
    }
}

/// Final ranked result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedMatch {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub name: String,
    pub skills: Vec<String>,
    pub availability: Vec<TimeSlot>,
    pub score: i64,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    /// Points per matching skill, multiplied by the label's multiplicity
    pub attribute: i64,
    /// Points per required interval with an overlapping slot
    pub overlap: i64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            attribute: 10,
            overlap: 5,
        }
    }
}
