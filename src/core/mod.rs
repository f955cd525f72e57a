// Core algorithm exports
pub mod attributes;
pub mod hydrate;
pub mod intervals;
pub mod matcher;
pub mod normalize;
pub mod scoring;
pub mod selector;

pub use attributes::{attribute_score, dedup_skills, matching_skills, AttributeIndex};
pub use hydrate::hydrate_matches;
pub use intervals::{count_overlaps, covering_window, intersects_window, IntervalIndex};
pub use matcher::{prepare_interval_index, Matcher, RankError, RankOutcome, Selection};
pub use normalize::{clean_slots, normalize_requirement, skill_key};
pub use scoring::{calculate_candidate_score, CandidateScore};
pub use selector::{ScoredCandidate, TopKSelector};
