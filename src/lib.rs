//! Staff Match - bounded-cost skill and availability ranking
//!
//! This library ranks a pool of employees against a requirement made of
//! skills and time intervals. Only restricted relations (skill matches, slots
//! inside the requirement's window) are loaded for scoring, a bounded heap
//! keeps the best K, and full records are fetched for those K alone.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, RankError, RankOutcome};
pub use crate::models::{CandidateDetail, CandidateIdentity, RankedMatch, Requirement, ScoringWeights, TimeSlot};
pub use crate::services::{CandidateStore, InMemoryStore, PostgresStore, StoreError};
