use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::core::{
    attributes::{dedup_skills, matching_skills, AttributeIndex},
    intervals::{intersects_window, IntervalIndex},
    normalize::clean_slots,
};
use crate::models::{CandidateDetail, CandidateIdentity, TimeSlot};
use crate::services::store::{CandidateStore, StoreError};

/// Number of calls made to each store operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchCounts {
    pub skill_lookups: usize,
    pub window_lookups: usize,
    pub identity_scans: usize,
    pub detail_fetches: usize,
}

#[derive(Debug, Default)]
struct Counters {
    skill_lookups: AtomicUsize,
    window_lookups: AtomicUsize,
    identity_scans: AtomicUsize,
    detail_fetches: AtomicUsize,
}

/// Candidate pool held in memory
///
/// Candidates are streamed in insertion order. Skills are deduplicated and
/// invalid slots dropped at ingestion, matching what the database schema
/// enforces.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    candidates: Vec<CandidateDetail>,
    positions: HashMap<String, usize>,
    counters: Counters,
}

impl InMemoryStore {
    pub fn new(candidates: impl IntoIterator<Item = CandidateDetail>) -> Self {
        let mut store = Self::default();
        for candidate in candidates {
            store.insert(candidate);
        }
        store
    }

    /// Add a candidate, replacing any existing record with the same id
    pub fn insert(&mut self, mut candidate: CandidateDetail) {
        candidate.skills = dedup_skills(&candidate.skills);
        candidate.availability = clean_slots(&candidate.availability);

        match self.positions.get(&candidate.id) {
            Some(&position) => self.candidates[position] = candidate,
            None => {
                self.positions.insert(candidate.id.clone(), self.candidates.len());
                self.candidates.push(candidate);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn fetch_counts(&self) -> FetchCounts {
        FetchCounts {
            skill_lookups: self.counters.skill_lookups.load(Ordering::Relaxed),
            window_lookups: self.counters.window_lookups.load(Ordering::Relaxed),
            identity_scans: self.counters.identity_scans.load(Ordering::Relaxed),
            detail_fetches: self.counters.detail_fetches.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl CandidateStore for InMemoryStore {
    async fn candidates_by_skills(&self, skills: &[String]) -> Result<AttributeIndex, StoreError> {
        self.counters.skill_lookups.fetch_add(1, Ordering::Relaxed);

        let required: HashSet<String> = skills.iter().cloned().collect();
        Ok(self
            .candidates
            .iter()
            .filter_map(|c| {
                let matched = matching_skills(&c.skills, &required);
                (!matched.is_empty()).then(|| (c.id.clone(), matched))
            })
            .collect())
    }

    async fn candidates_by_window(&self, window: TimeSlot) -> Result<IntervalIndex, StoreError> {
        self.counters.window_lookups.fetch_add(1, Ordering::Relaxed);

        Ok(self
            .candidates
            .iter()
            .filter_map(|c| {
                let slots: Vec<TimeSlot> = c
                    .availability
                    .iter()
                    .copied()
                    .filter(|slot| intersects_window(slot, &window))
                    .collect();
                (!slots.is_empty()).then(|| (c.id.clone(), slots))
            })
            .collect())
    }

    fn list_identities(&self) -> BoxStream<'_, Result<CandidateIdentity, StoreError>> {
        self.counters.identity_scans.fetch_add(1, Ordering::Relaxed);

        stream::iter(self.candidates.iter().map(|c| {
            Ok(CandidateIdentity {
                id: c.id.clone(),
                name: c.name.clone(),
            })
        }))
        .boxed()
    }

    async fn candidate_details(&self, ids: &[String]) -> Result<Vec<CandidateDetail>, StoreError> {
        self.counters.detail_fetches.fetch_add(1, Ordering::Relaxed);

        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        Ok(self
            .candidates
            .iter()
            .filter(|c| wanted.contains(c.id.as_str()))
            .cloned()
            .collect())
    }
}
