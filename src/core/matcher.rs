use futures_util::TryStreamExt;
use thiserror::Error;
use crate::core::{
    attributes::AttributeIndex,
    hydrate::hydrate_matches,
    intervals::{covering_window, IntervalIndex},
    normalize::{clean_slots, normalize_requirement},
    scoring::calculate_candidate_score,
    selector::{ScoredCandidate, TopKSelector},
};
use crate::models::{
    CandidateIdentity, NormalizedRequirement, RankedMatch, Requirement, ScoringWeights,
};
use crate::services::store::{CandidateStore, StoreError};

/// Errors returned by a ranking request
#[derive(Debug, Error)]
pub enum RankError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] StoreError),
}

/// Result of a ranking pass
#[derive(Debug, Clone, Default)]
pub struct RankOutcome {
    pub matches: Vec<RankedMatch>,
    /// Identities streamed from the store
    pub total_scanned: usize,
    /// Identities scoring above the threshold
    pub total_admitted: usize,
}

/// Ranked ids left after the score-and-select pass, before hydration
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub ranked: Vec<ScoredCandidate>,
    pub total_scanned: usize,
    pub total_admitted: usize,
}

/// Main ranking orchestrator
///
/// # Pipeline Stages
/// 1. Normalize the requirement
/// 2. Fetch the skill and window indexes (concurrently)
/// 3. Stream identities, score each from the indexes, keep the best K
/// 4. Hydrate exactly those K with one bulk fetch
///
/// Holds no per-request state, so a single matcher can serve concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct Matcher {
    threshold: i64,
    top_k: usize,
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(threshold: i64, top_k: usize, weights: ScoringWeights) -> Self {
        Self {
            threshold,
            top_k,
            weights,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(15, 20, ScoringWeights::default())
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Rank the store's candidates against a requirement
    ///
    /// # Returns
    /// At most `top_k` matches in descending score order
    pub async fn rank<S>(
        &self,
        store: &S,
        requirement: Option<&Requirement>,
    ) -> Result<Vec<RankedMatch>, RankError>
    where
        S: CandidateStore + ?Sized,
    {
        Ok(self.rank_with_stats(store, requirement).await?.matches)
    }

    /// Same as [`Matcher::rank`], also reporting how many candidates were seen
    pub async fn rank_with_stats<S>(
        &self,
        store: &S,
        requirement: Option<&Requirement>,
    ) -> Result<RankOutcome, RankError>
    where
        S: CandidateStore + ?Sized,
    {
        let requirement = requirement
            .ok_or_else(|| RankError::InvalidArgument("requirement is required".to_string()))?;

        let normalized = normalize_requirement(requirement);
        if normalized.is_empty() {
            tracing::debug!("Empty requirement, skipping all lookups");
            return Ok(RankOutcome::default());
        }

        let (attributes, intervals) = tokio::try_join!(
            fetch_attribute_index(store, &normalized),
            fetch_interval_index(store, &normalized),
        )?;

        tracing::debug!(
            "Indexes ready: {} skill matches, {} window matches",
            attributes.len(),
            intervals.len()
        );

        let mut pass = RankingPass::new(self, &normalized, &attributes, &intervals);
        let mut identities = store.list_identities();
        while let Some(identity) = identities.try_next().await? {
            pass.consider(identity);
        }
        drop(identities);
        let selection = pass.finish();

        if selection.ranked.is_empty() {
            return Ok(RankOutcome {
                matches: Vec::new(),
                total_scanned: selection.total_scanned,
                total_admitted: selection.total_admitted,
            });
        }

        let ids: Vec<String> = selection.ranked.iter().map(|c| c.id.clone()).collect();
        let details = store.candidate_details(&ids).await?;
        let matches = hydrate_matches(selection.ranked, details);

        tracing::info!(
            "Ranked {} matches from {} candidates ({} above threshold)",
            matches.len(),
            selection.total_scanned,
            selection.total_admitted
        );

        Ok(RankOutcome {
            matches,
            total_scanned: selection.total_scanned,
            total_admitted: selection.total_admitted,
        })
    }

    /// Score and select over already-fetched indexes
    ///
    /// Candidate slots in `intervals` must already be valid and sorted by
    /// start (see [`prepare_interval_index`]).
    pub fn score_and_select<I>(
        &self,
        identities: I,
        requirement: &NormalizedRequirement,
        attributes: &AttributeIndex,
        intervals: &IntervalIndex,
    ) -> Selection
    where
        I: IntoIterator<Item = CandidateIdentity>,
    {
        let mut pass = RankingPass::new(self, requirement, attributes, intervals);
        for identity in identities {
            pass.consider(identity);
        }
        pass.finish()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Drop invalid candidate slots and sort the rest by start
pub fn prepare_interval_index(mut index: IntervalIndex) -> IntervalIndex {
    index.retain(|_, slots| {
        *slots = clean_slots(slots);
        !slots.is_empty()
    });
    index
}

async fn fetch_attribute_index<S>(
    store: &S,
    requirement: &NormalizedRequirement,
) -> Result<AttributeIndex, StoreError>
where
    S: CandidateStore + ?Sized,
{
    if requirement.skill_weights.is_empty() {
        return Ok(AttributeIndex::new());
    }
    store.candidates_by_skills(&requirement.distinct_skills()).await
}

async fn fetch_interval_index<S>(
    store: &S,
    requirement: &NormalizedRequirement,
) -> Result<IntervalIndex, StoreError>
where
    S: CandidateStore + ?Sized,
{
    let Some(window) = covering_window(&requirement.intervals) else {
        return Ok(IntervalIndex::new());
    };
    let index = store.candidates_by_window(window).await?;
    Ok(prepare_interval_index(index))
}

/// Single streaming pass: score, apply the threshold, feed the selector
struct RankingPass<'a> {
    threshold: i64,
    weights: ScoringWeights,
    requirement: &'a NormalizedRequirement,
    attributes: &'a AttributeIndex,
    intervals: &'a IntervalIndex,
    selector: TopKSelector,
    scanned: usize,
    admitted: usize,
}

impl<'a> RankingPass<'a> {
    fn new(
        matcher: &Matcher,
        requirement: &'a NormalizedRequirement,
        attributes: &'a AttributeIndex,
        intervals: &'a IntervalIndex,
    ) -> Self {
        Self {
            threshold: matcher.threshold,
            weights: matcher.weights,
            requirement,
            attributes,
            intervals,
            selector: TopKSelector::new(matcher.top_k),
            scanned: 0,
            admitted: 0,
        }
    }

    fn consider(&mut self, identity: CandidateIdentity) {
        self.scanned += 1;

        let score = calculate_candidate_score(
            &identity.id,
            self.attributes,
            self.intervals,
            self.requirement,
            &self.weights,
        )
        .total();

        if score <= self.threshold {
            return;
        }

        self.admitted += 1;
        tracing::trace!("Candidate {} admitted with score {}", identity.id, score);
        self.selector.offer(ScoredCandidate {
            id: identity.id,
            name: identity.name,
            score,
        });
    }

    fn finish(self) -> Selection {
        Selection {
            ranked: self.selector.into_sorted_vec(),
            total_scanned: self.scanned,
            total_admitted: self.admitted,
        }
    }
}
