// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateDetail, CandidateIdentity, NormalizedRequirement, RankedMatch, Requirement,
    ScoringWeights, TimeSlot,
};
pub use requests::RankRequest;
pub use responses::{ErrorResponse, HealthResponse, RankResponse};
