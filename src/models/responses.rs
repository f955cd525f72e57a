use serde::{Deserialize, Serialize};
use crate::models::domain::RankedMatch;

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub matches: Vec<RankedMatch>,
    #[serde(rename = "totalScanned")]
    pub total_scanned: usize,
    #[serde(rename = "totalAdmitted")]
    pub total_admitted: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
