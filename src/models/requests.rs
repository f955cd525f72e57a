use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Requirement, TimeSlot};

/// Body of a rank request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(length(max = 256))]
    #[serde(default)]
    pub skills: Vec<String>,
    #[validate(length(max = 256))]
    #[serde(default)]
    pub intervals: Vec<TimeSlot>,
}

impl From<RankRequest> for Requirement {
    fn from(req: RankRequest) -> Self {
        Requirement {
            skills: req.skills,
            intervals: req.intervals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: RankRequest = serde_json::from_str(r#"{"skills": ["Go"]}"#).unwrap();
        assert_eq!(req.skills, vec!["Go"]);
        assert!(req.intervals.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_oversized_request_rejected() {
        let req = RankRequest {
            skills: vec!["sql".to_string(); 257],
            intervals: vec![],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_null_body_is_absent_requirement() {
        let req: Option<RankRequest> = serde_json::from_str("null").unwrap();
        assert!(req.is_none());
    }
}
