use std::collections::HashMap;
use crate::core::{attributes::dedup_skills, normalize::clean_slots, selector::ScoredCandidate};
use crate::models::{CandidateDetail, RankedMatch};

/// Map bulk-fetched details back onto the ranked ids
///
/// Output follows `ranked` order. Ids with no detail row (deleted after
/// scoring) are skipped.
pub fn hydrate_matches(
    ranked: Vec<ScoredCandidate>,
    details: Vec<CandidateDetail>,
) -> Vec<RankedMatch> {
    let mut by_id: HashMap<String, CandidateDetail> = details
        .into_iter()
        .map(|detail| (detail.id.clone(), detail))
        .collect();

    ranked
        .into_iter()
        .filter_map(|candidate| {
            let Some(detail) = by_id.remove(&candidate.id) else {
                tracing::debug!("Candidate {} vanished before hydration, skipping", candidate.id);
                return None;
            };

            Some(RankedMatch {
                candidate_id: candidate.id,
                name: detail.name,
                skills: dedup_skills(&detail.skills),
                availability: clean_slots(&detail.availability),
                score: candidate.score,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;
    use chrono::{TimeZone, Utc};

    fn scored(id: &str, score: i64) -> ScoredCandidate {
        ScoredCandidate {
            id: id.to_string(),
            name: format!("Employee {}", id),
            score,
        }
    }

    fn detail(id: &str) -> CandidateDetail {
        CandidateDetail {
            id: id.to_string(),
            name: format!("Employee {}", id),
            skills: vec!["Rust".to_string(), "rust".to_string(), "SQL".to_string()],
            availability: vec![],
        }
    }

    #[test]
    fn test_preserves_ranked_order() {
        let ranked = vec![scored("b", 40), scored("a", 30), scored("c", 20)];
        let details = vec![detail("a"), detail("c"), detail("b")];

        let matches = hydrate_matches(ranked, details);

        let ids: Vec<&str> = matches.iter().map(|m| m.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(matches[0].score, 40);
        assert_eq!(matches[0].skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_missing_detail_skipped() {
        let ranked = vec![scored("a", 30), scored("gone", 25), scored("c", 20)];
        let details = vec![detail("a"), detail("c")];

        let matches = hydrate_matches(ranked, details);

        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.candidate_id != "gone"));
    }

    #[test]
    fn test_invalid_slots_dropped() {
        let nine = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        let ten = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
        let mut row = detail("a");
        row.availability = vec![TimeSlot::new(ten, nine), TimeSlot::new(nine, ten)];

        let matches = hydrate_matches(vec![scored("a", 20)], vec![row]);

        assert_eq!(matches[0].availability, vec![TimeSlot::new(nine, ten)]);
    }
}
