// Unit tests for Staff Match

use staff_match::core::{
    count_overlaps, covering_window, normalize_requirement, prepare_interval_index,
    AttributeIndex, IntervalIndex, Matcher, ScoredCandidate, TopKSelector,
};
use staff_match::models::{CandidateIdentity, Requirement, ScoringWeights, TimeSlot};
use chrono::{DateTime, TimeZone, Utc};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, hour, minute, 0).unwrap()
}

fn slot(start: u32, end: u32) -> TimeSlot {
    TimeSlot::new(at(start, 0), at(end, 0))
}

fn identity(id: &str) -> CandidateIdentity {
    CandidateIdentity {
        id: id.to_string(),
        name: format!("Employee {}", id),
    }
}

#[test]
fn test_triple_label_scores_thirty() {
    let matcher = Matcher::new(0, 20, ScoringWeights::default());
    let requirement = normalize_requirement(&Requirement {
        skills: vec!["Go".into(), "Go".into(), "Go".into()],
        intervals: vec![],
    });
    let attributes: AttributeIndex = [("e1".to_string(), vec!["Go".to_string()])].into();

    let selection = matcher.score_and_select(
        vec![identity("e1")],
        &requirement,
        &attributes,
        &IntervalIndex::new(),
    );

    assert_eq!(selection.ranked[0].score, 30);
}

#[test]
fn test_overlap_counted_once_per_required_interval() {
    let matcher = Matcher::new(0, 20, ScoringWeights::default());
    let requirement = normalize_requirement(&Requirement {
        skills: vec![],
        intervals: vec![slot(9, 17)],
    });
    let intervals = prepare_interval_index(
        [("e1".to_string(), vec![slot(15, 16), slot(9, 10), slot(12, 13)])].into(),
    );

    let selection = matcher.score_and_select(
        vec![identity("e1")],
        &requirement,
        &AttributeIndex::new(),
        &intervals,
    );

    assert_eq!(selection.ranked[0].score, 5);
}

#[test]
fn test_window_spans_all_required_intervals() {
    let requirement = normalize_requirement(&Requirement {
        skills: vec![],
        intervals: vec![slot(14, 15), TimeSlot::new(at(9, 30), at(10, 0)), slot(11, 18)],
    });

    let window = covering_window(&requirement.intervals).unwrap();

    assert_eq!(window, TimeSlot::new(at(9, 30), at(18, 0)));
}

#[test]
fn test_sweep_is_linear_pass() {
    // Many required intervals against many slots, one credit each
    let required: Vec<TimeSlot> = (0..12).map(|h| slot(h, h + 1)).collect();
    let slots: Vec<TimeSlot> = (0..12).step_by(2).map(|h| slot(h, h + 1)).collect();

    assert_eq!(count_overlaps(&required, &slots), 6);
}

#[test]
fn test_selector_never_exceeds_capacity() {
    let mut selector = TopKSelector::new(20);
    for i in 0..100 {
        selector.offer(ScoredCandidate {
            id: i.to_string(),
            name: format!("Employee {}", i),
            score: 16 + (i * 7 % 50),
        });
    }

    let ranked = selector.into_sorted_vec();

    assert_eq!(ranked.len(), 20);
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}
