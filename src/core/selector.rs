use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Candidate that passed the inclusion threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub id: String,
    pub name: String,
    pub score: i64,
}

#[derive(Debug)]
struct HeapEntry {
    seq: u64,
    candidate: ScoredCandidate,
}

// Lower score is smaller; on equal scores the later arrival is smaller, so it
// is the one sitting at the top of the min-heap when eviction happens.
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.candidate
            .score
            .cmp(&other.candidate.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

/// Bounded top-K selection over a stream of scored candidates
///
/// Keeps at most `capacity` entries in a min-heap. Once full, a newcomer only
/// gets in by scoring strictly higher than the current minimum, so equal
/// scores never displace a resident entry.
#[derive(Debug)]
pub struct TopKSelector {
    capacity: usize,
    heap: BinaryHeap<Reverse<HeapEntry>>,
    next_seq: u64,
}

impl TopKSelector {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Lowest resident score, if any
    pub fn min_score(&self) -> Option<i64> {
        self.heap.peek().map(|Reverse(entry)| entry.candidate.score)
    }

    /// Offer a candidate; returns whether it was kept
    pub fn offer(&mut self, candidate: ScoredCandidate) -> bool {
        if self.capacity == 0 {
            return false;
        }

        if self.heap.len() == self.capacity {
            match self.min_score() {
                Some(min) if candidate.score > min => {
                    self.heap.pop();
                }
                _ => return false,
            }
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(HeapEntry { seq, candidate }));
        true
    }

    /// Drain into score-descending order, earlier arrivals first on ties
    pub fn into_sorted_vec(self) -> Vec<ScoredCandidate> {
        let mut entries: Vec<HeapEntry> = self.heap.into_iter().map(|Reverse(e)| e).collect();
        entries.sort_by(|a, b| {
            b.candidate
                .score
                .cmp(&a.candidate.score)
                .then_with(|| a.seq.cmp(&b.seq))
        });
        entries.into_iter().map(|e| e.candidate).collect()
    }
}
