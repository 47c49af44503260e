//! Load tracking and candidate ranking.
//!
//! A lecturer's load is the number of assignments they already carry:
//! externally reported history plus teaching assignments made earlier in
//! this run. Lighter-loaded lecturers go first, so work spreads out.
//!
//! # Ranking
//!
//! 1. `assignment_count` ascending
//! 2. expertise match score descending
//! 3. configured tie-break ([`TieBreak`])

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TieBreak;
use crate::matching::Candidate;
use crate::models::LecturerId;

/// Running assignment counts of the general-teaching pool.
#[derive(Debug, Clone)]
pub struct LoadTracker {
    counts: BTreeMap<LecturerId, u64>,
    tie_keys: BTreeMap<LecturerId, u64>,
}

impl LoadTracker {
    /// Starts tracking `pool`, seeded with `history`.
    ///
    /// Tie keys are fixed up front so the order among tied lecturers does
    /// not drift between terms.
    pub fn new<I>(pool: I, history: &BTreeMap<LecturerId, u64>, tie_break: TieBreak) -> Self
    where
        I: IntoIterator<Item = LecturerId>,
    {
        let counts: BTreeMap<LecturerId, u64> = pool
            .into_iter()
            .map(|id| (id, history.get(&id).copied().unwrap_or(0)))
            .collect();

        let tie_keys = match tie_break {
            TieBreak::ById => counts.keys().map(|&id| (id, id)).collect(),
            TieBreak::Seeded { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                counts.keys().map(|&id| (id, rng.random::<u64>())).collect()
            }
        };

        Self { counts, tie_keys }
    }

    /// Current load of a lecturer (0 if untracked).
    pub fn count(&self, lecturer_id: LecturerId) -> u64 {
        self.counts.get(&lecturer_id).copied().unwrap_or(0)
    }

    /// Records `assignments` new assignments for a lecturer.
    pub fn record(&mut self, lecturer_id: LecturerId, assignments: u64) {
        *self.counts.entry(lecturer_id).or_insert(0) += assignments;
    }

    /// Sorts candidates best-first.
    pub fn rank(&self, candidates: &mut [Candidate]) {
        candidates.sort_by(|a, b| self.compare(a, b));
    }

    /// Consumes the tracker, returning final loads.
    pub fn into_counts(self) -> BTreeMap<LecturerId, u64> {
        self.counts
    }

    fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        self.count(a.lecturer_id)
            .cmp(&self.count(b.lecturer_id))
            .then_with(|| b.score.cmp(&a.score))
            .then_with(|| self.tie_key(a.lecturer_id).cmp(&self.tie_key(b.lecturer_id)))
            .then_with(|| a.lecturer_id.cmp(&b.lecturer_id))
    }

    fn tie_key(&self, lecturer_id: LecturerId) -> u64 {
        self.tie_keys.get(&lecturer_id).copied().unwrap_or(lecturer_id)
    }
}
