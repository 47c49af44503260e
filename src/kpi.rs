//! Allocation quality metrics (KPIs).
//!
//! Computes indicators from a finished allocation and its input snapshot.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill rate (per term) | teaching placed / apportioned share |
//! | Overall fill rate | Σ teaching placed / Σ shares |
//! | Teaching load | min / max / mean modules per teaching lecturer |
//! | Expertise volume | occurrences of each required tag across active courses |
//! | Modules per blok | module count grouped by blok |

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{AllocationInput, AllocationOutcome, AssignmentRole, LecturerId, TermId};

/// Allocation performance indicators.
#[derive(Debug, Clone)]
pub struct AllocationKpi {
    /// Fraction of each term's share actually placed (1.0 when the share is 0).
    pub fill_rate_by_term: BTreeMap<TermId, f64>,
    /// Fraction of all shares placed.
    pub overall_fill_rate: f64,
    /// Fewest modules taught by one teaching lecturer.
    pub min_teaching_load: usize,
    /// Most modules taught by one teaching lecturer.
    pub max_teaching_load: usize,
    /// Mean modules per teaching lecturer.
    pub avg_teaching_load: f64,
    /// Lower-cased required tag → occurrences (duplicates counted).
    pub expertise_volume: BTreeMap<String, usize>,
    /// Blok → modules of active courses in that blok.
    pub modules_per_blok: BTreeMap<u32, usize>,
}

impl AllocationKpi {
    /// Computes KPIs from an outcome and its input.
    pub fn calculate(outcome: &AllocationOutcome, input: &AllocationInput) -> Self {
        let mut fill_rate_by_term = BTreeMap::new();
        let mut placed_total = 0usize;
        for t in &outcome.terms {
            let placed = t.teaching.len();
            placed_total += placed;
            let rate = if t.allocated == 0 {
                1.0
            } else {
                placed as f64 / t.allocated as f64
            };
            fill_rate_by_term.insert(t.term, rate);
        }
        let allocated_total = outcome.total_allocated();
        let overall_fill_rate = if allocated_total == 0 {
            1.0
        } else {
            placed_total as f64 / allocated_total as f64
        };

        let mut load: BTreeMap<LecturerId, usize> = BTreeMap::new();
        for a in outcome.assignments_with_role(AssignmentRole::Teaching) {
            *load.entry(a.lecturer_id).or_insert(0) += 1;
        }
        let min_teaching_load = load.values().copied().min().unwrap_or(0);
        let max_teaching_load = load.values().copied().max().unwrap_or(0);
        let avg_teaching_load = if load.is_empty() {
            0.0
        } else {
            load.values().sum::<usize>() as f64 / load.len() as f64
        };

        let active: BTreeSet<TermId> = outcome.terms.iter().map(|t| t.term).collect();
        let mut expertise_volume = BTreeMap::new();
        let mut modules_per_blok = BTreeMap::new();
        for course in input.courses.iter().filter(|c| active.contains(&c.term)) {
            for tag in &course.required_expertise {
                let tag = tag.trim().to_lowercase();
                if !tag.is_empty() {
                    *expertise_volume.entry(tag).or_insert(0) += 1;
                }
            }
            *modules_per_blok.entry(course.blok).or_insert(0) +=
                input.modules_of(&course.code).len();
        }

        Self {
            fill_rate_by_term,
            overall_fill_rate,
            min_teaching_load,
            max_teaching_load,
            avg_teaching_load,
            expertise_volume,
            modules_per_blok,
        }
    }

    /// Whether every term reached at least `min_fill_rate`.
    pub fn meets_thresholds(&self, min_fill_rate: f64) -> bool {
        self.fill_rate_by_term.values().all(|&r| r >= min_fill_rate)
    }
}
