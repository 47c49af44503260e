//! Apportionment of the general-teaching pool across terms.
//!
//! # Algorithm
//!
//! Largest-remainder (Hamilton) apportionment:
//!
//! 1. `alloc[t] = floor(pool_size × need[t] / total_need)`, capped at `need[t]`.
//! 2. `R = min(pool_size, total_need) − Σ alloc`.
//! 3. The `R` leftover units go one per term to the terms with the largest
//!    shortfall `need[t] − alloc[t]`; ties prefer the larger fractional
//!    remainder, then the lower term number.
//!
//! `Σ alloc == pool_size` whenever `pool_size ≤ total_need`. A surplus pool
//! leaves every term at its need and the rest unused. All arithmetic is
//! integer; no floating-point rounding enters the result.
//!
//! The distributor then walks terms in ascending order, handing each the
//! first `alloc[t]` of its ranked candidates. A lecturer teaches in one
//! term at most; a term that runs out of candidates stays short and never
//! borrows another term's share.
//!
//! # Reference
//! Balinski & Young (2001), "Fair Representation", Ch. 2

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::demand::TermDemand;
use crate::load::LoadTracker;
use crate::matching::{match_candidates, ExpertiseProfile};
use crate::models::{Lecturer, LecturerId, TermId};

/// One term's apportioned share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermShare {
    /// Term number.
    pub term: TermId,
    /// Lecturer slots required.
    pub need: u64,
    /// Lecturers apportioned from the pool.
    pub allocated: usize,
}

/// Teaching lecturers picked for one term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermPick {
    /// Term number.
    pub term: TermId,
    /// Apportioned share.
    pub allocated: usize,
    /// Expertise-matched candidates available when the term was processed.
    pub candidate_count: usize,
    /// Selected lecturers, best-first.
    pub selected: Vec<LecturerId>,
}

impl TermPick {
    /// Lecturers missing against the share.
    pub fn share_shortfall(&self) -> usize {
        self.allocated.saturating_sub(self.selected.len())
    }
}

/// Splits `pool_size` lecturers across `needs` by largest remainder.
///
/// Returns one share per input term, in input order.
///
/// # Example
/// ```
/// use u_allocate::apportion::apportion;
///
/// let shares = apportion(20, &[(1, 8), (3, 8), (5, 12), (7, 8)]);
/// let alloc: Vec<usize> = shares.iter().map(|s| s.allocated).collect();
/// assert_eq!(alloc, vec![5, 4, 7, 4]);
/// ```
pub fn apportion(pool_size: usize, needs: &[(TermId, u64)]) -> Vec<TermShare> {
    let total_need: u128 = needs.iter().map(|&(_, n)| n as u128).sum();
    let mut shares: Vec<TermShare> = needs
        .iter()
        .map(|&(term, need)| TermShare {
            term,
            need,
            allocated: 0,
        })
        .collect();
    if total_need == 0 || pool_size == 0 {
        return shares;
    }

    let pool = pool_size as u128;
    let mut remainders = Vec::with_capacity(shares.len());
    for share in &mut shares {
        let quota = pool * share.need as u128;
        let floor = (quota / total_need).min(share.need as u128);
        share.allocated = floor as usize;
        remainders.push(quota % total_need);
    }

    let target = pool.min(total_need) as usize;
    let assigned: usize = shares.iter().map(|s| s.allocated).sum();
    let mut leftover = target.saturating_sub(assigned);

    let mut order: Vec<usize> = (0..shares.len()).collect();
    order.sort_by(|&a, &b| {
        let short_a = shares[a].need - shares[a].allocated as u64;
        let short_b = shares[b].need - shares[b].allocated as u64;
        short_b
            .cmp(&short_a)
            .then_with(|| remainders[b].cmp(&remainders[a]))
            .then_with(|| shares[a].term.cmp(&shares[b].term))
    });

    while leftover > 0 {
        let mut progressed = false;
        for &i in &order {
            if leftover == 0 {
                break;
            }
            if (shares[i].allocated as u64) < shares[i].need {
                shares[i].allocated += 1;
                leftover -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    shares
}

/// Hands each term its share of ranked, expertise-matched candidates.
///
/// Terms are processed in ascending order. Each selected lecturer is
/// charged one assignment per module of the term before the next term is
/// ranked, and leaves the pool for the rest of the run.
pub fn distribute(
    demands: &[TermDemand],
    shares: &[TermShare],
    profiles: &BTreeMap<TermId, ExpertiseProfile>,
    pool: &[&Lecturer],
    tracker: &mut LoadTracker,
) -> Vec<TermPick> {
    let share_of: BTreeMap<TermId, usize> =
        shares.iter().map(|s| (s.term, s.allocated)).collect();
    let mut ordered: Vec<&TermDemand> = demands.iter().collect();
    ordered.sort_by_key(|d| d.term);

    let mut consumed: BTreeSet<LecturerId> = BTreeSet::new();
    let mut picks = Vec::with_capacity(ordered.len());

    for demand in ordered {
        let allocated = share_of.get(&demand.term).copied().unwrap_or(0);
        let mut pick = TermPick {
            term: demand.term,
            allocated,
            ..Default::default()
        };
        if demand.need == 0 {
            picks.push(pick);
            continue;
        }

        let empty = ExpertiseProfile::default();
        let profile = profiles.get(&demand.term).unwrap_or(&empty);
        let available = pool.iter().copied().filter(|l| !consumed.contains(&l.id));
        let mut candidates = match_candidates(profile, available);
        tracker.rank(&mut candidates);

        pick.candidate_count = candidates.len();
        for candidate in candidates.into_iter().take(allocated) {
            tracker.record(candidate.lecturer_id, demand.module_count() as u64);
            consumed.insert(candidate.lecturer_id);
            pick.selected.push(candidate.lecturer_id);
        }

        debug!(
            term = demand.term,
            allocated,
            candidates = pick.candidate_count,
            selected = pick.selected.len(),
            "term distributed"
        );
        picks.push(pick);
    }

    picks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TieBreak;
    use crate::models::ModuleId;
    use proptest::prelude::*;

    fn alloc(shares: &[TermShare]) -> Vec<usize> {
        shares.iter().map(|s| s.allocated).collect()
    }

    #[test]
    fn test_largest_remainder_scenario() {
        // floors [4, 4, 6, 4] = 18; shortfalls [4, 4, 6, 4]; R = 2
        let shares = apportion(20, &[(1, 8), (3, 8), (5, 12), (7, 8)]);
        assert_eq!(alloc(&shares), vec![5, 4, 7, 4]);
        assert_eq!(alloc(&shares).iter().sum::<usize>(), 20);
    }

    #[test]
    fn test_exact_division_has_no_remainder() {
        let shares = apportion(6, &[(1, 2), (3, 4)]);
        assert_eq!(alloc(&shares), vec![2, 4]);
    }

    #[test]
    fn test_surplus_pool_capped_at_need() {
        let shares = apportion(50, &[(1, 3), (3, 5)]);
        assert_eq!(alloc(&shares), vec![3, 5]);
    }

    #[test]
    fn test_zero_need_terms_get_nothing() {
        let shares = apportion(5, &[(1, 0), (3, 10)]);
        assert_eq!(alloc(&shares), vec![0, 5]);
    }

    #[test]
    fn test_empty_pool_or_demand() {
        assert_eq!(alloc(&apportion(0, &[(1, 4)])), vec![0]);
        assert_eq!(alloc(&apportion(4, &[(1, 0), (3, 0)])), vec![0, 0]);
        assert!(apportion(4, &[]).is_empty());
    }

    #[test]
    fn test_remainder_tie_prefers_larger_fraction() {
        // pool 6, needs (1, 6), (3, 5): quotas 36/11, 30/11
        // floors [3, 2], shortfalls tie at 3, remainders 3 vs 8 -> term 3
        let shares = apportion(6, &[(1, 6), (3, 5)]);
        assert_eq!(alloc(&shares), vec![3, 3]);

        // pool 5, needs (1, 4), (3, 3): floors [2, 2], shortfalls [2, 1] -> term 1
        let shares = apportion(5, &[(1, 4), (3, 3)]);
        assert_eq!(alloc(&shares), vec![3, 2]);

        // pool 3, needs (1, 2), (3, 2), (5, 2): floors [1, 1, 1] exact
        let shares = apportion(3, &[(1, 2), (3, 2), (5, 2)]);
        assert_eq!(alloc(&shares), vec![1, 1, 1]);

        // pool 2, needs (1, 3), (3, 3), (5, 3): floors [0, 0, 0], ties -> lower terms
        let shares = apportion(2, &[(5, 3), (1, 3), (3, 3)]);
        assert_eq!(alloc(&shares), vec![0, 1, 1]);
    }

    proptest! {
        #[test]
        fn prop_conservation(
            pool in 0usize..200,
            needs in prop::collection::vec(0u64..60, 0..8),
        ) {
            let input: Vec<(TermId, u64)> = needs
                .iter()
                .enumerate()
                .map(|(i, &n)| (2 * i as TermId + 1, n))
                .collect();
            let shares = apportion(pool, &input);
            let total_need: u64 = needs.iter().sum();
            let sum: usize = alloc(&shares).iter().sum();

            prop_assert!(sum <= pool);
            if (pool as u64) <= total_need {
                prop_assert_eq!(sum, pool);
            }
            for s in &shares {
                prop_assert!(s.allocated as u64 <= s.need);
            }
        }
    }

    fn demand(term: TermId, module_ids: &[ModuleId], need: u64, code: &str) -> TermDemand {
        TermDemand {
            term,
            course_codes: vec![code.to_string()],
            module_ids: module_ids.to_vec(),
            group_count: 1,
            need,
        }
    }

    #[test]
    fn test_distribute_consumes_each_lecturer_once() {
        let lecturers = [
            Lecturer::new(1).with_expertise("Anatomy"),
            Lecturer::new(2).with_expertise("Anatomy"),
            Lecturer::new(3).with_expertise("Anatomy"),
        ];
        let pool: Vec<&Lecturer> = lecturers.iter().collect();
        let demands = vec![demand(1, &[10, 11], 2, "A"), demand(3, &[20], 1, "B")];
        let shares = apportion(3, &[(1, 2), (3, 1)]);
        let profiles = BTreeMap::from([
            (1, ExpertiseProfile::new(["Anatomy"])),
            (3, ExpertiseProfile::new(["Anatomy"])),
        ]);
        let mut tracker = LoadTracker::new([1, 2, 3], &BTreeMap::new(), TieBreak::ById);

        let picks = distribute(&demands, &shares, &profiles, &pool, &mut tracker);
        assert_eq!(picks[0].selected, vec![1, 2]);
        assert_eq!(picks[1].selected, vec![3]);
        assert_eq!(tracker.count(1), 2);
        assert_eq!(tracker.count(3), 1);
    }

    #[test]
    fn test_distribute_records_shortfall_without_borrowing() {
        let lecturers = [
            Lecturer::new(1).with_expertise("Anatomy"),
            Lecturer::new(2).with_expertise("Surgery"),
            Lecturer::new(3).with_expertise("Surgery"),
        ];
        let pool: Vec<&Lecturer> = lecturers.iter().collect();
        let demands = vec![demand(1, &[10], 4, "A"), demand(3, &[20], 1, "B")];
        let shares = vec![
            TermShare { term: 1, need: 4, allocated: 2 },
            TermShare { term: 3, need: 1, allocated: 1 },
        ];
        let profiles = BTreeMap::from([
            (1, ExpertiseProfile::new(["Anatomy"])),
            (3, ExpertiseProfile::new(["Surgery"])),
        ]);
        let mut tracker = LoadTracker::new([1, 2, 3], &BTreeMap::new(), TieBreak::ById);

        let picks = distribute(&demands, &shares, &profiles, &pool, &mut tracker);
        assert_eq!(picks[0].selected, vec![1]);
        assert_eq!(picks[0].share_shortfall(), 1);
        assert_eq!(picks[1].selected, vec![2]);
        assert_eq!(picks[1].share_shortfall(), 0);
    }

    #[test]
    fn test_distribute_prefers_lighter_history() {
        let lecturers = [
            Lecturer::new(1).with_expertise("Anatomy"),
            Lecturer::new(2).with_expertise("Anatomy"),
        ];
        let pool: Vec<&Lecturer> = lecturers.iter().collect();
        let demands = vec![demand(1, &[10], 1, "A")];
        let shares = apportion(1, &[(1, 1)]);
        let profiles = BTreeMap::from([(1, ExpertiseProfile::new(["Anatomy"]))]);
        let history = BTreeMap::from([(1, 4)]);
        let mut tracker = LoadTracker::new([1, 2], &history, TieBreak::ById);

        let picks = distribute(&demands, &shares, &profiles, &pool, &mut tracker);
        assert_eq!(picks[0].selected, vec![2]);
    }
}
