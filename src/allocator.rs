//! Lecturer allocator.
//!
//! # Algorithm
//!
//! 1. Validate the input snapshot.
//! 2. Compute per-term demand (fails if a term with modules has no groups).
//! 3. Resolve coordinators and team members; drop every role holder from the pool.
//! 4. Apportion the pool across terms by largest remainder.
//! 5. Walk terms ascending: match expertise, rank by load, take the share.
//! 6. Flatten role and teaching decisions into assignment records.
//! 7. Report per-term shortages.
//!
//! The pass is single-threaded and deterministic for a given configuration.
//! It has no side effects; committing is the caller's (or
//! [`AllocationService`](crate::service::AllocationService)'s) job.
//!
//! # Complexity
//! O(t · l · e · r) where t=terms, l=lecturers, e=expertise tags per
//! lecturer, r=required tags per term.

use std::collections::{BTreeMap, HashMap};

use tracing::info;

use crate::apportion::{apportion, distribute};
use crate::config::AllocatorConfig;
use crate::demand::calculate_demand;
use crate::error::{AllocationError, AllocationResult};
use crate::load::LoadTracker;
use crate::matching::ExpertiseProfile;
use crate::models::{
    AllocationInput, AllocationOutcome, Assignment, Lecturer, LecturerId, TermId, TermSummary,
};
use crate::roles::resolve_roles;
use crate::validation::validate_input;
use crate::warnings::term_warning;

/// Computes lecturer assignments from an input snapshot.
///
/// # Example
///
/// ```
/// use u_allocate::allocator::Allocator;
/// use u_allocate::models::{AllocationInput, Course, Lecturer, Module};
///
/// let input = AllocationInput::new()
///     .with_course(
///         Course::new("ANA-101", 1).with_expertise("Anatomy"),
///         vec![Module::new(1, 1), Module::new(2, 2)],
///     )
///     .with_groups(1, ["A"])
///     .with_lecturer(Lecturer::new(1).with_coordinator(1, "ANA-101"))
///     .with_lecturer(Lecturer::new(2).with_expertise("anatomy lab"))
///     .with_lecturer(Lecturer::new(3).with_expertise("Anatomy"));
///
/// let outcome = Allocator::default().allocate(&input).unwrap();
/// // coordinator and two teaching lecturers on both modules
/// assert_eq!(outcome.assignment_count(), 6);
/// assert!(outcome.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    /// Creates an allocator.
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    /// Runs one allocation pass.
    ///
    /// # Errors
    /// - [`AllocationError::InvalidInput`] on structural input errors.
    /// - [`AllocationError::MissingSmallGroups`] when a term with modules
    ///   has no small groups. No term is allocated in that case.
    pub fn allocate(&self, input: &AllocationInput) -> AllocationResult<AllocationOutcome> {
        validate_input(input).map_err(AllocationError::InvalidInput)?;
        let demands = calculate_demand(input, &self.config)?;
        let roles = resolve_roles(input, &demands, self.config.coordinator_policy);

        let pool: Vec<&Lecturer> = input
            .lecturers
            .iter()
            .filter(|l| !roles.role_holders.contains(&l.id))
            .collect();

        let needs: Vec<(TermId, u64)> = demands.iter().map(|d| (d.term, d.need)).collect();
        let shares = apportion(pool.len(), &needs);

        let profiles: BTreeMap<TermId, ExpertiseProfile> = demands
            .iter()
            .map(|d| (d.term, ExpertiseProfile::for_term(input, d)))
            .collect();

        let mut tracker = LoadTracker::new(
            pool.iter().map(|l| l.id),
            &input.historical_assignment_count,
            self.config.tie_break,
        );
        let picks = distribute(&demands, &shares, &profiles, &pool, &mut tracker);

        let by_id: HashMap<LecturerId, &Lecturer> =
            input.lecturers.iter().map(|l| (l.id, l)).collect();

        let mut outcome = AllocationOutcome {
            pool_size: pool.len(),
            issues: input.ingest_issues.clone(),
            ..Default::default()
        };
        outcome.issues.extend(roles.issues.iter().cloned());

        for (demand, pick) in demands.iter().zip(&picks) {
            let term_roles = roles.for_term(demand.term);
            outcome.assignments.extend(roles.assignments(demand));
            for &lecturer_id in &pick.selected {
                outcome.assignments.extend(
                    demand
                        .module_ids
                        .iter()
                        .map(|&module_id| Assignment::teaching(module_id, lecturer_id)),
                );
            }

            let placed: Vec<&Lecturer> = term_roles
                .coordinator
                .iter()
                .chain(&term_roles.team_members)
                .chain(&pick.selected)
                .filter_map(|id| by_id.get(id).copied())
                .collect();
            let empty = ExpertiseProfile::default();
            let profile = profiles.get(&demand.term).unwrap_or(&empty);
            if let Some(warning) = term_warning(demand.need, pick, profile, &placed) {
                outcome.warnings.push(warning);
            }

            outcome.terms.push(TermSummary {
                term: demand.term,
                module_ids: demand.module_ids.clone(),
                group_count: demand.group_count,
                need: demand.need,
                allocated: pick.allocated,
                candidate_count: pick.candidate_count,
                coordinator: term_roles.coordinator,
                team_members: term_roles.team_members,
                teaching: pick.selected.clone(),
            });
        }

        outcome.assignment_counts = tracker.into_counts();

        info!(
            terms = outcome.terms.len(),
            pool = outcome.pool_size,
            allocated = outcome.total_allocated(),
            assignments = outcome.assignment_count(),
            warnings = outcome.warnings.len(),
            issues = outcome.issues.len(),
            "allocation computed"
        );
        Ok(outcome)
    }
}
