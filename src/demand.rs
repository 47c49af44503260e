//! Demand calculation.
//!
//! Every small group of a term sits through every module of the term, so
//! a term needs `group_count × module_count` lecturer slots.
//!
//! A term with modules but no small groups has *undefined* demand. Treating
//! it as zero would silently starve the term, so the whole request fails.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::config::AllocatorConfig;
use crate::error::{AllocationError, AllocationResult};
use crate::models::{AllocationInput, ModuleId, TermId};

/// Lecturer demand of one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermDemand {
    /// Term number.
    pub term: TermId,
    /// Course codes of the term, in input order.
    pub course_codes: Vec<String>,
    /// Modules of every course in the term, course by course in ordinal order.
    pub module_ids: Vec<ModuleId>,
    /// Number of distinct small-group names.
    pub group_count: usize,
    /// Lecturer slots required.
    pub need: u64,
}

impl TermDemand {
    /// Number of modules in the term.
    pub fn module_count(&self) -> usize {
        self.module_ids.len()
    }
}

/// Computes the demand of every active term, ascending by term.
///
/// # Errors
/// [`AllocationError::MissingSmallGroups`] naming every active term that
/// has modules but no small groups.
pub fn calculate_demand(
    input: &AllocationInput,
    config: &AllocatorConfig,
) -> AllocationResult<Vec<TermDemand>> {
    let mut groups: BTreeMap<TermId, BTreeSet<&str>> = BTreeMap::new();
    for g in &input.small_groups {
        groups.entry(g.term).or_default().insert(g.group_name.as_str());
    }

    let mut demands: BTreeMap<TermId, TermDemand> = BTreeMap::new();
    for course in input.courses.iter().filter(|c| config.is_active(c.term)) {
        let demand = demands.entry(course.term).or_insert_with(|| TermDemand {
            term: course.term,
            course_codes: Vec::new(),
            module_ids: Vec::new(),
            group_count: groups.get(&course.term).map_or(0, BTreeSet::len),
            need: 0,
        });

        let mut modules = input.modules_of(&course.code).to_vec();
        modules.sort_by_key(|m| m.ordinal);

        demand.course_codes.push(course.code.clone());
        demand.module_ids.extend(modules.iter().map(|m| m.id));
    }

    let missing: Vec<TermId> = demands
        .values()
        .filter(|d| d.module_count() > 0 && d.group_count == 0)
        .map(|d| d.term)
        .collect();
    if !missing.is_empty() {
        return Err(AllocationError::MissingSmallGroups { terms: missing });
    }

    let demands: Vec<TermDemand> = demands
        .into_values()
        .map(|mut d| {
            d.need = d.group_count as u64 * d.module_count() as u64;
            debug!(
                term = d.term,
                modules = d.module_count(),
                groups = d.group_count,
                need = d.need,
                "term demand"
            );
            d
        })
        .collect();

    Ok(demands)
}
