//! Curriculum role resolution.
//!
//! Coordinators and team members are declared upstream and are mandatory:
//! the selected holders go onto every module of every course in their term.
//! Anyone holding a role anywhere leaves the general-teaching pool for the
//! whole run, including holders whose declaration was skipped as
//! inconsistent.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::config::CoordinatorPolicy;
use crate::demand::TermDemand;
use crate::models::{
    AllocationInput, Assignment, CurriculumRole, DataIssue, DataIssueKind, LecturerId, TermId,
};

/// Role holders selected for one term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermRoles {
    /// The single selected coordinator.
    pub coordinator: Option<LecturerId>,
    /// Every team member, in declaration order.
    pub team_members: Vec<LecturerId>,
}

/// Result of resolving roles for the active terms.
#[derive(Debug, Clone, Default)]
pub struct RoleResolution {
    /// Selected holders per active term.
    pub terms: BTreeMap<TermId, TermRoles>,
    /// Every lecturer holding any role declaration, anywhere.
    pub role_holders: BTreeSet<LecturerId>,
    /// Skipped or ignored declarations.
    pub issues: Vec<DataIssue>,
}

impl RoleResolution {
    /// Selected holders of a term (empty when none).
    pub fn for_term(&self, term: TermId) -> TermRoles {
        self.terms.get(&term).cloned().unwrap_or_default()
    }

    /// Mandatory assignments of a term: each holder on every module.
    pub fn assignments(&self, demand: &TermDemand) -> Vec<Assignment> {
        let roles = self.for_term(demand.term);
        let holders = roles
            .coordinator
            .map(|id| (id, CurriculumRole::Coordinator))
            .into_iter()
            .chain(
                roles
                    .team_members
                    .iter()
                    .map(|&id| (id, CurriculumRole::TeamMember)),
            );

        holders
            .flat_map(|(lecturer_id, role)| {
                demand
                    .module_ids
                    .iter()
                    .map(move |&module_id| Assignment::new(module_id, lecturer_id, role.into()))
            })
            .collect()
    }
}

/// Resolves coordinators and team members for every term in `demands`.
///
/// Declarations naming an unknown course, or whose term disagrees with the
/// course's term, are skipped and reported. Declarations for inactive terms
/// are ignored without a report.
pub fn resolve_roles(
    input: &AllocationInput,
    demands: &[TermDemand],
    policy: CoordinatorPolicy,
) -> RoleResolution {
    let course_terms: HashMap<&str, TermId> = input
        .courses
        .iter()
        .map(|c| (c.code.as_str(), c.term))
        .collect();
    let active: BTreeSet<TermId> = demands.iter().map(|d| d.term).collect();

    let mut resolution = RoleResolution::default();
    let mut coordinators: BTreeMap<TermId, Vec<LecturerId>> = BTreeMap::new();
    let mut team: BTreeMap<TermId, Vec<LecturerId>> = BTreeMap::new();

    for lecturer in &input.lecturers {
        if lecturer.holds_any_role() {
            resolution.role_holders.insert(lecturer.id);
        }

        for ra in &lecturer.role_assignments {
            let course_term = match course_terms.get(ra.course_code.as_str()) {
                Some(&t) => t,
                None => {
                    resolution.issues.push(DataIssue::new(
                        DataIssueKind::UnknownCourse,
                        Some(lecturer.id),
                        format!(
                            "lecturer {} holds a role for unknown course '{}'",
                            lecturer.id, ra.course_code
                        ),
                    ));
                    continue;
                }
            };
            if course_term != ra.term {
                resolution.issues.push(DataIssue::new(
                    DataIssueKind::TermMismatch,
                    Some(lecturer.id),
                    format!(
                        "lecturer {} holds a term {} role for course '{}', which runs in term {}",
                        lecturer.id, ra.term, ra.course_code, course_term
                    ),
                ));
                continue;
            }
            if !active.contains(&ra.term) {
                continue;
            }

            let bucket = match ra.role {
                CurriculumRole::Coordinator => coordinators.entry(ra.term).or_default(),
                CurriculumRole::TeamMember => team.entry(ra.term).or_default(),
            };
            if !bucket.contains(&lecturer.id) {
                bucket.push(lecturer.id);
            }
        }
    }

    for &term in &active {
        let declared = coordinators.remove(&term).unwrap_or_default();
        let coordinator = match policy {
            CoordinatorPolicy::FirstDeclared => declared.first().copied(),
            CoordinatorPolicy::LowestId => declared.iter().min().copied(),
        };
        for &extra in declared.iter().filter(|&&id| Some(id) != coordinator) {
            resolution.issues.push(DataIssue::new(
                DataIssueKind::ExtraCoordinator,
                Some(extra),
                format!("lecturer {extra} is a further coordinator of term {term}; not selected"),
            ));
        }

        let team_members: Vec<LecturerId> = team
            .remove(&term)
            .unwrap_or_default()
            .into_iter()
            .filter(|&id| Some(id) != coordinator)
            .collect();

        debug!(term, ?coordinator, team = team_members.len(), "term roles");
        if coordinator.is_some() || !team_members.is_empty() {
            resolution.terms.insert(
                term,
                TermRoles {
                    coordinator,
                    team_members,
                },
            );
        }
    }

    for issue in &resolution.issues {
        warn!(kind = ?issue.kind, lecturer = ?issue.lecturer_id, "{}", issue.message);
    }

    resolution
}
