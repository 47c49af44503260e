//! Allocation input snapshot and outcome.
//!
//! `AllocationInput` is the frozen view of everything the persistence
//! collaborator supplied for one run. `AllocationOutcome` is what a run
//! produces: the batch to commit plus per-term bookkeeping.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{
    Assignment, AssignmentRole, Course, DataIssue, Lecturer, LecturerId, Module, ModuleId,
    SmallGroup, TermId, Warning,
};

/// Immutable input for one allocation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocationInput {
    /// Courses of every term.
    pub courses: Vec<Course>,
    /// Modules per course code.
    pub modules: BTreeMap<String, Vec<Module>>,
    /// Every lecturer, including role holders.
    pub lecturers: Vec<Lecturer>,
    /// Small groups of every term.
    pub small_groups: Vec<SmallGroup>,
    /// Assignments each lecturer already carries from outside this run.
    #[serde(default)]
    pub historical_assignment_count: BTreeMap<LecturerId, u64>,
    /// Problems found while normalizing raw records.
    #[serde(default)]
    pub ingest_issues: Vec<DataIssue>,
}

/// Result of one allocation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// Batch to commit.
    pub assignments: Vec<Assignment>,
    /// Per-term shortages.
    pub warnings: Vec<Warning>,
    /// Data-integrity problems; the affected roles were skipped.
    pub issues: Vec<DataIssue>,
    /// Per-term bookkeeping, ascending by term.
    pub terms: Vec<TermSummary>,
    /// Lecturers available for general teaching, system-wide.
    pub pool_size: usize,
    /// Final fairness load per pool lecturer (history plus this run).
    pub assignment_counts: BTreeMap<LecturerId, u64>,
}

/// What happened to one term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSummary {
    /// Term number.
    pub term: TermId,
    /// Modules of every course in the term.
    pub module_ids: Vec<ModuleId>,
    /// Distinct small groups.
    pub group_count: usize,
    /// Lecturer slots required (`group_count × module_count`).
    pub need: u64,
    /// Apportioned share of the general pool.
    pub allocated: usize,
    /// Expertise-matched candidates seen when the term was processed.
    pub candidate_count: usize,
    /// Selected coordinator.
    pub coordinator: Option<LecturerId>,
    /// Selected team members.
    pub team_members: Vec<LecturerId>,
    /// Teaching lecturers, in selection order.
    pub teaching: Vec<LecturerId>,
}

impl AllocationInput {
    /// Creates an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course together with its modules.
    pub fn with_course(mut self, course: Course, modules: Vec<Module>) -> Self {
        self.modules.insert(course.code.clone(), modules);
        self.courses.push(course);
        self
    }

    /// Adds a lecturer.
    pub fn with_lecturer(mut self, lecturer: Lecturer) -> Self {
        self.lecturers.push(lecturer);
        self
    }

    /// Adds small groups named `names` to `term`.
    pub fn with_groups<I, S>(mut self, term: TermId, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.small_groups
            .extend(names.into_iter().map(|n| SmallGroup::new(term, n)));
        self
    }

    /// Sets the externally known assignment count of a lecturer.
    pub fn with_history(mut self, lecturer_id: LecturerId, count: u64) -> Self {
        self.historical_assignment_count.insert(lecturer_id, count);
        self
    }

    /// Modules of a course (empty if the course has none).
    pub fn modules_of(&self, course_code: &str) -> &[Module] {
        self.modules
            .get(course_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Finds a course by code.
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }
}

impl AllocationOutcome {
    /// Whether the run finished without warnings or data issues.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty() && self.issues.is_empty()
    }

    /// Number of assignment records.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// All assignments of a lecturer.
    pub fn assignments_for_lecturer(&self, lecturer_id: LecturerId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.lecturer_id == lecturer_id)
            .collect()
    }

    /// All assignments on a module.
    pub fn assignments_for_module(&self, module_id: ModuleId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.module_id == module_id)
            .collect()
    }

    /// All assignments with a given role.
    pub fn assignments_with_role(&self, role: AssignmentRole) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.role == role).collect()
    }

    /// Summary of a term, if it was processed.
    pub fn term(&self, term: TermId) -> Option<&TermSummary> {
        self.terms.iter().find(|t| t.term == term)
    }

    /// Every lecturer placed on a term, in any role.
    pub fn lecturers_for_term(&self, term: TermId) -> BTreeSet<LecturerId> {
        self.term(term)
            .map(|t| {
                t.coordinator
                    .iter()
                    .chain(&t.team_members)
                    .chain(&t.teaching)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every module covered by the run (the set a reset must clear).
    pub fn module_ids(&self) -> Vec<ModuleId> {
        self.terms
            .iter()
            .flat_map(|t| t.module_ids.iter().copied())
            .collect()
    }

    /// Sum of apportioned shares across terms.
    pub fn total_allocated(&self) -> usize {
        self.terms.iter().map(|t| t.allocated).sum()
    }
}

impl TermSummary {
    /// Teaching lecturers missing against the term's need.
    pub fn shortfall(&self) -> usize {
        usize::try_from(self.need)
            .unwrap_or(usize::MAX)
            .saturating_sub(self.teaching.len())
    }

    /// Teaching lecturers missing against the apportioned share.
    pub fn share_shortfall(&self) -> usize {
        self.allocated.saturating_sub(self.teaching.len())
    }
}
