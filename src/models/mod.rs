//! Allocation domain models.
//!
//! Provides the input snapshot types (courses, modules, small groups,
//! lecturers with their declared roles) and the output records of a run.
//!
//! # Domain Mappings
//!
//! | u-allocate | Scheduling | Curriculum office |
//! |------------|------------|-------------------|
//! | Course | Task | Course unit |
//! | Module | Activity | Lesson, problem set |
//! | Lecturer | Resource | Teaching staff |
//! | Assignment | Assignment | Lecturer duty |

mod allocation;
mod assignment;
mod course;
mod lecturer;

pub use allocation::{AllocationInput, AllocationOutcome, TermSummary};
pub use assignment::{Assignment, AssignmentRole, DataIssue, DataIssueKind, Warning, WarningKind};
pub use course::{Course, Module, ModuleId, SmallGroup, TermId};
pub use lecturer::{CurriculumRole, Lecturer, LecturerId, RoleAssignment};
