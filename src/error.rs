//! Blocking errors of an allocation run.
//!
//! Anything here stops the pass before reset or commit. Shortages and
//! data issues are not errors; they travel in the outcome.

use thiserror::Error;

use crate::models::{LecturerId, ModuleId, TermId};
use crate::validation::ValidationError;

/// Errors that abort an allocation request.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Terms with modules but no small groups; their demand is undefined.
    #[error("no small groups for term(s) {terms:?} that have modules")]
    MissingSmallGroups {
        /// Every affected term, ascending.
        terms: Vec<TermId>,
    },

    /// Structural problems in the input snapshot.
    #[error("invalid allocation input ({} error(s))", .0.len())]
    InvalidInput(Vec<ValidationError>),

    /// The persistence collaborator failed outright.
    #[error("assignment store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors reported by an assignment store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The exact record already exists.
    #[error("duplicate assignment: module {module_id}, lecturer {lecturer_id}")]
    Duplicate {
        /// Module of the record.
        module_id: ModuleId,
        /// Lecturer of the record.
        lecturer_id: LecturerId,
    },

    /// The store rejected the record for its module.
    #[error("module {0} rejected by store")]
    Rejected(ModuleId),

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for allocation requests.
pub type AllocationResult<T> = Result<T, AllocationError>;
