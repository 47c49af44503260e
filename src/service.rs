//! Reset + Generate cycle against a store.
//!
//! `regenerate` takes `&mut self`, so two cycles on one service can never
//! interleave. Callers sharing a service across threads wrap it in a mutex,
//! which serializes whole cycles.

use tracing::info;

use crate::allocator::Allocator;
use crate::error::AllocationResult;
use crate::models::{AllocationInput, AllocationOutcome, ModuleId};
use crate::warnings::WarningBoard;
use crate::writer::{commit_batch, reset_modules, AssignmentStore, CommitReport};

/// What one regeneration did.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The computed allocation.
    pub outcome: AllocationOutcome,
    /// Records removed by the reset.
    pub reset_count: usize,
    /// Aggregate commit result.
    pub commit: CommitReport,
}

/// Allocator bound to a persistence collaborator.
#[derive(Debug)]
pub struct AllocationService<S: AssignmentStore> {
    allocator: Allocator,
    store: S,
    warnings: WarningBoard,
}

impl<S: AssignmentStore> AllocationService<S> {
    /// Creates a service.
    pub fn new(allocator: Allocator, store: S) -> Self {
        Self {
            allocator,
            store,
            warnings: WarningBoard::new(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Latest warnings per term.
    pub fn warnings(&self) -> &WarningBoard {
        &self.warnings
    }

    /// Consumes the service, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Clears assignments of `module_ids`. Safe to repeat.
    pub fn reset(&mut self, module_ids: &[ModuleId]) -> AllocationResult<usize> {
        Ok(reset_modules(&mut self.store, module_ids)?)
    }

    /// Computes a fresh allocation, clears the affected modules and commits.
    ///
    /// Blocking errors return before the store is touched. A partially
    /// failed commit is reported in [`RunReport::commit`], not as an error;
    /// calling `regenerate` again is the recovery.
    pub fn regenerate(&mut self, input: &AllocationInput) -> AllocationResult<RunReport> {
        let outcome = self.allocator.allocate(input)?;

        let module_ids = outcome.module_ids();
        let reset_count = reset_modules(&mut self.store, &module_ids)?;
        let commit = commit_batch(&mut self.store, &outcome.assignments);

        self.warnings
            .replace(outcome.terms.iter().map(|t| t.term), &outcome.warnings);

        info!(
            reset = reset_count,
            committed = commit.success_count,
            failed = commit.error_count,
            "regeneration finished"
        );
        Ok(RunReport {
            outcome,
            reset_count,
            commit,
        })
    }
}
