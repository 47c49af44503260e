//! Assignment writing and reset.
//!
//! The writer submits one batch to the persistence collaborator and
//! aggregates the per-record outcome. Nothing is rolled back: a partially
//! applied batch stays applied, and the caller recovers by running the
//! whole Reset + Generate cycle again. Reset is idempotent, which makes
//! that retry safe.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::models::{Assignment, ModuleId};

/// Persistence collaborator for assignment records.
pub trait AssignmentStore {
    /// Stores a batch, reporting each record's outcome in batch order.
    ///
    /// An outer `Err` means the call failed as a whole and nothing was applied.
    fn commit(
        &mut self,
        batch: &[Assignment],
    ) -> Result<Vec<Result<(), StoreError>>, StoreError>;

    /// Removes every assignment on `module_ids`, returning how many were removed.
    ///
    /// Must be idempotent.
    fn reset(&mut self, module_ids: &[ModuleId]) -> Result<usize, StoreError>;
}

/// Aggregate outcome of a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReport {
    /// Records applied.
    pub success_count: usize,
    /// Records not applied.
    pub error_count: usize,
    /// Per-record failures.
    #[serde(skip)]
    pub failures: Vec<(Assignment, StoreError)>,
}

impl CommitReport {
    /// Whether every record was applied.
    pub fn is_success(&self) -> bool {
        self.error_count == 0
    }
}

/// Submits `batch` as one commit and aggregates the result.
pub fn commit_batch<S>(store: &mut S, batch: &[Assignment]) -> CommitReport
where
    S: AssignmentStore + ?Sized,
{
    let mut report = CommitReport::default();
    if batch.is_empty() {
        return report;
    }

    match store.commit(batch) {
        Ok(outcomes) => {
            for (assignment, outcome) in batch.iter().zip(outcomes) {
                match outcome {
                    Ok(()) => report.success_count += 1,
                    Err(e) => report.failures.push((*assignment, e)),
                }
            }
            // A store that answers for fewer records than it was given
            // leaves the rest unconfirmed.
            let answered = report.success_count + report.failures.len();
            for assignment in &batch[answered..] {
                report.failures.push((
                    *assignment,
                    StoreError::Unavailable("no outcome reported".into()),
                ));
            }
        }
        Err(e) => {
            report.failures = batch.iter().map(|a| (*a, e.clone())).collect();
        }
    }

    report.error_count = report.failures.len();
    if report.is_success() {
        info!(records = report.success_count, "assignments committed");
    } else {
        warn!(
            succeeded = report.success_count,
            failed = report.error_count,
            "assignment commit partially failed"
        );
    }
    report
}

/// Clears every assignment on `module_ids`.
pub fn reset_modules<S>(store: &mut S, module_ids: &[ModuleId]) -> Result<usize, StoreError>
where
    S: AssignmentStore + ?Sized,
{
    let removed = store.reset(module_ids)?;
    info!(modules = module_ids.len(), removed, "assignments reset");
    Ok(removed)
}

/// In-memory assignment store.
///
/// Rejects exact duplicates, so committing the same batch twice without a
/// reset shows up as per-record failures. Modules can be primed to reject
/// records, and the whole store can be taken offline.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<ModuleId, BTreeSet<Assignment>>,
    rejected_modules: BTreeSet<ModuleId>,
    offline: bool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every record on `module_id` fail.
    pub fn with_rejected_module(mut self, module_id: ModuleId) -> Self {
        self.rejected_modules.insert(module_id);
        self
    }

    /// Takes the store offline (or back online).
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Every stored record, ordered by module.
    pub fn assignments(&self) -> Vec<Assignment> {
        self.records.values().flatten().copied().collect()
    }

    /// Stored records of one module.
    pub fn assignments_for_module(&self, module_id: ModuleId) -> Vec<Assignment> {
        self.records
            .get(&module_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.values().map(BTreeSet::len).sum()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline {
            Err(StoreError::Unavailable("memory store offline".into()))
        } else {
            Ok(())
        }
    }
}

impl AssignmentStore for MemoryStore {
    fn commit(&mut self, batch: &[Assignment]) -> Result<Vec<Result<(), StoreError>>, StoreError> {
        self.ensure_online()?;

        let outcomes = batch
            .iter()
            .map(|a| {
                if self.rejected_modules.contains(&a.module_id) {
                    return Err(StoreError::Rejected(a.module_id));
                }
                if self.records.entry(a.module_id).or_default().insert(*a) {
                    Ok(())
                } else {
                    Err(StoreError::Duplicate {
                        module_id: a.module_id,
                        lecturer_id: a.lecturer_id,
                    })
                }
            })
            .collect();
        Ok(outcomes)
    }

    fn reset(&mut self, module_ids: &[ModuleId]) -> Result<usize, StoreError> {
        self.ensure_online()?;

        Ok(module_ids
            .iter()
            .filter_map(|id| self.records.remove(id))
            .map(|set| set.len())
            .sum())
    }
}
