//! Shortage reporting.
//!
//! A term is short when it had demand and fewer teaching lecturers were
//! placed than it needs, or no expertise-matched candidate existed at all.
//! A term apportioned nothing from the pool is still short. Warnings are
//! informational; the partial result is still committed.

use std::collections::BTreeMap;

use tracing::warn;

use crate::apportion::TermPick;
use crate::matching::ExpertiseProfile;
use crate::models::{Lecturer, TermId, Warning, WarningKind};

/// Builds the warning for one term, if it went short.
///
/// `placed` are every lecturer on the term (role holders and teaching);
/// required tags none of them covers are reported as unmatched.
pub fn term_warning(
    need: u64,
    pick: &TermPick,
    profile: &ExpertiseProfile,
    placed: &[&Lecturer],
) -> Option<Warning> {
    let need = usize::try_from(need).unwrap_or(usize::MAX);
    if need == 0 {
        return None;
    }
    let shortfall_count = need.saturating_sub(pick.selected.len());
    let kind = if pick.candidate_count == 0 {
        WarningKind::NoCandidates
    } else if shortfall_count > 0 {
        WarningKind::Underfilled
    } else {
        return None;
    };

    let warning = Warning {
        term: pick.term,
        kind,
        shortfall_count,
        share_shortfall: pick.share_shortfall(),
        unmatched_expertise_tags: profile.unmatched_by(placed.iter().copied()),
    };
    warn!(
        term = warning.term,
        kind = ?warning.kind,
        shortfall = warning.shortfall_count,
        share_shortfall = warning.share_shortfall,
        unmatched = ?warning.unmatched_expertise_tags,
        "lecturer shortage"
    );
    Some(warning)
}

/// Latest warnings per term.
///
/// Each run replaces the warnings of the terms it processed; nothing
/// accumulates across runs.
#[derive(Debug, Clone, Default)]
pub struct WarningBoard {
    by_term: BTreeMap<TermId, Vec<Warning>>,
}

impl WarningBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the warnings of `terms` with `warnings`.
    ///
    /// Terms in `terms` without a new warning end up clean.
    pub fn replace<I>(&mut self, terms: I, warnings: &[Warning])
    where
        I: IntoIterator<Item = TermId>,
    {
        for term in terms {
            self.by_term.remove(&term);
        }
        for w in warnings {
            self.by_term.entry(w.term).or_default().push(w.clone());
        }
    }

    /// Warnings of one term.
    pub fn for_term(&self, term: TermId) -> &[Warning] {
        self.by_term.get(&term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every warning, ascending by term.
    pub fn all(&self) -> Vec<&Warning> {
        self.by_term.values().flatten().collect()
    }

    /// Whether no term has a warning.
    pub fn is_empty(&self) -> bool {
        self.by_term.values().all(Vec::is_empty)
    }
}
