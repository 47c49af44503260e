//! Allocator configuration.
//!
//! Selects which terms take part in a run and how the open policy
//! choices (candidate tie-break, coordinator selection) are resolved.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::TermId;

/// Configuration of one allocator.
///
/// # Example
/// ```
/// use u_allocate::config::{AllocatorConfig, TermParity, TieBreak};
///
/// let config = AllocatorConfig::new()
///     .with_parity(TermParity::Even)
///     .with_tie_break(TieBreak::Seeded { seed: 42 });
/// assert!(config.is_active(4));
/// assert!(!config.is_active(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Term parity taking part in generation.
    pub parity: TermParity,
    /// Explicit term whitelist; overrides `parity` when set.
    pub terms: Option<BTreeSet<TermId>>,
    /// Final tie-break among equally loaded, equally matching candidates.
    pub tie_break: TieBreak,
    /// How one coordinator is chosen when several are declared for a term.
    pub coordinator_policy: CoordinatorPolicy,
}

/// Which terms participate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermParity {
    /// Terms 1, 3, 5, 7, ...
    #[default]
    Odd,
    /// Terms 2, 4, 6, 8, ...
    Even,
    /// Every term.
    All,
}

/// Tie-break after load and match score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Lecturer id ascending.
    #[default]
    ById,
    /// Random keys from a seeded generator; reproducible per seed.
    Seeded {
        /// RNG seed.
        seed: u64,
    },
}

/// Coordinator selection when a term declares more than one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatorPolicy {
    /// First declaration in input order (lecturer order, then role order).
    #[default]
    FirstDeclared,
    /// Smallest lecturer id.
    LowestId,
}

impl AllocatorConfig {
    /// Creates the default configuration (odd terms, id tie-break, first coordinator).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the term parity.
    pub fn with_parity(mut self, parity: TermParity) -> Self {
        self.parity = parity;
        self
    }

    /// Restricts the run to an explicit term set.
    pub fn with_terms(mut self, terms: impl IntoIterator<Item = TermId>) -> Self {
        self.terms = Some(terms.into_iter().collect());
        self
    }

    /// Sets the final tie-break.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Sets the coordinator selection policy.
    pub fn with_coordinator_policy(mut self, policy: CoordinatorPolicy) -> Self {
        self.coordinator_policy = policy;
        self
    }

    /// Whether `term` takes part in a run under this configuration.
    pub fn is_active(&self, term: TermId) -> bool {
        if let Some(terms) = &self.terms {
            return terms.contains(&term);
        }
        match self.parity {
            TermParity::Odd => term % 2 == 1,
            TermParity::Even => term % 2 == 0,
            TermParity::All => true,
        }
    }
}
