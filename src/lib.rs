//! Lecturer allocation for curriculum administration.
//!
//! Given courses grouped by academic term, a lecturer pool with declared
//! expertise and curriculum roles, and per-term small groups, decides which
//! lecturer teaches which module and in what role.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Module`, `SmallGroup`, `Lecturer`,
//!   `Assignment`, `Warning`, `AllocationInput`, `AllocationOutcome`
//! - **`demand`**: Lecturer slots per term (`groups × modules`)
//! - **`roles`**: Coordinator / team member resolution
//! - **`matching`**: Case-insensitive substring expertise matching
//! - **`load`**: Fairness ordering by current assignment count
//! - **`apportion`**: Largest-remainder split of the pool across terms
//! - **`writer`**: Batch commit, idempotent reset, `AssignmentStore`
//! - **`warnings`**: Per-term shortage reporting
//! - **`allocator`**: The deterministic allocation pass
//! - **`service`**: Reset + Generate cycle against a store
//! - **`ingest`**: Normalization of loose upstream records
//! - **`kpi`**: Allocation quality metrics
//! - **`validation`**: Input integrity checks
//!
//! # Non-goals
//!
//! No time slots, rooms or calendars; no authentication. Matching is
//! best-effort and deterministic, not globally optimal.
//!
//! # References
//!
//! - Balinski & Young (2001), "Fair Representation"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

pub mod allocator;
pub mod apportion;
pub mod config;
pub mod demand;
pub mod error;
pub mod ingest;
pub mod kpi;
pub mod load;
pub mod matching;
pub mod models;
pub mod roles;
pub mod service;
pub mod validation;
pub mod warnings;
pub mod writer;

pub use allocator::Allocator;
pub use config::AllocatorConfig;
pub use error::{AllocationError, StoreError};
pub use service::AllocationService;
