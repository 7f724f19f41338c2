//! Core business logic - framework-agnostic operations over the entities.
//!
//! Everything here is plain async CRUD plus the handful of pure routines
//! (activity aggregation, admission estimation, goal progress) that the
//! screens of the companion app are built on.

/// Activity tree aggregation (pure)
pub mod activity;
/// Admission chance estimation from historical cutoffs
pub mod admission;
/// Logbook nodes, entries, and events
pub mod logbook;
/// Manual ordering of logbook nodes
pub mod ordering;
/// Resident profiles
pub mod profile;
/// Goal progress reporting (pure)
pub mod report;
/// Peer reviews
pub mod review;
/// Hospital rotations
pub mod rotation;
/// Current-user resolution
pub mod session;
/// Shift scheduling
pub mod shift;
