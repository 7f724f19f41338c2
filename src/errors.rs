//! Unified error types for the `ResiLog` data layer.
//!
//! Every fallible operation in the crate returns the crate-wide [`Result`]
//! alias. Remote-service and database failures are converted via `From`;
//! domain validation failures use dedicated variants so callers can match
//! on them.

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation failed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// A logbook node lookup failed
    #[error("Logbook node not found: {id}")]
    NodeNotFound {
        /// Primary key that did not resolve
        id: i64,
    },

    /// A logbook entry lookup failed
    #[error("Logbook entry not found: {id}")]
    EntryNotFound {
        /// Primary key that did not resolve
        id: i64,
    },

    /// A logbook event lookup failed
    #[error("Logbook event not found: {id}")]
    EventNotFound {
        /// Primary key that did not resolve
        id: i64,
    },

    /// A rotation lookup failed
    #[error("Rotation not found: {id}")]
    RotationNotFound {
        /// Primary key that did not resolve
        id: i64,
    },

    /// A shift lookup failed
    #[error("Shift not found: {id}")]
    ShiftNotFound {
        /// Primary key that did not resolve
        id: i64,
    },

    /// A peer review lookup failed
    #[error("Peer review not found: {id}")]
    ReviewNotFound {
        /// Primary key that did not resolve
        id: i64,
    },

    /// A profile lookup failed
    #[error("Profile not found for user {user_id}")]
    ProfileNotFound {
        /// User id that has no profile row
        user_id: String,
    },

    /// An entry count of zero was supplied
    #[error("Invalid entry count: {count}")]
    InvalidCount {
        /// The rejected count value
        count: i32,
    },

    /// A peer-review rating outside 1..=5 was supplied
    #[error("Invalid rating: {rating} (must be between 1 and 5)")]
    InvalidRating {
        /// The rejected rating value
        rating: i32,
    },

    /// A non-positive user rank was supplied to the estimator
    #[error("Invalid rank: {rank} (must be positive)")]
    InvalidRank {
        /// The rejected rank value
        rank: i32,
    },

    /// A reorder request did not match the current sibling set
    #[error("Reorder mismatch: {message}")]
    ReorderMismatch {
        /// What part of the id set disagreed
        message: String,
    },

    /// No explicit user id was given and no active user is cached
    #[error("No active user session")]
    NoActiveUser,

    /// The remote hospital directory returned a failure response
    #[error("Directory request failed: {message}")]
    Directory {
        /// Status and body excerpt from the remote service
        message: String,
    },

    /// The object storage service returned a failure response
    #[error("Storage request failed: {message}")]
    Storage {
        /// Status and body excerpt from the remote service
        message: String,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
