//! Shared test utilities for `ResiLog`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{core::logbook, entities, errors::Result};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test logbook node with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - Owner of the node
/// * `parent` - Parent node id, None for a root section
/// * `name` - Node name
pub async fn create_test_node(
    db: &DatabaseConnection,
    user_id: &str,
    parent: Option<i64>,
    name: &str,
) -> Result<entities::node::Model> {
    logbook::create_node(db, user_id, parent, name.to_string(), None).await
}

/// Creates a test entry against a node with the given count.
pub async fn create_test_entry(
    db: &DatabaseConnection,
    node_id: i64,
    count: i32,
) -> Result<entities::entry::Model> {
    logbook::create_entry(db, node_id, count, None, None).await
}

/// Inserts a historical cutoff row directly.
pub async fn create_test_cutoff(
    db: &DatabaseConnection,
    hospital_code: &str,
    specialty_code: &str,
    year: i32,
    cutoff_rank: i32,
) -> Result<entities::cutoff::Model> {
    let model = entities::cutoff::ActiveModel {
        hospital_code: Set(hospital_code.to_string()),
        specialty_code: Set(specialty_code.to_string()),
        year: Set(year),
        cutoff_rank: Set(cutoff_rank),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Sets up a complete test environment with one root node.
/// Returns (db, node) for common logbook test scenarios.
pub async fn setup_with_node() -> Result<(DatabaseConnection, entities::node::Model)> {
    let db = setup_test_db().await?;
    let node = create_test_node(&db, "test_user", None, "Cirugías").await?;
    Ok((db, node))
}
