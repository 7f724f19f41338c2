//! Database configuration module for `ResiLog`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{AppState, Cutoff, Entry, Event, Node, Profile, Review, Rotation, Shift};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> Result<String> {
    Ok(std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/resilog.sqlite".to_string()))
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// This function handles connection errors and provides a clean interface for database access
/// throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url()?;

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let node_table = schema.create_table_from_entity(Node);
    let entry_table = schema.create_table_from_entity(Entry);
    let event_table = schema.create_table_from_entity(Event);
    let rotation_table = schema.create_table_from_entity(Rotation);
    let shift_table = schema.create_table_from_entity(Shift);
    let review_table = schema.create_table_from_entity(Review);
    let cutoff_table = schema.create_table_from_entity(Cutoff);
    let profile_table = schema.create_table_from_entity(Profile);
    let app_state_table = schema.create_table_from_entity(AppState);

    db.execute(builder.build(&node_table)).await?;
    db.execute(builder.build(&entry_table)).await?;
    db.execute(builder.build(&event_table)).await?;
    db.execute(builder.build(&rotation_table)).await?;
    db.execute(builder.build(&shift_table)).await?;
    db.execute(builder.build(&review_table)).await?;
    db.execute(builder.build(&cutoff_table)).await?;
    db.execute(builder.build(&profile_table)).await?;
    db.execute(builder.build(&app_state_table)).await?;

    Ok(())
}
