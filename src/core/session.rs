//! Session resolution - who the current user is.
//!
//! The mobile origin resolved the current user through an implicit chain of
//! fallbacks scattered across its data hooks. Here the chain is one explicit
//! call made once per operation: an explicit id wins, otherwise the cached
//! active user in `app_state` is used, otherwise resolution fails. The
//! resolved id is then threaded through the operations that need it.

use crate::{
    entities::{AppState, app_state},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::debug;

const ACTIVE_USER_KEY: &str = "active_user_id";

/// Reads a value from the `app_state` key-value table.
async fn get_state_value(db: &DatabaseConnection, key: &str) -> Result<Option<String>> {
    let state = AppState::find()
        .filter(app_state::Column::Key.eq(key))
        .one(db)
        .await?;
    Ok(state.map(|s| s.value))
}

/// Writes a value to the `app_state` key-value table, inserting or updating.
async fn set_state_value(db: &DatabaseConnection, key: &str, value: String) -> Result<()> {
    let now = chrono::Utc::now().naive_utc();

    let existing = AppState::find()
        .filter(app_state::Column::Key.eq(key))
        .one(db)
        .await?;

    if let Some(state) = existing {
        let mut active: app_state::ActiveModel = state.into();
        active.value = Set(value);
        active.updated_at = Set(now);
        active.update(db).await?;
    } else {
        let state = app_state::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(now),
            ..Default::default()
        };
        state.insert(db).await?;
    }

    Ok(())
}

/// Resolves the current user id.
///
/// An explicit id takes precedence; otherwise the cached active user is
/// consulted. When neither is available the caller gets
/// [`Error::NoActiveUser`] instead of a silently empty scope.
pub async fn resolve_current_user(
    db: &DatabaseConnection,
    explicit: Option<&str>,
) -> Result<String> {
    if let Some(user_id) = explicit {
        if user_id.trim().is_empty() {
            return Err(Error::Config {
                message: "Explicit user id cannot be empty".to_string(),
            });
        }
        return Ok(user_id.to_string());
    }

    get_state_value(db, ACTIVE_USER_KEY)
        .await?
        .ok_or(Error::NoActiveUser)
}

/// Caches the active user id for subsequent resolutions.
pub async fn set_active_user(db: &DatabaseConnection, user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(Error::Config {
            message: "Active user id cannot be empty".to_string(),
        });
    }
    set_state_value(db, ACTIVE_USER_KEY, user_id.to_string()).await?;
    debug!(user_id, "Cached active user");
    Ok(())
}

/// Clears the cached active user id, e.g. on sign-out.
pub async fn clear_active_user(db: &DatabaseConnection) -> Result<()> {
    AppState::delete_many()
        .filter(app_state::Column::Key.eq(ACTIVE_USER_KEY))
        .exec(db)
        .await?;
    Ok(())
}
