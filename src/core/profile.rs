//! Profile business logic - account details for one resident.

use crate::{
    entities::{Profile, profile},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::debug;

/// Retrieves a profile by user id.
pub async fn get_profile(db: &DatabaseConnection, user_id: &str) -> Result<Option<profile::Model>> {
    Profile::find_by_id(user_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates or updates the profile for a user.
///
/// An existing profile keeps its phone and avatar path; only the fields
/// given here are replaced.
pub async fn upsert_profile(
    db: &DatabaseConnection,
    user_id: &str,
    full_name: String,
    residency_year: Option<i32>,
    specialty: Option<String>,
) -> Result<profile::Model> {
    if full_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Profile name cannot be empty".to_string(),
        });
    }

    let now = chrono::Utc::now();
    let existing = get_profile(db, user_id).await?;

    if let Some(current) = existing {
        let mut active: profile::ActiveModel = current.into();
        active.full_name = Set(full_name.trim().to_string());
        active.residency_year = Set(residency_year);
        active.specialty = Set(specialty);
        active.updated_at = Set(now);
        active.update(db).await.map_err(Into::into)
    } else {
        let model = profile::ActiveModel {
            user_id: Set(user_id.to_string()),
            full_name: Set(full_name.trim().to_string()),
            phone: Set(None),
            residency_year: Set(residency_year),
            specialty: Set(specialty),
            avatar_path: Set(None),
            updated_at: Set(now),
        };
        model.insert(db).await.map_err(Into::into)
    }
}

/// Updates the contact phone of an existing profile.
pub async fn update_phone(
    db: &DatabaseConnection,
    user_id: &str,
    phone: Option<String>,
) -> Result<profile::Model> {
    let existing = get_profile(db, user_id)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: user_id.to_string(),
        })?;

    let mut active: profile::ActiveModel = existing.into();
    active.phone = Set(phone);
    active.updated_at = Set(chrono::Utc::now());
    let updated = active.update(db).await?;
    debug!(user_id, "Updated profile phone");
    Ok(updated)
}

/// Points the profile at a new avatar object path, or clears it.
///
/// The caller owns the storage side: upload the new object first, and
/// delete the old path afterwards if the update succeeds.
pub async fn set_avatar_path(
    db: &DatabaseConnection,
    user_id: &str,
    avatar_path: Option<String>,
) -> Result<profile::Model> {
    let existing = get_profile(db, user_id)
        .await?
        .ok_or_else(|| Error::ProfileNotFound {
            user_id: user_id.to_string(),
        })?;

    let mut active: profile::ActiveModel = existing.into();
    active.avatar_path = Set(avatar_path);
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await.map_err(Into::into)
}
