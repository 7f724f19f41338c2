//! Rotation business logic - hospital rotation periods.
//!
//! Provides CRUD operations for rotations plus the dependent sequence used
//! by the rotation registration flow (update the contact phone, then create
//! the rotation). All functions are async and return Result types for error
//! handling.

use crate::{
    entities::{Rotation, profile, rotation},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Arguments for creating a rotation.
#[derive(Debug, Clone)]
pub struct CreateRotationArgs {
    /// Hospital where the rotation takes place
    pub hospital_name: String,
    /// Specialty being rotated through
    pub specialty: String,
    /// Department or unit, if recorded
    pub department: Option<String>,
    /// First day of the rotation
    pub start_date: NaiveDate,
    /// Last day, None while open-ended
    pub end_date: Option<NaiveDate>,
    /// Optional free-text annotation
    pub notes: Option<String>,
}

/// Arguments for a partial rotation update. A `None` field is left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateRotationArgs {
    /// New hospital name
    pub hospital_name: Option<String>,
    /// New specialty
    pub specialty: Option<String>,
    /// New department
    pub department: Option<String>,
    /// New start date
    pub start_date: Option<NaiveDate>,
    /// New end date
    pub end_date: Option<NaiveDate>,
    /// New notes
    pub notes: Option<String>,
}

fn validate_period(start_date: NaiveDate, end_date: Option<NaiveDate>) -> Result<()> {
    if let Some(end) = end_date {
        if end < start_date {
            return Err(Error::Config {
                message: format!("Rotation cannot end ({end}) before it starts ({start_date})"),
            });
        }
    }
    Ok(())
}

/// Creates a new rotation for a user, performing input validation.
pub async fn create_rotation(
    db: &DatabaseConnection,
    user_id: &str,
    args: CreateRotationArgs,
) -> Result<rotation::Model> {
    if args.hospital_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Hospital name cannot be empty".to_string(),
        });
    }
    if args.specialty.trim().is_empty() {
        return Err(Error::Config {
            message: "Specialty cannot be empty".to_string(),
        });
    }
    validate_period(args.start_date, args.end_date)?;

    let model = rotation::ActiveModel {
        user_id: Set(user_id.to_string()),
        hospital_name: Set(args.hospital_name.trim().to_string()),
        specialty: Set(args.specialty.trim().to_string()),
        department: Set(args.department),
        start_date: Set(args.start_date),
        end_date: Set(args.end_date),
        notes: Set(args.notes),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Retrieves all rotations for a user, newest start date first.
pub async fn get_rotations_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<rotation::Model>> {
    Rotation::find()
        .filter(rotation::Column::UserId.eq(user_id))
        .order_by_desc(rotation::Column::StartDate)
        .order_by_desc(rotation::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a rotation by its unique ID.
pub async fn get_rotation_by_id(
    db: &DatabaseConnection,
    rotation_id: i64,
) -> Result<Option<rotation::Model>> {
    Rotation::find_by_id(rotation_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update to an existing rotation.
///
/// The resulting period is validated as a whole, so an update cannot leave
/// a rotation ending before it starts.
pub async fn update_rotation(
    db: &DatabaseConnection,
    rotation_id: i64,
    args: UpdateRotationArgs,
) -> Result<rotation::Model> {
    let existing = get_rotation_by_id(db, rotation_id)
        .await?
        .ok_or(Error::RotationNotFound { id: rotation_id })?;

    let start_date = args.start_date.unwrap_or(existing.start_date);
    let end_date = args.end_date.or(existing.end_date);
    validate_period(start_date, end_date)?;

    let mut active: rotation::ActiveModel = existing.into();
    if let Some(hospital_name) = args.hospital_name {
        active.hospital_name = Set(hospital_name);
    }
    if let Some(specialty) = args.specialty {
        active.specialty = Set(specialty);
    }
    if let Some(department) = args.department {
        active.department = Set(Some(department));
    }
    active.start_date = Set(start_date);
    if args.end_date.is_some() {
        active.end_date = Set(end_date);
    }
    if let Some(notes) = args.notes {
        active.notes = Set(Some(notes));
    }

    active.update(db).await.map_err(Into::into)
}

/// Deletes a rotation.
pub async fn delete_rotation(db: &DatabaseConnection, rotation_id: i64) -> Result<()> {
    let existing = get_rotation_by_id(db, rotation_id)
        .await?
        .ok_or(Error::RotationNotFound { id: rotation_id })?;
    existing.delete(db).await?;
    Ok(())
}

/// Registers a rotation together with an updated contact phone.
///
/// Two independent requests issued in order: the phone update first, then
/// the rotation insert. No transaction ties them together; if the second
/// call fails the phone update stays applied and the caller sees the error.
pub async fn register_rotation_with_contact(
    db: &DatabaseConnection,
    user_id: &str,
    phone: String,
    args: CreateRotationArgs,
) -> Result<(profile::Model, rotation::Model)> {
    let updated_profile = crate::core::profile::update_phone(db, user_id, Some(phone)).await?;
    let created = create_rotation(db, user_id, args).await?;

    info!(
        user_id,
        rotation_id = created.id,
        "Registered rotation with updated contact phone"
    );
    Ok((updated_profile, created))
}
