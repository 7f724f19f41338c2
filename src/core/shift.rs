//! Shift business logic - duty scheduling (guardias).
//!
//! Provides CRUD operations for shifts and the calendar-month queries the
//! schedule screen is built on.

use crate::{
    entities::{Shift, shift},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::HashMap;

/// First day of the given month and first day of the following month.
///
/// The pair bounds the month as a half-open interval for date queries.
fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| Error::Config {
        message: format!("Invalid month: {year}-{month}"),
    })?;

    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| Error::Config {
        message: format!("Invalid month: {year}-{month}"),
    })?;

    Ok((first, next_first))
}

/// Creates a new shift for a user, performing input validation.
pub async fn create_shift(
    db: &DatabaseConnection,
    user_id: &str,
    shift_date: NaiveDate,
    shift_type: String,
    location: Option<String>,
    notes: Option<String>,
) -> Result<shift::Model> {
    if shift_type.trim().is_empty() {
        return Err(Error::Config {
            message: "Shift type cannot be empty".to_string(),
        });
    }

    let model = shift::ActiveModel {
        user_id: Set(user_id.to_string()),
        shift_date: Set(shift_date),
        shift_type: Set(shift_type.trim().to_string()),
        location: Set(location),
        notes: Set(notes),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Retrieves a user's shifts within one calendar month, in date order.
pub async fn get_shifts_for_month(
    db: &DatabaseConnection,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<Vec<shift::Model>> {
    let (first, next_first) = month_bounds(year, month)?;

    Shift::find()
        .filter(shift::Column::UserId.eq(user_id))
        .filter(shift::Column::ShiftDate.gte(first))
        .filter(shift::Column::ShiftDate.lt(next_first))
        .order_by_asc(shift::Column::ShiftDate)
        .order_by_asc(shift::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of shifts per type within one calendar month.
pub async fn count_shifts_by_type(
    db: &DatabaseConnection,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<HashMap<String, usize>> {
    let shifts = get_shifts_for_month(db, user_id, year, month).await?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for s in shifts {
        *counts.entry(s.shift_type).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Deletes a shift.
pub async fn delete_shift(db: &DatabaseConnection, shift_id: i64) -> Result<()> {
    let existing = Shift::find_by_id(shift_id)
        .one(db)
        .await?
        .ok_or(Error::ShiftNotFound { id: shift_id })?;
    existing.delete(db).await?;
    Ok(())
}
