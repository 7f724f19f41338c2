//! Shift entity - a scheduled duty day (guardia) for one resident.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shift database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shifts")]
pub struct Model {
    /// Unique identifier for the shift
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Resident this shift belongs to
    pub user_id: String,
    /// Calendar date of the shift
    pub shift_date: Date,
    /// Kind of duty: `"guardia"`, `"saliente"`, `"refuerzo"`, ...
    pub shift_type: String,
    /// Where the shift takes place, if recorded
    pub location: Option<String>,
    /// Optional free-text annotation
    pub notes: Option<String>,
    /// When the shift was scheduled
    pub created_at: DateTimeUtc,
}

/// Shift has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
