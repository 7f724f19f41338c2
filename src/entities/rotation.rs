//! Rotation entity - a hospital rotation period for one resident.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rotation database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rotations")]
pub struct Model {
    /// Unique identifier for the rotation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Resident this rotation belongs to
    pub user_id: String,
    /// Hospital where the rotation takes place
    pub hospital_name: String,
    /// Specialty being rotated through
    pub specialty: String,
    /// Department or unit, if recorded
    pub department: Option<String>,
    /// First day of the rotation
    pub start_date: Date,
    /// Last day of the rotation, None while open-ended
    pub end_date: Option<Date>,
    /// Optional free-text annotation
    pub notes: Option<String>,
    /// When the rotation was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Rotation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One rotation may have many peer reviews attached
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
