//! Peer review entity - a rating left by one resident for another.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Peer review database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "peer_reviews")]
pub struct Model {
    /// Unique identifier for the review
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Resident who wrote the review
    pub reviewer_id: String,
    /// Resident being reviewed
    pub reviewee_id: String,
    /// Rotation the review refers to, if any
    pub rotation_id: Option<i64>,
    /// Rating from 1 (worst) to 5 (best)
    pub rating: i32,
    /// Optional free-text comments
    pub comments: Option<String>,
    /// When the review was submitted
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Review and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each review may refer to one rotation
    #[sea_orm(
        belongs_to = "super::rotation::Entity",
        from = "Column::RotationId",
        to = "super::rotation::Column::Id"
    )]
    Rotation,
}

impl Related<super::rotation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rotation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
