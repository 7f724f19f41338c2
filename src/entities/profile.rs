//! Profile entity - one resident's account details.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// User id, shared with every user-scoped table
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Display name
    pub full_name: String,
    /// Contact phone number, if provided
    pub phone: Option<String>,
    /// Current residency year (R1..R5), if provided
    pub residency_year: Option<i32>,
    /// Specialty being trained in, if provided
    pub specialty: Option<String>,
    /// Object storage path of the avatar image, if uploaded
    pub avatar_path: Option<String>,
    /// When the profile was last modified
    pub updated_at: DateTimeUtc,
}

/// Profile has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
