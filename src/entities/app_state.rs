//! App state entity - Stores key-value pairs for ambient application state.
//! Used for storing the cached active user id and other values that must
//! survive restarts without a dedicated table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// App state database model - stores key-value pairs
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_state")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// State key (e.g. `"active_user_id"`)
    pub key: String,
    /// State value stored as string
    pub value: String,
    /// When this value was last modified
    pub updated_at: DateTime,
}

/// `AppState` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
