//! Logbook node entity - a category or subcategory in the activity logbook.
//!
//! Nodes form a forest per user: a node with `parent_node_id = None` is a
//! root section; every other node hangs off its parent. Siblings are shown
//! in ascending `position` order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Logbook node database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "logbook_nodes")]
pub struct Model {
    /// Unique identifier for the node
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owner of this node
    pub user_id: String,
    /// Parent node, None for root sections. A dangling reference is treated
    /// as a root by the tree builder rather than dropped.
    pub parent_node_id: Option<i64>,
    /// Human-readable name (e.g. "Cirugías", "Ecografías abdominales")
    pub name: String,
    /// Free-text target for this node (e.g. "50"), None when no goal is set
    pub goal: Option<String>,
    /// Ascending display order among siblings
    pub position: i32,
    /// When the node was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Node and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One node has many entries
    #[sea_orm(has_many = "super::entry::Entity")]
    Entries,
    /// One node has many events
    #[sea_orm(has_many = "super::event::Entity")]
    Events,
}

impl Related<super::entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
