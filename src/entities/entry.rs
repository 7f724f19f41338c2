//! Logbook entry entity - a single signed count increment against a node.
//!
//! Entries are immutable log rows. A node's displayed total is derived from
//! its entries (and its descendants' entries) by the activity tree builder,
//! never stored back.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Logbook entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "logbook_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Node this entry counts against
    pub node_id: i64,
    /// Signed count delta, typically +1 or -1, never 0
    pub count: i32,
    /// Residency year the activity belongs to (R1..R5), if recorded
    pub residency_year: Option<i32>,
    /// Optional free-text annotation
    pub notes: Option<String>,
    /// When the entry was logged
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Entry and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one node
    #[sea_orm(
        belongs_to = "super::node::Entity",
        from = "Column::NodeId",
        to = "super::node::Column::Id"
    )]
    Node,
    /// An entry may back one calendar event
    #[sea_orm(has_many = "super::event::Entity")]
    Events,
}

impl Related<super::node::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Node.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
