//! Logbook event entity - a dated occurrence backed by a single entry.
//!
//! Every event is backed by exactly one entry with `count = 1`; deleting an
//! event deletes its backing entry so the node totals stay consistent.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Logbook event database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "logbook_events")]
pub struct Model {
    /// Unique identifier for the event
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The backing entry (always `count = 1`)
    pub entry_id: i64,
    /// Node this event counts against
    pub node_id: i64,
    /// Calendar date of the occurrence
    pub event_date: Date,
    /// Short title (e.g. "Apendicectomía laparoscópica")
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Where it took place, if recorded
    pub location: Option<String>,
}

/// Defines relationships between Event and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each event is backed by one entry
    #[sea_orm(
        belongs_to = "super::entry::Entity",
        from = "Column::EntryId",
        to = "super::entry::Column::Id"
    )]
    Entry,
    /// Each event belongs to one node
    #[sea_orm(
        belongs_to = "super::node::Entity",
        from = "Column::NodeId",
        to = "super::node::Column::Id"
    )]
    Node,
}

impl Related<super::entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entry.def()
    }
}

impl Related<super::node::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Node.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
