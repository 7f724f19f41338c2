//! Logbook business logic - nodes, entries, and events.
//!
//! This module provides the CRUD operations behind the activity logbook:
//! creating categories and subcategories, logging counted entries, attaching
//! dated events, and removing whole subtrees. Event creation and deletion
//! and the cascading subtree delete each run inside a single database
//! transaction so a mid-sequence failure rolls back instead of leaving
//! orphan rows. All functions are async and return Result types for error
//! handling.

use crate::{
    core::activity::{ActivityNode, build_activity_tree},
    entities::{Entry, Event, Node, entry, event, node},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, warn};

/// Retrieves all logbook nodes for a user, ordered by position then id.
pub async fn get_nodes_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<node::Model>> {
    Node::find()
        .filter(node::Column::UserId.eq(user_id))
        .order_by_asc(node::Column::Position)
        .order_by_asc(node::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a node by its unique ID.
pub async fn get_node_by_id(db: &DatabaseConnection, node_id: i64) -> Result<Option<node::Model>> {
    Node::find_by_id(node_id).one(db).await.map_err(Into::into)
}

/// Next free position at the end of a sibling list.
async fn next_sibling_position<C>(db: &C, user_id: &str, parent: Option<i64>) -> Result<i32>
where
    C: ConnectionTrait,
{
    let last = Node::find()
        .filter(node::Column::UserId.eq(user_id))
        .filter(match parent {
            Some(parent_id) => node::Column::ParentNodeId.eq(parent_id),
            None => node::Column::ParentNodeId.is_null(),
        })
        .order_by_desc(node::Column::Position)
        .one(db)
        .await?;

    Ok(last.map_or(0, |n| n.position + 1))
}

/// Creates a new logbook node, appended at the end of its sibling order.
///
/// The parent, when given, must exist and belong to the same user. A node's
/// parent is fixed at creation; later updates only touch name and goal, so
/// the forest can never acquire a cycle.
pub async fn create_node(
    db: &DatabaseConnection,
    user_id: &str,
    parent_node_id: Option<i64>,
    name: String,
    goal: Option<String>,
) -> Result<node::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Node name cannot be empty".to_string(),
        });
    }

    if let Some(parent_id) = parent_node_id {
        let parent = Node::find_by_id(parent_id)
            .one(db)
            .await?
            .ok_or(Error::NodeNotFound { id: parent_id })?;
        if parent.user_id != user_id {
            return Err(Error::NodeNotFound { id: parent_id });
        }
    }

    let position = next_sibling_position(db, user_id, parent_node_id).await?;

    let model = node::ActiveModel {
        user_id: Set(user_id.to_string()),
        parent_node_id: Set(parent_node_id),
        name: Set(name.trim().to_string()),
        goal: Set(goal),
        position: Set(position),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    debug!(node_id = created.id, user_id, "Created logbook node");
    Ok(created)
}

/// Renames an existing node.
pub async fn rename_node(
    db: &DatabaseConnection,
    node_id: i64,
    name: String,
) -> Result<node::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Node name cannot be empty".to_string(),
        });
    }

    let existing = Node::find_by_id(node_id)
        .one(db)
        .await?
        .ok_or(Error::NodeNotFound { id: node_id })?;

    let mut active: node::ActiveModel = existing.into();
    active.name = Set(name.trim().to_string());
    active.update(db).await.map_err(Into::into)
}

/// Sets or clears a node's free-text goal.
pub async fn set_node_goal(
    db: &DatabaseConnection,
    node_id: i64,
    goal: Option<String>,
) -> Result<node::Model> {
    let existing = Node::find_by_id(node_id)
        .one(db)
        .await?
        .ok_or(Error::NodeNotFound { id: node_id })?;

    let mut active: node::ActiveModel = existing.into();
    active.goal = Set(goal);
    active.update(db).await.map_err(Into::into)
}

/// Creates an entry logging a signed count delta against a node.
///
/// A zero count is rejected: it would be an empty log row with no effect on
/// any total.
pub async fn create_entry(
    db: &DatabaseConnection,
    node_id: i64,
    count: i32,
    residency_year: Option<i32>,
    notes: Option<String>,
) -> Result<entry::Model> {
    if count == 0 {
        return Err(Error::InvalidCount { count });
    }

    Node::find_by_id(node_id)
        .one(db)
        .await?
        .ok_or(Error::NodeNotFound { id: node_id })?;

    let model = entry::ActiveModel {
        node_id: Set(node_id),
        count: Set(count),
        residency_year: Set(residency_year),
        notes: Set(notes),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Retrieves all entries attached to the given user's nodes.
pub async fn get_entries_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<entry::Model>> {
    let node_ids: Vec<i64> = get_nodes_for_user(db, user_id)
        .await?
        .into_iter()
        .map(|n| n.id)
        .collect();

    if node_ids.is_empty() {
        return Ok(Vec::new());
    }

    Entry::find()
        .filter(entry::Column::NodeId.is_in(node_ids))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetches a user's nodes and entries and aggregates them into the
/// activity forest consumed by the logbook screen.
pub async fn activity_forest(db: &DatabaseConnection, user_id: &str) -> Result<Vec<ActivityNode>> {
    let nodes = get_nodes_for_user(db, user_id).await?;
    let entries = get_entries_for_user(db, user_id).await?;
    Ok(build_activity_tree(&nodes, &entries))
}

/// Creates a dated event together with its backing `count = 1` entry.
///
/// Both rows are inserted in one database transaction: an event without its
/// backing entry (or the reverse) can never be observed.
pub async fn create_event(
    db: &DatabaseConnection,
    node_id: i64,
    event_date: NaiveDate,
    title: String,
    description: Option<String>,
    location: Option<String>,
    residency_year: Option<i32>,
) -> Result<(entry::Model, event::Model)> {
    if title.trim().is_empty() {
        return Err(Error::Config {
            message: "Event title cannot be empty".to_string(),
        });
    }

    Node::find_by_id(node_id)
        .one(db)
        .await?
        .ok_or(Error::NodeNotFound { id: node_id })?;

    let txn = db.begin().await?;

    let backing_entry = entry::ActiveModel {
        node_id: Set(node_id),
        count: Set(1),
        residency_year: Set(residency_year),
        notes: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let backing_entry = backing_entry.insert(&txn).await?;

    let event_model = event::ActiveModel {
        entry_id: Set(backing_entry.id),
        node_id: Set(node_id),
        event_date: Set(event_date),
        title: Set(title.trim().to_string()),
        description: Set(description),
        location: Set(location),
        ..Default::default()
    };
    let created_event = event_model.insert(&txn).await?;

    txn.commit().await?;

    info!(
        event_id = created_event.id,
        entry_id = backing_entry.id,
        node_id,
        "Created event with backing entry"
    );
    Ok((backing_entry, created_event))
}

/// Retrieves all events attached to a node, newest date first.
pub async fn get_events_for_node(
    db: &DatabaseConnection,
    node_id: i64,
) -> Result<Vec<event::Model>> {
    Event::find()
        .filter(event::Column::NodeId.eq(node_id))
        .order_by_desc(event::Column::EventDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an event and its backing entry in one transaction.
pub async fn delete_event(db: &DatabaseConnection, event_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let existing = Event::find_by_id(event_id)
        .one(&txn)
        .await?
        .ok_or(Error::EventNotFound { id: event_id })?;

    let entry_id = existing.entry_id;
    existing.delete(&txn).await?;
    Entry::delete_many()
        .filter(entry::Column::Id.eq(entry_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    debug!(event_id, entry_id, "Deleted event and backing entry");
    Ok(())
}

/// Deletes a node and every descendant node, entry, and event under it.
///
/// The subtree is collected breadth-first, then all events, entries, and
/// nodes are removed inside a single transaction. Returns the number of
/// nodes removed.
pub async fn delete_node_cascade(db: &DatabaseConnection, node_id: i64) -> Result<u64> {
    Node::find_by_id(node_id)
        .one(db)
        .await?
        .ok_or(Error::NodeNotFound { id: node_id })?;

    let txn = db.begin().await?;

    // Collect the whole subtree, level by level
    let mut subtree_ids: Vec<i64> = vec![node_id];
    let mut frontier: Vec<i64> = vec![node_id];
    while !frontier.is_empty() {
        let children: Vec<i64> = Node::find()
            .filter(node::Column::ParentNodeId.is_in(frontier.clone()))
            .all(&txn)
            .await?
            .into_iter()
            .map(|n| n.id)
            .collect();
        subtree_ids.extend(&children);
        frontier = children;
    }

    Event::delete_many()
        .filter(event::Column::NodeId.is_in(subtree_ids.clone()))
        .exec(&txn)
        .await?;
    Entry::delete_many()
        .filter(entry::Column::NodeId.is_in(subtree_ids.clone()))
        .exec(&txn)
        .await?;
    let deleted = Node::delete_many()
        .filter(node::Column::Id.is_in(subtree_ids.clone()))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    info!(
        node_id,
        nodes_removed = deleted.rows_affected,
        "Cascade-deleted logbook subtree"
    );
    Ok(deleted.rows_affected)
}

/// Seeds the default sections from config.toml for a user with an empty
/// logbook. A user who already has nodes is left untouched.
///
/// Returns the number of nodes created.
pub async fn seed_default_sections(
    db: &DatabaseConnection,
    user_id: &str,
    config: &crate::config::sections::Config,
) -> Result<usize> {
    let existing = Node::find()
        .filter(node::Column::UserId.eq(user_id))
        .one(db)
        .await?;
    if existing.is_some() {
        warn!(user_id, "Logbook already has nodes, skipping section seed");
        return Ok(0);
    }

    let txn = db.begin().await?;
    let now = chrono::Utc::now();
    let mut created = 0usize;

    for (section_index, section) in config.sections.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let section_position = section_index as i32;
        let root = node::ActiveModel {
            user_id: Set(user_id.to_string()),
            parent_node_id: Set(None),
            name: Set(section.name.clone()),
            goal: Set(section.goal.clone()),
            position: Set(section_position),
            created_at: Set(now),
            ..Default::default()
        };
        let root = root.insert(&txn).await?;
        created += 1;

        for (child_index, subsection) in section.subsections.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let child_position = child_index as i32;
            let child = node::ActiveModel {
                user_id: Set(user_id.to_string()),
                parent_node_id: Set(Some(root.id)),
                name: Set(subsection.name.clone()),
                goal: Set(subsection.goal.clone()),
                position: Set(child_position),
                created_at: Set(now),
                ..Default::default()
            };
            child.insert(&txn).await?;
            created += 1;
        }
    }

    txn.commit().await?;
    info!(user_id, created, "Seeded default logbook sections");
    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::sections::{Config, SectionConfig, SubsectionConfig};
    use crate::test_utils::{create_test_entry, create_test_node, setup_test_db};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_node_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_node(&db, "u1", None, String::new(), None).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = create_node(&db, "u1", None, "   ".to_string(), None).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = create_node(&db, "u1", Some(999), "Cirugías".to_string(), None).await;
        assert!(matches!(result.unwrap_err(), Error::NodeNotFound { id: 999 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_node_rejects_foreign_parent() -> Result<()> {
        let db = setup_test_db().await?;
        let other = create_test_node(&db, "other_user", None, "Suyas").await?;

        let result = create_node(&db, "u1", Some(other.id), "Mías".to_string(), None).await;
        assert!(matches!(result.unwrap_err(), Error::NodeNotFound { id: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_node_appends_positions() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_node(&db, "u1", None, "Cirugías".to_string(), None).await?;
        let second = create_node(&db, "u1", None, "Guardias".to_string(), None).await?;
        let child = create_node(&db, "u1", Some(first.id), "Abiertas".to_string(), None).await?;

        assert_eq!(first.position, 0);
        assert_eq!(second.position, 1);
        // Child positions are an independent sequence
        assert_eq!(child.position, 0);

        let listed = get_nodes_for_user(&db, "u1").await?;
        assert_eq!(listed.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_rename_and_goal_update() -> Result<()> {
        let db = setup_test_db().await?;
        let node = create_test_node(&db, "u1", None, "Cirugías").await?;

        let renamed = rename_node(&db, node.id, "Cirugías mayores".to_string()).await?;
        assert_eq!(renamed.name, "Cirugías mayores");

        let with_goal = set_node_goal(&db, node.id, Some("50".to_string())).await?;
        assert_eq!(with_goal.goal.as_deref(), Some("50"));

        let cleared = set_node_goal(&db, node.id, None).await?;
        assert_eq!(cleared.goal, None);

        let missing = rename_node(&db, 999, "x".to_string()).await;
        assert!(matches!(missing.unwrap_err(), Error::NodeNotFound { id: 999 }));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_entry_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let node = create_test_node(&db, "u1", None, "Ecografías").await?;

        let result = create_entry(&db, node.id, 0, None, None).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidCount { count: 0 }));

        let result = create_entry(&db, 999, 1, None, None).await;
        assert!(matches!(result.unwrap_err(), Error::NodeNotFound { id: 999 }));

        let created = create_entry(&db, node.id, -1, Some(2), None).await?;
        assert_eq!(created.count, -1);
        assert_eq!(created.residency_year, Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn test_activity_forest_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let root = create_test_node(&db, "u1", None, "Cirugías").await?;
        let child = create_test_node(&db, "u1", Some(root.id), "Laparoscópicas").await?;

        // Direct entries on the root are excluded once the child exists
        create_test_entry(&db, root.id, 5).await?;
        create_test_entry(&db, child.id, 1).await?;
        create_test_entry(&db, child.id, 1).await?;

        // Another user's logbook must not leak in
        let foreign = create_test_node(&db, "u2", None, "Ajena").await?;
        create_test_entry(&db, foreign.id, 10).await?;

        let forest = activity_forest(&db, "u1").await?;
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].total_count, 2);
        assert_eq!(forest[0].children[0].total_count, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_event_inserts_backing_entry() -> Result<()> {
        let db = setup_test_db().await?;
        let node = create_test_node(&db, "u1", None, "Cirugías").await?;

        let (backing, created) = create_event(
            &db,
            node.id,
            date(2025, 3, 14),
            "Apendicectomía".to_string(),
            Some("Urgencias".to_string()),
            Some("Quirófano 2".to_string()),
            Some(3),
        )
        .await?;

        assert_eq!(backing.count, 1);
        assert_eq!(backing.node_id, node.id);
        assert_eq!(created.entry_id, backing.id);
        assert_eq!(created.title, "Apendicectomía");

        let forest = activity_forest(&db, "u1").await?;
        assert_eq!(forest[0].total_count, 1);

        let events = get_events_for_node(&db, node.id).await?;
        assert_eq!(events.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_event_requires_title_and_node() -> Result<()> {
        let db = setup_test_db().await?;
        let node = create_test_node(&db, "u1", None, "Cirugías").await?;

        let result = create_event(&db, node.id, date(2025, 1, 1), " ".to_string(), None, None, None)
            .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = create_event(
            &db,
            999,
            date(2025, 1, 1),
            "Guardia".to_string(),
            None,
            None,
            None,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::NodeNotFound { id: 999 }));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_event_removes_backing_entry() -> Result<()> {
        let db = setup_test_db().await?;
        let node = create_test_node(&db, "u1", None, "Cirugías").await?;
        let (_, created) = create_event(
            &db,
            node.id,
            date(2025, 3, 14),
            "Apendicectomía".to_string(),
            None,
            None,
            None,
        )
        .await?;

        delete_event(&db, created.id).await?;

        let events = get_events_for_node(&db, node.id).await?;
        assert!(events.is_empty());
        let entries = get_entries_for_user(&db, "u1").await?;
        assert!(entries.is_empty());

        let missing = delete_event(&db, created.id).await;
        assert!(matches!(missing.unwrap_err(), Error::EventNotFound { id: _ }));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_node_cascade() -> Result<()> {
        let db = setup_test_db().await?;
        let root = create_test_node(&db, "u1", None, "Cirugías").await?;
        let child = create_test_node(&db, "u1", Some(root.id), "Laparoscópicas").await?;
        let grandchild = create_test_node(&db, "u1", Some(child.id), "Colecistectomías").await?;
        create_test_entry(&db, grandchild.id, 1).await?;
        create_event(
            &db,
            child.id,
            date(2025, 2, 2),
            "Sesión".to_string(),
            None,
            None,
            None,
        )
        .await?;

        let survivor = create_test_node(&db, "u1", None, "Guardias").await?;
        create_test_entry(&db, survivor.id, 2).await?;

        let removed = delete_node_cascade(&db, root.id).await?;
        assert_eq!(removed, 3);

        let remaining = get_nodes_for_user(&db, "u1").await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, survivor.id);

        // Entries and events of the subtree are gone, the survivor's remain
        let entries = get_entries_for_user(&db, "u1").await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].node_id, survivor.id);

        let result = delete_node_cascade(&db, root.id).await;
        assert!(matches!(result.unwrap_err(), Error::NodeNotFound { id: _ }));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_default_sections() -> Result<()> {
        let db = setup_test_db().await?;
        let config = Config {
            sections: vec![
                SectionConfig {
                    name: "Cirugías".to_string(),
                    goal: Some("250".to_string()),
                    subsections: vec![SubsectionConfig {
                        name: "Laparoscópicas".to_string(),
                        goal: None,
                    }],
                },
                SectionConfig {
                    name: "Guardias".to_string(),
                    goal: None,
                    subsections: vec![],
                },
            ],
        };

        let created = seed_default_sections(&db, "u1", &config).await?;
        assert_eq!(created, 3);

        let forest = activity_forest(&db, "u1").await?;
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].name, "Cirugías");
        assert_eq!(forest[0].goal.as_deref(), Some("250"));
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[1].name, "Guardias");

        // Second seed is a no-op
        let created_again = seed_default_sections(&db, "u1", &config).await?;
        assert_eq!(created_again, 0);
        assert_eq!(get_nodes_for_user(&db, "u1").await?.len(), 3);
        Ok(())
    }
}
