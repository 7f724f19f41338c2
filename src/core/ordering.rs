//! Manual ordering of logbook nodes.
//!
//! The mobile origin of this feature was a drag gesture; here the same
//! persisted-order contract is exposed as explicit operations: set the full
//! order of the root sections, or move one node up or down among its
//! siblings. Every reorder rewrites `position` as 0..n for all affected
//! siblings in a single transaction, so a fetch after a reorder reproduces
//! exactly the requested order.

use crate::{
    entities::{Node, node},
    errors::{Error, Result},
};
use sea_orm::{
    ConnectionTrait, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr,
};
use std::collections::HashSet;
use tracing::debug;

/// Rewrites positions 0..n following the order of `ids`.
async fn write_positions<C>(db: &C, ids: &[i64]) -> Result<()>
where
    C: ConnectionTrait,
{
    for (position, id) in ids.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let position = position as i32;
        Node::update_many()
            .col_expr(node::Column::Position, Expr::value(position))
            .filter(node::Column::Id.eq(*id))
            .exec(db)
            .await?;
    }
    Ok(())
}

/// Fetches the ids of a user's root sections in display order.
async fn root_ids(db: &DatabaseConnection, user_id: &str) -> Result<Vec<i64>> {
    Ok(Node::find()
        .filter(node::Column::UserId.eq(user_id))
        .filter(node::Column::ParentNodeId.is_null())
        .order_by_asc(node::Column::Position)
        .order_by_asc(node::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|n| n.id)
        .collect())
}

/// Persists a new order for a user's root sections.
///
/// `ordered_ids` must be a permutation of the current root set; anything
/// else (missing id, unknown id, duplicate) is rejected before any write.
pub async fn reorder_root_nodes(
    db: &DatabaseConnection,
    user_id: &str,
    ordered_ids: &[i64],
) -> Result<()> {
    let current = root_ids(db, user_id).await?;
    let current_set: HashSet<i64> = current.iter().copied().collect();
    let requested_set: HashSet<i64> = ordered_ids.iter().copied().collect();

    if requested_set.len() != ordered_ids.len() {
        return Err(Error::ReorderMismatch {
            message: "duplicate node id in requested order".to_string(),
        });
    }
    if requested_set != current_set {
        return Err(Error::ReorderMismatch {
            message: format!(
                "requested {} ids, current root set has {}",
                ordered_ids.len(),
                current.len()
            ),
        });
    }

    let txn = db.begin().await?;
    write_positions(&txn, ordered_ids).await?;
    txn.commit().await?;

    debug!(user_id, count = ordered_ids.len(), "Persisted root order");
    Ok(())
}

/// Sibling ids of a node (the node included), in display order.
async fn sibling_ids(db: &DatabaseConnection, target: &node::Model) -> Result<Vec<i64>> {
    Ok(Node::find()
        .filter(node::Column::UserId.eq(target.user_id.clone()))
        .filter(match target.parent_node_id {
            Some(parent_id) => node::Column::ParentNodeId.eq(parent_id),
            None => node::Column::ParentNodeId.is_null(),
        })
        .order_by_asc(node::Column::Position)
        .order_by_asc(node::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|n| n.id)
        .collect())
}

/// Swaps a node with the sibling before it. Returns false when the node is
/// already first.
pub async fn move_node_up(db: &DatabaseConnection, node_id: i64) -> Result<bool> {
    swap_with_neighbor(db, node_id, Direction::Up).await
}

/// Swaps a node with the sibling after it. Returns false when the node is
/// already last.
pub async fn move_node_down(db: &DatabaseConnection, node_id: i64) -> Result<bool> {
    swap_with_neighbor(db, node_id, Direction::Down).await
}

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Down,
}

async fn swap_with_neighbor(
    db: &DatabaseConnection,
    node_id: i64,
    direction: Direction,
) -> Result<bool> {
    let target = Node::find_by_id(node_id)
        .one(db)
        .await?
        .ok_or(Error::NodeNotFound { id: node_id })?;

    let mut siblings = sibling_ids(db, &target).await?;
    let Some(index) = siblings.iter().position(|id| *id == node_id) else {
        return Err(Error::NodeNotFound { id: node_id });
    };

    let neighbor = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => (index + 1 < siblings.len()).then_some(index + 1),
    };
    let Some(neighbor) = neighbor else {
        return Ok(false);
    };

    siblings.swap(index, neighbor);

    let txn = db.begin().await?;
    write_positions(&txn, &siblings).await?;
    txn.commit().await?;
    Ok(true)
}
