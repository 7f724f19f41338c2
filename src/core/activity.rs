//! Activity tree aggregation for the logbook.
//!
//! Converts the flat node and entry lists of one user into a rooted forest
//! where every node carries a computed `total_count`. The aggregation is a
//! pure function of its inputs and is re-derived on every data refresh; the
//! totals are never written back to the database.
//!
//! Counting rule: a leaf node's total is the sum of its own entries' counts.
//! A node with at least one child reports the sum of its children's totals
//! and its own directly attached entries are excluded from the displayed
//! total. Totals may be negative; there is no clamping.

use crate::entities::{entry, node};
use std::collections::HashMap;

/// One node of the aggregated activity forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityNode {
    /// Database id of the underlying node
    pub id: i64,
    /// Node name
    pub name: String,
    /// Free-text goal, if set
    pub goal: Option<String>,
    /// Persisted sibling order
    pub position: i32,
    /// Aggregated activity count (see module docs for the rule)
    pub total_count: i64,
    /// Direct children, ordered by position then id
    pub children: Vec<ActivityNode>,
}

/// Where a node hangs in the forest once its parent reference is resolved.
///
/// Kept as an explicit step so the dangling-parent case stays visible: a
/// `Missing` parent promotes the node to a root instead of dropping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParentLink {
    /// No parent reference: a root section
    Root,
    /// Parent reference resolves to a known node
    Found(i64),
    /// Parent reference does not resolve: treated as a root
    Missing,
}

fn resolve_parent(node: &node::Model, known: &HashMap<i64, usize>) -> ParentLink {
    match node.parent_node_id {
        None => ParentLink::Root,
        Some(parent_id) if known.contains_key(&parent_id) => ParentLink::Found(parent_id),
        Some(_) => ParentLink::Missing,
    }
}

/// Builds the aggregated activity forest from flat node and entry lists.
///
/// Both inputs are unordered and may be empty. Roots and children are
/// returned in ascending `position` order (ties broken by id). A node with
/// zero entries and zero children has `total_count = 0`.
#[must_use]
pub fn build_activity_tree(nodes: &[node::Model], entries: &[entry::Model]) -> Vec<ActivityNode> {
    // Index every node by id
    let index: HashMap<i64, usize> = nodes
        .iter()
        .enumerate()
        .map(|(position, n)| (n.id, position))
        .collect();

    // Sum each node's directly attached entry counts
    let mut direct_counts: HashMap<i64, i64> = HashMap::new();
    for entry in entries {
        *direct_counts.entry(entry.node_id).or_insert(0) += i64::from(entry.count);
    }

    // Resolve every parent reference and group children
    let mut roots: Vec<&node::Model> = Vec::new();
    let mut children_of: HashMap<i64, Vec<&node::Model>> = HashMap::new();
    for n in nodes {
        match resolve_parent(n, &index) {
            ParentLink::Root | ParentLink::Missing => roots.push(n),
            ParentLink::Found(parent_id) => children_of.entry(parent_id).or_default().push(n),
        }
    }

    roots.sort_by_key(|n| (n.position, n.id));
    for siblings in children_of.values_mut() {
        siblings.sort_by_key(|n| (n.position, n.id));
    }

    roots
        .into_iter()
        .map(|n| assemble(n, &direct_counts, &children_of))
        .collect()
}

/// Bottom-up assembly: children are built first, then the parent's total is
/// either its direct count (leaf) or the sum of the children's totals.
fn assemble(
    node: &node::Model,
    direct_counts: &HashMap<i64, i64>,
    children_of: &HashMap<i64, Vec<&node::Model>>,
) -> ActivityNode {
    let children: Vec<ActivityNode> = children_of
        .get(&node.id)
        .map(|siblings| {
            siblings
                .iter()
                .map(|child| assemble(child, direct_counts, children_of))
                .collect()
        })
        .unwrap_or_default();

    let total_count = if children.is_empty() {
        direct_counts.get(&node.id).copied().unwrap_or(0)
    } else {
        children.iter().map(|c| c.total_count).sum()
    };

    ActivityNode {
        id: node.id,
        name: node.name.clone(),
        goal: node.goal.clone(),
        position: node.position,
        total_count,
        children,
    }
}
