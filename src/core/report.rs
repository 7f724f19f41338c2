//! Goal progress reporting over the activity forest.
//!
//! Node goals are free text in the logbook; when a goal parses as a number
//! it can be turned into a progress figure against the node's aggregated
//! total. All functions here are pure and operate on an already-built
//! activity forest.

use crate::core::activity::ActivityNode;

/// Progress of one node against its numeric goal.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeProgress {
    /// Node name
    pub name: String,
    /// Aggregated activity count
    pub total_count: i64,
    /// Parsed numeric goal
    pub goal: i64,
    /// Progress as a percentage (may exceed 100, may be negative)
    pub progress_percent: f64,
}

/// Parses a free-text goal as a number, None when it is not numeric.
#[must_use]
pub fn parse_goal(goal: Option<&str>) -> Option<i64> {
    goal.and_then(|g| g.trim().parse::<i64>().ok())
}

/// Progress percentage of a total against a goal.
///
/// A zero or negative goal yields 0: there is nothing meaningful to measure
/// against.
#[must_use]
pub fn calculate_goal_progress(total_count: i64, goal: i64) -> f64 {
    if goal <= 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let progress = (total_count as f64 / goal as f64) * 100.0;
    progress
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80.0%`
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // Cast safety: clamped_progress ∈ [0, 100], length is small (10-20).
    // Result is mathematically in [0, length], truncation/sign loss intentional for display.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {progress_percent:.1}%")
}

/// Collects progress for every node in the forest that has a numeric goal.
///
/// Walks the forest depth-first, so a section appears before its
/// subsections in the result.
#[must_use]
pub fn collect_goal_progress(roots: &[ActivityNode]) -> Vec<NodeProgress> {
    let mut progress = Vec::new();
    for root in roots {
        collect_into(root, &mut progress);
    }
    progress
}

fn collect_into(node: &ActivityNode, progress: &mut Vec<NodeProgress>) {
    if let Some(goal) = parse_goal(node.goal.as_deref()) {
        progress.push(NodeProgress {
            name: node.name.clone(),
            total_count: node.total_count,
            goal,
            progress_percent: calculate_goal_progress(node.total_count, goal),
        });
    }
    for child in &node.children {
        collect_into(child, progress);
    }
}
