use serde::{Deserialize, Serialize};

/// A single task in the list.
///
/// Serializes to the stored blob's camelCase record form. `date` is an ISO
/// `YYYY-MM-DD` string with `""` standing in for "no date"; the stored form
/// never carries a null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique id, immutable once assigned
    pub id: String,
    /// Trimmed title text (never empty for tasks created through the store)
    pub title: String,
    /// Optional due date, `""` when absent
    #[serde(default)]
    pub date: String,
    /// Completion flag
    #[serde(default)]
    pub done: bool,
    /// Creation timestamp in epoch milliseconds, set once
    pub created_at: i64,
    /// Manual sort position; dense `0..N-1` after a committed reorder
    pub order: i64,
}
