use regex::Regex;

use crate::model::{FilterMode, SortMode, Task};

/// Compute the display projection: search, then filter, then a stable sort.
///
/// Pure over its inputs; the result borrows the caller's records rather
/// than copying them. Equal sort keys keep their input order, which matters
/// because loaded data can carry duplicate manual ranks.
pub fn project<'a>(
    tasks: &'a [Task],
    query: &str,
    filter: FilterMode,
    sort: SortMode,
) -> Vec<&'a Task> {
    let matcher = title_matcher(query);

    let mut view: Vec<&Task> = tasks
        .iter()
        .filter(|t| matcher.as_ref().is_none_or(|re| re.is_match(&t.title)))
        .filter(|t| filter.keeps(t.done))
        .collect();

    match sort {
        SortMode::Manual => view.sort_by_key(|t| t.order),
        SortMode::CreatedAsc => view.sort_by_key(|t| t.created_at),
        SortMode::CreatedDesc => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        // Empty dates compare lexicographically smallest: dateless tasks
        // lead ascending order and trail descending order
        SortMode::DateAsc => view.sort_by(|a, b| a.date.cmp(&b.date)),
        SortMode::DateDesc => view.sort_by(|a, b| b.date.cmp(&a.date)),
    }

    view
}

/// Case-insensitive literal matcher for the trimmed query. `None` means a
/// blank query: every title matches.
fn title_matcher(query: &str) -> Option<Regex> {
    let needle = query.trim();
    if needle.is_empty() {
        return None;
    }
    // The pattern is an escaped literal, so the build cannot fail
    Regex::new(&format!("(?i){}", regex::escape(needle))).ok()
}
