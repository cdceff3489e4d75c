use std::fmt;

/// Completion filter applied to the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Open,
    Done,
}

impl FilterMode {
    /// Parse a control value ("all", "open", "done") into a filter mode.
    pub fn parse_mode(s: &str) -> Option<FilterMode> {
        match s {
            "all" => Some(FilterMode::All),
            "open" => Some(FilterMode::Open),
            "done" => Some(FilterMode::Done),
            _ => None,
        }
    }

    /// Whether a task with the given completion flag passes this filter.
    pub fn keeps(self, done: bool) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Open => !done,
            FilterMode::Done => done,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::All => write!(f, "all"),
            FilterMode::Open => write!(f, "open"),
            FilterMode::Done => write!(f, "done"),
        }
    }
}

/// Sort applied to the projection after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Ascending by the manual `order` rank
    Manual,
    /// Ascending by creation time
    #[default]
    CreatedAsc,
    /// Descending by creation time
    CreatedDesc,
    /// Ascending by date, dateless tasks first
    DateAsc,
    /// Descending by date, dateless tasks last
    DateDesc,
}

impl SortMode {
    /// Parse a control value into a sort mode.
    pub fn parse_mode(s: &str) -> Option<SortMode> {
        match s {
            "manual" => Some(SortMode::Manual),
            "created-asc" => Some(SortMode::CreatedAsc),
            "created-desc" => Some(SortMode::CreatedDesc),
            "date-asc" => Some(SortMode::DateAsc),
            "date-desc" => Some(SortMode::DateDesc),
            _ => None,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Manual => write!(f, "manual"),
            SortMode::CreatedAsc => write!(f, "created-asc"),
            SortMode::CreatedDesc => write!(f, "created-desc"),
            SortMode::DateAsc => write!(f, "date-asc"),
            SortMode::DateDesc => write!(f, "date-desc"),
        }
    }
}
