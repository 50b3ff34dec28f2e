//! Pinned-first ordering with an optional secondary sort.
//!
//! [`order`] always places pinned tasks ahead of unpinned ones. When a
//! [`SortSpec`] is given, tasks with the same pinned state are further
//! ordered by due date or priority. The sort is stable, so ties keep their
//! input order.
//!
//! Every comparator here is a total order. Due dates compare by their parsed
//! timestamp; a task whose due date is missing or unparseable sorts after
//! all dated tasks when ascending, and therefore before them when
//! descending, and is tied with other undated tasks.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::task::Task;

/// Field used for the secondary sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Parsed `due-date`.
    DueDate,
    /// Numeric `priority`.
    Priority,
}

impl SortKey {
    /// The query-string spelling of this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DueDate => "due-date",
            Self::Priority => "priority",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortParam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "due-date" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            other => Err(UnknownSortParam(other.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Earlier dates / lower priorities first.
    Asc,
    /// Later dates / higher priorities first.
    Desc,
}

impl SortDirection {
    /// The query-string spelling of this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = UnknownSortParam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(UnknownSortParam(other.to_string())),
        }
    }
}

/// A sort key or direction that is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort parameter: {0:?}")]
pub struct UnknownSortParam(pub String);

/// A requested secondary sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    /// Field to sort on.
    pub key: SortKey,
    /// Direction to sort in.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Creates a sort spec.
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Builds a spec from raw `sort-by` / `sort-order` values.
    ///
    /// Returns `None` unless both are present and recognised; a malformed
    /// request simply gets no secondary ordering.
    #[must_use]
    pub fn from_params(key: Option<&str>, direction: Option<&str>) -> Option<Self> {
        let key = key?.parse().ok()?;
        let direction = direction?.parse().ok()?;
        Some(Self::new(key, direction))
    }

    /// Compares two tasks by this spec's key and direction, ignoring
    /// `pinned`.
    #[must_use]
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = match self.key {
            SortKey::DueDate => compare_due_dates(a, b),
            SortKey::Priority => a.priority.cmp(&b.priority),
        };
        self.direction.apply(ordering)
    }
}

/// Returns a new, ordered copy of `tasks`.
///
/// Pinned tasks come first. Within each pinned group, `spec` (if any)
/// decides the order; otherwise input order is kept.
#[must_use]
pub fn order(tasks: &[Task], spec: Option<SortSpec>) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sort_in_place(&mut sorted, spec);
    sorted
}

/// In-place variant of [`order`].
pub fn sort_in_place(tasks: &mut [Task], spec: Option<SortSpec>) {
    tasks.sort_by(|a, b| compare(a, b, spec));
}

/// The full comparator: pinned first, then the secondary spec.
#[must_use]
pub fn compare(a: &Task, b: &Task, spec: Option<SortSpec>) -> Ordering {
    b.pinned
        .cmp(&a.pinned)
        .then_with(|| spec.map_or(Ordering::Equal, |s| s.compare(a, b)))
}

/// Ascending comparison of due dates by numeric timestamp.
fn compare_due_dates(a: &Task, b: &Task) -> Ordering {
    match (a.due_timestamp(), b.due_timestamp()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
