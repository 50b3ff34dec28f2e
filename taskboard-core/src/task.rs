//! The task record and its normalisation rules.
//!
//! Task files on disk are JSON objects using the field names `title`,
//! `description`, `priority`, `due-date`, `pinned`, `tags` and `progress`.
//! Deserialisation is lenient about how values are spelled (a `"true"`
//! string for `pinned`, a comma-separated string for `tags`) but the
//! resulting [`Task`] only ever holds normalised values: a real boolean and
//! trimmed, non-empty tags.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Date-time layouts accepted for `due-date` besides RFC 3339 and plain dates.
///
/// Values without an offset are read as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// A single task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task title, matched by the title filter.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Numeric priority. Its meaning (urgent-high or urgent-low) is only
    /// fixed by the sort direction a caller asks for.
    #[serde(default, deserialize_with = "lenient::priority")]
    pub priority: i64,
    /// Due date as written by the user; parsed on demand by
    /// [`Task::due_timestamp`].
    #[serde(
        rename = "due-date",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<String>,
    /// Pinned tasks always list ahead of unpinned ones.
    #[serde(default, deserialize_with = "lenient::pinned")]
    pub pinned: bool,
    /// Trimmed tag tokens, matched exactly by the tag filter.
    #[serde(default, deserialize_with = "lenient::tags")]
    pub tags: Vec<String>,
    /// Progress indicator, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
}

impl Task {
    /// Creates an unpinned task with the given title and every other field
    /// at its default.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: 0,
            due_date: None,
            pinned: false,
            tags: Vec::new(),
            progress: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the raw due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the pinned flag.
    #[must_use]
    pub const fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Replaces the tags, trimming each one and dropping empty tokens.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags);
        self
    }

    /// Sets the progress value.
    #[must_use]
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Returns the due date as milliseconds since the Unix epoch, or `None`
    /// when it is absent or cannot be parsed.
    #[must_use]
    pub fn due_timestamp(&self) -> Option<i64> {
        self.due_date.as_deref().and_then(parse_due_date)
    }

    /// Returns `true` if one of the tags is exactly `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Opaque progress value: whatever the task file holds.
///
/// Numbers and text are the usual cases; any other JSON value (a boolean,
/// an object) is kept as-is so an odd progress field never fails a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Progress {
    /// Numeric progress such as `50`.
    Number(f64),
    /// Textual progress such as `"half done"`.
    Text(String),
    /// Anything else, rendered as compact JSON.
    Other(serde_json::Value),
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(t) => f.write_str(t),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Splits comma-separated tag input into trimmed tokens.
///
/// Empty tokens (from `"a,,b"` or a blank input) are dropped.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}

fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parses a due date into milliseconds since the Unix epoch.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` (UTC midnight) and
/// `YYYY-MM-DDTHH:MM[:SS]` (UTC).
#[must_use]
pub fn parse_due_date(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis());
    }
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Field deserialisers that coerce loosely-typed input into the strict model.
mod lenient {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrText {
        Bool(bool),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrText {
        Int(i64),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrText {
        List(Vec<String>),
        Text(String),
    }

    /// `true`, or the literal text `"true"`; anything else is unpinned.
    pub fn pinned<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Option::<BoolOrText>::deserialize(d)? {
            Some(BoolOrText::Bool(b)) => b,
            Some(BoolOrText::Text(t)) => t == "true",
            None => false,
        })
    }

    pub fn priority<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        match Option::<IntOrText>::deserialize(d)? {
            Some(IntOrText::Int(n)) => Ok(n),
            Some(IntOrText::Text(t)) => t
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid priority {t:?}"))),
            None => Ok(0),
        }
    }

    pub fn tags<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Option::<ListOrText>::deserialize(d)? {
            Some(ListOrText::List(list)) => super::normalize_tags(list),
            Some(ListOrText::Text(t)) => super::parse_tags(&t),
            None => Vec::new(),
        })
    }
}
