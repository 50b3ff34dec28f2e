//! Core task model for Taskboard: the task record, filtering, and the
//! pinned-first ordering engine. Nothing in this crate performs I/O.

pub mod filter;
pub mod order;
pub mod task;

pub use filter::{TaskFilter, filter};
pub use order::{SortDirection, SortKey, SortSpec, UnknownSortParam, order};
pub use task::{Progress, Task, parse_due_date, parse_tags};
