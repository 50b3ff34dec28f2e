//! Taskboard server library.
//!
//! Exposes the configuration, task loader, in-memory store, and HTTP routes
//! for use by the `taskboard` binary and by tests.

pub mod config;
pub mod form;
pub mod loader;
pub mod render;
pub mod routes;
pub mod server;
pub mod store;
