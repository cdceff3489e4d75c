//! Core engine for a single-list task manager: an owned task store, a
//! fail-soft JSON persistence layer, and a pure view pipeline (search →
//! filter → stable sort) with drag-and-drop manual ordering.
//!
//! The rendering layer is an external collaborator: it drives the mutation
//! entry points on [`TaskApp`] and redraws from
//! [`TaskApp::current_projection`]. Nothing in this crate touches
//! presentation.

pub mod app;
pub mod io;
pub mod model;
pub mod ops;
pub mod store;

pub use app::TaskApp;
pub use model::{FilterMode, SortMode, Task};
pub use store::{StoreError, TaskEdit, TaskStore};
