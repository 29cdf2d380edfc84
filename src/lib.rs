//! # Lystra Core
//!
//! Core business logic for Lystra to-do list management.
//!
//! This crate provides the board state, the pure drag-and-drop reorder
//! engine, and the optimistic sync coordinator that mirrors local
//! mutations to a persistence backend, without any dependency on a
//! specific UI implementation or HTTP client.

pub mod domain;
pub mod error;
pub mod summary;
pub mod sync;
pub mod undo;

// Re-export commonly used types
pub use domain::{
    board::BoardState,
    list::{ListId, TodoList},
    reorder::{plan_move, CrossListUpdate, DragMove, MoveOutcome},
    task::{parse_deadline, Task, TaskId},
};
pub use error::{LystraError, Result};
pub use sync::{coordinator::SyncCoordinator, Store};
