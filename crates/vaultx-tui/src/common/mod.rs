//! Shared leaf types for TUI features.
//!
//! IMPORTANT: This module must NOT import UiEvent or feature-specific state
//! to avoid circular dependencies.

pub mod fuzzy;
pub mod task;
pub mod text;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, Tasks};
pub use text::{display_width, pad_to_width, truncate_with_ellipsis};
