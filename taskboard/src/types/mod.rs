//! Core types for the task board engine

mod board;
mod ids;
mod state;
mod task;
pub mod timestamp;

// Re-export all types
pub use board::{Board, Column};
pub use ids::{BoardId, ColumnId, TaskId};
pub(crate) use state::Except;
pub use state::{AppState, TaskLocation, DEFAULT_USER};
pub use task::{Priority, Task};
