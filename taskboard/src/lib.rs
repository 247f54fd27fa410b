//! Kanban task-board engine with pluggable blob persistence
//!
//! Boards hold ordered columns, columns hold ordered tasks. Every change goes
//! through a [`Command`] applied by a pure reducer, so the hierarchy keeps its
//! invariants: each task lives in exactly one column, ids are unique, and
//! every `order` field equals the item's position.
//!
//! ## Overview
//!
//! - **Commands** - `board`, `column`, `task` and `user` modules hold one struct per command
//! - **Reducer** - [`reduce`] is total: commands that reference missing ids change nothing
//! - **Store** - [`StateStore`] holds the current snapshot, notifies subscribers and
//!   mirrors accepted commands to storage in the background
//! - **Persistence** - the whole state as one JSON blob behind a [`StateStorage`] backend
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use taskboard::{
//!     board::AddBoard, column::AddColumn, task::{AddTask, MoveTask},
//!     Board, BoardConfig, Column, StateStore, Task,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BoardConfig::load(".")?;
//! let store = StateStore::open(config.persistence()).await;
//!
//! let board = Board::new("My Project");
//! let todo = Column::new(board.id.clone(), "To Do");
//! let done = Column::new(board.id.clone(), "Done");
//! let task = Task::new(todo.id.clone(), "Implement feature X", &store.state().current_user);
//!
//! store.dispatch(AddBoard::new(board));
//! store.dispatch(AddColumn::new(todo));
//! store.dispatch(AddColumn::new(done.clone()));
//! store.dispatch(AddTask::new(task.clone()));
//! store.dispatch(MoveTask::new(task.id, done.id, 0));
//!
//! store.flush().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Layout
//!
//! ```text
//! .taskboard/
//! ├── task-board-app.json   # {"boards": [...], "currentUser": "..."}
//! └── .lock                 # held while a write is in progress
//! ```

pub mod command;
pub mod config;
mod error;
pub mod filter;
pub mod logging;
pub mod persistence;
pub mod reducer;
pub mod storage;
pub mod store;
pub mod types;

// Command modules
pub mod board;
pub mod column;
pub mod task;
pub mod user;

#[cfg(test)]
mod test_fixtures;

pub use command::{Command, Reduce};
pub use config::BoardConfig;
pub use error::{BoardError, Result};
pub use filter::{DueFilter, TaskFilter};
pub use logging::Pretty;
pub use persistence::{Persistence, STORAGE_KEY};
pub use reducer::{reduce, try_reduce};
pub use storage::{FileStorage, MemoryStorage, StateStorage};
pub use store::{DispatchOutcome, StateStore};

// Re-export commonly used types
pub use types::{
    AppState, Board, BoardId, Column, ColumnId, Priority, Task, TaskId, TaskLocation, DEFAULT_USER,
};
