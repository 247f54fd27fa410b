//! Shared fixtures for unit tests

use crate::types::{AppState, Board, Column, Task};

/// Two boards:
///
/// ```text
/// b1: todo [a, b, c, d]   done [x, y]
/// b2: later []
/// ```
pub(crate) fn sample_state() -> AppState {
    let todo = ["a", "b", "c", "d"]
        .into_iter()
        .fold(Column::new("b1", "To Do").with_id("todo"), |col, id| {
            col.with_task(Task::new("todo", id.to_uppercase(), "alice").with_id(id))
        });
    let done = ["x", "y"]
        .into_iter()
        .fold(Column::new("b1", "Done").with_id("done"), |col, id| {
            col.with_task(Task::new("done", id.to_uppercase(), "bob").with_id(id))
        });

    let work = Board::new("Work")
        .with_id("b1")
        .with_column(todo)
        .with_column(done);
    let home = Board::new("Home")
        .with_id("b2")
        .with_column(Column::new("b2", "Later").with_id("later"));

    AppState::default().with_board(work).with_board(home)
}

/// Task ids of a column in display order
pub(crate) fn task_ids(state: &AppState, column: &str) -> Vec<String> {
    state
        .boards
        .iter()
        .flat_map(|b| b.columns.iter())
        .find(|c| c.id == column)
        .map(|c| c.tasks.iter().map(|t| t.id.to_string()).collect())
        .unwrap_or_default()
}
