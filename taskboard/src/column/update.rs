//! UpdateColumn command

use crate::command::Reduce;
use crate::error::{BoardError, Result};
use crate::types::{AppState, Column, Except};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Replace a column wholesale within the board that currently holds it.
///
/// The payload's `board_id` and `order` are ignored: the column keeps its
/// board and its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateColumn {
    pub column: Column,
}

impl UpdateColumn {
    /// Create a new UpdateColumn command
    pub fn new(column: Column) -> Self {
        Self { column }
    }
}

impl Reduce for UpdateColumn {
    fn op(&self) -> &'static str {
        "update column"
    }

    fn reduce(&self, state: &mut AppState) -> Result<()> {
        let (bi, ci) = state
            .locate_column(&self.column.id)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.column.id.to_string(),
            })?;
        state.ensure_ids_free([&self.column], Except::Column(&self.column.id))?;

        let board = state.board_mut(bi);
        board.columns[ci] = Arc::new(self.column.clone());
        board.normalize();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{sample_state, task_ids};
    use crate::types::{ColumnId, Task};

    #[test]
    fn test_update_column_title() {
        let mut state = sample_state();
        let mut column = state.find_column(&ColumnId::from("done")).unwrap().clone();
        column.title = "Shipped".into();

        UpdateColumn::new(column).reduce(&mut state).unwrap();

        let stored = state.find_column(&ColumnId::from("done")).unwrap();
        assert_eq!(stored.title, "Shipped");
        assert_eq!(stored.order, 1);
        assert_eq!(task_ids(&state, "done"), vec!["x", "y"]);
    }

    #[test]
    fn test_update_column_stays_in_its_board() {
        let mut state = sample_state();
        let mut column = state.find_column(&ColumnId::from("done")).unwrap().clone();
        column.board_id = "b2".into();
        column.order = 9;

        UpdateColumn::new(column).reduce(&mut state).unwrap();

        let (bi, ci) = state.locate_column(&ColumnId::from("done")).unwrap();
        assert_eq!((bi, ci), (0, 1));
        let stored = &state.boards[0].columns[1];
        assert_eq!(stored.board_id, "b1");
        assert_eq!(stored.order, 1);
    }

    #[test]
    fn test_update_column_adopts_new_tasks() {
        let mut state = sample_state();
        let mut column = state.find_column(&ColumnId::from("later")).unwrap().clone();
        column.tasks.push(Task::new("somewhere", "New", "carol").with_id("n"));

        UpdateColumn::new(column).reduce(&mut state).unwrap();

        let task = state.find_task(&"n".into()).unwrap();
        assert_eq!(task.column_id, "later");
    }

    #[test]
    fn test_update_column_cannot_duplicate_task() {
        let mut state = sample_state();
        let mut column = state.find_column(&ColumnId::from("later")).unwrap().clone();
        column.tasks.push(Task::new("later", "Copy", "carol").with_id("a"));

        let result = UpdateColumn::new(column).reduce(&mut state);
        assert!(matches!(result, Err(BoardError::DuplicateId { .. })));
    }

    #[test]
    fn test_update_missing_column() {
        let mut state = sample_state();
        let before = state.clone();
        let result = UpdateColumn::new(Column::new("b1", "Ghost")).reduce(&mut state);

        assert!(matches!(result, Err(BoardError::ColumnNotFound { .. })));
        assert_eq!(state, before);
    }
}
