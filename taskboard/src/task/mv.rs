//! MoveTask command

use crate::command::Reduce;
use crate::error::{BoardError, Result};
use crate::types::{AppState, ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// Move a task to a position in a column, possibly on another board.
///
/// `new_order` is the target index once the task has been taken out of its
/// source column. Values past the end append and negative values insert at
/// the front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTask {
    /// The task ID to move
    pub task_id: TaskId,
    /// Destination column
    pub new_column_id: ColumnId,
    /// Destination index
    pub new_order: i64,
}

impl MoveTask {
    /// Create a new MoveTask command with an explicit position
    pub fn new(
        task_id: impl Into<TaskId>,
        new_column_id: impl Into<ColumnId>,
        new_order: i64,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            new_column_id: new_column_id.into(),
            new_order,
        }
    }

    /// Create a MoveTask command to move to a column (at the end)
    pub fn to_column(task_id: impl Into<TaskId>, new_column_id: impl Into<ColumnId>) -> Self {
        Self::new(task_id, new_column_id, i64::MAX)
    }
}

impl Reduce for MoveTask {
    fn op(&self) -> &'static str {
        "move task"
    }

    fn reduce(&self, state: &mut AppState) -> Result<()> {
        let source = state
            .locate_task(&self.task_id)
            .ok_or_else(|| BoardError::TaskNotFound {
                id: self.task_id.to_string(),
            })?;
        let (db, dc) = state
            .locate_column(&self.new_column_id)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.new_column_id.to_string(),
            })?;

        let from = state.column_mut(source.board, source.column);
        let mut task = from.tasks.remove(source.index);
        from.normalize();

        let to = state.column_mut(db, dc);
        let len = to.tasks.len();
        let index = usize::try_from(self.new_order.max(0)).map_or(len, |i| i.min(len));
        task.column_id = to.id.clone();
        to.tasks.insert(index, task);
        to.normalize();
        Ok(())
    }
}
