//! UpdateTask command

use crate::command::Reduce;
use crate::error::{BoardError, Result};
use crate::types::{AppState, Task};
use serde::{Deserialize, Serialize};

/// Replace a task's contents where it currently sits.
///
/// Only [`MoveTask`](crate::task::MoveTask) relocates a task: the payload's
/// `column_id` and `order` are overwritten with the task's actual column and
/// position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateTask {
    pub task: Task,
}

impl UpdateTask {
    /// Create a new UpdateTask command
    pub fn new(task: Task) -> Self {
        Self { task }
    }
}

impl Reduce for UpdateTask {
    fn op(&self) -> &'static str {
        "update task"
    }

    fn reduce(&self, state: &mut AppState) -> Result<()> {
        let loc = state
            .locate_task(&self.task.id)
            .ok_or_else(|| BoardError::TaskNotFound {
                id: self.task.id.to_string(),
            })?;

        let column = state.column_mut(loc.board, loc.column);
        column.tasks[loc.index] = self.task.clone();
        column.normalize();
        Ok(())
    }
}
