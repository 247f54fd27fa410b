//! DeleteTask command

use crate::command::Reduce;
use crate::error::{BoardError, Result};
use crate::types::{AppState, TaskId};
use serde::{Deserialize, Serialize};

/// Delete a task from whichever column holds it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeleteTask {
    /// The task ID to delete
    pub id: TaskId,
}

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

impl Reduce for DeleteTask {
    fn op(&self) -> &'static str {
        "delete task"
    }

    fn reduce(&self, state: &mut AppState) -> Result<()> {
        let loc = state
            .locate_task(&self.id)
            .ok_or_else(|| BoardError::TaskNotFound {
                id: self.id.to_string(),
            })?;

        let column = state.column_mut(loc.board, loc.column);
        column.tasks.remove(loc.index);
        column.normalize();
        Ok(())
    }
}
