//! AddTask command

use crate::command::Reduce;
use crate::error::{BoardError, Result};
use crate::types::{AppState, Task};
use serde::{Deserialize, Serialize};

/// Append a task to the column named by its `column_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddTask {
    pub task: Task,
}

impl AddTask {
    /// Create a new AddTask command
    pub fn new(task: Task) -> Self {
        Self { task }
    }
}

impl Reduce for AddTask {
    fn op(&self) -> &'static str {
        "add task"
    }

    fn reduce(&self, state: &mut AppState) -> Result<()> {
        let (bi, ci) = state
            .locate_column(&self.task.column_id)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.task.column_id.to_string(),
            })?;
        if state.locate_task(&self.task.id).is_some() {
            return Err(BoardError::duplicate_id("task", self.task.id.as_str()));
        }

        let column = state.column_mut(bi, ci);
        column.tasks.push(self.task.clone());
        column.normalize();
        Ok(())
    }
}
