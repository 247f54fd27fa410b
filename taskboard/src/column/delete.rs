//! DeleteColumn command

use crate::command::Reduce;
use crate::error::{BoardError, Result};
use crate::types::{AppState, ColumnId};
use serde::{Deserialize, Serialize};

/// Delete a column and the tasks it holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
}

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

impl Reduce for DeleteColumn {
    fn op(&self) -> &'static str {
        "delete column"
    }

    fn reduce(&self, state: &mut AppState) -> Result<()> {
        let (bi, ci) = state
            .locate_column(&self.id)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: self.id.to_string(),
            })?;

        let board = state.board_mut(bi);
        board.columns.remove(ci);
        board.normalize();
        Ok(())
    }
}
