//! AddColumn command

use crate::command::Reduce;
use crate::error::{BoardError, Result};
use crate::types::{AppState, Column, Except};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Append a column to the board named by its `board_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddColumn {
    pub column: Column,
}

impl AddColumn {
    /// Create a new AddColumn command
    pub fn new(column: Column) -> Self {
        Self { column }
    }
}

impl Reduce for AddColumn {
    fn op(&self) -> &'static str {
        "add column"
    }

    fn reduce(&self, state: &mut AppState) -> Result<()> {
        let index = state
            .board_index(&self.column.board_id)
            .ok_or_else(|| BoardError::BoardNotFound {
                id: self.column.board_id.to_string(),
            })?;
        state.ensure_ids_free([&self.column], Except::Nothing)?;

        let board = state.board_mut(index);
        board.columns.push(Arc::new(self.column.clone()));
        board.normalize();
        Ok(())
    }
}
