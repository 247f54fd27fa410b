//! AddBoard command

use crate::command::Reduce;
use crate::error::{BoardError, Result};
use crate::types::{AppState, Board, Except};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Append a new board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddBoard {
    pub board: Board,
}

impl AddBoard {
    /// Create a new AddBoard command
    pub fn new(board: Board) -> Self {
        Self { board }
    }
}

impl Reduce for AddBoard {
    fn op(&self) -> &'static str {
        "add board"
    }

    fn reduce(&self, state: &mut AppState) -> Result<()> {
        if state.find_board(&self.board.id).is_some() {
            return Err(BoardError::duplicate_id("board", self.board.id.as_str()));
        }
        state.ensure_ids_free(self.board.columns.iter().map(Arc::as_ref), Except::Nothing)?;

        let mut board = self.board.clone();
        board.normalize();
        state.boards.push(Arc::new(board));
        Ok(())
    }
}
