//! UpdateBoard command

use crate::command::Reduce;
use crate::error::{BoardError, Result};
use crate::types::{AppState, Board, Except};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Replace a board wholesale, keeping its position in the board list.
///
/// `created_at` is immutable, so the stored creation time survives the
/// replacement whatever the payload carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateBoard {
    pub board: Board,
}

impl UpdateBoard {
    /// Create a new UpdateBoard command
    pub fn new(board: Board) -> Self {
        Self { board }
    }
}

impl Reduce for UpdateBoard {
    fn op(&self) -> &'static str {
        "update board"
    }

    fn reduce(&self, state: &mut AppState) -> Result<()> {
        let index = state
            .board_index(&self.board.id)
            .ok_or_else(|| BoardError::BoardNotFound {
                id: self.board.id.to_string(),
            })?;
        state.ensure_ids_free(
            self.board.columns.iter().map(Arc::as_ref),
            Except::Board(&self.board.id),
        )?;

        let mut board = self.board.clone();
        board.created_at = state.boards[index].created_at;
        board.normalize();
        state.boards[index] = Arc::new(board);
        Ok(())
    }
}
