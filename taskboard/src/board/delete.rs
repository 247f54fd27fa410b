//! DeleteBoard command

use crate::command::Reduce;
use crate::error::{BoardError, Result};
use crate::types::{AppState, BoardId};
use serde::{Deserialize, Serialize};

/// Delete a board together with its columns and their tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeleteBoard {
    /// The board ID to delete
    pub id: BoardId,
}

impl DeleteBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }
}

impl Reduce for DeleteBoard {
    fn op(&self) -> &'static str {
        "delete board"
    }

    fn reduce(&self, state: &mut AppState) -> Result<()> {
        let index = state
            .board_index(&self.id)
            .ok_or_else(|| BoardError::BoardNotFound {
                id: self.id.to_string(),
            })?;

        state.boards.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::sample_state;
    use crate::types::TaskId;

    #[test]
    fn test_delete_board_cascades() {
        let mut state = sample_state();
        DeleteBoard::new("b1").reduce(&mut state).unwrap();

        assert_eq!(state.boards.len(), 1);
        assert_eq!(state.boards[0].id, "b2");
        for id in ["a", "b", "c", "d", "x", "y"] {
            assert!(state.find_task(&TaskId::from(id)).is_none());
        }
    }

    #[test]
    fn test_delete_missing_board() {
        let mut state = sample_state();
        let before = state.clone();
        let result = DeleteBoard::new("nope").reduce(&mut state);

        assert!(matches!(result, Err(BoardError::BoardNotFound { .. })));
        assert_eq!(state, before);
    }
}
