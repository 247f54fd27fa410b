//! The root aggregate and the lookups commands are built from

use super::board::{Board, Column};
use super::ids::{BoardId, ColumnId, TaskId};
use super::task::Task;
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Display name used when no user has been set
pub const DEFAULT_USER: &str = "Default User";

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

/// The whole board hierarchy plus the current user.
///
/// Cloning is shallow: boards and columns sit behind [`Arc`], so a snapshot
/// produced by a command shares every board and column the command did not
/// touch with the snapshot it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Boards in creation order
    pub boards: Vec<Arc<Board>>,
    #[serde(default = "default_user")]
    pub current_user: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_user(DEFAULT_USER)
    }
}

/// Where a task currently lives: indices into `boards`, `columns` and `tasks`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLocation {
    pub board: usize,
    pub column: usize,
    pub index: usize,
}

/// Part of the state to leave out when checking for id collisions
#[derive(Debug, Clone, Copy)]
pub(crate) enum Except<'a> {
    Nothing,
    Board(&'a BoardId),
    Column(&'a ColumnId),
}

impl AppState {
    /// Empty state for the given user
    pub fn with_user(user: impl Into<String>) -> Self {
        Self {
            boards: Vec::new(),
            current_user: user.into(),
        }
    }

    /// Append a board, adopting its columns and tasks
    pub fn with_board(mut self, mut board: Board) -> Self {
        board.normalize();
        self.boards.push(Arc::new(board));
        self
    }

    /// Mutable access to a board by position, copying it first if another
    /// snapshot still shares it
    pub fn board_mut(&mut self, index: usize) -> &mut Board {
        Arc::make_mut(&mut self.boards[index])
    }

    /// Mutable access to a column by board and column position, copying
    /// only the path down to it
    pub fn column_mut(&mut self, board: usize, column: usize) -> &mut Column {
        self.board_mut(board).column_mut(column)
    }

    /// Index of a board in `boards`
    pub fn board_index(&self, id: &BoardId) -> Option<usize> {
        self.boards.iter().position(|b| &b.id == id)
    }

    /// Find a board by ID
    pub fn find_board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| &b.id == id).map(Arc::as_ref)
    }

    /// Board and column indices of a column, searching every board
    pub fn locate_column(&self, id: &ColumnId) -> Option<(usize, usize)> {
        self.boards.iter().enumerate().find_map(|(bi, board)| {
            board
                .columns
                .iter()
                .position(|c| &c.id == id)
                .map(|ci| (bi, ci))
        })
    }

    /// Find a column by ID, searching every board
    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.locate_column(id)
            .map(|(bi, ci)| self.boards[bi].columns[ci].as_ref())
    }

    /// Locate a task, searching every board and column
    pub fn locate_task(&self, id: &TaskId) -> Option<TaskLocation> {
        self.boards.iter().enumerate().find_map(|(bi, board)| {
            board.columns.iter().enumerate().find_map(|(ci, column)| {
                column.position_of(id).map(|index| TaskLocation {
                    board: bi,
                    column: ci,
                    index,
                })
            })
        })
    }

    /// Find a task by ID, searching every board and column
    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.locate_task(id)
            .map(|loc| &self.boards[loc.board].columns[loc.column].tasks[loc.index])
    }

    /// Every task in display order: board, then column, then position
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.boards
            .iter()
            .flat_map(|b| b.columns.iter())
            .flat_map(|c| c.tasks.iter())
    }

    /// Renumber and resynchronise every board that needs it
    pub fn normalize(&mut self) {
        for board in &mut self.boards {
            if !board.is_normalized() {
                Arc::make_mut(board).normalize();
            }
        }
    }

    /// Check that incoming columns and their tasks reuse no id already held
    /// elsewhere in the state (ignoring `except`) nor repeat one among
    /// themselves.
    pub(crate) fn ensure_ids_free<'c>(
        &self,
        incoming: impl IntoIterator<Item = &'c Column>,
        except: Except<'_>,
    ) -> Result<()> {
        let mut column_ids: HashSet<&ColumnId> = HashSet::new();
        let mut task_ids: HashSet<&TaskId> = HashSet::new();

        for board in &self.boards {
            if matches!(except, Except::Board(id) if id == &board.id) {
                continue;
            }
            for column in &board.columns {
                if matches!(except, Except::Column(id) if id == &column.id) {
                    continue;
                }
                column_ids.insert(&column.id);
                task_ids.extend(column.tasks.iter().map(|t| &t.id));
            }
        }

        for column in incoming {
            if !column_ids.insert(&column.id) {
                return Err(BoardError::duplicate_id("column", column.id.as_str()));
            }
            for task in &column.tasks {
                if !task_ids.insert(&task.id) {
                    return Err(BoardError::duplicate_id("task", task.id.as_str()));
                }
            }
        }

        Ok(())
    }

    /// Check that no board, column or task id appears twice anywhere in the
    /// state. Commands keep this true; blobs read from storage may not.
    pub fn ensure_unique_ids(&self) -> Result<()> {
        let mut board_ids: HashSet<&BoardId> = HashSet::new();
        let mut column_ids: HashSet<&ColumnId> = HashSet::new();
        let mut task_ids: HashSet<&TaskId> = HashSet::new();

        for board in &self.boards {
            if !board_ids.insert(&board.id) {
                return Err(BoardError::duplicate_id("board", board.id.as_str()));
            }
            for column in &board.columns {
                if !column_ids.insert(&column.id) {
                    return Err(BoardError::duplicate_id("column", column.id.as_str()));
                }
                for task in &column.tasks {
                    if !task_ids.insert(&task.id) {
                        return Err(BoardError::duplicate_id("task", task.id.as_str()));
                    }
                }
            }
        }

        Ok(())
    }
}
