//! The command set and the trait every command implements.
//!
//! Commands are plain structs whose fields are the payload. Each one knows
//! how to apply itself to an [`AppState`]; [`Command`] is the tagged union
//! that UI collaborators dispatch, and it serializes as
//! `{"type": "MOVE_TASK", "payload": {...}}`.

use crate::board::{AddBoard, DeleteBoard, UpdateBoard};
use crate::column::{AddColumn, DeleteColumn, UpdateColumn};
use crate::error::{BoardError, Result};
use crate::task::{AddTask, DeleteTask, MoveTask, UpdateTask};
use crate::types::AppState;
use crate::user::SetCurrentUser;
use serde::{Deserialize, Serialize};

/// A state transition.
///
/// Implementations look everything up before they mutate, so an `Err`
/// leaves `state` exactly as it was.
pub trait Reduce {
    /// Canonical op string (e.g. "move task")
    fn op(&self) -> &'static str;

    /// Apply the command to `state` in place
    fn reduce(&self, state: &mut AppState) -> Result<()>;
}

/// Every mutation the engine accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    AddBoard(AddBoard),
    DeleteBoard(DeleteBoard),
    UpdateBoard(UpdateBoard),
    AddColumn(AddColumn),
    DeleteColumn(DeleteColumn),
    UpdateColumn(UpdateColumn),
    AddTask(AddTask),
    UpdateTask(UpdateTask),
    DeleteTask(DeleteTask),
    MoveTask(MoveTask),
    SetCurrentUser(SetCurrentUser),
}

impl Command {
    /// Decode a command sent as JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BoardError::parse(format!("invalid command: {e}")))
    }

    /// Canonical op string (e.g. "move task")
    pub fn op(&self) -> &'static str {
        self.as_reduce().op()
    }

    fn as_reduce(&self) -> &dyn Reduce {
        match self {
            Self::AddBoard(cmd) => cmd,
            Self::DeleteBoard(cmd) => cmd,
            Self::UpdateBoard(cmd) => cmd,
            Self::AddColumn(cmd) => cmd,
            Self::DeleteColumn(cmd) => cmd,
            Self::UpdateColumn(cmd) => cmd,
            Self::AddTask(cmd) => cmd,
            Self::UpdateTask(cmd) => cmd,
            Self::DeleteTask(cmd) => cmd,
            Self::MoveTask(cmd) => cmd,
            Self::SetCurrentUser(cmd) => cmd,
        }
    }
}

impl Reduce for Command {
    fn op(&self) -> &'static str {
        self.as_reduce().op()
    }

    fn reduce(&self, state: &mut AppState) -> Result<()> {
        self.as_reduce().reduce(state)
    }
}

macro_rules! impl_into_command {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Command {
                fn from(cmd: $variant) -> Self {
                    Self::$variant(cmd)
                }
            }
        )*
    };
}

impl_into_command!(
    AddBoard,
    DeleteBoard,
    UpdateBoard,
    AddColumn,
    DeleteColumn,
    UpdateColumn,
    AddTask,
    UpdateTask,
    DeleteTask,
    MoveTask,
    SetCurrentUser,
);
