//! Pure state transitions: `(state, command) -> state`

use crate::command::{Command, Reduce};
use crate::error::Result;
use crate::types::AppState;
use tracing::debug;

/// Apply a command, reporting why it was rejected.
///
/// The input is never modified. On success the returned state is the input
/// with the command fully applied; on error nothing is applied. The result
/// shares every board and column the command left alone with the input.
pub fn try_reduce(state: &AppState, command: &Command) -> Result<AppState> {
    let mut next = state.clone();
    command.reduce(&mut next)?;
    Ok(next)
}

/// Apply a command. Total: a command that references missing ids or would
/// introduce a duplicate id yields the input state unchanged.
pub fn reduce(state: &AppState, command: &Command) -> AppState {
    match try_reduce(state, command) {
        Ok(next) => next,
        Err(error) => {
            debug!(op = command.op(), %error, "command rejected, state unchanged");
            state.clone()
        }
    }
}
