//! SetCurrentUser command

use crate::command::Reduce;
use crate::error::Result;
use crate::types::AppState;
use serde::{Deserialize, Serialize};

/// Change the display name recorded as `created_by` on new tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetCurrentUser {
    pub name: String,
}

impl SetCurrentUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Reduce for SetCurrentUser {
    fn op(&self) -> &'static str {
        "set user"
    }

    fn reduce(&self, state: &mut AppState) -> Result<()> {
        state.current_user.clone_from(&self.name);
        Ok(())
    }
}
