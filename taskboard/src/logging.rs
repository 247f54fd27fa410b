//! Log formatting helpers
//!
//! The crate only emits `tracing` events; installing a subscriber is up to
//! the embedding application.

use serde::Serialize;
use std::fmt::{self, Debug, Display};

/// Renders a value as YAML in log messages.
///
/// ```ignore
/// trace!(op = command.op(), "state after command:{}", Pretty(&*state));
/// ```
///
/// Output starts with a newline so multi-line documents line up. Falls back
/// to `{:#?}` when the value cannot be represented as YAML.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> Display for Pretty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml.trim_end()),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> Debug for Pretty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}
