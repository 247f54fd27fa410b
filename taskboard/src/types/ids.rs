//! Typed identifiers for boards, columns and tasks.
//!
//! Ids are opaque strings. Fresh ids are ULIDs, so they are unique and sort by
//! creation time; ids written by other producers (for example plain
//! millisecond timestamps) are accepted as-is through `from_string`.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new timestamp-derived id
            pub fn new() -> Self {
                Self(ulid::Ulid::new().to_string())
            }

            /// Wrap an existing id string
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the inner string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(
    /// Identifier of a board
    BoardId
);
define_id!(
    /// Identifier of a column, unique across all boards
    ColumnId
);
define_id!(
    /// Identifier of a task, unique across all boards and columns
    TaskId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_ulids() {
        let id = TaskId::new();
        assert_eq!(id.as_str().len(), 26);
        assert!(ulid::Ulid::from_string(id.as_str()).is_ok());
    }

    #[test]
    fn test_new_ids_are_unique() {
        let a = BoardId::new();
        let b = BoardId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_foreign_ids_accepted() {
        let id = ColumnId::from_string("1700000000000");
        assert_eq!(id, "1700000000000");
        assert_eq!(id.to_string(), "1700000000000");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = TaskId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        let parsed: TaskId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(parsed, id);
    }
}
