//! Task types: Task, Priority

use super::ids::{ColumnId, TaskId};
use super::timestamp;
use crate::error::BoardError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(BoardError::invalid_value(
                "priority",
                format!("'{}' is not one of high, medium, low", other),
            )),
        }
    }
}

/// A task/card on a board.
///
/// `column_id` and `order` are kept equal to the task's actual container and
/// position by every command that touches the task's column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    /// Defaults to the time of reading when absent
    #[serde(with = "timestamp", default = "Utc::now")]
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub created_by: String,
    pub column_id: ColumnId,
    #[serde(default)]
    pub order: usize,
}

impl Task {
    /// Create a new task in the given column.
    ///
    /// The due date defaults to now and the assignee to the creator.
    pub fn new(
        column_id: impl Into<ColumnId>,
        title: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        let created_by = created_by.into();
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            due_date: Utc::now(),
            assignee: created_by.clone(),
            created_by,
            column_id: column_id.into(),
            order: 0,
        }
    }

    /// Set the id (for ids produced elsewhere)
    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }
}
