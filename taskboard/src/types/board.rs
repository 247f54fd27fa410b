//! Board-level types: Board, Column

use super::ids::{BoardId, ColumnId, TaskId};
use super::task::Task;
use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A kanban board: metadata plus its ordered columns.
///
/// Column order is the order of the `columns` sequence; each column's
/// `order` field mirrors its position once the board is normalized.
/// Columns are shared between snapshots until one of them is changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoardRecord", into = "BoardRecord")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub columns: Vec<Arc<Column>>,
}

impl Board {
    /// Create a new, empty board with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: BoardId::new(),
            title: title.into(),
            description: String::new(),
            created_at: Utc::now(),
            columns: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the id (for ids produced elsewhere)
    pub fn with_id(mut self, id: impl Into<BoardId>) -> Self {
        self.id = id.into();
        self
    }

    /// Append a column, adopting it into this board
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(Arc::new(column));
        self.normalize();
        self
    }

    /// Number of columns on the board
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// Find a column by ID
    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id).map(Arc::as_ref)
    }

    /// Mutable access to a column by position, copying it first if another
    /// snapshot still shares it
    pub fn column_mut(&mut self, index: usize) -> &mut Column {
        Arc::make_mut(&mut self.columns[index])
    }

    /// Whether every column and task already sits where its fields say
    pub fn is_normalized(&self) -> bool {
        self.columns
            .iter()
            .enumerate()
            .all(|(order, column)| column.is_placed(&self.id, order))
    }

    /// Renumber columns by position and point every back-reference at its
    /// actual container, all the way down to the tasks. Columns that are
    /// already in place are left shared.
    pub fn normalize(&mut self) {
        for (order, column) in self.columns.iter_mut().enumerate() {
            if column.is_placed(&self.id, order) {
                continue;
            }
            let column = Arc::make_mut(column);
            column.board_id = self.id.clone();
            column.order = order;
            column.normalize();
        }
    }
}

/// A column is a workflow stage within one board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Owning board. Informational only; containment is authoritative.
    pub board_id: BoardId,
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    /// Create a new, empty column for the given board
    pub fn new(board_id: impl Into<BoardId>, title: impl Into<String>) -> Self {
        Self {
            id: ColumnId::new(),
            title: title.into(),
            board_id: board_id.into(),
            order: 0,
            tasks: Vec::new(),
        }
    }

    /// Set the id (for ids produced elsewhere)
    pub fn with_id(mut self, id: impl Into<ColumnId>) -> Self {
        self.id = id.into();
        self
    }

    /// Append a task, adopting it into this column
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self.normalize();
        self
    }

    /// Position of a task within this column
    pub fn position_of(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    /// Whether every task's `column_id` and `order` match its position here
    pub fn is_normalized(&self) -> bool {
        self.tasks
            .iter()
            .enumerate()
            .all(|(order, task)| task.order == order && task.column_id == self.id)
    }

    fn is_placed(&self, board: &BoardId, order: usize) -> bool {
        &self.board_id == board && self.order == order && self.is_normalized()
    }

    /// Renumber tasks by position and resynchronise their `column_id`
    pub fn normalize(&mut self) {
        for (order, task) in self.tasks.iter_mut().enumerate() {
            task.column_id = self.id.clone();
            task.order = order;
        }
    }
}

/// Wire form of a board.
///
/// Older writers stored the title twice, as `title` and `name`. Both are
/// written so those readers keep working, and either is accepted on read.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardRecord {
    id: BoardId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    columns: Vec<Arc<Column>>,
}

impl From<BoardRecord> for Board {
    fn from(record: BoardRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.or(record.name).unwrap_or_default(),
            description: record.description,
            created_at: record.created_at,
            columns: record.columns,
        }
    }
}

impl From<Board> for BoardRecord {
    fn from(board: Board) -> Self {
        Self {
            id: board.id,
            title: Some(board.title.clone()),
            name: Some(board.title),
            description: board.description,
            created_at: board.created_at,
            columns: board.columns,
        }
    }
}
