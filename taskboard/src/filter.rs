//! Read-only task visibility queries for column views.
//!
//! A [`TaskFilter`] combines a free-text search with optional priority and
//! due-date constraints. All three must hold for a task to be visible.
//! Filtering borrows from the state and never changes it.

use crate::error::{BoardError, Result};
use crate::types::{Column, Priority, Task};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Due-date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueFilter {
    /// Due on the same calendar day as now
    Today,
    /// Due in the same Sunday-started week as now
    Week,
    /// Due strictly before now
    Overdue,
}

impl DueFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Overdue => "overdue",
        }
    }

    /// Whether `due` falls in this window relative to `now`, in `now`'s time zone
    pub fn contains<Tz: TimeZone>(&self, due: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
        let local = due.with_timezone(&now.timezone());
        match self {
            Self::Today => local.date_naive() == now.date_naive(),
            Self::Week => week_start(local.date_naive()) == week_start(now.date_naive()),
            Self::Overdue => local < *now,
        }
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

impl fmt::Display for DueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DueFilter {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "overdue" => Ok(Self::Overdue),
            other => Err(BoardError::invalid_value(
                "due",
                format!("'{}' is not one of today, week, overdue", other),
            )),
        }
    }
}

/// Visibility filter for the tasks of a column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskFilter {
    /// Case-insensitive substring of the title or description
    pub search: String,
    #[serde(deserialize_with = "blank_as_none")]
    pub priority: Option<Priority>,
    #[serde(deserialize_with = "blank_as_none")]
    pub due: Option<DueFilter>,
}

/// Accept `""` (the UI's "any" option) as well as null for an absent constraint
fn blank_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = BoardError>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl TaskFilter {
    /// A filter that lets every task through
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the priority constraint
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the due-date constraint
    pub fn with_due(mut self, due: DueFilter) -> Self {
        self.due = Some(due);
        self
    }

    /// Build a filter from the UI's string form, where `""` means no constraint
    pub fn from_parts(search: &str, priority: &str, due: &str) -> Result<Self> {
        let priority = match priority.trim() {
            "" => None,
            value => Some(value.parse()?),
        };
        let due = match due.trim() {
            "" => None,
            value => Some(value.parse()?),
        };
        Ok(Self {
            search: search.to_string(),
            priority,
            due,
        })
    }

    /// Whether the filter constrains anything
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.priority.is_none() && self.due.is_none()
    }

    /// Whether a task is visible under this filter at time `now`
    pub fn matches<Tz: TimeZone>(&self, task: &Task, now: &DateTime<Tz>) -> bool {
        self.matches_search(task)
            && self.priority.is_none_or(|p| p == task.priority)
            && self.due.is_none_or(|d| d.contains(&task.due_date, now))
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
    }

    /// The column's visible tasks, in column order
    pub fn visible_tasks<'a, Tz: TimeZone>(
        &self,
        column: &'a Column,
        now: &DateTime<Tz>,
    ) -> Vec<&'a Task> {
        column.tasks.iter().filter(|t| self.matches(t, now)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    // Wednesday
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    fn task_due(title: &str, due: DateTime<Utc>) -> Task {
        Task::new("todo", title, "alice").with_due_date(due)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = TaskFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&task_due("Anything", now() - Duration::days(400)), &now()));
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let filter = TaskFilter::new().with_search("REPORT");
        let by_title = task_due("Quarterly report", now());
        let by_description = task_due("Finance", now()).with_description("send the Report");
        let neither = task_due("Lunch", now());

        assert!(filter.matches(&by_title, &now()));
        assert!(filter.matches(&by_description, &now()));
        assert!(!filter.matches(&neither, &now()));
    }

    #[test]
    fn test_priority_filter() {
        let filter = TaskFilter::new().with_priority(Priority::High);
        assert!(filter.matches(&task_due("A", now()).with_priority(Priority::High), &now()));
        assert!(!filter.matches(&task_due("B", now()), &now()));
    }

    #[test]
    fn test_due_today() {
        let filter = TaskFilter::new().with_due(DueFilter::Today);
        let morning = Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap();
        let tomorrow = Utc.with_ymd_and_hms(2024, 5, 16, 0, 0, 0).unwrap();

        assert!(filter.matches(&task_due("A", morning), &now()));
        assert!(!filter.matches(&task_due("B", tomorrow), &now()));
    }

    #[test]
    fn test_due_today_uses_callers_time_zone() {
        let filter = TaskFilter::new().with_due(DueFilter::Today);
        // 23:30 UTC on the 15th is already the 16th at UTC+2
        let due = Utc.with_ymd_and_hms(2024, 5, 15, 23, 30, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert!(filter.matches(&task_due("A", due), &now()));
        assert!(!filter.matches(&task_due("A", due), &now().with_timezone(&plus_two)));
    }

    #[test]
    fn test_due_this_week_starts_on_sunday() {
        let filter = TaskFilter::new().with_due(DueFilter::Week);
        let sunday = Utc.with_ymd_and_hms(2024, 5, 12, 8, 0, 0).unwrap();
        let saturday = Utc.with_ymd_and_hms(2024, 5, 18, 20, 0, 0).unwrap();
        let previous_saturday = Utc.with_ymd_and_hms(2024, 5, 11, 20, 0, 0).unwrap();
        let next_sunday = Utc.with_ymd_and_hms(2024, 5, 19, 0, 0, 0).unwrap();

        assert!(filter.matches(&task_due("A", sunday), &now()));
        assert!(filter.matches(&task_due("B", saturday), &now()));
        assert!(!filter.matches(&task_due("C", previous_saturday), &now()));
        assert!(!filter.matches(&task_due("D", next_sunday), &now()));
    }

    #[test]
    fn test_overdue_is_strictly_before_now() {
        let filter = TaskFilter::new().with_due(DueFilter::Overdue);
        assert!(filter.matches(&task_due("A", now() - Duration::minutes(1)), &now()));
        assert!(!filter.matches(&task_due("B", now()), &now()));
        assert!(!filter.matches(&task_due("C", now() + Duration::days(1)), &now()));
    }

    #[test]
    fn test_constraints_combine() {
        let filter = TaskFilter::new()
            .with_search("deploy")
            .with_priority(Priority::High)
            .with_due(DueFilter::Overdue);
        let hit = task_due("Deploy", now() - Duration::days(1)).with_priority(Priority::High);
        let wrong_priority = task_due("Deploy", now() - Duration::days(1));

        assert!(filter.matches(&hit, &now()));
        assert!(!filter.matches(&wrong_priority, &now()));
    }

    #[test]
    fn test_visible_tasks_keeps_column_order() {
        let column = Column::new("b", "To Do")
            .with_task(task_due("Write tests", now()))
            .with_task(task_due("Lunch", now()))
            .with_task(task_due("Run tests", now()));
        let filter = TaskFilter::new().with_search("tests");

        let titles: Vec<&str> = filter
            .visible_tasks(&column, &now())
            .into_iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Write tests", "Run tests"]);
        assert_eq!(column.tasks.len(), 3);
    }

    #[test]
    fn test_from_parts() {
        let filter = TaskFilter::from_parts("bug", "", "week").unwrap();
        assert_eq!(filter.search, "bug");
        assert_eq!(filter.priority, None);
        assert_eq!(filter.due, Some(DueFilter::Week));

        assert!(TaskFilter::from_parts("", "urgent", "").is_err());
        assert!(TaskFilter::from_parts("", "", "someday").is_err());
    }

    #[test]
    fn test_deserialize_blank_constraints() {
        let filter: TaskFilter =
            serde_json::from_str(r#"{"search": "", "priority": "", "due": "overdue"}"#).unwrap();
        assert_eq!(filter.priority, None);
        assert_eq!(filter.due, Some(DueFilter::Overdue));

        let sparse: TaskFilter = serde_json::from_str(r#"{"priority": "low"}"#).unwrap();
        assert_eq!(sparse.priority, Some(Priority::Low));
        assert!(sparse.search.is_empty());
    }
}
