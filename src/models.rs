// Data models for the task tracker

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format used for `due_date` throughout the store and CSV interchange.
pub const DUE_DATE_FORMAT: &str = "%m-%d-%Y";

/// A single trackable unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub name: String,
    pub priority: Priority,
    /// Calendar date as `MM-DD-YYYY` text; kept verbatim, parsed only for ordering
    pub due_date: String,
    pub status: Status,
}

impl Task {
    /// Due date as a sortable key. A value that does not parse as a real
    /// calendar date sorts after every parseable one.
    pub fn due_date_key(&self) -> NaiveDate {
        NaiveDate::parse_from_str(&self.due_date, DUE_DATE_FORMAT).unwrap_or(NaiveDate::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Numeric rank for sorting; higher sorts first in task listings.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(()),
        }
    }
}

/// Lifecycle stage: `TODO → IN_PROGRESS → COMPLETED`, reversible one step
/// at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Todo,
    InProgress,
    Completed,
}

impl Status {
    /// The following stage, or `None` at `Completed` (no cyclic wrap).
    pub fn next(self) -> Option<Status> {
        match self {
            Status::Todo => Some(Status::InProgress),
            Status::InProgress => Some(Status::Completed),
            Status::Completed => None,
        }
    }

    /// The preceding stage, or `None` at `Todo`.
    pub fn prev(self) -> Option<Status> {
        match self {
            Status::Completed => Some(Status::InProgress),
            Status::InProgress => Some(Status::Todo),
            Status::Todo => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::InProgress => "IN_PROGRESS",
            Status::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TODO" => Ok(Status::Todo),
            "IN_PROGRESS" => Ok(Status::InProgress),
            "COMPLETED" => Ok(Status::Completed),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&Status::Todo).unwrap();
        assert_eq!(json, "\"TODO\"");

        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");

        let status: Status = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(status, Status::Completed);
    }

    #[test]
    fn test_status_lifecycle_steps() {
        assert_eq!(Status::Todo.next(), Some(Status::InProgress));
        assert_eq!(Status::InProgress.next(), Some(Status::Completed));
        assert_eq!(Status::Completed.next(), None);

        assert_eq!(Status::Completed.prev(), Some(Status::InProgress));
        assert_eq!(Status::InProgress.prev(), Some(Status::Todo));
        assert_eq!(Status::Todo.prev(), None);
    }

    #[test]
    fn test_priority_parse_case_insensitive() {
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(" Medium ".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!("LOW".parse::<Priority>(), Ok(Priority::Low));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_rank_ordering() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn test_task_serialization_round_trip() {
        let task = Task {
            id: 4211,
            name: "Write report".to_string(),
            priority: Priority::High,
            due_date: "03-15-2026".to_string(),
            status: Status::Todo,
        };

        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_due_date_key_unparseable_sorts_last() {
        let good = Task {
            id: 1,
            name: "a".to_string(),
            priority: Priority::Low,
            due_date: "01-01-2030".to_string(),
            status: Status::Todo,
        };
        let bad = Task {
            due_date: "someday".to_string(),
            ..good.clone()
        };

        assert!(good.due_date_key() < bad.due_date_key());
        assert_eq!(bad.due_date_key(), NaiveDate::MAX);
    }
}
