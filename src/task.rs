use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::date::{format_date, format_timestamp, now_timestamp, parse_date, parse_timestamp};
use crate::error::MalformedRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: i64,
    pub completed: bool,
    created_at: NaiveDateTime,
}

/// On-disk shape of a task, one element of the backing file's array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub description: String,
    #[serde(default)]
    pub due_date: Option<String>,
    pub priority: i64,
    pub completed: bool,
    pub created_at: String,
}

impl Task {
    pub fn new(description: String, due_date: Option<NaiveDate>, priority: i64) -> Self {
        Self {
            description,
            due_date,
            priority,
            completed: false,
            created_at: now_timestamp(),
        }
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            description: self.description.clone(),
            due_date: self.due_date.map(format_date),
            priority: self.priority,
            completed: self.completed,
            created_at: format_timestamp(self.created_at),
        }
    }

    pub fn from_record(record: TaskRecord) -> Result<Self, MalformedRecord> {
        let due_date = match record.due_date.filter(|value| !value.is_empty()) {
            Some(value) => Some(
                parse_date(&value).map_err(|source| MalformedRecord::DueDate { value, source })?,
            ),
            None => None,
        };
        let created_at = parse_timestamp(&record.created_at).map_err(|source| {
            MalformedRecord::CreatedAt {
                value: record.created_at.clone(),
                source,
            }
        })?;

        Ok(Self {
            description: record.description,
            due_date,
            priority: record.priority,
            completed: record.completed,
            created_at,
        })
    }
}

impl TaskRecord {
    pub fn from_value(value: serde_json::Value) -> Result<Self, MalformedRecord> {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(due_date: Option<&str>) -> TaskRecord {
        TaskRecord {
            description: "Buy milk".to_string(),
            due_date: due_date.map(str::to_string),
            priority: 2,
            completed: true,
            created_at: "2024-01-10 08:15:00".to_string(),
        }
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("Call Bob".to_string(), None, 1);
        assert!(!task.completed);
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, 1);
    }

    #[test]
    fn test_round_trip() {
        let mut task = Task::new(
            "Buy milk".to_string(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            2,
        );
        assert_eq!(Task::from_record(task.to_record()).unwrap(), task);

        task.completed = true;
        task.due_date = None;
        assert_eq!(Task::from_record(task.to_record()).unwrap(), task);
    }

    #[test]
    fn test_to_record_formats_dates() {
        let task = Task::from_record(record(Some("2024-01-15"))).unwrap();
        let record = task.to_record();
        assert_eq!(record.due_date.as_deref(), Some("2024-01-15"));
        assert_eq!(record.created_at, "2024-01-10 08:15:00");
    }

    #[test]
    fn test_from_record_keeps_created_at() {
        let task = Task::from_record(record(None)).unwrap();
        assert_eq!(
            task.created_at(),
            parse_timestamp("2024-01-10 08:15:00").unwrap()
        );
        assert!(task.completed);
    }

    #[test]
    fn test_from_record_bad_due_date() {
        let err = Task::from_record(record(Some("Jan 15"))).unwrap_err();
        assert!(matches!(err, MalformedRecord::DueDate { ref value, .. } if value == "Jan 15"));
    }

    #[test]
    fn test_from_record_empty_due_date_is_none() {
        let task = Task::from_record(record(Some(""))).unwrap();
        assert_eq!(task.due_date, None);
        assert_eq!(task.to_record().due_date, None);
    }

    #[test]
    fn test_from_record_rejects_loose_due_date() {
        for value in [" 2024-01-15", "+2024-01-15", "2024-1-5"] {
            assert!(matches!(
                Task::from_record(record(Some(value))),
                Err(MalformedRecord::DueDate { .. })
            ));
        }
    }

    #[test]
    fn test_from_record_bad_created_at() {
        let mut bad = record(None);
        bad.created_at = "yesterday".to_string();
        assert!(matches!(
            Task::from_record(bad),
            Err(MalformedRecord::CreatedAt { .. })
        ));
    }

    #[test]
    fn test_from_value_null_or_missing_due_date() {
        let with_null = json!({
            "description": "a",
            "due_date": null,
            "priority": 3,
            "completed": false,
            "created_at": "2024-01-10 08:15:00"
        });
        let without_key = json!({
            "description": "a",
            "priority": 3,
            "completed": false,
            "created_at": "2024-01-10 08:15:00"
        });
        assert_eq!(TaskRecord::from_value(with_null).unwrap().due_date, None);
        assert_eq!(TaskRecord::from_value(without_key).unwrap().due_date, None);
    }

    #[test]
    fn test_from_value_missing_key() {
        let value = json!({ "description": "a", "priority": 3, "completed": false });
        assert!(matches!(
            TaskRecord::from_value(value),
            Err(MalformedRecord::Shape(_))
        ));
    }

    #[test]
    fn test_record_json_shape() {
        let value = serde_json::to_value(record(None)).unwrap();
        assert_eq!(
            value,
            json!({
                "description": "Buy milk",
                "due_date": null,
                "priority": 2,
                "completed": true,
                "created_at": "2024-01-10 08:15:00"
            })
        );
    }
}
