use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{Priority, ProjectRef, UserRef};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(rename = "progressPercentage", default)]
    pub progress_percentage: u8,
    pub assignee: Option<UserRef>,
    pub project: Option<ProjectRef>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "completedAt")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(rename = "creditPoints", default)]
    pub credit_points: i32,
}

impl Task {
    /// Past its due date and not yet completed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => due < now && self.status != TaskStatus::Completed,
            None => false,
        }
    }

    /// Due on the current calendar day.
    pub fn is_due_today(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => {
                due.year() == now.year() && due.month() == now.month() && due.day() == now.day()
            }
            None => false,
        }
    }

    pub fn assignee_id(&self) -> Option<&str> {
        self.assignee.as_ref().map(|u| u.id.as_str())
    }

    /// Id of the leader of the owning project, when known.
    pub fn project_leader_id(&self) -> Option<&str> {
        self.project
            .as_ref()
            .and_then(|p| p.leader.as_ref())
            .map(|u| u.id.as_str())
    }
}

/// Lifecycle states. `TO_DO` and `PENDING` are distinct wire values that
/// mean the same thing: not yet started (legacy alias).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    #[serde(rename = "TO_DO")]
    ToDo,
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "UNDER_REVIEW")]
    UnderReview,
    #[serde(rename = "COMPLETED")]
    Completed,
    #[serde(rename = "REJECTED")]
    Rejected,
}

impl TaskStatus {
    /// Not yet started, under either wire spelling.
    pub fn is_pending(self) -> bool {
        matches!(self, TaskStatus::ToDo | TaskStatus::Pending)
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::UnderReview => "Under Review",
            TaskStatus::Completed => "Completed",
            TaskStatus::Rejected => "Rejected",
        }
    }

    /// Colored label for terminal output.
    pub fn colored(self) -> String {
        let label = self.label();
        match self {
            TaskStatus::ToDo | TaskStatus::Pending => label.bright_black().to_string(),
            TaskStatus::InProgress => label.blue().to_string(),
            TaskStatus::UnderReview => label.magenta().to_string(),
            TaskStatus::Completed => label.green().to_string(),
            TaskStatus::Rejected => label.red().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn task(status: TaskStatus, due: Option<DateTime<Utc>>) -> Task {
        Task {
            id: "1".to_string(),
            title: "t".to_string(),
            description: None,
            status,
            priority: Priority::Medium,
            progress_percentage: 0,
            assignee: None,
            project: None,
            due_date: due,
            created_at: None,
            completed_at: None,
            credit_points: 0,
        }
    }

    #[test]
    fn pending_covers_both_spellings() {
        assert!(TaskStatus::ToDo.is_pending());
        assert!(TaskStatus::Pending.is_pending());
        assert!(!TaskStatus::InProgress.is_pending());
    }

    #[test]
    fn overdue_excludes_completed() {
        let now = Utc::now();
        let yesterday = now - Duration::days(1);
        assert!(task(TaskStatus::InProgress, Some(yesterday)).is_overdue(now));
        assert!(!task(TaskStatus::Completed, Some(yesterday)).is_overdue(now));
        assert!(!task(TaskStatus::InProgress, None).is_overdue(now));
    }

    #[test]
    fn due_today_compares_calendar_day() {
        let now = Utc::now();
        assert!(task(TaskStatus::ToDo, Some(now)).is_due_today(now));
        assert!(!task(TaskStatus::ToDo, Some(now - Duration::days(2))).is_due_today(now));
    }

    #[test]
    fn deserializes_backend_payload() {
        let json = r#"{
            "id": "42",
            "title": "Design schema",
            "description": "Tables for users, projects and tasks",
            "status": "UNDER_REVIEW",
            "priority": "HIGH",
            "progressPercentage": 100,
            "assignee": {"id": "1", "username": "jsmith", "fullName": "John Smith"},
            "project": {"id": "7", "name": "Web Development"},
            "dueDate": "2026-03-01T00:00:00Z",
            "createdAt": "2026-02-01T00:00:00Z",
            "creditPoints": 30
        }"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.status, TaskStatus::UnderReview);
        assert_eq!(t.progress_percentage, 100);
        assert_eq!(t.assignee_id(), Some("1"));
        assert!(t.completed_at.is_none());
    }
}
