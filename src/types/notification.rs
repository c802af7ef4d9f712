use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Notification {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default)]
    pub read: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: NotificationMeta,
}

/// Type-dependent reference ids carried alongside the message.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct NotificationMeta {
    #[serde(rename = "taskId")]
    pub task_id: Option<String>,
    #[serde(rename = "taskTitle")]
    pub task_title: Option<String>,
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
    #[serde(rename = "projectName")]
    pub project_name: Option<String>,
    #[serde(rename = "creditPoints")]
    pub credit_points: Option<i32>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    #[serde(rename = "TASK_ASSIGNED")]
    TaskAssigned,
    #[serde(rename = "TASK_COMPLETED")]
    TaskCompleted,
    #[serde(rename = "PROJECT_CREATED")]
    ProjectCreated,
    #[serde(rename = "POINTS_EARNED")]
    PointsEarned,
    #[serde(rename = "DEADLINE_APPROACHING")]
    DeadlineApproaching,
}

impl NotificationType {
    /// Terminal glyph standing in for the web UI's icon.
    pub fn symbol(self) -> &'static str {
        match self {
            NotificationType::TaskAssigned => "▣",
            NotificationType::TaskCompleted => "✔",
            NotificationType::ProjectCreated => "◆",
            NotificationType::PointsEarned => "★",
            NotificationType::DeadlineApproaching => "⏰",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_metadata() {
        let json = r#"{
            "id": "4",
            "message": "You've earned 25 credit points",
            "type": "POINTS_EARNED",
            "read": false,
            "createdAt": "2026-08-01T10:00:00Z",
            "metadata": {"taskId": "1", "creditPoints": 25}
        }"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NotificationType::PointsEarned);
        assert_eq!(n.metadata.credit_points, Some(25));
        assert!(!n.read);
    }

    #[test]
    fn metadata_defaults_when_absent() {
        let json = r#"{
            "id": "1",
            "message": "New project created",
            "type": "PROJECT_CREATED",
            "createdAt": "2026-08-01T10:00:00Z"
        }"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert!(n.metadata.project_id.is_none());
    }
}
