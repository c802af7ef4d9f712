use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the profile activity history. The backend has grown new
/// activity kinds over time, so the type is kept as a free-form string.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
    #[serde(rename = "projectName")]
    pub project_name: Option<String>,
}

impl Activity {
    pub fn symbol(&self) -> &'static str {
        match self.kind.as_str() {
            "TASK_COMPLETED" => "✔",
            "TASK_ASSIGNED" => "▣",
            "PROJECT_JOINED" | "PROJECT_CREATED" => "◆",
            "COMMENT_ADDED" => "💬",
            "ACHIEVEMENT_UNLOCKED" => "★",
            _ => "•",
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(rename = "unlockedAt")]
    pub unlocked_at: Option<DateTime<Utc>>,
}
