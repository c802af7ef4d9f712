use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Task, UserRef};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "problemStatement")]
    pub problem_statement: Option<String>,
    // Older backend revisions used isProblemStatementApproved.
    #[serde(
        rename = "problemStatementApproved",
        alias = "isProblemStatementApproved",
        default
    )]
    pub problem_statement_approved: bool,
    pub leader: UserRef,
    #[serde(default)]
    pub members: Vec<UserRef>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Compact project reference embedded in tasks.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
    pub leader: Option<UserRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approved_flag_accepts_both_property_names() {
        let json = r#"{
            "id": "1", "name": "Web", "leader": {"id": "9", "username": "lead"},
            "isProblemStatementApproved": true
        }"#;
        let p: Project = serde_json::from_str(json).unwrap();
        assert!(p.problem_statement_approved);

        let json = r#"{"id": "1", "name": "Web", "leader": {"id": "9", "username": "lead"}}"#;
        let p: Project = serde_json::from_str(json).unwrap();
        assert!(!p.problem_statement_approved);
        assert!(p.members.is_empty());
    }
}
