use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Compact user reference embedded in tasks and project member lists.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UserRef {
    pub id: String,
    pub username: String,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

impl UserRef {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(rename = "creditPoints", default)]
    pub credit_points: i32,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }

    pub fn is_leader(&self) -> bool {
        self.roles.contains(&Role::Leader)
    }

    pub fn roles_label(&self) -> String {
        if self.roles.is_empty() {
            return "No role assigned".to_string();
        }
        self.roles
            .iter()
            .map(|r| r.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    #[serde(rename = "ROLE_LEADER")]
    Leader,
    #[serde(rename = "ROLE_MEMBER")]
    Member,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Leader => "Project Leader",
            Role::Member => "Team Member",
        }
    }

    /// Signup payload value: lowercase, without the ROLE_ prefix.
    pub fn as_signup(self) -> &'static str {
        match self {
            Role::Leader => "leader",
            Role::Member => "member",
        }
    }
}

/// Level derived from accumulated credit points: 100 points per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditLevel {
    pub level: i32,
    pub progress_percentage: i32,
    pub points_to_next: i32,
}

impl CreditLevel {
    pub fn from_points(points: i32) -> Self {
        let points = points.max(0);
        let level = points / 100 + 1;
        CreditLevel {
            level,
            progress_percentage: points % 100,
            points_to_next: level * 100 - points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_math() {
        let l = CreditLevel::from_points(0);
        assert_eq!((l.level, l.progress_percentage, l.points_to_next), (1, 0, 100));

        let l = CreditLevel::from_points(75);
        assert_eq!((l.level, l.progress_percentage, l.points_to_next), (1, 75, 25));

        let l = CreditLevel::from_points(100);
        assert_eq!((l.level, l.progress_percentage, l.points_to_next), (2, 0, 100));

        let l = CreditLevel::from_points(250);
        assert_eq!((l.level, l.progress_percentage, l.points_to_next), (3, 50, 50));
    }

    #[test]
    fn roles_format_for_display() {
        let user = User {
            id: "1".to_string(),
            username: "anna".to_string(),
            email: "anna@example.com".to_string(),
            full_name: None,
            roles: vec![Role::Leader, Role::Member],
            credit_points: 0,
        };
        assert!(user.is_leader());
        assert_eq!(user.roles_label(), "Project Leader, Team Member");
    }

    #[test]
    fn role_wire_values() {
        let r: Role = serde_json::from_str("\"ROLE_LEADER\"").unwrap();
        assert_eq!(r, Role::Leader);
        assert_eq!(r.as_signup(), "leader");
    }
}
