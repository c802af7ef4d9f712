//! Derived, role-gated facts about one project for the current user.

use crate::error::{HubError, Result};
use crate::types::{Project, User, UserRef};

/// Shortest query the member search will run.
pub const MIN_SEARCH_LEN: usize = 2;

pub struct ProjectView<'a> {
    project: &'a Project,
    current_user: &'a str,
}

impl<'a> ProjectView<'a> {
    pub fn new(project: &'a Project, current_user: &'a str) -> Self {
        Self {
            project,
            current_user,
        }
    }

    pub fn is_leader(&self) -> bool {
        self.project.leader.id == self.current_user
    }

    /// Leaders may remove any member except themselves.
    pub fn can_remove(&self, member: &UserRef) -> bool {
        self.is_leader() && member.id != self.current_user
    }

    /// The approve action is offered to the leader while the problem
    /// statement is still unapproved.
    pub fn show_approve_action(&self) -> bool {
        self.is_leader() && !self.project.problem_statement_approved
    }

    pub fn member_role(&self, member: &UserRef) -> &'static str {
        if member.id == self.project.leader.id {
            "Project Leader"
        } else {
            "Member"
        }
    }
}

/// Users from the directory matching `query` on username, email or full
/// name (case-insensitive) who are not already project members.
pub fn search_candidates<'a>(
    query: &str,
    directory: &'a [User],
    members: &[UserRef],
) -> Result<Vec<&'a User>> {
    let query = query.trim();
    if query.chars().count() < MIN_SEARCH_LEN {
        return Err(HubError::Validation(format!(
            "enter at least {MIN_SEARCH_LEN} characters to search"
        )));
    }
    let query = query.to_lowercase();

    Ok(directory
        .iter()
        .filter(|user| {
            let already_member = members.iter().any(|m| m.id == user.id);
            let matches = user.username.to_lowercase().contains(&query)
                || user.email.to_lowercase().contains(&query)
                || user
                    .full_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&query));
            matches && !already_member
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_ref(id: &str, username: &str) -> UserRef {
        UserRef {
            id: id.to_string(),
            username: username.to_string(),
            full_name: None,
        }
    }

    fn user(id: &str, username: &str, email: &str, full_name: Option<&str>) -> User {
        User {
            id: id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            full_name: full_name.map(str::to_string),
            roles: Vec::new(),
            credit_points: 0,
        }
    }

    fn project(leader_id: &str, member_ids: &[&str], approved: bool) -> Project {
        Project {
            id: "p1".to_string(),
            name: "Web Development".to_string(),
            description: None,
            problem_statement: Some("Build the thing".to_string()),
            problem_statement_approved: approved,
            leader: user_ref(leader_id, "lead"),
            members: member_ids
                .iter()
                .map(|id| user_ref(id, &format!("user-{id}")))
                .collect(),
            created_at: None,
            updated_at: None,
            tasks: Vec::new(),
        }
    }

    #[test]
    fn leader_derivation() {
        let p = project("9", &["9", "1"], false);
        assert!(ProjectView::new(&p, "9").is_leader());
        assert!(!ProjectView::new(&p, "1").is_leader());
    }

    #[test]
    fn leader_cannot_remove_self() {
        let p = project("9", &["9", "1"], false);
        let view = ProjectView::new(&p, "9");
        assert!(view.can_remove(&user_ref("1", "anna")));
        assert!(!view.can_remove(&user_ref("9", "lead")));

        // Non-leaders remove nobody.
        let view = ProjectView::new(&p, "1");
        assert!(!view.can_remove(&user_ref("9", "lead")));
    }

    #[test]
    fn approve_action_only_for_leader_until_approved() {
        let p = project("9", &["9"], false);
        assert!(ProjectView::new(&p, "9").show_approve_action());
        assert!(!ProjectView::new(&p, "1").show_approve_action());

        let p = project("9", &["9"], true);
        assert!(!ProjectView::new(&p, "9").show_approve_action());
    }

    #[test]
    fn search_excludes_existing_members() {
        let directory = vec![
            user("1", "anna", "anna@example.com", None),
            user("2", "bob", "bob@example.com", None),
        ];
        let members = vec![user_ref("1", "anna")];
        let hits = search_candidates("an", &directory, &members).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn search_matches_username_email_and_full_name() {
        let directory = vec![
            user("1", "anna", "anna@example.com", None),
            user("2", "bob", "robert@corp.example", Some("Bob Anderson")),
            user("3", "carol", "carol@corp.example", None),
        ];
        let hits = search_candidates("AN", &directory, &[]).unwrap();
        let ids: Vec<&str> = hits.iter().map(|u| u.id.as_str()).collect();
        // anna by username, bob by full name.
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn short_queries_are_rejected() {
        let directory = vec![user("1", "anna", "anna@example.com", None)];
        assert!(matches!(
            search_candidates("a", &directory, &[]).unwrap_err(),
            HubError::Validation(_)
        ));
        assert!(matches!(
            search_candidates("  a  ", &directory, &[]).unwrap_err(),
            HubError::Validation(_)
        ));
    }
}
