//! Built-in demo dataset and the typed fallback wrapper around reads.
//!
//! The web client silently substituted mock data on any network error;
//! here the substitution is explicit: callers get `Sourced::Demo` only
//! when demo fallback was requested, and output marks it as such.

use chrono::{Duration, Utc};

use crate::error::{HubError, Result};
use crate::output;
use crate::types::{
    Achievement, Activity, Notification, NotificationMeta, NotificationType, Priority, Project,
    ProjectRef, Role, Task, TaskStatus, User, UserRef,
};

/// Where a fetched value came from.
#[derive(Debug)]
pub enum Sourced<T> {
    Live(T),
    Demo(T),
}

impl<T> Sourced<T> {
    pub fn is_demo(&self) -> bool {
        matches!(self, Sourced::Demo(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Sourced::Live(v) | Sourced::Demo(v) => v,
        }
    }
}

/// Wraps a read result: network-level failures become demo data when the
/// fallback is enabled; auth and validation errors always propagate.
pub fn or_demo<T>(
    result: Result<T>,
    enabled: bool,
    fallback: impl FnOnce() -> T,
) -> Result<Sourced<T>> {
    match result {
        Ok(value) => Ok(Sourced::Live(value)),
        Err(HubError::Http(_)) | Err(HubError::Api { .. }) if enabled => {
            Ok(Sourced::Demo(fallback()))
        }
        Err(err) => Err(err),
    }
}

pub fn notice() {
    output::warning("backend unreachable, showing built-in demo data");
}

fn user_ref(user: &User) -> UserRef {
    UserRef {
        id: user.id.clone(),
        username: user.username.clone(),
        full_name: user.full_name.clone(),
    }
}

fn demo_project_ref(me: &User) -> ProjectRef {
    ProjectRef {
        id: "demo-1".to_string(),
        name: "Web Development Project".to_string(),
        leader: Some(user_ref(me)),
    }
}

/// Task list mirroring the shapes the backend serves, assigned to the
/// current user so lifecycle transitions can be exercised offline. The
/// demo project is led by the current user for the same reason.
pub fn tasks(me: &User) -> Vec<Task> {
    let now = Utc::now();
    let project = demo_project_ref(me);
    let assignee = user_ref(me);

    let task = |id: &str, title: &str, description: &str, status, priority, progress, due, points| Task {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        status,
        priority,
        progress_percentage: progress,
        assignee: Some(assignee.clone()),
        project: Some(project.clone()),
        due_date: Some(due),
        created_at: Some(now - Duration::days(7)),
        completed_at: None,
        credit_points: points,
    };

    let mut list = vec![
        task(
            "demo-t1",
            "Create Login UI",
            "Design and implement the login screen with username and password fields.",
            TaskStatus::Completed,
            Priority::High,
            100,
            now,
            25,
        ),
        task(
            "demo-t2",
            "Implement User Authentication",
            "Implement the backend authentication logic for user login and registration.",
            TaskStatus::InProgress,
            Priority::High,
            60,
            now + Duration::days(1),
            40,
        ),
        task(
            "demo-t3",
            "Design Database Schema",
            "Create the database schema for the application, including tables for users, projects, and tasks.",
            TaskStatus::ToDo,
            Priority::Medium,
            0,
            now + Duration::days(7),
            30,
        ),
        task(
            "demo-t4",
            "Implement API Integration",
            "Integrate the frontend with the backend API endpoints for user management.",
            TaskStatus::ToDo,
            Priority::Low,
            0,
            now + Duration::days(7),
            35,
        ),
        task(
            "demo-t5",
            "Write User Documentation",
            "Create comprehensive user documentation explaining how to use the application.",
            TaskStatus::UnderReview,
            Priority::Medium,
            100,
            now + Duration::days(10),
            20,
        ),
    ];
    list[0].completed_at = Some(now - Duration::days(2));
    list
}

pub fn projects(me: &User) -> Vec<Project> {
    let now = Utc::now();
    vec![Project {
        id: "demo-1".to_string(),
        name: "Web Development Project".to_string(),
        description: Some("Demo project populated while the backend is unreachable.".to_string()),
        problem_statement: Some("Build a project management tool for small teams.".to_string()),
        problem_statement_approved: false,
        leader: user_ref(me),
        members: vec![
            user_ref(me),
            UserRef {
                id: "demo-u2".to_string(),
                username: "sarah85".to_string(),
                full_name: Some("Sarah Lee".to_string()),
            },
            UserRef {
                id: "demo-u3".to_string(),
                username: "developer42".to_string(),
                full_name: None,
            },
        ],
        created_at: Some(now - Duration::days(30)),
        updated_at: Some(now - Duration::days(1)),
        tasks: tasks(me),
    }]
}

pub fn project(me: &User, id: &str) -> Result<Project> {
    projects(me)
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| HubError::ProjectNotFound(id.to_string()))
}

pub fn users(me: &User) -> Vec<User> {
    vec![
        me.clone(),
        User {
            id: "demo-u2".to_string(),
            username: "sarah85".to_string(),
            email: "sarah85@example.com".to_string(),
            full_name: Some("Sarah Lee".to_string()),
            roles: vec![Role::Member],
            credit_points: 120,
        },
        User {
            id: "demo-u3".to_string(),
            username: "developer42".to_string(),
            email: "dev42@example.com".to_string(),
            full_name: None,
            roles: vec![Role::Member],
            credit_points: 45,
        },
    ]
}

pub fn profile(me: &User) -> User {
    let mut profile = me.clone();
    profile.credit_points = 75;
    profile
}

pub fn notifications() -> Vec<Notification> {
    let now = Utc::now();
    vec![
        Notification {
            id: "demo-n1".to_string(),
            message: "Task 'Implement User Authentication' has been assigned to you".to_string(),
            kind: NotificationType::TaskAssigned,
            read: false,
            created_at: now - Duration::hours(1),
            metadata: NotificationMeta {
                task_id: Some("demo-t2".to_string()),
                task_title: Some("Implement User Authentication".to_string()),
                ..NotificationMeta::default()
            },
        },
        Notification {
            id: "demo-n2".to_string(),
            message: "Your task 'Create Login UI' has been marked as completed".to_string(),
            kind: NotificationType::TaskCompleted,
            read: true,
            created_at: now - Duration::hours(2),
            metadata: NotificationMeta {
                task_id: Some("demo-t1".to_string()),
                task_title: Some("Create Login UI".to_string()),
                credit_points: Some(25),
                ..NotificationMeta::default()
            },
        },
        Notification {
            id: "demo-n3".to_string(),
            message: "New project 'Mobile App Development' has been created".to_string(),
            kind: NotificationType::ProjectCreated,
            read: false,
            created_at: now - Duration::days(1),
            metadata: NotificationMeta {
                project_id: Some("demo-2".to_string()),
                project_name: Some("Mobile App Development".to_string()),
                ..NotificationMeta::default()
            },
        },
        Notification {
            id: "demo-n4".to_string(),
            message: "You've earned 25 credit points for completing 'Create Login UI'".to_string(),
            kind: NotificationType::PointsEarned,
            read: false,
            created_at: now - Duration::hours(2),
            metadata: NotificationMeta {
                task_id: Some("demo-t1".to_string()),
                credit_points: Some(25),
                ..NotificationMeta::default()
            },
        },
    ]
}

pub fn activities() -> Vec<Activity> {
    let now = Utc::now();
    let activity = |id: &str, kind: &str, message: &str, days_ago: i64| Activity {
        id: id.to_string(),
        kind: kind.to_string(),
        message: message.to_string(),
        timestamp: now - Duration::days(days_ago),
        project_id: Some("demo-1".to_string()),
        project_name: Some("Web Development Project".to_string()),
    };
    vec![
        activity("demo-a1", "TASK_COMPLETED", "Completed task 'Create Login UI'", 1),
        activity("demo-a2", "PROJECT_JOINED", "Joined project 'Mobile App Development'", 2),
        activity("demo-a3", "TASK_ASSIGNED", "Assigned to task 'Implement API Integration'", 3),
        activity("demo-a4", "COMMENT_ADDED", "Commented on task 'Database Design'", 4),
        activity(
            "demo-a5",
            "ACHIEVEMENT_UNLOCKED",
            "Unlocked achievement 'First Task Completed'",
            5,
        ),
    ]
}

pub fn achievements() -> Vec<Achievement> {
    let now = Utc::now();
    let achievement = |id: &str, name: &str, description: &str, unlocked_days_ago: Option<i64>| Achievement {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        unlocked: unlocked_days_ago.is_some(),
        unlocked_at: unlocked_days_ago.map(|d| now - Duration::days(d)),
    };
    vec![
        achievement("demo-ach1", "First Task Completed", "Complete your first task", Some(5)),
        achievement("demo-ach2", "Problem Solver", "Approve a problem statement", None),
        achievement("demo-ach3", "Team Player", "Join 3 different projects", Some(2)),
        achievement(
            "demo-ach4",
            "Quality Focused",
            "Get 5 tasks approved without rejections",
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn me() -> User {
        User {
            id: "1".to_string(),
            username: "jsmith".to_string(),
            email: "jsmith@example.com".to_string(),
            full_name: Some("John Smith".to_string()),
            roles: vec![Role::Member],
            credit_points: 0,
        }
    }

    #[test]
    fn fallback_only_on_network_failures() {
        let ok: Result<i32> = Ok(1);
        assert!(!or_demo(ok, true, || 9).unwrap().is_demo());

        let api_err: Result<i32> = Err(HubError::Api {
            status: 500,
            message: "boom".to_string(),
        });
        assert!(or_demo(api_err, true, || 9).unwrap().is_demo());

        // Disabled fallback propagates the failure.
        let api_err: Result<i32> = Err(HubError::Api {
            status: 500,
            message: "boom".to_string(),
        });
        assert!(or_demo(api_err, false, || 9).is_err());

        // Auth failures are never papered over.
        let auth: Result<i32> = Err(HubError::AuthExpired);
        assert!(matches!(
            or_demo(auth, true, || 9).unwrap_err(),
            HubError::AuthExpired
        ));
    }

    #[test]
    fn demo_tasks_are_transitionable_by_me() {
        let me = me();
        let tasks = tasks(&me);
        assert!(tasks.iter().all(|t| t.assignee_id() == Some("1")));
        assert!(tasks.iter().all(|t| t.project_leader_id() == Some("1")));
        // One of each interesting status.
        assert!(tasks.iter().any(|t| t.status == TaskStatus::UnderReview));
        assert!(tasks.iter().any(|t| t.status.is_pending()));
    }
}
