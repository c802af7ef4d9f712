use chrono::{NaiveDate, NaiveTime, Utc};
use colored::Colorize;
use serde_json::json;
use tabled::Tabled;

use crate::board::{StatusCounts, TaskBoard, TaskFilter};
use crate::cli::{TaskCreateArgs, TaskListArgs, Verdict};
use crate::client::ApiClient;
use crate::demo::{self, or_demo};
use crate::error::{HubError, Result};
use crate::output;
use crate::responses::MessageResponse;
use crate::session::Session;
use crate::types::{Task, TaskStatus};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Points")]
    points: i32,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        let now = Utc::now();
        let due = match task.due_date {
            Some(date) => {
                let mut cell = output::format_date(date);
                if task.is_overdue(now) {
                    cell = format!("{} {}", cell, "Overdue".red());
                } else if task.is_due_today(now) {
                    cell = format!("{} {}", cell, "Due Today".yellow());
                }
                cell
            }
            None => "-".to_string(),
        };
        Self {
            id: task.id.clone(),
            title: output::truncate(&task.title, 50),
            status: task.status.colored(),
            priority: task.priority.colored(),
            progress: format!("{}%", task.progress_percentage),
            due,
            points: task.credit_points,
        }
    }
}

/// Fetches the current user's tasks, or a project's task list when a
/// project id is given. Demo fallback kicks in only when enabled.
async fn fetch_board(
    client: &ApiClient,
    session: &Session,
    project: Option<&str>,
    demo_enabled: bool,
) -> Result<(TaskBoard, bool)> {
    let path = match project {
        Some(id) => format!("tasks/project/{id}"),
        None => "tasks/my-tasks".to_string(),
    };
    let fetched = or_demo(client.get::<Vec<Task>>(&path).await, demo_enabled, || {
        demo::tasks(&session.user)
    })?;
    let is_demo = fetched.is_demo();
    if is_demo {
        demo::notice();
    }
    Ok((TaskBoard::new(fetched.into_inner()), is_demo))
}

fn print_counts(counts: &StatusCounts) {
    if output::is_json_output() || output::is_quiet() {
        return;
    }
    println!(
        "Total: {} | Pending: {} | In Progress: {} | Under Review: {} | Completed: {} | Rejected: {}",
        counts.total,
        counts.pending,
        counts.in_progress,
        counts.under_review,
        counts.completed,
        counts.rejected
    );
}

fn display_board(board: &TaskBoard, filter: &TaskFilter, stats: bool) {
    let filtered = board.filtered(filter);
    if filtered.is_empty() {
        output::print_message("No tasks found matching the current filters.");
    } else {
        output::print_table(&filtered, |task| TaskRow::from(*task));
    }
    if stats {
        print_counts(&board.counts());
    }
}

pub async fn list(
    client: &ApiClient,
    session: &Session,
    args: TaskListArgs,
    demo_enabled: bool,
) -> Result<()> {
    let (board, _) = fetch_board(client, session, args.project.as_deref(), demo_enabled).await?;
    let filter = TaskFilter {
        status: args.status,
        priority: args.priority,
    };
    display_board(&board, &filter, args.stats);
    Ok(())
}

pub async fn show(
    client: &ApiClient,
    session: &Session,
    id: &str,
    project: Option<&str>,
    demo_enabled: bool,
) -> Result<()> {
    let (board, _) = fetch_board(client, session, project, demo_enabled).await?;
    let task = board.get(id)?;

    output::print_item(task, |task| {
        let now = Utc::now();
        println!("{} - {}", task.id, task.title.bold());
        println!();
        if let Some(desc) = &task.description {
            println!("{desc}");
            println!();
        }
        println!("Status:   {}", task.status.colored());
        println!("Priority: {}", task.priority.colored());
        println!("Progress: {}%", task.progress_percentage);
        if let Some(project) = &task.project {
            println!("Project:  {}", project.name);
        }
        println!(
            "Assignee: {}",
            task.assignee.as_ref().map(|u| u.display_name()).unwrap_or("Unassigned")
        );
        if let Some(due) = task.due_date {
            let mut line = output::format_date(due);
            if task.is_overdue(now) {
                line = format!("{} {}", line, "Overdue".red());
            } else if task.is_due_today(now) {
                line = format!("{} {}", line, "Due Today".yellow());
            }
            println!("Due:      {line}");
        }
        if let Some(created) = task.created_at {
            println!("Created:  {}", output::format_date(created));
        }
        if let Some(completed) = task.completed_at {
            println!("Completed: {}", output::format_date(completed));
        }
        println!("Points:   {}", task.credit_points);

        let actions = available_actions(task, &session.user.id);
        if !actions.is_empty() {
            println!();
            println!("Available actions: {}", actions.join(", "));
        }
    });
    Ok(())
}

/// Which lifecycle commands the current user could run on this task.
fn available_actions(task: &Task, user_id: &str) -> Vec<&'static str> {
    let mut actions = Vec::new();
    let is_assignee = task.assignee_id() == Some(user_id);
    let is_leader = task.project_leader_id() == Some(user_id);

    if is_assignee {
        match task.status {
            TaskStatus::ToDo | TaskStatus::Pending => {
                actions.push("task start");
                actions.push("task complete");
            }
            TaskStatus::InProgress => {
                actions.push("task progress");
                actions.push("task complete");
                if task.progress_percentage == 100 {
                    actions.push("task submit");
                }
            }
            TaskStatus::Rejected => actions.push("task restart"),
            _ => {}
        }
    }
    if is_leader && task.status == TaskStatus::UnderReview {
        actions.push("task review");
    }
    actions
}

pub async fn create(
    client: &ApiClient,
    session: &Session,
    args: TaskCreateArgs,
    demo_enabled: bool,
) -> Result<()> {
    let due_date = args
        .due
        .as_deref()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|d| d.and_time(NaiveTime::MIN).and_utc())
                .map_err(|_| {
                    HubError::Validation(format!("invalid due date '{raw}', expected YYYY-MM-DD"))
                })
        })
        .transpose()?;

    let mut body = json!({
        "title": &args.title,
        "description": &args.description,
        "projectId": &args.project,
        "priority": args.priority.as_wire(),
    });
    if let Some(due) = due_date {
        body["dueDate"] = json!(due.to_rfc3339());
    }
    if let Some(assignee) = &args.assignee {
        body["assigneeId"] = json!(assignee);
    }

    let created = or_demo(
        client.post::<Task, _>("tasks", &body).await,
        demo_enabled,
        || {
            let mut tasks = demo::tasks(&session.user);
            let mut task = tasks.remove(2);
            task.id = "demo-new".to_string();
            task.title = args.title.clone();
            task.description = args.description.clone();
            task.status = TaskStatus::ToDo;
            task.priority = args.priority;
            task.progress_percentage = 0;
            task.due_date = due_date;
            task
        },
    )?;

    let is_demo = created.is_demo();
    let task = created.into_inner();
    if is_demo {
        demo::notice();
        output::success(&format!("Created task '{}' (demo)", task.title));
    } else {
        output::success(&format!("Created task {} - {}", task.id, task.title));
    }
    Ok(())
}

pub async fn start(
    client: &ApiClient,
    session: &Session,
    id: &str,
    demo_enabled: bool,
) -> Result<()> {
    let (mut board, is_demo) = fetch_board(client, session, None, demo_enabled).await?;
    board.start(id, &session.user.id)?;

    if !is_demo {
        let updated: Task = client.put_empty(&format!("tasks/{id}/start")).await?;
        board.replace(updated);
    }

    output::success("Task started");
    display_board(&board, &TaskFilter::default(), true);
    Ok(())
}

pub async fn progress(
    client: &ApiClient,
    session: &Session,
    id: &str,
    percent: u8,
    demo_enabled: bool,
) -> Result<()> {
    let (mut board, is_demo) = fetch_board(client, session, None, demo_enabled).await?;
    board.update_progress(id, percent, &session.user.id)?;

    if !is_demo {
        let updated: Task = client
            .put(
                &format!("tasks/{id}/update-progress"),
                &json!({ "progressPercentage": percent }),
            )
            .await?;
        board.replace(updated);
    }

    output::success(&format!("Task progress updated to {percent}%"));
    display_board(&board, &TaskFilter::default(), true);
    Ok(())
}

pub async fn submit(
    client: &ApiClient,
    session: &Session,
    id: &str,
    demo_enabled: bool,
) -> Result<()> {
    let (mut board, is_demo) = fetch_board(client, session, None, demo_enabled).await?;
    board.submit(id, &session.user.id)?;

    if !is_demo {
        let response: MessageResponse = client.put_empty(&format!("tasks/{id}/submit")).await?;
        output::success(&response.message);
    } else {
        output::success("Task submitted for review");
    }
    display_board(&board, &TaskFilter::default(), true);
    Ok(())
}

pub async fn review(
    client: &ApiClient,
    session: &Session,
    id: &str,
    verdict: Verdict,
    project: Option<&str>,
    demo_enabled: bool,
) -> Result<()> {
    let approved = verdict == Verdict::Approve;
    let (mut board, is_demo) = fetch_board(client, session, project, demo_enabled).await?;
    board.review(id, approved, &session.user.id, Utc::now())?;

    if !is_demo {
        let response: MessageResponse = client
            .put_empty(&format!("tasks/{id}/review?approved={approved}"))
            .await?;
        output::success(&response.message);
    } else if approved {
        output::success("Task approved");
    } else {
        output::success("Task rejected, sent back for improvements");
    }
    display_board(&board, &TaskFilter::default(), true);
    Ok(())
}

pub async fn complete(
    client: &ApiClient,
    session: &Session,
    id: &str,
    demo_enabled: bool,
) -> Result<()> {
    let (mut board, is_demo) = fetch_board(client, session, None, demo_enabled).await?;

    // Shortcut completion from the list view; the full submit/review flow
    // is preferred but the endpoint exists for simple tasks.
    let task = board.get(id)?;
    if task.assignee_id() != Some(session.user.id.as_str()) {
        return Err(HubError::PermissionDenied(format!(
            "only the assignee can complete task '{}'",
            task.title
        )));
    }
    if !matches!(
        task.status,
        TaskStatus::ToDo | TaskStatus::Pending | TaskStatus::InProgress
    ) {
        return Err(HubError::InvalidTransition(format!(
            "cannot complete a task that is {}",
            task.status.label()
        )));
    }

    let earned;
    if is_demo {
        let mut updated = task.clone();
        updated.status = TaskStatus::Completed;
        updated.progress_percentage = 100;
        updated.completed_at = Some(Utc::now());
        earned = updated.credit_points;
        board.replace(updated);
    } else {
        let updated: Task = client.put_empty(&format!("tasks/{id}/complete")).await?;
        earned = updated.credit_points;
        board.replace(updated);
    }

    output::success(&format!(
        "Task completed! You earned {earned} credit points."
    ));
    display_board(&board, &TaskFilter::default(), true);
    Ok(())
}

pub async fn restart(
    client: &ApiClient,
    session: &Session,
    id: &str,
    demo_enabled: bool,
) -> Result<()> {
    let (mut board, is_demo) = fetch_board(client, session, None, demo_enabled).await?;
    board.restart(id, &session.user.id)?;

    if !is_demo {
        let updated: Task = client.put_empty(&format!("tasks/{id}/restart")).await?;
        board.replace(updated);
    }

    output::success("Task restarted");
    display_board(&board, &TaskFilter::default(), true);
    Ok(())
}

pub async fn reassign(
    client: &ApiClient,
    session: &Session,
    id: &str,
    user_id: &str,
    project: Option<&str>,
    demo_enabled: bool,
) -> Result<()> {
    let (board, is_demo) = fetch_board(client, session, project, demo_enabled).await?;

    let task = board.get(id)?;
    if task.project_leader_id() != Some(session.user.id.as_str()) {
        return Err(HubError::PermissionDenied(format!(
            "only the project leader can reassign task '{}'",
            task.title
        )));
    }

    if !is_demo {
        let response: MessageResponse = client
            .put_empty(&format!("tasks/{id}/reassign/{user_id}"))
            .await?;
        output::success(&response.message);
    } else {
        output::success("Task reassigned (demo)");
    }
    Ok(())
}
