use colored::Colorize;
use serde_json::json;
use tabled::Tabled;

use crate::cli::{ProjectCreateArgs, ProjectUpdateArgs};
use crate::client::ApiClient;
use crate::demo::{self, or_demo};
use crate::error::{HubError, Result};
use crate::output;
use crate::project_view::{search_candidates, ProjectView};
use crate::responses::MessageResponse;
use crate::session::Session;
use crate::types::{Project, User, UserRef};

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Leader")]
    leader: String,
    #[tabled(rename = "Members")]
    members: usize,
    #[tabled(rename = "Tasks")]
    tasks: usize,
    #[tabled(rename = "Statement")]
    statement: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: output::truncate(&project.name, 40),
            leader: project.leader.display_name().to_string(),
            members: project.members.len(),
            tasks: project.tasks.len(),
            statement: if project.problem_statement_approved {
                "Approved".green().to_string()
            } else {
                "Pending approval".yellow().to_string()
            },
        }
    }
}

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
}

async fn fetch_project(
    client: &ApiClient,
    session: &Session,
    id: &str,
    demo_enabled: bool,
) -> Result<(Project, bool)> {
    let live = client.get::<Project>(&format!("projects/{id}")).await;
    let fetched = or_demo(live.map(Ok), demo_enabled, || {
        demo::project(&session.user, id)
    })?;
    let is_demo = fetched.is_demo();
    if is_demo {
        demo::notice();
    }
    Ok((fetched.into_inner()?, is_demo))
}

pub async fn list(client: &ApiClient, session: &Session, demo_enabled: bool) -> Result<()> {
    let fetched = or_demo(
        client.get::<Vec<Project>>("projects").await,
        demo_enabled,
        || demo::projects(&session.user),
    )?;
    if fetched.is_demo() {
        demo::notice();
    }
    let projects = fetched.into_inner();

    if projects.is_empty() {
        output::print_message("No projects yet.");
    } else {
        output::print_table(&projects, |p| ProjectRow::from(p));
    }
    Ok(())
}

pub async fn show(
    client: &ApiClient,
    session: &Session,
    id: &str,
    demo_enabled: bool,
) -> Result<()> {
    let (project, _) = fetch_project(client, session, id, demo_enabled).await?;
    let view = ProjectView::new(&project, &session.user.id);

    output::print_item(&project, |project| {
        println!("{} - {}", project.id, project.name.bold());
        println!();
        if let Some(desc) = &project.description {
            println!("{desc}");
            println!();
        }
        if let Some(statement) = &project.problem_statement {
            let state = if project.problem_statement_approved {
                "Approved".green().to_string()
            } else {
                "Pending approval".yellow().to_string()
            };
            println!("Problem statement ({state}):");
            println!("  {statement}");
            println!();
        }
        println!("Leader: {}", project.leader.display_name());
        if let Some(created) = project.created_at {
            println!("Created: {}", output::format_date(created));
        }

        if !project.members.is_empty() {
            println!();
            println!("Members:");
            let rows: Vec<MemberRow> = project
                .members
                .iter()
                .map(|member| MemberRow {
                    id: member.id.clone(),
                    username: member.username.clone(),
                    name: member.full_name.clone().unwrap_or_default(),
                    role: view.member_role(member).to_string(),
                })
                .collect();
            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{table}");
        }

        if !project.tasks.is_empty() {
            println!();
            println!("Tasks: {} (see 'taskhub tasks --project {}')", project.tasks.len(), project.id);
        }

        if view.show_approve_action() {
            println!();
            println!(
                "The problem statement awaits your approval: taskhub project approve {}",
                project.id
            );
        }
    });
    Ok(())
}

pub async fn create(client: &ApiClient, args: ProjectCreateArgs) -> Result<()> {
    let body = json!({
        "name": args.name,
        "description": args.description,
        "problemStatement": args.problem_statement,
    });
    let project: Project = client.post("projects", &body).await?;
    output::success(&format!("Created project {} - {}", project.id, project.name));
    Ok(())
}

pub async fn update(client: &ApiClient, args: ProjectUpdateArgs) -> Result<()> {
    if args.name.is_none() && args.description.is_none() && args.problem_statement.is_none() {
        return Err(HubError::Validation(
            "nothing to update, pass --name, --description or --problem-statement".to_string(),
        ));
    }

    let mut body = serde_json::Map::new();
    if let Some(name) = args.name {
        body.insert("name".to_string(), json!(name));
    }
    if let Some(description) = args.description {
        body.insert("description".to_string(), json!(description));
    }
    if let Some(statement) = args.problem_statement {
        body.insert("problemStatement".to_string(), json!(statement));
    }

    let project: Project = client
        .put(&format!("projects/{}", args.id), &body)
        .await?;
    output::success(&format!("Updated project {}", project.name));
    Ok(())
}

pub async fn approve(
    client: &ApiClient,
    session: &Session,
    id: &str,
    demo_enabled: bool,
) -> Result<()> {
    let (project, is_demo) = fetch_project(client, session, id, demo_enabled).await?;
    let view = ProjectView::new(&project, &session.user.id);

    if !view.is_leader() {
        return Err(HubError::PermissionDenied(format!(
            "only the project leader can approve the problem statement of '{}'",
            project.name
        )));
    }
    if project.problem_statement_approved {
        output::print_message("Problem statement is already approved.");
        return Ok(());
    }

    if !is_demo {
        // Body shape varies across backend revisions; only the status matters.
        let _: serde_json::Value = client
            .put_empty(&format!("projects/{id}/approve-problem-statement"))
            .await?;
    }
    output::success(&format!("Problem statement of '{}' approved", project.name));
    Ok(())
}

pub async fn add_member(client: &ApiClient, project_id: &str, user_id: &str) -> Result<()> {
    let response: MessageResponse = client
        .post(
            &format!("projects/{project_id}/members/{user_id}"),
            &json!({}),
        )
        .await?;
    output::success(&response.message);
    Ok(())
}

pub async fn remove_member(
    client: &ApiClient,
    session: &Session,
    project_id: &str,
    user_id: &str,
    demo_enabled: bool,
) -> Result<()> {
    let (project, is_demo) = fetch_project(client, session, project_id, demo_enabled).await?;
    let view = ProjectView::new(&project, &session.user.id);

    let member = project
        .members
        .iter()
        .find(|m| m.id == user_id)
        .ok_or_else(|| HubError::UserNotFound(user_id.to_string()))?;
    if !view.can_remove(member) {
        let reason = if member.id == session.user.id {
            "the project leader cannot remove themselves".to_string()
        } else {
            format!("only the project leader can remove members from '{}'", project.name)
        };
        return Err(HubError::PermissionDenied(reason));
    }

    if !is_demo {
        let response: MessageResponse = client
            .delete(&format!("projects/{project_id}/members/{user_id}"))
            .await?;
        output::success(&response.message);
    } else {
        output::success(&format!("Removed {} from the project", member.username));
    }
    Ok(())
}

pub async fn find_user(
    client: &ApiClient,
    session: &Session,
    project_id: &str,
    query: &str,
    demo_enabled: bool,
) -> Result<()> {
    let (project, _) = fetch_project(client, session, project_id, demo_enabled).await?;

    let fetched = or_demo(client.get::<Vec<User>>("users").await, demo_enabled, || {
        demo::users(&session.user)
    })?;
    let directory = fetched.into_inner();

    // The leader list counts as a member for exclusion purposes.
    let mut members: Vec<UserRef> = project.members.clone();
    if !members.iter().any(|m| m.id == project.leader.id) {
        members.push(project.leader.clone());
    }

    let candidates = search_candidates(query, &directory, &members)?;
    if candidates.is_empty() {
        output::print_message(&format!("No users matching '{query}' to add."));
        return Ok(());
    }

    output::print_table(&candidates, |user| MemberRow {
        id: user.id.clone(),
        username: user.username.clone(),
        name: user.full_name.clone().unwrap_or_default(),
        role: user.roles_label(),
    });
    Ok(())
}
