mod board;
mod cli;
mod client;
mod commands;
mod config;
mod demo;
mod error;
mod feed;
mod output;
mod project_view;
mod responses;
mod session;
mod types;

use std::error::Error as _;
use std::io;
use std::process::exit;

use clap::{CommandFactory, Parser};

use crate::cli::{
    Cli, Commands, NotificationCommands, ProfileCommands, ProjectCommands, TaskCommands,
};
use crate::client::ApiClient;
use crate::config::Config;
use crate::error::{HubError, Result};
use crate::session::Session;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    output::set_json_output(cli.json);
    output::set_quiet(cli.quiet);
    let verbose = cli.verbose;

    if let Err(err) = run(cli).await {
        if matches!(err, HubError::AuthExpired) {
            let _ = Session::clear();
        }
        eprintln!("Error: {err}");
        if verbose {
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
        }
        exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let demo = config.demo_enabled(cli.demo);

    // Commands that work without a stored session.
    match cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "taskhub", &mut io::stdout());
            return Ok(());
        }
        Commands::Login(args) => return commands::auth::login(&config, args).await,
        Commands::Signup(args) => return commands::auth::signup(&config, args).await,
        Commands::Logout => return commands::auth::logout(),
        _ => {}
    }

    let session = Session::load_valid()?;
    let client = ApiClient::new(&config.api_url(), &session)?;

    match cli.command {
        Commands::Whoami => commands::auth::whoami(&session),
        Commands::Task { action } => match action {
            TaskCommands::List(args) => commands::tasks::list(&client, &session, args, demo).await,
            TaskCommands::Show { id, project } => {
                commands::tasks::show(&client, &session, &id, project.as_deref(), demo).await
            }
            TaskCommands::Create(args) => {
                commands::tasks::create(&client, &session, args, demo).await
            }
            TaskCommands::Start { id } => commands::tasks::start(&client, &session, &id, demo).await,
            TaskCommands::Progress { id, percent } => {
                commands::tasks::progress(&client, &session, &id, percent, demo).await
            }
            TaskCommands::Submit { id } => {
                commands::tasks::submit(&client, &session, &id, demo).await
            }
            TaskCommands::Review { id, verdict, project } => {
                commands::tasks::review(&client, &session, &id, verdict, project.as_deref(), demo)
                    .await
            }
            TaskCommands::Complete { id } => {
                commands::tasks::complete(&client, &session, &id, demo).await
            }
            TaskCommands::Restart { id } => {
                commands::tasks::restart(&client, &session, &id, demo).await
            }
            TaskCommands::Reassign { id, user_id, project } => {
                commands::tasks::reassign(
                    &client,
                    &session,
                    &id,
                    &user_id,
                    project.as_deref(),
                    demo,
                )
                .await
            }
        },
        Commands::Tasks(args) => commands::tasks::list(&client, &session, args, demo).await,
        Commands::Project { action } => match action {
            ProjectCommands::List => commands::projects::list(&client, &session, demo).await,
            ProjectCommands::Show { id } => {
                commands::projects::show(&client, &session, &id, demo).await
            }
            ProjectCommands::Create(args) => commands::projects::create(&client, args).await,
            ProjectCommands::Update(args) => commands::projects::update(&client, args).await,
            ProjectCommands::Approve { id } => {
                commands::projects::approve(&client, &session, &id, demo).await
            }
            ProjectCommands::AddMember { project_id, user_id } => {
                commands::projects::add_member(&client, &project_id, &user_id).await
            }
            ProjectCommands::RemoveMember { project_id, user_id } => {
                commands::projects::remove_member(&client, &session, &project_id, &user_id, demo)
                    .await
            }
            ProjectCommands::FindUser { project_id, query } => {
                commands::projects::find_user(&client, &session, &project_id, &query, demo).await
            }
        },
        Commands::Projects => commands::projects::list(&client, &session, demo).await,
        Commands::Profile { action } => match action {
            ProfileCommands::Show => commands::profile::show(&client, &session, demo).await,
            ProfileCommands::Update(args) => commands::profile::update(&client, args).await,
            ProfileCommands::Activity => commands::profile::activity(&client, demo).await,
            ProfileCommands::Achievements => commands::profile::achievements(&client, demo).await,
        },
        Commands::Notifications { action } => match action {
            NotificationCommands::List => commands::notifications::list(&client, demo).await,
            NotificationCommands::Watch => commands::notifications::watch(&client, demo).await,
            NotificationCommands::Read { id } => {
                commands::notifications::read(&client, &id, demo).await
            }
            NotificationCommands::ReadAll => commands::notifications::read_all(&client, demo).await,
        },
        // Handled before the session is loaded.
        Commands::Completions { .. }
        | Commands::Login(_)
        | Commands::Signup(_)
        | Commands::Logout => unreachable!(),
    }
}
