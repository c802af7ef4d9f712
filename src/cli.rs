use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::board::{PriorityFilter, StatusFilter};
use crate::types::{Priority, Role};

#[derive(Parser)]
#[command(name = "taskhub")]
#[command(about = "A CLI for the TaskHub project management tool", version)]
#[command(after_help = "EXAMPLES:
    taskhub login                        Sign in and store the session
    taskhub tasks --status pending       List your not-yet-started tasks
    taskhub task start 42                Start an assigned task
    taskhub task progress 42 80          Report 80% progress
    taskhub task review 42 approve       Approve a submitted task (leader)
    taskhub notifications watch          Poll for new notifications")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Fall back to built-in demo data when the backend is unreachable
    #[arg(long, global = true)]
    pub demo: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    #[command(after_help = "EXAMPLES:
    taskhub login
    taskhub login --username jsmith")]
    Login(LoginArgs),
    /// Register a new account
    #[command(after_help = "EXAMPLES:
    taskhub signup --username jsmith --email j@example.com --role member")]
    Signup(SignupArgs),
    /// Clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Manage your tasks
    #[command(
        alias = "t",
        after_help = "EXAMPLES:
    taskhub task list --status in-progress
    taskhub task show 42
    taskhub task start 42
    taskhub task progress 42 100
    taskhub task submit 42
    taskhub task review 42 approve --project 7"
    )]
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// List your tasks (alias for 'task list')
    #[command(after_help = "EXAMPLES:
    taskhub tasks
    taskhub tasks --status pending --priority high
    taskhub tasks --project 7 --stats")]
    Tasks(TaskListArgs),
    /// Manage projects
    #[command(
        alias = "p",
        after_help = "EXAMPLES:
    taskhub project show 7
    taskhub project create -n \"Web Development\"
    taskhub project add-member 7 42
    taskhub project find-user 7 anna"
    )]
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// List projects (alias for 'project list')
    Projects,
    /// View and edit your profile
    #[command(after_help = "EXAMPLES:
    taskhub profile show
    taskhub profile activity
    taskhub profile update --full-name \"John Smith\"")]
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Notification feed
    #[command(
        alias = "n",
        after_help = "EXAMPLES:
    taskhub notifications list
    taskhub notifications watch
    taskhub notifications read-all"
    )]
    Notifications {
        #[command(subcommand)]
        action: NotificationCommands,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    taskhub completions bash > ~/.bash_completion.d/taskhub
    taskhub completions zsh > ~/.zfunc/_taskhub")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
pub struct LoginArgs {
    /// Username (prompted when omitted)
    #[arg(long, short)]
    pub username: Option<String>,
}

#[derive(Args)]
pub struct SignupArgs {
    /// Username
    #[arg(long, short)]
    pub username: String,

    /// Email address
    #[arg(long, short)]
    pub email: String,

    /// Full name
    #[arg(long)]
    pub full_name: Option<String>,

    /// Account role
    #[arg(long, value_enum, default_value = "member")]
    pub role: Role,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks assigned to you (or a project's tasks)
    List(TaskListArgs),
    /// Show task details and available actions
    Show {
        /// Task id
        id: String,
        /// Look the task up in a project's task list instead of your own
        #[arg(long)]
        project: Option<String>,
    },
    /// Create a new task (project leaders)
    Create(TaskCreateArgs),
    /// Start an assigned task
    Start {
        /// Task id
        id: String,
    },
    /// Report progress on a task you started
    Progress {
        /// Task id
        id: String,
        /// Progress percentage (0-100)
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,
    },
    /// Submit a finished task for review
    Submit {
        /// Task id
        id: String,
    },
    /// Approve or reject a submitted task (project leader)
    Review {
        /// Task id
        id: String,
        /// Review verdict
        verdict: Verdict,
        /// Project whose task list holds the task
        #[arg(long)]
        project: Option<String>,
    },
    /// Mark a task completed directly
    Complete {
        /// Task id
        id: String,
    },
    /// Resume a rejected task
    Restart {
        /// Task id
        id: String,
    },
    /// Reassign a task to another member (project leader)
    Reassign {
        /// Task id
        id: String,
        /// New assignee's user id
        user_id: String,
        /// Project whose task list holds the task
        #[arg(long)]
        project: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verdict {
    Approve,
    Reject,
}

#[derive(Args, Clone)]
pub struct TaskListArgs {
    /// Filter by status (pending matches both PENDING and TO_DO)
    #[arg(long, value_enum, default_value = "all")]
    pub status: StatusFilter,

    /// Filter by priority
    #[arg(long, value_enum, default_value = "all")]
    pub priority: PriorityFilter,

    /// List a project's tasks instead of your own
    #[arg(long)]
    pub project: Option<String>,

    /// Show per-status counters
    #[arg(long)]
    pub stats: bool,
}

#[derive(Args)]
pub struct TaskCreateArgs {
    /// Task title
    #[arg(long, short)]
    pub title: String,

    /// Task description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Project id
    #[arg(long)]
    pub project: String,

    /// Assignee's user id (must be a project member)
    #[arg(long)]
    pub assignee: Option<String>,

    /// Priority
    #[arg(long, value_enum, default_value = "medium")]
    pub priority: Priority,

    /// Due date (e.g., 2026-09-01)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects
    List,
    /// Show project details, members and tasks
    Show {
        /// Project id
        id: String,
    },
    /// Create a project
    Create(ProjectCreateArgs),
    /// Update name, description or problem statement
    Update(ProjectUpdateArgs),
    /// Approve the problem statement (leader)
    Approve {
        /// Project id
        id: String,
    },
    /// Add a member (leader)
    AddMember {
        /// Project id
        project_id: String,
        /// User id to add
        user_id: String,
    },
    /// Remove a member (leader)
    RemoveMember {
        /// Project id
        project_id: String,
        /// User id to remove
        user_id: String,
    },
    /// Search the user directory for members to add
    FindUser {
        /// Project id
        project_id: String,
        /// Search query (min 2 characters; matches username, email, full name)
        query: String,
    },
}

#[derive(Args)]
pub struct ProjectCreateArgs {
    /// Project name
    #[arg(long, short)]
    pub name: String,

    /// Project description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Problem statement
    #[arg(long)]
    pub problem_statement: Option<String>,
}

#[derive(Args)]
pub struct ProjectUpdateArgs {
    /// Project id
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New problem statement
    #[arg(long)]
    pub problem_statement: Option<String>,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show profile, credit points and level
    Show,
    /// Update profile fields
    Update(ProfileUpdateArgs),
    /// Recent activity history
    Activity,
    /// Achievements and unlock state
    Achievements,
}

#[derive(Args)]
pub struct ProfileUpdateArgs {
    /// Full name
    #[arg(long)]
    pub full_name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Short bio
    #[arg(long)]
    pub bio: Option<String>,
}

#[derive(Subcommand)]
pub enum NotificationCommands {
    /// Show the notification feed
    List,
    /// Poll for new notifications every 30 seconds
    Watch,
    /// Mark one notification as read
    Read {
        /// Notification id
        id: String,
    },
    /// Mark every notification as read
    ReadAll,
}
