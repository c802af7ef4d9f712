mod activity;
mod notification;
mod priority;
mod project;
mod task;
mod user;

pub use activity::{Achievement, Activity};
pub use notification::{Notification, NotificationMeta, NotificationType};
pub use priority::Priority;
pub use project::{Project, ProjectRef};
pub use task::{Task, TaskStatus};
pub use user::{CreditLevel, Role, User, UserRef};
