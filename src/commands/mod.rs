pub mod auth;
pub mod notifications;
pub mod profile;
pub mod projects;
pub mod tasks;
