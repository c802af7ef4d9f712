use colored::Colorize;
use serde_json::json;

use crate::cli::ProfileUpdateArgs;
use crate::client::ApiClient;
use crate::demo::{self, or_demo};
use crate::error::{HubError, Result};
use crate::output;
use crate::session::Session;
use crate::types::{Achievement, Activity, CreditLevel, User};

pub async fn show(client: &ApiClient, session: &Session, demo_enabled: bool) -> Result<()> {
    let fetched = or_demo(
        client.get::<User>("users/profile").await,
        demo_enabled,
        || demo::profile(&session.user),
    )?;
    if fetched.is_demo() {
        demo::notice();
    }
    let profile = fetched.into_inner();

    output::print_item(&profile, |profile| {
        let level = CreditLevel::from_points(profile.credit_points);
        println!("{} ({})", profile.display_name().bold(), profile.username);
        println!("Email: {}", profile.email);
        println!("Roles: {}", profile.roles_label());
        println!();
        println!(
            "Level {} - {} credit points ({}% to level {}, {} points to go)",
            level.level,
            profile.credit_points,
            level.progress_percentage,
            level.level + 1,
            level.points_to_next
        );
    });
    Ok(())
}

pub async fn update(client: &ApiClient, args: ProfileUpdateArgs) -> Result<()> {
    if args.full_name.is_none() && args.email.is_none() && args.bio.is_none() {
        return Err(HubError::Validation(
            "nothing to update, pass --full-name, --email or --bio".to_string(),
        ));
    }

    let mut body = serde_json::Map::new();
    if let Some(full_name) = args.full_name {
        body.insert("fullName".to_string(), json!(full_name));
    }
    if let Some(email) = args.email {
        body.insert("email".to_string(), json!(email));
    }
    if let Some(bio) = args.bio {
        body.insert("bio".to_string(), json!(bio));
    }

    let profile: User = client.put("users/profile", &body).await?;
    output::success(&format!("Profile updated for {}", profile.username));
    Ok(())
}

pub async fn activity(client: &ApiClient, demo_enabled: bool) -> Result<()> {
    let fetched = or_demo(
        client.get::<Vec<Activity>>("users/activity").await,
        demo_enabled,
        demo::activities,
    )?;
    if fetched.is_demo() {
        demo::notice();
    }
    let activities = fetched.into_inner();

    if activities.is_empty() {
        output::print_message("No activity yet.");
        return Ok(());
    }

    output::print_item(&activities, |activities| {
        for entry in activities {
            let mut line = format!(
                "{} {} ({})",
                entry.symbol(),
                entry.message,
                output::format_relative(entry.timestamp)
            );
            if let Some(project) = &entry.project_name {
                line.push_str(&format!(" - {project}"));
            }
            println!("{line}");
        }
    });
    Ok(())
}

pub async fn achievements(client: &ApiClient, demo_enabled: bool) -> Result<()> {
    let fetched = or_demo(
        client.get::<Vec<Achievement>>("users/achievements").await,
        demo_enabled,
        demo::achievements,
    )?;
    if fetched.is_demo() {
        demo::notice();
    }
    let achievements = fetched.into_inner();

    if achievements.is_empty() {
        output::print_message("No achievements yet.");
        return Ok(());
    }

    output::print_item(&achievements, |achievements| {
        let unlocked = achievements.iter().filter(|a| a.unlocked).count();
        println!("Achievements ({unlocked}/{} unlocked)", achievements.len());
        println!();
        for achievement in achievements {
            if achievement.unlocked {
                let when = achievement
                    .unlocked_at
                    .map(|dt| format!(" ({})", output::format_date(dt)))
                    .unwrap_or_default();
                println!("{} {}{when}", "★".yellow(), achievement.name.bold());
            } else {
                println!("{} {}", "🔒", achievement.name.dimmed());
            }
            println!("   {}", achievement.description);
        }
    });
    Ok(())
}
