use std::io::{self, Write};

use serde_json::json;

use crate::cli::{LoginArgs, SignupArgs};
use crate::client::ApiClient;
use crate::config::Config;
use crate::error::{HubError, Result};
use crate::output;
use crate::responses::{MessageResponse, SigninResponse};
use crate::session::Session;

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn login(config: &Config, args: LoginArgs) -> Result<()> {
    let username = match args.username {
        Some(u) => u,
        None => prompt("Username")?,
    };
    let password = prompt("Password")?;

    if username.is_empty() || password.is_empty() {
        return Err(HubError::Validation(
            "username and password are required".to_string(),
        ));
    }

    let client = ApiClient::unauthenticated(&config.api_url())?;
    let response: SigninResponse = client
        .post("auth/signin", &json!({ "username": username, "password": password }))
        .await?;

    let session = response.into_session();
    session.save()?;

    output::success(&format!(
        "Signed in as {} ({})",
        session.user.username,
        session.user.roles_label()
    ));
    Ok(())
}

pub async fn signup(config: &Config, args: SignupArgs) -> Result<()> {
    let password = prompt("Password")?;
    let confirm = prompt("Confirm password")?;

    if password.is_empty() {
        return Err(HubError::Validation("password is required".to_string()));
    }
    if password != confirm {
        return Err(HubError::Validation("passwords do not match".to_string()));
    }

    let client = ApiClient::unauthenticated(&config.api_url())?;
    let body = json!({
        "username": args.username,
        "email": args.email,
        "password": password,
        "fullName": args.full_name.unwrap_or_default(),
        // The signup endpoint takes role names without the ROLE_ prefix.
        "roles": [args.role.as_signup()],
    });
    let response: MessageResponse = client.post("auth/signup", &body).await?;

    output::success(&response.message);
    output::print_message("You can now sign in with 'taskhub login'.");
    Ok(())
}

pub fn logout() -> Result<()> {
    Session::clear()?;
    output::success("Signed out, stored session cleared");
    Ok(())
}

pub fn whoami(session: &Session) -> Result<()> {
    output::print_item(&session.user, |user| {
        println!("{} ({})", user.display_name(), user.username);
        println!("Email: {}", user.email);
        println!("Roles: {}", user.roles_label());
    });
    Ok(())
}
