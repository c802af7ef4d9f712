//! Stored sign-in state: an opaque bearer token plus the cached user
//! profile, persisted as two entries under the config directory (the CLI
//! analog of the web client's two local-storage keys).

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::config::Config;
use crate::error::{HubError, Result};
use crate::types::User;

const TOKEN_FILE: &str = "auth-token";
const USER_FILE: &str = "user-info.json";

#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    fn store_dir() -> Result<PathBuf> {
        Ok(Config::config_path()?
            .parent()
            .ok_or(HubError::NoConfigDir)?
            .to_path_buf())
    }

    /// Loads the stored session and checks the token is still usable.
    /// An expired token clears the store, like the web client clearing
    /// local storage before bouncing to the sign-in page.
    pub fn load_valid() -> Result<Self> {
        let dir = Self::store_dir()?;
        Self::load_valid_in(&dir, Utc::now())
    }

    pub fn load_valid_in(dir: &Path, now: DateTime<Utc>) -> Result<Self> {
        let session = Self::load_in(dir)?.ok_or(HubError::NotSignedIn)?;
        if token_expired(&session.token, now) {
            Self::clear_in(dir)?;
            return Err(HubError::AuthExpired);
        }
        Ok(session)
    }

    pub fn load_in(dir: &Path) -> Result<Option<Self>> {
        let token_path = dir.join(TOKEN_FILE);
        if !token_path.exists() {
            return Ok(None);
        }
        let token = std::fs::read_to_string(&token_path)?.trim().to_string();
        let user_json = std::fs::read_to_string(dir.join(USER_FILE))?;
        let user = serde_json::from_str(&user_json).map_err(HubError::SessionParse)?;
        Ok(Some(Session { token, user }))
    }

    pub fn save(&self) -> Result<()> {
        self.save_in(&Self::store_dir()?)
    }

    pub fn save_in(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(TOKEN_FILE), &self.token)?;
        std::fs::write(dir.join(USER_FILE), serde_json::to_string_pretty(&self.user)?)?;
        Ok(())
    }

    pub fn clear() -> Result<()> {
        Self::clear_in(&Self::store_dir()?)
    }

    pub fn clear_in(dir: &Path) -> Result<()> {
        for file in [TOKEN_FILE, USER_FILE] {
            let path = dir.join(file);
            if path.exists() {
                std::fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    /// Headers every authenticated request carries.
    pub fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| HubError::Validation("token contains invalid header characters".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

/// True only for a structured JWT whose `exp` claim is in the past.
/// Opaque tokens carry no expiry the client can inspect and pass through.
pub fn token_expired(token: &str, now: DateTime<Utc>) -> bool {
    match jwt_expiry(token) {
        Some(exp) => exp < now,
        None => false,
    }
}

fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut parts = token.split('.');
    let (_header, payload) = (parts.next()?, parts.next()?);
    parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.get("exp")?.as_i64()?, 0)
}

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        HubError::SessionParse(err)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::types::Role;

    fn jwt_with_exp(exp: DateTime<Utc>) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS512","typ":"JWT"}"#);
        let payload =
            URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"jsmith","exp":{}}}"#, exp.timestamp()));
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    fn profile() -> User {
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
    fn opaque_tokens_never_expire_client_side() {
        assert!(!token_expired("some-opaque-token", Utc::now()));
        assert!(!token_expired("a.b", Utc::now()));
    }

    #[test]
    fn jwt_expiry_is_honored() {
        let now = Utc::now();
        assert!(token_expired(&jwt_with_exp(now - Duration::seconds(1)), now));
        assert!(!token_expired(&jwt_with_exp(now + Duration::hours(1)), now));
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session {
            token: "opaque".to_string(),
            user: profile(),
        };
        session.save_in(dir.path()).unwrap();

        let loaded = Session::load_in(dir.path()).unwrap().unwrap();
        assert_eq!(loaded.token, "opaque");
        assert_eq!(loaded.user.username, "jsmith");
    }

    #[test]
    fn expired_token_clears_store_and_signals() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc::now();
        let session = Session {
            token: jwt_with_exp(now - Duration::seconds(1)),
            user: profile(),
        };
        session.save_in(dir.path()).unwrap();

        let err = Session::load_valid_in(dir.path(), now).unwrap_err();
        assert!(matches!(err, HubError::AuthExpired));
        // Credentials were wiped.
        assert!(Session::load_in(dir.path()).unwrap().is_none());
    }

    #[test]
    fn missing_session_reports_not_signed_in() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Session::load_valid_in(dir.path(), Utc::now()).unwrap_err(),
            HubError::NotSignedIn
        ));
    }

    #[test]
    fn auth_headers_carry_bearer_and_content_type() {
        let session = Session {
            token: "tok123".to_string(),
            user: profile(),
        };
        let headers = session.auth_headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok123");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }
}
