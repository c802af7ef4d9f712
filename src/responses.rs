use serde::Deserialize;

use crate::session::Session;
use crate::types::{Role, User};

/// Plain acknowledgement body most mutation endpoints answer with.
#[derive(Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of POST /auth/signin: the bearer token plus the signed-in user's
/// identity, cached locally as the profile blob.
#[derive(Deserialize, Debug)]
pub struct SigninResponse {
    pub token: String,
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl SigninResponse {
    pub fn into_session(self) -> Session {
        Session {
            token: self.token,
            user: User {
                id: self.id,
                username: self.username,
                email: self.email,
                full_name: self.full_name,
                roles: self.roles,
                credit_points: 0,
            },
        }
    }
}
