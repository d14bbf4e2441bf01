//! User and credential entities.

use serde::{Deserialize, Serialize};

/// Profile returned by `GET /users/me` and `POST /users/`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Server-assigned identifier
    #[serde(default)]
    pub id: i64,
    /// Login email
    pub email: String,
}

/// Bearer credential returned by `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    /// Opaque token value
    pub access_token: String,
    /// Usually "bearer"
    pub token_type: String,
}

impl std::fmt::Debug for AccessToken {
    // Keep the token itself out of logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Form body of `POST /auth/login`.
#[derive(Serialize)]
pub struct LoginForm<'a> {
    /// The user's email, sent under the OAuth2 field name
    pub username: &'a str,
    /// Password
    pub password: &'a str,
}

/// JSON body of `POST /users/`.
#[derive(Serialize)]
pub struct NewUser<'a> {
    /// Email
    pub email: &'a str,
    /// Password
    pub password: &'a str,
}
