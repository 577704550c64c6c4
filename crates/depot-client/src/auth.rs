//! # Auth Client
//!
//! Login, registration and password reset. These are the only requests the
//! console sends without an `Authorization` header; they produce (or reset)
//! the token every other request needs.
//!
//! ```text
//!  login ──► POST /api/user/login { email, password } ──► { token } ──► token file
//!  register ──► POST /api/user { name, email, password }
//!  forgot_password ──► POST /api/user/forgot-password { email }
//!  reset_password ──► POST /api/user/reset-password { token, newPassword }
//!  logout ──► token file removed (no request)
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    new_password: &'a str,
}

/// Client for the `/api/user` endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchanges credentials for a token and persists it.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<String> {
        let response: LoginResponse = self
            .api
            .post_public("/api/user/login", &LoginRequest { email, password })
            .await?;

        let token = response
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ClientError::Decode("login response carried no token".into()))?;

        self.api.tokens().store(&token)?;
        info!(email, "Logged in");
        Ok(token)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> ClientResult<()> {
        self.api
            .post_public_ignored("/api/user", &RegisterRequest { name, email, password })
            .await?;
        info!(email, "Registered user");
        Ok(())
    }

    /// Asks the server to email a reset link.
    pub async fn forgot_password(&self, email: &str) -> ClientResult<()> {
        self.api
            .post_public_ignored("/api/user/forgot-password", &ForgotPasswordRequest { email })
            .await?;
        info!(email, "Password reset requested");
        Ok(())
    }

    /// Sets a new password using the token from the reset link.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> ClientResult<()> {
        self.api
            .post_public_ignored(
                "/api/user/reset-password",
                &ResetPasswordRequest { token, new_password },
            )
            .await?;
        info!("Password reset completed");
        Ok(())
    }

    /// Removes the persisted token. Sends nothing.
    pub fn logout(&self) -> ClientResult<()> {
        self.api.tokens().clear()?;
        info!("Logged out");
        Ok(())
    }
}
