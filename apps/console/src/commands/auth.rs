//! # Auth Pages
//!
//! Login, registration, password reset, logout and the home page.
//!
//! These are the only pages reachable without a token, and the only flows
//! whose requests carry no `Authorization` header.

use depot_client::ClientError;
use depot_core::validation::{require, validate_login, validate_password_reset};
use depot_core::{Notification, Route, ValidationError};
use tracing::{info, warn};

use super::{gate, Screen};
use crate::error::ConsoleResult;
use crate::render;
use crate::state::AppContext;

const FALLBACK_FAILURE: &str = "Something went wrong!";

/// The server's own message for a rejected request, else a fallback.
fn server_message(err: &ClientError) -> String {
    match err {
        ClientError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
        _ => FALLBACK_FAILURE.to_string(),
    }
}

fn page(route: Route, notification: Notification) -> Screen {
    let body = match route {
        Route::Home => render::home_page(),
        _ => String::new(),
    };
    Screen::new(route, body).notify(notification)
}

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> ConsoleResult<Screen> {
    let (email, password) = match validate_login(email, password) {
        Ok(credentials) => credentials,
        Err(e) => return Ok(page(Route::Login, Notification::error(e.to_string()))),
    };

    match ctx.auth().login(&email, &password).await {
        Ok(_) => Ok(page(Route::Home, Notification::success("Login successful!"))),
        Err(e) => {
            warn!(error = %e, "Login failed");
            Ok(page(Route::Login, Notification::error(server_message(&e))))
        }
    }
}

pub async fn register(ctx: &AppContext, name: &str, email: &str, password: &str) -> ConsoleResult<Screen> {
    let (name, email) = match (require("name", name), require("email", email), require("password", password)) {
        (Ok(name), Ok(email), Ok(_)) => (name, email),
        _ => return Ok(page(Route::Register, Notification::error("All fields are required"))),
    };

    match ctx.auth().register(&name, &email, password).await {
        Ok(()) => Ok(page(Route::Login, Notification::success("Registration successful!"))),
        Err(e) => {
            warn!(error = %e, "Registration failed");
            Ok(page(Route::Register, Notification::error(server_message(&e))))
        }
    }
}

pub async fn forgot_password(ctx: &AppContext, email: &str) -> ConsoleResult<Screen> {
    let email = match require("email", email) {
        Ok(email) => email,
        Err(_) => return Ok(page(Route::Login, Notification::error("Please enter your email."))),
    };

    match ctx.auth().forgot_password(&email).await {
        Ok(()) => Ok(page(Route::Login, Notification::success("Password reset email sent!"))),
        Err(e) => {
            warn!(error = %e, "Reset email request failed");
            Ok(page(
                Route::Login,
                Notification::error("Error sending reset email. Please try again."),
            ))
        }
    }
}

/// Sets a new password; nothing is sent unless both entries match.
pub async fn reset_password(
    ctx: &AppContext,
    token: &str,
    password: &str,
    confirm: &str,
) -> ConsoleResult<Screen> {
    let new_password = match validate_password_reset(token, password, confirm) {
        Ok(password) => password,
        Err(e) => {
            let message = match e {
                ValidationError::PasswordMismatch => "Passwords do not match!".to_string(),
                ValidationError::Required { ref field } if field == "token" => "Invalid token!".to_string(),
                other => other.to_string(),
            };
            return Ok(page(Route::ResetPassword, Notification::error(message)));
        }
    };

    match ctx.auth().reset_password(token.trim(), &new_password).await {
        Ok(()) => Ok(page(Route::Login, Notification::success("Password reset successful!"))),
        Err(e) => {
            warn!(error = %e, "Password reset failed");
            Ok(page(Route::ResetPassword, Notification::error(server_message(&e))))
        }
    }
}

/// Forgets the persisted token. No request is sent.
pub fn logout(ctx: &AppContext) -> ConsoleResult<Screen> {
    ctx.auth().logout()?;
    Ok(Screen::new(Route::Login, "Logged out.\n"))
}

pub fn home(ctx: &AppContext) -> ConsoleResult<Screen> {
    if let Some(redirect) = gate(ctx, Route::Home) {
        return Ok(redirect);
    }
    info!("Home page");
    Ok(Screen::new(Route::Home, render::home_page()))
}
