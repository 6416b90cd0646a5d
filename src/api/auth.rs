use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::info;

use crate::api::server::AppState;
use crate::api::session;
use crate::db::users;
use crate::error::AppError;
use crate::views;

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub async fn register_page(sess: Session) -> Result<Response, AppError> {
    let flash = session::take_flash(&sess).await?;
    Ok(views::register_page(flash.as_ref()).into_response())
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    sess: Session,
    Form(creds): Form<Credentials>,
) -> Result<Response, AppError> {
    let username = creds.username.trim();
    if username.is_empty() || creds.password.is_empty() {
        session::set_flash(&sess, "danger", "Username and password required.").await?;
        return Ok(Redirect::to("/register").into_response());
    }

    match users::register(&state.db, username, &creds.password).await {
        Ok(user) => {
            info!("registered user '{}'", user.username);
            session::set_flash(&sess, "success", "Registered successfully. Please login.").await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(AppError::DuplicateUsername) => {
            session::set_flash(&sess, "danger", "Username already taken.").await?;
            Ok(Redirect::to("/register").into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn login_page(sess: Session) -> Result<Response, AppError> {
    let flash = session::take_flash(&sess).await?;
    Ok(views::login_page(flash.as_ref()).into_response())
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    sess: Session,
    Form(creds): Form<Credentials>,
) -> Result<Response, AppError> {
    match users::authenticate(&state.db, creds.username.trim(), &creds.password).await {
        Ok(user) => {
            session::login(&sess, &user).await?;
            session::set_flash(&sess, "success", "Logged in successfully.").await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::InvalidCredentials) => {
            session::set_flash(&sess, "danger", "Invalid credentials.").await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn logout(sess: Session) -> Result<Response, AppError> {
    session::logout(&sess).await?;
    session::set_flash(&sess, "info", "Logged out.").await?;
    Ok(Redirect::to("/").into_response())
}
