use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::debug;

use crate::api::server::AppState;
use crate::api::session;
use crate::db::{feedback, menu};
use crate::error::AppError;
use crate::views;

/// Landing page: full menu plus per-meal-type rating aggregates, recomputed
/// on every request.
pub async fn index(State(state): State<Arc<AppState>>, sess: Session) -> Result<Response, AppError> {
    let items = menu::list(&state.db).await?;
    let ratings = feedback::ratings_by_meal_type(&state.db).await?;
    let user = session::current_user(&sess).await?;
    let flash = session::take_flash(&sess).await?;
    Ok(views::index_page(&items, &ratings, user.as_ref(), flash.as_ref()).into_response())
}

pub async fn feedback_page(sess: Session) -> Result<Response, AppError> {
    let user = session::require_user(&sess).await?;
    let flash = session::take_flash(&sess).await?;
    Ok(views::feedback_page(&user, flash.as_ref()).into_response())
}

#[derive(Deserialize)]
pub struct FeedbackPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    meal_type: Option<String>,
    #[serde(default)]
    rating: Option<RatingField>,
    #[serde(default)]
    comment: Option<String>,
}

/// A rating arrives as a JSON number or as form/JSON text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RatingField {
    Int(i64),
    Text(String),
}

/// Ratings are validated, not coerced: anything that is not a whole number
/// in 1..=5 is rejected.
fn parse_rating(field: Option<&RatingField>) -> Result<i64, String> {
    let value = match field {
        None => return Err("Rating is required.".to_string()),
        Some(RatingField::Int(n)) => *n,
        Some(RatingField::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| "Rating must be a whole number.".to_string())?,
    };
    if !(1..=5).contains(&value) {
        return Err("Rating must be between 1 and 5.".to_string());
    }
    Ok(value)
}

/// Accepts a form-encoded or JSON body and answers in kind.
pub async fn feedback_submit(
    State(state): State<Arc<AppState>>,
    sess: Session,
    req: Request,
) -> Result<Response, AppError> {
    let user = session::require_user(&sess).await?;
    let is_json = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));

    let payload = if is_json {
        match Json::<FeedbackPayload>::from_request(req, &()).await {
            Ok(Json(p)) => p,
            Err(e) => return Ok(json_error(&format!("Malformed JSON body: {e}"))),
        }
    } else {
        match Form::<FeedbackPayload>::from_request(req, &()).await {
            Ok(Form(p)) => p,
            Err(_) => {
                session::set_flash(&sess, "danger", "Failed to submit feedback.").await?;
                return Ok(Redirect::to("/feedback").into_response());
            }
        }
    };

    let rating = match parse_rating(payload.rating.as_ref()) {
        Ok(r) => r,
        Err(msg) => {
            debug!("rejected feedback from '{}': {msg}", user.username);
            if is_json {
                return Ok(json_error(&msg));
            }
            session::set_flash(&sess, "danger", &format!("Failed to submit feedback: {msg}")).await?;
            return Ok(Redirect::to("/feedback").into_response());
        }
    };

    let meal_type = payload.meal_type.as_deref().unwrap_or("").trim().to_string();
    if meal_type.is_empty() {
        let msg = "Meal type is required.";
        if is_json {
            return Ok(json_error(msg));
        }
        session::set_flash(&sess, "danger", &format!("Failed to submit feedback: {msg}")).await?;
        return Ok(Redirect::to("/feedback").into_response());
    }

    // Display name falls back to the session username.
    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(&user.username)
        .to_string();
    let comment = payload.comment.as_deref().unwrap_or("").trim().to_string();

    feedback::add(&state.db, Some(user.id), &name, &meal_type, rating, &comment).await?;

    if is_json {
        return Ok(Json(json!({"status": "success"})).into_response());
    }
    session::set_flash(&sess, "success", "Thank you for your feedback!").await?;
    Ok(Redirect::to("/").into_response())
}

fn json_error(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"status": "error", "message": message})),
    )
        .into_response()
}
