use std::sync::Arc;

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::server::AppState;
use crate::api::session;
use crate::db::{feedback, menu};
use crate::error::AppError;
use crate::views;

pub async fn admin_page(
    State(state): State<Arc<AppState>>,
    sess: Session,
) -> Result<Response, AppError> {
    let user = session::require_admin(&sess).await?;
    let feedbacks = feedback::list_with_submitter(&state.db).await?;
    let items = menu::list(&state.db).await?;
    let flash = session::take_flash(&sess).await?;
    Ok(views::admin_page(&feedbacks, &items, &user, flash.as_ref()).into_response())
}

#[derive(Deserialize)]
pub struct MenuItemForm {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub item: String,
}

pub async fn menu_add(
    State(state): State<Arc<AppState>>,
    sess: Session,
    Form(form): Form<MenuItemForm>,
) -> Result<Response, AppError> {
    session::require_admin(&sess).await?;
    menu::add(&state.db, form.day.trim(), form.meal_type.trim(), form.item.trim()).await?;
    session::set_flash(&sess, "success", "Menu item added.").await?;
    Ok(Redirect::to("/admin").into_response())
}

pub async fn menu_update(
    State(state): State<Arc<AppState>>,
    sess: Session,
    Path(id): Path<i64>,
    Form(form): Form<MenuItemForm>,
) -> Result<Response, AppError> {
    session::require_admin(&sess).await?;
    menu::update(&state.db, id, form.item.trim()).await?;
    session::set_flash(&sess, "success", "Menu item updated.").await?;
    Ok(Redirect::to("/admin").into_response())
}

pub async fn menu_delete(
    State(state): State<Arc<AppState>>,
    sess: Session,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    session::require_admin(&sess).await?;
    menu::delete(&state.db, id).await?;
    session::set_flash(&sess, "info", "Menu item removed.").await?;
    Ok(Redirect::to("/admin").into_response())
}

pub async fn feedback_delete(
    State(state): State<Arc<AppState>>,
    sess: Session,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    session::require_admin(&sess).await?;
    feedback::delete(&state.db, id).await?;
    session::set_flash(&sess, "info", "Feedback deleted.").await?;
    Ok(Redirect::to("/admin").into_response())
}
