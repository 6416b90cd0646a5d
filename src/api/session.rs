use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::db::models::User;
use crate::error::AppError;

const USER_KEY: &str = "user";
const FLASH_KEY: &str = "flash";

/// What a logged-in session knows about its user. A transient reference to
/// the users table, not an independent copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// One-time notice rendered on the next page. `level` feeds the CSS class
/// (success / info / warning / danger).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub level: String,
    pub message: String,
}

pub async fn login(session: &Session, user: &User) -> Result<(), AppError> {
    session.insert(USER_KEY, SessionUser::from(user)).await?;
    Ok(())
}

/// Clears all session state, dropping the server-side record.
pub async fn logout(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}

pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, AppError> {
    Ok(session.get::<SessionUser>(USER_KEY).await?)
}

/// Guard for authenticated routes. On an anonymous session, leaves a warning
/// flash and fails with `Unauthorized`, which renders as a redirect to /login.
pub async fn require_user(session: &Session) -> Result<SessionUser, AppError> {
    match current_user(session).await? {
        Some(user) => Ok(user),
        None => {
            set_flash(session, "warning", "Please login first.").await?;
            Err(AppError::Unauthorized)
        }
    }
}

/// Guard for admin routes. Anything but an admin session is bounced to /login.
pub async fn require_admin(session: &Session) -> Result<SessionUser, AppError> {
    match current_user(session).await? {
        Some(user) if user.is_admin => Ok(user),
        _ => {
            set_flash(session, "warning", "Admin access required.").await?;
            Err(AppError::Unauthorized)
        }
    }
}

pub async fn set_flash(session: &Session, level: &str, message: &str) -> Result<(), AppError> {
    session
        .insert(
            FLASH_KEY,
            Flash {
                level: level.to_string(),
                message: message.to_string(),
            },
        )
        .await?;
    Ok(())
}

/// Removes and returns the pending flash, if any.
pub async fn take_flash(session: &Session) -> Result<Option<Flash>, AppError> {
    Ok(session.remove::<Flash>(FLASH_KEY).await?)
}
