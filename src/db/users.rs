use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::models::User;
use crate::error::AppError;
use crate::password;

/// Creates a non-admin account. The UNIQUE constraint on `username` resolves
/// concurrent registrations: the second writer gets `DuplicateUsername`.
pub async fn register(pool: &SqlitePool, username: &str, pass: &str) -> Result<User, AppError> {
    let password_hash = password::hash(pass)?;
    let result = sqlx::query(
        "INSERT INTO users (username, password_hash, is_admin) VALUES (?, ?, 0)",
    )
    .bind(username)
    .bind(&password_hash)
    .execute(pool)
    .await;

    match result {
        Ok(done) => Ok(User {
            id: done.last_insert_rowid(),
            username: username.to_string(),
            password_hash,
            is_admin: false,
        }),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(AppError::DuplicateUsername)
        }
        Err(e) => Err(e.into()),
    }
}

/// Looks up by username and checks the password. A missing account and a
/// wrong password are indistinguishable to the caller.
pub async fn authenticate(pool: &SqlitePool, username: &str, pass: &str) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    match user {
        Some(user) if password::verify(pass, &user.password_hash) => Ok(user),
        _ => Err(AppError::InvalidCredentials),
    }
}

/// Idempotent startup step: guarantees the configured admin account exists
/// with a hashed password. A stored value that does not look like an argon2
/// hash is treated as a legacy plain-text password and overwritten.
pub async fn bootstrap_admin(pool: &SqlitePool, username: &str, pass: &str) -> Result<(), AppError> {
    let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    match existing {
        Some(user) if password::is_hashed(&user.password_hash) => {}
        Some(user) => {
            warn!("rehashing legacy password for admin '{username}'");
            sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
                .bind(password::hash(pass)?)
                .bind(user.id)
                .execute(pool)
                .await?;
        }
        None => {
            info!("creating bootstrap admin '{username}'");
            sqlx::query("INSERT INTO users (username, password_hash, is_admin) VALUES (?, ?, 1)")
                .bind(username)
                .bind(password::hash(pass)?)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_duplicate_registration_fails() {
        let pool = test_pool().await;

        let alice = register(&pool, "alice", "pw123").await.unwrap();
        assert!(!alice.is_admin);

        let err = register(&pool, "alice", "other").await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUsername));

        // First account untouched.
        let again = authenticate(&pool, "alice", "pw123").await.unwrap();
        assert_eq!(again.id, alice.id);
    }

    #[tokio::test]
    async fn test_wrong_password_always_fails() {
        let pool = test_pool().await;
        register(&pool, "bob", "secret").await.unwrap();

        // No lockout: repeated failures behave identically.
        for _ in 0..3 {
            let err = authenticate(&pool, "bob", "wrong").await.unwrap_err();
            assert!(matches!(err, AppError::InvalidCredentials));
        }
        assert!(authenticate(&pool, "bob", "secret").await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_user_fails() {
        let pool = test_pool().await;
        let err = authenticate(&pool, "nobody", "pw").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_bootstrap_admin_creates_once() {
        let pool = test_pool().await;

        bootstrap_admin(&pool, "messmaster", "renovate").await.unwrap();
        bootstrap_admin(&pool, "messmaster", "renovate").await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);

        let admin = authenticate(&pool, "messmaster", "renovate").await.unwrap();
        assert!(admin.is_admin);
    }

    #[tokio::test]
    async fn test_bootstrap_admin_rehashes_legacy_password() {
        let pool = test_pool().await;

        sqlx::query("INSERT INTO users (username, password_hash, is_admin) VALUES (?, ?, 1)")
            .bind("messmaster")
            .bind("renovate") // plain text, as an old deployment would have stored it
            .execute(&pool)
            .await
            .unwrap();

        bootstrap_admin(&pool, "messmaster", "renovate").await.unwrap();

        let admin = authenticate(&pool, "messmaster", "renovate").await.unwrap();
        assert!(crate::password::is_hashed(&admin.password_hash));
    }
}
