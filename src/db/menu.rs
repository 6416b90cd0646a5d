use sqlx::SqlitePool;

use crate::db::models::MenuItem;

/// All menu entries, id ascending. Multiple items per (day, meal_type) slot
/// are allowed and rendered as a list.
pub async fn list(pool: &SqlitePool) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as::<_, MenuItem>("SELECT * FROM menu ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn add(
    pool: &SqlitePool,
    day: &str,
    meal_type: &str,
    item: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO menu (day, meal_type, item) VALUES (?, ?, ?)")
        .bind(day)
        .bind(meal_type)
        .bind(item)
        .execute(pool)
        .await?;
    Ok(())
}

/// Updates the item text only. A missing id is a silent no-op.
pub async fn update(pool: &SqlitePool, id: i64, item: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE menu SET item = ? WHERE id = ?")
        .bind(item)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Idempotent: deleting a missing id changes nothing.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM menu WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
