use std::collections::HashMap;

use chrono::Local;
use sqlx::{Row, SqlitePool};

use crate::db::models::{FeedbackWithSubmitter, RatingSummary};

/// Appends a feedback record with a server-assigned timestamp.
/// Records are never updated in place.
pub async fn add(
    pool: &SqlitePool,
    user_id: Option<i64>,
    name: &str,
    meal_type: &str,
    rating: i64,
    comment: &str,
) -> Result<(), sqlx::Error> {
    let created_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    sqlx::query(
        "INSERT INTO feedback (user_id, name, meal_type, rating, comment, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(name)
    .bind(meal_type)
    .bind(rating)
    .bind(comment)
    .bind(created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// All feedback joined with the submitter's username (null for deleted or
/// unknown accounts), newest first.
pub async fn list_with_submitter(
    pool: &SqlitePool,
) -> Result<Vec<FeedbackWithSubmitter>, sqlx::Error> {
    sqlx::query_as::<_, FeedbackWithSubmitter>(
        "SELECT f.*, u.username FROM feedback f
         LEFT JOIN users u ON f.user_id = u.id
         ORDER BY f.created_at DESC, f.id DESC",
    )
    .fetch_all(pool)
    .await
}

/// Idempotent: deleting a missing id changes nothing.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM feedback WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Average rating and record count per meal type, average rounded to one
/// decimal. Meal types with no feedback are absent from the map.
pub async fn ratings_by_meal_type(
    pool: &SqlitePool,
) -> Result<HashMap<String, RatingSummary>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT meal_type, AVG(rating) AS avg_rating, COUNT(*) AS cnt
         FROM feedback GROUP BY meal_type",
    )
    .fetch_all(pool)
    .await?;

    let mut ratings = HashMap::new();
    for row in rows {
        let meal_type: String = row.get("meal_type");
        let average: Option<f64> = row.get("avg_rating");
        let count: i64 = row.get("cnt");
        ratings.insert(
            meal_type,
            RatingSummary {
                average: (average.unwrap_or(0.0) * 10.0).round() / 10.0,
                count,
            },
        );
    }
    Ok(ratings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, users};

    #[tokio::test]
    async fn test_list_joins_submitter_username() {
        let pool = test_pool().await;
        let alice = users::register(&pool, "alice", "pw123").await.unwrap();

        add(&pool, Some(alice.id), "alice", "dinner", 5, "great").await.unwrap();
        add(&pool, None, "walk-in", "lunch", 3, "ok").await.unwrap();

        let rows = list_with_submitter(&pool).await.unwrap();
        assert_eq!(rows.len(), 2);

        let by_alice = rows.iter().find(|r| r.feedback.name == "alice").unwrap();
        assert_eq!(by_alice.username.as_deref(), Some("alice"));
        assert_eq!(by_alice.feedback.rating, 5);

        let anonymous = rows.iter().find(|r| r.feedback.name == "walk-in").unwrap();
        assert!(anonymous.username.is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let pool = test_pool().await;
        // Same wall-clock second is likely here, so the id tiebreaker decides.
        add(&pool, None, "a", "lunch", 4, "first").await.unwrap();
        add(&pool, None, "b", "lunch", 2, "second").await.unwrap();

        let rows = list_with_submitter(&pool).await.unwrap();
        assert_eq!(rows[0].feedback.comment, "second");
        assert_eq!(rows[1].feedback.comment, "first");
    }

    #[tokio::test]
    async fn test_ratings_by_meal_type() {
        let pool = test_pool().await;
        for rating in [4, 5, 3] {
            add(&pool, None, "x", "lunch", rating, "").await.unwrap();
        }
        add(&pool, None, "x", "dinner", 2, "").await.unwrap();

        let ratings = ratings_by_meal_type(&pool).await.unwrap();
        assert_eq!(
            ratings["lunch"],
            RatingSummary { average: 4.0, count: 3 }
        );
        assert_eq!(
            ratings["dinner"],
            RatingSummary { average: 2.0, count: 1 }
        );
        assert!(!ratings.contains_key("breakfast"));
    }

    #[tokio::test]
    async fn test_ratings_empty_store() {
        let pool = test_pool().await;
        assert!(ratings_by_meal_type(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ratings_round_to_one_decimal() {
        let pool = test_pool().await;
        for rating in [4, 4, 5] {
            add(&pool, None, "x", "breakfast", rating, "").await.unwrap();
        }

        let ratings = ratings_by_meal_type(&pool).await.unwrap();
        // 13 / 3 = 4.333...
        assert_eq!(ratings["breakfast"].average, 4.3);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let pool = test_pool().await;
        add(&pool, None, "x", "lunch", 4, "").await.unwrap();

        delete(&pool, 999).await.unwrap();
        assert_eq!(list_with_submitter(&pool).await.unwrap().len(), 1);
    }
}
