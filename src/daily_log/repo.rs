use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{LogEntry, NewLogEntry};

pub async fn insert(db: &PgPool, user_id: Uuid, entry: &NewLogEntry) -> sqlx::Result<LogEntry> {
    sqlx::query_as::<_, LogEntry>(
        r#"
        INSERT INTO log_entries
            (id, user_id, logged_on, food_name, grams, calories, protein, carbs, fats)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, user_id, logged_on, food_name, grams, calories, protein, carbs, fats, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(entry.logged_on)
    .bind(&entry.food_name)
    .bind(entry.grams)
    .bind(entry.macros.calories)
    .bind(entry.macros.protein)
    .bind(entry.macros.carbs)
    .bind(entry.macros.fats)
    .fetch_one(db)
    .await
}

pub async fn list_for_day(db: &PgPool, user_id: Uuid, day: Date) -> sqlx::Result<Vec<LogEntry>> {
    sqlx::query_as::<_, LogEntry>(
        r#"
        SELECT id, user_id, logged_on, food_name, grams, calories, protein, carbs, fats, created_at
        FROM log_entries
        WHERE user_id = $1 AND logged_on = $2
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(day)
    .fetch_all(db)
    .await
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> sqlx::Result<bool> {
    let res = sqlx::query(r#"DELETE FROM log_entries WHERE user_id = $1 AND id = $2"#)
        .bind(user_id)
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
