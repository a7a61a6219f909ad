use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Food, NewFood};

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<Food>> {
    sqlx::query_as::<_, Food>(
        r#"
        SELECT user_id, name, calories, protein, carbs, fats, created_at
        FROM foods
        WHERE user_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find(db: &PgPool, user_id: Uuid, name: &str) -> sqlx::Result<Option<Food>> {
    sqlx::query_as::<_, Food>(
        r#"
        SELECT user_id, name, calories, protein, carbs, fats, created_at
        FROM foods
        WHERE user_id = $1 AND name = $2
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_optional(db)
    .await
}

pub async fn insert(db: &PgPool, user_id: Uuid, food: &NewFood) -> sqlx::Result<Food> {
    sqlx::query_as::<_, Food>(
        r#"
        INSERT INTO foods (user_id, name, calories, protein, carbs, fats)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING user_id, name, calories, protein, carbs, fats, created_at
        "#,
    )
    .bind(user_id)
    .bind(&food.name)
    .bind(food.per_100g.calories)
    .bind(food.per_100g.protein)
    .bind(food.per_100g.carbs)
    .bind(food.per_100g.fats)
    .fetch_one(db)
    .await
}

/// Returns whether a row was removed.
pub async fn delete(db: &PgPool, user_id: Uuid, name: &str) -> sqlx::Result<bool> {
    let res = sqlx::query(r#"DELETE FROM foods WHERE user_id = $1 AND name = $2"#)
        .bind(user_id)
        .bind(name)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
