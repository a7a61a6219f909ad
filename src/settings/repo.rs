use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::MealSettings;

pub async fn get(db: &PgPool, user_id: Uuid) -> sqlx::Result<Option<MealSettings>> {
    sqlx::query_as::<_, MealSettings>(r#"SELECT num_meals FROM meal_settings WHERE user_id = $1"#)
        .bind(user_id)
        .fetch_optional(db)
        .await
}

pub async fn upsert(db: &PgPool, user_id: Uuid, settings: MealSettings) -> sqlx::Result<MealSettings> {
    sqlx::query_as::<_, MealSettings>(
        r#"
        INSERT INTO meal_settings (user_id, num_meals)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE SET num_meals = EXCLUDED.num_meals
        RETURNING num_meals
        "#,
    )
    .bind(user_id)
    .bind(settings.num_meals)
    .fetch_one(db)
    .await
}
