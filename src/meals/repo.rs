use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{MealItem, SavedMeal, SavedMealRow};

pub async fn list_names(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT name
        FROM saved_meals
        WHERE user_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find_by_name(
    db: &PgPool,
    user_id: Uuid,
    name: &str,
) -> sqlx::Result<Option<SavedMeal>> {
    let Some(row) = sqlx::query_as::<_, SavedMealRow>(
        r#"
        SELECT id, user_id, name, created_at
        FROM saved_meals
        WHERE user_id = $1 AND name = $2
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_optional(db)
    .await?
    else {
        return Ok(None);
    };

    let items = sqlx::query_as::<_, MealItem>(
        r#"
        SELECT food_name, grams, calories, protein, carbs, fats
        FROM saved_meal_items
        WHERE meal_id = $1
        ORDER BY position ASC
        "#,
    )
    .bind(row.id)
    .fetch_all(db)
    .await?;

    Ok(Some(SavedMeal::from_parts(row, items)))
}

/// Inserts the meal and its items in one transaction.
pub async fn insert_with_items(
    db: &PgPool,
    user_id: Uuid,
    name: &str,
    items: &[MealItem],
) -> sqlx::Result<SavedMeal> {
    let mut tx = db.begin().await?;

    let row = sqlx::query_as::<_, SavedMealRow>(
        r#"
        INSERT INTO saved_meals (id, user_id, name)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, name, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(name)
    .fetch_one(&mut *tx)
    .await?;

    for (position, item) in items.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO saved_meal_items
                (meal_id, position, food_name, grams, calories, protein, carbs, fats)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(row.id)
        .bind(position as i32)
        .bind(&item.food_name)
        .bind(item.grams)
        .bind(item.calories)
        .bind(item.protein)
        .bind(item.carbs)
        .bind(item.fats)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(SavedMeal::from_parts(row, items.to_vec()))
}

pub async fn delete_by_name(db: &PgPool, user_id: Uuid, name: &str) -> sqlx::Result<bool> {
    let res = sqlx::query(r#"DELETE FROM saved_meals WHERE user_id = $1 AND name = $2"#)
        .bind(user_id)
        .bind(name)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
