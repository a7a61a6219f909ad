use sqlx::PgPool;
use uuid::Uuid;

use super::engine::{BodyProfile, MacroTargets};
use super::repo_types::TargetRow;

pub async fn get(db: &PgPool, user_id: Uuid) -> sqlx::Result<Option<TargetRow>> {
    sqlx::query_as::<_, TargetRow>(
        r#"
        SELECT user_id, weight_kg, height_cm, body_fat_pct, activity_level, goal,
               tdee, target_calories, protein_g, carbs_g, fats_g, updated_at
        FROM target_macros
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// One row per user: a second save overwrites the first.
pub async fn upsert(
    db: &PgPool,
    user_id: Uuid,
    profile: &BodyProfile,
    targets: &MacroTargets,
) -> sqlx::Result<TargetRow> {
    sqlx::query_as::<_, TargetRow>(
        r#"
        INSERT INTO target_macros
            (user_id, weight_kg, height_cm, body_fat_pct, activity_level, goal,
             tdee, target_calories, protein_g, carbs_g, fats_g, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now())
        ON CONFLICT (user_id) DO UPDATE SET
            weight_kg = EXCLUDED.weight_kg,
            height_cm = EXCLUDED.height_cm,
            body_fat_pct = EXCLUDED.body_fat_pct,
            activity_level = EXCLUDED.activity_level,
            goal = EXCLUDED.goal,
            tdee = EXCLUDED.tdee,
            target_calories = EXCLUDED.target_calories,
            protein_g = EXCLUDED.protein_g,
            carbs_g = EXCLUDED.carbs_g,
            fats_g = EXCLUDED.fats_g,
            updated_at = now()
        RETURNING user_id, weight_kg, height_cm, body_fat_pct, activity_level, goal,
                  tdee, target_calories, protein_g, carbs_g, fats_g, updated_at
        "#,
    )
    .bind(user_id)
    .bind(profile.weight_kg)
    .bind(profile.height_cm)
    .bind(profile.body_fat_pct)
    .bind(profile.activity_level.as_str())
    .bind(profile.goal.as_str())
    .bind(targets.tdee)
    .bind(targets.target_calories)
    .bind(targets.protein_g)
    .bind(targets.carbs_g)
    .bind(targets.fats_g)
    .fetch_one(db)
    .await
}
