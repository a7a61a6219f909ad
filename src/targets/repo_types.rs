use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use super::engine::{BodyProfile, MacroTargets, ProfileError};

#[derive(Debug, Clone, FromRow)]
pub struct TargetRow {
    pub user_id: Uuid,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub body_fat_pct: f64,
    pub activity_level: String,
    pub goal: String,
    pub tdee: f64,
    pub target_calories: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fats_g: i32,
    pub updated_at: OffsetDateTime,
}

/// The single target record a user owns; overwritten on every save.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetRecord {
    pub profile: BodyProfile,
    pub targets: MacroTargets,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl TryFrom<TargetRow> for TargetRecord {
    type Error = ProfileError;

    fn try_from(r: TargetRow) -> Result<Self, Self::Error> {
        Ok(Self {
            profile: BodyProfile {
                weight_kg: r.weight_kg,
                height_cm: r.height_cm,
                body_fat_pct: r.body_fat_pct,
                activity_level: r.activity_level.parse()?,
                goal: r.goal.parse()?,
            },
            targets: MacroTargets {
                tdee: r.tdee,
                target_calories: r.target_calories,
                protein_g: r.protein_g,
                carbs_g: r.carbs_g,
                fats_g: r.fats_g,
            },
            updated_at: r.updated_at,
        })
    }
}
