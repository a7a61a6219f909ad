use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::Macros;

/// Catalog entry; macro columns are per 100 g.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Food {
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Food {
    pub fn per_100g(&self) -> Macros {
        Macros::new(self.calories, self.protein, self.carbs, self.fats)
    }
}

#[derive(Debug, Clone)]
pub struct NewFood {
    pub name: String,
    pub per_100g: Macros,
}
