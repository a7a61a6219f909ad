use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_NUM_MEALS: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MealSettings {
    pub num_meals: i32,
}

impl Default for MealSettings {
    fn default() -> Self {
        Self {
            num_meals: DEFAULT_NUM_MEALS,
        }
    }
}
