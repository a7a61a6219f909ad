use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateFoodRequest {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Per-100 g macros suggested by the generator for a food name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLookup {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}
