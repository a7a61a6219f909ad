//! Katch-McArdle energy expenditure and macro split.
//!
//! Pure arithmetic: no I/O, deterministic for identical inputs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::nutrition::Macros;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

const PROTEIN_G_PER_KG: f64 = 2.0;
const FAT_SHARE_OF_CALORIES: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "extra_active" => Ok(ActivityLevel::ExtraActive),
            _ => Err(ProfileError::UnknownActivity(s.to_string())),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Gain,
    Maintain,
    Lose,
    AggressiveLose,
}

impl Goal {
    pub const ALL: [Goal; 4] = [Goal::Gain, Goal::Maintain, Goal::Lose, Goal::AggressiveLose];

    pub fn multiplier(self) -> f64 {
        match self {
            Goal::Gain => 1.15,
            Goal::Maintain => 1.0,
            Goal::Lose => 0.85,
            Goal::AggressiveLose => 0.66,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Goal::Gain => "gain",
            Goal::Maintain => "maintain",
            Goal::Lose => "lose",
            Goal::AggressiveLose => "aggressive_lose",
        }
    }
}

impl FromStr for Goal {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "gain" => Ok(Goal::Gain),
            "maintain" => Ok(Goal::Maintain),
            "lose" => Ok(Goal::Lose),
            "aggressive_lose" => Ok(Goal::AggressiveLose),
            _ => Err(ProfileError::UnknownGoal(s.to_string())),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// "Lightly Active", "lightly-active" and "LIGHTLY_ACTIVE" all name the same tier.
fn normalize(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("weight must be a positive number of kilograms, got {0}")]
    Weight(f64),
    #[error("height must be a positive number of centimetres, got {0}")]
    Height(f64),
    #[error("body fat must be in [0, 100), got {0}")]
    BodyFat(f64),
    #[error("unknown activity level {0:?}")]
    UnknownActivity(String),
    #[error("unknown goal {0:?}")]
    UnknownGoal(String),
}

impl From<ProfileError> for AppError {
    fn from(e: ProfileError) -> Self {
        AppError::InvalidInput(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub body_fat_pct: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

impl BodyProfile {
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !(self.weight_kg.is_finite() && self.weight_kg > 0.0) {
            return Err(ProfileError::Weight(self.weight_kg));
        }
        if !(self.height_cm.is_finite() && self.height_cm > 0.0) {
            return Err(ProfileError::Height(self.height_cm));
        }
        if !(self.body_fat_pct.is_finite() && (0.0..100.0).contains(&self.body_fat_pct)) {
            return Err(ProfileError::BodyFat(self.body_fat_pct));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub tdee: f64,
    pub target_calories: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fats_g: i32,
}

impl MacroTargets {
    /// True when protein and fat alone exceed the calorie target, leaving
    /// `carbs_g` negative.
    pub fn carbs_overdrawn(&self) -> bool {
        self.carbs_g < 0
    }

    /// Daily amounts as plain macros, calories taken from the goal-adjusted target.
    pub fn daily(&self) -> Macros {
        Macros::new(
            f64::from(self.target_calories),
            f64::from(self.protein_g),
            f64::from(self.carbs_g),
            f64::from(self.fats_g),
        )
    }
}

pub fn lean_body_mass(weight_kg: f64, body_fat_pct: f64) -> f64 {
    weight_kg * (1.0 - body_fat_pct / 100.0)
}

pub fn basal_metabolic_rate(lean_body_mass: f64) -> f64 {
    370.0 + 21.6 * lean_body_mass
}

pub fn total_daily_energy_expenditure(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.multiplier()
}

/// Runs the full pipeline: LBM, BMR, TDEE, goal adjustment, then the macro split.
///
/// Protein and fat are fixed first; carbohydrate takes whatever energy remains,
/// so all rounding drift lands in `carbs_g`. The residual is returned as is, even
/// when it is negative.
pub fn calculate(profile: &BodyProfile) -> Result<MacroTargets, ProfileError> {
    profile.validate()?;

    let lbm = lean_body_mass(profile.weight_kg, profile.body_fat_pct);
    let bmr = basal_metabolic_rate(lbm);
    let tdee = total_daily_energy_expenditure(bmr, profile.activity_level);
    let target_calories = (tdee * profile.goal.multiplier()).round() as i32;

    let protein_g = (profile.weight_kg * PROTEIN_G_PER_KG).round() as i32;
    let fats_g = (f64::from(target_calories) * FAT_SHARE_OF_CALORIES / KCAL_PER_G_FAT).round() as i32;
    let fixed_kcal =
        f64::from(protein_g) * KCAL_PER_G_PROTEIN + f64::from(fats_g) * KCAL_PER_G_FAT;
    let carbs_g = ((f64::from(target_calories) - fixed_kcal) / KCAL_PER_G_CARBS).round() as i32;

    Ok(MacroTargets {
        tdee,
        target_calories,
        protein_g,
        carbs_g,
        fats_g,
    })
}

/// Energy implied by a macro split, using 4/4/9 kcal per gram.
pub fn calories_from_macros(protein_g: f64, carbs_g: f64, fats_g: f64) -> f64 {
    protein_g * KCAL_PER_G_PROTEIN + carbs_g * KCAL_PER_G_CARBS + fats_g * KCAL_PER_G_FAT
}
