use serde::{Deserialize, Serialize};

use super::engine::{basal_metabolic_rate, lean_body_mass, BodyProfile, MacroTargets, ProfileError};

/// Activity and goal arrive as free text and are parsed strictly.
#[derive(Debug, Deserialize)]
pub struct BodyProfileRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub body_fat_pct: f64,
    pub activity_level: String,
    pub goal: String,
}

impl TryFrom<BodyProfileRequest> for BodyProfile {
    type Error = ProfileError;

    fn try_from(r: BodyProfileRequest) -> Result<Self, Self::Error> {
        let profile = BodyProfile {
            weight_kg: r.weight_kg,
            height_cm: r.height_cm,
            body_fat_pct: r.body_fat_pct,
            activity_level: r.activity_level.parse()?,
            goal: r.goal.parse()?,
        };
        profile.validate()?;
        Ok(profile)
    }
}

#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub lean_body_mass: f64,
    pub bmr: f64,
    #[serde(flatten)]
    pub targets: MacroTargets,
}

impl CalculationResponse {
    pub fn new(profile: &BodyProfile, targets: MacroTargets) -> Self {
        let lbm = lean_body_mass(profile.weight_kg, profile.body_fat_pct);
        Self {
            lean_body_mass: lbm,
            bmr: basal_metabolic_rate(lbm),
            targets,
        }
    }
}
