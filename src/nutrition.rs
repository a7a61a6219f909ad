use std::iter::Sum;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Energy and macro amounts. Catalog foods store these per 100 g.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl Macros {
    pub fn new(calories: f64, protein: f64, carbs: f64, fats: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fats,
        }
    }

    /// Scales per-100 g values to a portion of `grams`.
    pub fn portion(per_100g: Macros, grams: f64) -> Self {
        per_100g.scale(grams / 100.0)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fats: self.fats * factor,
        }
    }

    pub fn is_valid_amount(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fats]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fats: self.fats + rhs.fats,
        }
    }
}

impl Sub for Macros {
    type Output = Macros;

    fn sub(self, rhs: Macros) -> Macros {
        Macros {
            calories: self.calories - rhs.calories,
            protein: self.protein - rhs.protein,
            carbs: self.carbs - rhs.carbs,
            fats: self.fats - rhs.fats,
        }
    }
}

impl Sum for Macros {
    fn sum<I: Iterator<Item = Macros>>(iter: I) -> Macros {
        iter.fold(Macros::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portion_scales_from_100g() {
        let oats = Macros::new(389.0, 16.9, 66.3, 6.9);
        let p = Macros::portion(oats, 50.0);
        assert!((p.calories - 194.5).abs() < 1e-9);
        assert!((p.protein - 8.45).abs() < 1e-9);
    }

    #[test]
    fn sums_and_differences() {
        let a = Macros::new(100.0, 10.0, 5.0, 2.0);
        let b = Macros::new(50.0, 1.0, 10.0, 1.0);
        let total: Macros = [a, b].into_iter().sum();
        assert_eq!(total, Macros::new(150.0, 11.0, 15.0, 3.0));
        assert_eq!(total - b, a);
    }

    #[test]
    fn rejects_negative_or_nan() {
        assert!(Macros::new(0.0, 0.0, 0.0, 0.0).is_valid_amount());
        assert!(!Macros::new(-1.0, 0.0, 0.0, 0.0).is_valid_amount());
        assert!(!Macros::new(f64::NAN, 0.0, 0.0, 0.0).is_valid_amount());
    }
}
