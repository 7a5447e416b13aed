//! Body metrics: BMI, BMI category, ideal weight range and the suggested target weight.
//!
//! Heights are centimeters, weights kilograms. Every derived value is rounded to one
//! decimal place, which is what the chat shows the visitor.

use serde::{Deserialize, Serialize};

/// Lower bound of the healthy BMI band.
pub const HEALTHY_BMI_MIN: f64 = 18.5;
/// Upper bound of the healthy BMI band used for the ideal weight range.
pub const HEALTHY_BMI_MAX: f64 = 24.9;

/// Step (kg) suggested to someone already in the healthy band who still wants to move.
const HEALTHY_ADJUSTMENT_KG: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    ObeseClass1,
    ObeseClass2,
    ObeseClass3,
}

impl BmiCategory {
    /// Display label used in bot messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "abaixo do peso",
            Self::Normal => "peso normal",
            Self::Overweight => "sobrepeso",
            Self::ObeseClass1 => "obesidade grau I",
            Self::ObeseClass2 => "obesidade grau II",
            Self::ObeseClass3 => "obesidade grau III",
        }
    }
}

/// Where the visitor wants their weight to go. Stored as `fitness_goal` on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightDirection {
    Lose,
    Maintain,
    Gain,
}

impl WeightDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Lose => "perder peso",
            Self::Maintain => "manter o peso",
            Self::Gain => "ganhar peso",
        }
    }
}

/// Weight interval (kg) matching the healthy BMI band for a height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

impl WeightRange {
    pub fn contains(&self, weight_kg: f64) -> bool {
        weight_kg >= self.min && weight_kg <= self.max
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn height_m_squared(height_cm: f64) -> f64 {
    let m = height_cm / 100.0;
    m * m
}

/// `weight / (height_cm / 100)^2`, rounded to one decimal. The caller guarantees `height_cm > 0`.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    round1(weight_kg / height_m_squared(height_cm))
}

pub fn category_for_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else if bmi < 35.0 {
        BmiCategory::ObeseClass1
    } else if bmi < 40.0 {
        BmiCategory::ObeseClass2
    } else {
        BmiCategory::ObeseClass3
    }
}

pub fn ideal_weight_range(height_cm: f64) -> WeightRange {
    let h2 = height_m_squared(height_cm);
    WeightRange {
        min: round1(HEALTHY_BMI_MIN * h2),
        max: round1(HEALTHY_BMI_MAX * h2),
    }
}

/// Target weight for the chosen direction.
///
/// Outside the healthy band the target is the nearest edge of the ideal range whatever the
/// direction. Inside it, `Lose`/`Gain` move [`HEALTHY_ADJUSTMENT_KG`] without leaving the range
/// and `Maintain` keeps the current weight.
pub fn suggested_goal_weight(weight_kg: f64, height_cm: f64, direction: WeightDirection) -> f64 {
    let bmi = compute_bmi(weight_kg, height_cm);
    let ideal = ideal_weight_range(height_cm);

    if bmi < HEALTHY_BMI_MIN {
        return ideal.min;
    }
    if bmi > HEALTHY_BMI_MAX {
        return ideal.max;
    }

    let target = match direction {
        // The rounded band edges can sit on the far side of a borderline weight.
        WeightDirection::Lose => (weight_kg - HEALTHY_ADJUSTMENT_KG).max(ideal.min).min(weight_kg),
        WeightDirection::Maintain => weight_kg,
        WeightDirection::Gain => (weight_kg + HEALTHY_ADJUSTMENT_KG).min(ideal.max).max(weight_kg),
    };
    round1(target)
}

/// Formats a measurement for chat text: "170" for whole numbers, "24.2" otherwise.
pub fn format_measure(value: f64) -> String {
    let rounded = round1(value);
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

/// Parses a height or weight typed by the visitor. Accepts `,` as the decimal separator.
/// Returns `None` unless the value is finite and strictly positive.
pub fn parse_measure(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
