//! BMI chart payload: what a renderer needs to draw the category bands and the "Você" marker
//! for a message flagged `is_chart`.

use serde::Serialize;

use crate::assessment::UserProfile;
use crate::metrics::{category_for_bmi, ideal_weight_range, BmiCategory, WeightRange};

/// Upper end of the chart's horizontal axis (BMI units).
pub const SCALE_MAX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiBand {
    pub label: &'static str,
    pub range: &'static str,
    pub width: f64,
}

/// Bands drawn left to right.
pub const BMI_BANDS: [BmiBand; 6] = [
    BmiBand { label: "Abaixo do peso", range: "< 18.5", width: 18.5 },
    BmiBand { label: "Peso normal", range: "18.5-24.9", width: 6.4 },
    BmiBand { label: "Sobrepeso", range: "25-29.9", width: 4.9 },
    BmiBand { label: "Obesidade I", range: "30-34.9", width: 4.9 },
    BmiBand { label: "Obesidade II", range: "35-39.9", width: 4.9 },
    BmiBand { label: "Obesidade III", range: "> 40", width: 10.0 },
];

/// Marker x-position on the `[0, SCALE_MAX]` axis. The marker sits halfway into the band
/// for the BMI rather than at its literal value.
pub fn marker_position(bmi: f64) -> f64 {
    if bmi < 18.5 {
        18.5 / 2.0
    } else if bmi < 25.0 {
        18.5 + (bmi - 18.5) / 2.0
    } else if bmi < 30.0 {
        25.0 + (bmi - 25.0) / 2.0
    } else if bmi < 35.0 {
        30.0 + (bmi - 30.0) / 2.0
    } else if bmi < 40.0 {
        35.0 + (bmi - 35.0) / 2.0
    } else {
        45.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiChart {
    pub bmi: f64,
    pub category: BmiCategory,
    pub current_weight: f64,
    pub ideal: WeightRange,
    pub marker: f64,
}

impl BmiChart {
    /// Snapshot of the profile for rendering. `None` until height, weight and BMI are known.
    pub fn from_profile(profile: &UserProfile) -> Option<Self> {
        let (height, weight, bmi) = (profile.height?, profile.weight?, profile.bmi?);
        Some(Self {
            bmi,
            category: category_for_bmi(bmi),
            current_weight: weight,
            ideal: ideal_weight_range(height),
            marker: marker_position(bmi),
        })
    }

    /// Index into [`BMI_BANDS`] of the band holding the marker.
    pub fn band_index(&self) -> usize {
        match self.category {
            BmiCategory::Underweight => 0,
            BmiCategory::Normal => 1,
            BmiCategory::Overweight => 2,
            BmiCategory::ObeseClass1 => 3,
            BmiCategory::ObeseClass2 => 4,
            BmiCategory::ObeseClass3 => 5,
        }
    }
}
