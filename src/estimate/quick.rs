//! Single-category calculators for the quick tools.
//!
//! These call straight into the same functions the full estimate uses so a
//! quick answer never disagrees with the matching line of a full estimate.

use serde::{Deserialize, Serialize};

use crate::estimate::equipment::calculate_fuel;
use crate::estimate::materials::{
    crack_filling_materials, line_striping_materials, patching_materials, sealcoating_materials,
};
use crate::estimate::pricing::mobilization_fee;
use crate::estimate::weight::analyze_weight;
use crate::estimate::{
    CrackFillingMaterials, FuelBreakdown, LineStripingMaterials, PatchingMaterials,
    SealcoatingMaterials, WeightAnalysis,
};
use crate::error::{EstimateError, EstimateResult};
use crate::project::validate::{validate_striping, MIN_SEALCOAT_AREA};
use crate::project::{
    CrackFillingDetails, LineStripingDetails, PatchingDetails, SealcoatingDetails,
};
use crate::rates::RateTables;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuickSealcoat {
    pub materials: SealcoatingMaterials,
    pub weight_analysis: WeightAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuickFuel {
    pub fuel: FuelBreakdown,
    pub mobilization: f64,
}

pub fn quick_sealcoat(details: &SealcoatingDetails, rates: &RateTables) -> EstimateResult<QuickSealcoat> {
    if !details.area.is_finite() || details.area < MIN_SEALCOAT_AREA {
        return Err(EstimateError::invalid(
            "area",
            format!("must be at least {MIN_SEALCOAT_AREA} sq ft"),
        ));
    }
    let materials = sealcoating_materials(details, rates);
    let weight_analysis = analyze_weight(&materials, rates);
    Ok(QuickSealcoat {
        materials,
        weight_analysis,
    })
}

pub fn quick_crack_fill(
    details: &CrackFillingDetails,
    rates: &RateTables,
) -> EstimateResult<CrackFillingMaterials> {
    if !details.linear_footage.is_finite() || details.linear_footage < 1.0 {
        return Err(EstimateError::invalid("linearFootage", "must be at least 1 ft"));
    }
    Ok(crack_filling_materials(details, rates))
}

pub fn quick_striping(
    details: &LineStripingDetails,
    rates: &RateTables,
) -> EstimateResult<LineStripingMaterials> {
    validate_striping(details)?;
    Ok(line_striping_materials(details, rates))
}

pub fn quick_patching(
    details: &PatchingDetails,
    rates: &RateTables,
) -> EstimateResult<PatchingMaterials> {
    if !details.area.is_finite() || details.area < 1.0 {
        return Err(EstimateError::invalid("area", "must be at least 1 sq ft"));
    }
    Ok(patching_materials(details, rates))
}

/// Fuel and mobilization for a trip; `project_hours` defaults to the
/// configured minimum when not given.
pub fn quick_fuel(
    distance_miles: f64,
    project_hours: Option<f64>,
    rates: &RateTables,
) -> EstimateResult<QuickFuel> {
    if !distance_miles.is_finite() || distance_miles < 0.0 {
        return Err(EstimateError::invalid("distance", "must be a non-negative number of miles"));
    }
    let hours = project_hours
        .unwrap_or(rates.equipment.minimum_project_hours)
        .max(rates.equipment.minimum_project_hours);
    Ok(QuickFuel {
        fuel: calculate_fuel(distance_miles, hours, rates),
        mobilization: mobilization_fee(distance_miles, &rates.pricing),
    })
}
