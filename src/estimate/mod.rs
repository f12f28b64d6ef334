pub mod engine;
pub mod equipment;
pub mod labor;
pub mod materials;
pub mod pricing;
pub mod quick;
pub mod weight;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use engine::Estimator;

/// Slack for float noise when rounding up to whole purchasable units.
const UNIT_EPSILON: f64 = 1e-9;

/// Rounds up to a whole unit. Partial gallons, bags or buckets cannot be
/// bought, but a value that is whole up to float noise stays as it is.
pub fn round_up(value: f64) -> f64 {
    let rounded = (value - UNIT_EPSILON).ceil();
    if rounded > 0.0 {
        rounded
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub quantity: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
}

impl LineItem {
    pub fn new(quantity: f64, unit_cost: f64) -> Self {
        Self {
            quantity,
            unit_cost,
            total_cost: quantity * unit_cost,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SealcoatingMaterials {
    pub gallons_needed: f64,
    pub concentrate_gallons: f64,
    pub water_gallons: f64,
    pub sealer: LineItem,
    pub sand: LineItem,
    pub water: LineItem,
    pub fast_dry: LineItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_seal: Option<LineItem>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrackFillingMaterials {
    pub crack_filler: LineItem,
    pub propane: LineItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sand: Option<LineItem>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineStripingMaterials {
    pub total_linear_feet: f64,
    pub paint: LineItem,
    pub stencils: LineItem,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatchingMaterials {
    /// Square feet priced at the material share of the blended rate.
    pub patch_material: LineItem,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MaterialBreakdown {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sealcoating: Option<SealcoatingMaterials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crack_filling: Option<CrackFillingMaterials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_striping: Option<LineStripingMaterials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patching: Option<PatchingMaterials>,
    pub grand_total: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LaborLine {
    pub hours: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LaborBreakdown {
    pub hourly_rate: f64,
    pub preparation: LaborLine,
    pub application: LaborLine,
    pub cleanup: LaborLine,
    pub total: LaborLine,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentBreakdown {
    pub project_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sealcoating_machine: Option<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crack_filling_machine: Option<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub striping_equipment: Option<LineItem>,
    pub miscellaneous: LineItem,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelBreakdown {
    pub round_trip_miles: f64,
    /// Gallons burned driving to and from the site.
    pub transportation: LineItem,
    /// Gallons burned running equipment on site.
    pub equipment_operation: LineItem,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightAnalysis {
    pub vehicle_weight: f64,
    pub equipment_weight: f64,
    pub material_weight: f64,
    pub crew_weight: f64,
    pub total_weight: f64,
    pub gvwr: f64,
    pub within_limits: bool,
    pub safety_margin: f64,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub materials: MaterialBreakdown,
    pub labor: LaborBreakdown,
    pub equipment: EquipmentBreakdown,
    pub fuel: FuelBreakdown,
    pub mobilization: f64,
    pub subtotal: f64,
    pub overhead: f64,
    pub profit: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingOption {
    pub label: String,
    pub description: String,
    pub subtotal: f64,
    pub markup_percentage: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alternatives {
    pub with_markup25: PricingOption,
    pub rounded_up: PricingOption,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub description: String,
    pub total_cost: f64,
    pub timeline: String,
    pub quoted_on: NaiveDate,
    pub valid_until: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    pub project_summary: ProjectSummary,
    pub breakdown: CostBreakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_analysis: Option<WeightAnalysis>,
    pub alternatives: Alternatives,
    pub recommendations: Vec<String>,
    pub disclaimers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::{round_up, LineItem};

    #[test]
    fn round_up_ignores_float_noise() {
        assert_eq!(round_up(65.78), 66.0);
        assert_eq!(round_up(55.000000000000014), 55.0);
        assert_eq!(round_up(31.000000000000004), 31.0);
        assert_eq!(round_up(0.0), 0.0);
        assert_eq!(round_up(0.01), 1.0);
    }

    #[test]
    fn line_item_multiplies() {
        let item = LineItem::new(4.0, 10.0);
        assert_eq!(item.total_cost, 40.0);
    }
}
