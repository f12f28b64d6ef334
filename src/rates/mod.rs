pub mod book;

use serde::{Deserialize, Serialize};

use crate::project::PatchType;

pub use book::RateBook;

/// Static pricing and equipment data read by every calculator.
///
/// Loaded from the `[rates]` section of the config file; every field has a
/// default so a partial file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RateTables {
    pub business: BusinessProfile,
    pub vehicle: VehicleSpec,
    pub sealer_tank: TankSpec,
    pub materials: MaterialCosts,
    pub application: ApplicationRates,
    pub labor: LaborRates,
    pub equipment: EquipmentRates,
    pub pricing: PricingPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BusinessProfile {
    pub name: String,
    pub base_address: String,
    /// Used whenever the distance to a job site cannot be resolved.
    pub default_distance_miles: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VehicleSpec {
    pub name: String,
    pub curb_weight_lbs: f64,
    pub gvwr_lbs: f64,
    pub miles_per_gallon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TankSpec {
    pub name: String,
    pub empty_weight_lbs: f64,
    pub capacity_gallons: f64,
}

/// Unit prices in dollars.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaterialCosts {
    pub sealer_per_gallon: f64,
    pub sand_per_bag: f64,
    pub water_per_gallon: f64,
    pub fast_dry_per_bucket: f64,
    pub prep_seal_per_bucket: f64,
    pub crack_fill_per_box: f64,
    pub propane_per_tank: f64,
    pub paint_per_linear_foot: f64,
    pub stencil_each: f64,
    pub hot_mix_per_sqft: f64,
    pub cold_patch_per_sqft: f64,
    pub diesel_per_gallon: f64,
}

impl MaterialCosts {
    /// Blended installed rate per square foot for a patch type.
    pub fn patch_rate(&self, patch_type: PatchType) -> f64 {
        match patch_type {
            PatchType::HotMix => self.hot_mix_per_sqft,
            PatchType::ColdPatch => self.cold_patch_per_sqft,
        }
    }
}

/// Coverage and conversion factors used to turn areas and lengths into
/// purchasable units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApplicationRates {
    pub coverage_per_gallon: f64,
    /// Mixed gallons per gallon of concentrate.
    pub dilution_factor: f64,
    /// Water gallons added per gallon of concentrate.
    pub water_ratio: f64,
    /// Pounds of sand per 100 gallons of concentrate.
    pub sand_ratio: f64,
    pub sand_bag_lbs: f64,
    /// Gallons of fast-dry additive per 125 gallons of concentrate.
    pub fast_dry_ratio: f64,
    pub fast_dry_bucket_gallons: f64,
    pub prep_seal_sqft_per_gallon: f64,
    pub prep_seal_bucket_gallons: f64,
    pub material_coverage_linear_feet: f64,
    pub propane_linear_feet_per_tank: f64,
    pub crack_sand_linear_feet_per_bag: f64,
    pub standard_stall_linear_feet: f64,
    pub double_stall_linear_feet: f64,
    pub crosswalk_linear_feet: f64,
    /// Share of the blended patch rate that is material.
    pub patch_material_fraction: f64,
    pub sealer_lbs_per_gallon: f64,
}

/// Crew productivity and pay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LaborRates {
    pub hourly_rate: f64,
    pub cleanup_hours: f64,
    pub crew_size: u32,
    pub crew_member_weight_lbs: f64,
    pub sealcoat_prep_sqft_per_hour: f64,
    pub sealcoat_application_sqft_per_hour: f64,
    pub crack_fill_feet_per_hour: f64,
    pub striping_prep_stalls_per_hour: f64,
    pub striping_application_stalls_per_hour: f64,
    pub patch_prep_sqft_per_hour: f64,
    pub patch_application_sqft_per_hour: f64,
    pub oxidized_prep_multiplier: f64,
    pub severe_crack_multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EquipmentRates {
    pub sealcoating_machine_hourly: f64,
    pub crack_filling_machine_hourly: f64,
    pub striping_equipment_hourly: f64,
    pub miscellaneous_flat_fee: f64,
    pub fuel_gallons_per_hour: f64,
    pub minimum_project_hours: f64,
    pub sealcoat_sqft_per_hour: f64,
    pub crack_fill_feet_per_hour: f64,
    pub striping_stalls_per_hour: f64,
    pub patch_sqft_per_hour: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingPolicy {
    pub overhead_rate: f64,
    pub profit_rate: f64,
    pub alternative_markup_rate: f64,
    pub rounding_increment: f64,
    pub mobilization_base_fee: f64,
    pub mobilization_free_miles: f64,
    pub mobilization_per_mile: f64,
    pub quote_validity_days: u32,
    pub low_margin_threshold_pct: f64,
    /// Distances beyond this many miles trigger a travel recommendation.
    pub long_distance_miles: f64,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            name: "Blacktop Pavement Services".to_string(),
            base_address: "337 Ayers Orchard Road, Stuart, VA 24171".to_string(),
            default_distance_miles: 50.0,
        }
    }
}

impl Default for VehicleSpec {
    fn default() -> Self {
        Self {
            name: "1978 Chevy C30 dually".to_string(),
            curb_weight_lbs: 4_300.0,
            gvwr_lbs: 10_000.0,
            miles_per_gallon: 12.0,
        }
    }
}

impl Default for TankSpec {
    fn default() -> Self {
        Self {
            name: "SK 550 skid unit".to_string(),
            empty_weight_lbs: 1_865.0,
            capacity_gallons: 550.0,
        }
    }
}

impl Default for MaterialCosts {
    fn default() -> Self {
        Self {
            sealer_per_gallon: 3.65,
            sand_per_bag: 10.00,
            water_per_gallon: 0.0,
            fast_dry_per_bucket: 50.00,
            prep_seal_per_bucket: 50.00,
            crack_fill_per_box: 44.95,
            propane_per_tank: 10.00,
            paint_per_linear_foot: 0.85,
            stencil_each: 15.00,
            hot_mix_per_sqft: 4.00,
            cold_patch_per_sqft: 3.00,
            diesel_per_gallon: 3.50,
        }
    }
}

impl Default for ApplicationRates {
    fn default() -> Self {
        Self {
            coverage_per_gallon: 76.0,
            dilution_factor: 1.2,
            water_ratio: 0.2,
            sand_ratio: 300.0,
            sand_bag_lbs: 50.0,
            fast_dry_ratio: 2.0,
            fast_dry_bucket_gallons: 5.0,
            prep_seal_sqft_per_gallon: 175.0,
            prep_seal_bucket_gallons: 5.0,
            material_coverage_linear_feet: 100.0,
            propane_linear_feet_per_tank: 1_000.0,
            crack_sand_linear_feet_per_bag: 500.0,
            standard_stall_linear_feet: 20.0,
            double_stall_linear_feet: 25.0,
            crosswalk_linear_feet: 50.0,
            patch_material_fraction: 0.6,
            sealer_lbs_per_gallon: 10.0,
        }
    }
}

impl Default for LaborRates {
    fn default() -> Self {
        Self {
            hourly_rate: 75.0,
            cleanup_hours: 1.0,
            crew_size: 3,
            crew_member_weight_lbs: 200.0,
            sealcoat_prep_sqft_per_hour: 2_000.0,
            sealcoat_application_sqft_per_hour: 1_500.0,
            crack_fill_feet_per_hour: 100.0,
            striping_prep_stalls_per_hour: 20.0,
            striping_application_stalls_per_hour: 15.0,
            patch_prep_sqft_per_hour: 200.0,
            patch_application_sqft_per_hour: 150.0,
            oxidized_prep_multiplier: 1.5,
            severe_crack_multiplier: 1.5,
        }
    }
}

impl Default for EquipmentRates {
    fn default() -> Self {
        Self {
            sealcoating_machine_hourly: 50.0,
            crack_filling_machine_hourly: 35.0,
            striping_equipment_hourly: 25.0,
            miscellaneous_flat_fee: 50.0,
            fuel_gallons_per_hour: 2.0,
            minimum_project_hours: 2.0,
            sealcoat_sqft_per_hour: 1_000.0,
            crack_fill_feet_per_hour: 100.0,
            striping_stalls_per_hour: 10.0,
            patch_sqft_per_hour: 100.0,
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            overhead_rate: 0.15,
            profit_rate: 0.20,
            alternative_markup_rate: 0.25,
            rounding_increment: 10.0,
            mobilization_base_fee: 150.0,
            mobilization_free_miles: 30.0,
            mobilization_per_mile: 5.0,
            quote_validity_days: 30,
            low_margin_threshold_pct: 10.0,
            long_distance_miles: 30.0,
        }
    }
}
