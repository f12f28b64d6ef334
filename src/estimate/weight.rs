use crate::estimate::{SealcoatingMaterials, WeightAnalysis};
use crate::rates::RateTables;

/// Loaded-truck check for a sealcoating run: truck, skid tank full of mixed
/// sealer, sand bags and crew against the vehicle's GVWR.
pub fn analyze_weight(materials: &SealcoatingMaterials, rates: &RateTables) -> WeightAnalysis {
    let app = &rates.application;
    let vehicle_weight = rates.vehicle.curb_weight_lbs;
    let gvwr = rates.vehicle.gvwr_lbs;

    let sealer_weight =
        (materials.concentrate_gallons + materials.water_gallons) * app.sealer_lbs_per_gallon;
    let equipment_weight = rates.sealer_tank.empty_weight_lbs + sealer_weight;
    let material_weight = materials.sand.quantity * app.sand_bag_lbs;
    let crew_weight = f64::from(rates.labor.crew_size) * rates.labor.crew_member_weight_lbs;
    let total_weight = vehicle_weight + equipment_weight + material_weight + crew_weight;

    let within_limits = total_weight <= gvwr;
    let safety_margin = if gvwr > 0.0 {
        (gvwr - total_weight) / gvwr * 100.0
    } else {
        0.0
    };

    let mut warnings = Vec::new();
    if !within_limits {
        warnings.push(format!(
            "Total weight of {total_weight:.0} lbs exceeds GVWR of {gvwr:.0} lbs by {:.0} lbs",
            total_weight - gvwr
        ));
    }
    if safety_margin < rates.pricing.low_margin_threshold_pct {
        warnings.push(format!(
            "Safety margin of {safety_margin:.1}% is below the recommended {:.0}% minimum",
            rates.pricing.low_margin_threshold_pct
        ));
    }
    let mixed_gallons = materials.concentrate_gallons + materials.water_gallons;
    if mixed_gallons > rates.sealer_tank.capacity_gallons {
        warnings.push(format!(
            "{mixed_gallons:.0} gallons of mixed sealer exceeds the {:.0} gallon tank; plan multiple loads",
            rates.sealer_tank.capacity_gallons
        ));
    }

    WeightAnalysis {
        vehicle_weight,
        equipment_weight,
        material_weight,
        crew_weight,
        total_weight,
        gvwr,
        within_limits,
        safety_margin,
        warnings,
    }
}
