use tracing::debug;

use crate::estimate::{
    round_up, CrackFillingMaterials, LineItem, LineStripingMaterials, MaterialBreakdown,
    PatchingMaterials, SealcoatingMaterials,
};
use crate::project::{
    CrackFillingDetails, LineStripingDetails, PatchingDetails, ProjectDetails, SealcoatingDetails,
};
use crate::rates::RateTables;

pub fn calculate_materials(project: &ProjectDetails, rates: &RateTables) -> MaterialBreakdown {
    let sealcoating = project
        .sealcoating
        .as_ref()
        .map(|details| sealcoating_materials(details, rates));
    let crack_filling = project
        .crack_filling
        .as_ref()
        .map(|details| crack_filling_materials(details, rates));
    let line_striping = project
        .line_striping
        .as_ref()
        .map(|details| line_striping_materials(details, rates));
    let patching = project
        .patching
        .as_ref()
        .map(|details| patching_materials(details, rates));

    let grand_total = sealcoating.as_ref().map_or(0.0, |m| m.total)
        + crack_filling.as_ref().map_or(0.0, |m| m.total)
        + line_striping.as_ref().map_or(0.0, |m| m.total)
        + patching.as_ref().map_or(0.0, |m| m.total);
    debug!("materials grand total {grand_total:.2}");

    MaterialBreakdown {
        sealcoating,
        crack_filling,
        line_striping,
        patching,
        grand_total,
    }
}

pub fn sealcoating_materials(details: &SealcoatingDetails, rates: &RateTables) -> SealcoatingMaterials {
    let app = &rates.application;
    let costs = &rates.materials;

    let gallons_needed = round_up(details.area / app.coverage_per_gallon);
    let concentrate_gallons = round_up(gallons_needed / app.dilution_factor);
    let sand_lbs = round_up(concentrate_gallons / 100.0 * app.sand_ratio);
    let sand_bags = round_up(sand_lbs / app.sand_bag_lbs);
    let water_gallons = round_up(concentrate_gallons * app.water_ratio);
    let fast_dry_gallons = round_up(concentrate_gallons / 125.0 * app.fast_dry_ratio);
    let fast_dry_buckets = round_up(fast_dry_gallons / app.fast_dry_bucket_gallons);

    let sealer = LineItem::new(concentrate_gallons, costs.sealer_per_gallon);
    let sand = LineItem::new(sand_bags, costs.sand_per_bag);
    let water = LineItem::new(water_gallons, costs.water_per_gallon);
    let fast_dry = LineItem::new(fast_dry_buckets, costs.fast_dry_per_bucket);

    let prep_seal = if details.oil_spots {
        let prep_gallons =
            round_up(details.effective_oil_spot_area() / app.prep_seal_sqft_per_gallon);
        let buckets = round_up(prep_gallons / app.prep_seal_bucket_gallons);
        Some(LineItem::new(buckets, costs.prep_seal_per_bucket))
    } else {
        None
    };

    let total = sealer.total_cost
        + sand.total_cost
        + water.total_cost
        + fast_dry.total_cost
        + prep_seal.map_or(0.0, |item| item.total_cost);

    SealcoatingMaterials {
        gallons_needed,
        concentrate_gallons,
        water_gallons,
        sealer,
        sand,
        water,
        fast_dry,
        prep_seal,
        total,
    }
}

pub fn crack_filling_materials(
    details: &CrackFillingDetails,
    rates: &RateTables,
) -> CrackFillingMaterials {
    let app = &rates.application;
    let costs = &rates.materials;
    let feet = details.linear_footage;

    let boxes = round_up(feet / app.material_coverage_linear_feet);
    let tanks = round_up(feet / app.propane_linear_feet_per_tank).max(1.0);
    let crack_filler = LineItem::new(boxes, costs.crack_fill_per_box);
    let propane = LineItem::new(tanks, costs.propane_per_tank);
    let sand = if details.sand_fill_required {
        let bags = round_up(feet / app.crack_sand_linear_feet_per_bag).max(1.0);
        Some(LineItem::new(bags, costs.sand_per_bag))
    } else {
        None
    };

    let total =
        crack_filler.total_cost + propane.total_cost + sand.map_or(0.0, |item| item.total_cost);
    CrackFillingMaterials {
        crack_filler,
        propane,
        sand,
        total,
    }
}

pub fn line_striping_materials(
    details: &LineStripingDetails,
    rates: &RateTables,
) -> LineStripingMaterials {
    let app = &rates.application;
    let costs = &rates.materials;

    let total_linear_feet = f64::from(details.standard_stalls) * app.standard_stall_linear_feet
        + f64::from(details.double_stalls) * app.double_stall_linear_feet
        + f64::from(details.crosswalks) * app.crosswalk_linear_feet;
    let paint = LineItem::new(total_linear_feet, costs.paint_per_linear_foot);
    let stencils = LineItem::new(details.stencil_count() as f64, costs.stencil_each);

    LineStripingMaterials {
        total_linear_feet,
        paint,
        stencils,
        total: paint.total_cost + stencils.total_cost,
    }
}

pub fn patching_materials(details: &PatchingDetails, rates: &RateTables) -> PatchingMaterials {
    let unit_cost = rates.materials.patch_rate(details.patch_type)
        * rates.application.patch_material_fraction;
    let patch_material = LineItem::new(details.area, unit_cost);
    PatchingMaterials {
        patch_material,
        total: patch_material.total_cost,
    }
}
