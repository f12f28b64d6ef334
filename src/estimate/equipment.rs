use tracing::debug;

use crate::estimate::{EquipmentBreakdown, FuelBreakdown, LineItem};
use crate::project::ProjectDetails;
use crate::rates::RateTables;

/// Rough on-site hours for the whole job, never below the configured
/// minimum. Shared by the equipment and fuel calculations.
pub fn estimate_project_hours(project: &ProjectDetails, rates: &RateTables) -> f64 {
    let eq = &rates.equipment;
    let mut hours = 0.0;
    if let Some(seal) = &project.sealcoating {
        hours += seal.area / eq.sealcoat_sqft_per_hour;
    }
    if let Some(crack) = &project.crack_filling {
        hours += crack.linear_footage / eq.crack_fill_feet_per_hour;
    }
    if let Some(striping) = &project.line_striping {
        hours += striping.total_stalls() as f64 / eq.striping_stalls_per_hour;
    }
    if let Some(patch) = &project.patching {
        hours += patch.area / eq.patch_sqft_per_hour;
    }
    hours.max(eq.minimum_project_hours)
}

pub fn calculate_equipment(
    project: &ProjectDetails,
    project_hours: f64,
    rates: &RateTables,
) -> EquipmentBreakdown {
    let eq = &rates.equipment;
    let sealcoating_machine = project
        .sealcoating
        .as_ref()
        .map(|_| LineItem::new(project_hours, eq.sealcoating_machine_hourly));
    let crack_filling_machine = project
        .crack_filling
        .as_ref()
        .map(|_| LineItem::new(project_hours, eq.crack_filling_machine_hourly));
    let striping_equipment = project
        .line_striping
        .as_ref()
        .map(|_| LineItem::new(project_hours, eq.striping_equipment_hourly));
    let miscellaneous = LineItem::new(1.0, eq.miscellaneous_flat_fee);

    let total = [sealcoating_machine, crack_filling_machine, striping_equipment]
        .into_iter()
        .flatten()
        .map(|item| item.total_cost)
        .sum::<f64>()
        + miscellaneous.total_cost;
    debug!("equipment {project_hours:.2} h / ${total:.2}");

    EquipmentBreakdown {
        project_hours,
        sealcoating_machine,
        crack_filling_machine,
        striping_equipment,
        miscellaneous,
        total,
    }
}

/// Fuel for the round trip plus fuel burned by equipment on site.
pub fn calculate_fuel(distance_miles: f64, project_hours: f64, rates: &RateTables) -> FuelBreakdown {
    let price = rates.materials.diesel_per_gallon;
    let round_trip_miles = 2.0 * distance_miles;
    let transportation = LineItem::new(round_trip_miles / rates.vehicle.miles_per_gallon, price);
    let equipment_operation =
        LineItem::new(project_hours * rates.equipment.fuel_gallons_per_hour, price);

    FuelBreakdown {
        round_trip_miles,
        transportation,
        equipment_operation,
        total: transportation.total_cost + equipment_operation.total_cost,
    }
}
