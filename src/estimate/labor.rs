use tracing::debug;

use crate::estimate::{round_up, LaborBreakdown, LaborLine};
use crate::project::{CrackSeverity, ProjectDetails, SurfaceCondition};
use crate::rates::RateTables;

/// Unrounded preparation and application hours across all services.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawLaborHours {
    pub preparation: f64,
    pub application: f64,
}

pub fn raw_labor_hours(project: &ProjectDetails, rates: &RateTables) -> RawLaborHours {
    let labor = &rates.labor;
    let mut hours = RawLaborHours::default();

    if let Some(seal) = &project.sealcoating {
        let mut prep = seal.area / labor.sealcoat_prep_sqft_per_hour;
        if seal.surface_condition == SurfaceCondition::HeavilyOxidized {
            prep *= labor.oxidized_prep_multiplier;
        }
        hours.preparation += prep;
        hours.application += seal.area / labor.sealcoat_application_sqft_per_hour;
    }
    if let Some(crack) = &project.crack_filling {
        let mut application = crack.linear_footage / labor.crack_fill_feet_per_hour;
        if crack.severity == CrackSeverity::Severe {
            application *= labor.severe_crack_multiplier;
        }
        hours.application += application;
    }
    if let Some(striping) = &project.line_striping {
        let stalls = striping.total_stalls() as f64;
        hours.preparation += stalls / labor.striping_prep_stalls_per_hour;
        hours.application += stalls / labor.striping_application_stalls_per_hour;
    }
    if let Some(patch) = &project.patching {
        hours.preparation += patch.area / labor.patch_prep_sqft_per_hour;
        hours.application += patch.area / labor.patch_application_sqft_per_hour;
    }
    hours
}

/// Each reported line is rounded up on its own, but `total` rounds the
/// unrounded sum once, so it can come out below the sum of the lines.
/// Existing quotes depend on this.
pub fn calculate_labor(project: &ProjectDetails, rates: &RateTables) -> LaborBreakdown {
    let rate = rates.labor.hourly_rate;
    let raw = raw_labor_hours(project, rates);
    let cleanup = rates.labor.cleanup_hours;

    let line = |hours: f64| {
        let billed = round_up(hours);
        LaborLine {
            hours: billed,
            cost: billed * rate,
        }
    };

    let breakdown = LaborBreakdown {
        hourly_rate: rate,
        preparation: line(raw.preparation),
        application: line(raw.application),
        cleanup: line(cleanup),
        total: line(raw.preparation + raw.application + cleanup),
    };
    debug!(
        "labor {:.0} h / ${:.2}",
        breakdown.total.hours, breakdown.total.cost
    );
    breakdown
}
