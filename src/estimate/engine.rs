use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::distance::DistanceResolver;
use crate::error::{EstimateError, EstimateResult};
use crate::estimate::equipment::{calculate_equipment, calculate_fuel, estimate_project_hours};
use crate::estimate::labor::calculate_labor;
use crate::estimate::materials::calculate_materials;
use crate::estimate::pricing::{
    assemble_breakdown, build_alternatives, build_disclaimers, build_recommendations,
    describe_project, describe_timeline,
};
use crate::estimate::weight::analyze_weight;
use crate::estimate::{CostBreakdown, EstimationResult, ProjectSummary};
use crate::project::{validate_project, ProjectDetails};
use crate::rates::RateTables;

/// Stateless estimation service over one snapshot of the rate tables.
#[derive(Debug, Clone)]
pub struct Estimator {
    rates: Arc<RateTables>,
}

impl Estimator {
    pub fn new(rates: Arc<RateTables>) -> Self {
        Self { rates }
    }

    /// Resolves the site distance if needed, then generates the estimate.
    /// The shop address and fallback distance come from this estimator's
    /// rate snapshot, not from whatever the resolver was built with.
    pub async fn estimate(
        &self,
        project: &ProjectDetails,
        resolver: &DistanceResolver,
    ) -> EstimateResult<EstimationResult> {
        let mut project = project.clone();
        resolver
            .for_business(&self.rates.business)
            .resolve(&mut project)
            .await;
        self.generate_estimate(&project)
    }

    pub fn generate_estimate(&self, project: &ProjectDetails) -> EstimateResult<EstimationResult> {
        self.generate_estimate_on(project, Utc::now().date_naive())
    }

    /// Same as [`Estimator::generate_estimate`] with an explicit quote date,
    /// which only affects the summary's validity window.
    pub fn generate_estimate_on(
        &self,
        project: &ProjectDetails,
        quoted_on: NaiveDate,
    ) -> EstimateResult<EstimationResult> {
        validate_project(project)?;
        let rates = self.rates.as_ref();

        let distance_miles = match project.location.distance_from_base {
            Some(miles) => miles,
            None => {
                let fallback = rates.business.default_distance_miles;
                warn!("no distance resolved for {}, using {fallback} mi", project.location.address);
                fallback
            }
        };

        let materials = calculate_materials(project, rates);
        let labor = calculate_labor(project, rates);
        let project_hours = estimate_project_hours(project, rates);
        let equipment = calculate_equipment(project, project_hours, rates);
        let fuel = calculate_fuel(distance_miles, project_hours, rates);
        let weight_analysis = materials
            .sealcoating
            .as_ref()
            .map(|seal| analyze_weight(seal, rates));
        debug!("weight analysis present: {}", weight_analysis.is_some());

        let breakdown = assemble_breakdown(
            materials,
            labor,
            equipment,
            fuel,
            distance_miles,
            &rates.pricing,
        );
        ensure_finite(&breakdown)?;

        let alternatives = build_alternatives(breakdown.subtotal, &rates.pricing);
        let recommendations =
            build_recommendations(project, distance_miles, weight_analysis.as_ref(), rates);
        let valid_until = quoted_on
            .checked_add_days(Days::new(u64::from(rates.pricing.quote_validity_days)))
            .ok_or_else(|| EstimateError::failed("quote validity date out of range"))?;

        let project_summary = ProjectSummary {
            description: describe_project(project),
            total_cost: breakdown.total,
            timeline: describe_timeline(project),
            quoted_on,
            valid_until,
        };
        info!(
            "estimate generated for {} project: ${:.2}",
            project.project_type.as_slug(),
            breakdown.total
        );

        Ok(EstimationResult {
            project_summary,
            breakdown,
            weight_analysis,
            alternatives,
            recommendations,
            disclaimers: build_disclaimers(rates),
        })
    }
}

fn ensure_finite(breakdown: &CostBreakdown) -> EstimateResult<()> {
    let figures = [
        ("materials", breakdown.materials.grand_total),
        ("labor", breakdown.labor.total.cost),
        ("equipment", breakdown.equipment.total),
        ("fuel", breakdown.fuel.total),
        ("mobilization", breakdown.mobilization),
        ("total", breakdown.total),
    ];
    for (name, value) in figures {
        if !value.is_finite() || value < 0.0 {
            return Err(EstimateError::failed(format!(
                "{name} cost is not a usable number ({value}); check the rate tables"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::Estimator;
    use crate::error::EstimateError;
    use crate::project::{
        Location, ProjectDetails, ProjectType, SealcoatingDetails, SurfaceCondition, Timeline,
    };
    use crate::rates::RateTables;

    fn sealcoat_project(distance: Option<f64>) -> ProjectDetails {
        ProjectDetails {
            project_type: ProjectType::Sealcoating,
            location: Location {
                address: "Food Lion, Stuart VA".to_string(),
                distance_from_base: distance,
            },
            timeline: Timeline {
                start_date: NaiveDate::from_ymd_opt(2026, 5, 11).expect("date"),
                estimated_duration: 1,
            },
            weather_considerations: false,
            sealcoating: Some(SealcoatingDetails {
                area: 5_000.0,
                surface_condition: SurfaceCondition::Good,
                oil_spots: false,
                oil_spot_area: None,
            }),
            crack_filling: None,
            patching: None,
            line_striping: None,
        }
    }

    fn quote_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 1).expect("date")
    }

    #[test]
    fn validity_window_is_thirty_days() {
        let estimator = Estimator::new(Arc::new(RateTables::default()));
        let result = estimator
            .generate_estimate_on(&sealcoat_project(Some(10.0)), quote_date())
            .expect("estimate");
        assert_eq!(
            result.project_summary.valid_until,
            NaiveDate::from_ymd_opt(2026, 5, 31).expect("date")
        );
        assert_eq!(result.project_summary.timeline, "1 day starting 2026-05-11");
    }

    #[test]
    fn missing_distance_uses_configured_default() {
        let estimator = Estimator::new(Arc::new(RateTables::default()));
        let result = estimator
            .generate_estimate_on(&sealcoat_project(None), quote_date())
            .expect("estimate");
        assert_eq!(result.breakdown.fuel.round_trip_miles, 100.0);
        assert_eq!(result.breakdown.mobilization, 250.0);
    }

    #[test]
    fn invalid_project_is_rejected() {
        let estimator = Estimator::new(Arc::new(RateTables::default()));
        let mut project = sealcoat_project(Some(10.0));
        project.sealcoating = None;
        let err = estimator
            .generate_estimate_on(&project, quote_date())
            .expect_err("no services");
        assert!(err.is_invalid_project());
    }

    #[test]
    fn broken_rate_tables_fail_generation() {
        let mut rates = RateTables::default();
        rates.vehicle.miles_per_gallon = 0.0;
        let estimator = Estimator::new(Arc::new(rates));
        let err = estimator
            .generate_estimate_on(&sealcoat_project(Some(10.0)), quote_date())
            .expect_err("infinite fuel cost");
        assert!(matches!(err, EstimateError::GenerationFailed { .. }));
    }
}
