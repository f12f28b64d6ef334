use crate::estimate::{
    Alternatives, CostBreakdown, EquipmentBreakdown, FuelBreakdown, LaborBreakdown,
    MaterialBreakdown, PricingOption, WeightAnalysis,
};
use crate::project::{CrackSeverity, ProjectDetails, SurfaceCondition};
use crate::rates::{PricingPolicy, RateTables};

/// Flat setup fee plus a per-mile charge beyond the free radius.
pub fn mobilization_fee(distance_miles: f64, pricing: &PricingPolicy) -> f64 {
    let extra_miles = (distance_miles - pricing.mobilization_free_miles).max(0.0);
    pricing.mobilization_base_fee + extra_miles * pricing.mobilization_per_mile
}

pub fn assemble_breakdown(
    materials: MaterialBreakdown,
    labor: LaborBreakdown,
    equipment: EquipmentBreakdown,
    fuel: FuelBreakdown,
    distance_miles: f64,
    pricing: &PricingPolicy,
) -> CostBreakdown {
    let mobilization = mobilization_fee(distance_miles, pricing);
    let subtotal =
        materials.grand_total + labor.total.cost + equipment.total + fuel.total + mobilization;
    let overhead = subtotal * pricing.overhead_rate;
    let profit = subtotal * pricing.profit_rate;

    CostBreakdown {
        materials,
        labor,
        equipment,
        fuel,
        mobilization,
        subtotal,
        overhead,
        profit,
        total: subtotal + overhead + profit,
    }
}

pub fn build_alternatives(subtotal: f64, pricing: &PricingPolicy) -> Alternatives {
    let markup = pricing.alternative_markup_rate;
    let markup_pct = markup * 100.0;

    let with_markup25 = PricingOption {
        label: format!("Flat {markup_pct:.0}% markup"),
        description: format!(
            "Subtotal with a single {markup_pct:.0}% markup in place of overhead and profit"
        ),
        subtotal,
        markup_percentage: markup_pct,
        total: subtotal * (1.0 + markup),
    };

    let increment = pricing.rounding_increment;
    let rounded_subtotal = if increment > 0.0 {
        (subtotal / increment).ceil() * increment
    } else {
        subtotal
    };
    let rounded_total = rounded_subtotal * (1.0 + markup);
    let combined_pct = if subtotal > 0.0 {
        (rounded_total - subtotal) / subtotal * 100.0
    } else {
        markup_pct
    };
    let rounded_up = PricingOption {
        label: format!("Rounded to ${increment:.0} + {markup_pct:.0}%"),
        description: format!(
            "Subtotal rounded up to the nearest ${increment:.0} (${rounded_subtotal:.2}), then marked up {markup_pct:.0}%"
        ),
        subtotal: rounded_subtotal,
        markup_percentage: combined_pct,
        total: rounded_total,
    };

    Alternatives {
        with_markup25,
        rounded_up,
    }
}

/// One sentence per active service, joined.
pub fn describe_project(project: &ProjectDetails) -> String {
    let mut parts = Vec::new();
    if let Some(seal) = &project.sealcoating {
        let mut part = format!(
            "Sealcoating {:.0} sq ft ({} condition)",
            seal.area, seal.surface_condition
        );
        let oil = seal.effective_oil_spot_area();
        if oil > 0.0 {
            part.push_str(&format!(" with {oil:.0} sq ft of oil spot treatment"));
        }
        parts.push(part);
    }
    if let Some(crack) = &project.crack_filling {
        let mut part = format!(
            "Crack filling {:.0} linear ft ({} cracks)",
            crack.linear_footage, crack.severity
        );
        if crack.sand_fill_required {
            part.push_str(" with sand fill");
        }
        parts.push(part);
    }
    if let Some(patch) = &project.patching {
        parts.push(format!(
            "Patching {:.0} sq ft of {} at {:.1} in",
            patch.area, patch.patch_type, patch.thickness
        ));
    }
    if let Some(striping) = &project.line_striping {
        let verb = if striping.restripe {
            "Restriping"
        } else {
            "Line striping"
        };
        let mut part = format!("{verb} {} stalls", striping.total_stalls());
        if striping.crosswalks > 0 {
            part.push_str(&format!(", {} crosswalks", striping.crosswalks));
        }
        if striping.stencil_count() > 0 {
            part.push_str(&format!(", {} stencils", striping.stencil_count()));
        }
        parts.push(part);
    }
    format!("{} at {}", parts.join("; "), project.location.address)
}

pub fn describe_timeline(project: &ProjectDetails) -> String {
    let days = project.timeline.estimated_duration;
    let unit = if days == 1 { "day" } else { "days" };
    format!(
        "{days} {unit} starting {}",
        project.timeline.start_date.format("%Y-%m-%d")
    )
}

pub fn build_recommendations(
    project: &ProjectDetails,
    distance_miles: f64,
    weight: Option<&WeightAnalysis>,
    rates: &RateTables,
) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(seal) = &project.sealcoating {
        match seal.surface_condition {
            SurfaceCondition::HeavilyOxidized => out.push(
                "Surface is heavily oxidized: apply two coats and allow extra prep time for cleaning".to_string(),
            ),
            SurfaceCondition::Poor => out.push(
                "Surface is in poor condition: repair failed areas before sealcoating".to_string(),
            ),
            SurfaceCondition::Good | SurfaceCondition::Fair => {}
        }
        if seal.effective_oil_spot_area() > 0.0 {
            out.push("Treat oil spots with prep seal and let it cure before sealcoating".to_string());
        }
    }
    if let Some(crack) = &project.crack_filling {
        if crack.severity == CrackSeverity::Severe {
            out.push(
                "Severe cracking found: consider patching or full-depth repair where cracks have widened into potholes".to_string(),
            );
        }
    }
    if project.timeline.estimated_duration > 1 {
        out.push(format!(
            "Multi-day job ({} days): stage work in sections and plan traffic control between days",
            project.timeline.estimated_duration
        ));
    }
    if distance_miles > rates.pricing.long_distance_miles {
        out.push(format!(
            "Site is {distance_miles:.0} miles from base: group nearby jobs to offset travel costs"
        ));
    }
    if project.weather_considerations {
        out.push(
            "Schedule around the forecast: sealer needs 50°F+ and 24 hours without rain".to_string(),
        );
    }
    if let Some(striping) = &project.line_striping {
        if striping.restripe && project.sealcoating.is_some() {
            out.push(
                "Photograph the existing layout before sealcoating so it can be restriped to match".to_string(),
            );
        }
    }
    if let Some(weight) = weight {
        if !weight.within_limits {
            out.push(
                "Loaded truck exceeds GVWR: split the sealer into multiple trips or use a trailer".to_string(),
            );
        } else if weight.safety_margin < rates.pricing.low_margin_threshold_pct {
            out.push("Weight margin is thin: avoid carrying extra sand or equipment".to_string());
        }
    }
    out
}

pub fn build_disclaimers(rates: &RateTables) -> Vec<String> {
    vec![
        format!(
            "This estimate is valid for {} days from the date issued",
            rates.pricing.quote_validity_days
        ),
        "Material prices are subject to change with supplier costs".to_string(),
        "Work is weather dependent and may be rescheduled for rain or low temperatures".to_string(),
        "Subsurface damage discovered during work is not included and will be quoted separately".to_string(),
        "This estimate is a parametric calculation and is not a binding contract".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{build_alternatives, build_recommendations, mobilization_fee};
    use crate::estimate::WeightAnalysis;
    use crate::project::{
        CrackFillingDetails, CrackSeverity, LineStripingDetails, Location, ProjectDetails,
        ProjectType, SealcoatingDetails, SurfaceCondition, Timeline,
    };
    use crate::rates::{PricingPolicy, RateTables};

    fn plain_sealcoat() -> ProjectDetails {
        ProjectDetails {
            project_type: ProjectType::Sealcoating,
            location: Location {
                address: "Bank of Botetourt, Stuart VA".to_string(),
                distance_from_base: Some(8.0),
            },
            timeline: Timeline {
                start_date: NaiveDate::from_ymd_opt(2026, 8, 3).expect("date"),
                estimated_duration: 1,
            },
            weather_considerations: false,
            sealcoating: Some(SealcoatingDetails {
                area: 4_000.0,
                surface_condition: SurfaceCondition::Good,
                oil_spots: false,
                oil_spot_area: None,
            }),
            crack_filling: None,
            patching: None,
            line_striping: None,
        }
    }

    fn weight(within_limits: bool, safety_margin: f64) -> WeightAnalysis {
        WeightAnalysis {
            vehicle_weight: 4_300.0,
            equipment_weight: 3_000.0,
            material_weight: 400.0,
            crew_weight: 600.0,
            total_weight: 8_300.0,
            gvwr: 10_000.0,
            within_limits,
            safety_margin,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn plain_job_gets_no_recommendations() {
        let rates = RateTables::default();
        let recs = build_recommendations(&plain_sealcoat(), 8.0, Some(&weight(true, 17.0)), &rates);
        assert!(recs.is_empty(), "unexpected: {recs:?}");
    }

    #[test]
    fn each_condition_adds_its_recommendation() {
        let rates = RateTables::default();
        let mut project = plain_sealcoat();
        project.project_type = ProjectType::Combination;
        project.timeline.estimated_duration = 3;
        project.weather_considerations = true;
        if let Some(seal) = project.sealcoating.as_mut() {
            seal.surface_condition = SurfaceCondition::HeavilyOxidized;
            seal.oil_spots = true;
            seal.oil_spot_area = Some(120.0);
        }
        project.crack_filling = Some(CrackFillingDetails {
            linear_footage: 600.0,
            severity: CrackSeverity::Severe,
            sand_fill_required: false,
        });
        project.line_striping = Some(LineStripingDetails {
            standard_stalls: 30,
            restripe: true,
            ..LineStripingDetails::default()
        });

        let recs = build_recommendations(&project, 45.0, Some(&weight(false, -4.0)), &rates);
        let has = |needle: &str| recs.iter().any(|r| r.contains(needle));
        assert!(has("heavily oxidized"));
        assert!(has("oil spots"));
        assert!(has("Severe cracking"));
        assert!(has("Multi-day job (3 days)"));
        assert!(has("45 miles from base"));
        assert!(has("forecast"));
        assert!(has("restriped"));
        assert!(has("exceeds GVWR"));
        assert_eq!(recs.len(), 8);
    }

    #[test]
    fn thin_margin_and_poor_surface_are_flagged() {
        let rates = RateTables::default();
        let mut project = plain_sealcoat();
        if let Some(seal) = project.sealcoating.as_mut() {
            seal.surface_condition = SurfaceCondition::Poor;
        }
        let recs = build_recommendations(&project, 8.0, Some(&weight(true, 6.0)), &rates);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("poor condition"));
        assert!(recs[1].contains("margin is thin"));
    }

    #[test]
    fn mobilization_charges_past_free_radius() {
        let pricing = PricingPolicy::default();
        assert_eq!(mobilization_fee(12.0, &pricing), 150.0);
        assert_eq!(mobilization_fee(30.0, &pricing), 150.0);
        assert_eq!(mobilization_fee(40.0, &pricing), 200.0);
    }

    #[test]
    fn rounded_up_reports_combined_markup() {
        let pricing = PricingPolicy::default();
        let alts = build_alternatives(1_234.0, &pricing);
        assert!((alts.with_markup25.total - 1_542.5).abs() < 1e-9);
        assert_eq!(alts.with_markup25.markup_percentage, 25.0);

        assert_eq!(alts.rounded_up.subtotal, 1_240.0);
        assert!((alts.rounded_up.total - 1_550.0).abs() < 1e-9);
        let expected_pct = (1_550.0 - 1_234.0) / 1_234.0 * 100.0;
        assert!((alts.rounded_up.markup_percentage - expected_pct).abs() < 1e-9);
        assert!(alts.rounded_up.markup_percentage > 25.0);
        assert!(alts.rounded_up.total >= alts.with_markup25.total);
    }

    #[test]
    fn exact_multiple_keeps_plain_markup() {
        let alts = build_alternatives(1_000.0, &PricingPolicy::default());
        assert_eq!(alts.rounded_up.subtotal, 1_000.0);
        assert!((alts.rounded_up.markup_percentage - 25.0).abs() < 1e-9);
    }
}
