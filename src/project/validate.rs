use crate::error::{EstimateError, EstimateResult};
use crate::project::{LineStripingDetails, ProjectDetails, ProjectType};

pub const MIN_SEALCOAT_AREA: f64 = 100.0;
pub const MAX_DURATION_DAYS: u32 = 30;
pub const MIN_PATCH_THICKNESS: f64 = 1.0;
pub const MAX_PATCH_THICKNESS: f64 = 6.0;
/// Per-field ceiling on striping counts.
pub const MAX_STRIPING_COUNT: u32 = 10_000;

/// Checks the input contract before any cost is computed.
pub fn validate_project(project: &ProjectDetails) -> EstimateResult<()> {
    if project.location.address.trim().is_empty() {
        return Err(EstimateError::invalid("location.address", "must not be empty"));
    }
    if let Some(distance) = project.location.distance_from_base {
        if !distance.is_finite() || distance < 0.0 {
            return Err(EstimateError::invalid(
                "location.distanceFromBase",
                format!("must be a non-negative number of miles, got {distance}"),
            ));
        }
    }

    let duration = project.timeline.estimated_duration;
    if !(1..=MAX_DURATION_DAYS).contains(&duration) {
        return Err(EstimateError::invalid(
            "timeline.estimatedDuration",
            format!("must be between 1 and {MAX_DURATION_DAYS} days, got {duration}"),
        ));
    }

    let services = project.service_count();
    if services == 0 {
        return Err(EstimateError::invalid(
            "services",
            "at least one service must be present",
        ));
    }
    let matching_present = match project.project_type {
        ProjectType::Sealcoating => project.sealcoating.is_some(),
        ProjectType::Crackfilling => project.crack_filling.is_some(),
        ProjectType::Patching => project.patching.is_some(),
        ProjectType::Linestriping => project.line_striping.is_some(),
        ProjectType::Combination => services >= 2,
    };
    if !matching_present {
        let reason = if project.project_type == ProjectType::Combination {
            "combination projects need two or more services".to_string()
        } else {
            format!("{} project is missing its service details", project.project_type)
        };
        return Err(EstimateError::invalid("projectType", reason));
    }

    if let Some(seal) = &project.sealcoating {
        check_min("sealcoating.area", seal.area, MIN_SEALCOAT_AREA)?;
        if let Some(oil) = seal.oil_spot_area {
            check_min("sealcoating.oilSpotArea", oil, 0.0)?;
        }
    }
    if let Some(crack) = &project.crack_filling {
        check_min("crackFilling.linearFootage", crack.linear_footage, 1.0)?;
    }
    if let Some(patch) = &project.patching {
        check_min("patching.area", patch.area, 1.0)?;
        if !patch.thickness.is_finite()
            || !(MIN_PATCH_THICKNESS..=MAX_PATCH_THICKNESS).contains(&patch.thickness)
        {
            return Err(EstimateError::invalid(
                "patching.thickness",
                format!(
                    "must be between {MIN_PATCH_THICKNESS} and {MAX_PATCH_THICKNESS} inches, got {}",
                    patch.thickness
                ),
            ));
        }
    }
    if let Some(striping) = &project.line_striping {
        validate_striping(striping)?;
    }
    Ok(())
}

/// Striping counts must stay within bounds and describe at least one painted item.
pub fn validate_striping(striping: &LineStripingDetails) -> EstimateResult<()> {
    let counts = [
        ("lineStriping.standardStalls", striping.standard_stalls),
        ("lineStriping.doubleStalls", striping.double_stalls),
        ("lineStriping.handicapStalls", striping.handicap_stalls),
        ("lineStriping.customStencils", striping.custom_stencils),
        ("lineStriping.crosswalks", striping.crosswalks),
    ];
    for (field, count) in counts {
        if count > MAX_STRIPING_COUNT {
            return Err(EstimateError::invalid(
                field,
                format!("must be at most {MAX_STRIPING_COUNT}, got {count}"),
            ));
        }
    }
    if counts.iter().all(|(_, count)| *count == 0) {
        return Err(EstimateError::invalid(
            "lineStriping",
            "needs at least one stall, stencil or crosswalk",
        ));
    }
    Ok(())
}

fn check_min(field: &str, value: f64, min: f64) -> EstimateResult<()> {
    if !value.is_finite() || value < min {
        return Err(EstimateError::invalid(
            field,
            format!("must be at least {min}, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{validate_project, MAX_STRIPING_COUNT};
    use crate::project::{
        CrackFillingDetails, CrackSeverity, LineStripingDetails, Location, PatchType,
        PatchingDetails, ProjectDetails, ProjectType, SealcoatingDetails, SurfaceCondition,
        Timeline,
    };

    fn base(project_type: ProjectType) -> ProjectDetails {
        ProjectDetails {
            project_type,
            location: Location {
                address: "400 Commerce Dr".to_string(),
                distance_from_base: Some(12.0),
            },
            timeline: Timeline {
                start_date: NaiveDate::from_ymd_opt(2026, 6, 1).expect("date"),
                estimated_duration: 1,
            },
            weather_considerations: false,
            sealcoating: None,
            crack_filling: None,
            patching: None,
            line_striping: None,
        }
    }

    fn seal(area: f64) -> SealcoatingDetails {
        SealcoatingDetails {
            area,
            surface_condition: SurfaceCondition::Good,
            oil_spots: false,
            oil_spot_area: None,
        }
    }

    #[test]
    fn rejects_project_without_services() {
        let err = validate_project(&base(ProjectType::Sealcoating)).expect_err("no services");
        assert!(err.is_invalid_project());
    }

    #[test]
    fn combination_needs_two_services() {
        let mut project = base(ProjectType::Combination);
        project.sealcoating = Some(seal(2000.0));
        assert!(validate_project(&project).is_err());

        project.line_striping = Some(LineStripingDetails {
            standard_stalls: 10,
            ..LineStripingDetails::default()
        });
        assert!(validate_project(&project).is_ok());
    }

    #[test]
    fn striping_counts_are_bounded() {
        let mut project = base(ProjectType::Linestriping);
        project.line_striping = Some(LineStripingDetails {
            standard_stalls: u32::MAX,
            handicap_stalls: 1,
            ..LineStripingDetails::default()
        });
        let err = validate_project(&project).expect_err("stall count too large");
        assert!(err.is_invalid_project());
        assert!(err.to_string().contains("lineStriping.standardStalls"));

        project.line_striping = Some(LineStripingDetails {
            standard_stalls: MAX_STRIPING_COUNT,
            ..LineStripingDetails::default()
        });
        assert!(validate_project(&project).is_ok());
    }

    #[test]
    fn empty_striping_is_rejected() {
        let mut project = base(ProjectType::Linestriping);
        project.line_striping = Some(LineStripingDetails {
            restripe: true,
            ..LineStripingDetails::default()
        });
        let err = validate_project(&project).expect_err("nothing to stripe");
        assert!(err.to_string().contains("lineStriping"));

        project.line_striping = Some(LineStripingDetails {
            crosswalks: 1,
            ..LineStripingDetails::default()
        });
        assert!(validate_project(&project).is_ok());
    }

    #[test]
    fn single_service_type_needs_matching_record() {
        let mut project = base(ProjectType::Patching);
        project.crack_filling = Some(CrackFillingDetails {
            linear_footage: 300.0,
            severity: CrackSeverity::Light,
            sand_fill_required: false,
        });
        let err = validate_project(&project).expect_err("patching details missing");
        assert!(err.to_string().contains("projectType"));
    }

    #[test]
    fn enforces_numeric_ranges() {
        let mut project = base(ProjectType::Sealcoating);
        project.sealcoating = Some(seal(99.0));
        assert!(validate_project(&project).is_err());
        project.sealcoating = Some(seal(100.0));
        assert!(validate_project(&project).is_ok());

        project.timeline.estimated_duration = 31;
        assert!(validate_project(&project).is_err());
        project.timeline.estimated_duration = 30;
        assert!(validate_project(&project).is_ok());

        project.location.distance_from_base = Some(-4.0);
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn patch_thickness_must_be_in_range() {
        let mut project = base(ProjectType::Patching);
        project.patching = Some(PatchingDetails {
            area: 40.0,
            patch_type: PatchType::ColdPatch,
            thickness: 7.0,
        });
        assert!(validate_project(&project).is_err());
        if let Some(patch) = project.patching.as_mut() {
            patch.thickness = 2.0;
        }
        assert!(validate_project(&project).is_ok());
    }
}
