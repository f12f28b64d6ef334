use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseKindError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Sealcoating,
    Crackfilling,
    Patching,
    Linestriping,
    Combination,
}

impl ProjectType {
    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Sealcoating => "sealcoating",
            Self::Crackfilling => "crackfilling",
            Self::Patching => "patching",
            Self::Linestriping => "linestriping",
            Self::Combination => "combination",
        }
    }
}

impl Display for ProjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Sealcoating => "Sealcoating",
            Self::Crackfilling => "Crack Filling",
            Self::Patching => "Patching",
            Self::Linestriping => "Line Striping",
            Self::Combination => "Combination",
        };
        write!(f, "{display}")
    }
}

impl FromStr for ProjectType {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "sealcoating" | "sealcoat" => Ok(Self::Sealcoating),
            "crackfilling" | "crack_filling" | "crackfill" => Ok(Self::Crackfilling),
            "patching" | "patch" => Ok(Self::Patching),
            "linestriping" | "line_striping" | "striping" => Ok(Self::Linestriping),
            "combination" | "combo" => Ok(Self::Combination),
            _ => Err(ParseKindError::new("project type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceCondition {
    #[default]
    Good,
    Fair,
    Poor,
    HeavilyOxidized,
}

impl Display for SurfaceCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::HeavilyOxidized => "heavily oxidized",
        };
        write!(f, "{display}")
    }
}

impl FromStr for SurfaceCondition {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            "heavily_oxidized" | "oxidized" => Ok(Self::HeavilyOxidized),
            _ => Err(ParseKindError::new("surface condition", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrackSeverity {
    Light,
    #[default]
    Moderate,
    Severe,
}

impl Display for CrackSeverity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        };
        write!(f, "{display}")
    }
}

impl FromStr for CrackSeverity {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "severe" => Ok(Self::Severe),
            _ => Err(ParseKindError::new("crack severity", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PatchType {
    #[default]
    HotMix,
    ColdPatch,
}

impl Display for PatchType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::HotMix => "hot mix",
            Self::ColdPatch => "cold patch",
        };
        write!(f, "{display}")
    }
}

impl FromStr for PatchType {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "hot_mix" | "hotmix" | "hot" => Ok(Self::HotMix),
            "cold_patch" | "coldpatch" | "cold" => Ok(Self::ColdPatch),
            _ => Err(ParseKindError::new("patch type", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_base: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub start_date: NaiveDate,
    /// Working days, 1 through 30.
    pub estimated_duration: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SealcoatingDetails {
    /// Square feet, at least 100.
    pub area: f64,
    #[serde(default)]
    pub surface_condition: SurfaceCondition,
    #[serde(default)]
    pub oil_spots: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oil_spot_area: Option<f64>,
}

impl SealcoatingDetails {
    /// Oil spot area that actually needs prep seal. Zero unless spots are flagged.
    pub fn effective_oil_spot_area(&self) -> f64 {
        if self.oil_spots {
            self.oil_spot_area.unwrap_or(0.0).max(0.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrackFillingDetails {
    pub linear_footage: f64,
    #[serde(default)]
    pub severity: CrackSeverity,
    #[serde(default)]
    pub sand_fill_required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatchingDetails {
    pub area: f64,
    #[serde(default)]
    pub patch_type: PatchType,
    /// Inches, 1 through 6.
    pub thickness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LineStripingDetails {
    #[serde(default)]
    pub standard_stalls: u32,
    #[serde(default)]
    pub double_stalls: u32,
    #[serde(default)]
    pub handicap_stalls: u32,
    #[serde(default)]
    pub custom_stencils: u32,
    #[serde(default)]
    pub crosswalks: u32,
    #[serde(default)]
    pub restripe: bool,
}

impl LineStripingDetails {
    pub fn total_stalls(&self) -> u64 {
        u64::from(self.standard_stalls)
            + u64::from(self.double_stalls)
            + u64::from(self.handicap_stalls)
    }

    pub fn stencil_count(&self) -> u64 {
        u64::from(self.handicap_stalls) + u64::from(self.custom_stencils)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    pub project_type: ProjectType,
    pub location: Location,
    pub timeline: Timeline,
    #[serde(default)]
    pub weather_considerations: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sealcoating: Option<SealcoatingDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crack_filling: Option<CrackFillingDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patching: Option<PatchingDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_striping: Option<LineStripingDetails>,
}

impl ProjectDetails {
    pub fn service_count(&self) -> usize {
        [
            self.sealcoating.is_some(),
            self.crack_filling.is_some(),
            self.patching.is_some(),
            self.line_striping.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{
        CrackSeverity, LineStripingDetails, PatchType, ProjectDetails, ProjectType,
        SurfaceCondition,
    };

    #[test]
    fn parses_kind_aliases() {
        assert_eq!(
            ProjectType::from_str("Crack-Filling").expect("project type"),
            ProjectType::Crackfilling
        );
        assert_eq!(
            SurfaceCondition::from_str("heavily oxidized").expect("condition"),
            SurfaceCondition::HeavilyOxidized
        );
        assert_eq!(
            CrackSeverity::from_str("SEVERE").expect("severity"),
            CrackSeverity::Severe
        );
        assert_eq!(
            PatchType::from_str("cold_patch").expect("patch type"),
            PatchType::ColdPatch
        );
        assert!(PatchType::from_str("asphalt").is_err());
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let payload = serde_json::json!({
            "projectType": "combination",
            "location": { "address": "12 Main St, Stuart, VA", "distanceFromBase": 18.5 },
            "timeline": { "startDate": "2026-05-04", "estimatedDuration": 2 },
            "weatherConsiderations": true,
            "sealcoating": {
                "area": 8000,
                "surfaceCondition": "heavily_oxidized",
                "oilSpots": true,
                "oilSpotArea": 250
            },
            "lineStriping": { "standardStalls": 24, "handicapStalls": 2 }
        });
        let project: ProjectDetails = serde_json::from_value(payload).expect("valid payload");
        assert_eq!(project.service_count(), 2);
        assert_eq!(project.location.distance_from_base, Some(18.5));
        let striping = project.line_striping.expect("striping");
        assert_eq!(striping.total_stalls(), 26);
        assert_eq!(striping.stencil_count(), 2);
        assert!(!striping.restripe);
        let seal = project.sealcoating.expect("sealcoating");
        assert_eq!(seal.effective_oil_spot_area(), 250.0);
    }

    #[test]
    fn stall_totals_do_not_wrap() {
        let striping = LineStripingDetails {
            standard_stalls: u32::MAX,
            handicap_stalls: 1,
            custom_stencils: u32::MAX,
            ..LineStripingDetails::default()
        };
        assert_eq!(striping.total_stalls(), u64::from(u32::MAX) + 1);
        assert_eq!(striping.stencil_count(), u64::from(u32::MAX) + 1);
    }

    #[test]
    fn oil_spot_area_ignored_without_flag() {
        let seal = super::SealcoatingDetails {
            area: 1000.0,
            surface_condition: SurfaceCondition::Good,
            oil_spots: false,
            oil_spot_area: Some(500.0),
        };
        assert_eq!(seal.effective_oil_spot_area(), 0.0);
    }
}
