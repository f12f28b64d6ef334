pub mod cache;
pub mod http;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::project::ProjectDetails;
use crate::rates::BusinessProfile;

pub use cache::CachedDistanceLookup;
pub use http::HttpDistanceLookup;

/// Something that can tell how far a job site is from the shop.
#[async_trait]
pub trait DistanceLookup: Send + Sync {
    async fn distance_miles(&self, from_address: &str, to_address: &str) -> Result<f64>;
}

/// Always answers with the same distance.
#[derive(Debug, Clone, Copy)]
pub struct FixedDistance(pub f64);

#[async_trait]
impl DistanceLookup for FixedDistance {
    async fn distance_miles(&self, _from: &str, _to: &str) -> Result<f64> {
        Ok(self.0)
    }
}

/// Lookup used when no provider is configured; every call fails so the
/// resolver applies its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDistanceProvider;

#[async_trait]
impl DistanceLookup for NoDistanceProvider {
    async fn distance_miles(&self, _from: &str, _to: &str) -> Result<f64> {
        Err(anyhow!("no distance provider configured"))
    }
}

/// Fills in `location.distance_from_base` before the calculators run.
#[derive(Clone)]
pub struct DistanceResolver {
    lookup: Arc<dyn DistanceLookup>,
    base_address: String,
    default_miles: f64,
    timeout: Duration,
}

impl DistanceResolver {
    pub fn new(
        lookup: Arc<dyn DistanceLookup>,
        base_address: impl Into<String>,
        default_miles: f64,
        timeout: Duration,
    ) -> Self {
        Self {
            lookup,
            base_address: base_address.into(),
            default_miles,
            timeout,
        }
    }

    /// Builds the resolver described by `config`: a cached HTTP lookup when a
    /// provider URL is set, otherwise one that always uses the default.
    pub fn from_config(config: &Config) -> Result<Self> {
        let lookup: Arc<dyn DistanceLookup> = if config.distance.provider_url.trim().is_empty() {
            debug!("no distance provider configured");
            Arc::new(NoDistanceProvider)
        } else {
            Arc::new(CachedDistanceLookup::new(HttpDistanceLookup::new(&config.distance)?))
        };
        Ok(Self::new(
            lookup,
            config.rates.business.base_address.clone(),
            config.rates.business.default_distance_miles,
            Duration::from_secs(config.distance.timeout_secs.max(1)),
        ))
    }

    /// Same lookup and timeout, measured from `business`'s shop with its
    /// fallback distance. The lookup (and any cache behind it) is shared.
    pub fn for_business(&self, business: &BusinessProfile) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            base_address: business.base_address.clone(),
            default_miles: business.default_distance_miles,
            timeout: self.timeout,
        }
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    pub fn default_miles(&self) -> f64 {
        self.default_miles
    }

    /// Returns the one-way distance to `address`, never failing: errors,
    /// timeouts and nonsense answers all become the default distance.
    pub async fn resolve_miles(&self, address: &str) -> f64 {
        let lookup = self.lookup.distance_miles(&self.base_address, address);
        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(miles)) if miles.is_finite() && miles >= 0.0 => {
                debug!("resolved distance to {address}: {miles:.1} mi");
                miles
            }
            Ok(Ok(miles)) => {
                warn!(
                    "distance lookup returned unusable value {miles} for {address}, using {} mi",
                    self.default_miles
                );
                self.default_miles
            }
            Ok(Err(err)) => {
                warn!(
                    "distance lookup failed for {address}: {err:#}, using {} mi",
                    self.default_miles
                );
                self.default_miles
            }
            Err(_) => {
                warn!(
                    "distance lookup timed out after {:?} for {address}, using {} mi",
                    self.timeout, self.default_miles
                );
                self.default_miles
            }
        }
    }

    /// Populates the project's distance unless it is already set.
    pub async fn resolve(&self, project: &mut ProjectDetails) {
        if project.location.distance_from_base.is_some() {
            return;
        }
        let miles = self.resolve_miles(&project.location.address).await;
        project.location.distance_from_base = Some(miles);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::{DistanceLookup, DistanceResolver, FixedDistance, NoDistanceProvider};
    use crate::project::{
        Location, ProjectDetails, ProjectType, SealcoatingDetails, SurfaceCondition, Timeline,
    };

    struct SlowLookup;

    #[async_trait]
    impl DistanceLookup for SlowLookup {
        async fn distance_miles(&self, _from: &str, _to: &str) -> Result<f64> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(3.0)
        }
    }

    fn resolver(lookup: Arc<dyn DistanceLookup>) -> DistanceResolver {
        DistanceResolver::new(lookup, "Shop", 50.0, Duration::from_millis(50))
    }

    fn project(distance: Option<f64>) -> ProjectDetails {
        ProjectDetails {
            project_type: ProjectType::Sealcoating,
            location: Location {
                address: "Lot 7, Martinsville".to_string(),
                distance_from_base: distance,
            },
            timeline: Timeline {
                start_date: NaiveDate::from_ymd_opt(2026, 7, 1).expect("date"),
                estimated_duration: 1,
            },
            weather_considerations: false,
            sealcoating: Some(SealcoatingDetails {
                area: 3000.0,
                surface_condition: SurfaceCondition::Fair,
                oil_spots: false,
                oil_spot_area: None,
            }),
            crack_filling: None,
            patching: None,
            line_striping: None,
        }
    }

    #[tokio::test]
    async fn fills_missing_distance() {
        let mut p = project(None);
        resolver(Arc::new(FixedDistance(22.5))).resolve(&mut p).await;
        assert_eq!(p.location.distance_from_base, Some(22.5));
    }

    #[tokio::test]
    async fn keeps_existing_distance() {
        let mut p = project(Some(8.0));
        resolver(Arc::new(FixedDistance(22.5))).resolve(&mut p).await;
        assert_eq!(p.location.distance_from_base, Some(8.0));
    }

    #[tokio::test]
    async fn failure_falls_back_to_default() {
        let mut p = project(None);
        resolver(Arc::new(NoDistanceProvider)).resolve(&mut p).await;
        assert_eq!(p.location.distance_from_base, Some(50.0));
    }

    #[tokio::test]
    async fn timeout_falls_back_to_default() {
        let miles = resolver(Arc::new(SlowLookup)).resolve_miles("anywhere").await;
        assert_eq!(miles, 50.0);
    }

    #[tokio::test]
    async fn negative_answer_falls_back_to_default() {
        let miles = resolver(Arc::new(FixedDistance(-1.0)))
            .resolve_miles("anywhere")
            .await;
        assert_eq!(miles, 50.0);
    }

    #[tokio::test]
    async fn business_profile_replaces_shop_and_default() {
        let base = resolver(Arc::new(NoDistanceProvider));
        let business = crate::rates::BusinessProfile {
            name: "Satellite yard".to_string(),
            base_address: "100 Depot St, Martinsville, VA".to_string(),
            default_distance_miles: 20.0,
        };
        let rebound = base.for_business(&business);
        assert_eq!(rebound.base_address(), "100 Depot St, Martinsville, VA");
        assert_eq!(rebound.resolve_miles("Anywhere").await, 20.0);
        assert_eq!(base.resolve_miles("Anywhere").await, 50.0);
    }
}
