use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use httpmock::prelude::*;
use paving_estimator::config::DistanceConfig;
use paving_estimator::distance::{
    CachedDistanceLookup, DistanceLookup, DistanceResolver, HttpDistanceLookup,
};

const SHOP: &str = "337 Ayers Orchard Road, Stuart, VA 24171";

fn distance_config(url: String) -> DistanceConfig {
    DistanceConfig {
        provider_url: url,
        api_key: "test-key".to_string(),
        timeout_secs: 2,
    }
}

#[tokio::test]
async fn reads_distance_matrix_response() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/distancematrix")
                .query_param("origins", SHOP)
                .query_param("destinations", "Martinsville, VA")
                .query_param("units", "imperial")
                .query_param("key", "test-key");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "rows": [
                    { "elements": [ { "status": "OK", "distance": { "text": "27.6 mi", "value": 44418.0 } } ] }
                ]
            }));
        })
        .await;

    let lookup = HttpDistanceLookup::new(&distance_config(server.url("/distancematrix")))?;
    let miles = lookup.distance_miles(SHOP, "Martinsville, VA").await?;

    mock.assert_async().await;
    assert!((miles - 27.6).abs() < 0.01);
    Ok(())
}

#[tokio::test]
async fn server_error_is_reported() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/distancematrix");
            then.status(500).body("upstream unavailable");
        })
        .await;

    let lookup = HttpDistanceLookup::new(&distance_config(server.url("/distancematrix")))?;
    let err = lookup
        .distance_miles(SHOP, "Martinsville, VA")
        .await
        .expect_err("500 should fail");
    assert!(format!("{err:#}").contains("500"));
    Ok(())
}

#[tokio::test]
async fn resolver_falls_back_when_provider_fails() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/distancematrix");
            then.status(200).json_body(serde_json::json!({ "status": "REQUEST_DENIED" }));
        })
        .await;

    let lookup = HttpDistanceLookup::new(&distance_config(server.url("/distancematrix")))?;
    let resolver = DistanceResolver::new(Arc::new(lookup), SHOP, 50.0, Duration::from_secs(2));
    assert_eq!(resolver.resolve_miles("Nowhere").await, 50.0);
    Ok(())
}

#[tokio::test]
async fn cached_lookup_hits_provider_once() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/distancematrix");
            then.status(200).json_body(serde_json::json!({ "miles": 18.0 }));
        })
        .await;

    let lookup = CachedDistanceLookup::new(HttpDistanceLookup::new(&distance_config(
        server.url("/distancematrix"),
    ))?);
    assert_eq!(lookup.distance_miles(SHOP, "Patrick Springs").await?, 18.0);
    assert_eq!(lookup.distance_miles(SHOP, " patrick springs ").await?, 18.0);

    mock.assert_hits_async(1).await;
    Ok(())
}
