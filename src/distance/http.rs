use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

use crate::config::DistanceConfig;
use crate::distance::DistanceLookup;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 4;
const METERS_PER_MILE: f64 = 1_609.344;

/// Distance lookup backed by a distance-matrix style HTTP endpoint.
pub struct HttpDistanceLookup {
    client: Client,
    provider_url: String,
    api_key: Option<String>,
}

impl HttpDistanceLookup {
    pub fn new(config: &DistanceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("paving-estimator/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .build()
            .context("failed to build distance HTTP client")?;
        let api_key = Some(config.api_key.trim().to_string()).filter(|k| !k.is_empty());
        Ok(Self {
            client,
            provider_url: config.provider_url.trim().to_string(),
            api_key,
        })
    }

    async fn fetch_json(&self, from_address: &str, to_address: &str) -> Result<Value> {
        let mut query = vec![
            ("origins", from_address),
            ("destinations", to_address),
            ("units", "imperial"),
        ];
        if let Some(key) = &self.api_key {
            query.push(("key", key.as_str()));
        }
        let url = &self.provider_url;
        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .await
            .with_context(|| format!("failed GET request: {url}"))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed reading response body: {url}"))?;
        if !status.is_success() {
            let preview: String = body.chars().take(180).collect();
            return Err(anyhow!("GET {url} returned {status}: {preview}"));
        }
        serde_json::from_str(&body).with_context(|| format!("invalid JSON response: {url}"))
    }
}

#[async_trait]
impl DistanceLookup for HttpDistanceLookup {
    async fn distance_miles(&self, from_address: &str, to_address: &str) -> Result<f64> {
        if self.provider_url.is_empty() {
            return Err(anyhow!("distance provider URL is not configured"));
        }
        let payload = self.fetch_json(from_address, to_address).await?;
        parse_distance_miles(&payload)
            .ok_or_else(|| anyhow!("distance missing from provider response"))
    }
}

/// Pulls a one-way distance in miles out of a provider response.
///
/// Understands the distance-matrix shape
/// (`rows[0].elements[0].distance.value`, meters) and flat bodies carrying
/// `miles` or `distance_miles`.
pub fn parse_distance_miles(payload: &Value) -> Option<f64> {
    let object = payload.as_object()?;
    if let Some(status) = object.get("status").and_then(Value::as_str) {
        if !status.eq_ignore_ascii_case("ok") {
            return None;
        }
    }
    for key in ["miles", "distance_miles", "distanceMiles"] {
        if let Some(miles) = object.get(key).and_then(to_f64) {
            return Some(miles);
        }
    }
    let element = object
        .get("rows")?
        .as_array()?
        .first()?
        .get("elements")?
        .as_array()?
        .first()?
        .as_object()?;
    if let Some(status) = element.get("status").and_then(Value::as_str) {
        if !status.eq_ignore_ascii_case("ok") {
            return None;
        }
    }
    let meters = distance_value(element)?;
    Some(meters / METERS_PER_MILE)
}

fn distance_value(element: &Map<String, Value>) -> Option<f64> {
    element.get("distance")?.get("value").and_then(to_f64)
}

fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::parse_distance_miles;

    #[test]
    fn parses_distance_matrix_shape() {
        let payload = json!({
            "status": "OK",
            "rows": [
                { "elements": [ { "status": "OK", "distance": { "text": "20.0 mi", "value": 32186.88 } } ] }
            ]
        });
        let miles = parse_distance_miles(&payload).expect("distance");
        assert!((miles - 20.0).abs() < 1e-6);
    }

    #[test]
    fn parses_flat_shapes() {
        assert_eq!(parse_distance_miles(&json!({ "miles": 12.5 })), Some(12.5));
        assert_eq!(
            parse_distance_miles(&json!({ "distance_miles": "1,204" })),
            Some(1204.0)
        );
    }

    #[test]
    fn rejects_failed_status() {
        let payload = json!({
            "status": "OK",
            "rows": [ { "elements": [ { "status": "NOT_FOUND" } ] } ]
        });
        assert!(parse_distance_miles(&payload).is_none());
        assert!(parse_distance_miles(&json!({ "status": "REQUEST_DENIED" })).is_none());
        assert!(parse_distance_miles(&json!([1, 2, 3])).is_none());
    }
}
