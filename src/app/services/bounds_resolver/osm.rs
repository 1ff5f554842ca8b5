//! OpenStreetMap-backed bounds resolution
//!
//! Geocodes the address with Nominatim, then asks Overpass for the nodes of
//! the drivable street network inside a square around that point. The result
//! is the extent of those nodes, so it hugs the actual road network rather
//! than the nominal search square.

use super::BoundsResolver;
use crate::app::models::{BoundingBox, GeoPoint};
use crate::config::GeocoderConfig;
use crate::constants::{USER_AGENT, drive_network_query};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Resolver using the public Nominatim and Overpass APIs
#[derive(Debug, Clone)]
pub struct OsmBoundsResolver {
    client: Client,
    nominatim_url: String,
    overpass_url: String,
}

impl OsmBoundsResolver {
    /// Create a resolver with its own HTTP client
    ///
    /// # Errors
    /// * Returns `Error::Resolution` if the HTTP client cannot be built
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| Error::resolution_http("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            nominatim_url: config.nominatim_url.trim_end_matches('/').to_string(),
            overpass_url: config.overpass_url.clone(),
        })
    }

    /// Look up the coordinates of an address (first Nominatim match)
    pub async fn geocode(&self, address: &str) -> Result<GeoPoint> {
        let url = format!("{}/search", self.nominatim_url);
        debug!("Geocoding '{}' via {}", address, url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                Error::resolution_http(format!("error finding address '{}'", address), e)
            })?;

        let body = response.bytes().await.map_err(|e| {
            Error::resolution_http(
                format!("Failed to read geocoding response for '{}'", address),
                e,
            )
        })?;

        parse_nominatim_response(&body, address)
    }

    /// Fetch coordinates of all nodes on drivable ways inside `query_box`
    pub async fn drive_network_nodes(&self, query_box: &BoundingBox) -> Result<Vec<GeoPoint>> {
        let query = drive_network_query(
            query_box.lat_min,
            query_box.lon_min,
            query_box.lat_max,
            query_box.lon_max,
        );
        debug!("Overpass query: {}", query);

        let response = self
            .client
            .post(&self.overpass_url)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::resolution_http("Street network query failed", e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::resolution_http("Failed to read street network response", e))?;

        parse_overpass_nodes(&body)
    }
}

#[async_trait]
impl BoundsResolver for OsmBoundsResolver {
    async fn resolve(&self, address: &str, radius_m: f64) -> Result<BoundingBox> {
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(Error::configuration(format!(
                "Search radius must be a positive number of meters, got {}",
                radius_m
            )));
        }

        let center = self.geocode(address).await?;
        info!(
            "Resolved '{}' to ({}, {})",
            address, center.latitude, center.longitude
        );

        let query_box = BoundingBox::around(center, radius_m);
        let nodes = self.drive_network_nodes(&query_box).await?;
        debug!("Street network query returned {} nodes", nodes.len());

        let bbox = network_bounds(&nodes, &query_box).ok_or_else(|| {
            Error::resolution(format!(
                "No drivable street network found within {}m of '{}'",
                radius_m, address
            ))
        })?;

        info!("Street network bounds: {}", bbox);
        Ok(bbox)
    }
}

// =============================================================================
// Response decoding
// =============================================================================

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
    #[serde(default)]
    remark: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// Decode a Nominatim `jsonv2` search response into the first match's coordinates
pub fn parse_nominatim_response(body: &[u8], address: &str) -> Result<GeoPoint> {
    let places: Vec<NominatimPlace> = serde_json::from_slice(body).map_err(|e| {
        Error::resolution(format!(
            "Unreadable geocoding response for '{}': {}",
            address, e
        ))
    })?;

    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| Error::resolution(format!("no location found for address '{}'", address)))?;

    let latitude: f64 = place.lat.trim().parse().map_err(|_| {
        Error::resolution(format!("Invalid latitude '{}' for '{}'", place.lat, address))
    })?;
    let longitude: f64 = place.lon.trim().parse().map_err(|_| {
        Error::resolution(format!(
            "Invalid longitude '{}' for '{}'",
            place.lon, address
        ))
    })?;

    if let Some(name) = &place.display_name {
        debug!("Nominatim match: {}", name);
    }

    Ok(GeoPoint::new(latitude, longitude))
}

/// Decode node coordinates from an Overpass JSON response
///
/// Non-node elements and nodes without coordinates are skipped.
pub fn parse_overpass_nodes(body: &[u8]) -> Result<Vec<GeoPoint>> {
    let response: OverpassResponse = serde_json::from_slice(body)
        .map_err(|e| Error::resolution(format!("Unreadable street network response: {}", e)))?;

    if let Some(remark) = &response.remark {
        if response.elements.is_empty() {
            return Err(Error::resolution(format!(
                "Street network query failed: {}",
                remark
            )));
        }
        warn!("Overpass remark: {}", remark);
    }

    Ok(response
        .elements
        .into_iter()
        .filter(|el| el.kind == "node")
        .filter_map(|el| Some(GeoPoint::new(el.lat?, el.lon?)))
        .collect())
}

/// Extent of the nodes lying inside `query_box`
///
/// Ways are returned whole by Overpass, so their nodes can spill over the
/// query edges; those are dropped before measuring.
pub fn network_bounds(nodes: &[GeoPoint], query_box: &BoundingBox) -> Option<BoundingBox> {
    BoundingBox::from_points(nodes.iter().copied().filter(|p| query_box.contains(p)))
}
