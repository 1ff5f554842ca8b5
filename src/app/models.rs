//! Data models for charger summarization
//!
//! This module contains the geographic types used to describe the search area,
//! the station records returned by OpenChargeMap (via `chargemeup`), and the
//! aggregate report produced from them.

use crate::constants::{BBOX_DECIMAL_PLACES, EARTH_RADIUS_METERS};
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Geographic Types
// =============================================================================

/// A WGS84 coordinate pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Rectangular search area defined by min/max latitude and longitude
///
/// Always satisfies `lat_min <= lat_max` and `lon_min <= lon_max`; every
/// constructor either normalizes its input or refuses to build a box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lon_min: f64,
    pub lat_max: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Build a box from two opposite corners given in any order
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            lat_min: a.latitude.min(b.latitude),
            lon_min: a.longitude.min(b.longitude),
            lat_max: a.latitude.max(b.latitude),
            lon_max: a.longitude.max(b.longitude),
        }
    }

    /// Compute the spatial extent of a set of points
    ///
    /// Returns `None` when the iterator yields no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let seed = Self::from_corners(first, first);

        Some(iter.fold(seed, |bbox, point| bbox.extended_to(point)))
    }

    /// Square box extending `radius_m` meters north, south, east and west of `center`
    pub fn around(center: GeoPoint, radius_m: f64) -> Self {
        let delta_lat = (radius_m / EARTH_RADIUS_METERS).to_degrees();
        let delta_lon = delta_lat / center.latitude.to_radians().cos();

        Self::from_corners(
            GeoPoint::new(center.latitude - delta_lat, center.longitude - delta_lon),
            GeoPoint::new(center.latitude + delta_lat, center.longitude + delta_lon),
        )
    }

    fn extended_to(self, point: GeoPoint) -> Self {
        Self {
            lat_min: self.lat_min.min(point.latitude),
            lon_min: self.lon_min.min(point.longitude),
            lat_max: self.lat_max.max(point.latitude),
            lon_max: self.lon_max.max(point.longitude),
        }
    }

    /// Check whether a point lies inside the box (edges inclusive)
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.latitude >= self.lat_min
            && point.latitude <= self.lat_max
            && point.longitude >= self.lon_min
            && point.longitude <= self.lon_max
    }

    /// South-west corner
    pub fn min_corner(&self) -> GeoPoint {
        GeoPoint::new(self.lat_min, self.lon_min)
    }

    /// North-east corner
    pub fn max_corner(&self) -> GeoPoint {
        GeoPoint::new(self.lat_max, self.lon_max)
    }

    /// Format as `(lat_min,lon_min),(lat_max,lon_max)` for the fetcher's `-b` flag
    pub fn to_query_string(&self) -> String {
        let p = BBOX_DECIMAL_PLACES;
        format!(
            "({:.p$},{:.p$}),({:.p$},{:.p$})",
            self.lat_min, self.lon_min, self.lat_max, self.lon_max
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl FromStr for BoundingBox {
    type Err = Error;

    /// Parse `(lat1,lon1),(lat2,lon2)`; whitespace is ignored and corners may come in any order
    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let format_error = || {
            Error::configuration(format!(
                "Bounding box must be in format (lat1,lon1),(lat2,lon2), got '{}'",
                s
            ))
        };

        let inner = compact
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(format_error)?;
        let (first, second) = inner.split_once("),(").ok_or_else(format_error)?;

        let a = parse_pair(first).ok_or_else(format_error)?;
        let b = parse_pair(second).ok_or_else(format_error)?;

        for point in [a, b] {
            if !(-90.0..=90.0).contains(&point.latitude) {
                return Err(Error::configuration(format!(
                    "Invalid latitude {}: must be between -90 and 90 degrees",
                    point.latitude
                )));
            }
            if !(-180.0..=180.0).contains(&point.longitude) {
                return Err(Error::configuration(format!(
                    "Invalid longitude {}: must be between -180 and 180 degrees",
                    point.longitude
                )));
            }
        }

        Ok(Self::from_corners(a, b))
    }
}

fn parse_pair(pair: &str) -> Option<GeoPoint> {
    let (lat, lon) = pair.split_once(',')?;
    let latitude: f64 = lat.parse().ok()?;
    let longitude: f64 = lon.parse().ok()?;
    (latitude.is_finite() && longitude.is_finite()).then(|| GeoPoint::new(latitude, longitude))
}

// =============================================================================
// Credentials
// =============================================================================

/// OpenChargeMap API key, guaranteed non-empty
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate a key value; blank keys are rejected
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(Error::configuration(format!(
                "Please set the {} environment variable (or pass --key) to your OpenChargeMap API key",
                crate::constants::API_KEY_ENV_VAR
            )));
        }
        Ok(Self(value))
    }

    /// Treat an absent key exactly like an empty one
    pub fn from_optional(value: Option<&str>) -> Result<Self> {
        Self::new(value.unwrap_or_default())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

// =============================================================================
// Station Records
// =============================================================================

/// One charging station (OpenChargeMap POI) as emitted by `chargemeup`
///
/// Only the fields needed for the summary are decoded; everything else in the
/// record is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChargingStation {
    #[serde(rename = "ID")]
    pub id: i64,

    #[serde(rename = "AddressInfo")]
    pub address_info: AddressInfo,

    /// Missing and `null` both decode as an empty list
    #[serde(
        rename = "Connections",
        default,
        deserialize_with = "null_as_empty_connections"
    )]
    pub connections: Vec<Connection>,
}

/// Location block of a station record
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AddressInfo {
    #[serde(rename = "Latitude")]
    pub latitude: f64,

    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

/// A connection (connector type) offered by a station
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Connection {
    /// Number of connectors of this type; absent means none known
    #[serde(rename = "Quantity", default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

fn null_as_empty_connections<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<Connection>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Connection>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChargingStation {
    /// Station coordinates
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.address_info.latitude, self.address_info.longitude)
    }

    /// Total connectors across all connections; missing quantities count as zero
    pub fn connector_count(&self) -> i64 {
        self.connections
            .iter()
            .map(|conn| conn.quantity.unwrap_or(0))
            .sum()
    }
}

// =============================================================================
// Report Types
// =============================================================================

/// Per-station line of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSummary {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub num_chargers: i64,
}

impl From<&ChargingStation> for StationSummary {
    fn from(station: &ChargingStation) -> Self {
        Self {
            id: station.id,
            latitude: station.address_info.latitude,
            longitude: station.address_info.longitude,
            num_chargers: station.connector_count(),
        }
    }
}

/// Running totals across all stations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChargerTotals {
    /// Stations exposing at least one connector
    pub total_chargers: usize,
    /// Connector quantity summed over those stations
    pub total_connections: i64,
}

impl ChargerTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one station; stations without connectors leave the totals untouched
    pub fn record(&mut self, num_chargers: i64) {
        if num_chargers > 0 {
            self.total_chargers += 1;
            self.total_connections += num_chargers;
        }
    }
}

/// Complete result of one run, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChargerReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    pub stations: Vec<StationSummary>,
    pub totals: ChargerTotals,
}

impl ChargerReport {
    pub fn with_bounding_box(mut self, bbox: BoundingBox) -> Self {
        self.bounding_box = Some(bbox);
        self
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }
}

/// Format a coordinate in shortest round-trip form, keeping a fractional part
///
/// `42.0` stays `42.0` rather than `42`, and no exponent notation is used.
pub fn format_coordinate(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_from_points() {
        let points = vec![
            GeoPoint::new(42.36, -71.10),
            GeoPoint::new(42.35, -71.12),
            GeoPoint::new(42.37, -71.09),
        ];

        let bbox = BoundingBox::from_points(points).unwrap();
        assert_eq!(bbox.lat_min, 42.35);
        assert_eq!(bbox.lat_max, 42.37);
        assert_eq!(bbox.lon_min, -71.12);
        assert_eq!(bbox.lon_max, -71.09);
        assert!(bbox.lat_min <= bbox.lat_max);
        assert!(bbox.lon_min <= bbox.lon_max);
    }

    #[test]
    fn test_bounding_box_from_single_point() {
        let point = GeoPoint::new(10.0, 20.0);
        let bbox = BoundingBox::from_points([point]).unwrap();

        assert_eq!(bbox.min_corner(), point);
        assert_eq!(bbox.max_corner(), point);
    }

    #[test]
    fn test_bounding_box_from_no_points() {
        assert!(BoundingBox::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_bounding_box_corners_normalized() {
        let bbox =
            BoundingBox::from_corners(GeoPoint::new(42.4, -71.0), GeoPoint::new(42.3, -71.2));

        assert_eq!(bbox.lat_min, 42.3);
        assert_eq!(bbox.lat_max, 42.4);
        assert_eq!(bbox.lon_min, -71.2);
        assert_eq!(bbox.lon_max, -71.0);
    }

    #[test]
    fn test_bounding_box_around_point() {
        let center = GeoPoint::new(42.36, -71.1);
        let bbox = BoundingBox::around(center, 1500.0);

        assert!(bbox.contains(&center));
        // 1500 m is roughly 0.0135 degrees of latitude
        assert!((bbox.lat_max - center.latitude - 0.01349).abs() < 1e-4);
        assert!((center.latitude - bbox.lat_min - 0.01349).abs() < 1e-4);
        // Longitude span widens away from the equator
        assert!(bbox.lon_max - bbox.lon_min > bbox.lat_max - bbox.lat_min);
    }

    #[test]
    fn test_bounding_box_contains_edges() {
        let bbox = BoundingBox::from_corners(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0));

        assert!(bbox.contains(&GeoPoint::new(0.0, 0.0)));
        assert!(bbox.contains(&GeoPoint::new(1.0, 0.5)));
        assert!(!bbox.contains(&GeoPoint::new(1.0001, 0.5)));
        assert!(!bbox.contains(&GeoPoint::new(0.5, -0.1)));
    }

    #[test]
    fn test_bounding_box_query_string() {
        let bbox = BoundingBox::from_corners(
            GeoPoint::new(40.63010790372053, -74.2775717248681),
            GeoPoint::new(40.7356464076158, -74.09370618215354),
        );

        assert_eq!(
            bbox.to_query_string(),
            "(40.630108,-74.277572),(40.735646,-74.093706)"
        );
        assert_eq!(bbox.to_string(), bbox.to_query_string());
    }

    #[test]
    fn test_bounding_box_parse() {
        let bbox: BoundingBox = "(40.73, -74.09), (40.63, -74.27)".parse().unwrap();

        assert_eq!(bbox.lat_min, 40.63);
        assert_eq!(bbox.lat_max, 40.73);
        assert_eq!(bbox.lon_min, -74.27);
        assert_eq!(bbox.lon_max, -74.09);
    }

    #[test]
    fn test_bounding_box_parse_errors() {
        assert!("".parse::<BoundingBox>().is_err());
        assert!("40.6,-74.2,40.7,-74.0".parse::<BoundingBox>().is_err());
        assert!("(40.6,-74.2)".parse::<BoundingBox>().is_err());
        assert!("(40.6,abc),(40.7,-74.0)".parse::<BoundingBox>().is_err());
        assert!("(95.0,-74.2),(40.7,-74.0)".parse::<BoundingBox>().is_err());
        assert!("(40.6,-190.0),(40.7,-74.0)".parse::<BoundingBox>().is_err());
        assert!("(NaN,-74.2),(40.7,-74.0)".parse::<BoundingBox>().is_err());
    }

    #[test]
    fn test_api_key_validation() {
        assert!(ApiKey::new("abc-123").is_ok());
        assert!(ApiKey::new("").unwrap_err().is_configuration());
        assert!(ApiKey::new("   ").unwrap_err().is_configuration());
        assert!(ApiKey::from_optional(None).unwrap_err().is_configuration());
        assert_eq!(
            ApiKey::from_optional(Some("key")).unwrap().expose(),
            "key"
        );
    }

    #[test]
    fn test_api_key_debug_redacted() {
        let key = ApiKey::new("super-secret").unwrap();
        let debug = format!("{:?}", key);

        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_station_connector_count() {
        let station: ChargingStation = serde_json::from_str(
            r#"{"ID":7,"AddressInfo":{"Latitude":1.0,"Longitude":2.0},
                "Connections":[{"Quantity":2},{},{"Quantity":null},{"Quantity":4}]}"#,
        )
        .unwrap();

        assert_eq!(station.connector_count(), 6);
        assert_eq!(station.location(), GeoPoint::new(1.0, 2.0));
    }

    #[test]
    fn test_station_null_or_missing_connections() {
        let with_null: ChargingStation = serde_json::from_str(
            r#"{"ID":1,"AddressInfo":{"Latitude":1.0,"Longitude":2.0},"Connections":null}"#,
        )
        .unwrap();
        let without: ChargingStation =
            serde_json::from_str(r#"{"ID":2,"AddressInfo":{"Latitude":1.0,"Longitude":2.0}}"#)
                .unwrap();

        assert!(with_null.connections.is_empty());
        assert!(without.connections.is_empty());
        assert_eq!(without.connector_count(), 0);
    }

    #[test]
    fn test_charger_totals_record() {
        let mut totals = ChargerTotals::new();
        totals.record(5);
        totals.record(0);
        totals.record(2);

        assert_eq!(totals.total_chargers, 2);
        assert_eq!(totals.total_connections, 7);
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(42.0), "42.0");
        assert_eq!(format_coordinate(-71.0), "-71.0");
        assert_eq!(format_coordinate(42.1), "42.1");
        assert_eq!(format_coordinate(42.3601), "42.3601");
        assert_eq!(format_coordinate(0.000001), "0.000001");
    }
}
