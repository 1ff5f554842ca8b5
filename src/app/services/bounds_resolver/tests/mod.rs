//! Tests for bounds resolution
//!
//! Network calls are not exercised here; response decoding and box
//! computation are tested with canned Nominatim and Overpass payloads.


use crate::app::models::GeoPoint;

/// Nominatim `jsonv2` response for a single match
pub fn nominatim_body(lat: &str, lon: &str) -> Vec<u8> {
    format!(
        r#"[{{"place_id":1,"lat":"{}","lon":"{}","display_name":"362, Memorial Drive, Cambridge"}}]"#,
        lat, lon
    )
    .into_bytes()
}

/// Overpass `out skel` response containing the given nodes
pub fn overpass_body(nodes: &[GeoPoint]) -> Vec<u8> {
    let elements: Vec<String> = nodes
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                r#"{{"type":"node","id":{},"lat":{},"lon":{}}}"#,
                i + 1,
                p.latitude,
                p.longitude
            )
        })
        .collect();

    format!(
        r#"{{"version":0.6,"generator":"Overpass API","elements":[{}]}}"#,
        elements.join(",")
    )
    .into_bytes()
}
