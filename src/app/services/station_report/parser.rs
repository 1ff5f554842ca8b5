//! Station payload decoding

use crate::app::models::ChargingStation;
use crate::{Error, Result};
use tracing::debug;

/// Decode a UTF-8 JSON array of station records
///
/// # Errors
/// * Returns `Error::Parse` for invalid UTF-8, malformed JSON, a top-level
///   value that is not an array, or a record missing `ID`, `AddressInfo`,
///   `Latitude` or `Longitude`
pub fn parse_stations(payload: &[u8]) -> Result<Vec<ChargingStation>> {
    let text = std::str::from_utf8(payload).map_err(|e| {
        Error::parse(
            format!("Station payload is not valid UTF-8: {}", e),
            None,
        )
    })?;

    if text.trim().is_empty() {
        return Err(Error::parse(
            "Station payload is empty; expected a JSON array".to_string(),
            None,
        ));
    }

    let stations: Vec<ChargingStation> = serde_json::from_str(text).map_err(|e| {
        Error::parse(
            format!(
                "Invalid station records at line {} column {}",
                e.line(),
                e.column()
            ),
            Some(e),
        )
    })?;

    debug!("Decoded {} station records", stations.len());
    Ok(stations)
}
