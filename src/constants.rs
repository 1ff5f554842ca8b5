//! Application constants for chargers_near
//!
//! This module contains the default values, environment variable names and
//! external service settings used throughout the charger summarizer.

// =============================================================================
// Search Defaults
// =============================================================================

/// Address searched when none is given on the command line
pub const DEFAULT_ADDRESS: &str = "362 Memorial Dr, Cambridge, MA";

/// Default search radius around the address, in meters
pub const DEFAULT_RADIUS_METERS: f64 = 1500.0;

/// Mean Earth radius in meters used for point-to-box conversion
pub const EARTH_RADIUS_METERS: f64 = 6_371_009.0;

/// Decimal places used when formatting a bounding box for the fetcher
pub const BBOX_DECIMAL_PLACES: usize = 6;

// =============================================================================
// Environment Variables
// =============================================================================

/// OpenChargeMap API key
pub const API_KEY_ENV_VAR: &str = "OCM_KEY";

/// Optional OpenChargeMap server override forwarded to the fetcher
pub const SERVER_ENV_VAR: &str = "OCM_SERVER";

// =============================================================================
// External Charging-Data Tool
// =============================================================================

/// Executable invoked to fetch charging station records
pub const DEFAULT_FETCHER_PROGRAM: &str = "chargemeup";

/// Command-line flags understood by the fetcher
pub mod fetcher_flags {
    pub const API_KEY: &str = "-k";
    pub const BOUNDING_BOX: &str = "-b";
    pub const SERVER: &str = "-s";
}

/// Maximum number of stderr bytes carried into an execution error message
pub const MAX_STDERR_IN_ERROR: usize = 2048;

// =============================================================================
// Geocoding Services
// =============================================================================

/// Nominatim search endpoint base
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Overpass API interpreter endpoint
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// User agent sent to the OpenStreetMap services (required by their usage policy)
pub const USER_AGENT: &str = concat!("chargers_near/", env!("CARGO_PKG_VERSION"));

/// Timeout for geocoding HTTP requests
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Server-side timeout passed to Overpass queries
pub const OVERPASS_QUERY_TIMEOUT_SECS: u64 = 180;

/// Way filter selecting the drivable street network
///
/// Public roads usable by motor vehicles, excluding service roads, paths,
/// areas, private access and anything tagged as closed to cars.
pub const DRIVE_NETWORK_FILTER: &str = concat!(
    r#"["highway"]["area"!~"yes"]["access"!~"private"]"#,
    r#"["highway"!~"abandoned|bridleway|bus_guideway|construction|corridor|cycleway|elevator|"#,
    r#"escalator|footway|no|path|pedestrian|planned|platform|proposed|raceway|razed|service|"#,
    r#"steps|track"]"#,
    r#"["motor_vehicle"!~"no"]["motorcar"!~"no"]"#,
    r#"["service"!~"alley|driveway|emergency_access|parking|parking_aisle|private"]"#,
);

// =============================================================================
// Logging
// =============================================================================

/// Target used for the default tracing filter
pub const LOG_TARGET: &str = "chargers_near";

// =============================================================================
// Helper Functions
// =============================================================================

/// Build the Overpass QL query returning the nodes of drivable ways in a box
///
/// Box edges follow the Overpass `(south,west,north,east)` convention.
pub fn drive_network_query(south: f64, west: f64, north: f64, east: f64) -> String {
    format!(
        "[out:json][timeout:{timeout}];way{filter}({south},{west},{north},{east});node(w);out skel qt;",
        timeout = OVERPASS_QUERY_TIMEOUT_SECS,
        filter = DRIVE_NETWORK_FILTER,
    )
}
