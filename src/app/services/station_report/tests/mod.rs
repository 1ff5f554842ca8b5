//! Tests for station parsing, aggregation and reporting


use crate::app::models::{AddressInfo, ChargingStation, Connection};

/// Two-station payload: one with 2+3 connectors, one with a quantity-less connection
pub const SAMPLE_PAYLOAD: &str = r#"[
    {"ID":1,"AddressInfo":{"Latitude":42.0,"Longitude":-71.0},"Connections":[{"Quantity":2},{"Quantity":3}]},
    {"ID":2,"AddressInfo":{"Latitude":42.1,"Longitude":-71.1},"Connections":[{}]}
]"#;

/// Create a test station with the given connection quantities
pub fn create_test_station(id: i64, quantities: &[Option<i64>]) -> ChargingStation {
    ChargingStation {
        id,
        address_info: AddressInfo {
            latitude: 42.3601,
            longitude: -71.0942,
        },
        connections: quantities
            .iter()
            .map(|&quantity| Connection { quantity })
            .collect(),
    }
}
