//! Tests for the end-to-end pipeline with in-process collaborators


use crate::app::models::{ApiKey, BoundingBox, GeoPoint};
use crate::app::services::bounds_resolver::BoundsResolver;
use crate::app::services::charging_data::ChargingDataProvider;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const SAMPLE_PAYLOAD: &str = r#"[
    {"ID":1,"AddressInfo":{"Latitude":42.0,"Longitude":-71.0},"Connections":[{"Quantity":2},{"Quantity":3}]},
    {"ID":2,"AddressInfo":{"Latitude":42.1,"Longitude":-71.1},"Connections":[{}]}
]"#;

pub fn sample_bbox() -> BoundingBox {
    BoundingBox::from_corners(GeoPoint::new(42.35, -71.12), GeoPoint::new(42.37, -71.08))
}

/// Resolver double that counts calls and returns a fixed box (or fails)
#[derive(Clone)]
pub struct StubResolver {
    pub calls: Arc<AtomicUsize>,
    bbox: Option<BoundingBox>,
}

impl StubResolver {
    pub fn returning(bbox: BoundingBox) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            bbox: Some(bbox),
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            bbox: None,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BoundsResolver for StubResolver {
    async fn resolve(&self, address: &str, _radius_m: f64) -> Result<BoundingBox> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bbox
            .ok_or_else(|| Error::resolution(format!("No results found for address '{}'", address)))
    }
}

/// Provider double that records the box and key it was called with
#[derive(Clone)]
pub struct StubProvider {
    pub calls: Arc<AtomicUsize>,
    pub seen: Arc<Mutex<Vec<(BoundingBox, String)>>>,
    response: std::result::Result<Vec<u8>, String>,
}

impl StubProvider {
    pub fn returning(payload: &str) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
            response: Ok(payload.as_bytes().to_vec()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
            response: Err(message.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChargingDataProvider for StubProvider {
    async fn fetch(&self, bbox: &BoundingBox, api_key: &ApiKey) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push((*bbox, api_key.expose().to_string()));
        }

        self.response.clone().map_err(Error::execution)
    }
}
