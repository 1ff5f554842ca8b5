//! Tests for charging data providers
//!
//! Child processes are stand-in shell scripts written to a temporary
//! directory, so no real `chargemeup` installation is needed.


use crate::app::models::{ApiKey, BoundingBox, GeoPoint};
use std::path::{Path, PathBuf};

/// Box used by all provider tests
pub fn test_bbox() -> BoundingBox {
    BoundingBox::from_corners(
        GeoPoint::new(42.345678901, -71.123456789),
        GeoPoint::new(42.371234567, -71.087654321),
    )
}

pub fn test_key() -> ApiKey {
    ApiKey::new("test-key-123").unwrap()
}

/// Write an executable `/bin/sh` script into `dir`
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();

    let mut permissions = std::fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).unwrap();

    path
}
