//! Integration tests for tryon-types.

use tryon_types::constants;
use tryon_types::{GarmentHandle, TryOnError};

#[test]
fn handle_index() {
    let h = GarmentHandle(7);
    assert_eq!(h.index(), 7);
    assert_eq!(GarmentHandle::from(7u32), h);
}

#[test]
fn handle_display() {
    assert_eq!(GarmentHandle(3).to_string(), "garment#3");
}

#[test]
fn handle_serialization() {
    let json = serde_json::to_string(&GarmentHandle(42)).unwrap();
    let recovered: GarmentHandle = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, GarmentHandle(42));
}

#[test]
fn error_messages() {
    assert_eq!(TryOnError::NoMesh.to_string(), "Garment has no mesh");
    let err = TryOnError::DimensionMismatch {
        width: 2,
        height: 2,
        expected: 16,
        actual: 12,
    };
    assert!(err.to_string().contains("expected 16"));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: TryOnError = io.into();
    assert!(matches!(err, TryOnError::Io(_)));
}

#[test]
fn default_timestep_is_sixtieth() {
    let dt = 1.0 / constants::DEFAULT_TARGET_FPS as f32;
    assert!((dt - 1.0 / 60.0).abs() < 1e-9);
}
