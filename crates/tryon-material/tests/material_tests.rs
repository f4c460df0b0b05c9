//! Integration tests for tryon-material.

use glam::Vec2;
use tryon_material::{MaterialKind, MaterialProperties, MaterialTable, Texture};
use tryon_types::TryOnError;

// ─── MaterialKind Tests ───────────────────────────────────────

#[test]
fn kind_names_round_trip() {
    for kind in MaterialKind::ALL {
        assert_eq!(MaterialKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(MaterialKind::from_name("chainmail"), None);
}

#[test]
fn kind_serializes_snake_case() {
    let json = serde_json::to_string(&MaterialKind::Polyester).unwrap();
    assert_eq!(json, "\"polyester\"");
    let back: MaterialKind = serde_json::from_str("\"leather\"").unwrap();
    assert_eq!(back, MaterialKind::Leather);
}

// ─── MaterialTable Tests ──────────────────────────────────────

#[test]
fn default_table_is_valid() {
    assert!(MaterialTable::default().validate().is_ok());
}

#[test]
fn structural_fabrics_stiffer_than_silk() {
    let table = MaterialTable::default();
    let silk = table.get(MaterialKind::Silk).stiffness;
    assert!(table.get(MaterialKind::Cotton).stiffness > silk);
    assert!(table.get(MaterialKind::Denim).stiffness > silk);
}

#[test]
fn preset_masses() {
    let table = MaterialTable::default();
    assert_eq!(table.get(MaterialKind::Silk).particle_mass, 0.5);
    assert_eq!(table.get(MaterialKind::Cotton).particle_mass, 1.0);
    assert_eq!(table.get(MaterialKind::Denim).particle_mass, 1.5);
    assert_eq!(table.get(MaterialKind::Leather).particle_mass, 2.0);
    assert!((table.get(MaterialKind::Leather).inverse_mass() - 0.5).abs() < 1e-6);
}

#[test]
fn set_replaces_single_entry() {
    let mut table = MaterialTable::default();
    table.set(MaterialKind::Wool, MaterialProperties::new(0.3, 4.0));
    assert_eq!(table.get(MaterialKind::Wool).stiffness, 0.3);
    assert_eq!(table.get(MaterialKind::Cotton), MaterialTable::default().get(MaterialKind::Cotton));
}

#[test]
fn validate_rejects_out_of_range_stiffness() {
    let mut table = MaterialTable::default();
    table.silk.stiffness = 1.5;
    assert!(matches!(table.validate(), Err(TryOnError::InvalidConfig(_))));
}

#[test]
fn validate_rejects_non_positive_mass() {
    let mut table = MaterialTable::default();
    table.denim.particle_mass = 0.0;
    assert!(table.validate().is_err());
    table.denim.particle_mass = f32::NAN;
    assert!(table.validate().is_err());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let src = r#"
        [silk]
        stiffness = 0.4
        particle_mass = 0.25
    "#;
    let table: MaterialTable = toml::from_str(src).unwrap();
    assert_eq!(table.silk, MaterialProperties::new(0.4, 0.25));
    assert_eq!(table.denim, MaterialTable::default().denim);
}

// ─── Texture Tests ────────────────────────────────────────────

fn checker_2x2() -> Texture {
    #[rustfmt::skip]
    let pixels = vec![
        255, 0, 0, 255,    0, 255, 0, 255,
        0, 0, 255, 255,    255, 255, 255, 0,
    ];
    Texture::from_rgba(2, 2, pixels).unwrap()
}

#[test]
fn from_rgba_rejects_wrong_length() {
    let err = Texture::from_rgba(2, 2, vec![0; 15]).unwrap_err();
    match err {
        TryOnError::DimensionMismatch { expected, actual, .. } => {
            assert_eq!(expected, 16);
            assert_eq!(actual, 15);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sample_corners_nearest() {
    let tex = checker_2x2();
    assert_eq!(tex.sample(Vec2::new(0.0, 0.0)), [255, 0, 0, 255]);
    assert_eq!(tex.sample(Vec2::new(1.0, 0.0)), [0, 255, 0, 255]);
    assert_eq!(tex.sample(Vec2::new(0.0, 1.0)), [0, 0, 255, 255]);
    assert_eq!(tex.sample(Vec2::new(1.0, 1.0)), [255, 255, 255, 0]);
}

#[test]
fn sample_truncates_toward_origin() {
    let tex = checker_2x2();
    // u * (w - 1) = 0.9 truncates to column 0.
    assert_eq!(tex.sample(Vec2::new(0.9, 0.0)), [255, 0, 0, 255]);
}

#[test]
fn sample_clamps_out_of_range_uv() {
    let tex = checker_2x2();
    assert_eq!(tex.sample(Vec2::new(-3.0, -1.0)), tex.sample(Vec2::ZERO));
    assert_eq!(tex.sample(Vec2::new(7.0, 2.0)), tex.sample(Vec2::ONE));
}

#[test]
fn solid_texture_samples_everywhere() {
    let tex = Texture::solid([10, 20, 30, 40]);
    assert_eq!(tex.width(), 1);
    assert_eq!(tex.sample(Vec2::new(0.3, 0.7)), [10, 20, 30, 40]);
}

#[test]
fn empty_texture_samples_transparent() {
    let tex = Texture::from_rgba(0, 0, Vec::new()).unwrap();
    assert_eq!(tex.sample(Vec2::new(0.5, 0.5)), [0, 0, 0, 0]);
}
