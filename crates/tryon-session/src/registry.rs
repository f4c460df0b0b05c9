//! Loaded garment assets, keyed by opaque string ids.

use std::collections::BTreeMap;

use tryon_material::{MaterialKind, Texture};
use tryon_mesh::TriangleMesh;

/// A garment as produced by the authoring stage: mesh, fabric and texture.
///
/// The mesh is optional so incomplete assets can be registered; trying
/// one on fails with [`TryOnError::NoMesh`](tryon_types::TryOnError::NoMesh).
#[derive(Debug, Clone)]
pub struct GarmentAsset {
    pub mesh: Option<TriangleMesh>,
    pub material: MaterialKind,
    pub texture: Texture,
}

impl GarmentAsset {
    pub fn new(mesh: TriangleMesh, material: MaterialKind, texture: Texture) -> Self {
        Self {
            mesh: Some(mesh),
            material,
            texture,
        }
    }
}

/// Id → asset map. Ids are never reused within a registry.
#[derive(Debug, Default)]
pub struct GarmentRegistry {
    assets: BTreeMap<String, GarmentAsset>,
    next_id: u64,
}

impl GarmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an asset and returns its new id.
    pub fn insert(&mut self, asset: GarmentAsset) -> String {
        let id = format!("garment-{}", self.next_id);
        self.next_id += 1;
        self.assets.insert(id.clone(), asset);
        id
    }

    pub fn get(&self, id: &str) -> Option<&GarmentAsset> {
        self.assets.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<GarmentAsset> {
        self.assets.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.assets.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
