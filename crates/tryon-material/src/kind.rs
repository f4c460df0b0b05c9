//! Material category tags.
//!
//! The garment authoring stage tags every garment with one of these; the tag
//! selects both simulation behaviour (via [`crate::MaterialTable`]) and, in
//! richer shading models, surface appearance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fabric category of a garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    #[default]
    Cotton,
    Silk,
    Denim,
    Leather,
    Velvet,
    Wool,
    Polyester,
    Custom,
}

impl MaterialKind {
    /// All categories, in declaration order.
    pub const ALL: [MaterialKind; 8] = [
        MaterialKind::Cotton,
        MaterialKind::Silk,
        MaterialKind::Denim,
        MaterialKind::Leather,
        MaterialKind::Velvet,
        MaterialKind::Wool,
        MaterialKind::Polyester,
        MaterialKind::Custom,
    ];

    /// Lower-case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            MaterialKind::Cotton => "cotton",
            MaterialKind::Silk => "silk",
            MaterialKind::Denim => "denim",
            MaterialKind::Leather => "leather",
            MaterialKind::Velvet => "velvet",
            MaterialKind::Wool => "wool",
            MaterialKind::Polyester => "polyester",
            MaterialKind::Custom => "custom",
        }
    }

    /// Parses a serialized name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
