//! Impact color profiles
//!
//! A profile maps (impact type, surface tag) to the color response painted
//! into a crater: the target color and how it blends with what was there.
//! Profiles are plain serde data so projects can keep them in JSON next to
//! their other tuning files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::Result;
use crate::voxel::color::Rgba;

/// Tag used when neither the collider nor the mesh carries one
pub const DEFAULT_SURFACE_TAG: &str = "default";

/// Category of impact driving a paint request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactType {
    Bullet,
    Explosion,
    Fire,
    Melee,
}

/// How the target color combines with the voxel's original color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendMode {
    /// Paint the target color, attenuated only by intensity
    #[default]
    Replace,
    /// Fade from the target color at the impact point back to the original
    /// color at the edge of the radius, shaped by falloff
    BlendToOriginal,
}

/// One profile row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImpactEntry {
    pub impact: ImpactType,
    pub surface: String,
    pub color: Rgba,
    pub blend: BlendMode,
}

/// Table of color responses, looked up by impact type and surface tag
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorProfile {
    pub entries: Vec<ImpactEntry>,
}

impl ColorProfile {
    /// Profile with no entries; every resolve misses
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry
    pub fn with_entry(
        mut self,
        impact: ImpactType,
        surface: impl Into<String>,
        color: Rgba,
        blend: BlendMode,
    ) -> Self {
        self.entries.push(ImpactEntry {
            impact,
            surface: surface.into(),
            color,
            blend,
        });
        self
    }

    /// Find the response for an impact on a surface
    ///
    /// First matching entry wins. A miss means the impact paints nothing.
    pub fn resolve(&self, impact: ImpactType, surface: &str) -> Option<&ImpactEntry> {
        self.entries
            .iter()
            .find(|e| e.impact == impact && e.surface == surface)
    }

    /// Save as pretty JSON (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON (sync)
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl Default for ColorProfile {
    fn default() -> Self {
        Self {
            entries: vec![
                // Bullets: dark scorch fading out toward the crater rim
                ImpactEntry {
                    impact: ImpactType::Bullet,
                    surface: DEFAULT_SURFACE_TAG.into(),
                    color: Rgba::rgb(0.13, 0.11, 0.10),
                    blend: BlendMode::BlendToOriginal,
                },
                // Bullets on wood expose pale splintered fibers
                ImpactEntry {
                    impact: ImpactType::Bullet,
                    surface: "wood".into(),
                    color: Rgba::rgb(0.76, 0.62, 0.42),
                    blend: BlendMode::BlendToOriginal,
                },
                // Bullets on stone chip to a lighter gray
                ImpactEntry {
                    impact: ImpactType::Bullet,
                    surface: "stone".into(),
                    color: Rgba::rgb(0.62, 0.60, 0.58),
                    blend: BlendMode::BlendToOriginal,
                },
                // Explosions char everything near black
                ImpactEntry {
                    impact: ImpactType::Explosion,
                    surface: DEFAULT_SURFACE_TAG.into(),
                    color: Rgba::rgb(0.06, 0.05, 0.05),
                    blend: BlendMode::BlendToOriginal,
                },
                ImpactEntry {
                    impact: ImpactType::Explosion,
                    surface: "wood".into(),
                    color: Rgba::rgb(0.09, 0.07, 0.05),
                    blend: BlendMode::BlendToOriginal,
                },
                // Fire soot covers the whole patch evenly
                ImpactEntry {
                    impact: ImpactType::Fire,
                    surface: DEFAULT_SURFACE_TAG.into(),
                    color: Rgba::rgb(0.16, 0.14, 0.12),
                    blend: BlendMode::Replace,
                },
                // Melee scrapes brighten rather than burn
                ImpactEntry {
                    impact: ImpactType::Melee,
                    surface: "wood".into(),
                    color: Rgba::rgb(0.82, 0.70, 0.52),
                    blend: BlendMode::Replace,
                },
            ],
        }
    }
}
