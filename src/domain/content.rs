//! Type registry: the read-only table mapping each particle type to its
//! density, matter state, palette and behavior.
//!
//! Built once when a simulation is created and shared by reference. Content
//! bundles (JSON) can retune density and palette per type; state and behavior
//! stay tied to the type id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::color::{Palette, PaletteEntry, Rgb};
use super::particle::{MatterState, ParticleTypeId, Payload, PARTICLE_TYPE_COUNT};
use crate::error::{EngineError, Result};

/// Angle of repose for dry sand.
const SAND_MIN_SLOPE: f32 = 0.6;
/// Wet sand only slides down steep drops.
const WET_SAND_MIN_SLOPE: f32 = 2.0;

const SOIL_WEIGHTS: [u32; 4] = [80, 10, 8, 2];

/// Which rule set a type runs each tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BehaviorKind {
    /// Never acts on its own (empty, stone).
    Inert,
    /// Falls and settles, then soaks up adjacent water.
    Absorbent { min_slope: f32 },
    /// Falls and settles, keeps soaking, and shares moisture with neighbors.
    Damp { min_slope: f32 },
    /// Falls, then flows sideways.
    Liquid,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeProps {
    pub key: String,
    pub density: f32,
    pub state: MatterState,
    pub palette: Palette,
    pub behavior: BehaviorKind,
    pub default_payload: Payload,
}

#[derive(Clone, Debug)]
pub struct TypeRegistry {
    types: Vec<TypeProps>,
    key_to_id: HashMap<String, ParticleTypeId>,
}

impl TypeRegistry {
    pub fn from_defaults() -> Self {
        let sand_palette = Palette::new(
            &[
                Rgb::new(255, 204, 102),
                Rgb::new(204, 153, 0),
                Rgb::new(204, 102, 0),
                Rgb::new(153, 102, 51),
            ],
            &SOIL_WEIGHTS,
        );
        let water_palette = Palette::new(
            &[
                Rgb::new(51, 51, 255),
                Rgb::new(0, 0, 153),
                Rgb::new(0, 51, 204),
                Rgb::new(102, 102, 255),
            ],
            &SOIL_WEIGHTS,
        );

        // Ordered by type id.
        let types = vec![
            TypeProps {
                key: "base:empty".to_string(),
                density: 0.0,
                state: MatterState::None,
                palette: Palette::single(Rgb::new(10, 10, 10)),
                behavior: BehaviorKind::Inert,
                default_payload: Payload::None,
            },
            TypeProps {
                key: "base:sand".to_string(),
                density: 1.6,
                state: MatterState::Solid,
                palette: sand_palette.clone(),
                behavior: BehaviorKind::Absorbent { min_slope: SAND_MIN_SLOPE },
                default_payload: Payload::None,
            },
            TypeProps {
                key: "base:water".to_string(),
                density: 1.0,
                state: MatterState::Liquid,
                palette: water_palette,
                behavior: BehaviorKind::Liquid,
                default_payload: Payload::None,
            },
            TypeProps {
                key: "base:stone".to_string(),
                density: 3.0,
                state: MatterState::Solid,
                palette: Palette::single(Rgb::new(128, 128, 128)),
                behavior: BehaviorKind::Inert,
                default_payload: Payload::None,
            },
            TypeProps {
                key: "base:wet_sand".to_string(),
                density: 1.8,
                state: MatterState::Solid,
                palette: sand_palette,
                behavior: BehaviorKind::Damp { min_slope: WET_SAND_MIN_SLOPE },
                default_payload: Payload::Moisture(0),
            },
        ];
        debug_assert_eq!(types.len(), PARTICLE_TYPE_COUNT);

        let key_to_id = ParticleTypeId::ALL
            .iter()
            .map(|id| (types[id.index()].key.clone(), *id))
            .collect();

        Self { types, key_to_id }
    }

    /// Defaults with the bundle's per-type overrides applied.
    pub fn from_bundle_json(json: &str) -> Result<Self> {
        let bundle: BundleRoot = serde_json::from_str(json)?;
        let mut registry = Self::from_defaults();
        for entry in bundle.types {
            registry.apply_override(entry)?;
        }
        Ok(registry)
    }

    fn apply_override(&mut self, entry: BundleType) -> Result<()> {
        let id = self
            .id_by_key(&entry.key)
            .ok_or_else(|| EngineError::UnknownTypeKey(entry.key.clone()))?;

        if let Some(density) = entry.density {
            if !density.is_finite() || density < 0.0 {
                return Err(EngineError::InvalidDensity { key: entry.key, density });
            }
        }
        let palette = match entry.palette {
            Some(entries) => {
                let palette = Palette::from_entries(&entries);
                if !palette.is_usable() {
                    return Err(EngineError::EmptyPalette(entry.key));
                }
                Some(palette)
            }
            None => None,
        };

        let props = &mut self.types[id.index()];
        if let Some(density) = entry.density {
            props.density = density;
        }
        if let Some(palette) = palette {
            props.palette = palette;
        }
        log::debug!("content override applied to {}", props.key);
        Ok(())
    }

    #[inline]
    pub fn props(&self, id: ParticleTypeId) -> &TypeProps {
        &self.types[id.index()]
    }

    #[inline]
    pub fn behavior(&self, id: ParticleTypeId) -> BehaviorKind {
        self.types[id.index()].behavior
    }

    pub fn key(&self, id: ParticleTypeId) -> &str {
        &self.types[id.index()].key
    }

    pub fn id_by_key(&self, key: &str) -> Option<ParticleTypeId> {
        self.key_to_id.get(key).copied()
    }

    pub fn manifest_json(&self) -> String {
        let types: Vec<ManifestType<'_>> = ParticleTypeId::ALL
            .iter()
            .map(|id| {
                let props = self.props(*id);
                ManifestType {
                    id: *id as u8,
                    key: &props.key,
                    state: props.state,
                    density: props.density,
                    behavior: props.behavior,
                    palette: props.palette.entries(),
                }
            })
            .collect();
        let out = Manifest { format_version: 1, types };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::from_defaults()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    format_version: u32,
    types: Vec<ManifestType<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ManifestType<'a> {
    id: u8,
    key: &'a str,
    state: MatterState,
    density: f32,
    behavior: BehaviorKind,
    palette: Vec<PaletteEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleRoot {
    #[serde(default)]
    #[allow(dead_code)]
    format_version: Option<u32>,
    #[serde(default)]
    types: Vec<BundleType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleType {
    key: String,
    #[serde(default)]
    density: Option<f32>,
    #[serde(default)]
    palette: Option<Vec<PaletteEntry>>,
}
