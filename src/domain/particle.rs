//! Particle - the value stored in every grid cell.
//!
//! Particles are plain `Copy` data. They have no identity outside the cell
//! that holds them; "destroying" one means overwriting the cell with Empty.

use serde::{Deserialize, Serialize};

use super::color::Rgb;

pub const PARTICLE_TYPE_COUNT: usize = 5;

/// Darkening per unit of moisture, and the floor it bottoms out at.
const MOISTURE_DARKENING: f32 = 0.07;
const MIN_MOISTURE_BRIGHTNESS: f32 = 0.5;

/// Closed set of particle types. The discriminant doubles as the bit index in
/// chunk type masks.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleTypeId {
    #[default]
    Empty = 0,
    Sand = 1,
    Water = 2,
    Stone = 3,
    WetSand = 4,
}

impl ParticleTypeId {
    pub const ALL: [ParticleTypeId; PARTICLE_TYPE_COUNT] = [
        ParticleTypeId::Empty,
        ParticleTypeId::Sand,
        ParticleTypeId::Water,
        ParticleTypeId::Stone,
        ParticleTypeId::WetSand,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-bit mask used by chunk type-presence sets.
    #[inline]
    pub const fn bit(self) -> u32 {
        1u32 << (self as u32)
    }

    pub fn from_u8(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatterState {
    #[default]
    None,
    Solid,
    Liquid,
    Gas,
}

/// Type-specific data. Which variant is meaningful depends on the type id;
/// read it through the checked accessors on `Particle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Payload {
    #[default]
    None,
    Moisture(u8),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub type_id: ParticleTypeId,
    /// Mirror of the cell coordinates; rewritten by every grid write.
    pub x: u16,
    pub y: u16,
    pub state: MatterState,
    pub density: f32,
    pub color: Rgb,
    pub payload: Payload,
    pub changed_this_tick: bool,
    /// Diagnostic: the behavior ran for this cell during the current tick.
    pub received_update: bool,
}

impl Particle {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_id == ParticleTypeId::Empty
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        self.state == MatterState::Solid
    }

    #[inline]
    pub fn position(&self) -> (u32, u32) {
        (self.x as u32, self.y as u32)
    }

    /// Stamp the cell coordinates. Grid dimensions are capped at `u16::MAX`.
    #[inline]
    pub fn place_at(&mut self, x: u32, y: u32) {
        self.x = x as u16;
        self.y = y as u16;
    }

    /// Clear the per-tick flags.
    #[inline]
    pub fn begin_tick(&mut self) {
        self.changed_this_tick = false;
        self.received_update = false;
    }

    /// Moisture level, only for wet sand.
    pub fn moisture(&self) -> Option<u8> {
        match (self.type_id, self.payload) {
            (ParticleTypeId::WetSand, Payload::Moisture(level)) => Some(level),
            _ => None,
        }
    }

    /// Returns `false` (and leaves the payload alone) for types that carry no
    /// moisture.
    pub fn set_moisture(&mut self, level: u8) -> bool {
        if self.type_id != ParticleTypeId::WetSand {
            return false;
        }
        self.payload = Payload::Moisture(level);
        true
    }

    /// Palette color with moisture darkening applied.
    pub fn display_color(&self) -> Rgb {
        match self.moisture() {
            Some(level) => {
                let factor = (1.0 - level as f32 * MOISTURE_DARKENING).max(MIN_MOISTURE_BRIGHTNESS);
                self.color.scaled(factor)
            }
            None => self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wet_sand(level: u8) -> Particle {
        Particle {
            type_id: ParticleTypeId::WetSand,
            x: 0,
            y: 0,
            state: MatterState::Solid,
            density: 1.8,
            color: Rgb::new(200, 100, 40),
            payload: Payload::Moisture(level),
            changed_this_tick: false,
            received_update: false,
        }
    }

    #[test]
    fn type_ids_round_trip_through_u8() {
        for id in ParticleTypeId::ALL {
            assert_eq!(ParticleTypeId::from_u8(id as u8), Some(id));
        }
        assert_eq!(ParticleTypeId::from_u8(PARTICLE_TYPE_COUNT as u8), None);
    }

    #[test]
    fn moisture_access_is_checked_by_type() {
        let mut p = wet_sand(3);
        assert_eq!(p.moisture(), Some(3));
        assert!(p.set_moisture(9));
        assert_eq!(p.moisture(), Some(9));

        p.type_id = ParticleTypeId::Sand;
        assert_eq!(p.moisture(), None);
        assert!(!p.set_moisture(1));
    }

    #[test]
    fn moisture_darkens_down_to_floor() {
        let dry = wet_sand(0);
        assert_eq!(dry.display_color(), dry.color);

        let damp = wet_sand(5);
        assert!(damp.display_color().r < dry.color.r);

        let soaked = wet_sand(200);
        assert_eq!(soaked.display_color(), dry.color.scaled(0.5));
    }
}
