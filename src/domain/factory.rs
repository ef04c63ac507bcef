use super::content::TypeRegistry;
use super::particle::{Particle, ParticleTypeId};

/// Build a fresh particle of `type_id`, sampling its palette. Position is
/// left at the origin; the grid stamps it on write.
pub fn create_particle(registry: &TypeRegistry, type_id: ParticleTypeId, rng: &mut u32) -> Particle {
    let props = registry.props(type_id);
    Particle {
        type_id,
        x: 0,
        y: 0,
        state: props.state,
        density: props.density,
        color: props.palette.sample(rng),
        payload: props.default_payload,
        changed_this_tick: false,
        received_update: false,
    }
}

/// Empty particles have a single-color palette, so no randomness is drawn.
pub fn empty_particle(registry: &TypeRegistry) -> Particle {
    let mut unused = 1;
    create_particle(registry, ParticleTypeId::Empty, &mut unused)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::particle::{MatterState, Payload};

    #[test]
    fn factory_copies_type_properties() {
        let registry = TypeRegistry::from_defaults();
        let mut rng = 12345;
        let water = create_particle(&registry, ParticleTypeId::Water, &mut rng);
        assert_eq!(water.state, MatterState::Liquid);
        assert_eq!(water.density, 1.0);
        assert!(!water.changed_this_tick);

        let wet = create_particle(&registry, ParticleTypeId::WetSand, &mut rng);
        assert_eq!(wet.payload, Payload::Moisture(0));
        assert_eq!(wet.moisture(), Some(0));
    }

    #[test]
    fn sand_colors_come_from_its_palette() {
        let registry = TypeRegistry::from_defaults();
        let palette = &registry.props(ParticleTypeId::Sand).palette;
        let allowed: Vec<_> = palette.entries().iter().map(|e| e.rgb).collect();
        let mut rng = 99;
        for _ in 0..200 {
            let c = create_particle(&registry, ParticleTypeId::Sand, &mut rng).color;
            assert!(allowed.contains(&[c.r, c.g, c.b]));
        }
    }

    #[test]
    fn empty_particle_is_empty() {
        let registry = TypeRegistry::from_defaults();
        let empty = empty_particle(&registry);
        assert!(empty.is_empty());
        assert_eq!(empty.state, MatterState::None);
    }
}
