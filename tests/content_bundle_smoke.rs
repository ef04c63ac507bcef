use std::fs;
use std::path::Path;

use grainfall_engine::domain::TypeRegistry;
use grainfall_engine::{EngineError, ParticleTypeId, Simulation};

fn shipped_bundle() -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("content/bundle.json");
    fs::read_to_string(path).expect("content/bundle.json should exist")
}

#[test]
fn content_bundle_smoke_parses_and_has_core_invariants() {
    let registry = TypeRegistry::from_bundle_json(&shipped_bundle()).expect("bundle.json should parse");

    assert_eq!(registry.id_by_key("base:empty"), Some(ParticleTypeId::Empty));
    assert_eq!(registry.id_by_key("base:wet_sand"), Some(ParticleTypeId::WetSand));
    assert!(registry.props(ParticleTypeId::Stone).palette.len() == 2);

    // Heavier sinks through lighter must still hold after retuning.
    assert!(registry.props(ParticleTypeId::Sand).density > registry.props(ParticleTypeId::Water).density);
}

#[test]
fn manifest_lists_every_type() {
    let registry = TypeRegistry::from_bundle_json(&shipped_bundle()).expect("bundle.json should parse");
    let manifest: serde_json::Value = serde_json::from_str(&registry.manifest_json()).expect("manifest is json");

    assert_eq!(manifest["formatVersion"], 1);
    let types = manifest["types"].as_array().expect("types array");
    assert_eq!(types.len(), ParticleTypeId::ALL.len());
    for (entry, id) in types.iter().zip(ParticleTypeId::ALL) {
        assert_eq!(entry["id"], id as u8);
        assert_eq!(entry["key"], registry.key(id));
    }
    assert_eq!(types[2]["behavior"]["kind"], "liquid");
}

#[test]
fn broken_bundles_are_rejected() {
    assert!(matches!(
        TypeRegistry::from_bundle_json(r#"{ "types": [ { "key": "base:lava" } ] }"#),
        Err(EngineError::UnknownTypeKey(key)) if key == "base:lava"
    ));
    assert!(matches!(
        TypeRegistry::from_bundle_json(r#"{ "types": [ { "key": "base:sand", "palette": [] } ] }"#),
        Err(EngineError::EmptyPalette(_))
    ));
    assert!(matches!(
        TypeRegistry::from_bundle_json(r#"{ "types": [ { "key": "base:sand", "density": -1 } ] }"#),
        Err(EngineError::InvalidDensity { .. })
    ));
    assert!(matches!(TypeRegistry::from_bundle_json("[1, 2"), Err(EngineError::Json(_))));
}

#[test]
fn simulation_runs_on_the_shipped_bundle() {
    let mut sim = Simulation::with_size(32, 32).expect("valid size");
    sim.load_content_bundle_json(&shipped_bundle()).expect("bundle applies");
    sim.paint_disc(16, 4, 3, ParticleTypeId::Sand);
    let painted = sim.particle_count();
    for _ in 0..40 {
        sim.step();
    }
    assert_eq!(sim.particle_count(), painted);
}
