//! Loading a real backend plugin library
//!
//! Builds the `hasty-noise-plugin-fixture` cdylib with the cargo that runs
//! these tests, copies it into a scratch plugin directory and loads it.

#![cfg(feature = "dynamic-backends")]

use hasty_noise::{BackendRegistry, GridRegion, NoiseType, SimdLevel};
use std::path::{Path, PathBuf};
use std::process::Command;

const FIXTURE_PACKAGE: &str = "hasty-noise-plugin-fixture";
const FIXTURE_LIBRARY: &str = "hasty_noise_plugin_fixture";

fn build_fixture() -> PathBuf {
    let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let target_dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("plugin-fixture");

    let output = Command::new(env!("CARGO"))
        .args(["build", "--quiet", "-p", FIXTURE_PACKAGE, "--manifest-path"])
        .arg(workspace.join("Cargo.toml"))
        .arg("--target-dir")
        .arg(&target_dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "building {FIXTURE_PACKAGE} failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    target_dir.join("debug").join(format!(
        "{}{FIXTURE_LIBRARY}.{}",
        std::env::consts::DLL_PREFIX,
        std::env::consts::DLL_EXTENSION
    ))
}

#[test]
fn test_fixture_plugin_registers_a_working_backend() {
    let library = build_fixture();
    let plugins = tempfile::tempdir().unwrap();
    std::fs::copy(&library, plugins.path().join(library.file_name().unwrap())).unwrap();

    let mut registry = BackendRegistry::new();
    assert_eq!(registry.load_plugins(plugins.path()).unwrap(), 1);

    let added: Vec<SimdLevel> = registry.levels().filter(|level| *level != SimdLevel::None).collect();
    if added.is_empty() {
        // no vector level on this target, or the CPU lacks the fixture's level
        return;
    }
    assert_eq!(added.len(), 1, "{added:?}");
    let level = added[0];
    assert!(registry.is_supported(level.index()));

    let region = GridRegion::new([-3, 8, 2], [7, 5, 9]);
    let mut plugin_noise = registry.create_noise_at(1337, level);
    let mut scalar_noise = registry.create_noise_at(1337, SimdLevel::None);
    assert_eq!(plugin_noise.level(), level);

    // engines keep calling into the library after the registry is gone
    drop(registry);
    drop(plugins);

    for noise_type in [NoiseType::PerlinFractal, NoiseType::Cellular] {
        plugin_noise.set_noise_type(noise_type);
        scalar_noise.set_noise_type(noise_type);
        let expected = scalar_noise.noise_set(&region, 1.0);
        let values = plugin_noise.noise_set(&region, 1.0);
        assert_eq!(values.len(), level.aligned_size(region.len()));
        assert_eq!(&values[..region.len()], &expected[..region.len()], "{noise_type}");

        let set = plugin_noise.vector_set(2, 3, 4);
        let points = plugin_noise.noise_vector_set(&set, [0.0; 3]);
        let grid = scalar_noise.noise_set(&GridRegion::sized(2, 3, 4), 1.0);
        assert_eq!(&points[..set.len()], &grid[..set.len()], "{noise_type}");
    }
}
