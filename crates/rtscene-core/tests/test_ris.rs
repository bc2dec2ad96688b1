//! RIS Tests
//!
//! Profile synthesis and re-radiation on a RIS placed in a scene.

use approx::assert_relative_eq;
use nalgebra::Vector3;
use ndarray::Array3;
use rtscene_core::device::Device;
use rtscene_core::math::wrap_phase;
use rtscene_core::ris::RisError;
use rtscene_core::Scene;

const TEST_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/data");

fn urban_scene() -> Scene {
    let path = format!("{}/urban_ris.json", TEST_DATA_DIR);
    Scene::from_file(&path).expect("Failed to load urban_ris.json")
}

#[test]
fn test_loaded_ris() {
    let scene = urban_scene();
    let ris = scene.ris_by_name("ris").unwrap();

    assert_eq!(ris.num_modes(), 2);
    assert_relative_eq!(ris.mode_powers()[0], 0.75, epsilon = 1e-12);
    assert_eq!(ris.cell_world_positions().len(), 200);

    // The surface faces the transmitter it looks at
    let tx = scene.transmitter("tx").unwrap();
    let to_tx = (tx.position() - ris.position()).normalize();
    assert_relative_eq!((ris.world_normal() - to_tx).norm(), 0.0, epsilon = 1e-12);
}

#[test]
fn test_two_mode_reflector() {
    let mut scene = urban_scene();
    let tx = scene.transmitter("tx").unwrap().position();
    let rx1 = scene.receiver("rx-1").unwrap().position();
    let rx2 = scene.receiver("rx-2").unwrap().position();

    let ris = scene.ris_by_name_mut("ris").unwrap();
    ris.phase_gradient_reflector(&[tx, tx], &[rx1, rx2]).unwrap();

    let centre = ris.position();
    let k_i = (centre - tx).normalize();
    for (mode, target) in [(0, rx1), (1, rx2)] {
        let k_r = ris
            .reradiated_direction(mode, &centre, &k_i)
            .unwrap()
            .expect("re-radiated wave should propagate");
        let expected = (target - centre).normalize();
        assert_relative_eq!((k_r - expected).norm(), 0.0, epsilon = 1e-8);
    }

    assert!(matches!(
        ris.reradiated_direction(2, &centre, &k_i),
        Err(RisError::InvalidMode { mode: 2, .. })
    ));
}

#[test]
fn test_focusing_lens_is_coherent_at_target() {
    let mut scene = urban_scene();
    let tx = scene.transmitter("tx").unwrap().position();
    let rx = scene.receiver("rx-2").unwrap().position();

    let ris = scene.ris_by_name_mut("ris").unwrap();
    ris.focusing_lens(&[tx, tx], &[rx, rx]).unwrap();

    // Propagation phase plus profile phase is identical for every cell
    let k0 = ris.wavenumber();
    let values = ris.phase_profile().values();
    let cols = ris.num_cols();
    for (c, cell) in ris.cell_world_positions().iter().enumerate() {
        let propagation = -k0 * ((cell - tx).norm() + (rx - cell).norm());
        let total = wrap_phase(propagation + values[[0, c / cols, c % cols]]);
        assert_relative_eq!(total, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn test_evanescent_reradiation() {
    let mut scene = urban_scene();
    let ris = scene.ris_by_name_mut("ris").unwrap();

    // A gradient steeper than k0 along y cannot be re-radiated
    let k0 = ris.wavenumber();
    let spacing = ris.cell_spacing();
    let ys = ris.cell_grid().cell_y_positions();
    let values = Array3::from_shape_fn((2, 10, 20), |(_, _, j)| 3.0 * k0 * ys[j] * spacing);
    ris.phase_profile_mut().set_values(values).unwrap();

    let k_i = -ris.world_normal();
    let centre = ris.position();
    assert!(ris.reradiated_direction(0, &centre, &k_i).unwrap().is_none());
}
