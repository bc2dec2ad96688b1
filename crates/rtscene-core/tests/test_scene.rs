//! Scene Tests
//!
//! Adding, looking up and removing radio devices by name.

use approx::assert_relative_eq;
use nalgebra::Vector3;
use rtscene_core::antenna::{AntennaPattern, PlanarArray, Polarization};
use rtscene_core::device::Device;
use rtscene_core::frequency::{Frequency, FrequencyUnit};
use rtscene_core::scene::{SceneError, SceneItem};
use rtscene_core::{Receiver, Ris, Scene, Transmitter};

const TEST_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/data");

fn base_scene() -> Scene {
    let mut scene = Scene::new();
    scene.tx_array = Some(
        PlanarArray {
            num_rows: 8,
            num_cols: 2,
            vertical_spacing: 0.7,
            horizontal_spacing: 0.5,
            pattern: AntennaPattern::Tr38901,
            polarization: Polarization::VH,
            ..Default::default()
        }
        .build()
        .unwrap(),
    );
    scene.rx_array = Some(
        PlanarArray {
            pattern: AntennaPattern::Dipole,
            polarization: Polarization::Cross,
            ..Default::default()
        }
        .build()
        .unwrap(),
    );
    scene
}

#[test]
fn test_add_transmitter_and_receiver() {
    let mut scene = base_scene();
    scene
        .add(Transmitter::new("tx", Vector3::new(8.5, 21.0, 27.0), [0.0; 3]))
        .unwrap();
    scene
        .add(Receiver::new("rx", Vector3::new(45.0, 90.0, 1.5), [0.0; 3]))
        .unwrap();

    scene.look_at("tx", "rx").unwrap();

    let tx = scene.transmitter("tx").unwrap();
    let expected = (Vector3::new(45.0, 90.0, 1.5) - tx.position()).normalize();
    assert_relative_eq!(
        (tx.radio_device().boresight() - expected).norm(),
        0.0,
        epsilon = 1e-12
    );

    assert_eq!(scene.tx_array.as_ref().unwrap().num_ant(), 32);
    assert_eq!(scene.rx_array.as_ref().unwrap().num_ant(), 2);
}

#[test]
fn test_remove_each_kind() {
    let mut scene = base_scene();
    scene
        .add(Transmitter::new("tx", Vector3::zeros(), [0.0; 3]))
        .unwrap();
    scene
        .add(Receiver::new("rx", Vector3::new(1.0, 0.0, 0.0), [0.0; 3]))
        .unwrap();
    scene
        .add(Ris::new("ris", Vector3::new(5.0, 0.0, 0.0), [0.0; 3], 4, 4, 1).unwrap())
        .unwrap();

    assert!(matches!(scene.remove("ris").unwrap(), SceneItem::Ris(_)));
    assert!(matches!(scene.remove("tx").unwrap(), SceneItem::Transmitter(_)));
    assert!(matches!(scene.remove("rx").unwrap(), SceneItem::Receiver(_)));
    assert!(scene.get("tx").is_none());
    assert!(matches!(scene.remove("tx"), Err(SceneError::UnknownItem(_))));
}

#[test]
fn test_duplicate_name_keeps_original() {
    let mut scene = base_scene();
    scene
        .add(Transmitter::new("dev", Vector3::new(1.0, 1.0, 1.0), [0.0; 3]))
        .unwrap();

    let ris = Ris::new("dev", Vector3::zeros(), [0.0; 3], 2, 2, 1).unwrap();
    assert!(matches!(scene.add(ris), Err(SceneError::NameInUse(_))));

    assert!(scene.ris().is_empty());
    assert_eq!(
        scene.get("dev").unwrap().position(),
        Vector3::new(1.0, 1.0, 1.0)
    );
}

#[test]
fn test_modify_through_get_mut() {
    let mut scene = base_scene();
    scene
        .add(Receiver::new("rx", Vector3::zeros(), [0.0; 3]))
        .unwrap();

    let rx = scene.get_mut("rx").unwrap();
    rx.set_position(Vector3::new(3.0, 4.0, 5.0));
    rx.set_orientation([0.1, 0.2, 0.3]);

    let rx = scene.receiver("rx").unwrap();
    assert_eq!(rx.position(), Vector3::new(3.0, 4.0, 5.0));
    assert_eq!(rx.orientation(), [0.1, 0.2, 0.3]);
}

#[test]
fn test_frequency_change_rescales_ris() {
    let path = format!("{}/urban_ris.json", TEST_DATA_DIR);
    let mut scene = Scene::from_file(&path).expect("Failed to load urban_ris.json");

    let (w0, h0) = scene.ris_by_name("ris").unwrap().size();
    scene
        .set_frequency(Frequency::new(7.0, FrequencyUnit::GHz).unwrap())
        .unwrap();
    let (w1, h1) = scene.ris_by_name("ris").unwrap().size();

    assert_relative_eq!(w1, w0 / 2.0, max_relative = 1e-12);
    assert_relative_eq!(h1, h0 / 2.0, max_relative = 1e-12);
}
