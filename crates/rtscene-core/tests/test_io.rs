//! Scene File Tests
//!
//! Ensures that every scene description in tests/data can be loaded and
//! written back without losing information.

use rtscene_core::scene::SceneDescription;
use rtscene_core::Scene;
use std::fs;
use std::path::Path;

const TEST_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/data");

#[test]
fn test_read_all_files_in_data_dir() {
    let _ = env_logger::builder().is_test(true).try_init();
    let data_dir = Path::new(TEST_DATA_DIR);
    let mut count = 0;

    for entry in fs::read_dir(data_dir).expect("Failed to read directory") {
        let path = entry.expect("Failed to read directory entry").path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let scene = Scene::from_file(&path)
            .unwrap_or_else(|e| panic!("Failed to load {:?}: {}", path.file_name(), e));
        assert!(!scene.transmitters().is_empty());
        count += 1;
    }

    assert!(count >= 2, "Expected scene files in {}", TEST_DATA_DIR);
}

#[test]
fn test_write_and_reload() {
    let path = format!("{}/urban_ris.json", TEST_DATA_DIR);
    let scene = Scene::from_file(&path).expect("Failed to load urban_ris.json");

    let out = std::env::temp_dir().join(format!("rtscene_io_{}.json", std::process::id()));
    scene.write_file(&out).expect("Failed to write scene");
    let back = Scene::from_file(&out).expect("Failed to reload scene");
    let _ = fs::remove_file(&out);

    assert_eq!(
        SceneDescription::from_scene(&back),
        SceneDescription::from_scene(&scene)
    );
    assert_eq!(back.frequency().hz(), scene.frequency().hz());
    assert_eq!(back.tx_array, scene.tx_array);
}

#[test]
fn test_missing_file() {
    let result = Scene::from_file(format!("{}/does_not_exist.json", TEST_DATA_DIR));
    assert!(matches!(
        result,
        Err(rtscene_core::scene::SceneError::Io(_))
    ));
}
