use std::fs;
use std::path::PathBuf;

use ndarray::arr1;

use fieldresp::{persist, FieldResponse, PathResponse, PlaneResponse};

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "fieldresp_persist_{}_{}.json",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

fn sample_response() -> FieldResponse {
    let plane = PlaneResponse::new(
        vec![
            PathResponse::new(arr1(&[0.0, 2.5e-9, 0.0]), 0.0, 0.0),
            PathResponse::new(arr1(&[0.0, -1.0e-9, 1.0e-9]), 1.5, 0.0),
        ],
        0,
        100.0,
        3.0,
        [0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0],
    );
    FieldResponse::new(vec![plane], [1.0, 0.0, 0.0], 100.0, 0.0, 0.5)
}

#[test]
fn dump_then_load_roundtrips() {
    let path = unique_path("roundtrip");
    let original = sample_response();

    persist::dump(&path, &original).expect("dump");
    let loaded = persist::load(&path).expect("load");
    fs::remove_file(&path).ok();

    assert_eq!(loaded, original);
}

#[test]
fn load_accepts_hand_written_file() {
    let path = unique_path("handwritten");
    let text = r#"{ "FieldResponse": {
        "planes": [ { "PlaneResponse": {
            "paths": [],
            "planeid": 2,
            "location": 94.0,
            "pitch": 4.5,
            "pitchdir": [0.0, 0.0, 1.0],
            "wiredir": [0.0, 1.0, 0.0]
        }}],
        "axis": [1.0, 0.0, 0.0],
        "origin": 100.0,
        "tstart": 0.0,
        "period": 0.5
    }}"#;
    fs::write(&path, text).expect("write");

    let loaded = persist::load(&path).expect("load");
    fs::remove_file(&path).ok();

    assert_eq!(loaded.planes.len(), 1);
    let plane = loaded.plane(2).expect("plane 2");
    assert_eq!(plane.pitch, 4.5);
    assert!(plane.paths.is_empty());
}

#[test]
fn load_reports_malformed_file() {
    let path = unique_path("malformed");
    fs::write(&path, r#"{ "Response": {} }"#).expect("write");

    let err = persist::load(&path).expect_err("should fail");
    fs::remove_file(&path).ok();

    assert!(matches!(err, persist::PersistError::Codec(_)));
}
