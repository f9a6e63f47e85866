use ndarray::arr1;
use serde_json::Value;

use fieldresp::codec::{decode, decode_field_response, encode, encode_field_response, Node};
use fieldresp::{FieldResponse, PathResponse, PlaneResponse};

fn sample_response() -> FieldResponse {
    let path = |pitchpos: f64, wirepos: f64| {
        PathResponse::new(arr1(&[0.0, 1.5e-9, -0.5e-9, 0.0]), pitchpos, wirepos)
    };
    let u = PlaneResponse::new(
        vec![path(0.0, 0.0), path(1.5, 0.0), path(3.0, 10.0)],
        0,
        100.0,
        3.0,
        [0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0],
    );
    let v = PlaneResponse::new(
        vec![path(-1.5, 0.0)],
        1,
        97.0,
        3.0,
        [0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0],
    );
    FieldResponse::new(vec![u, v], [1.0, 0.0, 0.0], 100.0, 0.0, 0.5)
}

#[test]
fn decode_inverts_encode() {
    let original = sample_response();
    let encoded = encode_field_response(&original);
    let decoded = decode_field_response(&encoded).expect("decode");
    assert_eq!(decoded, original);
}

#[test]
fn one_plane_two_paths_nests_five_levels() {
    let path = |pitchpos: f64| PathResponse::new(arr1(&[0.0, 1.0, 2.0]), pitchpos, 0.0);
    let plane = PlaneResponse::new(
        vec![path(0.0), path(1.5)],
        0,
        100.0,
        3.0,
        [0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0],
    );
    let fr = FieldResponse::new(vec![plane], [1.0, 0.0, 0.0], 100.0, 0.0, 0.5);

    let encoded = encode_field_response(&fr);
    // FieldResponse -> planes -> PlaneResponse -> paths -> PathResponse
    let second_path = &encoded["FieldResponse"]["planes"][0]["PlaneResponse"]["paths"][1];
    assert!(second_path["PathResponse"]["pitchpos"].is_number());

    let decoded = decode_field_response(&encoded).expect("decode");
    assert_eq!(decoded, fr);
}

#[test]
fn empty_paths_survive_roundtrip() {
    let plane = PlaneResponse::new(vec![], 2, 94.0, 4.5, [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]);
    let encoded = encode(&Node::Plane(plane.clone()));
    assert_eq!(
        encoded["PlaneResponse"]["paths"],
        Value::Array(vec![]),
    );
    match decode(&encoded).expect("decode") {
        Node::Plane(decoded) => assert_eq!(decoded, plane),
        other => panic!("decoded to {other:?}"),
    }
}

#[test]
fn type_tags_are_mutually_exclusive() {
    let path = PathResponse::new(arr1(&[0.0, 1.0, 2.0]), 1.5, 0.0);
    let encoded = encode(&Node::Path(path.clone()));

    let object = encoded.as_object().expect("tagged object");
    assert_eq!(object.len(), 1);
    assert!(object.contains_key("PathResponse"));
    assert!(!object.contains_key("PlaneResponse"));
    assert!(!object.contains_key("FieldResponse"));
    assert!(!object.contains_key("array"));

    match decode(&encoded).expect("decode") {
        Node::Path(decoded) => {
            assert_eq!(decoded.current, path.current);
            assert_eq!(decoded.pitchpos, 1.5);
            assert_eq!(decoded.wirepos, 0.0);
        }
        other => panic!("path decoded to {other:?}"),
    }
}

#[test]
fn scalars_and_sequences_pass_through() {
    let node = Node::Sequence(vec![Node::Int(3), Node::Float(0.5)]);
    let encoded = encode(&node);
    assert_eq!(encoded, serde_json::json!([3, 0.5]));
    assert_eq!(decode(&encoded).expect("decode"), node);
}
