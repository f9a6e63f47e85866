//! Codec between the response schema tree and its nested-mapping JSON form.
//!
//! A record encodes as a single-key object tagged with the type name,
//! `{"PlaneResponse": {"paths": [...], ...}}`, and a numeric array as
//! `{"array": {"shape": [...], "elements": [...]}}` with the elements
//! flattened row-major. Sequences encode element-wise and numbers pass
//! through. Decoding inverts this exactly; an object that is neither an
//! array wrapper nor a known type tag is rejected rather than passed
//! through.

use ndarray::{ArrayD, Ix1, IxDyn};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::schema::{FieldResponse, PathResponse, PlaneResponse};

/// Any value the codec carries: schema records, numeric arrays,
/// sequences of those, and numeric scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Field(FieldResponse),
    Plane(PlaneResponse),
    Path(PathResponse),
    Array(ArrayD<f64>),
    Sequence(Vec<Node>),
    Int(i64),
    Float(f64),
}

impl Node {
    fn kind(&self) -> &'static str {
        match self {
            Node::Field(_) => "FieldResponse",
            Node::Plane(_) => "PlaneResponse",
            Node::Path(_) => "PathResponse",
            Node::Array(_) => "array",
            Node::Sequence(_) => "sequence",
            Node::Int(_) => "integer",
            Node::Float(_) => "number",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("object key `{0}` is neither `array` nor a known type tag")]
    UnknownTag(String),
    #[error("expected a single-key tagged object, found {0} keys")]
    UntaggedObject(usize),
    #[error("{tag}: missing field `{field}`")]
    MissingField { tag: &'static str, field: &'static str },
    #[error("{tag}: unexpected field `{field}`")]
    UnexpectedField { tag: &'static str, field: String },
    #[error("array of shape {shape:?} cannot hold {len} elements")]
    ShapeMismatch { shape: Vec<usize>, len: usize },
    #[error("malformed array wrapper: {0}")]
    BadArray(#[source] serde_json::Error),
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
}

fn mismatch(expected: impl Into<String>, found: &Value) -> CodecError {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    CodecError::TypeMismatch {
        expected: expected.into(),
        found: found.to_string(),
    }
}

/// Encode any codec value to its JSON form. Total: every `Node` has a
/// well-defined encoding.
pub fn encode(node: &Node) -> Value {
    match node {
        Node::Field(fr) => encode_field(fr),
        Node::Plane(pr) => encode_plane(pr),
        Node::Path(pr) => encode_path(pr),
        Node::Array(a) => encode_array(a.view()),
        Node::Sequence(items) => Value::Array(items.iter().map(encode).collect()),
        Node::Int(i) => json!(i),
        Node::Float(x) => json!(x),
    }
}

/// Encode a whole response tree.
pub fn encode_field_response(fr: &FieldResponse) -> Value {
    encode_field(fr)
}

/// Decode any JSON value produced by [`encode`].
pub fn decode(value: &Value) -> Result<Node, CodecError> {
    match value {
        Value::Object(map) => decode_object(map),
        Value::Array(items) => {
            let items = items.iter().map(decode).collect::<Result<Vec<_>, _>>()?;
            Ok(Node::Sequence(items))
        }
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Node::Int(i)),
            None => n
                .as_f64()
                .map(Node::Float)
                .ok_or_else(|| mismatch("a finite number", value)),
        },
        other => Err(mismatch("an object, array or number", other)),
    }
}

/// Decode a whole response tree.
pub fn decode_field_response(value: &Value) -> Result<FieldResponse, CodecError> {
    match decode(value)? {
        Node::Field(fr) => Ok(fr),
        other => Err(CodecError::TypeMismatch {
            expected: "a FieldResponse tree".into(),
            found: other.kind().into(),
        }),
    }
}

fn encode_field(fr: &FieldResponse) -> Value {
    json!({ "FieldResponse": {
        "planes": Value::Array(fr.planes.iter().map(encode_plane).collect()),
        "axis": fr.axis,
        "origin": fr.origin,
        "tstart": fr.tstart,
        "period": fr.period,
    }})
}

fn encode_plane(pr: &PlaneResponse) -> Value {
    json!({ "PlaneResponse": {
        "paths": Value::Array(pr.paths.iter().map(encode_path).collect()),
        "planeid": pr.planeid,
        "location": pr.location,
        "pitch": pr.pitch,
        "pitchdir": pr.pitchdir,
        "wiredir": pr.wiredir,
    }})
}

fn encode_path(pr: &PathResponse) -> Value {
    json!({ "PathResponse": {
        "current": encode_array(pr.current.view().into_dyn()),
        "pitchpos": pr.pitchpos,
        "wirepos": pr.wirepos,
    }})
}

fn encode_array(a: ndarray::ArrayViewD<'_, f64>) -> Value {
    // Iteration over a view is in logical (row-major) order.
    let elements: Vec<f64> = a.iter().copied().collect();
    json!({ "array": {
        "shape": a.shape(),
        "elements": elements,
    }})
}

/// Inner payload of an `{"array": ...}` wrapper.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ArrayRepr {
    shape: Vec<usize>,
    elements: Vec<f64>,
}

fn decode_object(map: &Map<String, Value>) -> Result<Node, CodecError> {
    if map.len() != 1 {
        return Err(CodecError::UntaggedObject(map.len()));
    }
    let (tag, inner) = map.iter().next().ok_or(CodecError::UntaggedObject(0))?;
    match tag.as_str() {
        "array" => decode_array(inner).map(Node::Array),
        "FieldResponse" => decode_field(inner).map(Node::Field),
        "PlaneResponse" => decode_plane(inner).map(Node::Plane),
        "PathResponse" => decode_path(inner).map(Node::Path),
        other => Err(CodecError::UnknownTag(other.to_string())),
    }
}

fn decode_array(inner: &Value) -> Result<ArrayD<f64>, CodecError> {
    let repr: ArrayRepr = ArrayRepr::deserialize(inner).map_err(CodecError::BadArray)?;
    let len = repr.elements.len();
    let shape = repr.shape.clone();
    ArrayD::from_shape_vec(IxDyn(&repr.shape), repr.elements)
        .map_err(|_| CodecError::ShapeMismatch { shape, len })
}

/// Check the field-name set of a record body exactly against `names`.
fn record_fields<'a>(
    tag: &'static str,
    inner: &'a Value,
    names: &'static [&'static str],
) -> Result<&'a Map<String, Value>, CodecError> {
    let map = match inner {
        Value::Object(map) => map,
        other => return Err(mismatch(format!("{tag} body as an object"), other)),
    };
    for key in map.keys() {
        if !names.contains(&key.as_str()) {
            return Err(CodecError::UnexpectedField {
                tag,
                field: key.clone(),
            });
        }
    }
    Ok(map)
}

fn require<'a>(
    map: &'a Map<String, Value>,
    tag: &'static str,
    field: &'static str,
) -> Result<&'a Value, CodecError> {
    map.get(field)
        .ok_or(CodecError::MissingField { tag, field })
}

fn decode_f64(tag: &'static str, field: &'static str, value: &Value) -> Result<f64, CodecError> {
    value
        .as_f64()
        .ok_or_else(|| mismatch(format!("{tag}.{field} as a number"), value))
}

fn decode_i64(tag: &'static str, field: &'static str, value: &Value) -> Result<i64, CodecError> {
    value
        .as_i64()
        .ok_or_else(|| mismatch(format!("{tag}.{field} as an integer"), value))
}

fn decode_vec3(tag: &'static str, field: &'static str, value: &Value) -> Result<[f64; 3], CodecError> {
    let items = value
        .as_array()
        .filter(|items| items.len() == 3)
        .ok_or_else(|| mismatch(format!("{tag}.{field} as a 3-vector"), value))?;
    let mut out = [0.0; 3];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = decode_f64(tag, field, item)?;
    }
    Ok(out)
}

fn decode_field(inner: &Value) -> Result<FieldResponse, CodecError> {
    const TAG: &str = "FieldResponse";
    let map = record_fields(TAG, inner, &["planes", "axis", "origin", "tstart", "period"])?;
    let planes_value = require(map, TAG, "planes")?;
    let planes = planes_value
        .as_array()
        .ok_or_else(|| mismatch("FieldResponse.planes as a sequence", planes_value))?
        .iter()
        .map(|v| match decode(v)? {
            Node::Plane(pr) => Ok(pr),
            other => Err(CodecError::TypeMismatch {
                expected: "a PlaneResponse".into(),
                found: other.kind().into(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FieldResponse::new(
        planes,
        decode_vec3(TAG, "axis", require(map, TAG, "axis")?)?,
        decode_f64(TAG, "origin", require(map, TAG, "origin")?)?,
        decode_f64(TAG, "tstart", require(map, TAG, "tstart")?)?,
        decode_f64(TAG, "period", require(map, TAG, "period")?)?,
    ))
}

fn decode_plane(inner: &Value) -> Result<PlaneResponse, CodecError> {
    const TAG: &str = "PlaneResponse";
    let map = record_fields(
        TAG,
        inner,
        &["paths", "planeid", "location", "pitch", "pitchdir", "wiredir"],
    )?;
    let paths_value = require(map, TAG, "paths")?;
    let paths = paths_value
        .as_array()
        .ok_or_else(|| mismatch("PlaneResponse.paths as a sequence", paths_value))?
        .iter()
        .map(|v| match decode(v)? {
            Node::Path(pr) => Ok(pr),
            other => Err(CodecError::TypeMismatch {
                expected: "a PathResponse".into(),
                found: other.kind().into(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PlaneResponse::new(
        paths,
        decode_i64(TAG, "planeid", require(map, TAG, "planeid")?)?,
        decode_f64(TAG, "location", require(map, TAG, "location")?)?,
        decode_f64(TAG, "pitch", require(map, TAG, "pitch")?)?,
        decode_vec3(TAG, "pitchdir", require(map, TAG, "pitchdir")?)?,
        decode_vec3(TAG, "wiredir", require(map, TAG, "wiredir")?)?,
    ))
}

fn decode_path(inner: &Value) -> Result<PathResponse, CodecError> {
    const TAG: &str = "PathResponse";
    let map = record_fields(TAG, inner, &["current", "pitchpos", "wirepos"])?;
    let current = match decode(require(map, TAG, "current")?)? {
        Node::Array(a) => {
            let ndim = a.ndim();
            a.into_dimensionality::<Ix1>()
                .map_err(|_| CodecError::TypeMismatch {
                    expected: "PathResponse.current as a 1-d array".into(),
                    found: format!("array of {ndim} dimensions"),
                })?
        }
        other => {
            return Err(CodecError::TypeMismatch {
                expected: "PathResponse.current as an array wrapper".into(),
                found: other.kind().into(),
            })
        }
    };
    Ok(PathResponse::new(
        current,
        decode_f64(TAG, "pitchpos", require(map, TAG, "pitchpos")?)?,
        decode_f64(TAG, "wirepos", require(map, TAG, "wirepos")?)?,
    ))
}
