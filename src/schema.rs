//! Response schema: a strict tree `FieldResponse` → `PlaneResponse` →
//! `PathResponse` → current waveform.
//!
//! The schema is generic over how the responses were computed: averaged
//! per-region responses, fine-grained drift paths spanning several wire
//! regions, or anything in between. It only fixes the shape of the data.
//!
//! Units warning: time in microseconds, distance in millimeters, current
//! in Amperes.

use ndarray::Array1;

/// Full set of per-plane responses plus the drift geometry and timing
/// they were computed with.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResponse {
    /// One entry per wire plane.
    pub planes: Vec<PlaneResponse>,
    /// Normalized 3-vector (anti)parallel to the nominal drift direction.
    pub axis: [f64; 3],
    /// Location on the axis where drift paths begin, mm.
    pub origin: f64,
    /// Time at which drift paths begin, µs.
    pub tstart: f64,
    /// Sampling period of the current waveforms, µs.
    pub period: f64,
}

impl FieldResponse {
    pub fn new(
        planes: Vec<PlaneResponse>,
        axis: [f64; 3],
        origin: f64,
        tstart: f64,
        period: f64,
    ) -> Self {
        Self {
            planes,
            axis,
            origin,
            tstart,
            period,
        }
    }

    /// Look up a plane by its numeric identifier.
    pub fn plane(&self, planeid: i64) -> Option<&PlaneResponse> {
        self.planes.iter().find(|p| p.planeid == planeid)
    }
}

/// Responses for the drift paths of one wire plane.
///
/// Along with `FieldResponse::axis` the following should hold:
/// `axis × wiredir = pitchdir`. Not enforced here.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneResponse {
    /// One entry per drift path.
    pub paths: Vec<PathResponse>,
    /// Numeric identifier for the plane.
    pub planeid: i64,
    /// Location of the plane in the drift direction, mm.
    pub location: f64,
    /// Wire pitch, mm.
    pub pitch: f64,
    /// Normalized 3-vector along the pitch.
    pub pitchdir: [f64; 3],
    /// Normalized 3-vector along the wire run.
    pub wiredir: [f64; 3],
}

impl PlaneResponse {
    pub fn new(
        paths: Vec<PathResponse>,
        planeid: i64,
        location: f64,
        pitch: f64,
        pitchdir: [f64; 3],
        wiredir: [f64; 3],
    ) -> Self {
        Self {
            paths,
            planeid,
            location,
            pitch,
            pitchdir,
            wiredir,
        }
    }
}

/// Induced current on the wire of interest for one drift path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResponse {
    /// Sampled induced current along the path, Amperes.
    pub current: Array1<f64>,
    /// Transverse (pitch-direction) position of the path start, mm.
    pub pitchpos: f64,
    /// Position of the path start along the wire, mm.
    pub wirepos: f64,
}

impl PathResponse {
    pub fn new(current: Array1<f64>, pitchpos: f64, wirepos: f64) -> Self {
        Self {
            current,
            pitchpos,
            wirepos,
        }
    }

    /// Wire region the path starts in, given the plane pitch.
    ///
    /// Half-way positions round away from zero, so a path exactly between
    /// two wires belongs to the farther-from-origin region.
    pub fn region(&self, pitch: f64) -> i64 {
        (self.pitchpos / pitch).round() as i64
    }

    /// Offset of the path start from its region's wire center, mm.
    pub fn impact(&self, pitch: f64) -> f64 {
        self.pitchpos - self.region(pitch) as f64 * pitch
    }
}
