//! fieldresp — detector field/electronics response schema and codec.
//!
//! Holds the induced-current response of wire planes to drifting charge
//! as a small typed tree ([`FieldResponse`] → [`PlaneResponse`] →
//! [`PathResponse`]) together with a lossless codec to a nested-mapping
//! JSON form, so response sets computed by an external field solver can
//! be stored, exchanged and fed to downstream simulation or
//! deconvolution.
//!
//! Units: time in microseconds, distance in millimeters, current in
//! Amperes.

pub mod codec;
pub mod persist;
pub mod schema;

pub use codec::{CodecError, Node};
pub use persist::PersistError;
pub use schema::{FieldResponse, PathResponse, PlaneResponse};
