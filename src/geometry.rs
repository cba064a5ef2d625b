//! Planar geometry for matching rider points against route paths.
//!
//! Only nearest-point-on-line and arc-length accumulation are needed, so the
//! maths lives here instead of going through a general GIS library.

pub mod point;
pub mod polyline;
pub mod segment;

pub use point::{round_km, Envelope, GeoPoint, LocalFrame, PlanarPoint, KM_PER_DEGREE};
pub use polyline::{PathError, PathProjection, Polyline, RoutePath};
pub use segment::{Segment, SegmentProjection};
