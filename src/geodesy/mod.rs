//! UTM to geographic coordinate conversion on the WGS84 ellipsoid
//!
//! Supports the two southern-hemisphere zones covering continental Chile
//! (18S and 19S). Single-point and batch conversion are pure functions; the
//! selected zone is always passed explicitly.

mod ellipsoid;
mod utm;
mod batch;

pub use ellipsoid::{Ellipsoid, UTM_SCALE_FACTOR, FALSE_EASTING, FALSE_NORTHING_SOUTH};
pub use utm::{UtmZone, UtmPoint, GeoPoint, convert, to_utm};
pub use batch::{LabeledPoint, convert_batch, parse_batch_line, write_tsv};
