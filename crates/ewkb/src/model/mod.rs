//! Data model types for EWKB geometries.
//!
//! This module contains all the core types for representing geometry values:
//! - Headers (byte order, flags, SRID)
//! - Coordinates
//! - Geometries (one struct per kind plus the [`Geometry`] sum type)
//! - Builders (ergonomic construction)

pub mod builder;
pub mod coord;
pub mod geometry;
pub mod header;

pub use builder::{CollectionBuilder, GeometryBuilder};
pub use coord::Coord;
pub use geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon, Ring, Rings,
};
pub use header::{ByteOrder, Flags, GeometryType, Header};
