//! EWKB: PostGIS Extended Well-Known Binary geometry codec.
//!
//! This crate decodes and encodes geometry values in the EWKB wire format
//! used by spatial databases, and renders the same values as WKT/EWKT.
//!
//! # Overview
//!
//! Every value starts with a header:
//! - **Byte order**: `0x00` big-endian, `0x01` little-endian
//! - **Type word**: the geometry kind in the low 16 bits, Z/M/SRID flags on top
//! - **SRID**: a signed 32-bit id, present only when the SRID flag is set
//!
//! The payload follows the header. Collection members repeat the full header,
//! so each member may use its own byte order, dimensions and SRID.
//!
//! # Quick Start
//!
//! ```rust
//! use ewkb::{decode, encode, ByteOrder, GeometryBuilder};
//!
//! // POINT(7 8), little-endian
//! let bytes = [1u8, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 28, 64, 0, 0, 0, 0, 0, 0, 32, 64];
//! let point = decode(&bytes).unwrap();
//! assert_eq!(point.to_string(), "POINT(7 8)");
//!
//! // Build, encode and decode back
//! let line = GeometryBuilder::new(ByteOrder::BigEndian)
//!     .srid(4326)
//!     .line_string([(0.0, 0.0), (1.0, 1.0)]);
//! let encoded = encode(&line).unwrap();
//! assert_eq!(decode(&encoded).unwrap(), line);
//! assert_eq!(line.to_ewkt(), "SRID=4326;LINESTRING(0 0,1 1)");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Geometry values, headers and builders
//! - [`codec`]: Binary encoding/decoding
//! - [`wkt`]: WKT/EWKT rendering
//! - [`scan`]: Database column adapter (binary or hex in, EWKT out)
//! - [`error`]: Error types
//! - [`limits`]: Wire constants and decoder limits
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Declared counts are checked against the remaining bytes before allocating
//! - Collection nesting is bounded (see [`DecodeOptions`])
//! - Any truncated prefix of a valid value is rejected, never misread
//!
//! # Not supported
//!
//! Headers with the bounding-box flag are rejected on both paths, and WKT
//! text is only produced, never parsed.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod scan;
pub mod wkt;

// Re-export commonly used types at crate root
pub use codec::{
    decode, decode_as, decode_prefix, decode_with_options, encode, encode_hex, encoded_len,
    DecodeOptions,
};
pub use error::{DecodeError, EncodeError, ErrorKind};
pub use model::{
    ByteOrder, CollectionBuilder, Coord, Flags, Geometry, GeometryBuilder, GeometryCollection,
    GeometryType, Header, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
    Ring, Rings,
};
pub use scan::{scan, scan_nullable, Source};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
