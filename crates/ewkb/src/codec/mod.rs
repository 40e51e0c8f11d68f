//! Binary encoding/decoding for EWKB.
//!
//! This module implements the PostGIS extended well-known binary format:
//! a byte order marker, a type word carrying Z/M/SRID flags, an optional
//! SRID, then the payload for the geometry kind.

pub mod coords;
pub mod geometry;
pub mod header;
pub mod primitives;

pub use geometry::{
    decode, decode_as, decode_geometry, decode_prefix, decode_with_options, encode,
    encode_geometry, encode_hex, encoded_len, DecodeOptions,
};
pub use header::{read_header, write_header};
pub use primitives::{Reader, Writer};
