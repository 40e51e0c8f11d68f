//! Database column adapter.
//!
//! Spatial databases hand geometry columns over either as raw EWKB bytes or
//! as the hex text PostGIS prints. [`scan`] accepts both; [`value`] produces
//! the EWKT text a driver binds as a parameter.

use tracing::trace;

use crate::codec::{decode, decode_as};
use crate::error::DecodeError;
use crate::model::{Geometry, GeometryType};

/// A column value as delivered by a database driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    /// Raw bytes. Bytes starting with ASCII `'0'` are taken to be hex text,
    /// since no binary EWKB value can start that way.
    Binary(&'a [u8]),
    /// Hex-encoded EWKB.
    Text(&'a str),
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Binary(bytes)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Text(text)
    }
}

impl Source<'_> {
    /// Returns the EWKB bytes, decoding hex when needed.
    fn into_bytes(self) -> Result<Vec<u8>, DecodeError> {
        match self {
            Source::Binary(bytes) if bytes.first() == Some(&b'0') => {
                trace!(len = bytes.len(), "binary source holds hex text");
                Ok(hex::decode(bytes)?)
            }
            Source::Binary(bytes) => Ok(bytes.to_vec()),
            Source::Text(text) => Ok(hex::decode(text)?),
        }
    }
}

/// Decodes a geometry from a column value.
pub fn scan(source: Source<'_>) -> Result<Geometry, DecodeError> {
    decode(&source.into_bytes()?)
}

/// Decodes a geometry from a column value that must hold the given kind.
pub fn scan_as(source: Source<'_>, expected: GeometryType) -> Result<Geometry, DecodeError> {
    decode_as(&source.into_bytes()?, expected)
}

/// Decodes a nullable column value. SQL `NULL` maps to `None`.
pub fn scan_nullable(source: Option<Source<'_>>) -> Result<Option<Geometry>, DecodeError> {
    source.map(scan).transpose()
}

/// Returns the EWKT text to bind for this geometry.
pub fn value(geometry: &Geometry) -> String {
    geometry.to_ewkt()
}
