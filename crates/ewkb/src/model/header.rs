//! Header types shared by every geometry value.
//!
//! An EWKB value starts with a byte-order marker, a 32-bit word holding the
//! geometry type in its low 16 bits and four flag bits at the top, and an
//! optional SRID.

use std::fmt;

/// Byte order of one geometry value's binary encoding.
///
/// EWKB allows every nested value to pick its own byte order, so this is
/// stored per header rather than fixed for a whole buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ByteOrder {
    /// XDR, big-endian (`0x00`).
    BigEndian = 0x00,
    /// NDR, little-endian (`0x01`).
    #[default]
    LittleEndian = 0x01,
}

impl ByteOrder {
    /// Creates a ByteOrder from its wire marker.
    pub fn from_u8(v: u8) -> Option<ByteOrder> {
        match v {
            0x00 => Some(ByteOrder::BigEndian),
            0x01 => Some(ByteOrder::LittleEndian),
            _ => None,
        }
    }

    /// Returns the wire marker.
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Geometry kinds (type codes 1..7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum GeometryType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
}

impl GeometryType {
    /// Creates a GeometryType from its type code (flags already masked off).
    pub fn from_u32(v: u32) -> Option<GeometryType> {
        match v {
            1 => Some(GeometryType::Point),
            2 => Some(GeometryType::LineString),
            3 => Some(GeometryType::Polygon),
            4 => Some(GeometryType::MultiPoint),
            5 => Some(GeometryType::MultiLineString),
            6 => Some(GeometryType::MultiPolygon),
            7 => Some(GeometryType::GeometryCollection),
            _ => None,
        }
    }

    /// Returns the type code.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Returns the WKT keyword for this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Flag bits of the type word.
///
/// Only the top four bits are ever set; the type code lives in the low 16
/// bits of the wire word and is kept out of this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u32);

impl Flags {
    pub const Z: u32 = 0x8000_0000;
    pub const M: u32 = 0x4000_0000;
    pub const SRID: u32 = 0x2000_0000;
    pub const BBOX: u32 = 0x1000_0000;

    const MASK: u32 = Self::Z | Self::M | Self::SRID | Self::BBOX;

    /// No flags set: a plain XY value without SRID.
    pub const fn empty() -> Self {
        Flags(0)
    }

    /// Extracts the flag bits from a full type word, ignoring everything else.
    pub const fn from_bits(word: u32) -> Self {
        Flags(word & Self::MASK)
    }

    /// Returns the raw flag bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn has_z(self) -> bool {
        self.0 & Self::Z != 0
    }

    pub const fn has_m(self) -> bool {
        self.0 & Self::M != 0
    }

    pub const fn has_srid(self) -> bool {
        self.0 & Self::SRID != 0
    }

    pub const fn has_bbox(self) -> bool {
        self.0 & Self::BBOX != 0
    }

    pub const fn with_z(self, on: bool) -> Self {
        self.with(Self::Z, on)
    }

    pub const fn with_m(self, on: bool) -> Self {
        self.with(Self::M, on)
    }

    pub const fn with_srid(self, on: bool) -> Self {
        self.with(Self::SRID, on)
    }

    pub const fn with_bbox(self, on: bool) -> Self {
        self.with(Self::BBOX, on)
    }

    /// Number of ordinates per coordinate: 2 + Z + M.
    pub const fn dimensions(self) -> usize {
        2 + self.has_z() as usize + self.has_m() as usize
    }

    const fn with(self, bit: u32, on: bool) -> Self {
        if on { Flags(self.0 | bit) } else { Flags(self.0 & !bit) }
    }
}

/// Per-value header: byte order, dimension/SRID flags and the SRID itself.
///
/// The geometry type is not part of the header; it is implied by the
/// [`Geometry`](crate::Geometry) variant that owns the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Header {
    byte_order: ByteOrder,
    flags: Flags,
    srid: i32,
}

impl Header {
    /// Creates a 2D header without SRID.
    pub fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            flags: Flags::empty(),
            srid: 0,
        }
    }

    /// Creates a header from its decoded parts.
    ///
    /// The SRID is kept only when the SRID flag is set.
    pub fn from_parts(byte_order: ByteOrder, flags: Flags, srid: i32) -> Self {
        let srid = if flags.has_srid() { srid } else { 0 };
        Self {
            byte_order,
            flags,
            srid,
        }
    }

    /// Sets the Z flag.
    pub fn with_z(mut self) -> Self {
        self.flags = self.flags.with_z(true);
        self
    }

    /// Sets the M flag.
    pub fn with_m(mut self) -> Self {
        self.flags = self.flags.with_m(true);
        self
    }

    /// Sets both dimension flags at once.
    pub fn with_dimensions(mut self, has_z: bool, has_m: bool) -> Self {
        self.flags = self.flags.with_z(has_z).with_m(has_m);
        self
    }

    /// Attaches an SRID.
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.flags = self.flags.with_srid(true);
        self.srid = srid;
        self
    }

    /// Removes the SRID.
    pub fn without_srid(mut self) -> Self {
        self.flags = self.flags.with_srid(false);
        self.srid = 0;
        self
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn has_z(&self) -> bool {
        self.flags.has_z()
    }

    pub fn has_m(&self) -> bool {
        self.flags.has_m()
    }

    pub fn has_srid(&self) -> bool {
        self.flags.has_srid()
    }

    pub fn has_bbox(&self) -> bool {
        self.flags.has_bbox()
    }

    /// Returns the SRID, or None when the SRID flag is clear.
    pub fn srid(&self) -> Option<i32> {
        self.has_srid().then_some(self.srid)
    }

    /// Returns the SRID, or zero when absent.
    pub fn raw_srid(&self) -> i32 {
        self.srid
    }

    /// Builds the full type word for the given geometry kind.
    pub fn type_word(&self, geometry_type: GeometryType) -> u32 {
        self.flags.bits() | geometry_type.code()
    }
}
