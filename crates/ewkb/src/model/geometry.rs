//! The geometry value model.
//!
//! [`Geometry`] is a closed sum over the seven EWKB kinds. Every variant owns
//! its header and its payload outright; values are immutable once built.
//!
//! Constructors normalize coordinates to the header's dimensions: an ordinate
//! whose flag is clear is reset to `0.0`, which is exactly what decoding the
//! encoded value would produce.

use crate::error::DecodeError;
use crate::model::{Coord, GeometryType, Header};

/// One ring of a polygon, or one line of a multi-line.
pub type Ring = Vec<Coord>;

/// The rings of one polygon: exterior first, holes after.
pub type Rings = Vec<Ring>;

fn normalize(header: &Header, coord: Coord) -> Coord {
    Coord {
        x: coord.x,
        y: coord.y,
        z: if header.has_z() { coord.z } else { 0.0 },
        m: if header.has_m() { coord.m } else { 0.0 },
    }
}

fn normalize_all(header: &Header, mut coords: Vec<Coord>) -> Vec<Coord> {
    if !(header.has_z() && header.has_m()) {
        for c in &mut coords {
            *c = normalize(header, *c);
        }
    }
    coords
}

fn normalize_rings(header: &Header, rings: Rings) -> Rings {
    rings.into_iter().map(|r| normalize_all(header, r)).collect()
}

macro_rules! header_accessors {
    () => {
        /// Returns this value's header.
        pub fn header(&self) -> &Header {
            &self.header
        }

        /// Returns the SRID, if the header carries one.
        pub fn srid(&self) -> Option<i32> {
            self.header.srid()
        }
    };
}

/// A single position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    header: Header,
    coord: Coord,
}

impl Point {
    pub fn new(header: Header, coord: Coord) -> Self {
        Self {
            coord: normalize(&header, coord),
            header,
        }
    }

    /// Creates the empty point (NaN coordinates).
    ///
    /// EWKB has no dedicated encoding for an empty point, so the NaN
    /// sentinel is what goes on the wire and what renders as `POINT EMPTY`.
    pub fn empty(header: Header) -> Self {
        Self::new(header, Coord::nan())
    }

    header_accessors!();

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn x(&self) -> f64 {
        self.coord.x
    }

    pub fn y(&self) -> f64 {
        self.coord.y
    }

    /// Returns z when the header has the Z flag.
    pub fn z(&self) -> Option<f64> {
        self.header.has_z().then_some(self.coord.z)
    }

    /// Returns m when the header has the M flag.
    pub fn m(&self) -> Option<f64> {
        self.header.has_m().then_some(self.coord.m)
    }

    pub fn is_empty(&self) -> bool {
        self.coord.is_empty()
    }
}

/// An ordered sequence of positions forming a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineString {
    header: Header,
    points: Vec<Coord>,
}

impl LineString {
    pub fn new(header: Header, points: Vec<Coord>) -> Self {
        Self {
            points: normalize_all(&header, points),
            header,
        }
    }

    header_accessors!();

    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A polygon: exterior ring followed by holes.
///
/// Ring closure and winding are not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    header: Header,
    rings: Rings,
}

impl Polygon {
    pub fn new(header: Header, rings: Rings) -> Self {
        Self {
            rings: normalize_rings(&header, rings),
            header,
        }
    }

    header_accessors!();

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// The first ring, if any.
    pub fn exterior(&self) -> Option<&Ring> {
        self.rings.first()
    }

    /// All rings after the first.
    pub fn interiors(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}

/// An unordered-in-meaning, ordered-on-the-wire set of positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiPoint {
    header: Header,
    points: Vec<Coord>,
}

impl MultiPoint {
    pub fn new(header: Header, points: Vec<Coord>) -> Self {
        Self {
            points: normalize_all(&header, points),
            header,
        }
    }

    header_accessors!();

    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiLineString {
    header: Header,
    lines: Vec<Ring>,
}

impl MultiLineString {
    pub fn new(header: Header, lines: Vec<Ring>) -> Self {
        Self {
            lines: normalize_rings(&header, lines),
            header,
        }
    }

    header_accessors!();

    pub fn lines(&self) -> &[Ring] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A sequence of polygons, each given as its rings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiPolygon {
    header: Header,
    polygons: Vec<Rings>,
}

impl MultiPolygon {
    pub fn new(header: Header, polygons: Vec<Rings>) -> Self {
        Self {
            polygons: polygons
                .into_iter()
                .map(|rings| normalize_rings(&header, rings))
                .collect(),
            header,
        }
    }

    header_accessors!();

    pub fn polygons(&self) -> &[Rings] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// A heterogeneous sequence of geometries.
///
/// Each child keeps its own header: byte order, dimensions and SRID may all
/// differ from the parent and from siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryCollection {
    header: Header,
    geometries: Vec<Geometry>,
}

impl GeometryCollection {
    pub fn new(header: Header, geometries: Vec<Geometry>) -> Self {
        Self { header, geometries }
    }

    header_accessors!();

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Geometry> {
        self.geometries.iter()
    }

    pub fn into_geometries(self) -> Vec<Geometry> {
        self.geometries
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }
}

impl<'a> IntoIterator for &'a GeometryCollection {
    type Item = &'a Geometry;
    type IntoIter = std::slice::Iter<'a, Geometry>;

    fn into_iter(self) -> Self::IntoIter {
        self.geometries.iter()
    }
}

/// Any EWKB geometry value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Returns the kind of this value.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Returns this value's header.
    pub fn header(&self) -> &Header {
        match self {
            Geometry::Point(g) => g.header(),
            Geometry::LineString(g) => g.header(),
            Geometry::Polygon(g) => g.header(),
            Geometry::MultiPoint(g) => g.header(),
            Geometry::MultiLineString(g) => g.header(),
            Geometry::MultiPolygon(g) => g.header(),
            Geometry::GeometryCollection(g) => g.header(),
        }
    }

    /// Returns the SRID, if the header carries one.
    pub fn srid(&self) -> Option<i32> {
        self.header().srid()
    }

    /// Returns true if the value has no coordinates, rings or members.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }
}

macro_rules! geometry_conversions {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Geometry {
                fn from(value: $variant) -> Self {
                    Geometry::$variant(value)
                }
            }

            impl TryFrom<Geometry> for $variant {
                type Error = DecodeError;

                fn try_from(value: Geometry) -> Result<Self, Self::Error> {
                    match value {
                        Geometry::$variant(g) => Ok(g),
                        other => Err(DecodeError::UnexpectedType {
                            expected: GeometryType::$variant,
                            found: other.geometry_type(),
                        }),
                    }
                }
            }
        )*
    };
}

geometry_conversions!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
);
