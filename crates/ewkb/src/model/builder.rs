//! Builder API for ergonomic geometry construction.
//!
//! Provides a fluent interface for building geometries from plain tuples.
//!
//! # Example
//!
//! ```rust
//! use ewkb::model::builder::GeometryBuilder;
//! use ewkb::ByteOrder;
//!
//! let collection = GeometryBuilder::new(ByteOrder::LittleEndian)
//!     .srid(4326)
//!     .collection(|c| c
//!         .point((1.0, 2.0))
//!         .line_string([(0.0, 0.0), (1.0, 1.0)])
//!     );
//!
//! assert_eq!(
//!     collection.to_string(),
//!     "SRID=4326;GEOMETRYCOLLECTION(POINT(1 2),LINESTRING(0 0,1 1))"
//! );
//! ```

use crate::model::{
    ByteOrder, Coord, Geometry, GeometryCollection, Header, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon, Ring, Rings,
};

fn coords<C: Into<Coord>>(points: impl IntoIterator<Item = C>) -> Vec<Coord> {
    points.into_iter().map(Into::into).collect()
}

fn rings<R, C>(rings: impl IntoIterator<Item = R>) -> Rings
where
    R: IntoIterator<Item = C>,
    C: Into<Coord>,
{
    rings.into_iter().map(coords).collect()
}

/// Builder for a single geometry value.
///
/// Collects header settings, then produces the value with one of the
/// terminal methods.
#[derive(Debug, Clone, Copy)]
pub struct GeometryBuilder {
    header: Header,
}

impl GeometryBuilder {
    /// Creates a new 2D builder without SRID.
    pub fn new(byte_order: ByteOrder) -> Self {
        Self {
            header: Header::new(byte_order),
        }
    }

    /// Starts from an existing header.
    pub fn with_header(header: Header) -> Self {
        Self { header }
    }

    /// Enables the Z dimension.
    pub fn z(mut self) -> Self {
        self.header = self.header.with_z();
        self
    }

    /// Enables the M dimension.
    pub fn m(mut self) -> Self {
        self.header = self.header.with_m();
        self
    }

    /// Attaches an SRID.
    pub fn srid(mut self, srid: i32) -> Self {
        self.header = self.header.with_srid(srid);
        self
    }

    /// Returns the header built so far.
    pub fn header(&self) -> Header {
        self.header
    }

    // =========================================================================
    // Terminal methods
    // =========================================================================

    pub fn point(self, coord: impl Into<Coord>) -> Geometry {
        Point::new(self.header, coord.into()).into()
    }

    /// Builds `POINT EMPTY` (NaN coordinates).
    pub fn empty_point(self) -> Geometry {
        Point::empty(self.header).into()
    }

    pub fn line_string<C: Into<Coord>>(self, points: impl IntoIterator<Item = C>) -> Geometry {
        LineString::new(self.header, coords(points)).into()
    }

    pub fn polygon<R, C>(self, polygon_rings: impl IntoIterator<Item = R>) -> Geometry
    where
        R: IntoIterator<Item = C>,
        C: Into<Coord>,
    {
        Polygon::new(self.header, rings(polygon_rings)).into()
    }

    pub fn multi_point<C: Into<Coord>>(self, points: impl IntoIterator<Item = C>) -> Geometry {
        MultiPoint::new(self.header, coords(points)).into()
    }

    pub fn multi_line_string<R, C>(self, lines: impl IntoIterator<Item = R>) -> Geometry
    where
        R: IntoIterator<Item = C>,
        C: Into<Coord>,
    {
        let lines: Vec<Ring> = rings(lines);
        MultiLineString::new(self.header, lines).into()
    }

    pub fn multi_polygon<P, R, C>(self, polygons: impl IntoIterator<Item = P>) -> Geometry
    where
        P: IntoIterator<Item = R>,
        R: IntoIterator<Item = C>,
        C: Into<Coord>,
    {
        let polygons = polygons.into_iter().map(rings).collect();
        MultiPolygon::new(self.header, polygons).into()
    }

    /// Builds a geometry collection using a builder function.
    ///
    /// Members added through the [`CollectionBuilder`] get their own plain
    /// header (same byte order, no SRID, the collection's dimensions).
    pub fn collection<F>(self, f: F) -> Geometry
    where
        F: FnOnce(CollectionBuilder) -> CollectionBuilder,
    {
        f(CollectionBuilder::new(self.header)).build().into()
    }
}

/// Builder for the members of a geometry collection.
#[derive(Debug, Clone)]
pub struct CollectionBuilder {
    header: Header,
    geometries: Vec<Geometry>,
}

impl CollectionBuilder {
    /// Creates an empty collection builder for the given collection header.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            geometries: Vec::new(),
        }
    }

    /// Header used for members added through the shorthand methods.
    fn member(&self) -> GeometryBuilder {
        GeometryBuilder::with_header(
            Header::new(self.header.byte_order())
                .with_dimensions(self.header.has_z(), self.header.has_m()),
        )
    }

    /// Adds an already-built member, keeping its header untouched.
    pub fn geometry(mut self, geometry: impl Into<Geometry>) -> Self {
        self.geometries.push(geometry.into());
        self
    }

    /// Adds several already-built members.
    pub fn geometries(mut self, geometries: impl IntoIterator<Item = Geometry>) -> Self {
        self.geometries.extend(geometries);
        self
    }

    pub fn point(self, coord: impl Into<Coord>) -> Self {
        let g = self.member().point(coord);
        self.geometry(g)
    }

    pub fn line_string<C: Into<Coord>>(self, points: impl IntoIterator<Item = C>) -> Self {
        let g = self.member().line_string(points);
        self.geometry(g)
    }

    pub fn polygon<R, C>(self, polygon_rings: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = C>,
        C: Into<Coord>,
    {
        let g = self.member().polygon(polygon_rings);
        self.geometry(g)
    }

    /// Adds a nested collection built by `f`.
    pub fn collection<F>(self, f: F) -> Self
    where
        F: FnOnce(CollectionBuilder) -> CollectionBuilder,
    {
        let g = self.member().collection(f);
        self.geometry(g)
    }

    /// Finishes the collection.
    pub fn build(self) -> GeometryCollection {
        GeometryCollection::new(self.header, self.geometries)
    }
}
