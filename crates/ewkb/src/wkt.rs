//! WKT/EWKT rendering.
//!
//! Output follows the PostGIS EWKT convention: an optional `SRID=n;` prefix,
//! the type keyword with an `M` suffix only for measured 2D values, then
//! either ` EMPTY` or a parenthesized list with no spaces after commas.
//!
//! ```
//! use ewkb::{ByteOrder, Coord, GeometryBuilder};
//!
//! let geom = GeometryBuilder::new(ByteOrder::LittleEndian)
//!     .m()
//!     .multi_point([Coord::xym(1.0, 3.0, 7.0), Coord::xym(2.0, 4.0, 5.0)]);
//! assert_eq!(geom.to_string(), "MULTIPOINTM(1 3 7,2 4 5)");
//! ```

use std::fmt::{self, Write};

use crate::model::{
    Coord, Geometry, GeometryCollection, GeometryType, Header, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon, Ring, Rings,
};

impl Geometry {
    /// Renders the value as EWKT, including the `SRID=n;` prefix if present.
    pub fn to_ewkt(&self) -> String {
        self.to_string()
    }

    /// Renders the value as plain WKT, without the outer SRID prefix.
    pub fn to_wkt(&self) -> String {
        let mut out = String::new();
        write_geometry(&mut out, self, false).expect("writing to a String cannot fail");
        out
    }
}

fn write_prefix<W: Write>(
    out: &mut W,
    header: &Header,
    geometry_type: GeometryType,
    with_srid: bool,
) -> fmt::Result {
    if let Some(srid) = header.srid().filter(|_| with_srid) {
        write!(out, "SRID={srid};")?;
    }
    out.write_str(geometry_type.keyword())?;
    if header.has_m() && !header.has_z() {
        out.write_char('M')?;
    }
    Ok(())
}

fn write_coord<W: Write>(out: &mut W, coord: &Coord, header: &Header) -> fmt::Result {
    write!(out, "{} {}", coord.x, coord.y)?;
    if header.has_z() {
        write!(out, " {}", coord.z)?;
    }
    if header.has_m() {
        write!(out, " {}", coord.m)?;
    }
    Ok(())
}

/// Writes `(a,b,...)`, or `EMPTY` for a nested empty sequence.
fn write_list<W, T, F>(out: &mut W, items: &[T], mut item: F) -> fmt::Result
where
    W: Write,
    F: FnMut(&mut W, &T) -> fmt::Result,
{
    if items.is_empty() {
        return out.write_str("EMPTY");
    }
    out.write_char('(')?;
    for (i, value) in items.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        item(out, value)?;
    }
    out.write_char(')')
}

fn write_ring<W: Write>(out: &mut W, ring: &Ring, header: &Header) -> fmt::Result {
    write_list(out, &ring[..], |out, c| write_coord(out, c, header))
}

fn write_rings<W: Write>(out: &mut W, rings: &Rings, header: &Header) -> fmt::Result {
    write_list(out, &rings[..], |out, r| write_ring(out, r, header))
}

/// Writes the top-level body: ` EMPTY` when there is nothing, else the list.
fn write_body<W, T, F>(out: &mut W, items: &[T], item: F) -> fmt::Result
where
    W: Write,
    F: FnMut(&mut W, &T) -> fmt::Result,
{
    if items.is_empty() {
        return out.write_str(" EMPTY");
    }
    write_list(out, items, item)
}

fn write_point<W: Write>(out: &mut W, point: &Point, with_srid: bool) -> fmt::Result {
    let header = point.header();
    write_prefix(out, header, GeometryType::Point, with_srid)?;
    if point.is_empty() {
        return out.write_str(" EMPTY");
    }
    out.write_char('(')?;
    write_coord(out, &point.coord(), header)?;
    out.write_char(')')
}

fn write_line_string<W: Write>(out: &mut W, line: &LineString, with_srid: bool) -> fmt::Result {
    let header = line.header();
    write_prefix(out, header, GeometryType::LineString, with_srid)?;
    write_body(out, line.points(), |out, c| write_coord(out, c, header))
}

fn write_polygon<W: Write>(out: &mut W, polygon: &Polygon, with_srid: bool) -> fmt::Result {
    let header = polygon.header();
    write_prefix(out, header, GeometryType::Polygon, with_srid)?;
    write_body(out, polygon.rings(), |out, r| write_ring(out, r, header))
}

fn write_multi_point<W: Write>(out: &mut W, multi: &MultiPoint, with_srid: bool) -> fmt::Result {
    let header = multi.header();
    write_prefix(out, header, GeometryType::MultiPoint, with_srid)?;
    write_body(out, multi.points(), |out, c| write_coord(out, c, header))
}

fn write_multi_line_string<W: Write>(
    out: &mut W,
    multi: &MultiLineString,
    with_srid: bool,
) -> fmt::Result {
    let header = multi.header();
    write_prefix(out, header, GeometryType::MultiLineString, with_srid)?;
    write_body(out, multi.lines(), |out, r| write_ring(out, r, header))
}

fn write_multi_polygon<W: Write>(
    out: &mut W,
    multi: &MultiPolygon,
    with_srid: bool,
) -> fmt::Result {
    let header = multi.header();
    write_prefix(out, header, GeometryType::MultiPolygon, with_srid)?;
    write_body(out, multi.polygons(), |out, p| write_rings(out, p, header))
}

fn write_collection<W: Write>(
    out: &mut W,
    collection: &GeometryCollection,
    with_srid: bool,
) -> fmt::Result {
    write_prefix(out, collection.header(), GeometryType::GeometryCollection, with_srid)?;
    // Members never repeat an SRID; only the outermost prefix is kept.
    write_body(out, collection.geometries(), |out, g| write_geometry(out, g, false))
}

fn write_geometry<W: Write>(out: &mut W, geometry: &Geometry, with_srid: bool) -> fmt::Result {
    match geometry {
        Geometry::Point(g) => write_point(out, g, with_srid),
        Geometry::LineString(g) => write_line_string(out, g, with_srid),
        Geometry::Polygon(g) => write_polygon(out, g, with_srid),
        Geometry::MultiPoint(g) => write_multi_point(out, g, with_srid),
        Geometry::MultiLineString(g) => write_multi_line_string(out, g, with_srid),
        Geometry::MultiPolygon(g) => write_multi_polygon(out, g, with_srid),
        Geometry::GeometryCollection(g) => write_collection(out, g, with_srid),
    }
}

macro_rules! impl_display {
    ($($ty:ty => $writer:ident),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    $writer(f, self, true)
                }
            }
        )*
    };
}

impl_display!(
    Geometry => write_geometry,
    Point => write_point,
    LineString => write_line_string,
    Polygon => write_polygon,
    MultiPoint => write_multi_point,
    MultiLineString => write_multi_line_string,
    MultiPolygon => write_multi_polygon,
    GeometryCollection => write_collection,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ByteOrder;

    fn header() -> Header {
        Header::new(ByteOrder::LittleEndian)
    }

    #[test]
    fn test_point_dimensions() {
        let cases = [
            ("xy", Point::new(header(), Coord::xy(6.0, 5.0)), "POINT(6 5)"),
            ("xyz", Point::new(header().with_z(), Coord::xyz(6.0, 5.0, 4.0)), "POINT(6 5 4)"),
            ("xym", Point::new(header().with_m(), Coord::xym(6.0, 5.0, 4.0)), "POINTM(6 5 4)"),
            (
                "xyzm",
                Point::new(header().with_z().with_m(), Coord::xyzm(6.0, 5.0, 4.0, 3.0)),
                "POINT(6 5 4 3)",
            ),
            (
                "srid",
                Point::new(header().with_srid(4321), Coord::xy(6.0, 5.0)),
                "SRID=4321;POINT(6 5)",
            ),
        ];
        for (name, point, expected) in cases {
            assert_eq!(point.to_string(), expected, "{name}");
        }
    }

    #[test]
    fn test_empty_point() {
        assert_eq!(Point::empty(header()).to_string(), "POINT EMPTY");
        assert_eq!(Point::empty(header().with_m()).to_string(), "POINTM EMPTY");
    }

    #[test]
    fn test_number_formatting() {
        let point = Point::new(header(), Coord::xy(-44.3, 60.1));
        assert_eq!(point.to_string(), "POINT(-44.3 60.1)");

        let point = Point::new(header(), Coord::xy(0.1 + 0.2, 1e-7));
        assert_eq!(point.to_string(), "POINT(0.30000000000000004 0.0000001)");
    }

    #[test]
    fn test_multi_point() {
        let multi = MultiPoint::new(
            header().with_srid(4326),
            vec![Coord::xy(1.0, 3.0), Coord::xy(2.0, 4.0)],
        );
        assert_eq!(multi.to_string(), "SRID=4326;MULTIPOINT(1 3,2 4)");

        let multi = MultiPoint::new(
            header().with_z().with_m(),
            vec![Coord::xyzm(1.0, 3.0, 7.0, 2.0), Coord::xyzm(2.0, 4.0, 5.0, 0.0)],
        );
        assert_eq!(multi.to_string(), "MULTIPOINT(1 3 7 2,2 4 5 0)");
    }

    #[test]
    fn test_empty_composites() {
        assert_eq!(LineString::new(header(), vec![]).to_string(), "LINESTRING EMPTY");
        assert_eq!(Polygon::new(header(), vec![]).to_string(), "POLYGON EMPTY");
        assert_eq!(
            MultiLineString::new(header(), vec![]).to_string(),
            "MULTILINESTRING EMPTY"
        );
        assert_eq!(MultiPolygon::new(header().with_m(), vec![]).to_string(), "MULTIPOLYGONM EMPTY");
        assert_eq!(
            GeometryCollection::new(header(), vec![]).to_string(),
            "GEOMETRYCOLLECTION EMPTY"
        );
    }

    #[test]
    fn test_polygon_and_multi_polygon() {
        let ring = vec![
            Coord::xy(0.0, 0.0),
            Coord::xy(4.0, 0.0),
            Coord::xy(4.0, 4.0),
            Coord::xy(0.0, 0.0),
        ];
        let hole = vec![Coord::xy(1.0, 1.0), Coord::xy(2.0, 1.0), Coord::xy(1.0, 1.0)];

        let polygon = Polygon::new(header(), vec![ring.clone(), hole.clone()]);
        assert_eq!(polygon.to_string(), "POLYGON((0 0,4 0,4 4,0 0),(1 1,2 1,1 1))");

        let multi = MultiPolygon::new(header(), vec![vec![ring], vec![hole], vec![]]);
        assert_eq!(
            multi.to_string(),
            "MULTIPOLYGON(((0 0,4 0,4 4,0 0)),((1 1,2 1,1 1)),EMPTY)"
        );
    }

    #[test]
    fn test_multi_line_string() {
        let multi = MultiLineString::new(
            header().with_m(),
            vec![vec![Coord::xym(0.0, 0.0, 1.0), Coord::xym(1.0, 1.0, 2.0)], vec![]],
        );
        assert_eq!(multi.to_string(), "MULTILINESTRINGM((0 0 1,1 1 2),EMPTY)");
    }

    #[test]
    fn test_collection_strips_member_srid() {
        let point: Geometry =
            Point::new(header().with_srid(4326), Coord::xy(1.0, 2.0)).into();
        let line: Geometry = LineString::new(
            Header::new(ByteOrder::BigEndian).with_srid(3857),
            vec![Coord::xy(0.0, 0.0), Coord::xy(1.0, 1.0)],
        )
        .into();
        let inner: Geometry =
            GeometryCollection::new(header().with_srid(1), vec![point.clone()]).into();
        let gc: Geometry =
            GeometryCollection::new(header().with_srid(4326), vec![point, line, inner]).into();

        assert_eq!(
            gc.to_ewkt(),
            "SRID=4326;GEOMETRYCOLLECTION(POINT(1 2),LINESTRING(0 0,1 1),GEOMETRYCOLLECTION(POINT(1 2)))"
        );
        assert_eq!(
            gc.to_wkt(),
            "GEOMETRYCOLLECTION(POINT(1 2),LINESTRING(0 0,1 1),GEOMETRYCOLLECTION(POINT(1 2)))"
        );
    }

    #[test]
    fn test_geometry_and_variant_agree() {
        let line = LineString::new(header().with_srid(7), vec![Coord::xy(1.5, 2.5)]);
        let geom = Geometry::from(line.clone());
        assert_eq!(geom.to_string(), line.to_string());
        assert_eq!(geom.to_ewkt(), "SRID=7;LINESTRING(1.5 2.5)");
        assert_eq!(geom.to_wkt(), "LINESTRING(1.5 2.5)");
    }
}
