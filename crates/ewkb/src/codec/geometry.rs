//! Geometry encoding/decoding for the EWKB binary format.
//!
//! Dispatches on the geometry kind to the coordinate codecs and recurses for
//! collection members, each of which starts with its own full header.

use tracing::{debug, trace};

use crate::codec::coords::{
    coord_len, coords_len, polygons_len, read_coord, read_coords, read_polygons, read_rings,
    rings_len, write_coord, write_coords, write_polygons, write_rings,
};
use crate::codec::header::{header_len, read_header, write_header};
use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{COUNT_LEN, HEADER_LEN, MAX_NESTING_DEPTH, MAX_SEQUENCE_LEN};
use crate::model::{
    Geometry, GeometryCollection, GeometryType, Header, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Ring, Rings,
};

// =============================================================================
// DECODING
// =============================================================================

/// Options for decoding.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Maximum number of nested collection levels.
    ///
    /// A top-level collection uses one level, a collection inside it a
    /// second, and so on. Zero rejects collections entirely.
    pub max_depth: usize,

    /// Accept bytes after the end of the top-level geometry.
    ///
    /// When disabled (the default), [`decode_with_options`] fails with
    /// [`DecodeError::TrailingBytes`] if the input is longer than the value.
    pub allow_trailing_bytes: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_NESTING_DEPTH,
            allow_trailing_bytes: false,
        }
    }
}

impl DecodeOptions {
    /// Creates default decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum collection nesting depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Accepts trailing bytes after the geometry.
    pub fn allow_trailing_bytes(mut self) -> Self {
        self.allow_trailing_bytes = true;
        self
    }
}

/// Decodes a geometry from a buffer holding exactly one EWKB value.
pub fn decode(input: &[u8]) -> Result<Geometry, DecodeError> {
    decode_with_options(input, DecodeOptions::default())
}

/// Decodes a geometry with explicit options.
pub fn decode_with_options(input: &[u8], options: DecodeOptions) -> Result<Geometry, DecodeError> {
    let mut reader = Reader::new(input);
    let geometry = decode_geometry(&mut reader, 0, &options)?;

    if !options.allow_trailing_bytes && !reader.is_empty() {
        return Err(DecodeError::TrailingBytes {
            consumed: reader.position(),
            trailing: reader.remaining_len(),
        });
    }

    debug!(
        geometry_type = %geometry.geometry_type(),
        flags = geometry.header().flags().bits(),
        bytes = reader.position(),
        "decoded EWKB geometry"
    );
    Ok(geometry)
}

/// Decodes the geometry at the start of `input`, returning it together with
/// the number of bytes it occupied. Trailing bytes are left alone.
pub fn decode_prefix(input: &[u8]) -> Result<(Geometry, usize), DecodeError> {
    let mut reader = Reader::new(input);
    let geometry = decode_geometry(&mut reader, 0, &DecodeOptions::default())?;
    Ok((geometry, reader.position()))
}

/// Decodes a geometry that must be of the given kind.
///
/// The kind is checked from the header before the payload is read.
pub fn decode_as(input: &[u8], expected: GeometryType) -> Result<Geometry, DecodeError> {
    let (found, _) = read_header(&mut Reader::new(input))?;
    if found != expected {
        return Err(DecodeError::UnexpectedType { expected, found });
    }
    decode(input)
}

/// Decodes one complete geometry (header and payload) from the reader.
///
/// `depth` is the number of collections enclosing this value.
pub fn decode_geometry(
    reader: &mut Reader<'_>,
    depth: usize,
    options: &DecodeOptions,
) -> Result<Geometry, DecodeError> {
    let (geometry_type, header) = read_header(reader)?;
    decode_body(reader, geometry_type, header, depth, options)
}

fn decode_body(
    reader: &mut Reader<'_>,
    geometry_type: GeometryType,
    header: Header,
    depth: usize,
    options: &DecodeOptions,
) -> Result<Geometry, DecodeError> {
    let order = header.byte_order();
    let flags = header.flags();

    let geometry = match geometry_type {
        GeometryType::Point => Point::new(header, read_coord(reader, order, flags)?).into(),
        GeometryType::LineString => {
            LineString::new(header, read_coords(reader, order, flags, "point count")?).into()
        }
        GeometryType::Polygon => {
            Polygon::new(header, read_rings(reader, order, flags, "ring count")?).into()
        }
        GeometryType::MultiPoint => {
            MultiPoint::new(header, read_coords(reader, order, flags, "point count")?).into()
        }
        GeometryType::MultiLineString => {
            MultiLineString::new(header, read_rings(reader, order, flags, "line count")?).into()
        }
        GeometryType::MultiPolygon => {
            MultiPolygon::new(header, read_polygons(reader, order, flags)?).into()
        }
        GeometryType::GeometryCollection => {
            decode_collection(reader, header, depth, options)?.into()
        }
    };
    Ok(geometry)
}

fn decode_collection(
    reader: &mut Reader<'_>,
    header: Header,
    depth: usize,
    options: &DecodeOptions,
) -> Result<GeometryCollection, DecodeError> {
    if depth >= options.max_depth {
        return Err(DecodeError::NestingTooDeep {
            max: options.max_depth,
        });
    }

    let count = reader.read_u32(header.byte_order(), "geometry count")? as usize;
    let capacity = count.min(reader.remaining_len() / HEADER_LEN);
    let mut geometries = Vec::with_capacity(capacity);

    for index in 0..count {
        let start = reader.position();
        let member = decode_geometry(reader, depth + 1, options)?;
        trace!(
            depth,
            index,
            offset = start,
            geometry_type = %member.geometry_type(),
            "decoded collection member"
        );
        geometries.push(member);
    }

    Ok(GeometryCollection::new(header, geometries))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a geometry into a new, exactly sized buffer.
pub fn encode(geometry: &Geometry) -> Result<Vec<u8>, EncodeError> {
    validate_geometry(geometry, 0)?;

    let len = encoded_len(geometry);
    let mut writer = Writer::with_capacity(len);
    let written = write_geometry(&mut writer, geometry);
    debug_assert_eq!(written, len);
    debug_assert_eq!(writer.len(), len);

    debug!(
        geometry_type = %geometry.geometry_type(),
        flags = geometry.header().flags().bits(),
        bytes = len,
        "encoded EWKB geometry"
    );
    Ok(writer.into_bytes())
}

/// Encodes a geometry as upper-case hex, the textual form PostGIS emits.
pub fn encode_hex(geometry: &Geometry) -> Result<String, EncodeError> {
    Ok(hex::encode_upper(encode(geometry)?))
}

/// Appends a geometry to an existing writer and returns the bytes appended.
pub fn encode_geometry(writer: &mut Writer, geometry: &Geometry) -> Result<usize, EncodeError> {
    validate_geometry(geometry, 0)?;
    Ok(write_geometry(writer, geometry))
}

/// Exact number of bytes [`encode`] produces for this geometry.
pub fn encoded_len(geometry: &Geometry) -> usize {
    header_len(geometry.header()) + body_len(geometry)
}

fn body_len(geometry: &Geometry) -> usize {
    let flags = geometry.header().flags();
    match geometry {
        Geometry::Point(_) => coord_len(flags),
        Geometry::LineString(g) => coords_len(g.points(), flags),
        Geometry::Polygon(g) => rings_len(g.rings(), flags),
        Geometry::MultiPoint(g) => coords_len(g.points(), flags),
        Geometry::MultiLineString(g) => rings_len(g.lines(), flags),
        Geometry::MultiPolygon(g) => polygons_len(g.polygons(), flags),
        Geometry::GeometryCollection(g) => {
            COUNT_LEN + g.iter().map(encoded_len).sum::<usize>()
        }
    }
}

fn write_geometry(writer: &mut Writer, geometry: &Geometry) -> usize {
    let header = geometry.header();
    let order = header.byte_order();
    let flags = header.flags();

    write_header(writer, geometry.geometry_type(), header);
    let body = match geometry {
        Geometry::Point(g) => write_coord(writer, &g.coord(), order, flags),
        Geometry::LineString(g) => write_coords(writer, g.points(), order, flags),
        Geometry::Polygon(g) => write_rings(writer, g.rings(), order, flags),
        Geometry::MultiPoint(g) => write_coords(writer, g.points(), order, flags),
        Geometry::MultiLineString(g) => write_rings(writer, g.lines(), order, flags),
        Geometry::MultiPolygon(g) => write_polygons(writer, g.polygons(), order, flags),
        Geometry::GeometryCollection(g) => {
            writer.write_u32(g.len() as u32, order);
            COUNT_LEN
                + g.iter()
                    .map(|member| write_geometry(writer, member))
                    .sum::<usize>()
        }
    };
    header_len(header) + body
}

// =============================================================================
// VALIDATION
// =============================================================================

fn check_len(field: &'static str, len: usize) -> Result<(), EncodeError> {
    if len > MAX_SEQUENCE_LEN {
        return Err(EncodeError::LengthExceedsLimit {
            field,
            len,
            max: MAX_SEQUENCE_LEN,
        });
    }
    Ok(())
}

fn check_rings(field: &'static str, rings: &[Ring]) -> Result<(), EncodeError> {
    check_len(field, rings.len())?;
    for ring in rings {
        check_len("points", ring.len())?;
    }
    Ok(())
}

fn check_polygons(polygons: &[Rings]) -> Result<(), EncodeError> {
    check_len("polygons", polygons.len())?;
    for rings in polygons {
        check_rings("rings", rings)?;
    }
    Ok(())
}

/// Checks everything that could make the encoder emit a buffer [`decode`]
/// refuses. `depth` counts the collections enclosing this value.
fn validate_geometry(geometry: &Geometry, depth: usize) -> Result<(), EncodeError> {
    if geometry.header().has_bbox() {
        return Err(EncodeError::BoundingBoxUnsupported {
            geometry_type: geometry.geometry_type(),
        });
    }

    match geometry {
        Geometry::Point(_) => Ok(()),
        Geometry::LineString(g) => check_len("points", g.len()),
        Geometry::Polygon(g) => check_rings("rings", g.rings()),
        Geometry::MultiPoint(g) => check_len("points", g.len()),
        Geometry::MultiLineString(g) => check_rings("lines", g.lines()),
        Geometry::MultiPolygon(g) => check_polygons(g.polygons()),
        Geometry::GeometryCollection(g) => {
            if depth >= MAX_NESTING_DEPTH {
                return Err(EncodeError::NestingTooDeep {
                    max: MAX_NESTING_DEPTH,
                });
            }
            check_len("geometries", g.len())?;
            g.iter().try_for_each(|member| validate_geometry(member, depth + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{ByteOrder, Coord, Flags};

    const POINT_7_8: [u8; 21] = [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 28, 64, 0, 0, 0, 0, 0, 0, 32, 64];

    fn le() -> Header {
        Header::new(ByteOrder::LittleEndian)
    }

    #[test]
    fn test_decode_point() {
        let geom = decode(&POINT_7_8).unwrap();
        assert_eq!(geom, Point::new(le(), Coord::xy(7.0, 8.0)).into());
    }

    #[test]
    fn test_decode_point_variants() {
        let cases: Vec<(&str, Vec<u8>, Geometry)> = vec![
            (
                "with Z dimension",
                vec![
                    1, 1, 0, 0, 128, 102, 102, 102, 102, 102, 38, 70, 192, 205, 204, 204, 204,
                    204, 12, 78, 64, 0, 0, 0, 0, 0, 160, 69, 64,
                ],
                Point::new(le().with_z(), Coord::xyz(-44.3, 60.1, 43.25)).into(),
            ),
            (
                "with M dimension",
                vec![
                    1, 1, 0, 0, 64, 0, 0, 0, 0, 0, 0, 28, 64, 0, 0, 0, 0, 0, 0, 32, 64, 0, 0, 0,
                    0, 0, 0, 34, 64,
                ],
                Point::new(le().with_m(), Coord::xym(7.0, 8.0, 9.0)).into(),
            ),
            (
                "with Z and M dimension",
                vec![
                    1, 1, 0, 0, 192, 0, 0, 0, 0, 0, 0, 240, 63, 0, 0, 0, 0, 0, 0, 0, 64, 0, 0, 0,
                    0, 0, 0, 8, 64, 0, 0, 0, 0, 0, 0, 16, 64,
                ],
                Point::new(le().with_z().with_m(), Coord::xyzm(1.0, 2.0, 3.0, 4.0)).into(),
            ),
            (
                "with SRID",
                vec![
                    1, 1, 0, 0, 32, 230, 16, 0, 0, 102, 102, 102, 102, 102, 38, 70, 192, 205,
                    204, 204, 204, 204, 12, 78, 64,
                ],
                Point::new(le().with_srid(4326), Coord::xy(-44.3, 60.1)).into(),
            ),
        ];

        for (name, data, expected) in cases {
            let decoded = decode(&data).unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(decoded, expected, "{name}");
            assert_eq!(encode(&expected).unwrap(), data, "{name}");
        }
    }

    #[test]
    fn test_decode_big_endian_point() {
        let data = [0u8, 0, 0, 0, 1, 64, 28, 0, 0, 0, 0, 0, 0, 64, 32, 0, 0, 0, 0, 0, 0];
        let geom = decode(&data).unwrap();
        let point = Point::try_from(geom).unwrap();
        assert_eq!(point.header().byte_order(), ByteOrder::BigEndian);
        assert_eq!(point.coord(), Coord::xy(7.0, 8.0));
    }

    #[test]
    fn test_decode_line_string() {
        // LINESTRING(1 2, 3 4), little-endian
        let data = [
            1u8, 2, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 240, 63, 0, 0, 0, 0, 0, 0, 0, 64, 0, 0,
            0, 0, 0, 0, 8, 64, 0, 0, 0, 0, 0, 0, 16, 64,
        ];
        let geom = decode(&data).unwrap();
        let line = LineString::try_from(geom).unwrap();
        assert_eq!(line.points(), &[Coord::xy(1.0, 2.0), Coord::xy(3.0, 4.0)]);
    }

    #[test]
    fn test_decode_empty_line_string() {
        let data = [1u8, 2, 0, 0, 0, 0, 0, 0, 0];
        let geom = decode(&data).unwrap();
        assert!(geom.is_empty());
        assert_eq!(geom.geometry_type(), GeometryType::LineString);
    }

    #[test]
    fn test_decode_collection_members_own_headers() {
        let inner: Geometry = Point::new(
            Header::new(ByteOrder::BigEndian).with_z().with_srid(3857),
            Coord::xyz(1.0, 2.0, 3.0),
        )
        .into();
        let line: Geometry = LineString::new(le().with_m(), vec![Coord::xym(5.0, 6.0, 7.0)]).into();
        let gc: Geometry = GeometryCollection::new(le().with_srid(4326), vec![inner, line]).into();

        let bytes = encode(&gc).unwrap();
        assert_eq!(bytes.len(), encoded_len(&gc));
        assert_eq!(decode(&bytes).unwrap(), gc);
    }

    #[test]
    fn test_nested_collection_roundtrip() {
        let leaf: Geometry = Point::new(le(), Coord::xy(1.0, 1.0)).into();
        let mut geom = leaf;
        for _ in 0..5 {
            geom = GeometryCollection::new(Header::new(ByteOrder::BigEndian), vec![geom]).into();
        }
        let bytes = encode(&geom).unwrap();
        assert_eq!(decode(&bytes).unwrap(), geom);
    }

    #[test]
    fn test_nesting_limit() {
        let mut geom: Geometry = GeometryCollection::new(le(), vec![]).into();
        for _ in 0..3 {
            geom = GeometryCollection::new(le(), vec![geom]).into();
        }
        let bytes = encode(&geom).unwrap();

        assert!(decode_with_options(&bytes, DecodeOptions::new().max_depth(4)).is_ok());
        let err = decode_with_options(&bytes, DecodeOptions::new().max_depth(3)).unwrap_err();
        assert_eq!(err, DecodeError::NestingTooDeep { max: 3 });
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn test_encode_nesting_limit_matches_decoder() {
        let nest = |levels: usize| {
            let mut geom: Geometry = GeometryCollection::new(le(), vec![]).into();
            for _ in 1..levels {
                geom = GeometryCollection::new(le(), vec![geom]).into();
            }
            geom
        };

        // deepest value the default decoder accepts
        let deepest = nest(MAX_NESTING_DEPTH);
        let bytes = encode(&deepest).unwrap();
        assert_eq!(decode(&bytes).unwrap(), deepest);

        let too_deep = nest(MAX_NESTING_DEPTH + 1);
        let err = encode(&too_deep).unwrap_err();
        assert_eq!(err, EncodeError::NestingTooDeep { max: MAX_NESTING_DEPTH });
        assert_eq!(err.kind(), ErrorKind::Unsupported);
        assert!(encode_geometry(&mut Writer::new(), &too_deep).is_err());
    }

    #[test]
    fn test_unknown_member_type() {
        // collection with one member whose type code is 99
        let data = [1u8, 7, 0, 0, 0, 1, 0, 0, 0, 1, 99, 0, 0, 0];
        let err = decode(&data).unwrap_err();
        assert_eq!(err, DecodeError::UnknownGeometryType { code: 99, position: 10 });
    }

    #[test]
    fn test_trailing_bytes() {
        let mut data = POINT_7_8.to_vec();
        data.push(0);

        let err = decode(&data).unwrap_err();
        assert_eq!(err, DecodeError::TrailingBytes { consumed: 21, trailing: 1 });

        let geom = decode_with_options(&data, DecodeOptions::new().allow_trailing_bytes()).unwrap();
        assert_eq!(geom.geometry_type(), GeometryType::Point);

        let (_, consumed) = decode_prefix(&data).unwrap();
        assert_eq!(consumed, 21);
    }

    #[test]
    fn test_decode_as() {
        assert!(decode_as(&POINT_7_8, GeometryType::Point).is_ok());
        let err = decode_as(&POINT_7_8, GeometryType::LineString).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedType {
                expected: GeometryType::LineString,
                found: GeometryType::Point,
            }
        );
    }

    #[test]
    fn test_encode_rejects_bbox() {
        let header = Header::from_parts(ByteOrder::LittleEndian, Flags::empty().with_bbox(true), 0);
        let geom: Geometry = Point::new(header, Coord::xy(1.0, 2.0)).into();
        assert_eq!(
            encode(&geom).unwrap_err(),
            EncodeError::BoundingBoxUnsupported { geometry_type: GeometryType::Point }
        );

        // also when hidden inside a collection
        let gc: Geometry = GeometryCollection::new(le(), vec![geom]).into();
        assert!(encode(&gc).is_err());
    }

    #[test]
    fn test_encode_hex() {
        let geom = decode(&POINT_7_8).unwrap();
        assert_eq!(
            encode_hex(&geom).unwrap(),
            "01010000000000000000001C400000000000002040"
        );
    }

    #[test]
    fn test_encode_geometry_appends() {
        let geom = decode(&POINT_7_8).unwrap();
        let mut writer = Writer::new();
        writer.write_byte(0xAA);
        assert_eq!(encode_geometry(&mut writer, &geom).unwrap(), 21);
        assert_eq!(writer.len(), 22);
        assert_eq!(&writer.as_bytes()[1..], &POINT_7_8);
    }
}
