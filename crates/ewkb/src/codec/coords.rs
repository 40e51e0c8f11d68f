//! Coordinate and composite sequence encoding/decoding.
//!
//! A point is 2 to 4 doubles (x, y, [z], [m]). Every composite is a u32
//! count followed by that many children: coordinates for lines and
//! multi-points, lines for polygons and multi-lines, polygons for
//! multi-polygons. None of these children carry a header of their own.

use crate::codec::primitives::{Reader, Writer};
use crate::error::DecodeError;
use crate::limits::{COUNT_LEN, ORDINATE_LEN};
use crate::model::{ByteOrder, Coord, Flags, Ring, Rings};

/// Encoded length of one coordinate.
pub fn coord_len(flags: Flags) -> usize {
    ORDINATE_LEN * flags.dimensions()
}

// =============================================================================
// DECODING
// =============================================================================

/// Reads one coordinate.
pub fn read_coord(reader: &mut Reader<'_>, order: ByteOrder, flags: Flags) -> Result<Coord, DecodeError> {
    reader.ensure(coord_len(flags), "point")?;
    let x = reader.read_f64(order, "x")?;
    let y = reader.read_f64(order, "y")?;
    let z = if flags.has_z() { reader.read_f64(order, "z")? } else { 0.0 };
    let m = if flags.has_m() { reader.read_f64(order, "m")? } else { 0.0 };
    Ok(Coord { x, y, z, m })
}

/// Reads a count-prefixed coordinate sequence.
pub fn read_coords(
    reader: &mut Reader<'_>,
    order: ByteOrder,
    flags: Flags,
    context: &'static str,
) -> Result<Vec<Coord>, DecodeError> {
    let count = reader.read_u32(order, context)? as usize;
    // Fail before allocating when the declared points cannot fit.
    reader.ensure(count.saturating_mul(coord_len(flags)), context)?;

    let mut coords = Vec::with_capacity(count);
    for _ in 0..count {
        coords.push(read_coord(reader, order, flags)?);
    }
    Ok(coords)
}

/// Capacity for `count` children that each need at least `min_len` bytes.
fn bounded_capacity(reader: &Reader<'_>, count: usize, min_len: usize) -> usize {
    count.min(reader.remaining_len() / min_len)
}

/// Reads a count-prefixed sequence of coordinate sequences (polygon rings or lines).
pub fn read_rings(
    reader: &mut Reader<'_>,
    order: ByteOrder,
    flags: Flags,
    context: &'static str,
) -> Result<Rings, DecodeError> {
    let count = reader.read_u32(order, context)? as usize;
    let mut rings = Vec::with_capacity(bounded_capacity(reader, count, COUNT_LEN));
    for _ in 0..count {
        rings.push(read_coords(reader, order, flags, "ring")?);
    }
    Ok(rings)
}

/// Reads a count-prefixed sequence of polygons.
pub fn read_polygons(
    reader: &mut Reader<'_>,
    order: ByteOrder,
    flags: Flags,
) -> Result<Vec<Rings>, DecodeError> {
    let count = reader.read_u32(order, "polygon count")? as usize;
    let mut polygons = Vec::with_capacity(bounded_capacity(reader, count, COUNT_LEN));
    for _ in 0..count {
        polygons.push(read_rings(reader, order, flags, "ring count")?);
    }
    Ok(polygons)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writes one coordinate, only the ordinates the flags ask for.
///
/// Returns the number of bytes written.
pub fn write_coord(writer: &mut Writer, coord: &Coord, order: ByteOrder, flags: Flags) -> usize {
    writer.write_f64(coord.x, order);
    writer.write_f64(coord.y, order);
    if flags.has_z() {
        writer.write_f64(coord.z, order);
    }
    if flags.has_m() {
        writer.write_f64(coord.m, order);
    }
    coord_len(flags)
}

/// Writes a count-prefixed coordinate sequence and returns the bytes written.
///
/// Lengths are checked by the caller before any byte is written.
pub fn write_coords(
    writer: &mut Writer,
    coords: &[Coord],
    order: ByteOrder,
    flags: Flags,
) -> usize {
    writer.write_u32(coords.len() as u32, order);
    COUNT_LEN
        + coords
            .iter()
            .map(|coord| write_coord(writer, coord, order, flags))
            .sum::<usize>()
}

pub fn write_rings(writer: &mut Writer, rings: &[Ring], order: ByteOrder, flags: Flags) -> usize {
    writer.write_u32(rings.len() as u32, order);
    COUNT_LEN
        + rings
            .iter()
            .map(|ring| write_coords(writer, ring, order, flags))
            .sum::<usize>()
}

pub fn write_polygons(
    writer: &mut Writer,
    polygons: &[Rings],
    order: ByteOrder,
    flags: Flags,
) -> usize {
    writer.write_u32(polygons.len() as u32, order);
    COUNT_LEN
        + polygons
            .iter()
            .map(|rings| write_rings(writer, rings, order, flags))
            .sum::<usize>()
}

// =============================================================================
// SIZES
// =============================================================================

pub fn coords_len(coords: &[Coord], flags: Flags) -> usize {
    COUNT_LEN + coords.len() * coord_len(flags)
}

pub fn rings_len(rings: &[Ring], flags: Flags) -> usize {
    COUNT_LEN + rings.iter().map(|r| coords_len(r, flags)).sum::<usize>()
}

pub fn polygons_len(polygons: &[Rings], flags: Flags) -> usize {
    COUNT_LEN + polygons.iter().map(|p| rings_len(p, flags)).sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy() -> Flags {
        Flags::empty()
    }

    #[test]
    fn test_read_coord_dimensions() {
        // (1, 2, 3, 4) little-endian
        let data = [
            0, 0, 0, 0, 0, 0, 240, 63, 0, 0, 0, 0, 0, 0, 0, 64, 0, 0, 0, 0, 0, 0, 8, 64, 0, 0, 0,
            0, 0, 0, 16, 64,
        ];
        let order = ByteOrder::LittleEndian;

        let c = read_coord(&mut Reader::new(&data), order, xy()).unwrap();
        assert_eq!(c, Coord::xy(1.0, 2.0));

        let c = read_coord(&mut Reader::new(&data), order, xy().with_z(true)).unwrap();
        assert_eq!(c, Coord::xyz(1.0, 2.0, 3.0));

        let c = read_coord(&mut Reader::new(&data), order, xy().with_m(true)).unwrap();
        assert_eq!(c, Coord::xym(1.0, 2.0, 3.0));

        let mut reader = Reader::new(&data);
        let c = read_coord(&mut reader, order, xy().with_z(true).with_m(true)).unwrap();
        assert_eq!(c, Coord::xyzm(1.0, 2.0, 3.0, 4.0));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_coord_truncated_does_not_consume() {
        let data = [0u8; 23];
        let mut reader = Reader::new(&data);
        let err = read_coord(&mut reader, ByteOrder::LittleEndian, xy().with_z(true)).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedBuffer {
                context: "point",
                position: 0,
                needed: 24,
                available: 23,
            }
        );
    }

    #[test]
    fn test_huge_count_fails_without_allocating() {
        let data = [0xFFu8, 0xFF, 0xFF, 0xFF, 0, 0];
        let err = read_coords(&mut Reader::new(&data), ByteOrder::LittleEndian, xy(), "points")
            .unwrap_err();
        assert!(err.is_truncated());

        let err = read_polygons(&mut Reader::new(&data), ByteOrder::BigEndian, xy()).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn test_rings_roundtrip_with_sizes() {
        let flags = xy().with_m(true);
        let rings = vec![
            vec![Coord::xym(0.0, 0.0, 1.0), Coord::xym(1.0, 1.0, 2.0)],
            vec![],
            vec![Coord::xym(-1.5, 2.25, 0.0)],
        ];

        for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
            let mut writer = Writer::new();
            let written = write_rings(&mut writer, &rings, order, flags);
            assert_eq!(written, rings_len(&rings, flags));
            assert_eq!(writer.len(), written);

            let mut reader = Reader::new(writer.as_bytes());
            let decoded = read_rings(&mut reader, order, flags, "rings").unwrap();
            assert_eq!(decoded, rings);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_polygons_len() {
        let flags = xy().with_z(true);
        let polygons = vec![vec![vec![Coord::xyz(1.0, 2.0, 3.0); 4]], vec![]];
        // 4 + (4 + (4 + 4 * 24)) + 4
        assert_eq!(polygons_len(&polygons, flags), 112);

        let mut writer = Writer::new();
        let written = write_polygons(&mut writer, &polygons, ByteOrder::LittleEndian, flags);
        assert_eq!(written, 112);
        assert_eq!(writer.len(), 112);
    }

    #[test]
    fn test_writers_report_bytes_written() {
        let coord = Coord::xyzm(1.0, 2.0, 3.0, 4.0);
        for (flags, expected) in [
            (xy(), 16),
            (xy().with_z(true), 24),
            (xy().with_m(true), 24),
            (xy().with_z(true).with_m(true), 32),
        ] {
            let mut writer = Writer::new();
            assert_eq!(write_coord(&mut writer, &coord, ByteOrder::BigEndian, flags), expected);
            assert_eq!(writer.len(), expected);
        }

        // count word plus two 2D points, appended after existing bytes
        let mut writer = Writer::new();
        writer.write_byte(0);
        let written = write_coords(&mut writer, &[coord, coord], ByteOrder::LittleEndian, xy());
        assert_eq!(written, 36);
        assert_eq!(writer.len(), 37);

        let mut writer = Writer::new();
        assert_eq!(write_coords(&mut writer, &[], ByteOrder::LittleEndian, xy()), 4);
    }
}
