//! Header encoding/decoding.
//!
//! Layout: byte order (1), type word (4), SRID (4, only with the SRID flag).
//! The type word holds the type code in its low 16 bits and the Z/M/SRID/BBOX
//! flags in bits 31..28.

use crate::codec::primitives::{Reader, Writer};
use crate::error::DecodeError;
use crate::limits::{HEADER_LEN, HEADER_WITH_SRID_LEN};
use crate::model::{ByteOrder, Flags, GeometryType, Header};

const TYPE_CODE_MASK: u32 = 0xFFFF;

/// Decodes one header, returning the geometry kind and the header.
///
/// The byte order found here applies to everything up to the end of this
/// value; nested collection members read their own headers.
pub fn read_header(reader: &mut Reader<'_>) -> Result<(GeometryType, Header), DecodeError> {
    let start = reader.position();
    let marker = reader.read_byte("byte order")?;
    let byte_order = ByteOrder::from_u8(marker).ok_or(DecodeError::InvalidByteOrder {
        marker,
        position: start,
    })?;

    let word_pos = reader.position();
    let word = reader.read_u32(byte_order, "type word")?;
    let code = word & TYPE_CODE_MASK;
    let geometry_type = GeometryType::from_u32(code).ok_or(DecodeError::UnknownGeometryType {
        code,
        position: word_pos,
    })?;

    let flags = Flags::from_bits(word);
    // TODO: skip the box once its on-wire layout is pinned down per dimension
    if flags.has_bbox() {
        return Err(DecodeError::BoundingBoxUnsupported { position: word_pos });
    }

    let srid = if flags.has_srid() {
        reader.read_i32(byte_order, "srid")?
    } else {
        0
    };

    Ok((geometry_type, Header::from_parts(byte_order, flags, srid)))
}

/// Encodes one header.
pub fn write_header(writer: &mut Writer, geometry_type: GeometryType, header: &Header) {
    let order = header.byte_order();
    writer.write_byte(order.to_u8());
    writer.write_u32(header.type_word(geometry_type), order);
    if let Some(srid) = header.srid() {
        writer.write_i32(srid, order);
    }
}

/// Encoded length of a header.
pub fn header_len(header: &Header) -> usize {
    if header.has_srid() {
        HEADER_WITH_SRID_LEN
    } else {
        HEADER_LEN
    }
}
