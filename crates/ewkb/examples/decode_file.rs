//! Simple decoder to inspect EWKB files.
//!
//! The file may hold raw EWKB or its hex text (as `psql` prints it).

use std::fs;

use ewkb::scan::{scan, Source};
use ewkb::{encoded_len, Geometry};

fn describe(geometry: &Geometry, depth: usize) {
    let header = geometry.header();
    let indent = "  ".repeat(depth);
    println!(
        "{}{} ({:?}, Z={}, M={}, SRID={}, {} bytes)",
        indent,
        geometry.geometry_type(),
        header.byte_order(),
        header.has_z(),
        header.has_m(),
        header
            .srid()
            .map_or_else(|| "-".to_string(), |srid| srid.to_string()),
        encoded_len(geometry),
    );

    if let Geometry::GeometryCollection(collection) = geometry {
        for member in collection {
            describe(member, depth + 1);
        }
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .expect("usage: decode_file <path to .ewkb or hex file>");

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    // Hex dumps usually end with a newline.
    let input = if data.first() == Some(&b'0') {
        data.trim_ascii()
    } else {
        &data[..]
    };
    let geometry = scan(Source::Binary(input)).expect("Failed to decode");

    println!("\n=== Structure ===");
    describe(&geometry, 0);

    println!("\n=== EWKT ===");
    let text = geometry.to_ewkt();
    let preview: String = text.chars().take(400).collect();
    if text.len() > 400 {
        println!("{}...", preview);
    } else {
        println!("{}", preview);
    }
}
