//! Benchmark for EWKB encoding, decoding and EWKT rendering.
//!
//! Reads a GeoJSON FeatureCollection (or generates a synthetic one when no
//! path is given), converts every feature geometry with the builder API and
//! times each stage.

use std::fs;
use std::time::Instant;

use ewkb::{ByteOrder, Coord, Geometry, GeometryBuilder};
use serde::Deserialize;
use tracing::info;

const SRID_WGS84: i32 = 4326;

// =============================================================================
// GEOJSON DATA STRUCTURES
// =============================================================================

type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeoJsonGeometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPoint { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<GeoJsonGeometry> },
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<GeoJsonGeometry>,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

// =============================================================================
// CONVERSION TO EWKB USING BUILDER API
// =============================================================================

fn to_coord(position: &Position) -> Coord {
    let at = |i: usize| position.get(i).copied().unwrap_or(0.0);
    Coord::xyz(at(0), at(1), at(2))
}

fn coords(positions: &[Position]) -> impl Iterator<Item = Coord> + '_ {
    positions.iter().map(to_coord)
}

fn rings(lines: &[Vec<Position>]) -> impl Iterator<Item = impl Iterator<Item = Coord> + '_> + '_ {
    lines.iter().map(|line| coords(line))
}

/// Returns the length of the first position found, if any.
fn first_position_len(geometry: &GeoJsonGeometry) -> Option<usize> {
    match geometry {
        GeoJsonGeometry::Point { coordinates } => Some(coordinates.len()),
        GeoJsonGeometry::LineString { coordinates } | GeoJsonGeometry::MultiPoint { coordinates } => {
            coordinates.first().map(Vec::len)
        }
        GeoJsonGeometry::Polygon { coordinates }
        | GeoJsonGeometry::MultiLineString { coordinates } => {
            coordinates.iter().flatten().next().map(Vec::len)
        }
        GeoJsonGeometry::MultiPolygon { coordinates } => {
            coordinates.iter().flatten().flatten().next().map(Vec::len)
        }
        GeoJsonGeometry::GeometryCollection { geometries } => {
            geometries.iter().find_map(first_position_len)
        }
    }
}

fn convert(geometry: &GeoJsonGeometry, builder: GeometryBuilder) -> Geometry {
    let builder = if first_position_len(geometry).is_some_and(|len| len >= 3) {
        builder.z()
    } else {
        builder
    };

    match geometry {
        GeoJsonGeometry::Point { coordinates } => builder.point(to_coord(coordinates)),
        GeoJsonGeometry::LineString { coordinates } => builder.line_string(coords(coordinates)),
        GeoJsonGeometry::Polygon { coordinates } => builder.polygon(rings(coordinates)),
        GeoJsonGeometry::MultiPoint { coordinates } => builder.multi_point(coords(coordinates)),
        GeoJsonGeometry::MultiLineString { coordinates } => {
            builder.multi_line_string(rings(coordinates))
        }
        GeoJsonGeometry::MultiPolygon { coordinates } => {
            builder.multi_polygon(coordinates.iter().map(|polygon| rings(polygon)))
        }
        GeoJsonGeometry::GeometryCollection { geometries } => builder.collection(|c| {
            let member = GeometryBuilder::new(ByteOrder::LittleEndian);
            c.geometries(geometries.iter().map(|g| convert(g, member)))
        }),
    }
}

fn convert_features(collection: &FeatureCollection) -> Vec<Geometry> {
    let builder = GeometryBuilder::new(ByteOrder::LittleEndian).srid(SRID_WGS84);
    collection
        .features
        .iter()
        .filter_map(|f| f.geometry.as_ref())
        .map(|g| convert(g, builder))
        .collect()
}

/// Builds a grid of polygons, lines and points as GeoJSON text.
fn synthetic_geojson(cells: usize) -> String {
    let mut features = Vec::with_capacity(cells * 3);
    for i in 0..cells {
        let x = (i % 360) as f64 - 180.0;
        let y = ((i / 360) % 180) as f64 - 90.0;
        features.push(format!(
            r#"{{"type":"Feature","geometry":{{"type":"Polygon","coordinates":[[[{x},{y}],[{x1},{y}],[{x1},{y1}],[{x},{y1}],[{x},{y}]]]}}}}"#,
            x1 = x + 0.5,
            y1 = y + 0.5,
        ));
        features.push(format!(
            r#"{{"type":"Feature","geometry":{{"type":"LineString","coordinates":[[{x},{y},10.5],[{x1},{y1},12.25]]}}}}"#,
            x1 = x + 0.25,
            y1 = y + 0.25,
        ));
        features.push(format!(
            r#"{{"type":"Feature","geometry":{{"type":"Point","coordinates":[{x},{y}]}}}}"#
        ));
    }
    format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bench_features=info,ewkb=warn".into()),
        )
        .init();

    let json_data = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "loading features");
            fs::read_to_string(&path).expect("Failed to read GeoJSON file")
        }
        None => {
            info!("no input given, generating synthetic features");
            synthetic_geojson(50_000)
        }
    };

    let parse_start = Instant::now();
    let collection: FeatureCollection =
        serde_json::from_str(&json_data).expect("Failed to parse GeoJSON");
    let parse_time = parse_start.elapsed();

    println!(
        "Loaded {} features in {:?}",
        collection.features.len(),
        parse_time
    );

    // Convert to EWKB values using builder API
    let convert_start = Instant::now();
    let geometries = convert_features(&collection);
    let convert_time = convert_start.elapsed();

    println!(
        "Converted {} geometries in {:?}",
        geometries.len(),
        convert_time
    );

    // Benchmark encoding
    let encode_start = Instant::now();
    let encoded: Vec<Vec<u8>> = geometries
        .iter()
        .map(|g| ewkb::encode(g).expect("Failed to encode"))
        .collect();
    let encode_time = encode_start.elapsed();
    let total_bytes: usize = encoded.iter().map(Vec::len).sum();

    println!("\nEncode: {} bytes in {:?}", total_bytes, encode_time);
    println!(
        "  Throughput: {:.2} MB/s",
        (total_bytes as f64 / 1_000_000.0) / encode_time.as_secs_f64()
    );

    // Benchmark decoding
    const DECODE_ITERS: u32 = 10;

    // Warmup
    for bytes in &encoded {
        let _ = ewkb::decode(bytes).expect("Failed to decode");
    }

    let decode_start = Instant::now();
    let mut decoded = Vec::new();
    for _ in 0..DECODE_ITERS {
        decoded = encoded
            .iter()
            .map(|bytes| ewkb::decode(bytes).expect("Failed to decode"))
            .collect();
    }
    let decode_time = decode_start.elapsed() / DECODE_ITERS;

    println!(
        "\nDecode: {:?} (avg of {} iterations)",
        decode_time, DECODE_ITERS
    );
    println!(
        "  Throughput: {:.2} MB/s",
        (total_bytes as f64 / 1_000_000.0) / decode_time.as_secs_f64()
    );
    assert_eq!(decoded, geometries, "Decoded values should match the input");

    // Benchmark rendering
    let render_start = Instant::now();
    let rendered: Vec<String> = decoded.iter().map(Geometry::to_ewkt).collect();
    let render_time = render_start.elapsed();
    let text_bytes: usize = rendered.iter().map(String::len).sum();

    println!("\nRender EWKT: {} bytes in {:?}", text_bytes, render_time);
    if let Some(first) = rendered.first() {
        let preview: String = first.chars().take(80).collect();
        println!("  First: {}", preview);
    }

    // Hex path, as a database driver would see it
    let hex_start = Instant::now();
    for geometry in &geometries {
        let text = ewkb::encode_hex(geometry).expect("Failed to encode hex");
        let scanned = ewkb::scan(ewkb::Source::Text(&text)).expect("Failed to scan hex");
        assert_eq!(&scanned, geometry);
    }
    let hex_time = hex_start.elapsed();
    println!("\nHex encode + scan: {:?}", hex_time);

    // Summary
    println!("\n=== Summary ===");
    println!("Geometries: {}", geometries.len());
    println!(
        "GeoJSON size: {} bytes ({:.1} MB)",
        json_data.len(),
        json_data.len() as f64 / 1_000_000.0
    );
    println!(
        "EWKB size: {} bytes ({:.1} MB)",
        total_bytes,
        total_bytes as f64 / 1_000_000.0
    );
    println!(
        "EWKT size: {} bytes ({:.1} MB)",
        text_bytes,
        text_bytes as f64 / 1_000_000.0
    );
    println!(
        "EWKB vs GeoJSON: {:.1}%",
        100.0 * total_bytes as f64 / json_data.len() as f64
    );
}
