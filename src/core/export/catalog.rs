//! Component catalog builder
//!
//! Walks the design's placed parts in design-native order and produces the
//! normalized component list the fabrication service ingests. Coordinates
//! convert from the design's internal integer unit (nanometers) to
//! millimeters relative to the auxiliary origin, with the y axis flipped to
//! match the service's convention.

use crate::adapters::board::{BoardSource, PlacedPart};
use crate::domain::{ComponentRecord, PartAttributes, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Nanometers per millimeter
const NM_PER_MM: f64 = 1_000_000.0;

/// Field-name aliases probed for the manufacturer part number, in order
const MPN_FIELD_ALIASES: [&str; 4] = ["mpn", "MPN", "Mpn", "AISLER_MPN"];

/// Builds one record per placed part, in design order
pub fn build_catalog(board: &dyn BoardSource) -> Vec<ComponentRecord> {
    let origin = board.aux_origin();
    board
        .parts()
        .iter()
        .map(|part| record_for(part, origin))
        .collect()
}

/// Writes the catalog as a JSON array to `out_path`, returning the record count
pub fn write_catalog(board: &dyn BoardSource, out_path: &Path) -> Result<usize> {
    let records = build_catalog(board);
    let file = File::create(out_path)?;
    serde_json::to_writer(BufWriter::new(file), &records)?;
    Ok(records.len())
}

fn record_for(part: &PlacedPart, origin: (i64, i64)) -> ComponentRecord {
    let attrs = PartAttributes::from_bits(part.attributes);
    ComponentRecord {
        pos_x: (part.position.0 - origin.0) as f64 / NM_PER_MM,
        pos_y: -((part.position.1 - origin.1) as f64) / NM_PER_MM,
        rotation: part.rotation_degrees,
        side: part.copper_layer,
        designator: part.reference.clone(),
        mpn: mpn_for(part),
        pack: part.footprint.clone(),
        value: part.value.clone(),
        mount_type: attrs.mount_type(),
        place: attrs.place(),
    }
}

/// First matching MPN field alias wins
fn mpn_for(part: &PlacedPart) -> Option<String> {
    MPN_FIELD_ALIASES
        .iter()
        .find_map(|name| part.field(name))
        .map(str::to_string)
}
