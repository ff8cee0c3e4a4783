// 📂 Loaders for the NEO catalog and the close-approach data
//
// neos.csv  - header row, keyed columns (pdes, name, diameter, pha, ...)
// cad.json  - {"fields": [...], "data": [[...], ...]}, positional rows
//
// A malformed record aborts the whole load; nothing is skipped or defaulted.

use crate::entities::{CloseApproach, NearEarthObject, RawApproach, RawNeo};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// Field names expected at the positions `RawApproach` reads
const EXPECTED_FIELDS: [(usize, &str); 4] = [
    (RawApproach::DESIGNATION, "des"),
    (RawApproach::CALENDAR_DATE, "cd"),
    (RawApproach::DISTANCE, "dist"),
    (RawApproach::VELOCITY, "v_rel"),
];

// ============================================================================
// NEO CATALOG (CSV)
// ============================================================================

/// Read the NEO catalog CSV and build normalized NEOs
pub fn load_neos(path: &Path) -> Result<Vec<NearEarthObject>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open NEO file: {}", path.display()))?;

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut neos = Vec::new();
    for (line_num, result) in reader.deserialize::<RawNeo>().enumerate() {
        // +2: 1-indexed + header row
        let raw = result.with_context(|| {
            format!("Failed to parse CSV line {} in {}", line_num + 2, path.display())
        })?;
        let neo = NearEarthObject::new(raw).with_context(|| {
            format!("Malformed NEO on line {} in {}", line_num + 2, path.display())
        })?;
        neos.push(neo);
    }

    info!(count = neos.len(), path = %path.display(), "loaded NEOs");
    Ok(neos)
}

// ============================================================================
// CLOSE APPROACHES (JSON)
// ============================================================================

#[derive(Debug, Deserialize)]
struct CadDocument {
    #[serde(default)]
    fields: Vec<String>,
    data: Vec<Vec<Value>>,
}

/// JSON null → missing, strings verbatim, anything else via its JSON text
fn cell(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn check_fields(fields: &[String], path: &Path) {
    if fields.is_empty() {
        return;
    }
    for (position, expected) in EXPECTED_FIELDS {
        let found = fields.get(position).map(String::as_str);
        if found != Some(expected) {
            warn!(
                position,
                expected,
                found = found.unwrap_or("<missing>"),
                path = %path.display(),
                "unexpected close-approach field layout"
            );
        }
    }
}

/// Read the close-approach JSON and build unlinked approaches
pub fn load_approaches(path: &Path) -> Result<Vec<CloseApproach>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open close-approach file: {}", path.display()))?;

    let document: CadDocument = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse close-approach JSON: {}", path.display()))?;

    check_fields(&document.fields, path);

    let mut approaches = Vec::with_capacity(document.data.len());
    for (row_num, row) in document.data.into_iter().enumerate() {
        let row: Vec<Option<String>> = row.into_iter().map(cell).collect();
        let approach = RawApproach::from_positions(&row)
            .and_then(|raw| CloseApproach::new(raw, None))
            .with_context(|| {
                format!("Malformed close approach at data[{}] in {}", row_num, path.display())
            })?;
        approaches.push(approach);
    }

    info!(count = approaches.len(), path = %path.display(), "loaded close approaches");
    Ok(approaches)
}

// ============================================================================
// TESTS
// ============================================================================
