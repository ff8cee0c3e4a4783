// 💾 Export linked close approaches to CSV or JSON
//
// Both formats derive their fields from the same `ApproachRecord`. The whole
// input is resolved before the destination is created, so an unlinked
// approach fails the export without leaving a partial file behind.

use crate::entities::{CloseApproach, LinkedApproach, NeoLookup};
use crate::error::{NeoError, NeoResult};
use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// CSV columns, in output order. Written even when there are no rows.
pub const CSV_FIELDNAMES: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

const JSON_INDENT: &[u8] = b"   ";

// ============================================================================
// OUTPUT FORMAT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Pick the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> NeoResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(OutputFormat::Csv),
            Some("json") => Ok(OutputFormat::Json),
            _ => Err(NeoError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Json => "JSON",
        }
    }
}

// ============================================================================
// SHARED FIELD DERIVATION
// ============================================================================

/// Output fields of one approach, shared by both formats
#[derive(Debug, Clone, PartialEq)]
pub struct ApproachRecord {
    pub datetime_utc: String,
    pub distance_au: f64,
    pub velocity_km_s: f64,
    pub designation: String,
    /// Empty string for unnamed NEOs
    pub name: String,
    /// None when unknown
    pub diameter_km: Option<f64>,
    pub potentially_hazardous: bool,
}

impl ApproachRecord {
    pub fn from_linked(linked: &LinkedApproach<'_>) -> Self {
        let approach = linked.approach();
        let neo = linked.neo();

        ApproachRecord {
            datetime_utc: approach.time_str(),
            distance_au: approach.distance(),
            velocity_km_s: approach.velocity(),
            designation: approach.foreign_designation().to_string(),
            name: neo.name().unwrap_or_default().to_string(),
            diameter_km: neo.has_known_diameter().then(|| neo.diameter()),
            potentially_hazardous: neo.hazardous(),
        }
    }

    fn as_csv_row(&self) -> CsvRow<'_> {
        CsvRow {
            datetime_utc: &self.datetime_utc,
            distance_au: self.distance_au,
            velocity_km_s: self.velocity_km_s,
            designation: &self.designation,
            name: &self.name,
            diameter_km: self.diameter_km.unwrap_or(f64::NAN),
            potentially_hazardous: self.potentially_hazardous,
        }
    }

    fn as_json(&self) -> JsonApproach<'_> {
        JsonApproach {
            datetime_utc: &self.datetime_utc,
            distance_au: self.distance_au,
            velocity_km_s: self.velocity_km_s,
            neo: JsonNeo {
                designation: &self.designation,
                name: &self.name,
                diameter_km: self.diameter_km,
                potentially_hazardous: self.potentially_hazardous,
            },
        }
    }
}

/// Resolve every approach up front; the first unlinked one fails the lot
pub fn collect_records<'a, I, L>(results: I, neos: &L) -> NeoResult<Vec<ApproachRecord>>
where
    I: IntoIterator<Item = &'a CloseApproach>,
    L: NeoLookup + ?Sized,
{
    results
        .into_iter()
        .map(|approach| approach.linked(neos).map(|linked| ApproachRecord::from_linked(&linked)))
        .collect()
}

// ============================================================================
// CSV
// ============================================================================

#[derive(Serialize)]
struct CsvRow<'a> {
    datetime_utc: &'a str,
    #[serde(serialize_with = "serialize_csv_float")]
    distance_au: f64,
    #[serde(serialize_with = "serialize_csv_float")]
    velocity_km_s: f64,
    designation: &'a str,
    name: &'a str,
    #[serde(serialize_with = "serialize_csv_float")]
    diameter_km: f64,
    potentially_hazardous: bool,
}

/// NaN in any float column is written `nan`
fn serialize_csv_float<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_nan() {
        serializer.serialize_str("nan")
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Write records as CSV: fixed header, then one row per record
pub fn write_csv_records<W: Write>(records: &[ApproachRecord], writer: W) -> NeoResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_FIELDNAMES)?;
    for record in records {
        csv_writer.serialize(record.as_csv_row())?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write linked close approaches to a CSV file
pub fn write_to_csv<'a, I, L>(results: I, neos: &L, path: &Path) -> NeoResult<()>
where
    I: IntoIterator<Item = &'a CloseApproach>,
    L: NeoLookup + ?Sized,
{
    let records = collect_records(results, neos)?;
    let file = File::create(path)?;
    write_csv_records(&records, BufWriter::new(file))?;

    info!(rows = records.len(), path = %path.display(), "wrote CSV export");
    Ok(())
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Serialize)]
struct JsonApproach<'a> {
    datetime_utc: &'a str,
    distance_au: f64,
    velocity_km_s: f64,
    neo: JsonNeo<'a>,
}

#[derive(Serialize)]
struct JsonNeo<'a> {
    designation: &'a str,
    name: &'a str,
    /// null when unknown
    diameter_km: Option<f64>,
    potentially_hazardous: bool,
}

/// Write records as one pretty-printed JSON array
pub fn write_json_records<W: Write>(records: &[ApproachRecord], mut writer: W) -> NeoResult<()> {
    let items: Vec<JsonApproach<'_>> = records.iter().map(ApproachRecord::as_json).collect();

    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    items.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write linked close approaches to a JSON file
pub fn write_to_json<'a, I, L>(results: I, neos: &L, path: &Path) -> NeoResult<()>
where
    I: IntoIterator<Item = &'a CloseApproach>,
    L: NeoLookup + ?Sized,
{
    let records = collect_records(results, neos)?;
    let file = File::create(path)?;
    write_json_records(&records, BufWriter::new(file))?;

    info!(items = records.len(), path = %path.display(), "wrote JSON export");
    Ok(())
}

/// Write in the format chosen by the extension of `path`
pub fn write_results<'a, I, L>(results: I, neos: &L, path: &Path) -> NeoResult<OutputFormat>
where
    I: IntoIterator<Item = &'a CloseApproach>,
    L: NeoLookup + ?Sized,
{
    let format = OutputFormat::from_path(path)?;
    match format {
        OutputFormat::Csv => write_to_csv(results, neos, path)?,
        OutputFormat::Json => write_to_json(results, neos, path)?,
    }
    Ok(format)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{NearEarthObject, NeoId, RawApproach, RawNeo};
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (Vec<NearEarthObject>, Vec<CloseApproach>) {
        let neos = vec![
            NearEarthObject::new(RawNeo::new("433", "Eros", "16.84", "N")).unwrap(),
            NearEarthObject::new(RawNeo::new("2020 AB", "", "", "Y")).unwrap(),
        ];
        let approaches = vec![
            CloseApproach::new(
                RawApproach::new("433", "1900-Jan-01 12:00", "0.1534", "5.1"),
                Some(NeoId::new(0)),
            )
            .unwrap(),
            CloseApproach::new(
                RawApproach::new("2020 AB", "2020-Jan-01 00:10", "0.05", "12.25"),
                Some(NeoId::new(1)),
            )
            .unwrap(),
        ];
        (neos, approaches)
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("out.csv")).unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path(Path::new("out.JSON")).unwrap(), OutputFormat::Json);
        assert!(matches!(
            OutputFormat::from_path(Path::new("out.txt")),
            Err(NeoError::UnsupportedFormat { .. })
        ));
        assert!(OutputFormat::from_path(Path::new("out")).is_err());
    }

    #[test]
    fn test_record_derivation() {
        let (neos, approaches) = fixture();
        let records = collect_records(&approaches, &neos).unwrap();

        assert_eq!(
            records[0],
            ApproachRecord {
                datetime_utc: "1900-Jan-01 12:00".to_string(),
                distance_au: 0.1534,
                velocity_km_s: 5.1,
                designation: "433".to_string(),
                name: "Eros".to_string(),
                diameter_km: Some(16.84),
                potentially_hazardous: false,
            }
        );
        assert_eq!(records[1].name, "");
        assert_eq!(records[1].diameter_km, None);
    }

    #[test]
    fn test_csv_empty_has_header_only() {
        let mut out = Vec::new();
        write_csv_records(&[], &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "datetime_utc,distance_au,velocity_km_s,designation,name,diameter_km,potentially_hazardous\n"
        );
    }

    #[test]
    fn test_csv_rows() {
        let (neos, approaches) = fixture();
        let records = collect_records(&approaches, &neos).unwrap();

        let mut out = Vec::new();
        write_csv_records(&records, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1900-Jan-01 12:00,0.1534,5.1,433,Eros,16.84,false");
        assert_eq!(lines[2], "2020-Jan-01 00:10,0.05,12.25,2020 AB,,nan,true");
    }

    #[test]
    fn test_csv_nan_spelled_the_same_in_every_column() {
        let (neos, _) = fixture();
        let approaches = vec![CloseApproach::new(
            RawApproach::new("2020 AB", "2020-Jan-01 00:10", "nan", "5.0"),
            Some(NeoId::new(1)),
        )
        .unwrap()];
        let records = collect_records(&approaches, &neos).unwrap();

        let mut out = Vec::new();
        write_csv_records(&records, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text.lines().nth(1),
            Some("2020-Jan-01 00:10,nan,5.0,2020 AB,,nan,true")
        );
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn test_json_structure() {
        let (neos, approaches) = fixture();
        let records = collect_records(&approaches, &neos).unwrap();

        let mut out = Vec::new();
        write_json_records(&records, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["datetime_utc"], "1900-Jan-01 12:00");
        assert_eq!(items[0]["distance_au"], 0.1534);
        assert_eq!(items[0]["velocity_km_s"], 5.1);
        assert_eq!(items[0]["neo"]["designation"], "433");
        assert_eq!(items[0]["neo"]["name"], "Eros");
        assert_eq!(items[0]["neo"]["diameter_km"], 16.84);
        assert_eq!(items[0]["neo"]["potentially_hazardous"], false);

        assert_eq!(items[1]["neo"]["name"], "");
        assert!(items[1]["neo"]["diameter_km"].is_null());
        assert_eq!(items[1]["neo"]["potentially_hazardous"], true);
    }

    #[test]
    fn test_json_indentation() {
        let (neos, approaches) = fixture();
        let records = collect_records(&approaches[..1], &neos).unwrap();

        let mut out = Vec::new();
        write_json_records(&records, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("[\n   {\n      \"datetime_utc\": \"1900-Jan-01 12:00\","));
        assert!(text.ends_with("]\n"));
    }

    #[test]
    fn test_json_empty_is_empty_array() {
        let mut out = Vec::new();
        write_json_records(&[], &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, serde_json::json!([]));
    }

    #[test]
    fn test_unlinked_fails_before_file_is_created() {
        let (neos, _) = fixture();
        let unlinked = vec![CloseApproach::new(
            RawApproach::new("433", "1900-Jan-01 12:00", "0.1534", "5.1"),
            None,
        )
        .unwrap()];

        let dir = TempDir::new().unwrap();
        let csv_path = dir.path().join("out.csv");
        let json_path = dir.path().join("out.json");

        assert!(matches!(
            write_to_csv(&unlinked, &neos, &csv_path),
            Err(NeoError::UnlinkedApproach { .. })
        ));
        assert!(matches!(
            write_to_json(&unlinked, &neos, &json_path),
            Err(NeoError::UnlinkedApproach { .. })
        ));
        assert!(!csv_path.exists());
        assert!(!json_path.exists());
    }

    #[test]
    fn test_write_results_dispatches_on_extension() {
        let (neos, approaches) = fixture();
        let dir = TempDir::new().unwrap();

        let csv_path = dir.path().join("results.csv");
        assert_eq!(write_results(&approaches, &neos, &csv_path).unwrap(), OutputFormat::Csv);
        assert!(fs::read_to_string(&csv_path).unwrap().starts_with("datetime_utc,"));

        let json_path = dir.path().join("results.json");
        assert_eq!(write_results(&approaches, &neos, &json_path).unwrap(), OutputFormat::Json);
        assert!(fs::read_to_string(&json_path).unwrap().starts_with('['));

        let txt_path = dir.path().join("results.txt");
        assert!(write_results(&approaches, &neos, &txt_path).is_err());
        assert!(!txt_path.exists());
    }

    #[test]
    fn test_write_to_missing_directory_is_io_error() {
        let (neos, approaches) = fixture();
        let path = Path::new("/nonexistent-dir/out.csv");

        assert!(matches!(
            write_to_csv(&approaches, &neos, path),
            Err(NeoError::Io(_))
        ));
    }
}
