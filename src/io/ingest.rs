//! CSV ingest for batch BMI evaluation.
//!
//! Expected columns (header names are case-insensitive, BOM-tolerant):
//!
//! - `id` (required)
//! - `height` (required; cm or inches)
//! - `weight` (required; kg or lb)
//! - `units` (optional; `metric` / `imperial`, falls back to the run default)
//!
//! Rows that fail to parse are kept as row errors rather than aborting the
//! run, so a single bad line never hides the rest of the file.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use clap::ValueEnum;
use csv::StringRecord;

use crate::calc::bmi::BmiInput;
use crate::domain::UnitSystem;
use crate::error::AppError;

/// A parsed input row.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub line: usize,
    pub id: String,
    pub input: BmiInput,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct IngestedRows {
    pub rows: Vec<BatchRow>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Open and parse a batch CSV file.
pub fn load_bmi_rows(path: &Path, default_units: UnitSystem) -> Result<IngestedRows, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_bmi_rows(file, default_units)
}

/// Parse batch rows from any reader.
pub fn read_bmi_rows<R: Read>(source: R, default_units: UnitSystem) -> Result<IngestedRows, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for column in ["id", "height", "weight"] {
        if !header_map.contains_key(column) {
            return Err(AppError::new(2, format!("Missing required column: `{column}`")));
        }
    }

    let mut out = IngestedRows::default();

    for (idx, result) in reader.records().enumerate() {
        // Line 1 is the header.
        let line = idx + 2;
        out.rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                out.row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map, default_units) {
            Ok((id, input)) => out.rows.push(BatchRow { line, id, input }),
            Err((id, message)) => out.row_errors.push(RowError { line, id, message }),
        }
    }

    Ok(out)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    default_units: UnitSystem,
) -> Result<(String, BmiInput), (Option<String>, String)> {
    let id = get_optional(record, header_map, "id")
        .ok_or((None, "Missing `id` value.".to_string()))?
        .to_string();

    let fail = |message: String| (Some(id.clone()), message);

    let height = parse_f64(get_optional(record, header_map, "height"))
        .ok_or_else(|| fail("Missing/invalid `height` value.".to_string()))?;
    let weight = parse_f64(get_optional(record, header_map, "weight"))
        .ok_or_else(|| fail("Missing/invalid `weight` value.".to_string()))?;

    let units = match get_optional(record, header_map, "units") {
        Some(raw) => UnitSystem::from_str(raw, true)
            .map_err(|_| fail(format!("Unknown units '{raw}' (expected metric or imperial).")))?,
        None => default_units,
    };

    Ok((id, BmiInput { height, weight, units }))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = *header_map.get(name)?;
    record.get(idx).filter(|s| !s.is_empty())
}

fn parse_f64(s: Option<&str>) -> Option<f64> {
    let v = s?.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_rows_and_collects_errors() {
        let csv = "\u{feff}ID,Height,Weight,Units\n\
                   a,180,70,\n\
                   b,70,150,imperial\n\
                   c,,70,\n\
                   d,170,65,stones\n";
        let data = read_bmi_rows(csv.as_bytes(), UnitSystem::Metric).unwrap();

        assert_eq!(data.rows_read, 4);
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0].input.units, UnitSystem::Metric);
        assert_eq!(data.rows[1].input.units, UnitSystem::Imperial);
        assert_eq!(data.rows[1].line, 3);

        assert_eq!(data.row_errors.len(), 2);
        assert_eq!(data.row_errors[0].line, 4);
        assert_eq!(data.row_errors[0].id.as_deref(), Some("c"));
        assert!(data.row_errors[1].message.contains("stones"));
    }

    #[test]
    fn default_units_apply_without_column() {
        let csv = "id,height,weight\nx,70,150\n";
        let data = read_bmi_rows(csv.as_bytes(), UnitSystem::Imperial).unwrap();
        assert_eq!(data.rows[0].input.units, UnitSystem::Imperial);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let err = read_bmi_rows("id,height\nx,170\n".as_bytes(), UnitSystem::Metric).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("weight"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,height,weight\nz,165,55").unwrap();
        let data = load_bmi_rows(file.path(), UnitSystem::Metric).unwrap();
        assert_eq!(data.rows[0].id, "z");
        assert_eq!(data.rows[0].input.weight, 55.0);
    }
}
