//! Export batch results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Rows keep input order; failed rows carry their message in the `error` column.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::pipeline::BatchOutcome;
use crate::error::AppError;

const HEADER: [&str; 7] = ["line", "id", "height_cm", "weight_kg", "bmi", "category", "error"];

/// Write batch results to any writer.
pub fn write_batch_csv<W: Write>(writer: W, outcomes: &[BatchOutcome]) -> Result<(), AppError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADER)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for o in outcomes {
        let fmt_opt = |v: Option<f64>, places: usize| v.map(|v| format!("{v:.places$}")).unwrap_or_default();
        let (bmi, category, error) = match &o.result {
            Ok(r) => (format!("{:.1}", r.bmi), r.category.label().to_string(), String::new()),
            Err(msg) => (String::new(), String::new(), msg.clone()),
        };
        out.write_record([
            o.line.to_string(),
            o.id.clone(),
            fmt_opt(o.height_cm, 2),
            fmt_opt(o.weight_kg, 2),
            bmi,
            category,
            error,
        ])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write batch results to a CSV file.
pub fn write_batch_csv_file(path: &Path, outcomes: &[BatchOutcome]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_batch_csv(file, outcomes)
}
