//! Tabular report emission: semicolon-delimited CSV, UTF-8 with BOM, one
//! row per match result in event order.

use std::fs;
use std::path::Path;

use rostercheck_engine::{MatchResult, Person};

use crate::error::ReportError;

/// Report column layout. Stable: downstream spreadsheets key off these
/// names.
pub const CSV_COLUMNS: [&str; 19] = [
    "Event_ExternID",
    "Event_LastName",
    "Event_FirstName",
    "Event_Sex",
    "Event_Association",
    "Event_DoB",
    "Event_MoB",
    "Event_YoB",
    "Ref_ExternID",
    "Ref_LastName",
    "Ref_FirstName",
    "Ref_Sex",
    "Ref_Association",
    "Ref_DoB",
    "Ref_MoB",
    "Ref_YoB",
    "Match_Type",
    "Confidence",
    "Issues",
];

/// Write match results as a CSV report.
///
/// Semicolon delimiter and a UTF-8 BOM keep the file double-clickable in
/// European Excel configurations.
pub fn write_csv_report(results: &[MatchResult], output_path: &Path) -> Result<(), ReportError> {
    let to_err = |message: String| ReportError::Io {
        path: output_path.to_path_buf(),
        message,
    };

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(|e| to_err(e.to_string()))?;
    }

    let mut buffer: Vec<u8> = "\u{FEFF}".into();
    {
        let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(&mut buffer);
        writer.write_record(CSV_COLUMNS).map_err(|e| to_err(e.to_string()))?;
        for result in results {
            writer.write_record(result_row(result)).map_err(|e| to_err(e.to_string()))?;
        }
        writer.flush().map_err(|e| to_err(e.to_string()))?;
    }

    fs::write(output_path, buffer).map_err(|e| to_err(e.to_string()))?;
    log::info!("wrote CSV report {} ({} rows)", output_path.display(), results.len());
    Ok(())
}

/// Flatten a result into the report row shape shared by the CSV and HTML
/// renderers.
pub(crate) fn result_row(result: &MatchResult) -> Vec<String> {
    let mut row = person_fields(&result.event);
    match &result.reference {
        Some(reference) => row.extend(person_fields(reference)),
        None => row.extend(std::iter::repeat_with(String::new).take(8)),
    }
    row.push(result.match_type.to_string());
    row.push(format!("{:.4}", result.confidence));
    row.push(
        result
            .issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    );
    row
}

fn person_fields(person: &Person) -> Vec<String> {
    vec![
        person.extern_id.clone(),
        person.last_name.clone(),
        person.first_name.clone(),
        person.sex.clone(),
        person.association.clone(),
        person.birth_day.to_string(),
        person.birth_month.to_string(),
        person.birth_year.to_string(),
    ]
}
