//! Roster CSV/TSV ingestion: encoding detection, delimiter sniffing,
//! column validation, whitespace normalization.
//!
//! Everything the matching engine must not care about happens here: the
//! engine receives fully normalized `Person` records and never re-parses
//! raw text.

use std::path::Path;

use rostercheck_engine::Person;

use crate::error::IngestError;

/// Column headers a roster file must carry (compared after whitespace
/// normalization).
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Extern ID",
    "Last Name",
    "First Name",
    "Sex",
    "Association",
    "DoB",
    "MoB",
    "YoB",
];

/// Read person records from a roster file.
///
/// Structurally invalid files (unreadable, empty, missing required
/// columns) abort with an error. Individual malformed rows are skipped
/// with a warning; date fields that do not parse degrade to 0 ("unknown").
pub fn read_persons(path: &Path) -> Result<Vec<Person>, IngestError> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let content = decode(&bytes);
    parse_persons(&content, path)
}

/// Decode file bytes to a UTF-8 string.
///
/// BOM sniffing handles UTF-8 and UTF-16 byte-order marks (and strips
/// them). BOM-less bytes that are not valid UTF-8 fall back to
/// Windows-1252, the usual culprit for Excel-exported rosters.
fn decode(bytes: &[u8]) -> String {
    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if !had_errors {
        log::debug!("decoded input as {}", encoding.name());
        return text.into_owned();
    }
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    log::debug!("input is not valid UTF-8, decoded as windows-1252");
    text.into_owned()
}

/// Detect the most likely field delimiter by checking consistency across
/// the first few lines.
///
/// For each candidate (tab, semicolon, comma), count fields per line. The
/// delimiter producing the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b','];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b'\t';
    }

    let mut best = b'\t';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Collapse any run of Unicode whitespace to a single space and trim.
fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a date component; empty or unparsable values mean "unknown" (0).
fn parse_date_field(value: &str) -> u32 {
    if value.is_empty() {
        return 0;
    }
    match value.parse() {
        Ok(number) => number,
        Err(_) => {
            log::debug!("unparsable date field {value:?}, using 0");
            0
        }
    }
}

struct Columns {
    extern_id: usize,
    last_name: usize,
    first_name: usize,
    sex: usize,
    association: usize,
    day: usize,
    month: usize,
    year: usize,
}

fn resolve_columns(headers: &[String], path: &Path) -> Result<Columns, IngestError> {
    let find = |name: &str| headers.iter().position(|h| h == name);

    if let (
        Some(extern_id),
        Some(last_name),
        Some(first_name),
        Some(sex),
        Some(association),
        Some(day),
        Some(month),
        Some(year),
    ) = (
        find("Extern ID"),
        find("Last Name"),
        find("First Name"),
        find("Sex"),
        find("Association"),
        find("DoB"),
        find("MoB"),
        find("YoB"),
    ) {
        Ok(Columns { extern_id, last_name, first_name, sex, association, day, month, year })
    } else {
        let columns: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        Err(IngestError::MissingColumns { path: path.to_path_buf(), columns })
    }
}

fn parse_persons(content: &str, path: &Path) -> Result<Vec<Person>, IngestError> {
    let delimiter = sniff_delimiter(content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::Io { path: path.to_path_buf(), message: e.to_string() })?
        .iter()
        .map(normalize_whitespace)
        .collect();

    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyFile { path: path.to_path_buf() });
    }

    let columns = resolve_columns(&headers, path)?;

    let mut persons = Vec::new();
    for (row_num, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                // Data rows start on line 2, after the header.
                log::warn!("{}: skipping row {}: {err}", path.display(), row_num + 2);
                continue;
            }
        };

        let field = |idx: usize| normalize_whitespace(record.get(idx).unwrap_or(""));

        persons.push(Person {
            extern_id: field(columns.extern_id),
            last_name: field(columns.last_name),
            first_name: field(columns.first_name),
            sex: field(columns.sex),
            association: field(columns.association),
            birth_day: parse_date_field(&field(columns.day)),
            birth_month: parse_date_field(&field(columns.month)),
            birth_year: parse_date_field(&field(columns.year)),
        });
    }

    log::info!("{}: read {} person records", path.display(), persons.len());
    Ok(persons)
}
