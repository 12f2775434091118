//! Delimited text reader for food composition exports
//!
//! Spreadsheet exports use `;` when the locale writes decimal commas and
//! `,` otherwise. The first non-empty line is the header. Quoted fields may
//! span lines.

use ::csv::{ReaderBuilder, StringRecord, Trim};

use super::{import_rows, ImportError, ImportReport, NumberedRow, RawRow};

/// Pick `;` when the header has more semicolons than commas
fn detect_delimiter(header: &str) -> u8 {
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Rows read from CSV text, plus records the reader could not decode
#[derive(Debug, Default)]
pub struct CsvRows {
    pub rows: Vec<NumberedRow>,
    pub errors: Vec<String>,
}

fn to_row(headers: &StringRecord, record: &StringRecord) -> RawRow {
    // Short rows leave trailing columns blank
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), record.get(i).unwrap_or_default().to_string()))
        .collect()
}

/// Parse CSV text into rows numbered by the line each record starts on.
/// Blank records are dropped.
pub fn parse_csv(content: &str) -> CsvRows {
    let content = content.trim_start_matches('\u{feff}');
    let Some(header) = content.lines().find(|line| !line.trim().is_empty()) else {
        return CsvRows::default();
    };

    let mut reader = ReaderBuilder::new()
        .delimiter(detect_delimiter(header))
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(content.as_bytes());

    let mut parsed = CsvRows::default();
    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            parsed.errors.push(format!("Header: {}", e));
            return parsed;
        }
    };

    for result in reader.records() {
        match result {
            Ok(record) => {
                if record.iter().all(|field| field.trim().is_empty()) {
                    continue;
                }
                let line = record.position().map_or(0, |p| p.line() as usize);
                parsed.rows.push((line, to_row(&headers, &record)));
            }
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line() as usize);
                tracing::warn!(line, error = %e, "Unreadable CSV record");
                parsed.errors.push(format!("Row {}: unreadable record: {}", line, e));
            }
        }
    }

    parsed
}

/// Import food items from CSV text
pub fn import_csv_str(content: &str) -> ImportReport {
    let parsed = parse_csv(content);
    let mut report = import_rows(&parsed.rows);
    report.errors.extend(parsed.errors);
    report
}

/// Import food items from a CSV file. Only failing to read the file is an
/// error; malformed rows are reported in the `ImportReport`.
pub fn import_csv_file(file_path: &str) -> Result<ImportReport, ImportError> {
    let content = std::fs::read_to_string(file_path).map_err(|source| ImportError::Io {
        path: file_path.to_string(),
        source,
    })?;

    tracing::info!(path = file_path, "Importing food composition file");
    Ok(import_csv_str(&content))
}
