//! Delimited-text parsing for uploaded datasets.
//!
//! Supported format:
//! - UTF-8, comma-separated
//! - Optional header row, controlled by the caller (`ParseOptions::has_header`,
//!   a checkbox in the studio rather than auto-detection)
//! - Blank lines skipped when `skip_empty_lines` is set, otherwise rejected
//! - Double-quoted fields with embedded commas and doubled quotes
//!
//! Every cell must parse as `f64`; the last column is conventionally the
//! class label, which `data::columns::extract_last_column` splits off later.

use std::fmt;

#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub has_header: bool,
    pub skip_empty_lines: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { has_header: true, skip_empty_lines: true }
    }
}

#[derive(Debug)]
pub struct CsvParseError(pub String);

impl fmt::Display for CsvParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CsvParseError {}

/// Parses CSV bytes into numeric rows.
pub fn parse_csv(data: &[u8], options: ParseOptions) -> Result<Vec<Vec<f64>>, CsvParseError> {
    let text = std::str::from_utf8(data)
        .map_err(|_| CsvParseError("file is not valid UTF-8".into()))?;

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut lines = text.lines().enumerate();

    if options.has_header {
        lines.next();
    }

    for (line_idx, line) in lines {
        let line_no = line_idx + 1;
        if line.trim().is_empty() {
            if options.skip_empty_lines {
                continue;
            }
            return Err(CsvParseError(format!("line {}: empty line", line_no)));
        }

        let cells = split_row(line);
        let row = cells
            .iter()
            .map(|cell| {
                cell.trim().parse::<f64>().map_err(|_| {
                    CsvParseError(format!("line {}: '{}' is not a number", line_no, cell))
                })
            })
            .collect::<Result<Vec<f64>, CsvParseError>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(CsvParseError("no data rows".into()));
    }

    let width = rows[0].len();
    if width < 2 {
        return Err(CsvParseError(
            "rows need at least one feature column and a label column".into(),
        ));
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(CsvParseError(format!(
                "row {}: {} columns, expected {}",
                i + 1,
                row.len(),
                width
            )));
        }
    }

    Ok(rows)
}

/// Splits one CSV line into cells, honoring double-quoted fields.
fn split_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    cells.push(current);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_rows() {
        let rows = parse_csv(
            b"5.1,3.5,0\n4.9,3.0,0\n6.2,2.9,1\n",
            ParseOptions { has_header: false, skip_empty_lines: true },
        )
        .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec![6.2, 2.9, 1.0]);
    }

    #[test]
    fn header_row_is_dropped_when_requested() {
        let data = b"a,b,label\n1,2,0\n";
        let rows = parse_csv(data, ParseOptions::default()).unwrap();
        assert_eq!(rows, vec![vec![1.0, 2.0, 0.0]]);

        let err = parse_csv(
            data,
            ParseOptions { has_header: false, skip_empty_lines: true },
        )
        .unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn empty_lines_skipped_or_rejected_per_options() {
        let data = b"1,2,0\n\n3,4,1\n";
        let rows = parse_csv(
            data,
            ParseOptions { has_header: false, skip_empty_lines: true },
        )
        .unwrap();
        assert_eq!(rows.len(), 2);

        assert!(parse_csv(
            data,
            ParseOptions { has_header: false, skip_empty_lines: false },
        )
        .is_err());
    }

    #[test]
    fn quoted_fields_with_commas_are_one_cell() {
        let rows = parse_csv(
            b"\"1\",\"2.5\",1\n",
            ParseOptions { has_header: false, skip_empty_lines: true },
        )
        .unwrap();
        assert_eq!(rows, vec![vec![1.0, 2.5, 1.0]]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = parse_csv(
            b"1,2,0\n1,2\n",
            ParseOptions { has_header: false, skip_empty_lines: true },
        )
        .unwrap_err();
        assert!(err.to_string().contains("columns"));
    }
}
