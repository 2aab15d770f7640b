//! CSV parsing for the wiki's data files.
//!
//! The card and ruling lists are hand-curated spreadsheets exported as CSV.
//! Parsing happens in two layers:
//!
//! 1. **Tokenizer**: [`normalize`], [`split_fields`] and [`parse_table`] turn
//!    raw text into a header plus rows of string fields. This layer knows
//!    nothing about cards.
//! 2. **Mapping**: [`FromRecord`] projects a [`Record`] (header name → value)
//!    onto a concrete shape. [`parse`] validates the shape's required headers
//!    before any row is looked at, then maps every row.
//!
//! ## Input rules
//!
//! - Byte-order marks are stripped wherever they occur, not only at the start.
//! - `CRLF` and lone `CR` become `LF`.
//! - The whole document is trimmed, then split into lines. The first line is
//!   the header; blank lines after it are skipped.
//! - Fields may be wrapped in double quotes. Inside quotes, `,` is literal and
//!   `""` is one literal `"`. Quoted fields do not span lines.
//! - Every field is trimmed after extraction, quoted or not. Intentional
//!   padding inside quotes is lost; that is accepted behavior.
//!
//! ## Errors
//!
//! The first problem wins and replaces the whole result. A single malformed
//! row invalidates the document: the data is curated by hand, and a partially
//! ingested card list is worse than a failed build.
//!
//! Line numbers in errors are 1-based positions in the source text with the
//! header counted, so they match what an editor shows.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    #[error("CSV data is empty")]
    Empty,
    #[error("Missing required headers: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),
    #[error("Line {line}: row has {found} fields, header has {expected}")]
    RowShape {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Line {line}: invalid {column} value {value:?}: {reason}")]
    InvalidField {
        line: usize,
        column: String,
        value: String,
        reason: String,
    },
}

/// Strip byte-order marks and convert every line terminator to `LF`.
pub fn normalize(text: &str) -> String {
    text.replace('\u{feff}', "")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Split one line into trimmed fields, honoring double-quoted fields.
///
/// ```
/// use card_wiki::csv::split_fields;
///
/// let fields = split_fields(r#"1,"Rose, Thorn","She said ""hi""""#);
/// assert_eq!(fields, vec!["1", "Rose, Thorn", r#"She said "hi""#]);
/// ```
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(finish_field(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(finish_field(&mut current));
    fields
}

fn finish_field(current: &mut String) -> String {
    let field = std::mem::take(current);
    field.trim().to_string()
}

/// A tokenized CSV document: header names plus data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// One data row. `fields` always has exactly as many entries as the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line in the source text.
    pub line: usize,
    pub fields: Vec<String>,
}

impl Table {
    /// Pair every row with the header names.
    pub fn into_records(self) -> Vec<Record> {
        let Table { headers, rows } = self;
        rows.into_iter()
            .map(|row| Record {
                line: row.line,
                fields: headers.iter().cloned().zip(row.fields).collect(),
            })
            .collect()
    }
}

/// Tokenize a whole document without any header requirements.
pub fn parse_table(text: &str) -> Result<Table, CsvError> {
    read_table(text, &[])
}

/// Names from `required` that are absent from `headers`, in `required` order.
pub fn missing_headers(headers: &[String], required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !headers.iter().any(|h| h == *name))
        .map(|name| name.to_string())
        .collect()
}

fn read_table(text: &str, required: &[&str]) -> Result<Table, CsvError> {
    let normalized = normalize(text);
    let body = normalized.trim();
    if body.is_empty() {
        return Err(CsvError::Empty);
    }

    // Blank lines removed by the trim still count toward line numbers.
    let trimmed_len = normalized.len() - normalized.trim_start().len();
    let skipped = normalized[..trimmed_len].matches('\n').count();

    let mut lines = body
        .split('\n')
        .enumerate()
        .map(|(i, line)| (skipped + i + 1, line));

    let (_, header_line) = lines.next().ok_or(CsvError::Empty)?;
    let headers = split_fields(header_line);

    let missing = missing_headers(&headers, required);
    if !missing.is_empty() {
        return Err(CsvError::MissingHeaders(missing));
    }

    let mut rows = Vec::new();
    for (line, text) in lines {
        if text.trim().is_empty() {
            continue;
        }
        let fields = split_fields(text);
        if fields.len() != headers.len() {
            return Err(CsvError::RowShape {
                line,
                expected: headers.len(),
                found: fields.len(),
            });
        }
        rows.push(Row { line, fields });
    }

    Ok(Table { headers, rows })
}

/// One data row as named fields, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new(line: usize, fields: Vec<(String, String)>) -> Self {
        Self { line, fields }
    }

    /// Value of the named column. When a header repeats, the last column wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(header, _)| header == name)
            .map(|(_, value)| value.as_str())
    }

    /// Like [`Record::get`], but an absent column reads as the empty string.
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(h, _)| h.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A fixed record shape that can be built from a CSV row.
pub trait FromRecord: Sized {
    /// Headers that must be present for the shape to be constructible.
    const REQUIRED: &'static [&'static str];

    fn from_record(record: &Record) -> Result<Self, CsvError>;
}

/// Pass-through: every header present in the source becomes a field.
impl FromRecord for Record {
    const REQUIRED: &'static [&'static str] = &[];

    fn from_record(record: &Record) -> Result<Self, CsvError> {
        Ok(record.clone())
    }
}

/// Parse a document into `T`, validating `T::REQUIRED` against the header.
pub fn parse<T: FromRecord>(text: &str) -> Result<Vec<T>, CsvError> {
    read_table(text, T::REQUIRED)?
        .into_records()
        .iter()
        .map(T::from_record)
        .collect()
}

/// Like [`parse`], keeping each value's 1-based source line.
pub fn parse_numbered<T: FromRecord>(text: &str) -> Result<Vec<(usize, T)>, CsvError> {
    read_table(text, T::REQUIRED)?
        .into_records()
        .iter()
        .map(|record| Ok((record.line, T::from_record(record)?)))
        .collect()
}

/// Parse a document into generic records, keeping whatever headers it has.
pub fn parse_records(text: &str) -> Result<Vec<Record>, CsvError> {
    parse::<Record>(text)
}

/// Format a header and rows as CSV text that [`parse_table`] reads back.
///
/// Fields containing `,` or `"` are quoted, with embedded quotes doubled.
pub fn write_table<H, R, F>(headers: &[H], rows: &[R]) -> String
where
    H: AsRef<str>,
    R: AsRef<[F]>,
    F: AsRef<str>,
{
    let mut out = write_row(headers);
    for row in rows {
        out.push_str(&write_row(row.as_ref()));
    }
    out
}

fn write_row<F: AsRef<str>>(fields: &[F]) -> String {
    let mut line = fields
        .iter()
        .map(|f| quote_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    // A blank line would be skipped on read; keep the row as one empty field.
    if line.trim().is_empty() {
        line = "\"\"".to_string();
    }
    line.push('\n');
    line
}

fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
