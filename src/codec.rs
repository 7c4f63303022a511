//! Delimited text codec for translation tables.
//!
//! Fields are separated by a configurable character and rows by a line
//! terminator (`\n`, `\r\n` or a lone `\r`). A field is wrapped in double
//! quotes only when it contains the separator, a double quote or a line
//! terminator; embedded quotes are doubled.

use std::fs::{
    self,
    File,
};
use std::io::{
    self,
    BufWriter,
    Write,
};
use std::iter::Peekable;
use std::path::{
    Path,
    PathBuf,
};
use std::str::Chars;

use thiserror::Error;

use crate::error::TranslatorError;

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = ',';

/// A decoded table: rows of fields, rows may differ in length.
pub type Rows = Vec<Vec<String>>;

/// Text-level failures of [`decode`] and [`encode`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// A quoted field was still open at end of input.
    #[error("Unterminated quoted field starting on line {line}")]
    UnterminatedQuote {
        /// 1-based line of the opening quote.
        line: usize,
    },

    /// The separator is a double quote or a line terminator.
    #[error("Invalid separator {0:?}: a separator cannot be a double quote or a line terminator")]
    InvalidSeparator(char),
}

/// Rejects separators that would make quoting ambiguous.
pub const fn validate_separator(separator: char) -> Result<(), CodecError> {
    if matches!(separator, '"' | '\n' | '\r') {
        Err(CodecError::InvalidSeparator(separator))
    } else {
        Ok(())
    }
}

/// Decode delimited text into rows.
///
/// A trailing line terminator does not produce an extra row, while an empty
/// line in the middle of the input decodes to a row with one empty field.
/// A leading byte order mark is ignored.
///
/// # Examples
/// ```
/// use locale_table::codec::decode;
///
/// let rows = decode("en,es\n\"Say \"\"hi\"\"\",\"Di, \"\"hola\"\"\"\n", ',').unwrap();
/// assert_eq!(rows[1], vec!["Say \"hi\"".to_string(), "Di, \"hola\"".to_string()]);
/// ```
pub fn decode(text: &str, separator: char) -> Result<Rows, CodecError> {
    validate_separator(separator)?;

    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut chars = text.chars().peekable();

    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut line = 1;
    let mut at_field_start = true;
    let mut row_has_content = false;

    while let Some(c) = chars.next() {
        if at_field_start && c == '"' {
            let opened_on = line;
            if !read_quoted(&mut chars, &mut field, &mut line) {
                return Err(CodecError::UnterminatedQuote { line: opened_on });
            }
            at_field_start = false;
            row_has_content = true;
            continue;
        }

        match c {
            c if c == separator => {
                row.push(std::mem::take(&mut field));
                at_field_start = true;
                row_has_content = true;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line += 1;
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                at_field_start = true;
                row_has_content = false;
            }
            other => {
                field.push(other);
                at_field_start = false;
                row_has_content = true;
            }
        }
    }

    if row_has_content {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}

/// Consume a quoted field body after its opening quote.
///
/// Returns `false` if input ended before the closing quote.
fn read_quoted(chars: &mut Peekable<Chars<'_>>, field: &mut String, line: &mut usize) -> bool {
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    return true;
                }
            }
            '\n' => {
                *line += 1;
                field.push(c);
            }
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    *line += 1;
                }
                field.push(c);
            }
            other => field.push(other),
        }
    }
    false
}

/// Encode rows into delimited text, one `\n`-terminated line per row.
pub fn encode<R, F>(rows: R, separator: char) -> Result<String, CodecError>
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = F>,
    F: AsRef<str>,
{
    validate_separator(separator)?;

    let mut out = String::new();
    for row in rows {
        for (index, field) in row.into_iter().enumerate() {
            if index > 0 {
                out.push(separator);
            }
            write_field(&mut out, field.as_ref(), separator);
        }
        out.push('\n');
    }
    Ok(out)
}

/// Whether `field` must be wrapped in quotes.
fn needs_quoting(field: &str, separator: char) -> bool {
    field.chars().any(|c| c == separator || matches!(c, '"' | '\n' | '\r'))
}

/// Append one field, quoted if needed.
fn write_field(out: &mut String, field: &str, separator: char) {
    if needs_quoting(field, separator) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

/// Read and decode a file.
///
/// A missing file yields no rows.
pub fn read_file(path: &Path, separator: char) -> Result<Rows, TranslatorError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(decode(&text, separator)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Translations file not found");
            Ok(Vec::new())
        }
        Err(e) => Err(TranslatorError::file_access(path, e)),
    }
}

/// Encode rows and replace `path` with the result.
///
/// The content is written to a sibling staging file, flushed and synced, then
/// renamed over the target. The staging file is removed on failure.
pub fn write_file<R, F>(path: &Path, rows: R, separator: char) -> Result<(), TranslatorError>
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = F>,
    F: AsRef<str>,
{
    let text = encode(rows, separator)?;
    let staging = staging_path(path);

    let result = write_synced(&staging, text.as_bytes()).and_then(|()| fs::rename(&staging, path));
    if let Err(e) = result {
        if let Err(cleanup) = fs::remove_file(&staging)
            && cleanup.kind() != io::ErrorKind::NotFound
        {
            tracing::warn!(path = %staging.display(), "Failed to remove staging file: {cleanup}");
        }
        return Err(TranslatorError::file_access(path, e));
    }

    Ok(())
}

/// Write `bytes` to `path` and sync it to disk.
fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    file.sync_all()
}

/// Sibling staging file for `path`: `.{name}.tmp`.
fn staging_path(path: &Path) -> PathBuf {
    let name = path.file_name().map_or_else(
        || "translations".to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    path.with_file_name(format!(".{name}.tmp"))
}
