//! Minimal CSV reading and writing
//!
//! Handles what spreadsheet exports and graph tools actually produce:
//! - quoted fields with doubled quotes, embedded commas and newlines
//! - CRLF or LF line endings, UTF-8 BOM on the first header cell
//! - blank lines between records are skipped

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::{GraphError, GraphResult};

const BOM: char = '\u{feff}';

/// Streaming record reader
pub struct CsvReader<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl CsvReader<BufReader<File>> {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// Current physical line number (1-based, 0 before the first read)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read the header record. Empty input yields no headers.
    pub fn headers(&mut self) -> GraphResult<Vec<String>> {
        Ok(self.read_record()?.unwrap_or_default())
    }

    /// Read the next record, or `None` at end of input
    pub fn read_record(&mut self) -> GraphResult<Option<Vec<String>>> {
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut started = false;

        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                if in_quotes {
                    return Err(GraphError::Csv {
                        line: self.line,
                        message: "unterminated quoted field".to_string(),
                    });
                }
                if !started {
                    return Ok(None);
                }
                fields.push(field);
                return Ok(Some(fields));
            }
            self.line += 1;

            let mut line = self.buf.trim_end_matches(|c: char| c == '\n' || c == '\r');
            if self.line == 1 {
                line = line.trim_start_matches(BOM);
            }
            if !started && line.is_empty() {
                continue;
            }
            if started {
                // continuation of a quoted field across a line break
                field.push('\n');
            }
            started = true;

            let mut chars = line.chars().peekable();
            while let Some(c) = chars.next() {
                if in_quotes {
                    if c == '"' {
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            field.push('"');
                        } else {
                            in_quotes = false;
                        }
                    } else {
                        field.push(c);
                    }
                    continue;
                }

                match c {
                    '"' if field.is_empty() => in_quotes = true,
                    ',' => fields.push(std::mem::take(&mut field)),
                    _ => field.push(c),
                }
            }

            if !in_quotes {
                fields.push(field);
                return Ok(Some(fields));
            }
        }
    }
}

/// Record writer producing RFC 4180 style output with `\n` line endings
pub struct CsvWriter<W: Write> {
    inner: W,
}

impl CsvWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_record<I, S>(&mut self, record: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut first = true;
        for cell in record {
            if !first {
                self.inner.write_all(b",")?;
            }
            first = false;
            self.inner.write_all(escape_field(cell.as_ref()).as_bytes())?;
        }
        self.inner.write_all(b"\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Quote a cell if it contains a comma, quote or line break
pub fn escape_field(s: &str) -> Cow<'_, str> {
    if s.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(s)
    }
}
