use std::io::{self, prelude::*};

use log::debug;

use crate::utils::{header_text, split_directive, strip_comment};
use crate::xdifile::{XDIFile, MAX_COLUMNS};

use super::error::FormatError;
use super::header::HeaderBuilder;
use super::table::TableBuilder;

/// Where the reader is in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XDIParserState {
    /// Expecting the `XDI/<version>` line
    #[default]
    Start,
    /// Reading `key: value` fields
    Fields,
    /// Inside the free-text comment section opened by `///`
    Comments,
    /// Past the `#----` delimiter, before the first data row
    Labels,
    /// Reading data rows
    Data,
}

const BUFFER_SIZE: usize = 8192;

/**
A parser for XDI files. It reads the header up to the `#----` delimiter, then
the whitespace-delimited data rows that follow, and assembles an [`XDIFile`].

A header line may start with `#` or `;`. A `///` line opens the free-text
comment section, which runs until the delimiter. The first comment-marked
line after the delimiter, if there is one, labels any columns that no
`Column.N` field named.
*/
pub struct XDIReader<R: io::Read> {
    handle: io::BufReader<R>,
    state: XDIParserState,
    line_number: usize,
    filename: Option<String>,
}

impl<R: io::Read> XDIReader<R> {
    /// Create a new [`XDIReader`] wrapping the [`io::Read`] handle in an
    /// [`io::BufReader`]
    pub fn new(file: R) -> XDIReader<R> {
        Self::with_buffer_capacity(file, BUFFER_SIZE)
    }

    pub fn with_buffer_capacity(file: R, capacity: usize) -> XDIReader<R> {
        XDIReader {
            handle: io::BufReader::with_capacity(capacity, file),
            state: XDIParserState::Start,
            line_number: 0,
            filename: None,
        }
    }

    /// Record the name of the file being read on the resulting [`XDIFile`]
    pub fn with_filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn state(&self) -> XDIParserState {
        self.state
    }

    /// The number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn handle_start(&mut self, line: &str, header: &mut HeaderBuilder) -> Result<(), FormatError> {
        header.parse_version(line)?;
        self.state = XDIParserState::Fields;
        Ok(())
    }

    fn handle_field(&mut self, line: &str, header: &mut HeaderBuilder) -> Result<(), FormatError> {
        let text = header_text(line);
        if text.is_empty() {
            return Ok(());
        }
        if text.starts_with("---") {
            self.state = XDIParserState::Labels;
        } else if text.starts_with("//") {
            self.state = XDIParserState::Comments;
        } else {
            match split_directive(text) {
                Some((key, value)) => header.apply_directive(self.line_number, key, value)?,
                None => {
                    return Err(FormatError::MalformedDirective {
                        line: self.line_number,
                        content: line.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    fn handle_comment(&mut self, line: &str, header: &mut HeaderBuilder) {
        let text = header_text(line);
        if text.starts_with("---") {
            self.state = XDIParserState::Labels;
        } else {
            header.push_comment(text);
        }
    }

    fn handle_labels(
        &mut self,
        line: &str,
        header: &mut HeaderBuilder,
        table: &mut TableBuilder,
    ) -> Result<(), FormatError> {
        if let Some(text) = strip_comment(line) {
            header.set_label_line(self.line_number, text);
            return Ok(());
        }
        // Without any `Column.N` fields the first row decides the width
        let ncols = match header.declared_columns() {
            0 => line.split_ascii_whitespace().count(),
            n => n,
        };
        if ncols > MAX_COLUMNS {
            return Err(FormatError::TooManyColumns {
                line: self.line_number,
                index: ncols,
                max: MAX_COLUMNS,
            });
        }
        *table = TableBuilder::new(ncols);
        self.state = XDIParserState::Data;
        table.push_row(self.line_number, line)
    }

    fn read_line(&mut self, buffer: &mut String) -> io::Result<usize> {
        self.handle.read_line(buffer)
    }

    /// Read the whole stream and build the [`XDIFile`] it describes.
    ///
    /// Any [`FormatError`] stops the parse, and nothing read so far is kept.
    pub fn read(mut self) -> Result<XDIFile, FormatError> {
        let mut header = HeaderBuilder::default();
        let mut table = TableBuilder::default();
        let mut buffer = String::new();

        loop {
            buffer.clear();
            let b = self.read_line(&mut buffer)?;
            if b == 0 {
                break;
            }
            self.line_number += 1;

            let line = buffer.trim();
            // Skip empty lines, except that the version must be on the first one
            if line.is_empty() && self.state != XDIParserState::Start {
                continue;
            }

            match self.state {
                XDIParserState::Start => self.handle_start(line, &mut header)?,
                XDIParserState::Fields => self.handle_field(line, &mut header)?,
                XDIParserState::Comments => self.handle_comment(line, &mut header),
                XDIParserState::Labels => self.handle_labels(line, &mut header, &mut table)?,
                XDIParserState::Data => table.push_row(self.line_number, line)?,
            }
        }

        match self.state {
            XDIParserState::Start => return Err(FormatError::NotXDI(String::new())),
            XDIParserState::Fields | XDIParserState::Comments => {
                return Err(FormatError::MissingDataSection)
            }
            XDIParserState::Labels => match header.declared_columns() {
                0 => return Err(FormatError::NoColumns),
                n => table = TableBuilder::new(n),
            },
            XDIParserState::Data => {}
        }

        header.resolve_columns(table.ncols());
        debug!(
            "Read {} columns of {} points with {} metadata fields and {} warnings in {} lines",
            table.ncols(),
            table.npts(),
            header.metadata.len(),
            header.warnings.len(),
            self.line_number
        );
        Ok(header.into_file(table.build(), self.filename))
    }
}
