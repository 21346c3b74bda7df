//! Movable Type export parsing.
//!
//! The parser is a two-state machine over input lines. Outside a multi-line
//! field every line is classified with [`Line::classify`]; inside one, every
//! line up to the next `-----` is appended to the field verbatim.

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::field::{self, FIELD_SEPARATOR, HeaderKey, Line, MultilineField};
use std::io::{BufRead, BufReader, Lines, Read};
use std::iter::FusedIterator;
use std::mem;
use tracing::{debug, trace};

/// Parses every record from a reader.
///
/// Only records closed by a `--------` line are returned; a trailing record
/// without one is dropped.
///
/// # Errors
///
/// Returns the first error encountered. No records are returned in that case.
/// Input must be UTF-8: a line with invalid bytes fails with [`Error::Io`]
/// of kind `InvalidData`, so legacy exports (`Shift_JIS`, `EUC-JP`) need to be
/// transcoded before parsing.
pub fn parse<R: Read>(reader: R) -> Result<Vec<Entry>> {
    collect(Entries::new(BufReader::new(reader)))
}

/// Parses every record from in-memory text.
///
/// # Errors
///
/// Returns an error under the same conditions as [`parse`].
pub fn parse_str(input: &str) -> Result<Vec<Entry>> {
    collect(Entries::new(input.as_bytes()))
}

fn collect<R: BufRead>(entries: Entries<R>) -> Result<Vec<Entry>> {
    entries
        .collect::<Result<Vec<_>>>()
        .inspect(|entries| debug!(count = entries.len(), "Parsed Movable Type export"))
        .inspect_err(|e| debug!(error = %e, "Movable Type parse aborted"))
}

/// Parser state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Reading single-line fields and separators.
    Fields,
    /// Appending lines to a multi-line field.
    Capture(MultilineField),
}

/// Streaming iterator over the records of an export.
///
/// Yields each entry as soon as its `--------` line is read. After an error
/// the iterator is exhausted.
///
/// ```ignore
/// use movabletype::Entries;
///
/// for entry in Entries::new(std::io::stdin().lock()) {
///     let entry = entry?;
///     println!("{}", entry.title);
/// }
/// ```
#[derive(Debug)]
pub struct Entries<R> {
    lines: Lines<R>,
    state: State,
    current: Entry,
    /// Lines consumed since the last sealed record.
    pending_lines: usize,
    sealed: usize,
    done: bool,
}

impl<R: BufRead> Entries<R> {
    /// Creates an iterator reading from `reader`.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            state: State::Fields,
            current: Entry::new(),
            pending_lines: 0,
            sealed: 0,
            done: false,
        }
    }

    /// Number of records yielded so far.
    #[must_use]
    pub const fn sealed(&self) -> usize {
        self.sealed
    }

    fn step(&mut self, line: &str) -> Result<Option<Entry>> {
        self.pending_lines += 1;

        if let State::Capture(field) = self.state {
            if line == FIELD_SEPARATOR {
                trace!(field = field.name(), "End of multi-line field");
                self.state = State::Fields;
            } else {
                let text = multiline_mut(&mut self.current, field);
                text.push_str(line);
                text.push('\n');
            }
            return Ok(None);
        }

        match Line::classify(line) {
            Line::FieldSeparator | Line::Other => {}
            Line::RecordSeparator => return Ok(Some(self.seal())),
            Line::MultilineStart(field) => {
                trace!(field = field.name(), "Start of multi-line field");
                self.state = State::Capture(field);
            }
            Line::KeyValue { key, value } => match HeaderKey::parse(key) {
                Some(key) => apply(&mut self.current, key, value)?,
                None => trace!(key, "Ignoring unknown field"),
            },
        }
        Ok(None)
    }

    fn seal(&mut self) -> Entry {
        let entry = mem::take(&mut self.current);
        self.pending_lines = 0;
        self.sealed += 1;
        debug!(index = self.sealed - 1, title = %entry.title, "Sealed entry");
        entry
    }

    fn fail(&mut self, error: Error) -> Error {
        self.done = true;
        error
    }
}

impl<R: BufRead> Iterator for Entries<R> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let Some(line) = self.lines.next() else {
                self.done = true;
                if self.pending_lines > 0 {
                    debug!(
                        lines = self.pending_lines,
                        "Dropping unterminated trailing record"
                    );
                }
                return None;
            };

            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(self.fail(e.into()))),
            };

            match self.step(&line) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => {}
                Err(e) => return Some(Err(self.fail(e))),
            }
        }
    }
}

impl<R: BufRead> FusedIterator for Entries<R> {}

fn multiline_mut(entry: &mut Entry, field: MultilineField) -> &mut String {
    match field {
        MultilineField::Body => &mut entry.body,
        MultilineField::ExtendedBody => &mut entry.extended_body,
        MultilineField::Excerpt => &mut entry.excerpt,
        MultilineField::Keywords => &mut entry.keywords,
        MultilineField::Comment => &mut entry.comment,
    }
}

fn apply(entry: &mut Entry, key: HeaderKey, value: &str) -> Result<()> {
    match key {
        HeaderKey::Author => entry.author = value.to_string(),
        HeaderKey::Title => entry.title = value.to_string(),
        HeaderKey::Basename => entry.basename = value.to_string(),
        HeaderKey::Status => entry.status = Some(value.parse()?),
        HeaderKey::AllowComments => entry.allow_comments = field::parse_flag(key, value)?,
        HeaderKey::AllowPings => entry.allow_pings = field::parse_flag(key, value)?,
        HeaderKey::ConvertBreaks => entry.convert_breaks = value.to_string(),
        HeaderKey::Date => entry.date = Some(field::parse_date(value)?),
        HeaderKey::PrimaryCategory => entry.primary_category = value.to_string(),
        HeaderKey::Category => entry.categories.push(value.to_string()),
        HeaderKey::Image => entry.image = value.to_string(),
    }
    Ok(())
}
