//! # movabletype
//!
//! Parser for the Movable Type import/export text format.
//!
//! ## Format
//!
//! An export is a sequence of records. Each record is a block of
//! single-line `KEY: value` fields, followed by multi-line fields, and is
//! closed by a line of eight hyphens:
//!
//! ```text
//! AUTHOR: catatsuy
//! TITLE: Hello
//! STATUS: Publish
//! DATE: 04/22/2017 08:41:58 PM
//! CATEGORY: Diary
//! -----
//! BODY:
//! <p>body</p>
//! -----
//! --------
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use movabletype::parse;
//!
//! let entries = parse(std::io::stdin())?;
//! for entry in &entries {
//!     println!("{} {}", entry.date_utc().map(|d| d.to_rfc3339()).unwrap_or_default(), entry.title);
//! }
//! ```
//!
//! Records are also available one at a time through [`Entries`]:
//!
//! ```ignore
//! use movabletype::Entries;
//!
//! let file = std::io::BufReader::new(std::fs::File::open("export.txt")?);
//! for entry in Entries::new(file) {
//!     println!("{}", entry?.title);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod entry;
mod error;
mod parser;

pub mod field;

pub use entry::{DEFAULT_ALLOW_COMMENTS, DEFAULT_ALLOW_PINGS, Entry, Status};
pub use error::{Error, Result};
pub use parser::{Entries, parse, parse_str};
