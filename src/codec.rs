//! This module provides the [`Codec`] struct, which registers catalog files and
//! streams their contents as [`CatalogEntry`] values.
//!
//! Files are opened one at a time, in registration order, and each reader is
//! dropped as soon as its entries are exhausted, fail, or the consumer stops
//! iterating.

use std::{
    io::BufRead,
    path::{Path, PathBuf},
    slice,
};

use tracing::debug;

use crate::{
    error::Error,
    formats::{
        FormatType,
        po::{Lexer, Unit, Units, classify, parse_message},
    },
    read_options::{CatalogReader, ReadOptions},
    types::{Catalog, CatalogEntry},
};

/// Per-`parse()` state. The header can be recognized at most once, across all
/// files of the same parse.
#[derive(Debug, Default)]
pub struct ParseSession {
    header_recognized: bool,
}

impl ParseSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header_recognized(&self) -> bool {
        self.header_recognized
    }

    /// Turns one unit into a catalog entry.
    pub fn convert(&mut self, unit: Unit) -> CatalogEntry {
        if !self.header_recognized {
            if let Some(metadata) = classify(&unit) {
                debug!(keys = metadata.len(), "recognized catalog header");
                self.header_recognized = true;
                return CatalogEntry::Metadata(metadata);
            }
        }
        CatalogEntry::LocalizedString(parse_message(unit))
    }

    /// Adapts a unit stream into an entry stream driven by this session.
    pub fn entries<I>(mut self, units: I) -> impl Iterator<Item = Result<CatalogEntry, Error>>
    where
        I: Iterator<Item = Result<Unit, Error>>,
    {
        units.map(move |unit| unit.map(|unit| self.convert(unit)))
    }
}

type FileUnits = Units<Lexer<CatalogReader>>;

/// A registry of catalog files to read.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    paths: Vec<PathBuf>,
    options: ReadOptions,
}

impl Codec {
    /// Creates a new, empty `Codec`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `Codec` that opens files with the given options.
    pub fn with_options(options: ReadOptions) -> Self {
        Codec {
            paths: Vec::new(),
            options,
        }
    }

    /// Registers a `.po` or `.pot` file. Files are read in registration order.
    ///
    /// # Returns
    ///
    /// The detected format, or [`Error::UnsupportedFormat`] for any other extension.
    /// The file itself is not opened until [`Codec::parse`] reaches it.
    pub fn add_path<P: AsRef<Path>>(&mut self, path: P) -> Result<FormatType, Error> {
        let format = FormatType::from_path(&path)?;
        self.paths.push(path.as_ref().to_path_buf());
        Ok(format)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Streams the entries of every registered file.
    ///
    /// Each call starts a fresh [`ParseSession`], so the header is looked for
    /// again; within one call it is reported at most once.
    pub fn parse(&self) -> Entries<'_> {
        Entries {
            paths: self.paths.iter(),
            options: &self.options,
            current: None,
            session: ParseSession::new(),
            done: false,
        }
    }

    /// Reads every registered file into one [`Catalog`].
    pub fn read_catalog(&self) -> Result<Catalog, Error> {
        self.parse().collect()
    }
}

/// Lazy entry stream returned by [`Codec::parse`].
pub struct Entries<'a> {
    paths: slice::Iter<'a, PathBuf>,
    options: &'a ReadOptions,
    current: Option<FileUnits>,
    session: ParseSession,
    done: bool,
}

impl Entries<'_> {
    fn open_next(&mut self) -> Result<bool, Error> {
        let Some(path) = self.paths.next() else {
            return Ok(false);
        };
        debug!(path = %path.display(), "opening catalog");
        let reader = self.options.open(path)?;
        self.current = Some(Units::new(Lexer::new(
            reader,
            path.display().to_string(),
        )));
        Ok(true)
    }

    fn fail(&mut self, error: Error) -> Option<Result<CatalogEntry, Error>> {
        self.done = true;
        self.current = None;
        Some(Err(error))
    }
}

impl Iterator for Entries<'_> {
    type Item = Result<CatalogEntry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some(units) = self.current.as_mut() {
                match units.next() {
                    Some(Ok(unit)) => return Some(Ok(self.session.convert(unit))),
                    Some(Err(error)) => return self.fail(error),
                    None => {
                        debug!("catalog exhausted");
                        self.current = None;
                    }
                }
            }
            match self.open_next() {
                Ok(true) => {}
                Ok(false) => {
                    self.done = true;
                    return None;
                }
                Err(error) => return self.fail(error),
            }
        }
    }
}

impl std::iter::FusedIterator for Entries<'_> {}

/// Reads entries from an in-memory source. `origin` names it in error messages.
pub fn entries_from_reader<R: BufRead>(
    reader: R,
    origin: impl Into<String>,
) -> impl Iterator<Item = Result<CatalogEntry, Error>> {
    ParseSession::new().entries(Units::new(Lexer::new(reader, origin)))
}
