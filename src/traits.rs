//! Traits for reading whole catalogs in pocodec.

use std::{
    io::{BufRead, Cursor},
    path::Path,
};

use crate::{
    codec::entries_from_reader,
    error::Error,
    read_options::ReadOptions,
    types::Catalog,
};

/// A trait for parsing a localization resource from one source.
///
/// # Example
///
/// ```rust,no_run
/// use pocodec::{Catalog, traits::Parser};
/// let catalog = Catalog::read_from("locale/fr/LC_MESSAGES/app.po")?;
/// println!("{} strings", catalog.strings.len());
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader; `origin` names the source in error messages.
    fn from_named_reader<R: BufRead>(reader: R, origin: &str) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_named_reader(reader, "<input>")
    }

    /// Parse from file path, decoding it as [`ReadOptions::default`] does.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let reader = ReadOptions::default().open(path)?;
        Self::from_named_reader(reader, &path.display().to_string())
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl Parser for Catalog {
    fn from_named_reader<R: BufRead>(reader: R, origin: &str) -> Result<Self, Error> {
        entries_from_reader(reader, origin).collect()
    }
}
