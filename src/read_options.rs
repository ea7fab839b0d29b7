//! Options controlling how catalog files are opened and decoded.

use std::{fs::File, io::BufReader, path::Path};

use encoding_rs::Encoding;
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};

use crate::error::Error;

/// A buffered, decoded reader over one catalog file.
pub type CatalogReader = BufReader<DecodeReaderBytes<File, Vec<u8>>>;

/// Read behavior options for [`crate::Codec`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadOptions {
    /// Encoding used when a file has no byte-order mark. `None` means UTF-8.
    pub encoding: Option<&'static Encoding>,
}

impl ReadOptions {
    /// Creates default read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback encoding, e.g. `encoding_rs::WINDOWS_1252` for legacy catalogs.
    pub fn with_encoding(mut self, encoding: Option<&'static Encoding>) -> Self {
        self.encoding = encoding;
        self
    }

    /// Opens `path` for reading. A BOM, when present, overrides the configured
    /// encoding and is stripped from the output.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<CatalogReader, Error> {
        let file = File::open(path).map_err(Error::Io)?;
        let decoder = DecodeReaderBytesBuilder::new()
            .encoding(self.encoding)
            .bom_override(true)
            .strip_bom(true)
            .build(file);
        Ok(BufReader::new(decoder))
    }
}
