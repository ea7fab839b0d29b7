#![forbid(unsafe_code)]
//! Streaming reader for gettext PO/POT translation catalogs.
//!
//! Catalog text is read in stages: a lexer turns lines into tokens, an assembler
//! groups tokens into entries, and each entry becomes either the catalog header
//! ([`LocalizationMetadata`]) or a [`LocalizedString`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pocodec::{CatalogEntry, Codec};
//!
//! let mut codec = Codec::new();
//! codec.add_path("locale/fr.po")?;
//! for entry in codec.parse() {
//!     match entry? {
//!         CatalogEntry::Metadata(metadata) => println!("{}", metadata),
//!         CatalogEntry::LocalizedString(string) => println!("{}", string),
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod error;
pub mod formats;
pub mod read_options;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{Codec, Entries, ParseSession, entries_from_reader},
    error::Error,
    formats::FormatType,
    read_options::ReadOptions,
    types::{Catalog, CatalogEntry, Gender, LocalizationMetadata, LocalizedString},
};
