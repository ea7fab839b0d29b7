//! Supported catalog file formats.
//!
//! Provides the [`FormatType`] enum used to accept or reject input paths by extension.

pub mod po;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

use crate::Error;

/// Catalog formats understood by the reader.
///
/// Both share the same grammar; `.pot` templates usually carry empty `msgstr`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Gettext `.po` translation catalog.
    Po,
    /// Gettext `.pot` template.
    Pot,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use pocodec::formats::FormatType;
/// assert_eq!(FormatType::Po.to_string(), "po");
/// assert_eq!(FormatType::Pot.to_string(), "pot");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Po => write!(f, "po"),
            FormatType::Pot => write!(f, "pot"),
        }
    }
}

/// Accepts `"po"`, `"gettext"` and `"pot"`, case-insensitively.
///
/// Returns [`crate::error::Error::UnknownFormat`] for anything else.
///
/// # Example
/// ```rust
/// use pocodec::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("PO").unwrap(), FormatType::Po);
/// assert!(FormatType::from_str("xliff").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "po" | "gettext" => Ok(FormatType::Po),
            "pot" => Ok(FormatType::Pot),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Po => "po",
            FormatType::Pot => "pot",
        }
    }

    /// Infers the format from a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        match path.as_ref().extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("po") => Ok(FormatType::Po),
            Some(ext) if ext.eq_ignore_ascii_case("pot") => Ok(FormatType::Pot),
            extension => Err(Error::UnsupportedFormat(format!(
                "Unsupported file extension: {:?}.",
                extension
            ))),
        }
    }
}
