//! Detection of the catalog header entry.
//!
//! The header is the `msgid ""` entry whose `msgstr` holds `Key: Value` lines:
//!
//! ```text
//! msgid ""
//! msgstr ""
//! "Project-Id-Version: demo 1.0\n"
//! "Language: fr\n"
//! "Content-Type: text/plain; charset=UTF-8\n"
//! ```

use tracing::trace;

use crate::{formats::po::unit::Unit, types::LocalizationMetadata};

const REQUIRED_KEYS: [&str; 3] = ["project-id-version:", "language:", "content-type:"];

/// Returns the parsed header if `unit` has the shape of a catalog header.
///
/// A value line without a colon makes the whole unit an ordinary message, so
/// `None` is a soft result rather than an error.
pub fn classify(unit: &Unit) -> Option<LocalizationMetadata> {
    let [id, value] = unit.messages.as_slice() else {
        return None;
    };
    if id.identifier != "msgid" || !id.value.is_empty() || value.identifier != "msgstr" {
        return None;
    }

    let folded = value.value.to_lowercase();
    if !REQUIRED_KEYS.iter().all(|key| folded.contains(key)) {
        return None;
    }

    let mut metadata = LocalizationMetadata::new();
    for line in value.value.split('\n').filter(|line| !line.trim().is_empty()) {
        let Some((key, val)) = line.split_once(':') else {
            trace!(line, "header candidate rejected: line without a colon");
            return None;
        };
        metadata.insert(key.trim(), val.trim());
    }
    Some(metadata)
}
