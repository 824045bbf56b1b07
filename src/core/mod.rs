//! Core types and error handling shared across the crate.
//!
//! The two aliases here are the currency of the generation pipeline:
//! [`FileMap`] is what every generator produces and what the materializer
//! consumes, and [`Mappings`] is the flat variable set fed to the template
//! renderer.

pub mod error;

pub use error::ConfgenError;

use std::collections::BTreeMap;

/// Output of one generation call: output key → rendered byte content.
///
/// Keys are opaque (a template path, a synthetic name, or a verbatim file
/// path) and unique within one call. A `BTreeMap` keeps iteration
/// deterministic for printing and archiving without promising any
/// producer-side ordering.
pub type FileMap = BTreeMap<String, Vec<u8>>;

/// Flat variable mapping substituted into `{{placeholder}}` templates.
pub type Mappings = BTreeMap<String, String>;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, ConfgenError>;

/// Crate version reported by built-in generators.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Converts a [`FileMap`] into string contents for JSON responses.
///
/// Invalid UTF-8 is replaced rather than rejected; generated configs are
/// text and a lossy conversion beats failing the whole response.
#[must_use]
pub fn contents_to_string(files: &FileMap) -> BTreeMap<String, String> {
    files
        .iter()
        .map(|(k, v)| (k.clone(), String::from_utf8_lossy(v).into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_to_string_lossy() {
        let mut files = FileMap::new();
        files.insert("a.conf".to_string(), b"plain text".to_vec());
        files.insert("b.conf".to_string(), vec![0xff, 0xfe]);

        let strings = contents_to_string(&files);
        assert_eq!(strings["a.conf"], "plain text");
        // invalid bytes are replaced, never an error
        assert!(!strings["b.conf"].is_empty());
    }
}
