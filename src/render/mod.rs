//! Minimal double-brace template rendering.
//!
//! The template dialect is deliberately small: `{{identifier}}` placeholders
//! substituted from a flat [`Mappings`] set. Unresolved placeholders render
//! as the empty string, never an error, so partial variable sets still
//! produce output. This module also covers pass-through loading of verbatim
//! files (glob-expanded, directories silently skipped).

use crate::core::{ConfgenError, FileMap, Mappings, Result};
use std::path::Path;
use std::sync::LazyLock;

/// Placeholder syntax: `{{name}}` with optional inner whitespace. Names are
/// identifier-like and may contain dashes and dots.
static PLACEHOLDER: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_.-]*)\s*\}\}").expect("placeholder regex")
});

/// Substitutes `variables` into the double-brace placeholders of `template`.
///
/// Placeholders with no matching variable are replaced by the empty string.
/// The only failure mode is template content that is not valid UTF-8.
pub fn render(template: &[u8], variables: &Mappings) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(template)?;
    let rendered = PLACEHOLDER.replace_all(text, |caps: &regex::Captures<'_>| {
        variables.get(&caps[1]).map(String::as_str).unwrap_or("").to_string()
    });
    Ok(rendered.into_owned().into_bytes())
}

/// Loads a template from disk without rendering it.
///
/// Returns `None` when `path` is a directory; path lists coming from target
/// definitions may contain directories and those are skipped, not errors.
pub fn load_template(path: impl AsRef<Path>) -> Result<Option<Vec<u8>>> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(None);
    }
    std::fs::read(path)
        .map(Some)
        .map_err(|err| ConfgenError::read(format!("failed to read template '{}'", path.display()), err))
}

/// Renders each template file in `paths` with `variables`.
///
/// Output keys are the template paths as given. Directories in the list are
/// skipped silently.
pub fn render_files(paths: &[String], variables: &Mappings) -> Result<FileMap> {
    let mut outputs = FileMap::new();
    for path in paths {
        let Some(template) = load_template(path)? else {
            continue;
        };
        outputs.insert(path.clone(), render(&template, variables)?);
    }
    Ok(outputs)
}

/// Loads files verbatim, expanding each entry as a glob pattern.
///
/// Matched directories are skipped. Output keys are the expanded paths.
pub fn load_files(paths: &[String]) -> Result<FileMap> {
    let mut outputs = FileMap::new();
    for pattern in paths {
        let entries = glob::glob(pattern).map_err(|err| {
            ConfgenError::read(
                format!("invalid glob pattern '{pattern}'"),
                std::io::Error::other(err),
            )
        })?;
        for entry in entries {
            let path = entry.map_err(|err| {
                ConfgenError::read(format!("failed to expand glob '{pattern}'"), err.into_error())
            })?;
            if path.is_dir() {
                continue;
            }
            let contents = std::fs::read(&path).map_err(|err| {
                ConfgenError::read(format!("failed to read file '{}'", path.display()), err)
            })?;
            outputs.insert(path.to_string_lossy().into_owned(), contents);
        }
    }
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Mappings {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let out = render(
            b"dhcp-host={{mac}},{{ip}}\n",
            &vars(&[("mac", "aa:bb:cc:dd:ee:ff"), ("ip", "10.0.0.1")]),
        )
        .unwrap();
        assert_eq!(out, b"dhcp-host=aa:bb:cc:dd:ee:ff,10.0.0.1\n");
    }

    #[test]
    fn test_render_unresolved_placeholder_is_empty() {
        let out = render(b"a={{missing}};b={{present}}", &vars(&[("present", "1")])).unwrap();
        assert_eq!(out, b"a=;b=1");
    }

    #[test]
    fn test_render_tolerates_whitespace_and_literal_braces() {
        let out = render(b"{{ name }} {not a placeholder}", &vars(&[("name", "x")])).unwrap();
        assert_eq!(out, b"x {not a placeholder}");
    }

    #[test]
    fn test_render_is_idempotent_for_same_inputs() {
        let variables = vars(&[("mac", "aa:bb:cc:dd:ee:ff")]);
        let template = b"dhcp-host={{mac}}";
        assert_eq!(
            render(template, &variables).unwrap(),
            render(template, &variables).unwrap()
        );
    }

    #[test]
    fn test_render_rejects_invalid_utf8() {
        assert!(render(&[0xff, 0xfe, b'{'], &Mappings::new()).is_err());
    }

    #[test]
    fn test_load_files_skips_directories() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("subdir")).unwrap();
        std::fs::write(temp.path().join("a.conf"), "static").unwrap();

        let pattern = format!("{}/*", temp.path().display());
        let outputs = load_files(&[pattern]).unwrap();
        assert_eq!(outputs.len(), 1);
        assert!(outputs.keys().next().unwrap().ends_with("a.conf"));
    }

    #[test]
    fn test_render_files_skips_directories() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("templates");
        std::fs::create_dir(&dir).unwrap();
        let tpl = temp.path().join("one.tpl");
        std::fs::write(&tpl, "v={{v}}").unwrap();

        let outputs = render_files(
            &[dir.to_string_lossy().into_owned(), tpl.to_string_lossy().into_owned()],
            &vars(&[("v", "42")]),
        )
        .unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs.values().next().unwrap(), b"v=42");
    }
}
