//! Error types for confgen.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`ConfgenError`]) for precise handling in
//!    the resolver, which must distinguish "skip this target" from "abort
//!    the invocation".
//! 2. **User-friendly display** at the CLI boundary, where `main` prints the
//!    message chain and exits non-zero.
//!
//! # Propagation policy
//!
//! Per-target failures (inventory fetch, extension load, template/file
//! reads, generation) are logged by the resolver and the offending target
//! is skipped; siblings are unaffected. Materialization failures ([`ConfgenError::Write`]) are fatal
//! for the whole invocation because partial output on disk must not go
//! unsignaled.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for confgen operations.
///
/// Each variant maps to one failure kind the system distinguishes:
/// transport vs. decode on the inventory side, the three extension-loading
/// stages, unknown targets, required-but-empty inventory, and filesystem
/// failures during materialization.
#[derive(Error, Debug)]
pub enum ConfgenError {
    /// The inventory service could not be reached or returned an HTTP-level
    /// failure.
    #[error("inventory service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The inventory response body was not valid JSON or did not match the
    /// expected shape.
    #[error("failed to decode inventory response: {reason}")]
    Decode {
        /// What was wrong with the payload.
        reason: String,
    },

    /// An extension file could not be opened or parsed at all.
    #[error("failed to load extension '{path}': {reason}")]
    ExtensionLoad {
        /// Path of the offending extension file.
        path: PathBuf,
        /// Underlying read/parse failure.
        reason: String,
    },

    /// The extension file parsed but does not expose the `generator` entry
    /// point.
    #[error("extension '{path}' does not expose a 'generator' entry")]
    ExtensionEntryPoint {
        /// Path of the offending extension file.
        path: PathBuf,
    },

    /// The `generator` entry is present but does not satisfy the full
    /// capability set (name, version, description, generation recipe).
    #[error("extension '{path}' is missing required capability '{capability}'")]
    ExtensionCapability {
        /// Path of the offending extension file.
        path: PathBuf,
        /// The first missing or empty capability field.
        capability: &'static str,
    },

    /// The target name matches neither the target graph nor any registered
    /// generator.
    #[error("unknown target '{0}'")]
    UnknownTarget(String),

    /// Inventory returned zero records where at least one is required.
    #[error("no {kind} found in inventory")]
    EmptyInventory {
        /// Record kind that came back empty (e.g. "ethernet interfaces").
        kind: &'static str,
    },

    /// A registered generator exists but has no generation logic yet.
    #[error("generator '{0}' does not implement generation")]
    Unimplemented(String),

    /// Template content was not valid UTF-8.
    #[error("template is not valid UTF-8: {0}")]
    Render(#[from] std::str::Utf8Error),

    /// Filesystem failure while loading a target's templates or verbatim
    /// files. Skips the target, never the invocation.
    #[error("{context}: {source}")]
    Read {
        /// What was being read.
        context: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Filesystem failure while writing output. Fatal during
    /// materialization.
    #[error("{context}: {source}")]
    Write {
        /// What was being written.
        context: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl ConfgenError {
    /// Wraps an I/O error raised while reading an input file.
    pub fn read(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Read {
            context: context.into(),
            source,
        }
    }

    /// Wraps an I/O error raised while writing output.
    pub fn write(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Write {
            context: context.into(),
            source,
        }
    }

    /// Whether this error aborts the whole invocation rather than just the
    /// target that raised it.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}
