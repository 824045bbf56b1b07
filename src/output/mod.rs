//! Output materialization.
//!
//! Decides what to do with a generated [`FileMap`]: print to standard
//! output, write a single file, fan out into a directory, or bundle
//! everything into a gzip-compressed tar archive. The decision depends on
//! whether a destination is set, how many targets produced the outputs,
//! and how many files there are:
//!
//! | destination | targets | files | action |
//! |---|---|---|---|
//! | unset | any | 1 | print the content |
//! | unset | any | >1 | print `key: size` blocks |
//! | set | 1 | 1 | write the file verbatim |
//! | set (archive) | any | any | write `<destination>.tar.gz` |
//! | set | >1 or files>1 | any | directory, one file per key basename |
//!
//! The materializer is called once per resolution wave, so it keeps a
//! little state across calls: once any write has landed, later waves
//! always fan out into the directory (a lone second-wave file must not
//! replace an earlier verbatim write), and archive mode accumulates all
//! waves so the archive on disk always holds the whole run.
//!
//! Any filesystem failure here is fatal for the whole invocation; partial
//! writes are not rolled back.

use crate::core::{ConfgenError, FileMap, Result};
use crate::resolver::WaveSink;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

/// Materializes generated outputs according to the invocation context.
#[derive(Debug, Clone, Default)]
pub struct Materializer {
    destination: Option<PathBuf>,
    archive: bool,
    /// Union of every wave materialized so far; archive mode rewrites the
    /// archive from this on each call.
    accumulated: FileMap,
    /// Set after the first write lands; later waves always fan out.
    wrote: bool,
}

impl Materializer {
    /// Creates a materializer.
    ///
    /// `destination` unset prints to standard output; `archive` bundles
    /// everything into `<destination>.tar.gz` instead of fanning out.
    #[must_use]
    pub fn new(destination: Option<PathBuf>, archive: bool) -> Self {
        Self {
            destination,
            archive,
            accumulated: FileMap::new(),
            wrote: false,
        }
    }

    /// Applies the decision table to one output set.
    pub fn materialize(&mut self, outputs: &FileMap, target_count: usize) -> Result<()> {
        if outputs.is_empty() {
            return Ok(());
        }
        match &self.destination {
            None => {
                Self::print(outputs);
                Ok(())
            }
            Some(destination) if self.archive => {
                self.accumulated.extend(outputs.clone());
                Self::write_archive(destination, &self.accumulated)
            }
            Some(destination) if target_count == 1 && outputs.len() == 1 && !self.wrote => {
                self.wrote = true;
                let content = outputs.values().next().expect("one output");
                write_file(destination, content)
            }
            Some(destination) => {
                self.wrote = true;
                Self::write_directory(destination, outputs)
            }
        }
    }

    /// Prints outputs to standard output: bare content for a single file,
    /// `key: size` framed blocks otherwise.
    fn print(outputs: &FileMap) {
        if outputs.len() == 1 {
            let content = outputs.values().next().expect("one output");
            println!("{}", String::from_utf8_lossy(content));
            return;
        }
        for (key, content) in outputs {
            println!("{}: {} bytes", key, content.len());
            println!("{}", String::from_utf8_lossy(content));
        }
    }

    /// Creates the destination directory and writes each output under the
    /// basename of its key.
    fn write_directory(destination: &Path, outputs: &FileMap) -> Result<()> {
        std::fs::create_dir_all(destination).map_err(|err| {
            ConfgenError::write(
                format!("failed to create output directory '{}'", destination.display()),
                err,
            )
        })?;
        for (key, content) in outputs {
            let name = Path::new(key)
                .file_name()
                .map_or_else(|| key.clone(), |n| n.to_string_lossy().into_owned());
            write_file(&destination.join(name), content)?;
        }
        info!(directory = %destination.display(), files = outputs.len(), "wrote output directory");
        Ok(())
    }

    /// Bundles all outputs into `<destination>.tar.gz`, one entry per key.
    fn write_archive(destination: &Path, outputs: &FileMap) -> Result<()> {
        let mut path = destination.as_os_str().to_owned();
        path.push(".tar.gz");
        let path = PathBuf::from(path);

        let file = std::fs::File::create(&path).map_err(|err| {
            ConfgenError::write(format!("failed to create archive '{}'", path.display()), err)
        })?;
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        for (key, content) in outputs {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_mtime(chrono::Utc::now().timestamp().max(0) as u64);
            header.set_cksum();
            builder
                .append_data(&mut header, key, content.as_slice())
                .map_err(|err| {
                    ConfgenError::write(format!("failed to archive '{key}'"), err)
                })?;
        }

        let encoder = builder
            .into_inner()
            .map_err(|err| ConfgenError::write("failed to finalize archive", err))?;
        encoder
            .finish()
            .map_err(|err| ConfgenError::write("failed to flush archive", err))?;
        info!(archive = %path.display(), files = outputs.len(), "wrote output archive");
        Ok(())
    }
}

impl WaveSink for Materializer {
    fn write(&mut self, outputs: &FileMap, target_count: usize) -> Result<()> {
        self.materialize(outputs, target_count)
    }
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = std::fs::File::create(path).map_err(|err| {
        ConfgenError::write(format!("failed to create output file '{}'", path.display()), err)
    })?;
    file.write_all(content).map_err(|err| {
        ConfgenError::write(format!("failed to write output file '{}'", path.display()), err)
    })?;
    info!(file = %path.display(), bytes = content.len(), "wrote output file");
    Ok(())
}
