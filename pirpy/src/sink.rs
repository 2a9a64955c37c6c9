//! Dumps of programs into per tag files.

use crate::{DumpConfig, DumpError};
use pirpy_compiler::Converter;
use pirpy_core::program::Program;
use std::collections::BTreeSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Diagnostics sink, converts programs and appends them to dump files.
///
/// Sink keeps the sequence number of generated classes and the set of files
/// already truncated. Each dump file is truncated by the first write into it
/// during the lifetime of the sink, later writes append. Share one sink
/// across threads for the whole process.
#[derive(Debug)]
pub struct DumpSink {
    config: DumpConfig,
    seq_no: AtomicU64,
    truncated: Mutex<BTreeSet<PathBuf>>,
}

impl DumpSink {
    /// Sink using config
    #[must_use]
    pub const fn new(config: DumpConfig) -> DumpSink {
        DumpSink { config, seq_no: AtomicU64::new(0), truncated: Mutex::new(BTreeSet::new()) }
    }

    /// Sink using [`DumpConfig::load`]
    #[must_use]
    pub fn from_env() -> DumpSink {
        DumpSink::new(DumpConfig::load())
    }

    /// Config of this sink
    #[must_use]
    pub const fn config(&self) -> &DumpConfig {
        &self.config
    }

    /// Take the next sequence number, unique within this sink
    pub fn next_seq_no(&self) -> u64 {
        self.seq_no.fetch_add(1, Ordering::Relaxed)
    }

    /// Convert program into python source under the next sequence number
    #[must_use]
    pub fn convert(&self, program: &Program) -> String {
        Converter::new(program, self.next_seq_no()).with_indent_size(self.config.indent_size).convert()
    }

    /// Append program to dump file of tag if dumping is enabled.
    /// Failures are logged and dropped, dumping never fails the caller.
    pub fn save_if_configured(&self, tag: &str, program: &Program) {
        if let Err(e) = self.save(tag, program) {
            log::debug!("Dropped dump of {tag}, {e}");
        }
    }

    /// Append program to dump file of tag. Returns path of the written file,
    /// or None if dumping is disabled.
    pub fn save(&self, tag: &str, program: &Program) -> Result<Option<PathBuf>, DumpError> {
        let Some(path) = self.config.path(tag) else {
            return Ok(None);
        };
        let mut text = self.convert(program);
        text.push('\n');
        self.append(&path, &text)?;
        Ok(Some(path))
    }

    fn append(&self, path: &Path, text: &str) -> Result<(), DumpError> {
        // Lock is held while writing, so dumps of one file never interleave
        let mut truncated = self.truncated.lock().unwrap_or_else(PoisonError::into_inner);
        let first = !truncated.contains(path);
        let mut file = OpenOptions::new().create(true).write(true).truncate(first).append(!first).open(path)?;
        if first {
            log::debug!("Truncated {}", path.display());
            truncated.insert(path.to_path_buf());
        }
        file.write_all(text.as_bytes())?;
        log::debug!("Appended {} bytes to {}", text.len(), path.display());
        Ok(())
    }
}

impl Default for DumpSink {
    fn default() -> Self {
        DumpSink::new(DumpConfig::default())
    }
}
