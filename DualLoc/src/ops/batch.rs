//! Directory batch processing
//!
//! Every immediate child of a directory is run through [`process_file`] in
//! non-strict mode. Files are independent, so they are processed in parallel;
//! a failure is recorded and logged but never stops the other files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::{Mode, ProcessOptions, ProcessOutcome, process_file};
use crate::error::{Error, Result};

/// Result of a batch operation
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Number of files processed successfully
    pub success_count: usize,
    /// Number of files that failed
    pub fail_count: usize,
    /// Number of files skipped because of their extension
    pub skipped: usize,
    /// One message per processed or failed file, in file order
    pub messages: Vec<String>,
}

impl BatchResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.fail_count == 0
    }
}

/// Progress information during batch processing
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Files started so far (1-indexed)
    pub current: usize,
    /// Total number of files
    pub total: usize,
    /// File being started
    pub file: PathBuf,
}

/// List the files directly inside `dir`, sorted by path
pub fn find_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::InvalidPath(format!(
            "not a directory: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Resolve a path for comparison, keeping it as given when it cannot be resolved
fn canonical_or_raw(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Process every file in `dir`
pub fn process_directory<P: AsRef<Path>>(
    dir: P,
    mode: &Mode,
    options: ProcessOptions,
) -> Result<BatchResult> {
    process_directory_with_progress(dir, mode, options, |_| {})
}

/// Process every file in `dir`, reporting each file as it starts.
///
/// Only listing the directory can fail; per-file errors end up in the
/// returned [`BatchResult`]. The shared second input of inject/merge is
/// never processed as a file of its own.
pub fn process_directory_with_progress<P, F>(
    dir: P,
    mode: &Mode,
    options: ProcessOptions,
    progress: F,
) -> Result<BatchResult>
where
    P: AsRef<Path>,
    F: Fn(&BatchProgress) + Send + Sync,
{
    let dir = dir.as_ref();
    let files = find_files(dir)?;
    let options = options.with_strict(false);
    let companion = mode.companion().map(canonical_or_raw);

    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let skip_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = files.len();

    tracing::info!(
        "{}: {} files in {}",
        mode.as_str(),
        total,
        dir.display()
    );

    let messages: Vec<Option<String>> = files
        .par_iter()
        .map(|path| {
            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&BatchProgress {
                current,
                total,
                file: path.clone(),
            });

            let display_path = path.strip_prefix(dir).unwrap_or(path).display().to_string();

            if companion.as_ref() == Some(&canonical_or_raw(path)) {
                skip_counter.fetch_add(1, Ordering::SeqCst);
                return None;
            }

            match process_file(path, mode, options) {
                Ok(ProcessOutcome::Written { output, entries }) => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    let output_name = output
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    Some(format!("{display_path} → {output_name} ({entries} entries)"))
                }
                Ok(ProcessOutcome::Skipped) => {
                    skip_counter.fetch_add(1, Ordering::SeqCst);
                    None
                }
                Err(e) => {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    tracing::warn!("Failed {}: {}", display_path, e);
                    Some(format!("Failed {display_path}: {e}"))
                }
            }
        })
        .collect();

    Ok(BatchResult {
        success_count: success_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        skipped: skip_counter.load(Ordering::SeqCst),
        messages: messages.into_iter().flatten().collect(),
    })
}
