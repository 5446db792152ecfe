//! File-level operations
//!
//! Each operational mode maps one input file to one output file next to it:
//!
//! | mode     | input           | output                    |
//! |----------|-----------------|---------------------------|
//! | extract  | `x.localization` | `x.localization.json`    |
//! | inject   | `x.localization` | `x.new.localization`     |
//! | merge    | `x.json`         | `x.new.json`             |
//! | validate | `x.localization` | `x.localization.new`     |
//!
//! Directories are processed file by file with [`process_directory`].

pub mod batch;
pub mod validate;

use std::path::{Path, PathBuf};

pub use batch::{
    BatchProgress, BatchResult, find_files, process_directory, process_directory_with_progress,
};
pub use validate::{compare_files, first_difference, validate_bytes, validate_file};

use crate::converter::{
    convert_json_to_localization, convert_localization_to_json, convert_merge_json,
};
use crate::error::{Error, Result};
use crate::formats::localization::LOCALIZATION_EXTENSION;
use crate::utils::{has_extension, with_appended, with_new_suffix};

/// Extension of JSON key/value maps (without the dot)
pub const JSON_EXTENSION: &str = "json";

/// What to do with each input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Write the string table of a `.localization` file as JSON
    Extract,
    /// Write the values of `json` into a copy of each `.localization` file
    Inject { json: PathBuf },
    /// Merge each JSON map (main track) with `sub` into a bilingual map
    Merge { sub: PathBuf },
    /// Re-serialize each `.localization` file and compare it with the input
    Validate,
}

impl Mode {
    /// Extension an input file must carry (without the dot)
    #[must_use]
    pub fn expected_extension(&self) -> &'static str {
        match self {
            Mode::Merge { .. } => JSON_EXTENSION,
            _ => LOCALIZATION_EXTENSION,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Extract => "extract",
            Mode::Inject { .. } => "inject",
            Mode::Merge { .. } => "merge",
            Mode::Validate => "validate",
        }
    }

    /// The second input shared by every file, if the mode has one
    #[must_use]
    pub fn companion(&self) -> Option<&Path> {
        match self {
            Mode::Inject { json } => Some(json),
            Mode::Merge { sub } => Some(sub),
            Mode::Extract | Mode::Validate => None,
        }
    }

    /// Path the output for `input` is written to
    #[must_use]
    pub fn output_path(&self, input: &Path) -> PathBuf {
        match self {
            Mode::Extract => with_appended(input, ".json"),
            Mode::Inject { .. } => with_new_suffix(input, ".localization"),
            Mode::Merge { .. } => with_new_suffix(input, ".json"),
            Mode::Validate => with_appended(input, ".new"),
        }
    }
}

/// Options for [`process_file`] and [`process_directory`].
///
/// # Example
///
/// ```
/// use dualloc::ops::ProcessOptions;
///
/// let options = ProcessOptions::new().with_quiet(true);
/// assert!(options.strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Reject inputs with the wrong extension instead of skipping them
    pub strict: bool,
    /// Log per-file progress at debug level only
    pub quiet: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessOptions {
    /// Strict, non-quiet options (single-file mode)
    #[must_use]
    pub fn new() -> Self {
        Self {
            strict: true,
            quiet: false,
        }
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// Outcome of processing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The output was written (and, in validate mode, matched the input)
    Written {
        output: PathBuf,
        /// Entries extracted, updated or merged
        entries: usize,
    },
    /// The input does not match the mode and was left alone
    Skipped,
}

/// Process a single file in the given mode.
///
/// With `options.strict`, an input with the wrong extension is an
/// [`Error::UnexpectedExtension`]; otherwise it is reported as
/// [`ProcessOutcome::Skipped`].
pub fn process_file(path: &Path, mode: &Mode, options: ProcessOptions) -> Result<ProcessOutcome> {
    let expected = mode.expected_extension();
    if !has_extension(path, expected) {
        if options.strict {
            return Err(Error::UnexpectedExtension {
                expected,
                path: path.to_path_buf(),
            });
        }
        return Ok(ProcessOutcome::Skipped);
    }

    if options.quiet {
        tracing::debug!("processing {}...", path.display());
    } else {
        tracing::info!("processing {}...", path.display());
    }

    let output = mode.output_path(path);
    let entries = match mode {
        Mode::Extract => convert_localization_to_json(path, output.as_path())?,
        Mode::Inject { json } => {
            convert_json_to_localization(path, json.as_path(), output.as_path())?.updated
        }
        Mode::Merge { sub } => convert_merge_json(path, sub.as_path(), output.as_path())?,
        Mode::Validate => validate_file(path)?,
    };

    if options.quiet {
        tracing::debug!("saved as {}", output.display());
    } else {
        tracing::info!("saved as {}", output.display());
    }
    Ok(ProcessOutcome::Written { output, entries })
}
