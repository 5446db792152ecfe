//! # `DualLoc`
//!
//! A pure-Rust library for reading and writing `.localization` string tables
//! (a DAT1 section container inside a small envelope) and for merging the
//! subtitles of two languages into one bilingual table.
//!
//! ## Modules
//!
//! - [`formats`] - the DAT1 container codec and the `.localization` envelope
//! - [`dualsub`] - dual-subtitle merging of time-tagged subtitle pages
//! - [`converter`] - JSON extract/inject/merge conversions
//! - [`ops`] - per-file modes, directory batches and round-trip validation
//!
//! ## Quick Start
//!
//! ### Editing a string table
//!
//! ```no_run
//! use dualloc::formats::{read_localization, write_localization};
//!
//! let mut loc = read_localization("subtitles.localization")?;
//! println!("{} entries", loc.len());
//!
//! let mut values = loc.to_map();
//! values.insert("LINE_001".to_string(), "Hello there".to_string());
//! let report = loc.import_map(&values);
//! println!("updated {}, unknown {}", report.updated, report.not_found);
//!
//! write_localization("subtitles.new.localization", &mut loc)?;
//! # Ok::<(), dualloc::Error>(())
//! ```
//!
//! ### Merging two subtitle tracks
//!
//! ```
//! use dualloc::dualsub::merge_value;
//!
//! let merged = merge_value("Hello", "Hallo")?;
//! assert_eq!(merged, "Hello<br>Hallo");
//! # Ok::<(), dualloc::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `dualloc` command-line binary

pub mod converter;
pub mod dualsub;
pub mod error;
pub mod formats;
pub mod ops;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::{
        Dat1Container, Entry, ImportResult, Localization, SectionInfo, SectionKind,
        parse_localization_bytes, read_localization, serialize_localization, write_localization,
    };

    pub use crate::dualsub::{filter_subtitles, merge_tables, merge_value};

    pub use crate::converter;
    pub use crate::ops::{
        BatchResult, Mode, ProcessOptions, ProcessOutcome, process_directory, process_file,
        validate_file,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
