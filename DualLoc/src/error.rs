//! Error types for `DualLoc`

use std::path::PathBuf;

use thiserror::Error;

use crate::formats::dat1::SectionKind;

/// The error type for `DualLoc` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Localization Envelope Errors ====================
    /// The file is not a `.localization` asset (wrong envelope tag).
    #[error("invalid localization tag: expected AB B0 2B 12, found {0:02X?}")]
    InvalidLocalizationMagic([u8; 4]),

    // ==================== DAT1 Container Errors ====================
    /// The payload does not start with the DAT1 tag.
    #[error("invalid DAT1 tag: expected \"1TAD\", found {0:?}")]
    InvalidDat1Magic([u8; 4]),

    /// The DAT1 parent tag does not match the envelope tag.
    #[error("invalid parent tag: expected {expected:02X?}, found {found:02X?}")]
    InvalidParentTag {
        /// Tag of the enclosing envelope.
        expected: [u8; 4],
        /// Tag stored in the DAT1 header.
        found: [u8; 4],
    },

    /// A declared size field disagrees with the number of bytes present.
    #[error("{context} size mismatch (declared: {declared}, actual: {actual})")]
    DataSizeMismatch {
        /// Which structure carried the size field.
        context: &'static str,
        /// Size stored in the file.
        declared: u64,
        /// Number of bytes actually available.
        actual: u64,
    },

    /// A section's declared size differs from the bytes consumed while reading it.
    #[error("unexpected section size (section: {section}, expected: {expected}, actual: {actual})")]
    SectionSizeMismatch {
        /// The section being read.
        section: SectionKind,
        /// Size declared in the section table.
        expected: u32,
        /// Bytes consumed.
        actual: u64,
    },

    /// A required section is absent from the section table.
    #[error("missing section: {0}")]
    MissingSection(SectionKind),

    /// A section tag appears more than once in the section table.
    #[error("duplicate section: {0}")]
    DuplicateSection(SectionKind),

    /// The section table contains a tag this format revision does not know.
    #[error("unknown section tag detected: {0:02X?}")]
    UnknownSectionTag([u8; 4]),

    /// A string offset points outside its pool or the string is unterminated.
    #[error("string at offset {offset} is out of bounds in section {section}")]
    StringOutOfBounds {
        /// The pool section.
        section: SectionKind,
        /// Offset relative to the section start.
        offset: u32,
    },

    /// The container holds more entries than the format can index.
    #[error("too many entries: {count} (sorted index table is 16-bit)")]
    TooManyEntries {
        /// Number of entries.
        count: usize,
    },

    // ==================== Dual Subtitle Errors ====================
    /// The merge engine met a page-tag shape it cannot reconcile.
    #[error(
        "unknown subtitle pattern{}: {reason} (main: {main:?}, sub: {sub:?})",
        key_suffix(.key.as_deref())
    )]
    SubtitleMismatch {
        /// Key of the offending entry, when merging whole tables.
        key: Option<String>,
        /// Raw value from the main table.
        main: String,
        /// Raw value from the sub table.
        sub: String,
        /// What did not line up.
        reason: String,
    },

    /// A display-time-span tag could not be parsed.
    #[error("invalid time-span tag: {0}")]
    InvalidTimestamp(String),

    // ==================== Validation Errors ====================
    /// Re-serialized bytes differ from the input.
    #[error("round trip differs at byte {offset} ({original_len} vs {written_len} bytes)")]
    RoundTripMismatch {
        /// First differing byte offset.
        offset: usize,
        /// Length of the input file.
        original_len: usize,
        /// Length of the re-serialized output.
        written_len: usize,
    },

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    // ==================== File System Errors ====================
    /// Input file has the wrong extension for the requested mode.
    #[error("input file should be *.{expected}: {}", path.display())]
    UnexpectedExtension {
        /// Expected extension without the dot.
        expected: &'static str,
        /// The offending path.
        path: PathBuf,
    },

    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    /// Unexpected end of file.
    #[error("unexpected end of file")]
    UnexpectedEof,
}

impl Error {
    /// Attach the table key to a subtitle error raised by the merge engine.
    #[must_use]
    pub fn with_key(self, key: &str) -> Self {
        match self {
            Error::SubtitleMismatch {
                main, sub, reason, ..
            } => Error::SubtitleMismatch {
                key: Some(key.to_string()),
                main,
                sub,
                reason,
            },
            other => other,
        }
    }
}

fn key_suffix(key: Option<&str>) -> String {
    key.map(|k| format!(" for key {k}")).unwrap_or_default()
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `DualLoc` operations.
pub type Result<T> = std::result::Result<T, Error>;
