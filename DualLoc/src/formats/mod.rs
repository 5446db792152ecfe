//! File format handlers
//!
//! `dat1` is the generic section container; `localization` is the asset
//! envelope that wraps a DAT1 string table.

pub mod dat1;
pub mod localization;

// Re-export main types
pub use dat1::{Dat1Container, Entry, SectionInfo, SectionKind};
pub use localization::{
    ImportResult, Localization, parse_localization_bytes, read_localization,
    serialize_localization, write_localization,
};
