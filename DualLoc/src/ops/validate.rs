//! Round-trip validation
//!
//! A file is valid when parsing and re-serializing it reproduces every byte.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::formats::{parse_localization_bytes, serialize_localization};
use crate::utils::with_appended;

/// Offset of the first byte where `a` and `b` differ.
///
/// When one is a prefix of the other this is the shorter length; `None`
/// means the inputs are identical.
#[must_use]
pub fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    if a == b {
        return None;
    }
    Some(
        a.iter()
            .zip(b)
            .position(|(x, y)| x != y)
            .unwrap_or_else(|| a.len().min(b.len())),
    )
}

fn check_identical(original: &[u8], written: &[u8]) -> Result<()> {
    match first_difference(original, written) {
        None => Ok(()),
        Some(offset) => Err(Error::RoundTripMismatch {
            offset,
            original_len: original.len(),
            written_len: written.len(),
        }),
    }
}

/// Parse and re-serialize `.localization` bytes, failing unless the result is identical
pub fn validate_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut localization = parse_localization_bytes(data)?;
    let written = serialize_localization(&mut localization)?;
    check_identical(data, &written)?;
    Ok(written)
}

/// Compare two files byte by byte
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(original: P, written: Q) -> Result<()> {
    tracing::debug!(
        "comparing {} and {}",
        original.as_ref().display(),
        written.as_ref().display()
    );
    check_identical(&fs::read(original)?, &fs::read(written)?)
}

/// Re-serialize a `.localization` file to `<file>.new` and compare it with the input.
///
/// The re-serialized file is kept for inspection either way. Returns the
/// number of entries in the file.
pub fn validate_file<P: AsRef<Path>>(path: P) -> Result<usize> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let mut localization = parse_localization_bytes(&data)?;
    let written = serialize_localization(&mut localization)?;

    let output = with_appended(path, ".new");
    fs::write(&output, &written)?;
    compare_files(path, &output)?;

    tracing::debug!("{} round-trips unchanged", path.display());
    Ok(localization.len())
}
