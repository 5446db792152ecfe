//! `.localization` ↔ JSON conversion

use std::path::Path;

use super::json::{read_string_map, write_string_map};
use super::{ConvertPhase, ConvertProgress, ConvertProgressCallback};
use crate::error::Result;
use crate::formats::{ImportResult, read_localization, write_localization};

/// Convert a .localization file to a JSON key/value map
///
/// # Errors
/// Returns an error if reading, parsing or writing fails.
pub fn convert_localization_to_json<P: AsRef<Path>>(source: P, dest: P) -> Result<usize> {
    convert_localization_to_json_with_progress(source, dest, &|_| {})
}

/// Convert a .localization file to a JSON key/value map with progress callback.
///
/// Returns the number of entries written.
pub fn convert_localization_to_json_with_progress<P: AsRef<Path>>(
    source: P,
    dest: P,
    progress: ConvertProgressCallback,
) -> Result<usize> {
    tracing::info!(
        "Converting localization→JSON: {:?} → {:?}",
        source.as_ref(),
        dest.as_ref()
    );

    progress(&ConvertProgress::with_file(
        ConvertPhase::ReadingSource,
        1,
        3,
        "Reading localization file...",
    ));
    let localization = read_localization(&source)?;

    progress(&ConvertProgress::with_file(
        ConvertPhase::Converting,
        2,
        3,
        format!("Converting {} entries to JSON...", localization.len()),
    ));
    let map = localization.to_map();

    progress(&ConvertProgress::with_file(
        ConvertPhase::WritingOutput,
        3,
        3,
        "Writing JSON file...",
    ));
    write_string_map(&dest, &map)?;

    progress(&ConvertProgress::new(ConvertPhase::Complete, 3, 3));
    tracing::info!("Conversion complete");
    Ok(map.len())
}

/// Write the values of a JSON map into a copy of `template`
///
/// # Errors
/// Returns an error if any input cannot be read or the output cannot be written.
pub fn convert_json_to_localization<P: AsRef<Path>>(
    template: P,
    json: P,
    dest: P,
) -> Result<ImportResult> {
    convert_json_to_localization_with_progress(template, json, dest, &|_| {})
}

/// Write the values of a JSON map into a copy of `template` with progress callback.
///
/// Keys in the JSON that the template does not contain are reported in the
/// returned [`ImportResult`]; every other entry, including its hash and
/// opaque per-entry data, comes from the template.
pub fn convert_json_to_localization_with_progress<P: AsRef<Path>>(
    template: P,
    json: P,
    dest: P,
    progress: ConvertProgressCallback,
) -> Result<ImportResult> {
    tracing::info!(
        "Converting JSON→localization: {:?} + {:?} → {:?}",
        template.as_ref(),
        json.as_ref(),
        dest.as_ref()
    );

    progress(&ConvertProgress::with_file(
        ConvertPhase::ReadingSource,
        1,
        3,
        "Reading JSON and localization files...",
    ));
    let values = read_string_map(&json)?;
    let mut localization = read_localization(&template)?;

    progress(&ConvertProgress::with_file(
        ConvertPhase::Converting,
        2,
        3,
        format!("Importing {} values...", values.len()),
    ));
    let result = localization.import_map(&values);
    if result.not_found > 0 {
        tracing::warn!(
            "{} keys not found in {:?}",
            result.not_found,
            template.as_ref()
        );
    }

    progress(&ConvertProgress::with_file(
        ConvertPhase::WritingOutput,
        3,
        3,
        "Writing localization file...",
    ));
    write_localization(&dest, &mut localization)?;

    progress(&ConvertProgress::new(ConvertPhase::Complete, 3, 3));
    tracing::info!("Conversion complete");
    Ok(result)
}
