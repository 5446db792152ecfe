//! Merging two JSON string tables into a bilingual one

use std::path::Path;

use super::json::{read_string_map, write_string_map};
use super::{ConvertPhase, ConvertProgress, ConvertProgressCallback};
use crate::dualsub::merge_tables;
use crate::error::Result;

/// Merge the subtitle entries of `main` and `sub` into `dest`
///
/// # Errors
/// Returns an error if either input cannot be read, a value cannot be merged,
/// or the output cannot be written.
pub fn convert_merge_json<P: AsRef<Path>>(main: P, sub: P, dest: P) -> Result<usize> {
    convert_merge_json_with_progress(main, sub, dest, &|_| {})
}

/// Merge the subtitle entries of `main` and `sub` into `dest` with progress callback.
///
/// Returns the number of entries written. Nothing is written when merging fails.
pub fn convert_merge_json_with_progress<P: AsRef<Path>>(
    main: P,
    sub: P,
    dest: P,
    progress: ConvertProgressCallback,
) -> Result<usize> {
    tracing::info!(
        "Merging subtitles: {:?} + {:?} → {:?}",
        main.as_ref(),
        sub.as_ref(),
        dest.as_ref()
    );

    progress(&ConvertProgress::with_file(
        ConvertPhase::ReadingSource,
        1,
        3,
        "Reading JSON files...",
    ));
    let main_map = read_string_map(&main)?;
    let sub_map = read_string_map(&sub)?;

    progress(&ConvertProgress::with_file(
        ConvertPhase::Converting,
        2,
        3,
        format!("Merging {} subtitle entries...", main_map.len()),
    ));
    let merged = merge_tables(&main_map, &sub_map)?;

    progress(&ConvertProgress::with_file(
        ConvertPhase::WritingOutput,
        3,
        3,
        "Writing JSON file...",
    ));
    write_string_map(&dest, &merged)?;

    progress(&ConvertProgress::new(ConvertPhase::Complete, 3, 3));
    tracing::info!("Merge complete");
    Ok(merged.len())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_merge_files() {
        let dir = TempDir::new().unwrap();
        let main = dir.path().join("en.json");
        let sub = dir.path().join("ja.json");
        let dest = dir.path().join("en.new.json");
        fs::write(&main, r#"{"MENU": "Menu", "LINE_001": "Hello", "LINE_002": "Bye"}"#).unwrap();
        let sub_json = r#"{"LINE_002": "さようなら", "LINE_001": "こんにちは"}"#;
        fs::write(&sub, sub_json).unwrap();

        assert_eq!(convert_merge_json(&main, &sub, &dest).unwrap(), 2);
        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            concat!(
                "{\n",
                "    \"LINE_001\": \"Hello<br>こんにちは\",\n",
                "    \"LINE_002\": \"Bye<br>さようなら\"\n",
                "}"
            )
        );
    }

    #[test]
    fn test_failed_merge_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let main = dir.path().join("en.json");
        let sub = dir.path().join("ja.json");
        let dest = dir.path().join("en.new.json");
        fs::write(&main, r#"{"LINE_001": "<ts=&quot;0;1&quot;>Hi"}"#).unwrap();
        fs::write(&sub, r#"{"LINE_001": "<name=A>Yo"}"#).unwrap();

        assert!(matches!(
            convert_merge_json(&main, &sub, &dest),
            Err(Error::SubtitleMismatch { .. })
        ));
        assert!(!dest.exists());
    }
}
