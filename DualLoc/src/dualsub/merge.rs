//! Value- and table-level merging

use std::cmp::Ordering;

use indexmap::IndexMap;

use super::align::join_pages;
use super::page::{LINE_BREAK, PagedText, structural};
use crate::error::{Error, Result};

/// Merge one subtitle value from each track into a bilingual value.
///
/// Untagged values are joined as `main<br>sub`. Otherwise pages are paired up
/// (after folding the longer track) and each pair is emitted under the main
/// track's tag; the main track's leading segment is kept.
///
/// # Errors
///
/// Returns [`Error::SubtitleMismatch`] carrying both raw values when the tag
/// layout cannot be reconciled or a time span is malformed.
pub fn merge_value(main: &str, sub: &str) -> Result<String> {
    merge_paged(main, sub).map_err(|err| {
        let reason = match err {
            Error::SubtitleMismatch { reason, .. } => reason,
            Error::InvalidTimestamp(span) => format!("invalid time-span tag {span}"),
            other => return other,
        };
        Error::SubtitleMismatch {
            key: None,
            main: main.to_string(),
            sub: sub.to_string(),
            reason,
        }
    })
}

fn merge_paged(main_value: &str, sub_value: &str) -> Result<String> {
    let mut main = PagedText::split(main_value);
    let mut sub = PagedText::split(sub_value);

    if !main.is_tagged() && !sub.is_tagged() {
        return Ok(format!("{main_value}{LINE_BREAK}{sub_value}"));
    }

    // A plain line on one side becomes a single page spanning the other's first tag
    if !main.is_tagged() && !main.has_name_lead() {
        main.adopt_first_tag(&sub);
    }
    if !sub.is_tagged() && !sub.has_name_lead() {
        sub.adopt_first_tag(&main);
    }

    if main.is_tagged() != sub.is_tagged() {
        return Err(structural("only one side carries time-span tags"));
    }
    for side in [&main, &sub] {
        if !side.lead.is_empty() && !side.has_name_lead() {
            return Err(structural("text before the first time-span tag"));
        }
    }

    match main.pages.len().cmp(&sub.pages.len()) {
        Ordering::Greater => {
            let joins = main.pages.len() - sub.pages.len();
            join_pages(&mut main.pages, &sub.pages, joins)?;
        }
        Ordering::Less => {
            let joins = sub.pages.len() - main.pages.len();
            join_pages(&mut sub.pages, &main.pages, joins)?;
        }
        Ordering::Equal => {}
    }

    let mut merged = main.lead;
    for (m, s) in main.pages.iter().zip(&sub.pages) {
        merged.push_str(&m.tag);
        if m.text.is_empty() {
            merged.push_str(&s.text);
        } else if s.text.is_empty() {
            merged.push_str(&m.text);
        } else {
            merged.push_str(&m.text);
            merged.push_str(LINE_BREAK);
            merged.push_str(&s.text);
        }
    }
    Ok(merged)
}

/// Whether a key names a subtitle line: `..._NNN`, optionally followed by `_EX`.
#[must_use]
pub fn is_subtitle_key(key: &str) -> bool {
    let key = key.strip_suffix("_EX").unwrap_or(key);
    let bytes = key.as_bytes();
    if bytes.len() <= 4 {
        return false;
    }
    let tail = &bytes[bytes.len() - 4..];
    tail[0] == b'_' && tail[1..].iter().all(u8::is_ascii_digit)
}

/// Keep only subtitle entries, preserving order
#[must_use]
pub fn filter_subtitles(table: &IndexMap<String, String>) -> IndexMap<String, String> {
    table
        .iter()
        .filter(|(key, _)| is_subtitle_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Merge two string tables.
///
/// Both tables are reduced to subtitle keys. The result follows the main
/// table's order and values; every key present in both tables with two
/// non-empty values is replaced by [`merge_value`].
///
/// # Errors
///
/// Stops at the first value that cannot be merged and returns its
/// [`Error::SubtitleMismatch`] with the key attached.
pub fn merge_tables(
    main: &IndexMap<String, String>,
    sub: &IndexMap<String, String>,
) -> Result<IndexMap<String, String>> {
    let mut merged = filter_subtitles(main);
    let mut combined = 0usize;

    for (key, sub_value) in sub.iter().filter(|(key, _)| is_subtitle_key(key)) {
        if sub_value.is_empty() {
            continue;
        }
        let Some(main_value) = merged.get_mut(key) else {
            continue;
        };
        if main_value.is_empty() {
            continue;
        }
        *main_value = merge_value(main_value, sub_value).map_err(|e| e.with_key(key))?;
        combined += 1;
    }

    tracing::debug!(
        "merged {} of {} subtitle entries",
        combined,
        merged.len()
    );
    Ok(merged)
}
