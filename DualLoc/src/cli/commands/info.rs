//! Section table listing for a `.localization` file

use std::path::Path;

use crate::dualsub::filter_subtitles;
use crate::formats::read_localization;

/// Print envelope and section details of a `.localization` file
pub fn execute(path: &Path) -> anyhow::Result<()> {
    let localization = read_localization(path)?;
    let data = &localization.data;

    println!("Localization: {}", path.display());
    println!();
    println!("Entries: {}", localization.len());
    println!(
        "Subtitle entries: {}",
        filter_subtitles(&localization.to_map()).len()
    );
    println!();
    println!("Sections (table order):");
    for section in &data.sections {
        println!(
            "  {:24} offset {:>8}  size {:>8}",
            section.kind.as_str(),
            section.offset,
            section.size
        );
    }

    Ok(())
}
