//! Running an operational mode on a file or a directory

use std::path::Path;
use std::time::Instant;

use anyhow::bail;

use crate::cli::progress::{
    DISK, GEAR, LINK, LOOKING_GLASS, TRUCK, print_batch_summary, print_done, print_step,
    simple_bar,
};
use crate::ops::{
    Mode, ProcessOptions, ProcessOutcome, find_files, process_directory_with_progress,
    process_file,
};

/// Run `mode` on `path`, which may be a single file or a directory
pub fn execute(path: &Path, mode: &Mode, quiet: bool) -> anyhow::Result<()> {
    if let Some(companion) = mode.companion() {
        if !companion.is_file() {
            bail!("File not found: {}", companion.display());
        }
    }

    if path.is_file() {
        single(path, mode, quiet)
    } else if path.is_dir() {
        batch(path, mode, quiet)
    } else {
        bail!("Specified path doesn't exist: {}", path.display())
    }
}

fn single(path: &Path, mode: &Mode, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let options = ProcessOptions::new().with_quiet(quiet);

    if !quiet {
        print_step(1, 2, LOOKING_GLASS, &format!("Processing {}...", path.display()));
    }

    match process_file(path, mode, options)? {
        ProcessOutcome::Written { output, entries } => {
            if !quiet {
                let (emoji, verb) = match mode {
                    Mode::Validate => (GEAR, "Validated"),
                    Mode::Merge { .. } => (LINK, "Merged"),
                    Mode::Extract | Mode::Inject { .. } => (DISK, "Wrote"),
                };
                print_step(
                    2,
                    2,
                    emoji,
                    &format!("{verb} {entries} entries, saved as {}", output.display()),
                );
                print_done(start.elapsed());
            }
        }
        // Strict options never skip
        ProcessOutcome::Skipped => {}
    }
    Ok(())
}

fn batch(dir: &Path, mode: &Mode, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let files = find_files(dir)?;
    if files.is_empty() {
        println!("No files found in: {}", dir.display());
        return Ok(());
    }

    if !quiet {
        print_step(
            1,
            2,
            TRUCK,
            &format!(
                "Found {} files, processing *.{} in {}...",
                files.len(),
                mode.expected_extension(),
                dir.display()
            ),
        );
    }

    let pb = simple_bar(files.len() as u64, quiet);
    let options = ProcessOptions::new().with_quiet(quiet);
    let result = process_directory_with_progress(dir, mode, options, |progress| {
        pb.set_position(progress.current as u64);
        if let Some(name) = progress.file.file_name() {
            pb.set_message(name.to_string_lossy().to_string());
        }
    })?;
    pb.finish_and_clear();

    if !quiet {
        for msg in result.messages.iter().filter(|m| !m.starts_with("Failed")) {
            println!("  {msg}");
        }
        print_batch_summary(mode.as_str(), &result);
        print_done(start.elapsed());
    } else if result.fail_count > 0 {
        for msg in result.messages.iter().filter(|m| m.starts_with("Failed")) {
            eprintln!("{msg}");
        }
    }

    if !result.is_success() {
        bail!("{} of {} files failed", result.fail_count, files.len());
    }
    Ok(())
}
