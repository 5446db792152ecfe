//! CLI progress display utilities
//!
//! Step indicators with emojis for single files and a progress bar plus
//! summary for directory batches.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::ops::BatchResult;

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Gear - for processing/conversion operations
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Truck - for batch operations
pub static TRUCK: Emoji<'_, '_> = Emoji("🚚 ", "");
/// Link - for merge operations
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");

/// Print a step indicator: `[1/3] 🔍 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Progress bar style for batches
///
/// Format: `file.localization [########--------] 4/8 (50%)`
#[must_use]
pub fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

/// Create a progress bar, hidden when `quiet`
#[must_use]
pub fn simple_bar(total: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(bar_style());
    pb
}

/// Print the outcome of a batch: counts, then every failure
pub fn print_batch_summary(verb: &str, result: &BatchResult) {
    println!();
    println!("{verb} complete:");
    println!("  Success: {}", style(result.success_count).green());
    println!("  Failed: {}", style(result.fail_count).red());
    println!("  Skipped: {}", result.skipped);

    if result.fail_count > 0 {
        println!();
        println!("Failures:");
        for msg in result.messages.iter().filter(|m| m.starts_with("Failed")) {
            println!("  {msg}");
        }
    }
}
