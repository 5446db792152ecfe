//! Command definitions and dispatch

mod info;
mod run;

use std::path::PathBuf;

use clap::Subcommand;

use crate::ops::Mode;

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the string table of a .localization file (or every file in a directory) to JSON
    Extract {
        /// .localization file or directory
        path: PathBuf,

        /// Suppress step output and progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write the values of a JSON file into a .localization file (or every file in a directory)
    Inject {
        /// .localization file or directory
        path: PathBuf,

        /// JSON key/value map to import
        json: PathBuf,

        /// Suppress step output and progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Merge the subtitles of two JSON files into a bilingual JSON file
    Merge {
        /// JSON file (or directory of JSON files) for the main track
        main: PathBuf,

        /// JSON file for the second track
        sub: PathBuf,

        /// Suppress step output and progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Check that re-writing a .localization file reproduces it byte for byte
    Validate {
        /// .localization file or directory
        path: PathBuf,

        /// Suppress step output and progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the section table and entry count of a .localization file
    Info {
        /// .localization file
        path: PathBuf,
    },
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying operation fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Extract { path, quiet } => run::execute(path, &Mode::Extract, *quiet),
            Commands::Inject { path, json, quiet } => {
                run::execute(path, &Mode::Inject { json: json.clone() }, *quiet)
            }
            Commands::Merge { main, sub, quiet } => {
                run::execute(main, &Mode::Merge { sub: sub.clone() }, *quiet)
            }
            Commands::Validate { path, quiet } => run::execute(path, &Mode::Validate, *quiet),
            Commands::Info { path } => info::execute(path),
        }
    }
}
