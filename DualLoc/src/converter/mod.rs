//! Format conversion utilities
//!
//! This module handles conversions between the binary string table and JSON:
//! - `.localization` → JSON key/value map (extract)
//! - JSON key/value map → `.localization` (inject, using the original as template)
//! - two JSON maps → one bilingual JSON map (merge)

mod json;
mod localization_json;
mod merge_json;

pub use json::{read_string_map, string_map_to_json, write_string_map};
pub use localization_json::{
    convert_json_to_localization, convert_json_to_localization_with_progress,
    convert_localization_to_json, convert_localization_to_json_with_progress,
};
pub use merge_json::{convert_merge_json, convert_merge_json_with_progress};

/// Progress callback type for conversion operations
pub type ConvertProgressCallback<'a> = &'a (dyn Fn(&ConvertProgress) + Sync + Send);

/// Progress information during a conversion
#[derive(Debug, Clone)]
pub struct ConvertProgress {
    /// Current operation phase
    pub phase: ConvertPhase,
    /// Current step number (1-indexed)
    pub current: usize,
    /// Total number of steps
    pub total: usize,
    /// Description of the current step
    pub message: Option<String>,
}

impl ConvertProgress {
    #[must_use]
    pub fn new(phase: ConvertPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            message: None,
        }
    }

    /// Create a progress update with a step description
    #[must_use]
    pub fn with_file(
        phase: ConvertPhase,
        current: usize,
        total: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            message: Some(message.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertPhase {
    ReadingSource,
    Converting,
    WritingOutput,
    Complete,
}

impl ConvertPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConvertPhase::ReadingSource => "Reading",
            ConvertPhase::Converting => "Converting",
            ConvertPhase::WritingOutput => "Writing",
            ConvertPhase::Complete => "Complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        let quarter = ConvertProgress::new(ConvertPhase::Converting, 1, 4);
        assert!((quarter.percentage() - 0.25).abs() < f32::EPSILON);
        let done = ConvertProgress::new(ConvertPhase::Complete, 0, 0);
        assert!((done.percentage() - 1.0).abs() < f32::EPSILON);
    }
}
