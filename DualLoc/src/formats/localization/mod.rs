//! `.localization` asset format
//!
//! A fixed 36-byte envelope around a DAT1 string table:
//!
//! ```text
//! tag[4] = AB B0 2B 12 | payload_size u32 | header[28] | payload[payload_size]
//! ```
//!
//! The payload's own parent tag must repeat the envelope tag.

mod editor;
mod reader;
mod writer;

pub use editor::{ImportProgress, ImportResult};
pub use reader::{parse_localization_bytes, read_localization};
pub use writer::{serialize_localization, write_localization};

use crate::formats::dat1::Dat1Container;

/// Envelope tag of `.localization` assets
pub const LOCALIZATION_TAG: [u8; 4] = [0xAB, 0xB0, 0x2B, 0x12];

/// Size of the opaque block between the payload size and the payload
pub const ENVELOPE_HEADER_SIZE: usize = 28;

/// Bytes before the payload: tag + payload size + opaque header
pub const ENVELOPE_SIZE: usize = 8 + ENVELOPE_HEADER_SIZE;

/// File extension (without the dot)
pub const LOCALIZATION_EXTENSION: &str = "localization";

/// A parsed `.localization` asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localization {
    /// Opaque envelope header, written back unchanged
    pub header: [u8; ENVELOPE_HEADER_SIZE],
    pub data: Dat1Container,
}

impl Localization {
    #[must_use]
    pub fn new(header: [u8; ENVELOPE_HEADER_SIZE], data: Dat1Container) -> Self {
        Self { header, data }
    }

    /// Number of string table entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.entries.is_empty()
    }

    /// File extension used for this asset type
    #[must_use]
    pub fn extension(&self) -> &'static str {
        LOCALIZATION_EXTENSION
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use byteorder::{LittleEndian, WriteBytesExt};

    use super::{ENVELOPE_HEADER_SIZE, LOCALIZATION_TAG};
    use crate::formats::dat1::fixtures::dat1_payload;

    /// Complete `.localization` image around the DAT1 fixture
    pub fn localization_bytes() -> Vec<u8> {
        let payload = dat1_payload(LOCALIZATION_TAG);
        let mut out = Vec::new();
        out.extend_from_slice(&LOCALIZATION_TAG);
        out.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
        out.extend(std::iter::repeat_n(0xEE, ENVELOPE_HEADER_SIZE));
        out.extend_from_slice(&payload);
        out
    }
}
