//! DAT1 section table types

use std::fmt;

use crate::error::{Error, Result};

/// Size of one section table record on disk (tag + offset + size)
pub const SECTION_INFO_SIZE: usize = 12;

/// The closed set of sections a localization DAT1 payload carries.
///
/// Each kind is identified on disk by a 4-byte tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    EntriesCount,
    KeyHashes,
    SortedKeyHashes,
    SortedIndexes,
    KeysData,
    KeysOffsets,
    Unknown,
    ValuesData,
    ValuesOffsets,
}

impl SectionKind {
    /// Every kind, in the order section bodies are emitted on write
    pub const EMISSION_ORDER: [SectionKind; 9] = [
        SectionKind::EntriesCount,
        SectionKind::KeyHashes,
        SectionKind::SortedKeyHashes,
        SectionKind::SortedIndexes,
        SectionKind::KeysOffsets,
        SectionKind::ValuesOffsets,
        SectionKind::Unknown,
        SectionKind::KeysData,
        SectionKind::ValuesData,
    ];

    /// On-disk tag for this section
    #[must_use]
    pub const fn tag(self) -> [u8; 4] {
        match self {
            SectionKind::EntriesCount => [0x03, 0xA9, 0x40, 0xD5],
            SectionKind::KeyHashes => [0x50, 0x80, 0xA5, 0x06],
            SectionKind::SortedKeyHashes => [0xB5, 0x31, 0x37, 0xC4],
            SectionKind::SortedIndexes => [0xE9, 0xCF, 0xD2, 0x0C],
            SectionKind::KeysData => [0xBD, 0xCE, 0x73, 0x4D],
            SectionKind::KeysOffsets => [0xB2, 0x55, 0xEA, 0xA4],
            SectionKind::Unknown => [0x43, 0x32, 0x65, 0xB0],
            SectionKind::ValuesData => [0xB8, 0x82, 0xA3, 0x70],
            SectionKind::ValuesOffsets => [0xB4, 0xEE, 0x0D, 0xF8],
        }
    }

    /// Look up the kind for an on-disk tag
    #[must_use]
    pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
        Self::EMISSION_ORDER.into_iter().find(|kind| kind.tag() == tag)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::EntriesCount => "EntriesCountSection",
            SectionKind::KeyHashes => "KeyHashesSection",
            SectionKind::SortedKeyHashes => "SortedKeyHashesSection",
            SectionKind::SortedIndexes => "SortedIndexesSection",
            SectionKind::KeysData => "KeysDataSection",
            SectionKind::KeysOffsets => "KeysOffsetsSection",
            SectionKind::Unknown => "UnknownSection",
            SectionKind::ValuesData => "ValuesDataSection",
            SectionKind::ValuesOffsets => "ValuesOffsetsSection",
        }
    }

    /// Whether a 16-byte alignment pad follows this section on write
    #[must_use]
    pub fn is_padded(self) -> bool {
        self != SectionKind::ValuesData
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of the section table.
///
/// `offset` is relative to the start of the DAT1 payload. Both `offset` and
/// `size` are overwritten every time the container is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionInfo {
    pub kind: SectionKind,
    pub offset: u32,
    pub size: u32,
}

impl SectionInfo {
    /// Parse one 12-byte record
    pub fn from_bytes(raw: [u8; SECTION_INFO_SIZE]) -> Result<Self> {
        let tag = [raw[0], raw[1], raw[2], raw[3]];
        let kind = SectionKind::from_tag(tag).ok_or(Error::UnknownSectionTag(tag))?;
        Ok(Self {
            kind,
            offset: u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]),
            size: u32::from_le_bytes([raw[8], raw[9], raw[10], raw[11]]),
        })
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; SECTION_INFO_SIZE] {
        let mut raw = [0u8; SECTION_INFO_SIZE];
        raw[..4].copy_from_slice(&self.kind.tag());
        raw[4..8].copy_from_slice(&self.offset.to_le_bytes());
        raw[8..].copy_from_slice(&self.size.to_le_bytes());
        raw
    }
}

/// Check that every section kind appears exactly once
pub fn validate_section_table(sections: &[SectionInfo]) -> Result<()> {
    for kind in SectionKind::EMISSION_ORDER {
        match sections.iter().filter(|s| s.kind == kind).count() {
            0 => return Err(Error::MissingSection(kind)),
            1 => {}
            _ => return Err(Error::DuplicateSection(kind)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_distinct() {
        for a in SectionKind::EMISSION_ORDER {
            assert_eq!(SectionKind::from_tag(a.tag()), Some(a));
            for b in SectionKind::EMISSION_ORDER {
                if a != b {
                    assert_ne!(a.tag(), b.tag());
                }
            }
        }
    }

    #[test]
    fn test_section_info_bytes() {
        let info = SectionInfo {
            kind: SectionKind::KeyHashes,
            offset: 0x70,
            size: 12,
        };
        let raw = info.to_bytes();
        assert_eq!(&raw[..4], &[0x50, 0x80, 0xA5, 0x06]);
        assert_eq!(SectionInfo::from_bytes(raw).unwrap(), info);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let raw = [b'N', b'O', b'P', b'E', 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            SectionInfo::from_bytes(raw),
            Err(Error::UnknownSectionTag(tag)) if &tag == b"NOPE"
        ));
    }

    #[test]
    fn test_validate_section_table() {
        let mut sections: Vec<SectionInfo> = SectionKind::EMISSION_ORDER
            .into_iter()
            .map(|kind| SectionInfo { kind, offset: 0, size: 0 })
            .collect();
        assert!(validate_section_table(&sections).is_ok());

        sections[8].kind = SectionKind::KeyHashes;
        assert!(matches!(
            validate_section_table(&sections),
            Err(Error::MissingSection(SectionKind::ValuesData))
        ));

        sections.pop();
        sections.push(SectionInfo { kind: SectionKind::ValuesData, offset: 0, size: 0 });
        sections.push(SectionInfo { kind: SectionKind::Unknown, offset: 0, size: 0 });
        assert!(matches!(
            validate_section_table(&sections),
            Err(Error::DuplicateSection(SectionKind::Unknown))
        ));
    }
}
