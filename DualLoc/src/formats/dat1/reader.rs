//! DAT1 payload parsing

use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use super::section::validate_section_table;
use super::{
    DAT1_HEADER_SIZE, DAT1_TAG, Dat1Container, Entry, SECTION_INFO_SIZE, SectionInfo, SectionKind,
};
use crate::error::{Error, Result};
use crate::utils::{read_cstr, read_u16_array, read_u32_array};

/// Parse a DAT1 payload.
///
/// `data` must be exactly the payload: section offsets are relative to its
/// start and the declared data size must equal `data.len()`. `parent_tag`
/// is the tag of the enclosing asset, which the payload repeats.
///
/// # Errors
///
/// Returns [`Error::InvalidDat1Magic`] or [`Error::InvalidParentTag`] on a tag
/// mismatch, [`Error::DataSizeMismatch`] if the declared size is wrong,
/// [`Error::MissingSection`], [`Error::DuplicateSection`] or
/// [`Error::UnknownSectionTag`] for a malformed section table, and
/// [`Error::SectionSizeMismatch`] if a section body is not exactly the size
/// the table declares.
pub fn parse_dat1(data: &[u8], parent_tag: [u8; 4]) -> Result<Dat1Container> {
    let mut cursor = Cursor::new(data);

    let mut tag = [0u8; 4];
    cursor.read_exact(&mut tag)?;
    if tag != DAT1_TAG {
        return Err(Error::InvalidDat1Magic(tag));
    }

    let mut found = [0u8; 4];
    cursor.read_exact(&mut found)?;
    if found != parent_tag {
        return Err(Error::InvalidParentTag {
            expected: parent_tag,
            found,
        });
    }

    let data_size = cursor.read_u32::<LittleEndian>()?;
    if data_size as usize != data.len() {
        return Err(Error::DataSizeMismatch {
            context: "DAT1",
            declared: u64::from(data_size),
            actual: data.len() as u64,
        });
    }

    let section_count = cursor.read_u32::<LittleEndian>()? as usize;
    if section_count.saturating_mul(SECTION_INFO_SIZE) > data.len() {
        return Err(Error::UnexpectedEof);
    }
    let mut sections = Vec::with_capacity(section_count);
    for _ in 0..section_count {
        let mut raw = [0u8; SECTION_INFO_SIZE];
        cursor.read_exact(&mut raw)?;
        sections.push(SectionInfo::from_bytes(raw)?);
    }
    validate_section_table(&sections)?;

    let mut header = [0u8; DAT1_HEADER_SIZE];
    cursor.read_exact(&mut header)?;

    let mut reader = SectionReader {
        cursor,
        sections: &sections,
    };

    let entry_count = reader.read_section(SectionKind::EntriesCount, |c| {
        Ok(c.read_u32::<LittleEndian>()? as usize)
    })?;
    // Each entry needs at least its two offsets; reject counts the payload cannot hold
    if entry_count.saturating_mul(8) > data.len() {
        return Err(Error::UnexpectedEof);
    }
    tracing::debug!("DAT1 entry count: {}", entry_count);

    let key_hashes =
        reader.read_section(SectionKind::KeyHashes, |c| read_u32_array(c, entry_count))?;
    let sorted_key_hashes =
        reader.read_section(SectionKind::SortedKeyHashes, |c| read_u32_array(c, entry_count))?;
    let sorted_indexes =
        reader.read_section(SectionKind::SortedIndexes, |c| read_u16_array(c, entry_count))?;
    let key_offsets =
        reader.read_section(SectionKind::KeysOffsets, |c| read_u32_array(c, entry_count))?;
    let value_offsets =
        reader.read_section(SectionKind::ValuesOffsets, |c| read_u32_array(c, entry_count))?;
    let unknown_ints =
        reader.read_section(SectionKind::Unknown, |c| read_u32_array(c, entry_count))?;
    let keys_data = reader.read_section(SectionKind::KeysData, |c| {
        let mut bytes = Vec::new();
        c.read_to_end(&mut bytes)?;
        Ok(bytes)
    })?;
    let values_data = section_bytes(data, reader.section(SectionKind::ValuesData)?)?;

    let mut entries = Vec::with_capacity(entry_count);
    for (key_offset, value_offset) in key_offsets.into_iter().zip(value_offsets) {
        let key = pool_string(&keys_data, SectionKind::KeysData, key_offset)?;
        let value = pool_string(values_data, SectionKind::ValuesData, value_offset)?;
        entries.push(Entry {
            key_offset,
            value_offset,
            key,
            value,
        });
    }

    Ok(Dat1Container {
        sections,
        header,
        key_hashes,
        sorted_key_hashes,
        sorted_indexes,
        unknown_ints,
        entries,
        keys_data,
    })
}

/// Seeks to each section and checks its declared size against what was read
struct SectionReader<'a> {
    cursor: Cursor<&'a [u8]>,
    sections: &'a [SectionInfo],
}

impl SectionReader<'_> {
    fn section(&self, kind: SectionKind) -> Result<SectionInfo> {
        self.sections
            .iter()
            .find(|s| s.kind == kind)
            .copied()
            .ok_or(Error::MissingSection(kind))
    }

    /// Run `read` over the section body, bounded to the declared size
    fn read_section<T, F>(&mut self, kind: SectionKind, read: F) -> Result<T>
    where
        F: FnOnce(&mut std::io::Take<&mut Cursor<&[u8]>>) -> Result<T>,
    {
        let section = self.section(kind)?;
        self.cursor.seek(SeekFrom::Start(u64::from(section.offset)))?;

        let mut bounded = (&mut self.cursor).take(u64::from(section.size));
        let value = read(&mut bounded).map_err(|e| match e {
            Error::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                Error::SectionSizeMismatch {
                    section: kind,
                    expected: section.size,
                    actual: bounded.get_ref().position() - u64::from(section.offset),
                }
            }
            other => other,
        })?;

        let actual = self.cursor.position() - u64::from(section.offset);
        if actual != u64::from(section.size) {
            return Err(Error::SectionSizeMismatch {
                section: kind,
                expected: section.size,
                actual,
            });
        }
        tracing::debug!(
            "read {} (offset: {}, size: {})",
            kind,
            section.offset,
            section.size
        );
        Ok(value)
    }
}

/// Borrow the bytes of a section directly from the payload
fn section_bytes(data: &[u8], section: SectionInfo) -> Result<&[u8]> {
    let start = section.offset as usize;
    let end = start
        .checked_add(section.size as usize)
        .ok_or(Error::UnexpectedEof)?;
    data.get(start..end).ok_or(Error::UnexpectedEof)
}

fn pool_string(pool: &[u8], section: SectionKind, offset: u32) -> Result<String> {
    read_cstr(pool, offset as usize)
        .unwrap_or_else(|| Err(Error::StringOutOfBounds { section, offset }))
}
