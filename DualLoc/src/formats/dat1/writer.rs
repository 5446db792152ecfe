//! DAT1 payload writing

use std::io::{Cursor, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use super::section::validate_section_table;
use super::{DAT1_TAG, Dat1Container, SECTION_ALIGNMENT, SECTION_INFO_SIZE, SectionKind};
use crate::error::{Error, Result};
use crate::utils::{write_cstr, write_padding, write_u16_array, write_u32_array};

/// Serialize a container to a fresh DAT1 payload.
///
/// Section offsets/sizes and entry value offsets in `container` are updated
/// to describe the bytes produced.
///
/// # Errors
/// Returns an error if the section table is incomplete or the entry count
/// does not fit the 16-bit sorted index table.
pub fn serialize_dat1(container: &mut Dat1Container, parent_tag: [u8; 4]) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    container.write(&mut cursor, parent_tag)?;
    Ok(cursor.into_inner())
}

impl Dat1Container {
    /// Write the container as a DAT1 payload starting at the current stream position.
    ///
    /// The section table is reserved up front and backpatched once every body
    /// has been written; the stream is left positioned at its end.
    pub fn write<W: Write + Seek>(&mut self, writer: &mut W, parent_tag: [u8; 4]) -> Result<()> {
        validate_section_table(&self.sections)?;
        if self.entries.len() > usize::from(u16::MAX) + 1 {
            return Err(Error::TooManyEntries {
                count: self.entries.len(),
            });
        }

        let base = writer.stream_position()?;
        writer.write_all(&DAT1_TAG)?;
        writer.write_all(&parent_tag)?;

        // Reserve data_size, section_count and the section table
        let table_pos = writer.stream_position()?;
        writer.write_all(&vec![0u8; 8 + SECTION_INFO_SIZE * self.sections.len()])?;

        writer.write_all(&self.header)?;

        let values_data = self.build_values_pool()?;

        for kind in SectionKind::EMISSION_ORDER {
            let start = writer.stream_position()?;
            self.write_section_body(writer, kind, &values_data)?;
            let end = writer.stream_position()?;

            if let Some(section) = self.sections.iter_mut().find(|s| s.kind == kind) {
                section.offset = (start - base) as u32;
                section.size = (end - start) as u32;
                tracing::debug!(
                    "wrote {} (offset: {}, size: {})",
                    kind,
                    section.offset,
                    section.size
                );
            }

            if kind.is_padded() {
                write_padding(writer, base, SECTION_ALIGNMENT)?;
            }
        }

        let data_size = (writer.stream_position()? - base) as u32;
        writer.seek(SeekFrom::Start(table_pos))?;
        writer.write_u32::<LittleEndian>(data_size)?;
        writer.write_u32::<LittleEndian>(self.sections.len() as u32)?;
        for section in &self.sections {
            writer.write_all(&section.to_bytes())?;
        }

        writer.seek(SeekFrom::End(0))?;
        Ok(())
    }

    /// Lay out the values pool and assign each entry its value offset.
    ///
    /// Empty values after the first empty one are not stored again; they get
    /// offset 0. Non-empty duplicates are stored every time.
    fn build_values_pool(&mut self) -> Result<Vec<u8>> {
        let mut pool = Vec::new();
        let mut empty_stored = false;

        for entry in &mut self.entries {
            if entry.value.is_empty() {
                if empty_stored {
                    entry.value_offset = 0;
                    continue;
                }
                empty_stored = true;
            }
            entry.value_offset = pool.len() as u32;
            write_cstr(&mut pool, &entry.value)?;
        }

        Ok(pool)
    }

    fn write_section_body<W: Write>(
        &self,
        writer: &mut W,
        kind: SectionKind,
        values_data: &[u8],
    ) -> Result<()> {
        match kind {
            SectionKind::EntriesCount => {
                writer.write_u32::<LittleEndian>(self.entries.len() as u32)?;
            }
            SectionKind::KeyHashes => write_u32_array(writer, &self.key_hashes)?,
            SectionKind::SortedKeyHashes => write_u32_array(writer, &self.sorted_key_hashes)?,
            SectionKind::SortedIndexes => write_u16_array(writer, &self.sorted_indexes)?,
            SectionKind::KeysOffsets => {
                for entry in &self.entries {
                    writer.write_u32::<LittleEndian>(entry.key_offset)?;
                }
            }
            SectionKind::ValuesOffsets => {
                for entry in &self.entries {
                    writer.write_u32::<LittleEndian>(entry.value_offset)?;
                }
            }
            SectionKind::Unknown => write_u32_array(writer, &self.unknown_ints)?,
            SectionKind::KeysData => writer.write_all(&self.keys_data)?,
            SectionKind::ValuesData => writer.write_all(values_data)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::dat1::fixtures::dat1_payload;
    use crate::formats::dat1::{DAT1_HEADER_SIZE, parse_dat1};
    use pretty_assertions::assert_eq;

    const PARENT: [u8; 4] = [0xAB, 0xB0, 0x2B, 0x12];

    #[test]
    fn test_roundtrip_is_byte_identical() {
        let data = dat1_payload(PARENT);
        let mut container = parse_dat1(&data, PARENT).unwrap();
        let written = serialize_dat1(&mut container, PARENT).unwrap();
        assert_eq!(written, data);
    }

    #[test]
    fn test_sections_follow_emission_order_and_alignment() {
        let data = dat1_payload(PARENT);
        let mut container = parse_dat1(&data, PARENT).unwrap();
        serialize_dat1(&mut container, PARENT).unwrap();

        let mut previous_end = 0;
        for kind in SectionKind::EMISSION_ORDER {
            let info = container.section_info(kind).unwrap();
            assert!(info.offset >= previous_end);
            if kind != SectionKind::EntriesCount {
                assert_eq!(info.offset % 16, 0, "{kind} not aligned");
            }
            previous_end = info.offset + info.size;
        }
        assert_eq!(previous_end as usize, data.len());
    }

    #[test]
    fn test_empty_values_are_deduplicated() {
        let rows = vec![
            ("A_000".to_string(), String::new(), 1, 0),
            ("B_001".to_string(), String::new(), 2, 0),
        ];
        let mut container = Dat1Container::new([0; DAT1_HEADER_SIZE], rows);
        let written = serialize_dat1(&mut container, PARENT).unwrap();

        assert_eq!(container.entries[0].value_offset, 0);
        assert_eq!(container.entries[1].value_offset, 0);
        let values = container.section_info(SectionKind::ValuesData).unwrap();
        assert_eq!(values.size, 1);
        assert_eq!(written[values.offset as usize], 0);
    }

    #[test]
    fn test_non_empty_duplicates_are_stored_twice() {
        let rows = vec![
            ("A_000".to_string(), String::new(), 1, 0),
            ("B_001".to_string(), "same".to_string(), 2, 0),
            ("C_002".to_string(), "same".to_string(), 3, 0),
            ("D_003".to_string(), String::new(), 4, 0),
        ];
        let mut container = Dat1Container::new([0; DAT1_HEADER_SIZE], rows);
        serialize_dat1(&mut container, PARENT).unwrap();

        let offsets: Vec<_> = container.entries.iter().map(|e| e.value_offset).collect();
        assert_eq!(offsets, vec![0, 1, 6, 0]);
        assert_eq!(container.section_info(SectionKind::ValuesData).unwrap().size, 11);
    }

    #[test]
    fn test_values_pool_is_not_padded() {
        let rows = vec![("A_000".to_string(), "x".to_string(), 1, 0)];
        let mut container = Dat1Container::new([0; DAT1_HEADER_SIZE], rows);
        let written = serialize_dat1(&mut container, PARENT).unwrap();
        let values = container.section_info(SectionKind::ValuesData).unwrap();
        assert_eq!((values.offset + values.size) as usize, written.len());
        assert_eq!(&written[written.len() - 2..], b"x\0");
    }

    #[test]
    fn test_update_then_reparse() {
        let data = dat1_payload(PARENT);
        let mut container = parse_dat1(&data, PARENT).unwrap();
        assert!(container.set_value("TALK_002", "Bye"));
        let written = serialize_dat1(&mut container, PARENT).unwrap();

        let reparsed = parse_dat1(&written, PARENT).unwrap();
        assert_eq!(reparsed.to_map()["TALK_002"], "Bye");
        assert_eq!(reparsed.to_map()["NAME_001"], "Hello");
        assert_eq!(reparsed.keys_data, container.keys_data);
    }

    #[test]
    fn test_update_is_idempotent() {
        let data = dat1_payload(PARENT);
        let mut once = parse_dat1(&data, PARENT).unwrap();
        once.set_value("LABEL_000", "Title");
        let first = serialize_dat1(&mut once, PARENT).unwrap();

        let mut twice = parse_dat1(&data, PARENT).unwrap();
        twice.set_value("LABEL_000", "Title");
        twice.set_value("LABEL_000", "Title");
        let second = serialize_dat1(&mut twice, PARENT).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_write_after_prefix_matches_fresh_payload() {
        let data = dat1_payload(PARENT);
        let mut fresh = parse_dat1(&data, PARENT).unwrap();
        let expected = serialize_dat1(&mut fresh, PARENT).unwrap();

        let mut embedded = parse_dat1(&data, PARENT).unwrap();
        let mut cursor = Cursor::new(vec![0xEE; 36]);
        cursor.set_position(36);
        embedded.write(&mut cursor, PARENT).unwrap();

        assert_eq!(&cursor.get_ref()[36..], expected.as_slice());
        assert_eq!(embedded.sections, fresh.sections);
    }

    #[test]
    fn test_too_many_entries_rejected() {
        let rows = (0..=usize::from(u16::MAX) + 1)
            .map(|i| (format!("K_{i}"), String::new(), i as u32, 0))
            .collect();
        let mut container = Dat1Container::new([0; DAT1_HEADER_SIZE], rows);
        assert!(matches!(
            serialize_dat1(&mut container, PARENT),
            Err(Error::TooManyEntries { count: 65_537 })
        ));
    }

    #[test]
    fn test_missing_section_rejected_on_write() {
        let mut container = Dat1Container::new([0; DAT1_HEADER_SIZE], Vec::new());
        container.sections.retain(|s| s.kind != SectionKind::Unknown);
        assert!(matches!(
            serialize_dat1(&mut container, PARENT),
            Err(Error::MissingSection(SectionKind::Unknown))
        ));
    }
}
