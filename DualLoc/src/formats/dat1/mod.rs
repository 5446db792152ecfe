//! DAT1 section container
//!
//! The payload format inside `.localization` assets: a table of tagged
//! sections followed by the section bodies. For string tables the sections
//! hold key hashes, a sorted copy of the hashes with its index permutation,
//! per-entry key/value offsets, an opaque per-entry integer array and the two
//! null-terminated string pools.
//!
//! ```text
//! tag "1TAD" | parent tag | data_size u32 | section_count u32
//! section_count x { tag[4], offset u32, size u32 }
//! header[36]
//! section bodies (offsets relative to the payload start, 16-byte aligned)
//! ```

mod reader;
pub mod section;
mod writer;

use indexmap::IndexMap;

pub use reader::parse_dat1;
pub use section::{SECTION_INFO_SIZE, SectionInfo, SectionKind};
pub use writer::serialize_dat1;

/// "1TAD" tag that opens every DAT1 payload
pub const DAT1_TAG: [u8; 4] = *b"1TAD";

/// Size of the opaque block that follows the section table
pub const DAT1_HEADER_SIZE: usize = 36;

/// Alignment applied after every section body except the values pool
pub const SECTION_ALIGNMENT: u64 = 16;

/// One row of the string table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Offset of the key in the keys pool
    pub key_offset: u32,
    /// Offset of the value in the values pool (recomputed on write)
    pub value_offset: u32,
    pub key: String,
    pub value: String,
}

/// A parsed DAT1 string table.
///
/// `key_hashes`, `sorted_key_hashes`, `sorted_indexes` and `unknown_ints` are
/// parallel to `entries` and carried through unchanged. The keys pool is kept
/// verbatim so keys and their offsets survive a round trip byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dat1Container {
    /// Section table in on-disk order
    pub sections: Vec<SectionInfo>,
    pub header: [u8; DAT1_HEADER_SIZE],
    pub key_hashes: Vec<u32>,
    pub sorted_key_hashes: Vec<u32>,
    pub sorted_indexes: Vec<u16>,
    pub unknown_ints: Vec<u32>,
    pub entries: Vec<Entry>,
    /// Raw keys pool
    pub keys_data: Vec<u8>,
}

impl Dat1Container {
    /// Build a container from scratch.
    ///
    /// The section table lists every section in emission order; offsets and
    /// sizes are filled in on the first write. Keys are packed into a fresh
    /// pool in entry order.
    #[must_use]
    pub fn new(
        header: [u8; DAT1_HEADER_SIZE],
        rows: Vec<(String, String, u32, u32)>,
    ) -> Self {
        let mut keys_data = Vec::new();
        let mut entries = Vec::with_capacity(rows.len());
        let mut key_hashes = Vec::with_capacity(rows.len());
        let mut unknown_ints = Vec::with_capacity(rows.len());

        for (key, value, hash, unknown) in rows {
            let key_offset = keys_data.len() as u32;
            keys_data.extend_from_slice(key.as_bytes());
            keys_data.push(0);
            entries.push(Entry {
                key_offset,
                value_offset: 0,
                key,
                value,
            });
            key_hashes.push(hash);
            unknown_ints.push(unknown);
        }

        let mut order: Vec<usize> = (0..key_hashes.len()).collect();
        order.sort_by_key(|&i| key_hashes[i]);
        let sorted_key_hashes = order.iter().map(|&i| key_hashes[i]).collect();
        let sorted_indexes = order.iter().map(|&i| i as u16).collect();

        let sections = SectionKind::EMISSION_ORDER
            .into_iter()
            .map(|kind| SectionInfo {
                kind,
                offset: 0,
                size: 0,
            })
            .collect();

        Self {
            sections,
            header,
            key_hashes,
            sorted_key_hashes,
            sorted_indexes,
            unknown_ints,
            entries,
            keys_data,
        }
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Get the table record for a section
    #[must_use]
    pub fn section_info(&self, kind: SectionKind) -> Option<&SectionInfo> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Key/value view in entry order
    #[must_use]
    pub fn to_map(&self) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }

    /// Overwrite the value of the first entry with a matching key.
    ///
    /// Returns `false` if no entry has this key.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.value = value.into();
            true
        } else {
            false
        }
    }

    /// Apply every `(key, value)` pair; keys not in the table are ignored.
    ///
    /// Returns the number of entries updated.
    pub fn update<'a, I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut updated = 0;
        for (key, value) in values {
            if self.set_value(key, value.as_str()) {
                updated += 1;
            }
        }
        updated
    }
}
