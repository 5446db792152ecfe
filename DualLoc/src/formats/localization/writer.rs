//! `.localization` file writing

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use super::{LOCALIZATION_TAG, Localization};
use crate::error::Result;
use crate::formats::dat1::serialize_dat1;

/// Write a `.localization` file to disk
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_localization<P: AsRef<Path>>(path: P, localization: &mut Localization) -> Result<()> {
    let bytes = serialize_localization(localization)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Serialize a `.localization` asset to bytes.
///
/// The DAT1 payload is laid out first so the envelope can carry its size.
///
/// # Errors
/// Returns an error if the DAT1 payload cannot be serialized.
pub fn serialize_localization(localization: &mut Localization) -> Result<Vec<u8>> {
    let payload = serialize_dat1(&mut localization.data, LOCALIZATION_TAG)?;

    let mut output = Vec::with_capacity(super::ENVELOPE_SIZE + payload.len());
    output.extend_from_slice(&LOCALIZATION_TAG);
    output.write_u32::<LittleEndian>(payload.len() as u32)?;
    output.extend_from_slice(&localization.header);
    output.extend_from_slice(&payload);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::localization::fixtures::localization_bytes;
    use crate::formats::localization::parse_localization_bytes;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_roundtrip() {
        let data = localization_bytes();
        let mut loc = parse_localization_bytes(&data).unwrap();
        assert_eq!(serialize_localization(&mut loc).unwrap(), data);
    }

    #[test]
    fn test_size_recomputed_after_update() {
        let data = localization_bytes();
        let mut loc = parse_localization_bytes(&data).unwrap();
        loc.data.set_value("NAME_001", "Hello there");
        let written = serialize_localization(&mut loc).unwrap();

        let declared = u32::from_le_bytes([written[4], written[5], written[6], written[7]]);
        assert_eq!(declared as usize, written.len() - 36);
        assert_eq!(written.len(), data.len() + 6);
        assert!(parse_localization_bytes(&written).is_ok());
    }

    #[test]
    fn test_write_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.localization");
        let mut loc = parse_localization_bytes(&localization_bytes()).unwrap();
        write_localization(&path, &mut loc).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), localization_bytes());
    }
}
