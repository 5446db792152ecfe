//! `.localization` file reading and parsing

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{ENVELOPE_HEADER_SIZE, ENVELOPE_SIZE, LOCALIZATION_TAG, Localization};
use crate::error::{Error, Result};
use crate::formats::dat1::parse_dat1;
use crate::utils::stream_len;

/// Read a `.localization` file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, and any error
/// of [`parse_localization_bytes`] for malformed content.
///
/// [`Error::Io`]: crate::Error::Io
pub fn read_localization<P: AsRef<Path>>(path: P) -> Result<Localization> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::with_capacity(stream_len(&mut file)? as usize);
    file.read_to_end(&mut buffer)?;
    parse_localization_bytes(&buffer)
}

/// Parse `.localization` data from bytes
///
/// # Errors
///
/// Returns [`Error::InvalidLocalizationMagic`] if the envelope tag is wrong,
/// [`Error::DataSizeMismatch`] if the declared payload size is not the number
/// of bytes after the envelope, and any DAT1 format error from the payload.
///
/// [`Error::InvalidLocalizationMagic`]: crate::Error::InvalidLocalizationMagic
/// [`Error::DataSizeMismatch`]: crate::Error::DataSizeMismatch
pub fn parse_localization_bytes(data: &[u8]) -> Result<Localization> {
    let tag: [u8; 4] = data
        .get(..4)
        .and_then(|b| b.try_into().ok())
        .ok_or(Error::UnexpectedEof)?;
    if tag != LOCALIZATION_TAG {
        return Err(Error::InvalidLocalizationMagic(tag));
    }

    let declared: [u8; 4] = data
        .get(4..8)
        .and_then(|b| b.try_into().ok())
        .ok_or(Error::UnexpectedEof)?;
    let declared = u32::from_le_bytes(declared) as usize;

    let actual = data.len().saturating_sub(ENVELOPE_SIZE);
    if data.len() < ENVELOPE_SIZE || declared != actual {
        return Err(Error::DataSizeMismatch {
            context: "localization",
            declared: declared as u64,
            actual: actual as u64,
        });
    }

    let mut header = [0u8; ENVELOPE_HEADER_SIZE];
    header.copy_from_slice(&data[8..ENVELOPE_SIZE]);

    let payload = &data[ENVELOPE_SIZE..];
    let container = parse_dat1(payload, tag)?;
    tracing::debug!(
        "parsed localization: {} entries, {} payload bytes",
        container.entry_count(),
        payload.len()
    );

    Ok(Localization::new(header, container))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::localization::fixtures::localization_bytes;

    #[test]
    fn test_parse_envelope() {
        let loc = parse_localization_bytes(&localization_bytes()).unwrap();
        assert_eq!(loc.len(), 3);
        assert_eq!(loc.header, [0xEE; ENVELOPE_HEADER_SIZE]);
        assert_eq!(loc.extension(), "localization");
    }

    #[test]
    fn test_wrong_tag() {
        let mut data = localization_bytes();
        data[0] = 0;
        assert!(matches!(
            parse_localization_bytes(&data),
            Err(Error::InvalidLocalizationMagic(_))
        ));
    }

    #[test]
    fn test_declared_size_mismatch() {
        let mut data = localization_bytes();
        data.push(0);
        assert!(matches!(
            parse_localization_bytes(&data),
            Err(Error::DataSizeMismatch {
                context: "localization",
                ..
            })
        ));
    }

    #[test]
    fn test_too_short() {
        assert!(parse_localization_bytes(&[0xAB, 0xB0]).is_err());
        assert!(matches!(
            parse_localization_bytes(&[0xAB, 0xB0, 0x2B, 0x12, 0, 0, 0, 0]),
            Err(Error::DataSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.localization");
        std::fs::write(&path, localization_bytes()).unwrap();
        let loc = read_localization(&path).unwrap();
        assert_eq!(loc.data.to_map()["NAME_001"], "Hello");
    }
}
