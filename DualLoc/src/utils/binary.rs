//! Little-endian primitive reads/writes shared by the container codec

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};

/// Read `count` little-endian `u32` values
pub fn read_u32_array<R: Read>(reader: &mut R, count: usize) -> Result<Vec<u32>> {
    let mut values = vec![0u32; count];
    reader.read_u32_into::<LittleEndian>(&mut values)?;
    Ok(values)
}

/// Read `count` little-endian `u16` values
pub fn read_u16_array<R: Read>(reader: &mut R, count: usize) -> Result<Vec<u16>> {
    let mut values = vec![0u16; count];
    reader.read_u16_into::<LittleEndian>(&mut values)?;
    Ok(values)
}

/// Write a slice of `u32` values in little-endian order
pub fn write_u32_array<W: Write>(writer: &mut W, values: &[u32]) -> Result<()> {
    for &value in values {
        writer.write_u32::<LittleEndian>(value)?;
    }
    Ok(())
}

/// Write a slice of `u16` values in little-endian order
pub fn write_u16_array<W: Write>(writer: &mut W, values: &[u16]) -> Result<()> {
    for &value in values {
        writer.write_u16::<LittleEndian>(value)?;
    }
    Ok(())
}

/// Read a null-terminated UTF-8 string starting at `pos` in `data`.
///
/// Returns `None` if `pos` is past the end or no terminator follows it.
pub fn read_cstr(data: &[u8], pos: usize) -> Option<Result<String>> {
    let tail = data.get(pos..)?;
    let len = tail.iter().position(|&b| b == 0)?;
    Some(String::from_utf8(tail[..len].to_vec()).map_err(Error::from))
}

/// Write a string as UTF-8 followed by a single zero byte
pub fn write_cstr<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    writer.write_all(value.as_bytes())?;
    writer.write_u8(0)?;
    Ok(())
}

/// Total length of a seekable stream; the position is restored afterwards
pub fn stream_len<S: Seek>(stream: &mut S) -> Result<u64> {
    let pos = stream.stream_position()?;
    let len = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(pos))?;
    Ok(len)
}

/// Number of bytes needed to move `pos` to the next multiple of `align`
#[must_use]
pub fn align_padding(pos: u64, align: u64) -> u64 {
    (align - pos % align) % align
}

/// Pad the stream with zero bytes up to the next `align` boundary, measured
/// from `base`
pub fn write_padding<W: Write + Seek>(writer: &mut W, base: u64, align: u64) -> Result<()> {
    let pad = align_padding(writer.stream_position()? - base, align);
    writer.write_all(&vec![0u8; pad as usize])?;
    Ok(())
}
