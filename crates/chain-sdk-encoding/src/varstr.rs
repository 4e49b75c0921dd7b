use std::io::{Read, Write};

use crate::{read_varint31, write_varint31, EncodingError};

/// Reads a byte string prefixed with its varint31 length.
///
/// The declared length is not trusted for allocation; bytes are only buffered as they arrive.
pub fn read_varstr31(reader: &mut impl Read) -> Result<Vec<u8>, EncodingError> {
    let length = read_varint31(reader)?;
    let mut bytes = Vec::new();
    reader
        .by_ref()
        .take(u64::from(length))
        .read_to_end(&mut bytes)?;

    if bytes.len() != length as usize {
        return Err(EncodingError::TruncatedInput);
    }

    Ok(bytes)
}

pub fn write_varstr31(writer: &mut impl Write, bytes: &[u8]) -> Result<(), EncodingError> {
    write_varint31(writer, bytes.len() as u64)?;
    writer.write_all(bytes)?;
    Ok(())
}

/// Reads a varint31 count followed by that many varstr31 items.
pub fn read_varstr_list(reader: &mut impl Read) -> Result<Vec<Vec<u8>>, EncodingError> {
    let count = read_varint31(reader)?;
    let mut items = Vec::new();
    for _ in 0..count {
        items.push(read_varstr31(reader)?);
    }
    Ok(items)
}

pub fn write_varstr_list<T>(writer: &mut impl Write, items: &[T]) -> Result<(), EncodingError>
where
    T: AsRef<[u8]>,
{
    write_varint31(writer, items.len() as u64)?;
    for item in items {
        write_varstr31(writer, item.as_ref())?;
    }
    Ok(())
}

/// Reads exactly 32 raw bytes, such as a hash.
pub fn read_bytes32(reader: &mut impl Read) -> Result<[u8; 32], EncodingError> {
    let mut bytes = [0; 32];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}
