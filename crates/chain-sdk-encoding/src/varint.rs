use std::io::{Read, Write};

use crate::EncodingError;

/// The largest value representable by a 63-bit varint.
pub const MAX_VARINT63: u64 = (1 << 63) - 1;

/// The largest value representable by a 31-bit varint, used for lengths and counts.
pub const MAX_VARINT31: u64 = (1 << 31) - 1;

/// The longest encoding of a 64-bit value.
pub const MAX_VARINT_LEN: usize = 10;

/// Appends the base-128 encoding of a value to a buffer.
/// Low order groups come first, and the high bit of each byte marks a continuation.
#[allow(clippy::cast_possible_truncation)]
pub fn put_uvarint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push(value as u8 | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Reads an unbounded 64-bit varint.
fn read_uvarint(reader: &mut impl Read) -> Result<u64, EncodingError> {
    let mut value = 0;
    let mut byte = [0; 1];

    for shift in (0..64).step_by(7) {
        reader.read_exact(&mut byte)?;

        // The tenth byte only has room for the single remaining bit.
        if shift == 63 && byte[0] > 1 {
            return Err(EncodingError::Overflow);
        }

        value |= u64::from(byte[0] & 0x7f) << shift;

        if byte[0] & 0x80 == 0 {
            return Ok(value);
        }
    }

    Err(EncodingError::Overflow)
}

/// Reads a varint whose value must fit in 63 bits.
pub fn read_varint63(reader: &mut impl Read) -> Result<u64, EncodingError> {
    let value = read_uvarint(reader)?;
    if value > MAX_VARINT63 {
        return Err(EncodingError::Overflow);
    }
    Ok(value)
}

/// Reads a varint length or count in the range `0..=2^31-1`.
pub fn read_varint31(reader: &mut impl Read) -> Result<u32, EncodingError> {
    let value = read_uvarint(reader)?;
    match u32::try_from(value) {
        Ok(length) if value <= MAX_VARINT31 => Ok(length),
        _ => Err(EncodingError::LengthOutOfRange(value)),
    }
}

pub fn write_varint63(writer: &mut impl Write, value: u64) -> Result<(), EncodingError> {
    if value > MAX_VARINT63 {
        return Err(EncodingError::Overflow);
    }
    write_uvarint(writer, value)
}

pub fn write_varint31(writer: &mut impl Write, value: u64) -> Result<(), EncodingError> {
    if value > MAX_VARINT31 {
        return Err(EncodingError::LengthOutOfRange(value));
    }
    write_uvarint(writer, value)
}

fn write_uvarint(writer: &mut impl Write, value: u64) -> Result<(), EncodingError> {
    let mut buf = Vec::with_capacity(MAX_VARINT_LEN);
    put_uvarint(&mut buf, value);
    writer.write_all(&buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::zero(0, &hex!("00"))]
    #[case::one(1, &hex!("01"))]
    #[case::one_byte_max(127, &hex!("7f"))]
    #[case::two_bytes(128, &hex!("8001"))]
    #[case::three_hundred(300, &hex!("ac02"))]
    #[case::max_varint31(MAX_VARINT31, &hex!("ffffffff07"))]
    #[case::max_varint63(MAX_VARINT63, &hex!("ffffffffffffffff7f"))]
    fn test_varint63_encoding(#[case] value: u64, #[case] expected: &[u8]) -> anyhow::Result<()> {
        let mut encoded = Vec::new();
        write_varint63(&mut encoded, value)?;
        assert_eq!(encoded, expected);

        let mut reader = expected;
        assert_eq!(read_varint63(&mut reader)?, value);
        assert!(reader.is_empty());

        Ok(())
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::dangling_continuation(&hex!("80"))]
    #[case::long_dangling_continuation(&hex!("ffffffff"))]
    fn test_varint63_truncated(#[case] bytes: &[u8]) {
        let mut reader = bytes;
        assert!(matches!(
            read_varint63(&mut reader),
            Err(EncodingError::TruncatedInput)
        ));
    }

    #[rstest]
    #[case::u64_max(&hex!("ffffffffffffffffff01"))]
    #[case::sixty_fourth_bit(&hex!("80808080808080808001"))]
    #[case::tenth_byte_too_large(&hex!("ffffffffffffffffff02"))]
    #[case::eleven_bytes(&hex!("ffffffffffffffffff8001"))]
    fn test_varint63_overflow(#[case] bytes: &[u8]) {
        let mut reader = bytes;
        assert!(matches!(
            read_varint63(&mut reader),
            Err(EncodingError::Overflow)
        ));
    }

    #[test]
    fn test_write_varint63_overflow() {
        let mut encoded = Vec::new();
        assert!(matches!(
            write_varint63(&mut encoded, MAX_VARINT63 + 1),
            Err(EncodingError::Overflow)
        ));
        assert!(encoded.is_empty());
    }

    #[test]
    fn test_varint31_range() -> anyhow::Result<()> {
        let mut reader: &[u8] = &hex!("ffffffff07");
        assert_eq!(u64::from(read_varint31(&mut reader)?), MAX_VARINT31);

        let mut reader: &[u8] = &hex!("8080808008");
        assert!(matches!(
            read_varint31(&mut reader),
            Err(EncodingError::LengthOutOfRange(2_147_483_648))
        ));

        let mut encoded = Vec::new();
        assert!(matches!(
            write_varint31(&mut encoded, MAX_VARINT31 + 1),
            Err(EncodingError::LengthOutOfRange(_))
        ));

        Ok(())
    }
}
