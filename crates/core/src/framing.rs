//! Frame container: a code table and its encoded bitstream in one message.
//!
//! The frame carries the table explicitly, so the decoder never has to
//! rebuild it from frequencies.
//!
//! # Frame Format
//!
//! ```text
//! +--------------------+
//! | Magic (4 bytes)    |  0x48 0x55 0x46 0x43 ("HUFC")
//! +--------------------+
//! | symbol_count (8)   |  u64 little-endian, symbols encoded
//! +--------------------+
//! | table_bits (4)     |  u32 bit length of the table section
//! +--------------------+
//! | payload_bits (8)   |  u64 bit length of the payload
//! +--------------------+
//! | crc32 (4)          |  u32 checksum
//! +--------------------+
//! | table section      |  ceil(table_bits / 8) bytes
//! +--------------------+
//! | payload            |  ceil(payload_bits / 8) bytes
//! +--------------------+
//! ```
//!
//! # Table Section
//!
//! MSB-first bits: a 9-bit entry count (0..=256), then for each entry an
//! 8-bit symbol, an 8-bit code length (1..=255) and the code bits.
//!
//! # Padding
//!
//! Both sections are packed MSB-first and the final byte of each is padded
//! with zero bits. Readers use the explicit bit lengths and ignore padding.
//!
//! # CRC Coverage
//!
//! The CRC32 covers symbol_count, table_bits, payload_bits, the table section
//! and the payload.

use crate::bitio::{BitReader, BitWriter};
use crate::bits::BitString;
use crate::code_table::CodeTable;
use crate::codec;
use crate::error::{Error, FramingError, HuffmanError, Result};

/// Magic number for frames: "HUFC"
pub const MAGIC: [u8; 4] = [0x48, 0x55, 0x46, 0x43];

/// Size of the frame header in bytes
pub const HEADER_SIZE: usize = 28;

const ENTRY_COUNT_BITS: usize = 9;
const SYMBOL_BITS: usize = 8;
const CODE_LEN_BITS: usize = 8;
const MAX_CODE_LEN: usize = 255;
const MAX_ENTRIES: usize = 256;

/// A parsed frame: everything needed to decode one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Number of symbols the payload decodes to
    pub symbol_count: u64,

    /// Code table the payload was encoded with
    pub table: CodeTable,

    /// Encoded bitstream
    pub payload: BitString,
}

impl Frame {
    /// Build the code table for `input` and encode it.
    pub fn encode(input: &[u8]) -> Result<Self> {
        let (table, _) = codec::build_code_table(input)?;
        let payload = codec::encode(input, &table)?;

        Ok(Self {
            symbol_count: input.len() as u64,
            table,
            payload,
        })
    }
}

/// Serialize a frame into bytes.
///
/// # Errors
/// `FramingError::CodeTooLong` if a code does not fit the 8-bit length
/// field.
pub fn serialize_frame(frame: &Frame) -> Result<Vec<u8>> {
    let table_section = write_table(&frame.table)?;

    let table_bits = table_section.len() as u32;
    let payload_bits = frame.payload.len() as u64;
    let table_bytes = table_section.as_bytes();
    let payload_bytes = frame.payload.as_bytes();

    let crc32 = compute_crc(
        frame.symbol_count,
        table_bits,
        payload_bits,
        table_bytes,
        payload_bytes,
    );

    let total_size = HEADER_SIZE + table_bytes.len() + payload_bytes.len();
    let mut bytes = Vec::with_capacity(total_size);

    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&frame.symbol_count.to_le_bytes());
    bytes.extend_from_slice(&table_bits.to_le_bytes());
    bytes.extend_from_slice(&payload_bits.to_le_bytes());
    bytes.extend_from_slice(&crc32.to_le_bytes());
    bytes.extend_from_slice(table_bytes);
    bytes.extend_from_slice(payload_bytes);

    Ok(bytes)
}

/// Parse a frame from bytes.
///
/// # Errors
/// - `FramingError::FrameTooShort` if the buffer cannot hold a header
/// - `FramingError::InvalidMagic` if the magic number doesn't match
/// - `FramingError::FrameLengthMismatch` if the size disagrees with the header
/// - `Error::Crc` if CRC validation fails
/// - table section errors (`BitIo`, `TableTooLarge`, `InvalidInput`)
pub fn parse_frame(bytes: &[u8]) -> Result<Frame> {
    if bytes.len() < HEADER_SIZE {
        return Err(FramingError::FrameTooShort {
            required: HEADER_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
    if magic != MAGIC {
        return Err(FramingError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let symbol_count = read_u64(&bytes[4..12]);
    let table_bits = read_u32(&bytes[12..16]);
    let payload_bits = read_u64(&bytes[16..24]);
    let crc32 = read_u32(&bytes[24..28]);

    let table_len = (table_bits as usize).div_ceil(8);
    let payload_len = usize::try_from(payload_bits.div_ceil(8)).unwrap_or(usize::MAX);
    let expected_size = HEADER_SIZE
        .saturating_add(table_len)
        .saturating_add(payload_len);
    if bytes.len() != expected_size {
        return Err(FramingError::FrameLengthMismatch {
            expected: expected_size,
            actual: bytes.len(),
        }
        .into());
    }

    let table_start = HEADER_SIZE;
    let payload_start = table_start + table_len;
    let table_bytes = &bytes[table_start..payload_start];
    let payload_bytes = &bytes[payload_start..];

    let computed_crc = compute_crc(
        symbol_count,
        table_bits,
        payload_bits,
        table_bytes,
        payload_bytes,
    );
    if computed_crc != crc32 {
        return Err(Error::Crc {
            expected: crc32,
            actual: computed_crc,
        });
    }

    let table_section = BitString::from_packed(table_bytes, table_bits as usize)?;
    let table = read_table(&table_section)?;
    let payload_len_bits = usize::try_from(payload_bits).unwrap_or(usize::MAX);
    let payload = BitString::from_packed(payload_bytes, payload_len_bits)?;

    Ok(Frame {
        symbol_count,
        table,
        payload,
    })
}

/// Build a frame for `input` and serialize it.
pub fn encode_frame(input: &[u8]) -> Result<Vec<u8>> {
    serialize_frame(&Frame::encode(input)?)
}

/// Decode a parsed frame back into the encoded symbols.
///
/// # Errors
/// Decode errors from the payload, or `HuffmanError::LengthMismatch` if the
/// payload decodes to a different number of symbols than the header says.
pub fn decode_frame(frame: &Frame) -> Result<Vec<u8>> {
    let symbols = codec::decode(&frame.payload, &frame.table)?;

    if symbols.len() as u64 != frame.symbol_count {
        return Err(HuffmanError::LengthMismatch {
            expected: usize::try_from(frame.symbol_count).unwrap_or(usize::MAX),
            actual: symbols.len(),
        }
        .into());
    }

    Ok(symbols)
}

fn write_table(table: &CodeTable) -> Result<BitString> {
    let mut writer = BitWriter::new();
    writer.write_bits(table.len() as u64, ENTRY_COUNT_BITS)?;

    for (symbol, code) in table.iter() {
        if code.len() > MAX_CODE_LEN {
            return Err(FramingError::CodeTooLong {
                symbol,
                length: code.len(),
            }
            .into());
        }
        writer.write_bits(u64::from(symbol), SYMBOL_BITS)?;
        writer.write_bits(code.len() as u64, CODE_LEN_BITS)?;
        writer.write_code(code);
    }

    Ok(writer.finish())
}

fn read_table(section: &BitString) -> Result<CodeTable> {
    let mut reader = BitReader::new(section);

    let entries = reader.read_bits(ENTRY_COUNT_BITS)? as usize;
    if entries > MAX_ENTRIES {
        return Err(FramingError::TableTooLarge { entries }.into());
    }

    let mut codes = Vec::with_capacity(entries);
    for _ in 0..entries {
        let symbol = reader.read_bits(SYMBOL_BITS)? as u8;
        let len = reader.read_bits(CODE_LEN_BITS)? as usize;
        codes.push((symbol, reader.read_code(len)?));
    }

    CodeTable::from_codes(codes)
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_le_bytes(buf)
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

/// Compute CRC32 over the protected fields.
fn compute_crc(
    symbol_count: u64,
    table_bits: u32,
    payload_bits: u64,
    table_section: &[u8],
    payload: &[u8],
) -> u32 {
    let mut hasher = crc32fast::Hasher::new();

    hasher.update(&symbol_count.to_le_bytes());
    hasher.update(&table_bits.to_le_bytes());
    hasher.update(&payload_bits.to_le_bytes());

    hasher.update(table_section);
    hasher.update(payload);

    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_parse_round_trip() {
        let input = b"hello world! this is a test.";

        let bytes = encode_frame(input).unwrap();
        let frame = parse_frame(&bytes).unwrap();

        assert_eq!(frame.symbol_count, input.len() as u64);
        assert_eq!(frame, Frame::encode(input).unwrap());
        assert_eq!(decode_frame(&frame).unwrap(), input);
    }

    #[test]
    fn test_invalid_magic() {
        let mut bytes = vec![0xFF, 0xFF, 0xFF, 0xFF];
        bytes.extend_from_slice(&[0u8; 24]);

        let result = parse_frame(&bytes);
        assert!(matches!(
            result,
            Err(Error::Framing(FramingError::InvalidMagic { .. }))
        ));
    }

    #[test]
    fn test_frame_too_short() {
        let bytes = vec![0u8; 10];
        let result = parse_frame(&bytes);
        assert!(matches!(
            result,
            Err(Error::Framing(FramingError::FrameTooShort { .. }))
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let mut bytes = encode_frame(b"length check").unwrap();
        bytes.push(0);

        let result = parse_frame(&bytes);
        assert!(matches!(
            result,
            Err(Error::Framing(FramingError::FrameLengthMismatch { .. }))
        ));
    }

    #[test]
    fn test_crc_mismatch() {
        let mut bytes = encode_frame(b"test data").unwrap();

        let len = bytes.len();
        bytes[len - 1] ^= 0x01;

        let result = parse_frame(&bytes);
        assert!(matches!(result, Err(Error::Crc { .. })));
    }

    #[test]
    fn test_empty_data() {
        let bytes = encode_frame(b"").unwrap();
        // Header plus a 9-bit zero entry count
        assert_eq!(bytes.len(), HEADER_SIZE + 2);

        let frame = parse_frame(&bytes).unwrap();
        assert!(frame.table.is_empty());
        assert!(frame.payload.is_empty());
        assert_eq!(decode_frame(&frame).unwrap(), b"");
    }

    #[test]
    fn test_single_byte() {
        let bytes = encode_frame(b"A").unwrap();
        let frame = parse_frame(&bytes).unwrap();
        assert_eq!(frame.payload.to_string(), "0");
        assert_eq!(decode_frame(&frame).unwrap(), b"A");
    }

    #[test]
    fn test_large_single_symbol_data() {
        let input = vec![b'X'; 65536];

        let bytes = encode_frame(&input).unwrap();
        // One bit per symbol
        assert!(bytes.len() < input.len() / 7);

        let frame = parse_frame(&bytes).unwrap();
        assert_eq!(decode_frame(&frame).unwrap(), input);
    }

    #[test]
    fn test_symbol_count_mismatch() {
        let mut frame = Frame::encode(b"counted").unwrap();
        frame.symbol_count += 1;

        let frame = parse_frame(&serialize_frame(&frame).unwrap()).unwrap();
        assert!(matches!(
            decode_frame(&frame),
            Err(Error::Huffman(HuffmanError::LengthMismatch {
                expected: 8,
                actual: 7
            }))
        ));
    }

    #[test]
    fn test_symbol_count_beyond_usize_reports_saturated_length() {
        let mut frame = Frame::encode(b"counted").unwrap();
        frame.symbol_count = u64::MAX;

        assert!(matches!(
            decode_frame(&frame),
            Err(Error::Huffman(HuffmanError::LengthMismatch {
                expected: usize::MAX,
                actual: 7
            }))
        ));
    }

    #[test]
    fn test_code_too_long() {
        // A valid chain code where one symbol needs 256 bits
        let mut codes = Vec::new();
        let mut prefix = BitString::new();
        for symbol in 0..=255u8 {
            let mut code = prefix.clone();
            code.push(false);
            codes.push((symbol, code));
            prefix.push(true);
        }
        let table = CodeTable::from_codes(codes).unwrap();
        let frame = Frame {
            symbol_count: 0,
            table,
            payload: BitString::new(),
        };

        assert!(matches!(
            serialize_frame(&frame),
            Err(Error::Framing(FramingError::CodeTooLong {
                symbol: 255,
                length: 256
            }))
        ));
    }

    #[test]
    fn test_table_with_prefix_conflict_is_rejected() {
        let mut writer = BitWriter::new();
        writer.write_bits(2, ENTRY_COUNT_BITS).unwrap();
        for (symbol, code) in [(b'a', "0"), (b'b', "01")] {
            let code: BitString = code.parse().unwrap();
            writer.write_bits(symbol as u64, SYMBOL_BITS).unwrap();
            writer.write_bits(code.len() as u64, CODE_LEN_BITS).unwrap();
            writer.write_code(&code);
        }

        let result = read_table(&writer.finish());
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::InvalidInput(_)))
        ));
    }
}
