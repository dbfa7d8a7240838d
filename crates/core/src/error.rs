//! Error types for the huffcode core.
//!
//! Every operation returns a structured error instead of panicking. There is
//! no partial-success mode: an encode or decode either covers the whole input
//! or fails.

use thiserror::Error;

/// Top-level error type for all operations in the core.
///
/// Each variant corresponds to a failure domain:
/// - Bit I/O: reading bits past the end, malformed bit text
/// - Huffman: tree construction, encode and decode failures
/// - Framing: container header and table section problems
/// - CRC: container corruption
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of a bit string)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman codec error (e.g., unknown symbol, truncated stream)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Frame container error (e.g., invalid header, length mismatch)
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// CRC validation failed, indicating data corruption
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the bits
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// A packed buffer holds fewer bits than its declared length
    #[error("insufficient bits: requested {requested}, available {available}")]
    InsufficientBits { requested: usize, available: usize },

    /// Invalid bit count for a fixed-width field (more than 64 bits)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),

    /// Textual bit string contained something other than '0' or '1'
    #[error("invalid bit character {found:?} at offset {position}")]
    InvalidBitChar { position: usize, found: char },
}

/// Huffman codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// Malformed or absent input to tree construction, or an unusable
    /// externally supplied code table
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Encode requested for a symbol the code table does not cover
    #[error("symbol {symbol:#04x} at offset {position} has no code")]
    UnknownSymbol { symbol: u8, position: usize },

    /// Bitstream ended in the middle of a code
    #[error("bitstream truncated: code starting at bit {position} is missing bits ({pending} pending)")]
    TruncatedStream { position: usize, pending: usize },

    /// Bit sequence matches no path in the tree or table
    #[error("invalid huffman code at bit position {position}")]
    InvalidCode { position: usize },

    /// Decoded length doesn't match the length recorded alongside the bits
    #[error("decoded length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Frame container errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Frame is too short to contain a valid header
    #[error("frame too short: need at least {required} bytes, got {actual}")]
    FrameTooShort { required: usize, actual: usize },

    /// Frame size doesn't match the section lengths in its header
    #[error("frame length mismatch: header implies {expected} bytes, got {actual}")]
    FrameLengthMismatch { expected: usize, actual: usize },

    /// A code is too long for the 8-bit length field
    #[error("code for symbol {symbol:#04x} is {length} bits, maximum is 255")]
    CodeTooLong { symbol: u8, length: usize },

    /// Table section declares more entries than there are symbols
    #[error("table declares {entries} entries, maximum is 256")]
    TableTooLarge { entries: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
