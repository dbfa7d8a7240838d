//! huffcode-core: Huffman code construction with bit-level encoding and decoding
//!
//! This library provides the pure codec used by the `huffcode` tool:
//! - Counts symbol (byte) frequencies
//! - Builds a Huffman tree with a deterministic tie-break
//! - Derives a prefix-free code table from the tree
//! - Encodes byte sequences into bitstreams and decodes them back
//!
//! # Architecture
//!
//! - `bits`: Packed bit strings for codes and bitstreams
//! - `bitio`: Bit reader/writer cursors for fixed-width fields
//! - `frequency`: Frequency counting
//! - `tree`: Huffman tree construction
//! - `code_table`: Symbol ↔ code mapping
//! - `codec`: `build_code_table`, `encode`, `decode`
//! - `framing`: Self-describing container carrying table and bitstream
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **No I/O**: Every operation is a pure in-memory transform
//! - **Deterministic**: Equal frequency tables always give equal code tables

pub mod bitio;
pub mod bits;
pub mod code_table;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod framing;
pub mod tree;

// Re-export commonly used types
pub use bits::BitString;
pub use code_table::CodeTable;
pub use codec::{build_code_table, decode, encode, CodeSource};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanNode, HuffmanTree};
