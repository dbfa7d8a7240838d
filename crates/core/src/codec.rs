//! The three codec operations: derive a code table, encode, decode.
//!
//! # Example
//! ```
//! use huffcode_core::{build_code_table, decode, encode};
//!
//! let (table, tree) = build_code_table(b"foo").unwrap();
//! let bits = encode(b"foo", &table).unwrap();
//! assert_eq!(bits.to_string(), "011");
//!
//! assert_eq!(decode(&bits, &table).unwrap(), b"foo");
//! assert_eq!(decode(&bits, tree.as_ref().unwrap()).unwrap(), b"foo");
//! ```

use crate::bits::BitString;
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanNode, HuffmanTree};

/// What a bitstream can be decoded against.
#[derive(Debug, Clone, Copy)]
pub enum CodeSource<'a> {
    Tree(&'a HuffmanTree),
    Table(&'a CodeTable),
}

impl<'a> From<&'a HuffmanTree> for CodeSource<'a> {
    fn from(tree: &'a HuffmanTree) -> Self {
        CodeSource::Tree(tree)
    }
}

impl<'a> From<&'a CodeTable> for CodeSource<'a> {
    fn from(table: &'a CodeTable) -> Self {
        CodeSource::Table(table)
    }
}

/// Count `input`, build its Huffman tree and derive the code table.
///
/// Empty input is valid: it yields an empty table and no tree.
pub fn build_code_table(input: &[u8]) -> Result<(CodeTable, Option<HuffmanTree>)> {
    let frequencies = FrequencyTable::from_symbols(input);
    if frequencies.is_empty() {
        return Ok((CodeTable::new(), None));
    }

    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    Ok((CodeTable::from_tree(&tree), Some(tree)))
}

/// Concatenate the code of every input symbol, in input order.
///
/// # Errors
/// `HuffmanError::UnknownSymbol` for the first symbol the table has no code
/// for.
pub fn encode(input: &[u8], table: &CodeTable) -> Result<BitString> {
    let mut bits = BitString::with_capacity(input.len() * table.max_code_len().min(8));
    for (position, &symbol) in input.iter().enumerate() {
        let code = table
            .code(symbol)
            .ok_or(HuffmanError::UnknownSymbol { symbol, position })?;
        bits.extend_from_bits(code);
    }
    Ok(bits)
}

/// Recover the symbols of `bits` using a tree or a code table.
///
/// # Errors
/// - `HuffmanError::TruncatedStream` if the bits end in the middle of a code
/// - `HuffmanError::InvalidCode` if the bits follow no code in the source
pub fn decode<'a>(bits: &BitString, source: impl Into<CodeSource<'a>>) -> Result<Vec<u8>> {
    match source.into() {
        CodeSource::Tree(tree) => decode_with_tree(bits, tree),
        CodeSource::Table(table) => decode_with_table(bits, table),
    }
}

fn decode_with_tree(bits: &BitString, tree: &HuffmanTree) -> Result<Vec<u8>> {
    let root = tree.root();

    // A lone leaf has no children to walk: every `0` is one symbol.
    if let HuffmanNode::Leaf { symbol, .. } = root {
        return decode_single(bits, *symbol);
    }

    let mut symbols = Vec::new();
    let mut cursor = root;
    let mut code_start = 0;

    for (position, bit) in bits.iter().enumerate() {
        let HuffmanNode::Internal { left, right, .. } = cursor else {
            return Err(HuffmanError::InvalidCode {
                position: code_start,
            }
            .into());
        };

        let next = if bit { &**right } else { &**left };
        match next {
            HuffmanNode::Leaf { symbol, .. } => {
                symbols.push(*symbol);
                cursor = root;
                code_start = position + 1;
            }
            internal => cursor = internal,
        }
    }

    finish(symbols, code_start, bits.len())
}

fn decode_with_table(bits: &BitString, table: &CodeTable) -> Result<Vec<u8>> {
    let mut symbols = Vec::new();
    let mut pending = BitString::with_capacity(table.max_code_len());
    let mut code_start = 0;

    for (position, bit) in bits.iter().enumerate() {
        pending.push(bit);
        if let Some(symbol) = table.symbol(&pending) {
            symbols.push(symbol);
            pending.clear();
            code_start = position + 1;
        } else if !table.is_prefix(&pending) {
            // No code starts with these bits, however many follow
            return Err(HuffmanError::InvalidCode {
                position: code_start,
            }
            .into());
        }
    }

    finish(symbols, code_start, bits.len())
}

fn decode_single(bits: &BitString, symbol: u8) -> Result<Vec<u8>> {
    let mut symbols = Vec::with_capacity(bits.len());
    for (position, bit) in bits.iter().enumerate() {
        if bit {
            return Err(HuffmanError::InvalidCode { position }.into());
        }
        symbols.push(symbol);
    }
    Ok(symbols)
}

/// Succeed only if the last code ended exactly at the end of the bits.
fn finish(symbols: Vec<u8>, code_start: usize, len: usize) -> Result<Vec<u8>> {
    if code_start != len {
        return Err(HuffmanError::TruncatedStream {
            position: code_start,
            pending: len - code_start,
        }
        .into());
    }
    Ok(symbols)
}
