//! Code tables: the symbol → code mapping used to encode, and its inverse
//! used to decode.
//!
//! Tables come either from a [`HuffmanTree`] (prefix-free by construction)
//! or from an externally supplied mapping, which is validated.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::bits::BitString;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanNode, HuffmanTree};

/// A bidirectional, prefix-free code table.
///
/// # Invariants
/// - every code is non-empty
/// - no code is a prefix of another code
/// - `codes` and `symbols` are exact inverses
/// - `prefixes` holds every proper, non-empty prefix of every code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, BitString>,
    symbols: HashMap<BitString, u8>,
    prefixes: HashSet<BitString>,
    max_code_len: usize,
}

impl CodeTable {
    /// An empty table, the code table of an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive codes from a tree: `0` for left, `1` for right.
    ///
    /// A tree with a single leaf gives that symbol the one-bit code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self::new();

        if let HuffmanNode::Leaf { symbol, .. } = tree.root() {
            table.insert(*symbol, BitString::from_iter([false]));
            return table;
        }

        let mut path = BitString::new();
        table.collect(tree.root(), &mut path);
        table
    }

    fn collect(&mut self, node: &HuffmanNode, path: &mut BitString) {
        match node {
            HuffmanNode::Leaf { symbol, .. } => self.insert(*symbol, path.clone()),
            HuffmanNode::Internal { left, right, .. } => {
                path.push(false);
                self.collect(left, path);
                path.pop();

                path.push(true);
                self.collect(right, path);
                path.pop();
            }
        }
    }

    fn insert(&mut self, symbol: u8, code: BitString) {
        let mut prefix = BitString::with_capacity(code.len());
        for bit in code.iter().take(code.len().saturating_sub(1)) {
            prefix.push(bit);
            self.prefixes.insert(prefix.clone());
        }

        self.max_code_len = self.max_code_len.max(code.len());
        self.symbols.insert(code.clone(), symbol);
        self.codes.insert(symbol, code);
    }

    /// Build the tree for `frequencies` and derive its table in one step.
    /// Encoder and decoder rebuilding from the same counts get equal tables.
    ///
    /// An empty frequency table yields an empty code table.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Ok(Self::new());
        }
        Ok(Self::from_tree(&HuffmanTree::from_frequencies(frequencies)?))
    }

    /// Build a table from an externally supplied mapping.
    ///
    /// # Errors
    /// `HuffmanError::InvalidInput` if a code is empty, a symbol appears
    /// twice, two symbols share a code, or one code is a prefix of another.
    pub fn from_codes<I>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, BitString)>,
    {
        let mut table = Self::new();

        for (symbol, code) in codes {
            if code.is_empty() {
                return Err(invalid(format!("symbol {symbol:#04x} has an empty code")));
            }
            if table.codes.contains_key(&symbol) {
                return Err(invalid(format!("symbol {symbol:#04x} has more than one code")));
            }
            if let Some(&other) = table.symbols.get(&code) {
                return Err(invalid(format!(
                    "symbols {other:#04x} and {symbol:#04x} share the code {code}"
                )));
            }
            table.insert(symbol, code);
        }

        // Sorted by bits, any code with a prefix in the table follows some
        // prefix of itself; checking neighbours is enough.
        let mut sorted: Vec<(&BitString, u8)> =
            table.codes.iter().map(|(&symbol, code)| (code, symbol)).collect();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            let (shorter, first) = pair[0];
            let (longer, second) = pair[1];
            if longer.starts_with(shorter) {
                return Err(invalid(format!(
                    "code {shorter} of symbol {first:#04x} is a prefix of code {longer} of symbol {second:#04x}"
                )));
            }
        }

        Ok(table)
    }

    /// Code for `symbol`.
    pub fn code(&self, symbol: u8) -> Option<&BitString> {
        self.codes.get(&symbol)
    }

    /// Symbol whose code is exactly `code`.
    pub fn symbol(&self, code: &BitString) -> Option<u8> {
        self.symbols.get(code).copied()
    }

    /// True if `bits` is a proper prefix of some code, so more bits could
    /// still complete it.
    pub fn is_prefix(&self, bits: &BitString) -> bool {
        self.prefixes.contains(bits)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitString)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Length of the longest code (0 for an empty table).
    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// Total number of bits needed to encode a message with these
    /// frequencies. Symbols without a code are not counted. Saturates at
    /// `u64::MAX`.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| {
                self.code(symbol)
                    .map(|code| count.saturating_mul(code.len() as u64))
            })
            .fold(0, u64::saturating_add)
    }

    /// Expected code length in bits per symbol under `frequencies`.
    pub fn average_length(&self, frequencies: &FrequencyTable) -> f64 {
        if frequencies.total() == 0 {
            return 0.0;
        }
        self.weighted_length(frequencies) as f64 / frequencies.total() as f64
    }
}

fn invalid(message: String) -> crate::error::Error {
    HuffmanError::InvalidInput(message).into()
}
