//! Symbol frequency counting.

use crate::error::{HuffmanError, Result};

/// Occurrence counts for each byte value.
///
/// # Invariants
/// - `total` equals the sum of all counts
/// - `distinct` equals the number of non-zero counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    distinct: usize,
    total: u64,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            counts: [0; 256],
            distinct: 0,
            total: 0,
        }
    }

    /// Count every symbol in `symbols`.
    pub fn from_symbols(symbols: &[u8]) -> Self {
        let mut table = Self::new();
        for &symbol in symbols {
            // A slice length always fits in u64
            table.add_bounded(symbol, 1);
        }
        table
    }

    /// Build a table from `(symbol, count)` pairs, e.g. counts that were
    /// transmitted instead of a code table. Zero counts are skipped and
    /// repeated symbols accumulate.
    ///
    /// # Errors
    /// `HuffmanError::InvalidInput` if the counts sum past `u64::MAX`.
    pub fn from_counts<I>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut table = Self::new();
        for (symbol, count) in counts {
            table.add(symbol, count)?;
        }
        Ok(table)
    }

    /// Record `count` more occurrences of `symbol`.
    ///
    /// # Errors
    /// `HuffmanError::InvalidInput` if the total would overflow `u64`; the
    /// table is left unchanged.
    pub fn add(&mut self, symbol: u8, count: u64) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        // Every count is at most the total, so checking the total is enough
        let total = self.total.checked_add(count).ok_or_else(|| {
            HuffmanError::InvalidInput(format!(
                "count {count} for symbol {symbol:#04x} overflows the total of {}",
                self.total
            ))
        })?;

        self.bump(symbol, count);
        self.total = total;
        Ok(())
    }

    /// Record a count whose sum with the others is known to fit in `u64`,
    /// such as the leaf weights of a built tree.
    pub(crate) fn add_bounded(&mut self, symbol: u8, count: u64) {
        if count == 0 {
            return;
        }
        self.bump(symbol, count);
        self.total += count;
    }

    fn bump(&mut self, symbol: u8, count: u64) {
        let slot = &mut self.counts[symbol as usize];
        if *slot == 0 {
            self.distinct += 1;
        }
        *slot += count;
    }

    /// Count for `symbol` (zero if absent).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.distinct
    }

    /// True if no symbol has been counted.
    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Iterate `(symbol, count)` over present symbols in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX)
            .map(move |symbol| (symbol, self.counts[symbol as usize]))
            .filter(|&(_, count)| count > 0)
    }

    /// Shannon entropy in bits per symbol: the lower bound on the average
    /// code length of any prefix-free code for this distribution.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        self.iter()
            .map(|(_, count)| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
