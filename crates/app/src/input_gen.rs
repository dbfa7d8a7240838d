//! Sample input generation.
//!
//! `--sample` replaces real input with generated bytes whose symbol
//! distribution is strongly skewed, so the resulting code table has a wide
//! spread of code lengths.
//!
//! # Design
//!
//! Generated data alternates between:
//! - Prose drawn from approximate English letter frequencies
//! - Runs of a single byte
//! - Short stretches of uniformly random bytes
//!
//! All randomness comes from a seeded ChaCha8 RNG, so the same seed and
//! size always give the same bytes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Approximate relative frequencies of characters in English prose.
const PROSE_WEIGHTS: &[(u8, u32)] = &[
    (b' ', 18),
    (b'e', 10),
    (b't', 7),
    (b'a', 6),
    (b'o', 6),
    (b'i', 6),
    (b'n', 6),
    (b's', 5),
    (b'h', 5),
    (b'r', 5),
    (b'd', 3),
    (b'l', 3),
    (b'u', 2),
    (b'c', 2),
    (b'm', 2),
    (b'w', 2),
    (b'f', 2),
    (b'g', 2),
    (b'y', 2),
    (b'p', 2),
    (b'b', 1),
    (b'v', 1),
    (b'k', 1),
    (b'.', 1),
    (b',', 1),
    (b'\n', 1),
];

/// Generate `size_bytes` of sample input from `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let total_weight: u32 = PROSE_WEIGHTS.iter().map(|&(_, w)| w).sum();
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section_len = rng.gen_range(16..=512).min(size_bytes - data.len());

        match rng.gen_range(0..10) {
            // 70% prose
            0..=6 => {
                for _ in 0..section_len {
                    data.push(pick_weighted(&mut rng, total_weight));
                }
            }

            // 20% runs
            7..=8 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(section_len));
            }

            // 10% noise
            _ => {
                for _ in 0..section_len {
                    data.push(rng.gen());
                }
            }
        }
    }

    data
}

fn pick_weighted(rng: &mut ChaCha8Rng, total_weight: u32) -> u8 {
    let mut roll = rng.gen_range(0..total_weight);
    for &(byte, weight) in PROSE_WEIGHTS {
        if roll < weight {
            return byte;
        }
        roll -= weight;
    }
    b' '
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sample_data() {
        let data = generate_sample_data(42, 1000);
        assert_eq!(data.len(), 1000);
    }

    #[test]
    fn test_determinism() {
        let data1 = generate_sample_data(12345, 5000);
        let data2 = generate_sample_data(12345, 5000);

        assert_eq!(data1, data2);
    }

    #[test]
    fn test_different_seeds() {
        let data1 = generate_sample_data(1, 1000);
        let data2 = generate_sample_data(2, 1000);

        assert_ne!(data1, data2);
    }

    #[test]
    fn test_various_sizes() {
        for size in [0, 1, 100, 1000, 10000, 100000] {
            let data = generate_sample_data(999, size);
            assert_eq!(data.len(), size);
        }
    }

    #[test]
    fn test_distribution_is_skewed() {
        let data = generate_sample_data(3, 50_000);
        let frequencies = huffcode_core::FrequencyTable::from_symbols(&data);

        // Well below the 8 bits/symbol of uniform bytes
        assert!(frequencies.entropy() < 6.0);
        assert!(frequencies.get(b' ') > frequencies.get(b'k'));
    }
}
