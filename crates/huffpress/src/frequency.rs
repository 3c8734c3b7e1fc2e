//! Symbol frequency counting.
//!
//! The table is a dense 256-entry histogram. Iteration always visits present
//! symbols in ascending byte order, so nothing downstream depends on hash
//! ordering.

/// Number of distinct byte symbols.
pub const MAX_SYMBOLS: usize = 256;

/// Occurrence counts for every byte value observed in an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: Box<[u64; MAX_SYMBOLS]>,
    /// Number of symbols with a non-zero count.
    distinct: usize,
}

impl FrequencyTable {
    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_histogram(count_histogram(data))
    }

    /// Count `data` in parallel shards and merge the partial histograms.
    ///
    /// Produces exactly the same table as [`FrequencyTable::from_bytes`].
    #[cfg(feature = "parallel")]
    pub fn from_bytes_parallel(data: &[u8], shard_size: usize) -> Self {
        use rayon::prelude::*;

        let shard_size = shard_size.max(1);
        let histogram = data
            .par_chunks(shard_size)
            .map(count_histogram)
            .reduce(
                || [0u64; MAX_SYMBOLS],
                |mut acc, part| {
                    for (a, p) in acc.iter_mut().zip(part.iter()) {
                        *a += p;
                    }
                    acc
                },
            );
        Self::from_histogram(histogram)
    }

    /// Build a table from explicit `(symbol, count)` pairs.
    ///
    /// Zero counts are ignored; repeated symbols accumulate, saturating at
    /// `u64::MAX`. Tables whose counts sum past `u64::MAX` are rejected by
    /// [`HuffmanTree::build`](crate::HuffmanTree::build).
    pub fn from_counts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut histogram = [0u64; MAX_SYMBOLS];
        for (symbol, count) in pairs {
            let slot = &mut histogram[symbol as usize];
            *slot = slot.saturating_add(count);
        }
        Self::from_histogram(histogram)
    }

    fn from_histogram(histogram: [u64; MAX_SYMBOLS]) -> Self {
        let distinct = histogram.iter().filter(|&&c| c > 0).count();
        Self {
            counts: Box::new(histogram),
            distinct,
        }
    }

    /// Count for `symbol`, or `None` if it never occurred.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<u64> {
        match self.counts[symbol as usize] {
            0 => None,
            count => Some(count),
        }
    }

    /// Present symbols and their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.distinct
    }

    /// True if no symbol has been counted.
    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Total number of symbols counted, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Total number of symbols counted, or `None` if it overflows `u64`.
    pub fn checked_total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0u64, |acc, &c| acc.checked_add(c))
    }
}

/// Byte histogram with four interleaved counters to avoid store-forwarding
/// stalls on runs of the same byte.
fn count_histogram(data: &[u8]) -> [u64; MAX_SYMBOLS] {
    let mut freq0 = [0u64; MAX_SYMBOLS];
    let mut freq1 = [0u64; MAX_SYMBOLS];
    let mut freq2 = [0u64; MAX_SYMBOLS];
    let mut freq3 = [0u64; MAX_SYMBOLS];

    let chunks = data.chunks_exact(4);
    let remainder = chunks.remainder();

    for chunk in chunks {
        freq0[chunk[0] as usize] += 1;
        freq1[chunk[1] as usize] += 1;
        freq2[chunk[2] as usize] += 1;
        freq3[chunk[3] as usize] += 1;
    }

    for &byte in remainder {
        freq0[byte as usize] += 1;
    }

    for i in 0..MAX_SYMBOLS {
        freq0[i] += freq1[i] + freq2[i] + freq3[i];
    }

    freq0
}
