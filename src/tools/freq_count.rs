use log::debug;
use rayon::prelude::*;

/// Inputs larger than this are counted in parallel chunks.
const PAR_THRESHOLD: usize = 64_000;
/// 16k is pretty much the sweet spot for chunk size.
const CHUNK_SIZE: usize = 16_000;

/// Occurrence count of every byte value in an input. Only symbols with a
/// non-zero count are considered present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Returns a frequency count of the input data. Uses parallelism when data set is over 64k.
    pub fn from_bytes(data: &[u8]) -> Self {
        let counts = if data.len() > PAR_THRESHOLD {
            data.par_chunks(CHUNK_SIZE)
                .fold(
                    || [0_u64; 256],
                    |mut freqs, chunk| {
                        chunk.iter().for_each(|&el| freqs[el as usize] += 1);
                        freqs
                    },
                )
                .reduce(
                    || [0_u64; 256],
                    |mut s, f| {
                        s.iter_mut().zip(f.iter()).for_each(|(a, b)| *a += b);
                        s
                    },
                )
        } else {
            let mut freqs = [0_u64; 256];
            data.iter().for_each(|&el| freqs[el as usize] += 1);
            freqs
        };
        let table = Self { counts };
        debug!(
            "Counted {} bytes, {} distinct symbols.",
            table.total(),
            table.len()
        );
        table
    }

    /// Count for one symbol (0 when absent).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols present.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Present symbols and their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(sym, &c)| (sym as u8, c))
    }
}

#[cfg(test)]
mod test {
    use super::FrequencyTable;

    #[test]
    fn abracadabra_test() {
        let freqs = FrequencyTable::from_bytes(b"abracadabra");
        assert_eq!(freqs.get(b'a'), 5);
        assert_eq!(freqs.get(b'b'), 2);
        assert_eq!(freqs.get(b'r'), 2);
        assert_eq!(freqs.get(b'c'), 1);
        assert_eq!(freqs.get(b'd'), 1);
        assert_eq!(freqs.get(b'z'), 0);
        assert_eq!(freqs.len(), 5);
        assert_eq!(freqs.total(), 11);
    }

    #[test]
    fn empty_test() {
        let freqs = FrequencyTable::from_bytes(&[]);
        assert!(freqs.is_empty());
        assert_eq!(freqs.len(), 0);
        assert_eq!(freqs.iter().count(), 0);
    }

    #[test]
    fn iter_is_ascending_test() {
        let freqs = FrequencyTable::from_bytes(&[9, 3, 255, 0, 3]);
        let syms: Vec<u8> = freqs.iter().map(|(s, _)| s).collect();
        assert_eq!(syms, vec![0, 3, 9, 255]);
    }

    #[test]
    fn parallel_matches_sequential_test() {
        let data: Vec<u8> = (0..200_000_u32).map(|i| (i * 7 % 251) as u8).collect();
        let par = FrequencyTable::from_bytes(&data);
        let mut seq = [0_u64; 256];
        data.iter().for_each(|&b| seq[b as usize] += 1);
        for (sym, count) in seq.iter().enumerate() {
            assert_eq!(par.get(sym as u8), *count);
        }
        assert_eq!(par.total(), 200_000);
    }
}
