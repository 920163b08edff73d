use std::sync::OnceLock;

use crate::bitvec::bits_for;

pub const MAX_BLOCK_NBITS: u64 = 64;

// (n choose k) for 0 <= k <= n <= MAX_BLOCK_NBITS, stored as a flat
// triangle with row n starting at n*(n+1)/2. Every entry fits in a u64:
// the largest is (64 choose 32) = 1832624140942590534.
pub struct BinomialTable {
    coeffs: Vec<u64>,
}

impl BinomialTable {
    fn build() -> Self {
        let rows = (MAX_BLOCK_NBITS + 1) as usize;
        let mut coeffs = vec![0u64; rows * (rows + 1) / 2];

        coeffs[0] = 1;
        for n in 1..rows {
            let row = n * (n + 1) / 2;
            let prev = row - n;
            coeffs[row] = 1;
            coeffs[row + n] = 1;
            for k in 1..n {
                coeffs[row + k] = coeffs[prev + k - 1] + coeffs[prev + k];
            }
        }

        Self { coeffs }
    }

    pub fn choose(&self, n: u64, k: u64) -> u64 {
        assert!(n <= MAX_BLOCK_NBITS, "binomial row {} out of range", n);
        assert!(k <= n, "binomial ({} choose {}) out of range", n, k);
        self.coeffs[(n * (n + 1) / 2 + k) as usize]
    }

    // Width of the offset field for a block of the given class. Classes 0
    // and block_nbits have a single element, so their offsets take no bits.
    pub fn offset_nbits(&self, block_nbits: u64, class: u64) -> u64 {
        bits_for(self.choose(block_nbits, class))
    }
}

pub fn binomial() -> &'static BinomialTable {
    static TABLE: OnceLock<BinomialTable> = OnceLock::new();
    TABLE.get_or_init(BinomialTable::build)
}
