use afl::*;

use rrr_bitmap::{BitVector, RrrBitmap};

fn main() {
    fuzz!(|data: &[u8]| {
        if data.len() < 3 {
            return;
        }

        // first two bytes pick the geometry, the rest is the bit string
        let block_nbits = u64::from(data[0] % 64) + 1;
        let marker_nbits = block_nbits + u64::from(data[1]);
        let bits: Vec<bool> = data[2..]
            .iter()
            .flat_map(|byte| (0..8).map(move |i| byte >> i & 1 == 1))
            .collect();

        let input = BitVector::from_bits(bits.iter().copied());
        let rrr = RrrBitmap::new(&input, block_nbits, marker_nbits);

        let mut ones = 0u64;
        for (i, &bit) in bits.iter().enumerate() {
            assert_eq!(rrr.access(i as u64), bit);
            assert_eq!(rrr.rank1(i as u64), ones);
            if bit {
                ones += 1;
                assert_eq!(rrr.select1(ones), i as u64 + 1);
            }
        }
        assert_eq!(rrr.count_ones(), ones);
        assert_eq!(rrr.rank1(bits.len() as u64 + 1), ones);
        assert_eq!(rrr.select1(0), 0);
        assert_eq!(rrr.select1(ones + 1), 0);
    })
}
