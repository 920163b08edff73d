use rrr_bitmap::{BitVector, RrrBitmap};

fn bits_from_str(s: &str) -> Vec<bool> {
    s.chars().map(|c| c == '1').collect()
}

#[test]
fn test_short_string_with_padded_tail() {
    // 11010010 split into 3-bit blocks: 110 | 100 | 10- with the tail
    // zero-padded. Classes are 2,1,1; the pad bit never surfaces.
    let bits = bits_from_str("11010010");
    let input = BitVector::from_bits(bits.iter().copied());
    let rrr = RrrBitmap::new(&input, 3, 3);

    assert_eq!(rrr.len(), 8);
    assert_eq!(rrr.count_ones(), 4);

    let expected_rank1 = [0, 1, 2, 2, 3, 3, 3, 4, 4];
    for (i, &expected) in expected_rank1.iter().enumerate() {
        assert_eq!(rrr.rank1(i as u64), expected, "rank1({})", i);
        assert_eq!(rrr.rank0(i as u64), i as u64 - expected, "rank0({})", i);
    }

    let expected_select1 = [1, 2, 4, 7];
    for (j, &expected) in expected_select1.iter().enumerate() {
        assert_eq!(rrr.select1(j as u64 + 1), expected, "select1({})", j + 1);
    }

    for (i, &bit) in bits.iter().enumerate() {
        assert_eq!(rrr.access(i as u64), bit, "access({})", i);
    }
}

#[test]
fn test_dense_then_sparse_halves() {
    // 64 ones then 64 zeros: every block is a degenerate class, so the
    // offset stream compresses to nothing.
    let bits: Vec<bool> = (0..128).map(|i| i < 64).collect();
    let input = BitVector::from_bits(bits.iter().copied());
    let rrr = RrrBitmap::new(&input, 8, 32);

    assert_eq!(rrr.count_ones(), 64);
    assert_eq!(rrr.rank1(32), 32);
    assert_eq!(rrr.rank1(64), 64);
    assert_eq!(rrr.rank1(96), 64);
    assert_eq!(rrr.select1(32), 32);
    assert_eq!(rrr.select1(64), 64);

    for i in 0..128 {
        assert_eq!(rrr.access(i), i < 64, "access({})", i);
    }
}

#[test]
fn test_alternating_bits() {
    // 0101...01, 1000 bits. Ones sit at odd positions, so the j-th 1-bit is
    // at 1-indexed position 2j.
    let bits: Vec<bool> = (0..1000).map(|i| i % 2 == 1).collect();
    let input = BitVector::from_bits(bits.iter().copied());
    let rrr = RrrBitmap::new(&input, 5, 15);

    assert_eq!(rrr.count_ones(), 500);
    for i in 0..=1000u64 {
        assert_eq!(rrr.rank1(i), i / 2, "rank1({})", i);
    }
    for j in 1..=500u64 {
        assert_eq!(rrr.select1(j), 2 * j, "select1({})", j);
    }
}

#[test]
fn test_shuffled_bits_against_naive_counts() {
    // A fixed pseudo-random string of 10000 bits, exactly 2837 of them set.
    let bits = shuffled_bits(10000, 2837, 0x5eed);
    let input = BitVector::from_bits(bits.iter().copied());
    let rrr = RrrBitmap::new(&input, 15, 60);

    assert_eq!(rrr.count_ones(), 2837);

    let mut prefix = vec![0u64; bits.len() + 1];
    for (i, &bit) in bits.iter().enumerate() {
        prefix[i + 1] = prefix[i] + bit as u64;
    }

    let mut state = 0xdecafbad_u64;
    for _ in 0..1000 {
        let i = next_rand(&mut state) % (bits.len() as u64 + 1);
        assert_eq!(rrr.rank1(i), prefix[i as usize], "rank1({})", i);
        assert_eq!(rrr.rank0(i), i - prefix[i as usize], "rank0({})", i);
    }
    for _ in 0..1000 {
        let j = 1 + next_rand(&mut state) % 2837;
        let p = rrr.select1(j);
        assert!(p >= 1, "select1({}) found nothing", j);
        assert!(bits[p as usize - 1], "select1({}) = {} is not a 1-bit", j, p);
        assert_eq!(prefix[p as usize], j, "select1({}) = {}", j, p);
    }
}

#[test]
fn test_full_query_sequence_then_drop() {
    let bits = shuffled_bits(3000, 700, 42);
    let input = BitVector::from_bits(bits.iter().copied());
    let rrr = RrrBitmap::new(&input, 9, 36);

    let mut ones = 0;
    for (i, &bit) in bits.iter().enumerate() {
        assert_eq!(rrr.access(i as u64), bit);
        assert_eq!(rrr.rank1(i as u64), ones);
        if bit {
            ones += 1;
            assert_eq!(rrr.select1(ones), i as u64 + 1);
        }
    }

    drop(rrr);
    drop(input);
}

#[test]
fn test_select_out_of_range_returns_zero() {
    let input = BitVector::from_bits(bits_from_str("0110100"));
    let rrr = RrrBitmap::new(&input, 3, 6);

    assert_eq!(rrr.count_ones(), 3);
    assert_eq!(rrr.select1(0), 0);
    assert_eq!(rrr.select1(4), 0);
    assert_eq!(rrr.select1(u64::MAX), 0);
}

#[test]
fn test_debug_dump_mentions_every_vector() {
    let input = BitVector::from_bits(bits_from_str("11010010"));
    let rrr = RrrBitmap::new(&input, 3, 3);

    let dump = format!("{:?}", rrr);
    for field in ["size", "rank", "classes", "offsets", "marked_ranks", "marked_offsets"] {
        assert!(dump.contains(field), "debug dump missing {}: {}", field, dump);
    }
}

/* --------------------------------------
   Helpers: deterministic pseudo-randomness
   -------------------------------------- */

fn next_rand(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state >> 33
}

// `ones` set bits spread over `len` positions by a seeded Fisher-Yates pass.
fn shuffled_bits(len: usize, ones: usize, seed: u64) -> Vec<bool> {
    let mut bits = vec![false; len];
    for bit in bits.iter_mut().take(ones) {
        *bit = true;
    }
    let mut state = seed;
    for i in (1..len).rev() {
        let j = (next_rand(&mut state) % (i as u64 + 1)) as usize;
        bits.swap(i, j);
    }
    bits
}
