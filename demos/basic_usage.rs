use rrr_bitmap::{BitVector, RrrBitmap};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let nbits: u64 = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(512);
    let percent_ones: u64 = args.get(2).and_then(|a| a.parse().ok()).unwrap_or(10);

    // a fixed pseudo-random bit string at the requested density
    let mut state = 0x2545f4914f6cdd1d_u64;
    let bits: Vec<bool> = (0..nbits)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) % 100 < percent_ones
        })
        .collect();

    let input = BitVector::from_bits(bits.iter().copied());
    let rrr = RrrBitmap::new(&input, 15, 60);

    println!(
        "compressed {} bits holding {} ones",
        rrr.len(),
        rrr.count_ones()
    );

    println!("\nfirst 16 positions:");
    for i in 0..16.min(rrr.len()) {
        println!(
            "  access({:2}) = {}   rank1 so far = {}",
            i,
            rrr.access(i) as u8,
            rrr.rank1(i + 1)
        );
    }

    println!("\npositions of the first 5 ones:");
    for j in 1..=5.min(rrr.count_ones()) {
        println!("  select1({}) = {}", j, rrr.select1(j));
    }

    let i = rrr.len() / 2;
    println!(
        "\nat the midpoint: rank0({}) = {}, rank1({}) = {}",
        i,
        rrr.rank0(i),
        i,
        rrr.rank1(i)
    );

    if nbits <= 64 {
        println!("\ninternal dump:\n{:#?}", rrr);
    }
}
