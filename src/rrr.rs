use std::fmt;

use crate::binomial::{binomial, MAX_BLOCK_NBITS};
use crate::bitvec::{bits_for, low_mask, BitVector};
use crate::block;

// Compressed bitmap after Raman, Raman and Rao. The input is split into
// blocks of block_nbits bits; each block is stored as its class (popcount)
// in `classes` plus an offset identifying it within the class, packed
// back-to-back in `offsets` at a width that depends on the class. Because
// offset widths vary, reaching block k means summing the widths of all
// classes before it; every marker_nbits input bits a (rank, offset position)
// sample is recorded so queries can jump instead of walking from the start.
pub struct RrrBitmap {
    size: u64,
    rank: u64,
    block_nbits: u64,
    marker_nbits: u64,
    nblocks: u64,
    nmarkers: u64,
    classes: BitVector,
    offsets: BitVector,
    marked_ranks: BitVector,
    marked_offsets: BitVector,
}

impl RrrBitmap {
    pub fn new(bits: &BitVector, block_nbits: u64, marker_nbits: u64) -> Self {
        assert!(!bits.is_empty(), "cannot compress an empty bit vector");
        assert!(
            block_nbits >= 1 && block_nbits <= MAX_BLOCK_NBITS,
            "block width {} out of range",
            block_nbits
        );
        assert!(
            marker_nbits >= block_nbits,
            "marker period {} shorter than block width {}",
            marker_nbits,
            block_nbits
        );

        let table = binomial();
        let size = bits.len();
        let nblocks = (size + block_nbits - 1) / block_nbits;
        let nmarkers = (size + marker_nbits - 1) / marker_nbits;

        // classes and offsets alone reproduce the input; the marker vectors
        // are the o(n) index on top that makes rank and select fast.
        let mut classes = BitVector::with_records(bits_for(block_nbits + 1), nblocks);

        // Offsets are written at varying widths, so the exact total is not
        // known until the end. Provision for the widest class and give back
        // the unused tail once built.
        let offset_nbits_max = table.offset_nbits(block_nbits, block_nbits / 2);
        let mut offsets = BitVector::new(nblocks * offset_nbits_max);

        let mut marked_ranks = BitVector::with_records(bits_for(size + 1), nmarkers);
        let mut marked_offsets = BitVector::with_records(bits_for(offsets.len()), nmarkers);

        let mut rank = 0;
        let mut class_at = 0;
        let mut offset_at = 0;
        let mut marker_at = 0;
        let mut marker_need = marker_nbits;

        for k in 0..nblocks {
            let start = k * block_nbits;
            // the tail block reads short; its missing bits stay zero
            let take = block_nbits.min(size - start);
            let value = bits.read(start, take);
            let class = u64::from(value.count_ones());
            let offset = block::encode(table, block_nbits, class, value);

            class_at = classes.write_record(class_at, class);
            offset_at = offsets.write(offset_at, table.offset_nbits(block_nbits, class), offset);

            // At most one marker boundary can fall within this block since
            // marker_nbits >= block_nbits. The recorded rank counts only the
            // bits of this block inside the closing window; the recorded
            // offset position points just past this block.
            if marker_need <= block_nbits {
                let prefix = value & low_mask(marker_need);
                marked_offsets.write_record(marker_at, offset_at);
                marked_ranks.write_record(marker_at, rank + u64::from(prefix.count_ones()));
                marker_at += 1;
                marker_need = marker_nbits - (block_nbits - marker_need);
            } else {
                marker_need -= block_nbits;
            }

            rank += class;
        }

        // Boundaries at or past the end of input record the end state, which
        // keeps marked_ranks monotone for find_marker's binary search.
        while marker_at < nmarkers {
            marked_offsets.write_record(marker_at, offset_at);
            marked_ranks.write_record(marker_at, rank);
            marker_at += 1;
        }

        offsets.truncate(offset_at);

        Self {
            size,
            rank,
            block_nbits,
            marker_nbits,
            nblocks,
            nmarkers,
            classes,
            offsets,
            marked_ranks,
            marked_offsets,
        }
    }

    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn count_ones(&self) -> u64 {
        self.rank
    }

    pub fn access(&self, i: u64) -> bool {
        assert!(i < self.size, "position {} out of bounds ({})", i, self.size);

        let table = binomial();
        let marker = i / self.marker_nbits;
        let (mut block_at, mut offset_at, _) = if marker == 0 {
            (0, 0, 0)
        } else {
            self.seed_after_marker(marker - 1)
        };

        let mut rest = i - block_at * self.block_nbits;
        while rest >= self.block_nbits {
            let class = self.classes.read_record(block_at);
            offset_at += table.offset_nbits(self.block_nbits, class);
            block_at += 1;
            rest -= self.block_nbits;
        }

        let class = self.classes.read_record(block_at);
        let width = table.offset_nbits(self.block_nbits, class);
        let offset = self.offsets.read(offset_at, width);
        let value = block::decode(table, self.block_nbits, class, offset);

        value >> rest & 1 == 1
    }

    // Number of 1-bits in positions [0, i). Saturates at the total for
    // i past the end.
    pub fn rank1(&self, i: u64) -> u64 {
        if i >= self.size {
            return self.rank;
        }

        let table = binomial();
        let marker = i / self.marker_nbits;
        let (mut block_at, mut offset_at, mut rank) = if marker == 0 {
            (0, 0, 0)
        } else {
            self.seed_after_marker(marker - 1)
        };

        let mut rest = i - block_at * self.block_nbits;
        while rest >= self.block_nbits {
            let class = self.classes.read_record(block_at);
            rank += class;
            offset_at += table.offset_nbits(self.block_nbits, class);
            block_at += 1;
            rest -= self.block_nbits;
        }

        let class = self.classes.read_record(block_at);
        let width = table.offset_nbits(self.block_nbits, class);
        let offset = self.offsets.read(offset_at, width);
        let value = block::decode(table, self.block_nbits, class, offset);

        rank + u64::from((value & low_mask(rest)).count_ones())
    }

    pub fn rank0(&self, i: u64) -> u64 {
        i - self.rank1(i)
    }

    // 1-indexed position of the j-th 1-bit, or 0 when there is no such bit
    // (j = 0 or j > count_ones()).
    pub fn select1(&self, j: u64) -> u64 {
        if j == 0 || j > self.rank {
            return 0;
        }

        let table = binomial();
        let (mut block_at, mut offset_at, mut rank) = match self.find_marker(j) {
            None => (0, 0, 0),
            Some(marker) => self.seed_after_marker(marker),
        };

        // Skip whole blocks until the j-th 1-bit falls inside the next one.
        // Guaranteed to stop there since rank at the seed is below j and the
        // classes ahead sum to at least j.
        let mut class = 0;
        let mut width = 0;
        while block_at < self.nblocks {
            class = self.classes.read_record(block_at);
            width = table.offset_nbits(self.block_nbits, class);
            if rank + class >= j {
                break;
            }
            rank += class;
            offset_at += width;
            block_at += 1;
        }

        let offset = self.offsets.read(offset_at, width);
        let mut value = block::decode(table, self.block_nbits, class, offset);

        let mut low = 0;
        while rank < j {
            low = u64::from(value.trailing_zeros());
            value &= value - 1;
            rank += 1;
        }

        block_at * self.block_nbits + low + 1
    }

    // Largest marker whose recorded rank is still below j, i.e. the latest
    // sample select1 may seed from, or None when the j-th 1-bit precedes the
    // first marker boundary and the scan must start at block 0.
    fn find_marker(&self, j: u64) -> Option<u64> {
        let mut lo = 0;
        let mut hi = self.nmarkers;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.marked_ranks.read_record(mid) < j {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        if lo == 0 {
            None
        } else {
            Some(lo - 1)
        }
    }

    // Scan state derived from a marker sample: the first block to examine,
    // the position of its offset field, and rank1 at its starting bit. The
    // sample's offset position points just past the block containing the
    // boundary, and its rank is taken exactly at the boundary; when the
    // boundary is not block-aligned the two describe different points, so
    // re-anchor both to the start of the straddled block. With the common
    // block-aligned marker period this branch never runs.
    fn seed_after_marker(&self, marker: u64) -> (u64, u64, u64) {
        let table = binomial();
        let boundary = (marker + 1) * self.marker_nbits;
        let offset_at = self.marked_offsets.read_record(marker);
        let rank = self.marked_ranks.read_record(marker);

        let block_at = (boundary + self.block_nbits - 1) / self.block_nbits;
        if block_at * self.block_nbits == boundary {
            return (block_at, offset_at, rank);
        }

        let block_at = block_at - 1;
        let class = self.classes.read_record(block_at);
        let width = table.offset_nbits(self.block_nbits, class);
        let offset_at = offset_at - width;
        let offset = self.offsets.read(offset_at, width);
        let value = block::decode(table, self.block_nbits, class, offset);
        let inside = boundary - block_at * self.block_nbits;
        let rank = rank - u64::from((value & low_mask(inside)).count_ones());

        (block_at, offset_at, rank)
    }
}

impl fmt::Debug for RrrBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RrrBitmap")
            .field("size", &self.size)
            .field("rank", &self.rank)
            .field("block_nbits", &self.block_nbits)
            .field("marker_nbits", &self.marker_nbits)
            .field("classes", &self.classes)
            .field("offsets", &self.offsets)
            .field("marked_ranks", &self.marked_ranks)
            .field("marked_offsets", &self.marked_offsets)
            .finish()
    }
}
