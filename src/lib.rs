pub mod binomial;
pub mod bitvec;
pub mod block;
pub mod rrr;

pub use bitvec::BitVector;
pub use rrr::RrrBitmap;
