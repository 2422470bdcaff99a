//! # movemask
//!
//! Six ways to pack sixteen 8-bit boolean lanes into a 16-bit mask on
//! AArch64 NEON, which has no equivalent of SSE2's `_mm_movemask_epi8`.
//!
//! Provides:
//! - [`LaneVector`] / [`LaneMask`] – the input register and the packed result.
//! - `pack_*` – one free function per algorithm.
//! - [`MaskPacker`] – trait implemented by `#[derive(MaskPacker)]`, with the
//!   capability markers [`StrictBooleanLanePacker`] and [`SignBitPacker`].
//! - [`Strategy`] – the closed set of algorithms, selectable at run time.
//! - [`reference`] – the native byte-mask primitive, used as the oracle.
//!
//! On AArch64 with NEON the kernels use `core::arch::aarch64`; every other
//! target gets the same algorithms expressed in portable integer arithmetic.
//!
//! ## Usage
//!
//! ```rust
//! use movemask::{LaneVector, MaskPacker, SignBitInterleave, Strategy};
//!
//! let lanes = LaneVector::from_mask(0b1010_0000_0000_0011);
//! assert_eq!(SignBitInterleave::pack(lanes), 0b1010_0000_0000_0011);
//!
//! let strategy: Strategy = "paired-bit-extract".parse().unwrap();
//! assert_eq!(strategy.pack(lanes), 0b1010_0000_0000_0011);
//! ```
//!
//! ## Preconditions
//!
//! Packers tagged [`StrictBooleanLanePacker`] are only defined when every
//! lane is `0x00` or `0xFF`. Packers tagged [`SignBitPacker`] read bit 7 of
//! each lane and accept any bytes. Neither checks its input.

// Lets the derive's `::movemask::` paths resolve inside this crate.
extern crate self as movemask;

// Re-export the derive macro for convenience (one `use` covers both).
pub use movemask_macro::MaskPacker;

mod arch;
mod lane;
mod packer;
mod strategy;

pub use lane::{LaneMask, LaneVector};
pub use packer::{
    HalfVectorShift, LaneInput, MaskPacker, PairedBitExtract, SignBitDoubling, SignBitInterleave,
    SignBitPacker, StrictBooleanLanePacker, WeightedSumShift, WeightedSumStore,
};
pub use strategy::{ParseStrategyError, Strategy};

/// Which kernel implementation this build uses: `"neon"` or `"portable"`.
pub const BACKEND: &str = arch::BACKEND;

// SAFETY (all wrappers below): the NEON kernels are compiled only when the
// `neon` target feature is statically enabled, and only read the 16 bytes
// of the vector they are given. The portable kernels contain no unsafe code.

/// AND with per-lane weights, widen-add 8→16→32→64 bits, then store the
/// low byte of each 64-bit half. Requires `0x00`/`0xFF` lanes.
#[inline(always)]
pub fn pack_weighted_sum_store(vector: LaneVector) -> LaneMask {
    unsafe { arch::weighted_sum_store(vector) }
}

/// Same reduction as [`pack_weighted_sum_store`], combining the two halves
/// as `low + (high << 8)`. Requires `0x00`/`0xFF` lanes.
#[inline(always)]
pub fn pack_weighted_sum_shift(vector: LaneVector) -> LaneMask {
    unsafe { arch::weighted_sum_shift(vector) }
}

/// Shift each sign bit down to bit 0, then fold neighbours together with
/// shift-right-accumulate at 16, 32 and 64-bit lane widths. Any bytes.
#[inline(always)]
pub fn pack_sign_bit_doubling(vector: LaneVector) -> LaneMask {
    unsafe { arch::sign_bit_doubling(vector) }
}

/// Per-half sign isolation and per-lane shift, three pairwise adds per
/// half. Any bytes.
#[inline(always)]
pub fn pack_half_vector_shift(vector: LaneVector) -> LaneMask {
    unsafe { arch::half_vector_shift(vector) }
}

/// Two bits per 16-bit word, spread by a fixed shift table and summed
/// across the vector. Fewest instructions. Requires `0x00`/`0xFF` lanes.
#[inline(always)]
pub fn pack_paired_bit_extract(vector: LaneVector) -> LaneMask {
    unsafe { arch::paired_bit_extract(vector) }
}

/// Sign-extend each lane, weight it, zip the low and high halves into
/// 16-bit words and sum across. Any bytes.
#[inline(always)]
pub fn pack_sign_bit_interleave(vector: LaneVector) -> LaneMask {
    unsafe { arch::sign_bit_interleave(vector) }
}

/// The native byte-mask extraction: `_mm_movemask_epi8` on x86_64, a scalar
/// sign-bit loop elsewhere. Bit *i* is the sign bit of lane *i*.
#[inline(always)]
pub fn reference(vector: LaneVector) -> LaneMask {
    // SAFETY: SSE2 is part of the x86_64 baseline; the fallback is scalar.
    unsafe { arch::movemask(vector) }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn xorshift_vectors(count: usize) -> Vec<LaneVector> {
        let mut state: u64 = 0xdeadbeef_cafebabe;
        (0..count)
            .map(|_| {
                let mut bytes = [0u8; 16];
                for b in bytes.iter_mut() {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    *b = state as u8;
                }
                LaneVector::new(bytes)
            })
            .collect()
    }

    fn scalar_sign_mask(vector: LaneVector) -> LaneMask {
        vector
            .as_bytes()
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b & 0x80 != 0)
            .fold(0, |mask, (i, _)| mask | (1 << i))
    }

    /// Properties every packer has on `0x00`/`0xFF` lanes.
    fn check_well_formed<P: MaskPacker>() {
        assert_eq!(P::pack(LaneVector::splat(0x00)), 0x0000, "{}", P::NAME);
        assert_eq!(P::pack(LaneVector::splat(0xFF)), 0xFFFF, "{}", P::NAME);

        for k in 0..16 {
            let v = LaneVector::from_mask(1 << k);
            assert_eq!(P::pack(v), 1 << k, "{} lane {}", P::NAME, k);
        }

        // every 16-bit mask round-trips
        for m in 0..=u16::MAX {
            let v = LaneVector::from_mask(m);
            let mask = P::pack(v);
            assert_eq!(mask, m as u32, "{} mask {:#06x}", P::NAME, m);
            assert_eq!(mask, reference(v), "{} mask {:#06x}", P::NAME, m);
        }
    }

    /// Sign-bit packers agree with the native primitive on arbitrary bytes.
    fn check_sign_bits<P: SignBitPacker>() {
        assert_eq!(P::INPUT, LaneInput::SignBit);
        for v in xorshift_vectors(4096) {
            assert_eq!(P::pack(v), reference(v), "{} on {:02x?}", P::NAME, v.as_bytes());
        }
        assert_eq!(P::pack(LaneVector::splat(0x80)), 0xFFFF, "{}", P::NAME);
        assert_eq!(P::pack(LaneVector::splat(0x7F)), 0x0000, "{}", P::NAME);
    }

    fn check_strict<P: StrictBooleanLanePacker>() {
        assert_eq!(P::INPUT, LaneInput::StrictBoolean);
    }

    #[test]
    fn test_reference_matches_scalar() {
        for v in xorshift_vectors(4096) {
            assert_eq!(reference(v), scalar_sign_mask(v));
        }
    }

    #[test]
    fn test_weighted_sum_store() {
        check_strict::<WeightedSumStore>();
        check_well_formed::<WeightedSumStore>();
    }

    #[test]
    fn test_weighted_sum_shift() {
        check_strict::<WeightedSumShift>();
        check_well_formed::<WeightedSumShift>();
    }

    #[test]
    fn test_sign_bit_doubling() {
        check_well_formed::<SignBitDoubling>();
        check_sign_bits::<SignBitDoubling>();
    }

    #[test]
    fn test_half_vector_shift() {
        check_well_formed::<HalfVectorShift>();
        check_sign_bits::<HalfVectorShift>();
    }

    #[test]
    fn test_paired_bit_extract() {
        check_strict::<PairedBitExtract>();
        check_well_formed::<PairedBitExtract>();
    }

    #[test]
    fn test_sign_bit_interleave() {
        check_well_formed::<SignBitInterleave>();
        check_sign_bits::<SignBitInterleave>();
    }

    #[test]
    fn test_strict_packers_diverge_on_sign_only_lanes() {
        // 0x80 lanes: the weight table keeps only lanes 7 and 15, and the
        // paired extraction only sees the even lanes' bit 7.
        let v = LaneVector::splat(0x80);
        assert_eq!(reference(v), 0xFFFF);
        assert_eq!(pack_weighted_sum_store(v), 0x8080);
        assert_eq!(pack_weighted_sum_shift(v), 0x8080);
        assert_eq!(pack_paired_bit_extract(v), 0x5555);
    }

    #[test]
    fn test_strategies_agree() {
        for m in (0..=u16::MAX).step_by(7) {
            let v = LaneVector::from_mask(m);
            let masks: Vec<_> = Strategy::ALL.iter().map(|s| s.pack(v)).collect();
            assert!(masks.iter().all(|&mask| mask == m as u32), "{:#06x}: {:?}", m, masks);
        }
    }

    #[test]
    fn test_deterministic() {
        for v in xorshift_vectors(64) {
            for s in Strategy::ALL {
                assert_eq!(s.pack(v), s.pack(v), "{}", s);
            }
        }
    }

    #[test]
    fn test_no_bits_above_15() {
        for v in xorshift_vectors(1024) {
            for s in Strategy::ALL {
                assert_eq!(s.pack(v) >> 16, 0, "{} on {:02x?}", s, v.as_bytes());
            }
        }
    }

    #[test]
    fn test_concurrent_calls() {
        let vectors = xorshift_vectors(256);
        std::thread::scope(|scope| {
            for s in Strategy::ALL {
                let vectors = &vectors;
                scope.spawn(move || {
                    for v in vectors {
                        let m = reference(*v) as u16;
                        assert_eq!(s.pack(LaneVector::from_mask(m)), m as u32);
                    }
                });
            }
        });
    }

    #[test]
    fn test_backend_name() {
        assert!(BACKEND == "neon" || BACKEND == "portable");
    }
}
