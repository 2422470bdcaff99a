//! The NEON kernels, step for step, without NEON.
//!
//! A 128-bit register is modelled as a little-endian `u128`: a lane of
//! `bits` width at index *i* occupies bits `i * bits .. (i + 1) * bits`.
//! Half registers and per-lane shift tables use fixed arrays. Nothing here
//! branches on lane values.

use crate::{LaneMask, LaneVector};

#[inline(always)]
fn load(vector: LaneVector) -> u128 {
    u128::from_le_bytes(vector.into_bytes())
}

/// The low `width` bits of every `lane_bits`-wide lane.
#[inline(always)]
const fn lane_mask(lane_bits: u32, width: u32) -> u128 {
    let mut mask = 0u128;
    let mut offset = 0;
    while offset < 128 {
        mask |= ((1u128 << width) - 1) << offset;
        offset += lane_bits;
    }
    mask
}

/// `vpaddlq`: add adjacent `bits`-wide lanes into lanes twice as wide.
#[inline(always)]
fn paddl(v: u128, bits: u32) -> u128 {
    let even = lane_mask(2 * bits, bits);
    (v & even) + ((v >> bits) & even)
}

/// `vsraq_n`: `a + (a >> n)` inside every `bits`-wide lane. The callers
/// never carry out of a lane.
#[inline(always)]
fn sra(a: u128, bits: u32, n: u32) -> u128 {
    a.wrapping_add((a >> n) & lane_mask(bits, bits - n))
}

/// `vshl_u8`: per-lane shift, negative amounts shift right.
#[inline(always)]
fn shl_u8(lanes: [u8; 8], shifts: [i8; 8]) -> [u8; 8] {
    core::array::from_fn(|i| match shifts[i] {
        s if s < 0 => lanes[i] >> s.unsigned_abs(),
        s => lanes[i] << s as u32,
    })
}

/// `vpadd_u8`: sums of adjacent pairs, `a`'s in the low half, `b`'s in the high.
#[inline(always)]
fn padd_u8(a: [u8; 8], b: [u8; 8]) -> [u8; 8] {
    core::array::from_fn(|i| {
        let src = if i < 4 { &a } else { &b };
        let j = (i % 4) * 2;
        src[j].wrapping_add(src[j + 1])
    })
}

#[inline(always)]
pub unsafe fn weighted_sum_store(vector: LaneVector) -> LaneMask {
    const POWERS: [u8; 16] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];

    let weighted = load(vector) & u128::from_le_bytes(POWERS);
    let sums = paddl(paddl(paddl(weighted, 8), 16), 32);

    let bytes = sums.to_le_bytes();
    u32::from_le_bytes([bytes[0], bytes[8], 0, 0])
}

#[inline(always)]
pub unsafe fn weighted_sum_shift(vector: LaneVector) -> LaneMask {
    const POWERS: [u8; 16] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];

    let weighted = load(vector) & u128::from_le_bytes(POWERS);
    let sums = paddl(paddl(paddl(weighted, 8), 16), 32);

    let (low, high) = (sums as u64, (sums >> 64) as u64);
    (low + (high << 8)) as u32
}

#[inline(always)]
pub unsafe fn sign_bit_doubling(vector: LaneVector) -> LaneMask {
    let high_bits = (load(vector) >> 7) & lane_mask(8, 1);

    let paired16 = sra(high_bits, 16, 7);
    let paired32 = sra(paired16, 32, 14);
    let paired64 = sra(paired32, 64, 28);

    let bytes = paired64.to_le_bytes();
    bytes[0] as u32 | ((bytes[8] as u32) << 8)
}

#[inline(always)]
pub unsafe fn half_vector_shift(vector: LaneVector) -> LaneMask {
    const SHIFTS: [i8; 8] = [-7, -6, -5, -4, -3, -2, -1, 0];

    let bytes = vector.as_bytes();
    let half = |offset: usize| -> [u8; 8] {
        let sign: [u8; 8] = core::array::from_fn(|i| bytes[offset + i] & 0x80);
        shl_u8(sign, SHIFTS)
    };

    let mut lo = half(0);
    let mut hi = half(8);

    lo = padd_u8(lo, lo);
    lo = padd_u8(lo, lo);
    lo = padd_u8(lo, lo);

    hi = padd_u8(hi, hi);
    hi = padd_u8(hi, hi);
    hi = padd_u8(hi, hi);

    ((hi[0] as u32) << 8) | lo[0] as u32
}

#[inline(always)]
pub unsafe fn paired_bit_extract(vector: LaneVector) -> LaneMask {
    const SHIFTS: [i16; 8] = [-7, -5, -3, -1, 1, 3, 5, 7];

    vector
        .as_bytes()
        .chunks_exact(2)
        .zip(SHIFTS)
        .map(|(pair, shift)| {
            let word = u16::from_le_bytes([pair[0], pair[1]]) & 0x0180;
            if shift < 0 {
                word >> shift.unsigned_abs()
            } else {
                word << shift as u32
            }
        })
        .fold(0u16, u16::wrapping_add) as u32
}

#[inline(always)]
pub unsafe fn sign_bit_interleave(vector: LaneVector) -> LaneMask {
    const POWERS: [u8; 16] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];

    let bytes = vector.as_bytes();
    let weighted: [u8; 16] = core::array::from_fn(|i| ((bytes[i] as i8 >> 7) as u8) & POWERS[i]);
    // vextq_u8(weighted, weighted, 8)
    let rotated: [u8; 16] = core::array::from_fn(|i| weighted[(i + 8) % 16]);
    // vzip1q_u8(weighted, rotated)
    let zipped: [u8; 16] = core::array::from_fn(|i| {
        if i % 2 == 0 {
            weighted[i / 2]
        } else {
            rotated[i / 2]
        }
    });

    zipped
        .chunks_exact(2)
        .map(|word| u16::from_le_bytes([word[0], word[1]]))
        .fold(0u16, u16::wrapping_add) as u32
}
