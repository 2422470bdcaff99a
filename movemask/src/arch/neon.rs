use core::arch::aarch64::*;

use crate::{LaneMask, LaneVector};

#[inline(always)]
pub unsafe fn weighted_sum_store(vector: LaneVector) -> LaneMask {
    const POWERS: [u8; 16] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];

    unsafe {
        let input = vld1q_u8(vector.as_bytes().as_ptr());
        let weighted = vandq_u8(input, vld1q_u8(POWERS.as_ptr()));
        let sums = vpaddlq_u32(vpaddlq_u16(vpaddlq_u8(weighted)));

        // byte 0 of each 64-bit half holds that half's 8 mask bits
        let bytes = vreinterpretq_u8_u64(sums);
        let mut out = [0u8; 4];
        vst1q_lane_u8::<0>(out.as_mut_ptr(), bytes);
        vst1q_lane_u8::<8>(out.as_mut_ptr().add(1), bytes);
        u32::from_le_bytes(out)
    }
}

#[inline(always)]
pub unsafe fn weighted_sum_shift(vector: LaneVector) -> LaneMask {
    const POWERS: [u8; 16] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];

    unsafe {
        let input = vld1q_u8(vector.as_bytes().as_ptr());
        let weighted = vandq_u8(input, vld1q_u8(POWERS.as_ptr()));
        let sums = vpaddlq_u32(vpaddlq_u16(vpaddlq_u8(weighted)));

        (vgetq_lane_u64::<0>(sums) + (vgetq_lane_u64::<1>(sums) << 8)) as u32
    }
}

#[inline(always)]
pub unsafe fn sign_bit_doubling(vector: LaneVector) -> LaneMask {
    unsafe {
        let input = vld1q_u8(vector.as_bytes().as_ptr());

        // 0x89 FF 1D C0 -> 0x01 01 00 01
        let high_bits = vreinterpretq_u16_u8(vshrq_n_u8::<7>(input));
        // Each step folds a lane's bits next to its neighbour's; the upper
        // bytes of every widened lane are garbage and never read.
        let paired16 = vreinterpretq_u32_u16(vsraq_n_u16::<7>(high_bits, high_bits));
        let paired32 = vreinterpretq_u64_u32(vsraq_n_u32::<14>(paired16, paired16));
        let paired64 = vreinterpretq_u8_u64(vsraq_n_u64::<28>(paired32, paired32));

        vgetq_lane_u8::<0>(paired64) as u32 | ((vgetq_lane_u8::<8>(paired64) as u32) << 8)
    }
}

#[inline(always)]
pub unsafe fn half_vector_shift(vector: LaneVector) -> LaneMask {
    const SHIFTS: [i8; 8] = [-7, -6, -5, -4, -3, -2, -1, 0];

    unsafe {
        let input = vld1q_u8(vector.as_bytes().as_ptr());
        let sign = vdup_n_u8(0x80);
        let shift = vld1_s8(SHIFTS.as_ptr());

        let mut lo = vshl_u8(vand_u8(vget_low_u8(input), sign), shift);
        let mut hi = vshl_u8(vand_u8(vget_high_u8(input), sign), shift);

        lo = vpadd_u8(lo, lo);
        lo = vpadd_u8(lo, lo);
        lo = vpadd_u8(lo, lo);

        hi = vpadd_u8(hi, hi);
        hi = vpadd_u8(hi, hi);
        hi = vpadd_u8(hi, hi);

        ((vget_lane_u8::<0>(hi) as u32) << 8) | vget_lane_u8::<0>(lo) as u32
    }
}

#[inline(always)]
pub unsafe fn paired_bit_extract(vector: LaneVector) -> LaneMask {
    const SHIFTS: [i16; 8] = [-7, -5, -3, -1, 1, 3, 5, 7];

    unsafe {
        // bit 7 comes from the low byte of each word, bit 8 from the high byte
        let words = vreinterpretq_u16_u8(vld1q_u8(vector.as_bytes().as_ptr()));
        let pairs = vandq_u16(words, vdupq_n_u16(0x0180));
        let spread = vshlq_u16(pairs, vld1q_s16(SHIFTS.as_ptr()));

        vaddvq_u16(spread) as u32
    }
}

#[inline(always)]
pub unsafe fn sign_bit_interleave(vector: LaneVector) -> LaneMask {
    const POWERS: [u8; 16] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];

    unsafe {
        let input = vld1q_u8(vector.as_bytes().as_ptr());
        let lanes = vreinterpretq_u8_s8(vshrq_n_s8::<7>(vreinterpretq_s8_u8(input)));
        let weighted = vandq_u8(vld1q_u8(POWERS.as_ptr()), lanes);
        let rotated = vextq_u8::<8>(weighted, weighted);

        vaddvq_u16(vreinterpretq_u16_u8(vzip1q_u8(weighted, rotated))) as u32
    }
}
