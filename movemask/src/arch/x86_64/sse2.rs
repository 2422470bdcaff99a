use crate::{LaneMask, LaneVector};

#[inline(always)]
pub unsafe fn movemask(vector: LaneVector) -> LaneMask {
    use core::arch::x86_64::*;

    unsafe {
        let input = _mm_loadu_si128(vector.as_bytes().as_ptr() as *const __m128i);
        _mm_movemask_epi8(input) as u32
    }
}
