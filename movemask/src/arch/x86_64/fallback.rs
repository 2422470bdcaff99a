use crate::{LaneMask, LaneVector};

#[inline(always)]
pub unsafe fn movemask(vector: LaneVector) -> LaneMask {
    let mut mask = 0u32;
    for (i, &b) in vector.as_bytes().iter().enumerate() {
        mask |= ((b >> 7) as u32) << i;
    }
    mask
}
