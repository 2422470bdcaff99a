cfg_if::cfg_if! {
    if #[cfg(all(target_feature="neon", target_arch="aarch64"))] {
        mod neon;
        pub use neon::*;
        pub const BACKEND: &str = "neon";
    } else {
        mod portable;
        pub use portable::*;
        pub const BACKEND: &str = "portable";
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_arch = "x86_64")] {
        mod x86_64;
        pub use x86_64::movemask;
    } else {
        /// Bit *i* of the result is the sign bit of lane *i*.
        #[inline(always)]
        pub unsafe fn movemask(vector: crate::LaneVector) -> crate::LaneMask {
            let mut mask = 0u32;
            for (i, &b) in vector.as_bytes().iter().enumerate() {
                mask |= ((b >> 7) as u32) << i;
            }
            mask
        }
    }
}
