/// A 16-bit lane mask, widened to `u32`. Bit *i* corresponds to lane *i*;
/// bits 16..32 are always zero.
pub type LaneMask = u32;

/// Sixteen 8-bit lanes, laid out the way a 128-bit vector register loads them.
///
/// Lane *i* is byte *i* of the array. Most packers expect every lane to be a
/// boolean encoded as `0x00` or `0xFF`; see [`LaneInput`](crate::LaneInput).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C, align(16))]
pub struct LaneVector([u8; 16]);

impl LaneVector {
    #[inline(always)]
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Every lane set to `byte`.
    #[inline(always)]
    pub const fn splat(byte: u8) -> Self {
        Self([byte; 16])
    }

    /// Expand a 16-bit mask into boolean lanes: lane *i* is `0xFF` when bit
    /// *i* of `mask` is set, `0x00` otherwise. Inverse of every packer.
    pub const fn from_mask(mask: u16) -> Self {
        let mut bytes = [0u8; 16];
        let mut i = 0;
        while i < 16 {
            // 0 - 1 wraps to 0xFF
            bytes[i] = 0u8.wrapping_sub(((mask >> i) & 1) as u8);
            i += 1;
        }
        Self(bytes)
    }

    pub fn from_lanes(lanes: [bool; 16]) -> Self {
        Self(lanes.map(|set| if set { 0xFF } else { 0x00 }))
    }

    #[inline(always)]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    #[inline(always)]
    pub const fn into_bytes(self) -> [u8; 16] {
        self.0
    }

    /// # Panics
    /// Panics if `index >= 16`.
    #[inline(always)]
    pub const fn lane(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// `true` when every lane is exactly `0x00` or `0xFF`.
    pub fn is_well_formed(&self) -> bool {
        self.0.iter().all(|&b| b == 0x00 || b == 0xFF)
    }
}

impl From<[u8; 16]> for LaneVector {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl From<LaneVector> for [u8; 16] {
    fn from(vector: LaneVector) -> Self {
        vector.0
    }
}
