use crate::{LaneMask, LaneVector};

// ---------------------------------------------------------------------------
// LaneInput
// ---------------------------------------------------------------------------

/// What a packer requires of its input lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneInput {
    /// Every lane is `0x00` or `0xFF`. Other bytes give an unspecified mask.
    StrictBoolean,
    /// Only bit 7 of each lane is read; any bytes are accepted.
    SignBit,
}

impl LaneInput {
    /// `true` when `vector` satisfies this precondition.
    pub fn accepts(self, vector: &LaneVector) -> bool {
        match self {
            LaneInput::StrictBoolean => vector.is_well_formed(),
            LaneInput::SignBit => true,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LaneInput::StrictBoolean => "strict_boolean",
            LaneInput::SignBit => "sign_bit",
        }
    }
}

// ---------------------------------------------------------------------------
// MaskPacker traits
// ---------------------------------------------------------------------------

/// Trait implemented automatically by `#[derive(MaskPacker)]`.
///
/// A packer turns a [`LaneVector`] into a [`LaneMask`] where bit *i* is set
/// when lane *i* is set. Implementations are pure and branch free with
/// respect to lane values.
pub trait MaskPacker {
    /// Kebab-case name, as accepted by [`Strategy`](crate::Strategy)'s `FromStr`.
    const NAME: &'static str;
    /// The input precondition, matching the capability marker below.
    const INPUT: LaneInput;

    fn pack(vector: LaneVector) -> LaneMask;
}

/// Packers only defined for `0x00`/`0xFF` lanes.
pub trait StrictBooleanLanePacker: MaskPacker {}

/// Packers that read only the sign bit and accept arbitrary bytes.
pub trait SignBitPacker: MaskPacker {}

// ---------------------------------------------------------------------------
// Packers
// ---------------------------------------------------------------------------

#[derive(movemask_macro::MaskPacker, Debug, Clone, Copy, Default)]
#[packer(
    name = "weighted-sum-store",
    input = "strict_boolean",
    kernel = crate::pack_weighted_sum_store
)]
pub struct WeightedSumStore;

#[derive(movemask_macro::MaskPacker, Debug, Clone, Copy, Default)]
#[packer(
    name = "weighted-sum-shift",
    input = "strict_boolean",
    kernel = crate::pack_weighted_sum_shift
)]
pub struct WeightedSumShift;

#[derive(movemask_macro::MaskPacker, Debug, Clone, Copy, Default)]
#[packer(
    name = "sign-bit-doubling",
    input = "sign_bit",
    kernel = crate::pack_sign_bit_doubling
)]
pub struct SignBitDoubling;

#[derive(movemask_macro::MaskPacker, Debug, Clone, Copy, Default)]
#[packer(
    name = "half-vector-shift",
    input = "sign_bit",
    kernel = crate::pack_half_vector_shift
)]
pub struct HalfVectorShift;

#[derive(movemask_macro::MaskPacker, Debug, Clone, Copy, Default)]
#[packer(
    name = "paired-bit-extract",
    input = "strict_boolean",
    kernel = crate::pack_paired_bit_extract
)]
pub struct PairedBitExtract;

#[derive(movemask_macro::MaskPacker, Debug, Clone, Copy, Default)]
#[packer(
    name = "sign-bit-interleave",
    input = "sign_bit",
    kernel = crate::pack_sign_bit_interleave
)]
pub struct SignBitInterleave;
