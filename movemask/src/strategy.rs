use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::{
    HalfVectorShift, LaneInput, LaneMask, LaneVector, MaskPacker, PairedBitExtract,
    SignBitDoubling, SignBitInterleave, WeightedSumShift, WeightedSumStore,
};

/// The closed set of packing algorithms, for callers that pick one at run
/// time (benchmarks, cross-checks). Static callers should use the packer
/// types or the `pack_*` functions directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    WeightedSumStore,
    WeightedSumShift,
    SignBitDoubling,
    HalfVectorShift,
    PairedBitExtract,
    SignBitInterleave,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::WeightedSumStore,
        Strategy::WeightedSumShift,
        Strategy::SignBitDoubling,
        Strategy::HalfVectorShift,
        Strategy::PairedBitExtract,
        Strategy::SignBitInterleave,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Strategy::WeightedSumStore => WeightedSumStore::NAME,
            Strategy::WeightedSumShift => WeightedSumShift::NAME,
            Strategy::SignBitDoubling => SignBitDoubling::NAME,
            Strategy::HalfVectorShift => HalfVectorShift::NAME,
            Strategy::PairedBitExtract => PairedBitExtract::NAME,
            Strategy::SignBitInterleave => SignBitInterleave::NAME,
        }
    }

    pub const fn input(self) -> LaneInput {
        match self {
            Strategy::WeightedSumStore => WeightedSumStore::INPUT,
            Strategy::WeightedSumShift => WeightedSumShift::INPUT,
            Strategy::SignBitDoubling => SignBitDoubling::INPUT,
            Strategy::HalfVectorShift => HalfVectorShift::INPUT,
            Strategy::PairedBitExtract => PairedBitExtract::INPUT,
            Strategy::SignBitInterleave => SignBitInterleave::INPUT,
        }
    }

    /// The packing function as a plain function pointer.
    pub fn kernel(self) -> fn(LaneVector) -> LaneMask {
        match self {
            Strategy::WeightedSumStore => WeightedSumStore::pack,
            Strategy::WeightedSumShift => WeightedSumShift::pack,
            Strategy::SignBitDoubling => SignBitDoubling::pack,
            Strategy::HalfVectorShift => HalfVectorShift::pack,
            Strategy::PairedBitExtract => PairedBitExtract::pack,
            Strategy::SignBitInterleave => SignBitInterleave::pack,
        }
    }

    #[inline]
    pub fn pack(self, vector: LaneVector) -> LaneMask {
        match self {
            Strategy::WeightedSumStore => WeightedSumStore::pack(vector),
            Strategy::WeightedSumShift => WeightedSumShift::pack(vector),
            Strategy::SignBitDoubling => SignBitDoubling::pack(vector),
            Strategy::HalfVectorShift => HalfVectorShift::pack(vector),
            Strategy::PairedBitExtract => PairedBitExtract::pack(vector),
            Strategy::SignBitInterleave => SignBitInterleave::pack(vector),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by `Strategy::from_str` for a name outside [`Strategy::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown movemask strategy `{input}`, expected one of: {}", expected_names())]
pub struct ParseStrategyError {
    input: String,
}

impl ParseStrategyError {
    /// The rejected input, as given.
    pub fn input(&self) -> &str {
        &self.input
    }
}

fn expected_names() -> String {
    Strategy::ALL.map(Strategy::name).join(", ")
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    /// Case-insensitive; `_` is accepted in place of `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == wanted)
            .ok_or_else(|| ParseStrategyError { input: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_from_str_roundtrip() {
        for s in Strategy::ALL {
            assert_eq!(s.to_string().parse::<Strategy>(), Ok(s));
        }
    }

    #[test]
    fn test_from_str_lenient() {
        assert_eq!(
            "Paired_Bit_Extract".parse::<Strategy>(),
            Ok(Strategy::PairedBitExtract)
        );
        assert_eq!(
            " sign-bit-doubling\n".parse::<Strategy>(),
            Ok(Strategy::SignBitDoubling)
        );
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "vmovemask_u8".parse::<Strategy>().unwrap_err();
        assert_eq!(err.input(), "vmovemask_u8");
        let msg = err.to_string();
        assert!(msg.starts_with("unknown movemask strategy `vmovemask_u8`"));
        assert!(msg.ends_with("sign-bit-interleave"));
    }

    #[test]
    fn test_parse_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new("".parse::<Strategy>().unwrap_err());
        assert_eq!(
            err.to_string(),
            "unknown movemask strategy ``, expected one of: weighted-sum-store, \
             weighted-sum-shift, sign-bit-doubling, half-vector-shift, \
             paired-bit-extract, sign-bit-interleave"
        );
        assert!(std::error::Error::source(err.as_ref()).is_none());
    }

    #[test]
    fn test_names_unique() {
        for (i, a) in Strategy::ALL.iter().enumerate() {
            for b in &Strategy::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn test_input_tags() {
        use LaneInput::*;
        let inputs: Vec<_> = Strategy::ALL.iter().map(|s| s.input()).collect();
        assert_eq!(
            inputs,
            [StrictBoolean, StrictBoolean, SignBit, SignBit, StrictBoolean, SignBit]
        );
    }

    #[test]
    fn test_kernel_matches_pack() {
        let v = LaneVector::from_mask(0xBEEF);
        for s in Strategy::ALL {
            assert_eq!((s.kernel())(v), s.pack(v));
            assert_eq!(s.pack(v), 0xBEEF);
        }
    }
}
