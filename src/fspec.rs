//! Field specification: the FX-chained presence bitmap keyed by FRN.
//!
//! Layout per octet: bits 7..1 carry presence for FRN `7*i+1 .. 7*i+7` (MSB
//! first), bit 0 is the FX continuation flag. FX=1 means another octet
//! follows. The chain's width is driven entirely by the largest present FRN;
//! a record with nothing set still emits a single `0x00` octet.
//!
//! Framing itself is the generic [`crate::fx_chain`] chain with `base = 1`
//! (FRNs are 1-indexed) and an effectively unbounded octet cap, since the
//! algorithm must handle chains longer than the Categories on file today.

use crate::error::{DecodeContext, Result};
use crate::fx_chain;
use std::collections::BTreeSet;

/// A 1-based Field Reference Number.
pub type Frn = u32;

/// No Category on file needs more than this many FSPEC octets; guards
/// against a pathological FX chain looping forever on corrupt input.
const MAX_FSPEC_OCTETS: usize = 64;

/// Decode an FSPEC from the front of `data`, returning the set of present
/// FRNs and the number of bytes consumed.
pub fn decode(data: &[u8], context: &DecodeContext) -> Result<(BTreeSet<Frn>, usize)> {
    let (present, consumed) = fx_chain::decode(data, 1, MAX_FSPEC_OCTETS, context)?;
    log::trace!("fspec decode: {consumed} octet(s), {} FRN(s) present", present.len());
    Ok((present, consumed))
}

/// Encode the minimal FSPEC covering `present`, writing into `out`. Returns
/// the number of bytes written. Never emits a trailing all-zero octet, and
/// always writes at least one octet (`0x00`) when `present` is empty.
pub fn encode(present: &BTreeSet<Frn>, out: &mut Vec<u8>) -> usize {
    fx_chain::encode(present, 1, out)
}

/// Highest FRN representable in `byte_count` octets.
pub fn max_frn(byte_count: usize) -> Frn {
    (byte_count as Frn) * 7
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AsterixError;

    fn ctx() -> DecodeContext {
        DecodeContext::new(16)
    }

    #[test]
    fn empty_presence_emits_single_zero_octet() {
        let mut out = Vec::new();
        let n = encode(&BTreeSet::new(), &mut out);
        assert_eq!(n, 1);
        assert_eq!(out, vec![0x00]);
    }

    #[test]
    fn extension_chain_example() {
        // Record with FRN 1 and FRN 9 present emits FSPEC 0x81 0x40.
        let present: BTreeSet<Frn> = [1, 9].into_iter().collect();
        let mut out = Vec::new();
        let n = encode(&present, &mut out);
        assert_eq!(n, 2);
        assert_eq!(out, vec![0x81, 0x40]);

        let (decoded, consumed) = decode(&out, &ctx()).unwrap();
        assert_eq!(consumed, 2);
        assert_eq!(decoded, present);
    }

    #[test]
    fn unterminated_chain_is_invalid_fspec() {
        let data = [0x81]; // FX=1 but no second octet
        let err = decode(&data, &ctx()).unwrap_err();
        assert!(matches!(err, AsterixError::InvalidFspec { .. }));
    }

    #[test]
    fn max_frn_matches_width() {
        assert_eq!(max_frn(1), 7);
        assert_eq!(max_frn(4), 28);
    }

    #[quickcheck_macros::quickcheck]
    fn roundtrip(frns: Vec<u32>) -> quickcheck::TestResult {
        let present: BTreeSet<Frn> = frns.into_iter().filter(|&f| (1..=256).contains(&f)).collect();
        if present.is_empty() {
            return quickcheck::TestResult::discard();
        }
        let mut out = Vec::new();
        let n = encode(&present, &mut out);
        let expected_width = (*present.iter().max().unwrap()).div_ceil(7) as usize;
        assert_eq!(n, expected_width);
        let (decoded, consumed) = decode(&out, &ctx()).unwrap();
        assert_eq!(consumed, n);
        quickcheck::TestResult::from_bool(decoded == present)
    }
}
