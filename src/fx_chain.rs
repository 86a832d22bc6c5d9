//! Generic FX-chained presence-bitmap framer.
//!
//! FSPEC (§ C1) and a Compound item's primary subfield bitmap are the same
//! shape: a sequence of octets, each carrying seven presence bits (MSB
//! first) plus a continuation bit (FX, the LSB). This module implements
//! that shape once; [`crate::fspec`] and the Compound item-kind in
//! [`crate::item_kind`] both build on it instead of re-deriving the chain.

use crate::error::{AsterixError, DecodeContext, Result};
use std::collections::BTreeSet;

/// Decode an FX-chained 7-bits-per-octet presence bitmap starting at the
/// front of `data`. `base` is added to every bit position found (FSPEC uses
/// 1-based FRNs, Compound primary bitmaps use 0-based subfield indices).
/// `max_octets` bounds how many octets may be read before the chain is
/// rejected as malformed.
pub fn decode(
    data: &[u8],
    base: u32,
    max_octets: usize,
    context: &DecodeContext,
) -> Result<(BTreeSet<u32>, usize)> {
    let mut present = BTreeSet::new();
    let mut consumed = 0usize;
    loop {
        if consumed >= max_octets {
            return Err(AsterixError::invalid_message(
                format!("FX chain exceeded {max_octets} octet(s)"),
                context.clone().at_offset(consumed),
            ));
        }
        let octet = *data.get(consumed).ok_or_else(|| {
            AsterixError::invalid_fspec("FX chain unterminated", context.clone().at_offset(consumed))
        })?;
        let group = (consumed as u32) * 7;
        for bit in 0..7u32 {
            if octet & (1 << (7 - bit)) != 0 {
                present.insert(base + group + bit);
            }
        }
        consumed += 1;
        if octet & 0x01 == 0 {
            break;
        }
    }
    Ok((present, consumed))
}

/// Encode the minimal FX chain covering `present` (values already offset by
/// `base`, as passed to [`decode`]) into `out`. Returns bytes written.
pub fn encode(present: &BTreeSet<u32>, base: u32, out: &mut Vec<u8>) -> usize {
    let width = match present.iter().map(|&v| v - base).max() {
        Some(max) => (max / 7 + 1) as usize,
        None => {
            out.push(0x00);
            return 1;
        }
    };
    let start = out.len();
    out.resize(start + width, 0);
    for &v in present {
        let rel = v - base;
        let octet_index = (rel / 7) as usize;
        let bit = rel % 7;
        out[start + octet_index] |= 1 << (7 - bit);
    }
    for i in 0..width - 1 {
        out[start + i] |= 0x01;
    }
    width
}
