//! The four (plus Explicit) reusable item-layout engines.
//!
//! Each function here controls *framing* only: how many bytes on the wire
//! belong to one item, and how the length/continuation markers are written.
//! Content — what the bytes mean — is delegated to the item's
//! [`crate::value::DataItemCodec`] implementation, reached through
//! `decode_body`/`encode_body`.

use crate::error::{AsterixError, DecodeContext, Result};
use crate::fx_chain;
use crate::value::DataItemCodec;

/// `Fixed`: exactly `len` bytes, handed to the content codec unmodified.
pub mod fixed {
    use super::*;

    pub fn decode(
        data: &[u8],
        len: usize,
        codec: &mut dyn DataItemCodec,
        context: &DecodeContext,
    ) -> Result<usize> {
        if data.len() < len {
            return Err(AsterixError::buffer_too_short(
                len - data.len(),
                data.len(),
                context.clone(),
            ));
        }
        codec.decode_body(&data[..len])?;
        Ok(len)
    }

    pub fn encode(codec: &dyn DataItemCodec, len: usize, out: &mut Vec<u8>) -> Result<usize> {
        let body = codec.encode_body()?;
        if body.len() != len {
            return Err(AsterixError::invalid_message(
                format!("fixed item produced {} bytes, declared length is {len}", body.len()),
                DecodeContext::new(body.len()),
            ));
        }
        out.extend_from_slice(&body);
        Ok(len)
    }
}

/// `Extended`: FX-chained octets, each carrying its own continuation bit in
/// bit 0. The engine frames the chain; the content codec interprets the
/// seven data bits of each octet however its layout documents.
pub mod extended {
    use super::*;

    pub fn decode(
        data: &[u8],
        codec: &mut dyn DataItemCodec,
        context: &DecodeContext,
    ) -> Result<usize> {
        let max_octets = codec.max_extended_octets();
        let mut consumed = 0usize;
        let mut body = Vec::new();
        loop {
            if consumed >= max_octets {
                return Err(AsterixError::invalid_message(
                    format!("extended item exceeded {max_octets} octet(s)"),
                    context.clone().at_offset(consumed),
                ));
            }
            let octet = *data.get(consumed).ok_or_else(|| {
                AsterixError::buffer_too_short(1, data.len() - consumed, context.clone().at_offset(consumed))
            })?;
            body.push(octet & 0xFE);
            consumed += 1;
            if octet & 0x01 == 0 {
                break;
            }
        }
        codec.decode_body(&body)?;
        Ok(consumed)
    }

    pub fn encode(codec: &dyn DataItemCodec, out: &mut Vec<u8>) -> Result<usize> {
        let mut body = codec.encode_body()?;
        if body.is_empty() {
            return Err(AsterixError::invalid_message(
                "extended item produced no octets",
                DecodeContext::default(),
            ));
        }
        if body.len() > codec.max_extended_octets() {
            return Err(AsterixError::invalid_message(
                format!(
                    "extended item encoded {} octets, exceeding its maximum of {}",
                    body.len(),
                    codec.max_extended_octets()
                ),
                DecodeContext::default(),
            ));
        }
        let last = body.len() - 1;
        for (i, octet) in body.iter_mut().enumerate() {
            *octet = (*octet & 0xFE) | u8::from(i != last);
        }
        out.extend_from_slice(&body);
        Ok(body.len())
    }
}

/// `Repetitive`: one `REP` count byte, then `REP * element_len` bytes.
pub mod repetitive {
    use super::*;

    pub fn decode(
        data: &[u8],
        element_len: usize,
        codec: &mut dyn DataItemCodec,
        context: &DecodeContext,
    ) -> Result<usize> {
        let rep = *data
            .first()
            .ok_or_else(|| AsterixError::buffer_too_short(1, 0, context.clone()))? as usize;
        let payload_len = rep * element_len;
        if data.len() < 1 + payload_len {
            return Err(AsterixError::buffer_too_short(
                1 + payload_len - data.len(),
                data.len(),
                context.clone(),
            ));
        }
        codec.decode_body(&data[1..1 + payload_len])?;
        Ok(1 + payload_len)
    }

    pub fn encode(
        codec: &dyn DataItemCodec,
        element_len: usize,
        out: &mut Vec<u8>,
    ) -> Result<usize> {
        let body = codec.encode_body()?;
        if element_len == 0 || body.len() % element_len != 0 {
            return Err(AsterixError::invalid_message(
                format!(
                    "repetitive item body of {} bytes is not a multiple of element length {element_len}",
                    body.len()
                ),
                DecodeContext::default(),
            ));
        }
        let rep = body.len() / element_len;
        if rep > 255 {
            return Err(AsterixError::invalid_message(
                format!("repetitive item has {rep} repetitions, REP is capped at 255"),
                DecodeContext::default(),
            ));
        }
        out.push(rep as u8);
        out.extend_from_slice(&body);
        Ok(1 + body.len())
    }
}

/// `Compound`: a primary subfield (an FX-chained bitmap, framed with the
/// same [`fx_chain`] primitive FSPEC uses) selecting fixed-length subfields
/// that follow it back to back.
pub mod compound {
    use super::*;

    pub fn decode(
        data: &[u8],
        codec: &mut dyn DataItemCodec,
        context: &DecodeContext,
    ) -> Result<usize> {
        let lens = codec.compound_subfield_lens();
        let max_octets = lens.len().div_ceil(7).max(1);
        let (present, primary_len) = fx_chain::decode(data, 0, max_octets, context)?;
        let mut total = primary_len;
        for &bit in &present {
            let len = *lens.get(bit as usize).ok_or_else(|| {
                AsterixError::invalid_message(
                    format!("compound item has no subfield at bit {bit}"),
                    context.clone().at_offset(total),
                )
            })?;
            total += len;
        }
        if data.len() < total {
            return Err(AsterixError::buffer_too_short(
                total - data.len(),
                data.len(),
                context.clone(),
            ));
        }
        codec.decode_body(&data[..total])?;
        Ok(total)
    }

    pub fn encode(codec: &dyn DataItemCodec, out: &mut Vec<u8>) -> Result<usize> {
        let body = codec.encode_body()?;
        out.extend_from_slice(&body);
        Ok(body.len())
    }
}

/// `Explicit` (RE*/SP* fields): one `LEN` byte, inclusive of itself, then
/// `LEN - 1` bytes of opaque payload.
pub mod explicit {
    use super::*;

    pub fn decode(
        data: &[u8],
        codec: &mut dyn DataItemCodec,
        context: &DecodeContext,
    ) -> Result<usize> {
        let len = *data
            .first()
            .ok_or_else(|| AsterixError::buffer_too_short(1, 0, context.clone()))? as usize;
        if len == 0 {
            return Err(AsterixError::invalid_message(
                "explicit item LEN must be at least 1 (inclusive of itself)",
                context.clone(),
            ));
        }
        if data.len() < len {
            return Err(AsterixError::buffer_too_short(
                len - data.len(),
                data.len(),
                context.clone(),
            ));
        }
        codec.decode_body(&data[1..len])?;
        Ok(len)
    }

    pub fn encode(codec: &dyn DataItemCodec, out: &mut Vec<u8>) -> Result<usize> {
        let body = codec.encode_body()?;
        let len = body.len() + 1;
        if len > 255 {
            return Err(AsterixError::invalid_message(
                format!("explicit item of {len} bytes exceeds the 255-byte LEN field"),
                DecodeContext::default(),
            ));
        }
        out.push(len as u8);
        out.extend_from_slice(&body);
        Ok(len)
    }
}
