//! I020/170, I048/170, ...: Track Status. Extended: a first octet of
//! CNF/RAD/DOU/MAH bit-flags plus a 2-bit climbing/descending code,
//! FX-chained into an optional second octet.

use crate::error::{AsterixError, DecodeContext, Result};
use crate::value::DataItemCodec;
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        /// 0 = confirmed, so this bit means "tentative".
        const TENTATIVE = 0b1000_0000;
        /// 0 = primary track, so this bit means "secondary/combined".
        const SECONDARY = 0b0100_0000;
        const DOUBTFUL = 0b0010_0000;
        const MANOEUVRING = 0b0001_0000;
        const GHOST = 0b1000_0000; // second octet only
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrackStatus {
    pub flags: StatusFlags,
    pub climbing_descending: u8,
}

impl TrackStatus {
    pub fn new(confirmed: bool, primary_track: bool, doubtful: bool, manoeuvring: bool, climbing_descending: u8) -> Self {
        let mut flags = StatusFlags::empty();
        flags.set(StatusFlags::TENTATIVE, !confirmed);
        flags.set(StatusFlags::SECONDARY, !primary_track);
        flags.set(StatusFlags::DOUBTFUL, doubtful);
        flags.set(StatusFlags::MANOEUVRING, manoeuvring);
        Self { flags, climbing_descending }
    }

    pub fn confirmed(&self) -> bool {
        !self.flags.contains(StatusFlags::TENTATIVE)
    }

    pub fn primary_track(&self) -> bool {
        !self.flags.contains(StatusFlags::SECONDARY)
    }
}

impl DataItemCodec for TrackStatus {
    fn decode_body(&mut self, body: &[u8]) -> Result<()> {
        let first = *body
            .first()
            .ok_or_else(|| AsterixError::invalid_message("empty track status", DecodeContext::default()))?;
        self.flags = StatusFlags::from_bits_truncate(first & 0xF0);
        self.climbing_descending = (first >> 1) & 0x03;
        if let Some(&second) = body.get(1) {
            if second & StatusFlags::GHOST.bits() != 0 {
                self.flags |= StatusFlags::GHOST;
            }
        }
        Ok(())
    }

    fn encode_body(&self) -> Result<Vec<u8>> {
        self.validate()?;
        let first = (self.flags & !StatusFlags::GHOST).bits() | (self.climbing_descending & 0x03) << 1;
        if self.flags.contains(StatusFlags::GHOST) {
            Ok(vec![first, StatusFlags::GHOST.bits()])
        } else {
            Ok(vec![first])
        }
    }

    fn validate(&self) -> Result<()> {
        if self.climbing_descending > 0b11 {
            return Err(AsterixError::validation_failed(
                format!("climbing/descending code {} does not fit in 2 bits", self.climbing_descending),
                DecodeContext::default(),
            ));
        }
        Ok(())
    }

    fn display_string(&self) -> String {
        format!("{:?},CDM={}", self.flags, self.climbing_descending)
    }

    fn max_extended_octets(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeContext;
    use crate::item_kind::extended;

    #[test]
    fn single_octet_roundtrip() {
        let mut item = TrackStatus::new(true, true, false, true, 2);
        let mut out = Vec::new();
        extended::encode(&item, &mut out).unwrap();
        assert_eq!(out.len(), 1);
        let ctx = DecodeContext::new(out.len());
        extended::decode(&out, &mut item, &ctx).unwrap();
        assert!(item.confirmed());
        assert!(item.flags.contains(StatusFlags::MANOEUVRING));
        assert_eq!(item.climbing_descending, 2);
    }
}
