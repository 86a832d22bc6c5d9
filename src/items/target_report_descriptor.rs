//! I020/020, I048/020, ...: Target Report Descriptor. Extended: a first
//! octet of TYP(3)/SIM/RDP/SPI/RAB bit-flags, FX-chained into an optional
//! second octet carrying TEST and further spares.

use crate::error::{AsterixError, DecodeContext, Result};
use crate::value::DataItemCodec;
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct DescriptorFlags: u8 {
        const SIMULATED = 0b0001_0000;
        const RDP_CHAIN_2 = 0b0000_1000;
        const SPI = 0b0000_0100;
        const FROM_FIXED_TRANSPONDER = 0b0000_0010;
        const TEST_TARGET = 0b1000_0000; // second octet only
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TargetReportDescriptor {
    pub typ: u8,
    pub flags: DescriptorFlags,
}

impl TargetReportDescriptor {
    pub fn new(typ: u8, simulated: bool, rdp_chain_2: bool, spi: bool, rab: bool) -> Self {
        let mut flags = DescriptorFlags::empty();
        flags.set(DescriptorFlags::SIMULATED, simulated);
        flags.set(DescriptorFlags::RDP_CHAIN_2, rdp_chain_2);
        flags.set(DescriptorFlags::SPI, spi);
        flags.set(DescriptorFlags::FROM_FIXED_TRANSPONDER, rab);
        Self { typ, flags }
    }
}

impl DataItemCodec for TargetReportDescriptor {
    fn decode_body(&mut self, body: &[u8]) -> Result<()> {
        let first = *body
            .first()
            .ok_or_else(|| AsterixError::invalid_message("empty target report descriptor", DecodeContext::default()))?;
        // first has bit0 (FX) already masked off by the engine; data bits
        // occupy bit7..bit1.
        self.typ = (first >> 5) & 0x07;
        self.flags = DescriptorFlags::from_bits_truncate(first & 0x1E);
        if let Some(&second) = body.get(1) {
            self.flags |= DescriptorFlags::from_bits_truncate(second) & DescriptorFlags::TEST_TARGET;
        }
        Ok(())
    }

    fn encode_body(&self) -> Result<Vec<u8>> {
        self.validate()?;
        let first = ((self.typ & 0x07) << 5) | (self.flags & !DescriptorFlags::TEST_TARGET).bits();
        if self.flags.contains(DescriptorFlags::TEST_TARGET) {
            Ok(vec![first, DescriptorFlags::TEST_TARGET.bits()])
        } else {
            Ok(vec![first])
        }
    }

    fn validate(&self) -> Result<()> {
        if self.typ > 0b111 {
            return Err(AsterixError::validation_failed(
                format!("target report type {} does not fit in 3 bits", self.typ),
                DecodeContext::default(),
            ));
        }
        Ok(())
    }

    fn display_string(&self) -> String {
        format!("TYP={},{:?}", self.typ, self.flags)
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
        let mut item = TargetReportDescriptor::new(3, true, false, true, false);
        let mut out = Vec::new();
        extended::encode(&item, &mut out).unwrap();
        assert_eq!(out.len(), 1);
        let ctx = DecodeContext::new(out.len());
        extended::decode(&out, &mut item, &ctx).unwrap();
        assert_eq!(item.typ, 3);
        assert!(item.flags.contains(DescriptorFlags::SIMULATED));
        assert!(item.flags.contains(DescriptorFlags::SPI));
    }

    #[test]
    fn high_typ_does_not_leak_into_test_target() {
        // TYP=7 sets bit7 of the first octet, which must not be read as the
        // second octet's TEST_TARGET flag.
        let mut item = TargetReportDescriptor::new(7, false, false, false, false);
        let mut out = Vec::new();
        extended::encode(&item, &mut out).unwrap();
        assert_eq!(out.len(), 1, "no TEST_TARGET set, so no second octet should be emitted");
        let ctx = DecodeContext::new(out.len());
        extended::decode(&out, &mut item, &ctx).unwrap();
        assert_eq!(item.typ, 7);
        assert!(!item.flags.contains(DescriptorFlags::TEST_TARGET));
    }

    #[test]
    fn test_target_extends_to_second_octet() {
        let mut item = TargetReportDescriptor::new(0, false, false, false, false);
        item.flags |= DescriptorFlags::TEST_TARGET;
        let mut out = Vec::new();
        extended::encode(&item, &mut out).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0] & 0x01, 1, "first octet FX must be set when a second follows");
        assert_eq!(out[1] & 0x01, 0, "last octet FX must be clear");
    }
}
