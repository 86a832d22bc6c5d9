//! I020/220, I021/080, ...: Target Address (ICAO 24-bit aircraft address).
//! Fixed, 3 bytes: unsigned 24-bit big-endian, no scaling.

use crate::error::{AsterixError, DecodeContext, Result};
use crate::value::DataItemCodec;
use byteorder::{BigEndian, ByteOrder};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TargetAddress {
    pub address: u32,
}

impl TargetAddress {
    pub fn new(address: u32) -> Self {
        Self { address }
    }
}

impl DataItemCodec for TargetAddress {
    fn decode_body(&mut self, body: &[u8]) -> Result<()> {
        if body.len() != 3 {
            return Err(AsterixError::invalid_message(
                format!("TargetAddress expects 3 bytes, got {}", body.len()),
                DecodeContext::new(body.len()),
            ));
        }
        self.address = BigEndian::read_u24(body);
        Ok(())
    }

    fn encode_body(&self) -> Result<Vec<u8>> {
        self.validate()?;
        let mut out = [0u8; 3];
        BigEndian::write_u24(&mut out, self.address);
        Ok(out.to_vec())
    }

    fn validate(&self) -> Result<()> {
        if self.address > 0x00FF_FFFF {
            return Err(AsterixError::validation_failed(
                format!("target address {:#X} does not fit in 24 bits", self.address),
                DecodeContext::default(),
            ));
        }
        Ok(())
    }

    fn display_string(&self) -> String {
        format!("{:06X}", self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let mut item = TargetAddress::new(0x4840D6);
        let bytes = item.encode_body().unwrap();
        assert_eq!(bytes, vec![0x48, 0x40, 0xD6]);
        item.decode_body(&bytes).unwrap();
        assert_eq!(item, TargetAddress::new(0x4840D6));
    }

    #[test]
    fn oversized_address_fails_validation() {
        let item = TargetAddress::new(0x0100_0000);
        assert!(item.validate().is_err());
    }
}
