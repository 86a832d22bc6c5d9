//! RE*/SP*: Reserved/Special Expansion fields. Explicit: a LEN byte
//! (inclusive of itself) followed by opaque payload bytes whose meaning is
//! outside this crate's scope — we carry them through unchanged.

use crate::error::Result;
use crate::value::DataItemCodec;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReservedExpansion {
    pub payload: Vec<u8>,
}

impl ReservedExpansion {
    pub fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }
}

impl DataItemCodec for ReservedExpansion {
    fn decode_body(&mut self, body: &[u8]) -> Result<()> {
        self.payload = body.to_vec();
        Ok(())
    }

    fn encode_body(&self) -> Result<Vec<u8>> {
        Ok(self.payload.clone())
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn display_string(&self) -> String {
        format!("{} byte(s) opaque", self.payload.len())
    }
}
