//! I020/140: Time of Day. Fixed, 3 bytes: unsigned 24-bit big-endian count
//! of 1/128 s ticks since midnight.

use crate::error::{AsterixError, DecodeContext, Result};
use crate::value::DataItemCodec;
use byteorder::{BigEndian, ByteOrder};

const LSB: f64 = 1.0 / 128.0;
/// 24 bits unsigned: 0..=16_777_215 ticks, i.e. up to ~36.4 hours.
const MAX_TICKS: u32 = (1 << 24) - 1;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TimeOfDay {
    seconds: f64,
}

impl TimeOfDay {
    pub fn new(seconds: f64) -> Self {
        Self { seconds }
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

impl DataItemCodec for TimeOfDay {
    fn decode_body(&mut self, body: &[u8]) -> Result<()> {
        if body.len() != 3 {
            return Err(AsterixError::invalid_message(
                format!("TimeOfDay expects 3 bytes, got {}", body.len()),
                DecodeContext::new(body.len()),
            ));
        }
        let ticks = BigEndian::read_u24(body);
        self.seconds = ticks as f64 * LSB;
        Ok(())
    }

    fn encode_body(&self) -> Result<Vec<u8>> {
        let ticks = (self.seconds / LSB).round();
        if !(0.0..=MAX_TICKS as f64).contains(&ticks) {
            return Err(AsterixError::validation_failed(
                format!("time of day {} s is out of the representable range", self.seconds),
                DecodeContext::default(),
            ));
        }
        let mut out = [0u8; 3];
        BigEndian::write_u24(&mut out, ticks as u32);
        Ok(out.to_vec())
    }

    fn validate(&self) -> Result<()> {
        if self.seconds < 0.0 {
            return Err(AsterixError::validation_failed(
                "time of day must not be negative",
                DecodeContext::default(),
            ));
        }
        Ok(())
    }

    fn display_string(&self) -> String {
        format!("{:.3}s", self.seconds)
    }
}
