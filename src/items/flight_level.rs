//! I020/090, I021/145, ...: Flight Level. Fixed, 2 bytes: signed 16-bit
//! big-endian, LSB = 1/4 FL.

use crate::error::{AsterixError, DecodeContext, Result};
use crate::value::DataItemCodec;
use byteorder::{BigEndian, ByteOrder};

const LSB: f64 = 0.25;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FlightLevel {
    pub flight_level: f64,
}

impl FlightLevel {
    pub fn new(flight_level: f64) -> Self {
        Self { flight_level }
    }
}

impl DataItemCodec for FlightLevel {
    fn decode_body(&mut self, body: &[u8]) -> Result<()> {
        if body.len() != 2 {
            return Err(AsterixError::invalid_message(
                format!("FlightLevel expects 2 bytes, got {}", body.len()),
                DecodeContext::new(body.len()),
            ));
        }
        let raw = BigEndian::read_i16(body);
        self.flight_level = raw as f64 * LSB;
        Ok(())
    }

    fn encode_body(&self) -> Result<Vec<u8>> {
        let raw = (self.flight_level / LSB).round();
        if !(i16::MIN as f64..=i16::MAX as f64).contains(&raw) {
            return Err(AsterixError::validation_failed(
                format!("flight level {} FL is out of the representable range", self.flight_level),
                DecodeContext::default(),
            ));
        }
        let mut out = [0u8; 2];
        BigEndian::write_i16(&mut out, raw as i16);
        Ok(out.to_vec())
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn display_string(&self) -> String {
        format!("FL{:.2}", self.flight_level)
    }
}
