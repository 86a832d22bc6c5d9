//! I021/130 (WGS-84 Position): Fixed, 6 bytes: two 24-bit signed big-endian
//! integers (lat, lon), LSB = 180 / 2^23 degrees.

use crate::error::{AsterixError, DecodeContext, Result};
use crate::value::DataItemCodec;
use byteorder::{BigEndian, ByteOrder};

const LSB: f64 = 180.0 / 8_388_608.0; // 180 / 2^23
/// The largest degree value that round-trips without wrapping: the 24-bit
/// signed field tops out at 2^23-1 ticks, not 2^23, so +180.0 itself (which
/// would need 2^23 ticks) is not representable and wraps to -180.0 on
/// decode.
const MAX_LON_DEG: f64 = 8_388_607.0 * LSB;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Position {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl Position {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    fn encode_component(value_deg: f64) -> i32 {
        // Round-half-to-even, matching the documented encode contract.
        let scaled = value_deg / LSB;
        scaled.round_ties_even() as i32
    }
}

impl DataItemCodec for Position {
    fn decode_body(&mut self, body: &[u8]) -> Result<()> {
        if body.len() != 6 {
            return Err(AsterixError::invalid_message(
                format!("Position expects 6 bytes, got {}", body.len()),
                DecodeContext::new(body.len()),
            ));
        }
        let lat_raw = BigEndian::read_i24(&body[0..3]);
        let lon_raw = BigEndian::read_i24(&body[3..6]);
        self.lat_deg = lat_raw as f64 * LSB;
        self.lon_deg = lon_raw as f64 * LSB;
        Ok(())
    }

    fn encode_body(&self) -> Result<Vec<u8>> {
        self.validate()?;
        let mut out = [0u8; 6];
        BigEndian::write_i24(&mut out[0..3], Self::encode_component(self.lat_deg));
        BigEndian::write_i24(&mut out[3..6], Self::encode_component(self.lon_deg));
        Ok(out.to_vec())
    }

    fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat_deg) {
            return Err(AsterixError::validation_failed(
                format!("latitude {} is out of range [-90, 90]", self.lat_deg),
                DecodeContext::default(),
            ));
        }
        if !(-180.0..=MAX_LON_DEG).contains(&self.lon_deg) {
            return Err(AsterixError::validation_failed(
                format!("longitude {} is out of range [-180, {MAX_LON_DEG}]", self.lon_deg),
                DecodeContext::default(),
            ));
        }
        Ok(())
    }

    fn display_string(&self) -> String {
        format!("({:.6}, {:.6})", self.lat_deg, self.lon_deg)
    }
}
