//! I020/245, I021/170, ...: Aircraft Identification (callsign). Fixed, 6
//! bytes packed as eight 6-bit characters.
//!
//! Two 6-bit character tables are in documented use across ASTERIX
//! categories (§9 Open Question): the standard IA5 table puts digits at
//! codes 48-57, while some older category documents pack them at 27-36
//! instead. We make the table an explicit, per-item choice rather than
//! guessing from the category number, defaulting to the standard table.

use crate::error::{AsterixError, DecodeContext, Result};
use crate::value::DataItemCodec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharTable {
    #[default]
    Standard,
    CompactDigits,
}

impl CharTable {
    fn decode_char(self, code: u8) -> Result<char> {
        match (self, code) {
            (_, 0) => Ok(' '),
            (_, 1..=26) => Ok((b'A' + code - 1) as char),
            (Self::Standard, 48..=57) => Ok((b'0' + code - 48) as char),
            (Self::CompactDigits, 27..=36) => Ok((b'0' + code - 27) as char),
            _ => Err(AsterixError::validation_failed(
                format!("6-bit code {code} is not a valid aircraft identification character"),
                DecodeContext::default(),
            )),
        }
    }

    fn encode_char(self, c: char) -> Result<u8> {
        match c {
            ' ' => Ok(0),
            'A'..='Z' => Ok(c as u8 - b'A' + 1),
            '0'..='9' => Ok(match self {
                Self::Standard => c as u8 - b'0' + 48,
                Self::CompactDigits => c as u8 - b'0' + 27,
            }),
            _ => Err(AsterixError::validation_failed(
                format!("character '{c}' has no aircraft identification encoding"),
                DecodeContext::default(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AircraftIdentification {
    pub callsign: String,
    pub char_table: CharTable,
}

impl AircraftIdentification {
    pub fn new(callsign: impl Into<String>) -> Self {
        Self { callsign: callsign.into(), char_table: CharTable::default() }
    }

    pub fn with_table(callsign: impl Into<String>, char_table: CharTable) -> Self {
        Self { callsign: callsign.into(), char_table }
    }
}

impl DataItemCodec for AircraftIdentification {
    fn decode_body(&mut self, body: &[u8]) -> Result<()> {
        if body.len() != 6 {
            return Err(AsterixError::invalid_message(
                format!("AircraftIdentification expects 6 bytes, got {}", body.len()),
                DecodeContext::new(body.len()),
            ));
        }
        // Eight packed 6-bit codes across 48 bits.
        let bits: u64 = body.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
        let mut callsign = String::with_capacity(8);
        for i in 0..8 {
            let shift = (7 - i) * 6;
            let code = ((bits >> shift) & 0x3F) as u8;
            callsign.push(self.char_table.decode_char(code)?);
        }
        self.callsign = callsign.trim_end().to_string();
        Ok(())
    }

    fn encode_body(&self) -> Result<Vec<u8>> {
        self.validate()?;
        let mut padded = self.callsign.clone();
        while padded.chars().count() < 8 {
            padded.push(' ');
        }
        let mut bits: u64 = 0;
        for c in padded.chars() {
            bits = (bits << 6) | self.char_table.encode_char(c)? as u64;
        }
        let mut out = vec![0u8; 6];
        for (i, byte) in out.iter_mut().enumerate() {
            let shift = (5 - i) * 8;
            *byte = ((bits >> shift) & 0xFF) as u8;
        }
        Ok(out)
    }

    fn validate(&self) -> Result<()> {
        if self.callsign.chars().count() > 8 {
            return Err(AsterixError::validation_failed(
                format!("callsign '{}' exceeds 8 characters", self.callsign),
                DecodeContext::default(),
            ));
        }
        Ok(())
    }

    fn display_string(&self) -> String {
        self.callsign.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_standard_table() {
        let mut item = AircraftIdentification::new("KLM1023");
        let bytes = item.encode_body().unwrap();
        item.decode_body(&bytes).unwrap();
        assert_eq!(item.callsign, "KLM1023");
    }

    #[test]
    fn roundtrip_compact_digits_table() {
        let mut item = AircraftIdentification::with_table("BA007", CharTable::CompactDigits);
        let bytes = item.encode_body().unwrap();
        item.decode_body(&bytes).unwrap();
        assert_eq!(item.callsign, "BA007");
    }

    #[test]
    fn short_callsign_is_space_padded() {
        let item = AircraftIdentification::new("KLM");
        let bytes = item.encode_body().unwrap();
        assert_eq!(bytes, vec![0x2C, 0xC3, 0x40, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn over_length_callsign_fails_validation() {
        let item = AircraftIdentification::new("TOOLONGCALL");
        assert!(item.validate().is_err());
    }
}
