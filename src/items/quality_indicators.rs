//! I021/090, I048/090, ...: Quality Indicators. Compound: a primary bitmap
//! selecting up to four one-byte accuracy/age subfields, each present only
//! when its bit is set.

use crate::error::{AsterixError, DecodeContext, Result};
use crate::fx_chain;
use crate::value::DataItemCodec;

const SUBFIELD_LENS: [usize; 4] = [1, 1, 1, 1];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QualityIndicators {
    pub horizontal_accuracy: Option<u8>,
    pub vertical_accuracy: Option<u8>,
    pub velocity_accuracy: Option<u8>,
    pub age: Option<u8>,
}

impl DataItemCodec for QualityIndicators {
    fn decode_body(&mut self, body: &[u8]) -> Result<()> {
        let context = DecodeContext::new(body.len());
        let max_octets = SUBFIELD_LENS.len().div_ceil(7).max(1);
        let (present, mut offset) = fx_chain::decode(body, 0, max_octets, &context)?;

        self.horizontal_accuracy = None;
        self.vertical_accuracy = None;
        self.velocity_accuracy = None;
        self.age = None;

        for bit in present {
            let len = SUBFIELD_LENS[bit as usize];
            let value = *body.get(offset).ok_or_else(|| {
                AsterixError::buffer_too_short(len, body.len() - offset, context.clone().at_offset(offset))
            })?;
            match bit {
                0 => self.horizontal_accuracy = Some(value),
                1 => self.vertical_accuracy = Some(value),
                2 => self.velocity_accuracy = Some(value),
                3 => self.age = Some(value),
                _ => {}
            }
            offset += len;
        }
        Ok(())
    }

    fn encode_body(&self) -> Result<Vec<u8>> {
        let values = [
            self.horizontal_accuracy,
            self.vertical_accuracy,
            self.velocity_accuracy,
            self.age,
        ];
        let present = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|_| i as u32))
            .collect();

        let mut out = Vec::new();
        fx_chain::encode(&present, 0, &mut out);
        for value in values.into_iter().flatten() {
            out.push(value);
        }
        Ok(out)
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn display_string(&self) -> String {
        format!(
            "HAcc={:?},VAcc={:?},VelAcc={:?},Age={:?}",
            self.horizontal_accuracy, self.vertical_accuracy, self.velocity_accuracy, self.age
        )
    }

    fn compound_subfield_lens(&self) -> &'static [usize] {
        &SUBFIELD_LENS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item_kind::compound;
    use crate::error::DecodeContext;

    #[test]
    fn roundtrip_with_gaps() {
        let mut item = QualityIndicators {
            horizontal_accuracy: Some(5),
            vertical_accuracy: None,
            velocity_accuracy: Some(9),
            age: None,
        };
        let mut out = Vec::new();
        compound::encode(&item, &mut out).unwrap();
        let ctx = DecodeContext::new(out.len());
        compound::decode(&out, &mut item, &ctx).unwrap();
        assert_eq!(item.horizontal_accuracy, Some(5));
        assert_eq!(item.vertical_accuracy, None);
        assert_eq!(item.velocity_accuracy, Some(9));
        assert_eq!(item.age, None);
    }

    #[test]
    fn all_absent_is_one_zero_octet() {
        let item = QualityIndicators::default();
        let bytes = item.encode_body().unwrap();
        assert_eq!(bytes, vec![0x00]);
    }
}
