//! Data Block: Category byte, 2-byte inclusive length, one or more Records
//! (§3, §4.6).

use crate::error::{AsterixError, DecodeContext, Result};
use crate::record::Record;
use crate::uap::Uap;

/// Fixed 3-byte header: Category + 2-byte big-endian length.
const HEADER_LEN: usize = 3;

#[derive(Debug)]
pub struct DataBlock<'uap> {
    uap: &'uap Uap,
    records: Vec<Record<'uap>>,
}

impl<'uap> DataBlock<'uap> {
    pub fn new(uap: &'uap Uap) -> Self {
        Self {
            uap,
            records: Vec::new(),
        }
    }

    pub fn category(&self) -> u8 {
        self.uap.category
    }

    pub fn add_record(&mut self, record: Record<'uap>) -> Result<()> {
        if !self.uap.blockable && !self.records.is_empty() {
            return Err(AsterixError::invalid_message(
                format!("Category {} is non-blockable: at most one Record per Data Block", self.uap.category),
                DecodeContext::new(0).with_category(self.uap.category),
            ));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn records(&self) -> &[Record<'uap>] {
        &self.records
    }

    /// Rough upper bound useful for buffer-pool sizing: header plus a
    /// conservative per-record estimate. Real encoding may be smaller.
    pub fn estimate_size(&self) -> usize {
        HEADER_LEN + self.records.len() * 32
    }

    /// Encode header + records. LEN is back-patched once the body is known,
    /// per §9's back-patching guidance — we never need to precompute each
    /// Record's length up front.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.estimate_size());
        out.push(self.uap.category);
        out.extend_from_slice(&[0u8, 0u8]); // LEN placeholder
        for record in &self.records {
            record.encode(&mut out)?;
        }
        let len = out.len() as u16;
        out[1] = (len >> 8) as u8;
        out[2] = (len & 0xFF) as u8;
        Ok(out)
    }

    /// Decode a full Data Block from `data`, which must begin with the
    /// 3-byte header.
    pub fn decode(data: &[u8], uap: &'uap Uap) -> Result<Self> {
        let context = DecodeContext::new(data.len()).with_category(uap.category);
        if data.len() < HEADER_LEN {
            return Err(AsterixError::buffer_too_short(
                HEADER_LEN - data.len(),
                data.len(),
                context,
            ));
        }
        let category = data[0];
        if category != uap.category {
            return Err(AsterixError::UnknownCategory { category, context });
        }
        let declared_len = u16::from_be_bytes([data[1], data[2]]) as usize;
        if declared_len < HEADER_LEN || declared_len > data.len() {
            return Err(AsterixError::InvalidLength {
                declared: declared_len,
                consumed: data.len(),
                context,
            });
        }

        let body = &data[HEADER_LEN..declared_len];
        let mut records = Vec::new();
        let mut consumed = 0usize;
        loop {
            if consumed == body.len() {
                break;
            }
            let (record, n) = Record::decode(&body[consumed..], uap)?;
            records.push(record);
            consumed += n;
            if !uap.blockable {
                break;
            }
        }
        if !uap.blockable && consumed != body.len() {
            return Err(AsterixError::invalid_message(
                format!(
                    "Category {category} is non-blockable but {} byte(s) remained after its one Record",
                    body.len() - consumed
                ),
                context,
            ));
        }
        if consumed != body.len() {
            return Err(AsterixError::InvalidLength {
                declared: declared_len,
                consumed: consumed + HEADER_LEN,
                context,
            });
        }
        log::debug!(
            "decoded data block: category {category}, {} record(s), {declared_len} byte(s)",
            records.len()
        );
        Ok(Self { uap, records })
    }

    pub fn display_string(&self) -> String {
        let parts: Vec<String> = self.records.iter().map(Record::display_string).collect();
        format!("DataBlock(cat={}, [{}])", self.uap.category, parts.join("; "))
    }
}
