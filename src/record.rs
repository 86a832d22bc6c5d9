//! One Record: FSPEC plus the present Data Items, encoded/decoded against a
//! UAP (§3, §4.5).

use crate::error::{AsterixError, DecodeContext, Result};
use crate::fspec;
use crate::item_kind;
use crate::uap::{LayoutKind, Uap};
use crate::value::DataItemCodec;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug)]
pub struct Record<'uap> {
    uap: &'uap Uap,
    items: BTreeMap<String, Box<dyn DataItemCodec>>,
}

impl<'uap> Record<'uap> {
    pub fn new(uap: &'uap Uap) -> Self {
        Self {
            uap,
            items: BTreeMap::new(),
        }
    }

    pub fn category(&self) -> u8 {
        self.uap.category
    }

    pub fn uap(&self) -> &'uap Uap {
        self.uap
    }

    /// Insert or override a Data Item by id. Rejects ids the UAP doesn't
    /// declare, and runs the item's own `validate()` immediately.
    pub fn set_data_item(&mut self, item_id: &str, codec: Box<dyn DataItemCodec>) -> Result<()> {
        let field = self
            .uap
            .fields()
            .iter()
            .find(|f| f.item_id == item_id)
            .ok_or_else(|| AsterixError::UnknownDataItem {
                item_id: item_id.to_string(),
                context: DecodeContext::new(0).with_category(self.uap.category),
            })?;
        codec.validate()?;
        self.items.insert(field.item_id.clone(), codec);
        Ok(())
    }

    pub fn get_data_item(&self, item_id: &str) -> Option<&dyn DataItemCodec> {
        self.items.get(item_id).map(|b| b.as_ref())
    }

    pub fn items(&self) -> &BTreeMap<String, Box<dyn DataItemCodec>> {
        &self.items
    }

    /// Encode: validate, compute FSPEC from present items, then walk FRNs in
    /// ascending order writing each present item via its layout-kind wrapper.
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<usize> {
        let context = DecodeContext::new(0).with_category(self.uap.category);
        self.uap.validate(&self.items, &context)?;

        let present: BTreeSet<u32> = self
            .uap
            .fields()
            .iter()
            .filter(|f| !f.is_spare() && self.items.contains_key(&f.item_id))
            .map(|f| f.frn)
            .collect();

        let start = out.len();
        fspec::encode(&present, out);

        for frn in present {
            let field = self.uap.field_by_frn(frn).expect("FRN came from this UAP's fields");
            let codec = self.items.get(&field.item_id).expect("checked present above");
            match field.layout {
                LayoutKind::Fixed { len } => item_kind::fixed::encode(codec.as_ref(), len, out)?,
                LayoutKind::Extended => item_kind::extended::encode(codec.as_ref(), out)?,
                LayoutKind::Repetitive { element_len } => {
                    item_kind::repetitive::encode(codec.as_ref(), element_len, out)?
                }
                LayoutKind::Compound => item_kind::compound::encode(codec.as_ref(), out)?,
                LayoutKind::Explicit => item_kind::explicit::encode(codec.as_ref(), out)?,
            };
        }
        Ok(out.len() - start)
    }

    /// Decode a Record from the front of `data` against `uap`. Returns the
    /// Record and the number of bytes consumed.
    pub fn decode(data: &[u8], uap: &'uap Uap) -> Result<(Self, usize)> {
        let context = DecodeContext::new(data.len()).with_category(uap.category);
        let (present, mut consumed) = fspec::decode(data, &context)?;

        let mut items = BTreeMap::new();
        for frn in present {
            let field = uap.field_by_frn(frn).ok_or_else(|| {
                AsterixError::invalid_fspec(
                    format!("FRN {frn} is undefined in UAP {}/{}", uap.category, uap.version),
                    context.clone().at_offset(consumed),
                )
            })?;
            if field.is_spare() {
                continue;
            }
            let item_context = context.clone().with_item(field.item_id.clone()).at_offset(consumed);
            let mut codec = uap.create_data_item(&field.item_id, &item_context)?;
            let rest = &data[consumed..];
            let item_len = match field.layout {
                LayoutKind::Fixed { len } => {
                    item_kind::fixed::decode(rest, len, codec.as_mut(), &item_context)?
                }
                LayoutKind::Extended => item_kind::extended::decode(rest, codec.as_mut(), &item_context)?,
                LayoutKind::Repetitive { element_len } => {
                    item_kind::repetitive::decode(rest, element_len, codec.as_mut(), &item_context)?
                }
                LayoutKind::Compound => item_kind::compound::decode(rest, codec.as_mut(), &item_context)?,
                LayoutKind::Explicit => item_kind::explicit::decode(rest, codec.as_mut(), &item_context)?,
            };
            consumed += item_len;
            items.insert(field.item_id.clone(), codec);
        }

        let record = Self { uap, items };
        record.uap.validate(&record.items, &context)?;
        log::debug!(
            "decoded record: category {} with {} item(s), {consumed} byte(s)",
            uap.category,
            record.items.len()
        );
        Ok((record, consumed))
    }

    pub fn display_string(&self) -> String {
        let mut parts = Vec::new();
        for field in self.uap.fields() {
            if let Some(codec) = self.items.get(&field.item_id) {
                parts.push(format!("{}={}", field.item_id, codec.display_string()));
            }
        }
        format!("Record(cat={}, {})", self.uap.category, parts.join(", "))
    }
}
