//! User Application Profile: the ordered Field Descriptor list and Data
//! Item factory for one Category/version (§3, §4.3, §4.4).

use crate::error::{AsterixError, DecodeContext, Result};
use crate::value::{DataItemCodec, ItemConstructor};
use std::collections::{BTreeMap, HashMap};

/// The layout kind a Field Descriptor drives its item with (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Fixed { len: usize },
    Extended,
    Repetitive { element_len: usize },
    Compound,
    Explicit,
}

/// One slot in a UAP's FRN-ordered field list.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub frn: u32,
    /// Empty for a spare slot: it still consumes an FSPEC bit but carries
    /// no payload and has no entry in the item factory.
    pub item_id: String,
    pub layout: LayoutKind,
    pub mandatory: bool,
    pub description: &'static str,
}

impl FieldDescriptor {
    pub fn is_spare(&self) -> bool {
        self.item_id.is_empty()
    }
}

/// Extra cross-field validation a Category may need beyond "mandatory items
/// present" (e.g. "at least one of I020/041, I020/042").
pub type ExtraValidate = fn(&BTreeMap<String, Box<dyn DataItemCodec>>) -> Result<()>;

/// One Category/version's field list, item factory, and validation rules.
/// Immutable and shareable after construction (§3 Ownership, §5 Shared
/// Resources).
pub struct Uap {
    pub category: u8,
    pub version: &'static str,
    /// Whether this Category packs more than one Record per Data Block.
    pub blockable: bool,
    fields: Vec<FieldDescriptor>,
    factory: HashMap<String, ItemConstructor>,
    extra_validate: Option<ExtraValidate>,
}

impl Uap {
    pub fn new(
        category: u8,
        version: &'static str,
        blockable: bool,
        fields: Vec<FieldDescriptor>,
        factory: HashMap<String, ItemConstructor>,
        extra_validate: Option<ExtraValidate>,
    ) -> Self {
        debug_assert!(
            fields.iter().enumerate().all(|(i, f)| f.frn == (i as u32) + 1),
            "UAP field list must be contiguous FRNs starting at 1"
        );
        Self {
            category,
            version,
            blockable,
            fields,
            factory,
            extra_validate,
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_by_frn(&self, frn: u32) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.frn == frn)
    }

    pub fn highest_frn(&self) -> u32 {
        self.fields.last().map(|f| f.frn).unwrap_or(0)
    }

    /// Construct a fresh, zero-valued codec for `item_id`.
    pub fn create_data_item(&self, item_id: &str, context: &DecodeContext) -> Result<Box<dyn DataItemCodec>> {
        self.factory
            .get(item_id)
            .map(|ctor| ctor())
            .ok_or_else(|| AsterixError::UnknownDataItem {
                item_id: item_id.to_string(),
                context: context.clone(),
            })
    }

    /// At minimum, every mandatory id must be present; then any
    /// Category-specific extra rule runs.
    pub fn validate(
        &self,
        items: &BTreeMap<String, Box<dyn DataItemCodec>>,
        context: &DecodeContext,
    ) -> Result<()> {
        for field in &self.fields {
            if field.mandatory && !field.is_spare() && !items.contains_key(&field.item_id) {
                return Err(AsterixError::validation_failed(
                    format!("mandatory item {} is missing", field.item_id),
                    context.clone(),
                ));
            }
        }
        if let Some(extra) = self.extra_validate {
            extra(items)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Uap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Uap")
            .field("category", &self.category)
            .field("version", &self.version)
            .field("blockable", &self.blockable)
            .field("fields", &self.fields.len())
            .finish()
    }
}
