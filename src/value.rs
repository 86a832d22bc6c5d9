//! The heterogeneous Data Item contract (§3, §9 Design Notes).
//!
//! Every concrete Data Item implements [`DataItemCodec`]. A `Record` stores
//! items as `Box<dyn DataItemCodec>` keyed by id — the registry (§4.3)
//! constructs a fresh trait object per decode, so the open, trait-object
//! form (§9 option (a)) is the one the engine itself is built around. Each
//! concrete item additionally exposes typed accessors on its own struct for
//! callers who know which item they're holding (§9 option (b) in spirit,
//! without forcing every caller through a closed enum).

use crate::error::Result;

/// The uniform per-item contract: body-level decode/encode (framing is the
/// job of the item-kind engine in [`crate::item_kind`], not of the item
/// itself), range/consistency validation, and a human-readable summary.
///
/// "Body" means different bytes depending on the Field Descriptor's layout
/// kind:
/// - Fixed: exactly the declared N bytes.
/// - Extended: the FX-chain octets with each octet's FX bit (bit 0) masked
///   to zero — content never needs to see the engine's own framing bit.
/// - Repetitive: the concatenated `REP * M` bytes (`REP` and the frame byte
///   itself are stripped).
/// - Compound: the literal wire bytes of the primary bitmap followed by the
///   concatenated present subfields (self-delimiting; the content codec
///   interprets it with [`DataItemCodec::compound_subfield_lens`]).
/// - Explicit: the `LEN - 1` payload bytes (the length byte is stripped).
pub trait DataItemCodec: std::fmt::Debug + Send + Sync {
    /// Parse `body` (as shaped by the layout kind, see above) into `self`.
    fn decode_body(&mut self, body: &[u8]) -> Result<()>;

    /// Produce this item's body bytes in the same shape `decode_body`
    /// expects back.
    fn encode_body(&self) -> Result<Vec<u8>>;

    /// Range/consistency checks specific to this item. Called by
    /// `Record::set_data_item` on encode and after `Record::decode`.
    fn validate(&self) -> Result<()>;

    /// Human-readable rendering for logs and debug output.
    fn display_string(&self) -> String;

    /// For Compound items only: byte length of the subfield at each
    /// 0-based bit position of the primary bitmap, in bitmap order.
    /// Fixed/Extended/Repetitive/Explicit items never call this.
    fn compound_subfield_lens(&self) -> &'static [usize] {
        &[]
    }

    /// For Extended items only: the maximum number of FX-chained octets
    /// this item's layout is documented to use. The engine rejects chains
    /// longer than this with `InvalidMessage` rather than silently
    /// accepting or silently truncating (§9 Open Questions).
    fn max_extended_octets(&self) -> usize {
        4
    }
}

/// Constructs a fresh, zero-valued codec for a Data Item id. One registry
/// function per UAP (§4.3); stored as a plain `fn` pointer since no item
/// constructor needs captured state.
pub type ItemConstructor = fn() -> Box<dyn DataItemCodec>;
