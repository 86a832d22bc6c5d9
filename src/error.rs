//! Error taxonomy for the codec engine.
//!
//! Every decode-side error carries a [`DecodeContext`] naming where in the
//! stream it happened, the way the teacher's `read::Error` names the block
//! and abbreviation involved.

use thiserror::Error;

/// Where in the input an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeContext {
    /// Category of the Data Block being decoded, if known yet.
    pub category: Option<u8>,
    /// Data Item id currently being decoded, if known.
    pub item_id: Option<String>,
    /// Byte offset into the current Record or Data Block.
    pub offset: usize,
    /// Total size of the buffer being decoded.
    pub buffer_len: usize,
}

impl DecodeContext {
    pub fn new(buffer_len: usize) -> Self {
        Self {
            buffer_len,
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: u8) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_item(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    pub fn at_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

impl std::fmt::Display for DecodeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "offset {}/{}", self.offset, self.buffer_len)?;
        if let Some(cat) = self.category {
            write!(f, ", category {cat}")?;
        }
        if let Some(item) = &self.item_id {
            write!(f, ", item {item}")?;
        }
        Ok(())
    }
}

/// The error taxonomy from the wire-format specification (kinds, not type
/// names): a decode needing more bytes than available, a structurally
/// malformed payload, a length mismatch, a broken FSPEC, an unregistered
/// Category or Data Item, a failed validation rule, or a transport failure.
#[derive(Debug, Error)]
pub enum AsterixError {
    #[error("buffer too short: need {needed} more byte(s), have {available} ({context})")]
    BufferTooShort {
        needed: usize,
        available: usize,
        context: DecodeContext,
    },

    #[error("invalid message: {reason} ({context})")]
    InvalidMessage {
        reason: String,
        context: DecodeContext,
    },

    #[error("invalid length: declared {declared}, consumed {consumed} ({context})")]
    InvalidLength {
        declared: usize,
        consumed: usize,
        context: DecodeContext,
    },

    #[error("invalid FSPEC: {reason} ({context})")]
    InvalidFspec {
        reason: String,
        context: DecodeContext,
    },

    #[error("unknown category {category} ({context})")]
    UnknownCategory { category: u8, context: DecodeContext },

    #[error("unknown data item {item_id} ({context})")]
    UnknownDataItem {
        item_id: String,
        context: DecodeContext,
    },

    #[error("validation failed: {reason} ({context})")]
    ValidationFailed {
        reason: String,
        context: DecodeContext,
    },

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AsterixError>;

impl AsterixError {
    pub fn buffer_too_short(needed: usize, available: usize, context: DecodeContext) -> Self {
        Self::BufferTooShort {
            needed,
            available,
            context,
        }
    }

    pub fn invalid_message(reason: impl Into<String>, context: DecodeContext) -> Self {
        Self::InvalidMessage {
            reason: reason.into(),
            context,
        }
    }

    pub fn invalid_fspec(reason: impl Into<String>, context: DecodeContext) -> Self {
        Self::InvalidFspec {
            reason: reason.into(),
            context,
        }
    }

    pub fn validation_failed(reason: impl Into<String>, context: DecodeContext) -> Self {
        Self::ValidationFailed {
            reason: reason.into(),
            context,
        }
    }

    /// True if this error is one a streaming reader should attempt to
    /// re-synchronise past, rather than treat as fatal (transport failures
    /// always surface immediately, per the propagation policy).
    pub fn is_resyncable(&self) -> bool {
        !matches!(self, Self::Transport(_))
    }
}
