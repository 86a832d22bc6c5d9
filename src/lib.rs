//! ASTERIX (EUROCONTROL surveillance data exchange) encoder/decoder.
//!
//! A [`Uap`](uap::Uap) describes one Category's ordered Data Items; a
//! [`Record`](record::Record) holds one target report's worth of items
//! against a UAP; a [`DataBlock`](data_block::DataBlock) is the wire-level
//! container of Records sharing one Category header. [`Decoder`] and
//! [`Encoder`] sit on top for single-shot, batched, and streaming use.

pub mod config;
pub mod data_block;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod fspec;
pub mod fx_chain;
pub mod item_kind;
pub mod items;
pub mod pool;
pub mod record;
pub mod schema;
pub mod uap;
pub mod value;

pub use config::Config;
pub use data_block::DataBlock;
pub use decoder::{Decoder, StreamControl};
pub use encoder::Encoder;
pub use error::{AsterixError, DecodeContext, Result};
pub use record::Record;
pub use uap::{FieldDescriptor, LayoutKind, Uap};
pub use value::DataItemCodec;
