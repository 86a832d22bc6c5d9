//! Single-block and batched encode (§4.8).

use crate::config::Config;
use crate::data_block::DataBlock;
use crate::error::{AsterixError, DecodeContext, Result};
use crate::pool::BufferPool;
use crate::record::Record;
use crate::uap::Uap;
use crate::value::DataItemCodec;
use parking_lot::Mutex;
use std::io::Write;

const HEADER_LEN: usize = 3;

struct BatchState<'uap> {
    uap: &'uap Uap,
    block: DataBlock<'uap>,
}

/// Constructs Data Blocks into a pooled buffer, with an optional running
/// batch for building up a block across several calls. Batch state is
/// mutex-guarded so concurrent `add_to_batch` calls are serialisable, though
/// the intended usage is a single producer (§5 Shared Resources).
pub struct Encoder<'uap> {
    pool: BufferPool,
    config: Config,
    batch: Mutex<Option<BatchState<'uap>>>,
}

impl<'uap> Encoder<'uap> {
    pub fn new(config: Config) -> Self {
        Self {
            pool: BufferPool::new(),
            config,
            batch: Mutex::new(None),
        }
    }

    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    /// Encode a single, already-built Data Block, routing the intermediate
    /// buffer through the pool.
    pub fn encode_single(&self, block: &DataBlock<'uap>) -> Result<Vec<u8>> {
        self.encode_block_pooled(block)
    }

    fn encode_block_pooled(&self, block: &DataBlock<'uap>) -> Result<Vec<u8>> {
        let mut pooled = self.pool.get(block.estimate_size());
        pooled.push(block.category());
        pooled.extend_from_slice(&[0u8, 0u8]);
        for record in block.records() {
            record.encode(&mut pooled)?;
        }
        let len = pooled.len() as u16;
        pooled[1] = (len >> 8) as u8;
        pooled[2] = (len & 0xFF) as u8;
        Ok(pooled.into_vec())
    }

    /// Establish batch context: subsequent `add_to_batch` calls build Records
    /// into a shared Data Block against `uap` until `finish_batch`.
    pub fn start_batch(&self, uap: &'uap Uap) {
        *self.batch.lock() = Some(BatchState {
            uap,
            block: DataBlock::new(uap),
        });
    }

    /// Construct a Record from `items` and append it to the running batch.
    pub fn add_to_batch(&self, items: Vec<(String, Box<dyn DataItemCodec>)>) -> Result<()> {
        let mut guard = self.batch.lock();
        let state = guard.as_mut().ok_or_else(|| {
            AsterixError::invalid_message("no active batch; call start_batch first", DecodeContext::default())
        })?;
        let mut record = Record::new(state.uap);
        for (item_id, codec) in items {
            record.set_data_item(&item_id, codec)?;
        }
        state.block.add_record(record)
    }

    /// Encode and clear the running batch.
    pub fn finish_batch(&self) -> Result<Vec<u8>> {
        let state = self.batch.lock().take().ok_or_else(|| {
            AsterixError::invalid_message("no active batch; call start_batch first", DecodeContext::default())
        })?;
        self.encode_block_pooled(&state.block)
    }

    /// Encode `records` into one or more Data Blocks, flushing to `writer`
    /// whenever the running block would exceed `Config::max_block_size`, or
    /// after every Record for a non-blockable Category (§4.8).
    pub fn encode_stream<W: Write>(
        &self,
        writer: &mut W,
        uap: &'uap Uap,
        records: impl IntoIterator<Item = Record<'uap>>,
    ) -> Result<usize> {
        let mut current = DataBlock::new(uap);
        let mut current_size = HEADER_LEN;
        let mut total_written = 0usize;

        for record in records {
            let mut scratch = Vec::new();
            let record_len = record.encode(&mut scratch)?;

            if !current.records().is_empty() && current_size + record_len > self.config.max_block_size {
                total_written += self.flush(writer, &current)?;
                current = DataBlock::new(uap);
                current_size = HEADER_LEN;
            }

            current.add_record(record)?;
            current_size += record_len;

            if !uap.blockable {
                total_written += self.flush(writer, &current)?;
                current = DataBlock::new(uap);
                current_size = HEADER_LEN;
            }
        }

        if !current.records().is_empty() {
            total_written += self.flush(writer, &current)?;
        }
        Ok(total_written)
    }

    fn flush<W: Write>(&self, writer: &mut W, block: &DataBlock<'uap>) -> Result<usize> {
        let bytes = self.encode_block_pooled(block)?;
        writer.write_all(&bytes).map_err(AsterixError::Transport)?;
        log::debug!("flushed data block: category {}, {} byte(s)", block.category(), bytes.len());
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::data_source_identifier::DataSourceIdentifier;
    use crate::uap::{FieldDescriptor, LayoutKind};
    use std::collections::HashMap;

    fn test_uap(blockable: bool) -> Uap {
        let fields = vec![FieldDescriptor {
            frn: 1,
            item_id: "I020/010".into(),
            layout: LayoutKind::Fixed { len: 2 },
            mandatory: true,
            description: "Data Source Identifier",
        }];
        let mut factory: HashMap<String, crate::value::ItemConstructor> = HashMap::new();
        factory.insert("I020/010".into(), || Box::<DataSourceIdentifier>::default());
        Uap::new(20, "test", blockable, fields, factory, None)
    }

    #[test]
    fn batch_roundtrip() {
        let uap = test_uap(true);
        let encoder = Encoder::new(Config::default());
        encoder.start_batch(&uap);
        encoder
            .add_to_batch(vec![("I020/010".to_string(), Box::new(DataSourceIdentifier::new(1, 2)))])
            .unwrap();
        encoder
            .add_to_batch(vec![("I020/010".to_string(), Box::new(DataSourceIdentifier::new(3, 4)))])
            .unwrap();
        let bytes = encoder.finish_batch().unwrap();

        let decoded = DataBlock::decode(&bytes, &uap).unwrap();
        assert_eq!(decoded.records().len(), 2);
    }

    #[test]
    fn non_blockable_forces_flush_per_record() {
        let uap = test_uap(false);
        let encoder = Encoder::new(Config::default());
        let mut out = Vec::new();
        let records = vec![
            {
                let mut r = Record::new(&uap);
                r.set_data_item("I020/010", Box::new(DataSourceIdentifier::new(1, 2))).unwrap();
                r
            },
            {
                let mut r = Record::new(&uap);
                r.set_data_item("I020/010", Box::new(DataSourceIdentifier::new(3, 4))).unwrap();
                r
            },
        ];
        encoder.encode_stream(&mut out, &uap, records).unwrap();

        // Two separate Data Blocks, each with exactly one record.
        let first_len = u16::from_be_bytes([out[1], out[2]]) as usize;
        let first = DataBlock::decode(&out[..first_len], &uap).unwrap();
        assert_eq!(first.records().len(), 1);
        let second = DataBlock::decode(&out[first_len..], &uap).unwrap();
        assert_eq!(second.records().len(), 1);
    }
}
