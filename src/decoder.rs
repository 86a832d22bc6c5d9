//! Single-shot, streaming, and parallel decode (§4.7, §5).

use crate::config::Config;
use crate::data_block::DataBlock;
use crate::error::{AsterixError, DecodeContext, Result};
use crate::uap::Uap;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

const HEADER_LEN: usize = 3;

/// What a streaming callback wants to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamControl {
    Continue,
    Stop,
}

enum FrameAttempt {
    /// A complete frame of this many bytes is sitting at the front of the buffer.
    Complete(usize),
    /// Not enough bytes buffered yet to tell.
    Incomplete,
    /// The header is structurally invalid; resync should skip a byte.
    Malformed(AsterixError),
}

/// Holds the Category → UAP registry and the shared buffer pool. Not itself
/// required to be safe for concurrent use (§5): callers instantiate one per
/// task or wrap it in external mutual exclusion.
pub struct Decoder {
    uaps: HashMap<u8, Arc<Uap>>,
    pool: crate::pool::BufferPool,
    config: Config,
}

impl Decoder {
    pub fn new(config: Config) -> Self {
        Self {
            uaps: HashMap::new(),
            pool: crate::pool::BufferPool::new(),
            config,
        }
    }

    /// Construct a decoder preloaded with the given UAPs.
    pub fn with_uaps(config: Config, uaps: impl IntoIterator<Item = Arc<Uap>>) -> Self {
        let mut decoder = Self::new(config);
        for uap in uaps {
            decoder.register_uap(uap);
        }
        decoder
    }

    pub fn register_uap(&mut self, uap: Arc<Uap>) {
        self.uaps.insert(uap.category, uap);
    }

    pub fn pool(&self) -> &crate::pool::BufferPool {
        &self.pool
    }

    fn lookup_uap(&self, category: u8, context: &DecodeContext) -> Result<&Uap> {
        self.uaps
            .get(&category)
            .map(|arc| arc.as_ref())
            .ok_or_else(|| AsterixError::UnknownCategory {
                category,
                context: context.clone(),
            })
    }

    /// Decode a single Data Block; `data` must begin with its header.
    pub fn decode(&self, data: &[u8]) -> Result<DataBlock<'_>> {
        let context = DecodeContext::new(data.len());
        if data.is_empty() {
            return Err(AsterixError::buffer_too_short(HEADER_LEN, 0, context));
        }
        let uap = self.lookup_uap(data[0], &context)?;
        DataBlock::decode(data, uap)
    }

    /// Decode each of `frames` independently across a bounded worker pool,
    /// preserving input order in the output (rayon's indexed parallel
    /// iterator collects positionally, so no explicit index bookkeeping is
    /// needed — each worker writes to its own slot).
    pub fn decode_parallel<'s>(&'s self, frames: &[&[u8]]) -> Vec<Result<DataBlock<'s>>> {
        use rayon::prelude::*;
        let decode_all = || frames.par_iter().map(|frame| self.decode(frame)).collect();
        match self.config.parallelism {
            Some(workers) => rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .expect("failed to build rayon thread pool")
                .install(decode_all),
            None => decode_all(),
        }
    }

    fn peek_frame(&self, buf: &[u8]) -> FrameAttempt {
        if buf.len() < HEADER_LEN {
            return FrameAttempt::Incomplete;
        }
        let context = DecodeContext::new(buf.len());
        let category = buf[0];
        if self.lookup_uap(category, &context).is_err() {
            return FrameAttempt::Malformed(AsterixError::UnknownCategory { category, context });
        }
        let declared = u16::from_be_bytes([buf[1], buf[2]]) as usize;
        if declared < HEADER_LEN {
            return FrameAttempt::Malformed(AsterixError::InvalidLength {
                declared,
                consumed: 0,
                context,
            });
        }
        if buf.len() < declared {
            return FrameAttempt::Incomplete;
        }
        FrameAttempt::Complete(declared)
    }

    /// Read Data Blocks from `reader` until EOF or the callback asks to
    /// stop. On a malformed header the decoder skips one byte at a time
    /// (bounded by `Config::max_resync_skip`) and retries, reporting the
    /// skip to the callback as a single `InvalidMessage` before resuming.
    /// Returns the total number of bytes consumed from the stream.
    pub fn stream_decode<R, F>(&self, reader: &mut R, mut callback: F) -> Result<usize>
    where
        R: Read,
        F: for<'a> FnMut(std::result::Result<DataBlock<'a>, AsterixError>) -> StreamControl,
    {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let mut total_consumed = 0usize;
        let mut resync_count = 0usize;
        let mut resyncing = false;

        'stream: loop {
            loop {
                match self.peek_frame(&buf) {
                    FrameAttempt::Complete(len) => {
                        resync_count = 0;
                        resyncing = false;
                        let outcome = self.decode(&buf[..len]);
                        buf.drain(..len);
                        total_consumed += len;
                        if callback(outcome) == StreamControl::Stop {
                            break 'stream;
                        }
                    }
                    FrameAttempt::Incomplete => break,
                    FrameAttempt::Malformed(err) => {
                        if !err.is_resyncable() {
                            return Err(err);
                        }
                        resync_count += 1;
                        if resync_count > self.config.max_resync_skip {
                            return Err(err);
                        }
                        if !resyncing {
                            resyncing = true;
                            log::warn!("stream decode resyncing after malformed header: {err}");
                            if callback(Err(err)) == StreamControl::Stop {
                                break 'stream;
                            }
                        }
                        buf.drain(..1);
                        total_consumed += 1;
                    }
                }
            }

            let n = reader.read(&mut chunk).map_err(AsterixError::Transport)?;
            if n == 0 {
                if !buf.is_empty() {
                    total_consumed += buf.len();
                    callback(Err(AsterixError::invalid_message(
                        format!("stream ended with {} unconsumed byte(s)", buf.len()),
                        DecodeContext::new(buf.len()),
                    )));
                }
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        Ok(total_consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::data_source_identifier::DataSourceIdentifier;
    use crate::record::Record;
    use crate::uap::{FieldDescriptor, LayoutKind};

    fn test_uap() -> Arc<Uap> {
        let fields = vec![FieldDescriptor {
            frn: 1,
            item_id: "I020/010".into(),
            layout: LayoutKind::Fixed { len: 2 },
            mandatory: true,
            description: "Data Source Identifier",
        }];
        let mut factory: HashMap<String, crate::value::ItemConstructor> = HashMap::new();
        factory.insert("I020/010".into(), || Box::<DataSourceIdentifier>::default());
        Arc::new(Uap::new(20, "test", true, fields, factory, None))
    }

    fn encode_frame(uap: &Uap) -> Vec<u8> {
        let mut record = Record::new(uap);
        record.set_data_item("I020/010", Box::new(DataSourceIdentifier::new(1, 2))).unwrap();
        let mut block = DataBlock::new(uap);
        block.add_record(record).unwrap();
        block.encode().unwrap()
    }

    #[test]
    fn single_shot_decode() {
        let uap = test_uap();
        let mut decoder = Decoder::new(Config::default());
        decoder.register_uap(uap.clone());
        let bytes = encode_frame(&uap);
        let block = decoder.decode(&bytes).unwrap();
        assert_eq!(block.records().len(), 1);
    }

    #[test]
    fn unknown_category_fails() {
        let decoder = Decoder::new(Config::default());
        let err = decoder.decode(&[99, 0, 3]).unwrap_err();
        assert!(matches!(err, AsterixError::UnknownCategory { .. }));
    }

    #[test]
    fn decode_parallel_preserves_order() {
        let uap = test_uap();
        let mut decoder = Decoder::new(Config::default());
        decoder.register_uap(uap.clone());
        let good = encode_frame(&uap);
        let bad = vec![99u8, 0, 3];
        let frames: Vec<&[u8]> = vec![&good, &bad, &good];
        let results = decoder.decode_parallel(&frames);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn stream_resync_skips_one_garbage_byte() {
        let uap = test_uap();
        let mut decoder = Decoder::new(Config::default());
        decoder.register_uap(uap.clone());
        let frame = encode_frame(&uap);

        let mut stream = Vec::new();
        stream.extend_from_slice(&frame);
        stream.push(0xFF); // garbage byte: category 0xFF is unregistered
        stream.extend_from_slice(&frame);

        let mut oks = 0;
        let mut errs = 0;
        let consumed = decoder
            .stream_decode(&mut stream.as_slice(), |outcome| {
                match outcome {
                    Ok(_) => oks += 1,
                    Err(_) => errs += 1,
                }
                StreamControl::Continue
            })
            .unwrap();
        assert_eq!(oks, 2);
        assert_eq!(errs, 1);
        assert_eq!(consumed, stream.len());
    }
}
