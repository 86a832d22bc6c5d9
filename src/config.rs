//! Options that parameterize the engine without a file-based configuration
//! layer (§5.3 of SPEC_FULL.md — there is no deployment surface in scope,
//! so this is the library-level equivalent: an explicit, documented struct
//! the embedding application builds and passes in).

/// Tunables for [`crate::decoder::Decoder`] and [`crate::encoder::Encoder`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Worker count for `decode_parallel`. Defaults to the number of
    /// available CPUs (via rayon's global pool) when `None`.
    pub parallelism: Option<usize>,
    /// Maximum bytes a batched Data Block may grow to before
    /// `encode_stream` flushes it and starts a fresh one (§4.8).
    pub max_block_size: usize,
    /// Bounded number of single-byte skips the streaming decoder attempts
    /// before giving up and surfacing `InvalidMessage` (§4.7, §9).
    pub max_resync_skip: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parallelism: None,
            max_block_size: 4096,
            max_resync_skip: 64,
        }
    }
}

impl Config {
    pub fn with_parallelism(mut self, workers: usize) -> Self {
        self.parallelism = Some(workers);
        self
    }

    pub fn with_max_block_size(mut self, bytes: usize) -> Self {
        self.max_block_size = bytes;
        self
    }

    pub fn with_max_resync_skip(mut self, bytes: usize) -> Self {
        self.max_resync_skip = bytes;
        self
    }
}
