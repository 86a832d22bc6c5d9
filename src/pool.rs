//! Size-classed buffer pool (§4.9, §9).
//!
//! Pools earn their keep only in the hot encode/decode path. `get` hands out
//! an exclusive, zero-length `Vec<u8>` with at least the requested capacity;
//! the caller either returns it with `put` or lets the RAII guard's `Drop`
//! return it automatically. Buffers that escape the call boundary (e.g.
//! encoded output handed back to a user) must be copied out first —
//! `PooledBuffer::into_vec` does that copy and returns the backing buffer to
//! the pool in the same step.

use parking_lot::Mutex;

const SMALL: usize = 64;
const MEDIUM: usize = 512;
const LARGE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SizeClass {
    Small,
    Medium,
    Large,
    /// Oversize requests are never pooled; they're allocated and dropped.
    PassThrough,
}

impl SizeClass {
    fn for_capacity(capacity: usize) -> Self {
        if capacity <= SMALL {
            Self::Small
        } else if capacity <= MEDIUM {
            Self::Medium
        } else if capacity <= LARGE {
            Self::Large
        } else {
            Self::PassThrough
        }
    }

    fn capacity(self) -> usize {
        match self {
            Self::Small => SMALL,
            Self::Medium => MEDIUM,
            Self::Large => LARGE,
            Self::PassThrough => 0,
        }
    }
}

/// Thread-safe, size-classed pool of reusable byte buffers.
#[derive(Default)]
pub struct BufferPool {
    small: Mutex<Vec<Vec<u8>>>,
    medium: Mutex<Vec<Vec<u8>>>,
    large: Mutex<Vec<Vec<u8>>>,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    fn class_list(&self, class: SizeClass) -> Option<&Mutex<Vec<Vec<u8>>>> {
        match class {
            SizeClass::Small => Some(&self.small),
            SizeClass::Medium => Some(&self.medium),
            SizeClass::Large => Some(&self.large),
            SizeClass::PassThrough => None,
        }
    }

    /// Hand out an exclusively-owned, zero-length buffer with at least
    /// `capacity` bytes of backing storage.
    pub fn get(&self, capacity: usize) -> PooledBuffer<'_> {
        let class = SizeClass::for_capacity(capacity);
        let buf = self
            .class_list(class)
            .and_then(|list| list.lock().pop())
            .unwrap_or_else(|| Vec::with_capacity(class.capacity().max(capacity)));
        PooledBuffer {
            pool: self,
            class,
            buf: Some(buf),
        }
    }

    /// Return a buffer to its size class. Tolerates an already-empty or
    /// oversize buffer without panicking; calling this twice on clones of
    /// the same data is harmless (the pool has no aliasing to protect
    /// against in safe Rust, so there's nothing to double-free).
    fn put(&self, mut buf: Vec<u8>) {
        buf.clear();
        let class = SizeClass::for_capacity(buf.capacity());
        if let Some(list) = self.class_list(class) {
            list.lock().push(buf);
        }
    }
}

/// RAII guard over a pooled buffer. Derefs to `Vec<u8>`; returns itself to
/// the pool on drop unless [`PooledBuffer::into_vec`] has already taken it.
pub struct PooledBuffer<'pool> {
    pool: &'pool BufferPool,
    class: SizeClass,
    buf: Option<Vec<u8>>,
}

impl std::ops::Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;
    fn deref(&self) -> &Vec<u8> {
        self.buf.as_ref().expect("buffer taken")
    }
}

impl std::ops::DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        self.buf.as_mut().expect("buffer taken")
    }
}

impl PooledBuffer<'_> {
    /// Copy the buffer's contents out into a fresh, independent `Vec<u8>`
    /// and return the backing storage to the pool. Use this at any boundary
    /// where the bytes need to outlive the pool's ownership of the backing
    /// allocation.
    pub fn into_vec(mut self) -> Vec<u8> {
        let buf = self.buf.take().expect("buffer taken");
        let copy = buf.clone();
        self.pool.put(buf);
        let _ = self.class;
        copy
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.put(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_zero_length_with_capacity() {
        let pool = BufferPool::new();
        let buf = pool.get(100);
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 100);
    }

    #[test]
    fn reuses_returned_buffer_within_size_class() {
        let pool = BufferPool::new();
        let ptr = {
            let mut buf = pool.get(10);
            buf.extend_from_slice(b"hello");
            buf.as_ptr()
        };
        let buf2 = pool.get(10);
        assert_eq!(buf2.as_ptr(), ptr);
    }

    #[test]
    fn oversize_requests_bypass_pooling() {
        let pool = BufferPool::new();
        let buf = pool.get(1_000_000);
        assert!(buf.capacity() >= 1_000_000);
    }

    #[test]
    fn into_vec_copies_independent_of_pool() {
        let pool = BufferPool::new();
        let mut buf = pool.get(16);
        buf.extend_from_slice(&[1, 2, 3]);
        let out = buf.into_vec();
        assert_eq!(out, vec![1, 2, 3]);
    }
}
