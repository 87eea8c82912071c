//! Contiguous storage for fixed-width records.

use crate::{Codec, Error, Result};
use core::ops::{Deref, DerefMut};
use workpool::WorkerPool;

/// Contiguous, index-addressed sequence of field elements or curve points.
///
/// In serialized form record `i` occupies bytes `[i * w, (i + 1) * w)` where
/// `w` is the [`Codec::width`] of the codec in use.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buffer<T> {
    items: Vec<T>,
}

impl<T> Buffer<T> {
    /// Empty buffer.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Empty buffer with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append a record.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Unwrap into the underlying vector.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Copy + Send + Sync> Buffer<T> {
    /// Decode `bytes` as consecutive records, in parallel.
    ///
    /// Fails with [`Error::LengthMismatch`] when `bytes` is not a whole number of
    /// records; `expected` is then the length of the longest whole-record prefix.
    /// Otherwise the first record (by index) that fails to decode determines the error.
    #[tracing::instrument(skip_all, name = "buffer::from_bytes", fields(len = bytes.len()))]
    pub fn from_bytes<C>(pool: &WorkerPool, codec: &C, bytes: &[u8]) -> Result<Self>
    where
        C: Codec<T> + Sync,
    {
        let width = codec.width();
        if width == 0 || bytes.len() % width != 0 {
            return Err(Error::LengthMismatch {
                expected: bytes.len() - bytes.len() % width.max(1),
                actual: bytes.len(),
            });
        }

        let chunks = pool.map_chunks(bytes.len() / width, |range| {
            bytes[range.start * width..range.end * width]
                .chunks_exact(width)
                .map(|record| codec.decode(record))
                .collect::<Result<Vec<T>>>()
        });

        let mut items = Vec::with_capacity(bytes.len() / width);
        for chunk in chunks {
            items.extend(chunk?);
        }
        Ok(Self { items })
    }

    /// Encode every record, in parallel, into one contiguous byte vector.
    #[tracing::instrument(skip_all, name = "buffer::to_bytes", fields(len = self.items.len()))]
    pub fn to_bytes<C>(&self, pool: &WorkerPool, codec: &C) -> Vec<u8>
    where
        C: Codec<T> + Sync,
    {
        let width = codec.width();
        let mut bytes = vec![0u8; self.items.len() * width];
        if bytes.is_empty() {
            return bytes;
        }

        pool.for_each_record_chunk_mut(&mut bytes, width, |first, chunk| {
            for (item, record) in self.items[first..].iter().zip(chunk.chunks_exact_mut(width)) {
                codec.encode(item, record);
            }
        });
        bytes
    }
}

impl<T> Deref for Buffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for Buffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> From<Vec<T>> for Buffer<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for Buffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Buffer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Buffer;
    use crate::{Error, Field, MontyField, MontyFieldElement, Uint};
    use workpool::{PoolConfig, WorkerPool};

    #[test]
    fn record_offsets() {
        let pool = WorkerPool::new(PoolConfig::with_threads(3)).unwrap();
        let field = MontyField::<1>::new(Uint::from_u64(17)).unwrap();
        let buffer: Buffer<_> = (0..10).map(|n| field.from_u64(n)).collect();

        let bytes = buffer.to_bytes(&pool, &field);
        assert_eq!(bytes.len(), 10 * 8);
        for i in 0..10 {
            assert_eq!(bytes[i * 8], i as u8);
            assert!(bytes[i * 8 + 1..(i + 1) * 8].iter().all(|&b| b == 0));
        }

        assert_eq!(Buffer::from_bytes(&pool, &field, &bytes).unwrap(), buffer);
    }

    #[test]
    fn partial_record_rejected() {
        let pool = WorkerPool::single_threaded().unwrap();
        let field = MontyField::<1>::new(Uint::from_u64(17)).unwrap();
        assert_eq!(
            Buffer::<MontyFieldElement<1>>::from_bytes(&pool, &field, &[0u8; 20]).unwrap_err(),
            Error::LengthMismatch {
                expected: 16,
                actual: 20
            }
        );
    }

    #[test]
    fn first_bad_record_reported() {
        let pool = WorkerPool::new(PoolConfig::with_threads(4)).unwrap();
        let field = MontyField::<1>::new(Uint::from_u64(17)).unwrap();
        let mut bytes = vec![0u8; 8 * 16];
        bytes[8 * 11] = 200;
        assert_eq!(
            Buffer::<MontyFieldElement<1>>::from_bytes(&pool, &field, &bytes).unwrap_err(),
            Error::InvalidEncoding
        );
    }
}
