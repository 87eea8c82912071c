#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

use core::{fmt, ops::Range};
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use std::sync::Arc;

/// Configuration for a [`WorkerPool`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker threads. `None` selects the hardware concurrency.
    pub num_threads: Option<usize>,
}

impl PoolConfig {
    /// Configuration with an explicit worker count.
    pub const fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }
}

/// Number of hardware threads available to this process, at least one.
pub fn hardware_concurrency() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

/// Error returned when the underlying thread pool could not be started.
#[derive(Debug)]
pub struct BuildError(rayon::ThreadPoolBuildError);

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to start worker pool: {}", self.0)
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Fork-join pool of worker threads.
///
/// Cloning is cheap: clones share the same threads. Every operation splits its
/// index space into at most [`WorkerPool::num_threads`] contiguous chunks and
/// returns only once all chunks have completed.
#[derive(Clone, Debug)]
pub struct WorkerPool {
    inner: Arc<rayon::ThreadPool>,
    num_threads: usize,
}

static GLOBAL: OnceCell<WorkerPool> = OnceCell::new();

impl WorkerPool {
    /// Start a pool according to `config`.
    pub fn new(config: PoolConfig) -> Result<Self, BuildError> {
        let num_threads = config
            .num_threads
            .unwrap_or_else(hardware_concurrency)
            .max(1);

        let inner = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("workpool-{i}"))
            .build()
            .map_err(BuildError)?;

        tracing::debug!(num_threads, "worker pool started");

        Ok(Self {
            inner: Arc::new(inner),
            num_threads,
        })
    }

    /// Pool with exactly one worker. Operations run their chunks one after another.
    pub fn single_threaded() -> Result<Self, BuildError> {
        Self::new(PoolConfig::with_threads(1))
    }

    /// Process-wide pool sized to the hardware concurrency, started on first use.
    pub fn global() -> Result<&'static Self, BuildError> {
        GLOBAL.get_or_try_init(|| Self::new(PoolConfig::default()))
    }

    /// Number of worker threads.
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Run `op` inside the pool so that nested parallel iterators use its threads.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.inner.install(op)
    }

    /// Run both closures, potentially in parallel, and return both results.
    pub fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        self.inner.install(|| rayon::join(a, b))
    }

    /// Partition `0..n` into one chunk per worker.
    pub fn ranges(&self, n: usize) -> Vec<Range<usize>> {
        chunk_ranges(n, self.num_threads)
    }

    /// Invoke `f` once per chunk of `0..n`. Returns after every chunk is done.
    pub fn parallel_for<F>(&self, n: usize, f: F)
    where
        F: Fn(Range<usize>) + Send + Sync,
    {
        let ranges = self.ranges(n);
        match ranges.len() {
            0 => {}
            1 => f(0..n),
            _ => self.install(|| ranges.into_par_iter().for_each(&f)),
        }
    }

    /// Compute one result per chunk of `0..n`, returned in chunk order.
    pub fn map_chunks<R, F>(&self, n: usize, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(Range<usize>) -> R + Send + Sync,
    {
        let ranges = self.ranges(n);
        match ranges.len() {
            0 => Vec::new(),
            1 => vec![f(0..n)],
            _ => self.install(|| ranges.into_par_iter().map(&f).collect()),
        }
    }

    /// Hand each worker a disjoint mutable chunk of `data` along with the index
    /// of its first element.
    pub fn for_each_chunk_mut<T, F>(&self, data: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        self.for_each_record_chunk_mut(data, 1, f)
    }

    /// Like [`WorkerPool::for_each_chunk_mut`] but over fixed-width records of
    /// `stride` items each, so no record straddles two chunks. The offset passed
    /// to `f` is the index of the chunk's first record.
    ///
    /// # Panics
    ///
    /// If `stride` is zero or does not divide `data.len()`.
    pub fn for_each_record_chunk_mut<T, F>(&self, data: &mut [T], stride: usize, f: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        assert!(stride != 0 && data.len() % stride == 0, "misaligned records");

        let ranges = self.ranges(data.len() / stride);
        if ranges.len() <= 1 {
            if !data.is_empty() {
                f(0, data);
            }
            return;
        }

        let mut chunks = Vec::with_capacity(ranges.len());
        let mut rest = data;
        for range in &ranges {
            let (head, tail) = core::mem::take(&mut rest)
                .split_at_mut(range.len() * stride);
            chunks.push((range.start, head));
            rest = tail;
        }

        self.install(|| {
            chunks
                .into_par_iter()
                .for_each(|(offset, chunk)| f(offset, chunk))
        });
    }

    /// Walk two equally long slices in lockstep, handing each worker the same
    /// index range of both.
    ///
    /// # Panics
    ///
    /// If the slices differ in length.
    pub fn for_each_zip_chunk_mut<T, F>(&self, a: &mut [T], b: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut [T], &mut [T]) + Send + Sync,
    {
        assert_eq!(a.len(), b.len(), "slices differ in length");

        let ranges = self.ranges(a.len());
        if ranges.len() <= 1 {
            if !a.is_empty() {
                f(0, a, b);
            }
            return;
        }

        let mut chunks = Vec::with_capacity(ranges.len());
        let (mut rest_a, mut rest_b) = (a, b);
        for range in &ranges {
            let (head_a, tail_a) = core::mem::take(&mut rest_a).split_at_mut(range.len());
            let (head_b, tail_b) = core::mem::take(&mut rest_b).split_at_mut(range.len());
            chunks.push((range.start, head_a, head_b));
            rest_a = tail_a;
            rest_b = tail_b;
        }

        self.install(|| {
            chunks
                .into_par_iter()
                .for_each(|(offset, a, b)| f(offset, a, b))
        });
    }
}

/// Split `0..n` into at most `parts` contiguous, non-empty ranges whose lengths
/// differ by at most one. The first `n % parts` ranges carry the extra element.
///
/// Returns no ranges when `n` is zero.
pub fn chunk_ranges(n: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.clamp(1, n.max(1));
    if n == 0 {
        return Vec::new();
    }

    let base = n / parts;
    let rem = n % parts;
    let mut start = 0;

    (0..parts)
        .map(|i| {
            let len = base + usize::from(i < rem);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}
