//! Bounded worker pool for the parallel algorithm variants.
//!
//! A pool is created per call with exactly `worker_count` threads and every
//! task spawned through it is joined before the call returns, so no worker
//! outlives the algorithm that started it.

use parking_lot::Mutex;
use tracing::debug;

use crate::{GraphError, Result};

/// Per-call worker pool backed by a dedicated rayon thread pool.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Build a pool with `worker_count` threads.
    pub fn new(worker_count: usize) -> Result<Self> {
        if worker_count == 0 {
            return Err(GraphError::InvalidWorkerCount(worker_count));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|i| format!("graph-worker-{}", i))
            .build()
            .map_err(|e| GraphError::WorkerPool(e.to_string()))?;

        debug!("Created worker pool (workers={})", worker_count);

        Ok(Self {
            pool,
            workers: worker_count,
        })
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `op` inside a scope on this pool.
    ///
    /// Tasks spawned on the scope may borrow from the caller; all of them have
    /// finished when this returns.
    pub fn scope<'scope, OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce(&rayon::Scope<'scope>) -> R + Send,
        R: Send,
    {
        self.pool.scope(op)
    }

    /// Run one fallible task per partition and collect results in partition order.
    ///
    /// Every task is joined before the first error (in partition order) is
    /// returned.
    pub fn map_partitions<P, T, F>(&self, partitions: Vec<P>, task: F) -> Result<Vec<T>>
    where
        P: Send,
        T: Send,
        F: Fn(P) -> Result<T> + Sync,
    {
        let slots: Vec<Mutex<Option<Result<T>>>> =
            partitions.iter().map(|_| Mutex::new(None)).collect();

        self.pool.scope(|s| {
            for (partition, slot) in partitions.into_iter().zip(&slots) {
                let task = &task;
                s.spawn(move |_| {
                    *slot.lock() = Some(task(partition));
                });
            }
        });

        slots
            .into_iter()
            .map(|slot| {
                slot.into_inner()
                    .unwrap_or_else(|| Err(GraphError::WorkerPool("task did not run".to_string())))
            })
            .collect()
    }
}

/// Split `0..len` into at most `parts` contiguous, nearly equal ranges.
pub fn partition_ranges(len: usize, parts: usize) -> Vec<std::ops::Range<usize>> {
    if len == 0 || parts == 0 {
        return Vec::new();
    }
    let parts = parts.min(len);
    let base = len / parts;
    let extra = len % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}
