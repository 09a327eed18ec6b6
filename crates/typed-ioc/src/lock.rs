//! Guards for the cached slot of singleton resolvers.
//!
//! [`BlockingLock`] parks the calling thread and is used from synchronous
//! call sites. [`AsyncLock`] suspends the calling task instead, so tasks
//! waiting on an in-flight async build do not tie up runtime workers.

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard};

#[derive(Debug, Default)]
pub struct BlockingLock<T> {
    inner: Mutex<T>,
}

impl<T> BlockingLock<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Runs `body` with exclusive access to the guarded value.
    ///
    /// The lock is released when `body` returns or unwinds.
    pub fn with_lock<R, F>(&self, body: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.inner.lock();
        body(&mut guard)
    }
}

/// Task-aware mutual exclusion.
///
/// Waiters are queued and woken in FIFO order when the holder drops its
/// guard.
#[derive(Debug, Default)]
pub struct AsyncLock<T> {
    inner: AsyncMutex<T>,
}

impl<T> AsyncLock<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: AsyncMutex::new(value),
        }
    }

    pub async fn lock(&self) -> AsyncMutexGuard<'_, T> {
        self.inner.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn blocking_lock_is_exclusive() {
        let lock = BlockingLock::new(0_u32);
        let inside = AtomicUsize::new(0);

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..50 {
                        lock.with_lock(|n| {
                            assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);
                            *n += 1;
                            inside.fetch_sub(1, Ordering::SeqCst);
                        });
                    }
                });
            }
        });

        assert_eq!(lock.with_lock(|n| *n), 400);
    }

    #[test]
    fn blocking_lock_released_after_panic() {
        let lock = BlockingLock::new(1_u32);

        let result = catch_unwind(AssertUnwindSafe(|| {
            lock.with_lock(|_| panic!("boom"));
        }));
        assert!(result.is_err());

        assert_eq!(lock.with_lock(|n| *n + 1), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn async_lock_is_exclusive() {
        let lock = Arc::new(AsyncLock::new(0_u32));
        let inside = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let lock = lock.clone();
                let inside = inside.clone();
                tokio::spawn(async move {
                    let mut guard = lock.lock().await;
                    assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    *guard += 1;
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for result in futures::future::join_all(tasks).await {
            result.unwrap();
        }

        assert_eq!(*lock.lock().await, 16);
    }
}
