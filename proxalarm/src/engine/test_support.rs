//! Fakes shared by engine unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::dispatch::{AlertDispatcher, AlertRequest, DispatchError};
use crate::store::{BoxFuture, KeyValueStore, MemoryStore, StoreError};

/// Memory store whose reads and writes can be made to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Write attempts, failed ones included.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.peek(key)
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<String>, StoreError>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Box::pin(async { Err(StoreError::Unavailable("reads disabled".into())) });
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: String) -> BoxFuture<'_, Result<(), StoreError>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Box::pin(async { Err(StoreError::Unavailable("writes disabled".into())) });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> BoxFuture<'_, Result<bool, StoreError>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Box::pin(async { Err(StoreError::Unavailable("writes disabled".into())) });
        }
        self.inner.remove(key)
    }
}

/// Dispatcher that counts alerts and can fail or hang on demand.
#[derive(Debug, Default)]
pub struct CountingDispatcher {
    count: AtomicUsize,
    fail_next: AtomicBool,
    stall: AtomicBool,
}

impl CountingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts accepted so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn stall(&self, stall: bool) {
        self.stall.store(stall, Ordering::SeqCst);
    }
}

impl AlertDispatcher for CountingDispatcher {
    fn dispatch(&self, _alert: AlertRequest) -> BoxFuture<'_, Result<(), DispatchError>> {
        Box::pin(async move {
            if self.stall.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(DispatchError::Rejected("permission denied".into()));
            }
            self.count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}
