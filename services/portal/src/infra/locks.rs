//! Per-student admission locks.
//!
//! Admission reads the student's enrollment count and then writes new rows.
//! Two concurrent admissions for the same student would both see the old
//! count, so the read-decide-write section runs under a per-student async
//! lock. Locks are created on demand and pruned once nobody holds them.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Number of table entries above which idle locks are pruned on acquire.
const PRUNE_THRESHOLD: usize = 1024;

#[derive(Debug, Default)]
pub struct StudentLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl StudentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `student_id`. Released when the guard drops.
    pub async fn acquire(&self, student_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            if locks.len() >= PRUNE_THRESHOLD {
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            Arc::clone(locks.entry(student_id.to_owned()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of students with a lock entry.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
