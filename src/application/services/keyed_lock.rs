//! Per-key async locks
//!
//! Each key gets its own mutex so that load, mutate, store sequences on
//! one record never interleave, while different records proceed in parallel.
//! An entry lives only while a guard or waiter holds it.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard as StdMutexGuard};

use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap<K> = Arc<StdMutex<HashMap<K, Arc<Mutex<()>>>>>;

pub struct KeyedLocks<K> {
    locks: LockMap<K>,
}

/// Exclusive access to one key; the key's entry is pruned on drop when
/// nobody else is waiting for it
pub struct KeyGuard<K: Eq + Hash> {
    guard: Option<OwnedMutexGuard<()>>,
    key: K,
    locks: LockMap<K>,
}

fn lock_map<K>(locks: &LockMap<K>) -> StdMutexGuard<'_, HashMap<K, Arc<Mutex<()>>>> {
    // A poisoned map is still consistent
    match locks.lock() {
        Ok(map) => map,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Copy,
{
    pub fn new() -> Self {
        Self {
            locks: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    /// Wait for exclusive access to `key`; released when the guard drops
    pub async fn lock(&self, key: K) -> KeyGuard<K> {
        let lock = {
            let mut locks = lock_map(&self.locks);
            locks
                .entry(key)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        KeyGuard {
            guard: Some(lock.lock_owned().await),
            key,
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<K> Default for KeyedLocks<K>
where
    K: Eq + Hash + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> Drop for KeyGuard<K> {
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = lock_map(&self.locks);
        if locks
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn entries<K>(locks: &KeyedLocks<K>) -> usize {
        lock_map(&locks.locks).len()
    }

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = Arc::new(KeyedLocks::new());
        let guard = locks.lock(1u32).await;

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.lock(1u32).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
        assert_eq!(entries(&locks), 0);
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyedLocks::new();
        let _a = locks.lock(1u32).await;
        let _b = locks.lock(2u32).await;
        assert_eq!(entries(&locks), 2);
    }

    #[tokio::test]
    async fn test_entries_are_pruned_after_release() {
        let locks = KeyedLocks::new();
        for key in 0..100u32 {
            let _guard = locks.lock(key).await;
        }
        assert_eq!(entries(&locks), 0);

        let held = locks.lock(7u32).await;
        assert_eq!(entries(&locks), 1);
        drop(held);
        assert_eq!(entries(&locks), 0);
    }
}
