use super::models::OptionChainSnapshot;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Time-boxed memo of the last successful option chain fetch
///
/// Shared by reference between callers; holds at most one snapshot.
#[derive(Debug)]
pub struct SnapshotCache {
    ttl: Duration,
    entry: RwLock<Option<(OptionChainSnapshot, Instant)>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached snapshot if it is younger than the TTL
    pub fn get(&self) -> Option<OptionChainSnapshot> {
        self.get_at(Instant::now())
    }

    pub fn get_at(&self, now: Instant) -> Option<OptionChainSnapshot> {
        let entry = self.entry.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        match entry.as_ref() {
            Some((snapshot, cached_at)) if now.saturating_duration_since(*cached_at) < self.ttl => {
                Some(snapshot.clone())
            }
            _ => None,
        }
    }

    pub fn insert(&self, snapshot: OptionChainSnapshot) {
        self.insert_at(snapshot, Instant::now());
    }

    pub fn insert_at(&self, snapshot: OptionChainSnapshot, now: Instant) {
        let mut entry = self.entry.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *entry = Some((snapshot, now));
    }

    pub fn clear(&self) {
        let mut entry = self.entry.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *entry = None;
    }
}
