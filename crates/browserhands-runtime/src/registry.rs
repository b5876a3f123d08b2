//! Session registry.
//!
//! Every operation takes the same lock, so admission (count check plus
//! insert) is serialized against other admissions and against removals.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::SessionError;
use crate::session::{SessionRecord, SessionSnapshot};

/// In-process store of all non-evicted sessions.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, SessionRecord>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Insert a record. Fails if its id is already tracked.
    pub fn insert(&self, record: SessionRecord) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock();
        Self::insert_locked(&mut sessions, record)
    }

    /// Insert a record only if fewer than `ceiling` sessions are tracked.
    pub fn admit(&self, record: SessionRecord, ceiling: usize) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock();
        if sessions.len() >= ceiling {
            return Err(SessionError::CapacityExceeded { max: ceiling });
        }
        Self::insert_locked(&mut sessions, record)
    }

    fn insert_locked(
        sessions: &mut HashMap<String, SessionRecord>,
        record: SessionRecord,
    ) -> Result<(), SessionError> {
        if sessions.contains_key(record.id()) {
            return Err(SessionError::Duplicate(record.id().to_string()));
        }
        sessions.insert(record.id().to_string(), record);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<SessionSnapshot, SessionError> {
        self.sessions
            .lock()
            .get(id)
            .map(SessionRecord::snapshot)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Apply `f` to a tracked record. Returns `None` if the id is absent.
    pub fn update<R>(&self, id: &str, f: impl FnOnce(&mut SessionRecord) -> R) -> Option<R> {
        self.sessions.lock().get_mut(id).map(f)
    }

    /// Remove a record. Removing an absent id is a no-op.
    pub fn remove(&self, id: &str) -> Option<SessionRecord> {
        self.sessions.lock().remove(id)
    }

    pub fn count(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Remove and return every record.
    pub fn drain(&self) -> Vec<SessionRecord> {
        self.sessions.lock().drain().map(|(_, record)| record).collect()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use browserhands_protocols::{AutomationEngine, EngineError, EngineOutcome, StepProgress};

    use crate::session::SessionStatus;

    struct IdleEngine;

    #[async_trait]
    impl AutomationEngine for IdleEngine {
        async fn execute(&self, _: u32, _: StepProgress) -> Result<EngineOutcome, EngineError> {
            Ok(EngineOutcome::empty())
        }

        async fn teardown(&self) -> Result<(), EngineError> {
            Ok(())
        }
    }

    fn record(id: &str) -> SessionRecord {
        SessionRecord::new(id, 10, Arc::new(IdleEngine))
    }

    #[test]
    fn test_insert_and_get() {
        let registry = SessionRegistry::new();
        registry.insert(record("a")).unwrap();

        let snap = registry.get("a").unwrap();
        assert_eq!(snap.id, "a");
        assert_eq!(snap.status, SessionStatus::Running);
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_insert_duplicate() {
        let registry = SessionRegistry::new();
        registry.insert(record("a")).unwrap();
        let err = registry.insert(record("a")).unwrap_err();
        assert!(matches!(err, SessionError::Duplicate(id) if id == "a"));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_get_missing() {
        let registry = SessionRegistry::new();
        assert!(matches!(registry.get("nope"), Err(SessionError::NotFound(_))));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let registry = SessionRegistry::new();
        registry.insert(record("a")).unwrap();

        assert!(registry.remove("a").is_some());
        assert!(registry.remove("a").is_none());
        assert!(registry.remove("never-existed").is_none());
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_admit_respects_ceiling() {
        let registry = SessionRegistry::new();
        registry.admit(record("a"), 2).unwrap();
        registry.admit(record("b"), 2).unwrap();

        let err = registry.admit(record("c"), 2).unwrap_err();
        assert!(matches!(err, SessionError::CapacityExceeded { max: 2 }));
        assert_eq!(registry.count(), 2);

        registry.remove("a");
        registry.admit(record("c"), 2).unwrap();
    }

    #[test]
    fn test_admit_counts_terminal_sessions() {
        let registry = SessionRegistry::new();
        registry.admit(record("a"), 1).unwrap();
        registry.update("a", |s| s.complete(None));

        assert_eq!(registry.get("a").unwrap().status, SessionStatus::Completed);
        assert!(registry.admit(record("b"), 1).is_err());
    }

    #[test]
    fn test_update_missing_returns_none() {
        let registry = SessionRegistry::new();
        assert!(registry.update("ghost", |s| s.fail("x")).is_none());
    }

    #[test]
    fn test_update_mutates_record() {
        let registry = SessionRegistry::new();
        registry.insert(record("a")).unwrap();
        assert_eq!(registry.update("a", |s| s.fail("bad")), Some(true));
        assert_eq!(registry.get("a").unwrap().error.as_deref(), Some("bad"));
    }

    #[test]
    fn test_drain() {
        let registry = SessionRegistry::new();
        registry.insert(record("a")).unwrap();
        registry.insert(record("b")).unwrap();

        let drained = registry.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_concurrent_admission_never_exceeds_ceiling() {
        let registry = Arc::new(SessionRegistry::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.admit(record(&format!("s-{}", i)), 5).is_ok())
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(admitted, 5);
        assert_eq!(registry.count(), 5);
    }
}
