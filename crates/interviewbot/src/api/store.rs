use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use interviewbot_core::InterviewSession;

pub type SharedSession = Arc<Mutex<InterviewSession>>;

struct Entry {
    session: SharedSession,
    last_access: Instant,
}

/// In-memory sessions for the web renderer.
///
/// Each session sits behind its own async mutex, held for the whole of a turn,
/// so requests against one session run one at a time while other sessions
/// proceed independently. A session ends when the page deletes it or when it
/// has been idle longer than the configured timeout.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Entry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh session and return its id
    pub fn create(&self) -> String {
        let session = InterviewSession::new();
        let id = session.id.clone();
        self.write().insert(
            id.clone(),
            Entry {
                session: Arc::new(Mutex::new(session)),
                last_access: Instant::now(),
            },
        );
        id
    }

    /// Look up a session and mark it as active
    pub fn get(&self, id: &str) -> Option<SharedSession> {
        self.write().get_mut(id).map(|entry| {
            entry.last_access = Instant::now();
            entry.session.clone()
        })
    }

    /// End a session. Returns false if it did not exist.
    pub fn remove(&self, id: &str) -> bool {
        self.write().remove(id).is_some()
    }

    /// Drop sessions idle for at least `max_idle` and return how many went.
    ///
    /// Sessions still held by an in-flight request are kept.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.write();
        let before = sessions.len();
        sessions.retain(|_, entry| {
            Arc::strong_count(&entry.session) > 1
                || now.duration_since(entry.last_access) < max_idle
        });
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        // A poisoned map is still structurally valid
        self.sessions.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.sessions.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new();
        let id = store.create();

        let session = store.get(&id).unwrap();
        assert_eq!(session.lock().await.id, id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_unknown() {
        let store = SessionStore::new();
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_sessions_are_distinct() {
        let store = SessionStore::new();
        let a = store.create();
        let b = store.create();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove() {
        let store = SessionStore::new();
        let id = store.create();

        assert!(store.remove(&id));
        assert!(store.get(&id).is_none());
        assert!(!store.remove(&id));
    }

    #[test]
    fn test_many_page_loads_do_not_accumulate() {
        let store = SessionStore::new();
        for _ in 0..1000 {
            store.create();
        }
        assert_eq!(store.len(), 1000);

        assert_eq!(store.evict_idle(Duration::ZERO), 1000);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_evict_keeps_recent_sessions() {
        let store = SessionStore::new();
        let id = store.create();

        assert_eq!(store.evict_idle(Duration::from_secs(3600)), 0);
        assert!(store.get(&id).is_some());
    }

    #[test]
    fn test_evict_keeps_sessions_in_use() {
        let store = SessionStore::new();
        let id = store.create();
        let held = store.get(&id).unwrap();

        assert_eq!(store.evict_idle(Duration::ZERO), 0);
        drop(held);
        assert_eq!(store.evict_idle(Duration::ZERO), 1);
    }
}
