//! Per-session conversation memory

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use healthcare_core::ConversationMemory;
use parking_lot::Mutex;

#[derive(Default)]
struct Sessions {
    memories: HashMap<String, ConversationMemory>,
    /// Keys in creation order, oldest first
    order: VecDeque<String>,
}

/// Conversation memories keyed by session identifier.
///
/// Holds at most `max_sessions` conversations; creating one more evicts the
/// oldest.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Sessions>>,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Sessions::default())),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Record the user turn and return the transcript including it
    pub fn record_user(&self, key: &str, text: &str) -> String {
        let mut sessions = self.inner.lock();
        let memory = Self::entry(&mut sessions, key, self.max_sessions);
        memory.push_user(text);
        memory.transcript()
    }

    /// Record the AI turn; a session evicted since its user turn stays gone
    pub fn record_ai(&self, key: &str, text: &str) {
        if let Some(memory) = self.inner.lock().memories.get_mut(key) {
            memory.push_ai(text);
        }
    }

    /// Snapshot of a session's transcript, empty if unknown
    pub fn transcript(&self, key: &str) -> String {
        self.inner
            .lock()
            .memories
            .get(key)
            .map(ConversationMemory::transcript)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry<'a>(
        sessions: &'a mut Sessions,
        key: &str,
        max_sessions: usize,
    ) -> &'a mut ConversationMemory {
        if !sessions.memories.contains_key(key) {
            while sessions.memories.len() >= max_sessions {
                let Some(oldest) = sessions.order.pop_front() else {
                    break;
                };
                sessions.memories.remove(&oldest);
                tracing::debug!(session = %oldest, "Evicted conversation");
            }
            sessions.order.push_back(key.to_string());
        }
        sessions.memories.entry(key.to_string()).or_default()
    }
}
