//! Bounded conversation memory

use std::collections::VecDeque;
use std::fmt;

/// Number of turns kept per conversation
pub const MEMORY_CAPACITY: usize = 5;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Ai,
}

impl Speaker {
    fn tag(self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Ai => "AI",
        }
    }
}

/// A single tagged entry in the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.speaker.tag(), self.text)
    }
}

/// Ring buffer of the most recent conversation turns.
///
/// Appending past capacity evicts the oldest turn, so `len()` never
/// exceeds the capacity given at construction.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::with_capacity(MEMORY_CAPACITY)
    }

    /// Capacity is clamped to at least one turn
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(Turn {
            speaker,
            text: text.into(),
        });
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(Speaker::User, text);
    }

    pub fn push_ai(&mut self, text: impl Into<String>) {
        self.push(Speaker::Ai, text);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Newline-joined `User:`/`AI:` transcript, oldest first
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(Turn::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_exceeds_capacity() {
        let mut memory = ConversationMemory::new();
        for i in 0..23 {
            if i % 2 == 0 {
                memory.push_user(format!("question {i}"));
            } else {
                memory.push_ai(format!("answer {i}"));
            }
            assert!(memory.len() <= MEMORY_CAPACITY);
        }
        assert_eq!(memory.len(), MEMORY_CAPACITY);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut memory = ConversationMemory::with_capacity(2);
        memory.push_user("one");
        memory.push_ai("two");
        memory.push_user("three");

        let texts: Vec<&str> = memory.turns().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["two", "three"]);
    }

    #[test]
    fn transcript_is_tagged() {
        let mut memory = ConversationMemory::new();
        memory.push_user("Do I have a cold?");
        memory.push_ai("Possibly.");
        assert_eq!(memory.transcript(), "User: Do I have a cold?\nAI: Possibly.");
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut memory = ConversationMemory::with_capacity(0);
        memory.push_user("a");
        memory.push_user("b");
        assert_eq!(memory.capacity(), 1);
        assert_eq!(memory.transcript(), "User: b");
    }
}
