//! Request routing rules
//!
//! A chat message is matched against an ordered list of rules and the first
//! match decides where it goes. Order matters: identity questions beat
//! greetings, greetings beat doctor search, and doctor search beats the
//! keyword check that selects the reasoning provider.

use crate::doctor::DoctorQuery;

/// Canned reply for questions about the assistant itself
pub const IDENTITY_REPLY: &str = "I am your AI healthcare assistant. I can answer health questions, \
explain medical topics, and help you find doctors near you.";

/// Canned reply for greetings
pub const GREETING_REPLY: &str = "Hello! How can I assist you with your health today?";

const IDENTITY_QUESTIONS: &[&str] = &["what is your name", "who are you"];

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "hi there",
    "hello there",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
];

const REASONING_KEYWORDS: &[&str] = &["explain", "how does"];

/// Destination for a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Canned self-description, no upstream call
    Identity,
    /// Canned greeting, no upstream call
    Greeting,
    /// Places lookup instead of any AI provider
    DoctorSearch(DoctorQuery),
    /// Advanced-reasoning provider
    Reasoning,
    /// General-purpose generative provider
    General,
}

impl Route {
    /// Label used in logs and metrics
    pub fn name(&self) -> &'static str {
        match self {
            Route::Identity => "identity",
            Route::Greeting => "greeting",
            Route::DoctorSearch(_) => "doctor_search",
            Route::Reasoning => "reasoning",
            Route::General => "general",
        }
    }

    /// Fixed reply for routes that never reach an upstream
    pub fn canned_reply(&self) -> Option<&'static str> {
        match self {
            Route::Identity => Some(IDENTITY_REPLY),
            Route::Greeting => Some(GREETING_REPLY),
            _ => None,
        }
    }
}

type Rule = fn(&str, &str) -> Option<Route>;

/// Rules in priority order. Each receives the raw text and its normalized form.
const RULES: &[Rule] = &[identity_rule, greeting_rule, doctor_rule, reasoning_rule];

fn identity_rule(_raw: &str, normalized: &str) -> Option<Route> {
    IDENTITY_QUESTIONS
        .contains(&normalized)
        .then_some(Route::Identity)
}

fn greeting_rule(_raw: &str, normalized: &str) -> Option<Route> {
    GREETINGS.contains(&normalized).then_some(Route::Greeting)
}

fn doctor_rule(raw: &str, _normalized: &str) -> Option<Route> {
    DoctorQuery::parse(raw).map(Route::DoctorSearch)
}

fn reasoning_rule(raw: &str, _normalized: &str) -> Option<Route> {
    let lower = raw.to_lowercase();
    REASONING_KEYWORDS
        .iter()
        .any(|k| lower.contains(k))
        .then_some(Route::Reasoning)
}

/// Decide where a raw (unformatted) chat message should go
pub fn route(raw: &str) -> Route {
    let normalized = normalize(raw);
    RULES
        .iter()
        .find_map(|rule| rule(raw, &normalized))
        .unwrap_or(Route::General)
}

/// Lowercase, collapse whitespace and strip trailing punctuation
fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .trim_end_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_questions_are_exact_matches() {
        assert_eq!(route("What is your name?"), Route::Identity);
        assert_eq!(route("  who   are YOU "), Route::Identity);
        assert_eq!(route("who are you treating today").name(), "general");
    }

    #[test]
    fn greetings_are_canned() {
        for text in ["hi", "Hello!", "good morning", "Hey."] {
            assert_eq!(route(text), Route::Greeting);
        }
        assert_eq!(Route::Greeting.canned_reply(), Some(GREETING_REPLY));
    }

    #[test]
    fn punctuation_after_a_space_is_ignored() {
        assert_eq!(route("who are you ?"), Route::Identity);
        assert_eq!(route("hello :)"), Route::Greeting);
        assert_eq!(route("hi !!"), Route::Greeting);
    }

    #[test]
    fn greeting_inside_question_is_not_canned() {
        assert_eq!(route("hi, what is a migraine"), Route::General);
    }

    #[test]
    fn doctor_search_detected() {
        match route("find a cardiologist in Delhi") {
            Route::DoctorSearch(query) => {
                assert_eq!(query.specialty, "cardiologist");
                assert_eq!(query.location.as_deref(), Some("Delhi"));
            }
            other => panic!("expected doctor search, got {other:?}"),
        }
    }

    #[test]
    fn doctor_search_beats_reasoning_keywords() {
        let decided = route("find a doctor in Pune and explain what they do");
        assert_eq!(decided.name(), "doctor_search");
    }

    #[test]
    fn reasoning_keywords_select_reasoning_provider() {
        assert_eq!(route("Explain how vaccines work"), Route::Reasoning);
        assert_eq!(route("How does insulin lower blood sugar"), Route::Reasoning);
    }

    #[test]
    fn everything_else_is_general() {
        assert_eq!(route("what causes a fever"), Route::General);
        assert_eq!(route(""), Route::General);
        assert_eq!(Route::General.canned_reply(), None);
    }
}
