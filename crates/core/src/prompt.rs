//! Prompt formatting heuristics
//!
//! Bare inputs (numbers, dates, names) give the model very little to work
//! with, so they are rewritten into full questions before dispatch.

use std::sync::LazyLock;

use regex::Regex;

/// Prompt sent when the user submits nothing
pub const EMPTY_PROMPT: &str = "Hello! How can I assist you today?";

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}[/.-]\d{1,2}[/.-]\d{4}$").expect("valid date regex"));

const PREAMBLE: &str = "You are a highly intelligent healthcare assistant. You provide \
detailed, accurate answers related to health. You also answer general \
questions to the best of your ability.";

/// Rewrite raw user input into a better-contextualized prompt.
///
/// Rules are checked in order: empty input, digits only, a `d/m/yyyy`-style
/// date, then exactly two capitalized words. Anything else is returned
/// trimmed but otherwise unchanged.
pub fn format_prompt(raw: &str) -> String {
    let text = raw.trim();

    if text.is_empty() {
        return EMPTY_PROMPT.to_string();
    }

    if text.chars().all(char::is_numeric) {
        return format!("What can you tell me about the number {text}?");
    }

    if DATE_PATTERN.is_match(text) {
        return format!("What is special about the date {text}?");
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() == 2
        && words
            .iter()
            .all(|w| w.chars().next().is_some_and(char::is_uppercase))
    {
        return format!("Who is {text}? Can you provide more details?");
    }

    text.to_string()
}

/// Assemble the final provider prompt from conversation history and the
/// formatted question.
pub fn build_final_prompt(history: &str, formatted: &str) -> String {
    if history.is_empty() {
        return format!("{PREAMBLE}\n\nNow answer this question:\n{formatted}");
    }

    format!(
        "{PREAMBLE} Here is the conversation so far:\n\n{history}\n\nNow answer this question:\n{formatted}"
    )
}
