//! healthcare-core: prompt heuristics and routing for the healthcare assistant
//!
//! This crate holds the pure logic shared by the server: prompt formatting,
//! bounded conversation memory, message routing and doctor-search parsing.

pub mod doctor;
pub mod error;
pub mod memory;
pub mod prompt;
pub mod routing;

pub use doctor::{DoctorQuery, DoctorResult, SearchArea};
pub use error::AssistantError;
pub use memory::{ConversationMemory, Speaker, Turn};
pub use prompt::{build_final_prompt, format_prompt};
pub use routing::{Route, route};
