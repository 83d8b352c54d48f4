pub mod gemini;
pub mod llm;
pub mod prompt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Model output for one set of raw notes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefinedNote {
    pub content: String,
    pub model: String,
    pub generated_at: DateTime<Local>,
}
