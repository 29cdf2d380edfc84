//! Plumbing around the AI activity summary.
//!
//! The model call itself is an opaque collaborator; this module only
//! builds the prompt from the user's tasks and cleans up the response
//! for display.

use crate::domain::task::Task;
use crate::error::Result;
use async_trait::async_trait;

/// Opaque text-in/text-out summarization collaborator.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str) -> Result<String>;
}

/// Builds the activity prompt from the user's task names.
pub fn activity_prompt<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> String {
    let names: Vec<&str> = tasks.into_iter().map(|t| t.name.as_str()).collect();
    format!("Summarize this todo activity: {}", names.join(", "))
}

/// Strips simple list-bullet markup from a model response so it can be
/// displayed as plain text.
pub fn strip_bullets(text: &str) -> String {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            for marker in ["- ", "* ", "• "] {
                if let Some(rest) = trimmed.strip_prefix(marker) {
                    return rest;
                }
            }
            trimmed
        })
        .collect::<Vec<_>>()
        .join("\n")
}
