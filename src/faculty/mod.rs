//! Teaching faculty: four fixed LLM personas run one after another on a topic.
//!
//! Two variants share the roster. The faculty variant renders each agent's
//! topic template and makes one chat call with a fixed system preamble. The
//! team variant uses each agent's persona instructions as the system message
//! and can give the Research Librarian and Teaching Assistant a web-search
//! tool. Both variants save each successful response as a markdown report.

pub mod chat;
mod report;
mod request;
mod roster;
mod runner;
pub mod search;

pub use chat::{ChatMessage, ChatModel, ChatReply, ChatRequest, OpenAiChat, ToolInvocation, ToolSpec};
pub use report::{report_contents, report_file_name, sanitize_topic, write_report};
pub use request::{RunRequest, Variant};
pub use roster::AgentKind;
pub use runner::{FacultyRunner, RunEvent};
pub use search::{SearchHit, SerpApiSearch, WebSearch};

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Category of a per-agent failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The chat or search API call failed.
    ExternalApi,
    /// The report file could not be written.
    FileWrite,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::ExternalApi => write!(f, "external API"),
            FailureKind::FileWrite => write!(f, "file write"),
        }
    }
}

/// A failure confined to one agent; sibling agents still run.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct RunFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl RunFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn external(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ExternalApi, message)
    }
}

/// Successful response from one agent.
#[derive(Debug, Clone)]
pub struct AgentResponse {
    /// The final response text.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of chat calls used.
    pub iterations: usize,
}

/// Record of a tool call made by an agent.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

/// Outcome of running one agent on a topic.
#[derive(Debug)]
pub struct AgentRun {
    pub agent: AgentKind,
    pub topic: String,
    pub outcome: Result<AgentResponse, RunFailure>,
    /// Saved report path; `None` when saving is disabled or the agent failed.
    pub report: Option<Result<PathBuf, RunFailure>>,
}

impl AgentRun {
    /// Response text, if the agent succeeded.
    pub fn content(&self) -> Option<&str> {
        self.outcome.as_ref().ok().map(|r| r.content.as_str())
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_call_record_display() {
        let record = ToolCallRecord {
            name: "search_web".to_string(),
            arguments: r#"{"query": "test"}"#.to_string(),
            result: "Found results".to_string(),
        };
        assert_eq!(format!("{}", record), r#"search_web({"query": "test"})"#);
    }

    #[test]
    fn test_failure_display_is_message() {
        let failure = RunFailure::external("Chat completion failed: timeout");
        assert_eq!(failure.to_string(), "Chat completion failed: timeout");
        assert_eq!(failure.kind, FailureKind::ExternalApi);
    }
}
