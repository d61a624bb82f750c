//! Configuration module for Lectern.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AgentPrompt, Prompts, TOPIC_PLACEHOLDER};
pub use settings::{
    GeneralSettings, LlmSettings, PromptSettings, SearchSettings, Settings, StudySettings,
};
