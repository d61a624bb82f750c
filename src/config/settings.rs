//! Configuration settings for Lectern.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub llm: LlmSettings,
    pub search: SearchSettings,
    pub study: StudySettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory that agent reports are written to.
    pub output_dir: String,
    /// Log level used when neither `-v` nor `RUST_LOG` is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Chat-completion parameters shared by every agent call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// OpenAI API key. Usually supplied via `--api-key` or `OPENAI_API_KEY` instead.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Maximum output tokens per call.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// System preamble for the template variant.
    pub system_prompt: String,
    /// HTTP timeout for a single API call.
    pub timeout_secs: u64,
    /// Maximum chat calls for one agent in the team variant (tool-calling loop).
    pub max_iterations: usize,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1500,
            temperature: 0.7,
            system_prompt:
                "You are a helpful AI teaching assistant specialized for ADHD learners.".to_string(),
            timeout_secs: crate::openai::DEFAULT_TIMEOUT_SECS,
            max_iterations: 5,
        }
    }
}

/// Web search (SerpAPI) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// SerpAPI key. When absent, agents run without web lookup.
    pub api_key: Option<String>,
    /// SerpAPI engine name.
    pub engine: String,
    /// Number of results requested per search.
    pub results: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            engine: "google".to_string(),
            results: 5,
        }
    }
}

/// Local study pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudySettings {
    /// Maximum number of bullet notes per lecture.
    pub max_notes: usize,
    /// Number of quiz questions per lecture.
    pub quiz_questions: usize,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            max_notes: 5,
            quiz_questions: 3,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory containing an `agents.toml` that overrides the built-in prompts.
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::LecternError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lectern")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded report output directory.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }

    /// Resolve the OpenAI key: explicit value first, then the config file.
    ///
    /// Blank strings count as absent.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Option<String> {
        non_blank(explicit).or_else(|| non_blank(self.llm.api_key.as_deref()))
    }

    /// Resolve the SerpAPI key: explicit value first, then the config file.
    pub fn resolve_search_key(&self, explicit: Option<&str>) -> Option<String> {
        non_blank(explicit).or_else(|| non_blank(self.search.api_key.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_faculty_parameters() {
        let settings = Settings::default();
        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert_eq!(settings.llm.max_tokens, 1500);
        assert!((settings.llm.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(settings.study.max_notes, 5);
        assert_eq!(settings.study.quiz_questions, 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str("[study]\nmax_notes = 2\n").unwrap();
        assert_eq!(settings.study.max_notes, 2);
        assert_eq!(settings.study.quiz_questions, 3);
        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert_eq!(settings.general.log_level, "warn");

        let settings: Settings = toml::from_str("[general]\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(settings.general.log_level, "debug");
    }

    #[test]
    fn test_resolve_api_key_prefers_explicit_and_ignores_blank() {
        let mut settings = Settings::default();
        settings.llm.api_key = Some("from-config".to_string());

        assert_eq!(settings.resolve_api_key(Some("  sk-cli ")).as_deref(), Some("sk-cli"));
        assert_eq!(settings.resolve_api_key(Some("   ")).as_deref(), Some("from-config"));

        settings.llm.api_key = Some(String::new());
        assert_eq!(settings.resolve_api_key(None), None);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.general.output_dir = "reports".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.general.output_dir, "reports");
    }
}
