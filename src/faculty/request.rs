//! Request-scoped run configuration.

use super::search::{SerpApiSearch, WebSearch};
use crate::config::Settings;
use crate::error::{LecternError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Which faculty flow to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Topic template per agent, one chat call each.
    #[default]
    Faculty,
    /// Persona instructions per agent, optional web-search tool.
    Team,
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "faculty" => Ok(Variant::Faculty),
            "team" => Ok(Variant::Team),
            _ => Err(format!("Unknown variant: {}. Use faculty or team.", s)),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Faculty => write!(f, "faculty"),
            Variant::Team => write!(f, "team"),
        }
    }
}

/// Everything one faculty run needs, validated up front.
#[derive(Clone)]
pub struct RunRequest {
    pub topic: String,
    pub api_key: String,
    pub variant: Variant,
    /// Search backend, present only when a search key was supplied.
    pub search: Option<Arc<dyn WebSearch>>,
    /// Where to write reports; `None` disables saving.
    pub output_dir: Option<PathBuf>,
}

impl RunRequest {
    /// Validate credentials and topic.
    ///
    /// The API key is checked before the topic, so a request with neither
    /// reports the missing key. The topic is stored as given; only a blank
    /// topic is rejected.
    pub fn new(topic: &str, api_key: Option<&str>) -> Result<Self> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                LecternError::MissingCredential(
                    "Please provide an OpenAI API key (--api-key or OPENAI_API_KEY).".to_string(),
                )
            })?;

        if topic.trim().is_empty() {
            return Err(LecternError::MissingTopic(
                "Please enter a topic to learn about.".to_string(),
            ));
        }

        Ok(Self {
            topic: topic.to_string(),
            api_key: api_key.to_string(),
            variant: Variant::Faculty,
            search: None,
            output_dir: None,
        })
    }

    /// Build a request from settings, resolving keys and the search capability once.
    ///
    /// Search is only wired up for the team variant.
    pub fn from_settings(
        settings: &Settings,
        topic: &str,
        api_key: Option<&str>,
        search_key: Option<&str>,
        variant: Variant,
    ) -> Result<Self> {
        let api_key = settings.resolve_api_key(api_key);
        let search = match (variant, settings.resolve_search_key(search_key)) {
            (Variant::Team, Some(key)) => {
                Some(Arc::new(SerpApiSearch::new(&key, &settings.search)) as Arc<dyn WebSearch>)
            }
            _ => None,
        };

        Ok(Self::new(topic, api_key.as_deref())?
            .with_variant(variant)
            .with_search(search))
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_search(mut self, search: Option<Arc<dyn WebSearch>>) -> Self {
        self.search = search;
        self
    }

    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    /// Whether agents with the search capability will get the tool.
    pub fn search_enabled(&self) -> bool {
        self.variant == Variant::Team && self.search.is_some()
    }
}

impl std::fmt::Debug for RunRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunRequest")
            .field("topic", &self.topic)
            .field("api_key", &"<redacted>")
            .field("variant", &self.variant)
            .field("search", &self.search.is_some())
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_halts_first() {
        let err = RunRequest::new("", None).unwrap_err();
        assert!(matches!(err, LecternError::MissingCredential(_)));

        let err = RunRequest::new("Python", Some("   ")).unwrap_err();
        assert!(matches!(err, LecternError::MissingCredential(_)));
    }

    #[test]
    fn test_missing_topic() {
        let err = RunRequest::new("  ", Some("sk-test")).unwrap_err();
        assert!(matches!(err, LecternError::MissingTopic(_)));
    }

    #[test]
    fn test_valid_request_keeps_topic_and_trims_key() {
        let request = RunRequest::new(" AWS basics ", Some(" sk-test ")).unwrap();
        assert_eq!(request.topic, " AWS basics ");
        assert_eq!(request.api_key, "sk-test");
        assert_eq!(request.variant, Variant::Faculty);
        assert!(!request.search_enabled());
    }

    #[test]
    fn test_search_resolved_only_for_team() {
        let mut settings = Settings::default();
        settings.search.api_key = Some("serp-key".to_string());

        let faculty =
            RunRequest::from_settings(&settings, "Python", Some("sk"), None, Variant::Faculty).unwrap();
        assert!(faculty.search.is_none());

        let team = RunRequest::from_settings(&settings, "Python", Some("sk"), None, Variant::Team).unwrap();
        assert!(team.search_enabled());

        settings.search.api_key = None;
        let team = RunRequest::from_settings(&settings, "Python", Some("sk"), None, Variant::Team).unwrap();
        assert!(!team.search_enabled());
    }

    #[test]
    fn test_debug_redacts_key() {
        let request = RunRequest::new("Python", Some("sk-secret")).unwrap();
        let debug = format!("{:?}", request);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
