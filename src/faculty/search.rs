//! Web search backend offered to agents as a tool.

use super::chat::ToolSpec;
use crate::config::SearchSettings;
use crate::error::{LecternError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// SerpAPI JSON endpoint.
pub const SERPAPI_ENDPOINT: &str = "https://serpapi.com/search.json";

/// Name of the search tool as seen by the model.
pub const SEARCH_TOOL_NAME: &str = "search_web";

/// One organic search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: Option<String>,
}

/// Trait for web search backends.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Run a query and return the top results.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

/// SerpAPI-backed web search.
pub struct SerpApiSearch {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine: String,
    results: u32,
}

#[derive(Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<SearchHit>,
    #[serde(default)]
    error: Option<String>,
}

impl SerpApiSearch {
    /// Create a search backend from settings and a resolved API key.
    pub fn new(api_key: &str, settings: &SearchSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: SERPAPI_ENDPOINT.to_string(),
            api_key: api_key.to_string(),
            engine: settings.engine.clone(),
            results: settings.results,
        }
    }

    fn build_url(&self, query: &str) -> Result<url::Url> {
        let num = self.results.to_string();
        url::Url::parse_with_params(
            &self.endpoint,
            &[
                ("engine", self.engine.as_str()),
                ("q", query),
                ("num", num.as_str()),
                ("api_key", self.api_key.as_str()),
            ],
        )
        .map_err(|e| LecternError::Search(format!("Invalid search endpoint: {}", e)))
    }
}

#[async_trait]
impl WebSearch for SerpApiSearch {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = self.build_url(query)?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let hits = parse_response(status, &body, self.results as usize)?;
        debug!("Search returned {} results", hits.len());
        Ok(hits)
    }
}

/// Decode a SerpAPI response body.
///
/// An API error message wins over the status; a body that is not JSON is
/// reported by status when the request failed.
fn parse_response(status: reqwest::StatusCode, body: &str, limit: usize) -> Result<Vec<SearchHit>> {
    let parsed: SerpApiResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !status.is_success() => {
            return Err(LecternError::Search(format!("SerpAPI returned {}", status)))
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(error) = parsed.error {
        return Err(LecternError::Search(error));
    }
    if !status.is_success() {
        return Err(LecternError::Search(format!("SerpAPI returned {}", status)));
    }

    let mut hits = parsed.organic_results;
    hits.truncate(limit);
    Ok(hits)
}

/// Tool definition for web search.
pub fn search_tool_spec() -> ToolSpec {
    ToolSpec {
        name: SEARCH_TOOL_NAME.to_string(),
        description: "Search the web for current learning resources, courses, videos and documentation. \
            Use this to find up-to-date material rather than relying on memory."
            .to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        }),
    }
}

/// Extract the query from search tool arguments.
pub fn parse_search_arguments(arguments: &str) -> Result<String> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| LecternError::Agent(format!("Invalid tool arguments: {}", e)))?;

    args["query"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| LecternError::Agent("Missing 'query' argument".to_string()))
}

/// Format search hits as a numbered list for the model.
pub fn format_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No results found.".to_string();
    }

    let formatted = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| match &hit.snippet {
            Some(snippet) => format!("{}. {}\n   {}\n   {}", i + 1, hit.title, hit.link, snippet),
            None => format!("{}. {}\n   {}", i + 1, hit.title, hit.link),
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("Found {} results:\n\n{}", hits.len(), formatted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_arguments() {
        assert_eq!(
            parse_search_arguments(r#"{"query": "aws free tier"}"#).unwrap(),
            "aws free tier"
        );
        assert!(parse_search_arguments(r#"{"q": "x"}"#).is_err());
        assert!(parse_search_arguments("not json").is_err());
    }

    #[test]
    fn test_format_hits() {
        let hits = vec![
            SearchHit {
                title: "AWS Cloud Practitioner".to_string(),
                link: "https://example.com/aws".to_string(),
                snippet: Some("Free course".to_string()),
            },
            SearchHit {
                title: "Python Basics".to_string(),
                link: "https://example.com/py".to_string(),
                snippet: None,
            },
        ];
        let text = format_hits(&hits);
        assert!(text.starts_with("Found 2 results:"));
        assert!(text.contains("1. AWS Cloud Practitioner\n   https://example.com/aws\n   Free course"));
        assert!(text.contains("2. Python Basics\n   https://example.com/py"));
        assert_eq!(format_hits(&[]), "No results found.");
    }

    #[test]
    fn test_build_url_encodes_query() {
        let search = SerpApiSearch::new("secret", &SearchSettings::default());
        let url = search.build_url("python & aws").unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("q".to_string(), "python & aws".to_string())));
        assert!(pairs.contains(&("engine".to_string(), "google".to_string())));
        assert!(pairs.contains(&("num".to_string(), "5".to_string())));
    }

    #[test]
    fn test_non_json_error_page_reports_status() {
        let err = parse_response(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
            "<html><body>Service Unavailable</body></html>",
            5,
        )
        .unwrap_err();
        assert!(err.to_string().contains("SerpAPI returned 503"));

        let err = parse_response(reqwest::StatusCode::OK, "<html></html>", 5).unwrap_err();
        assert!(matches!(err, LecternError::Json(_)));
    }

    #[test]
    fn test_api_error_message_and_truncation() {
        let err = parse_response(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"error": "Invalid API key."}"#,
            5,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid API key."));

        let body = r#"{"organic_results": [
            {"title": "A", "link": "a"}, {"title": "B", "link": "b"}, {"title": "C", "link": "c"}
        ]}"#;
        let hits = parse_response(reqwest::StatusCode::OK, body, 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].title, "B");
    }

    #[test]
    fn test_response_parsing_tolerates_missing_fields() {
        let body: SerpApiResponse = serde_json::from_str(
            r#"{"organic_results": [{"title": "T", "link": "L", "position": 1}]}"#,
        )
        .unwrap();
        assert_eq!(body.organic_results.len(), 1);
        assert!(body.organic_results[0].snippet.is_none());
        assert!(body.error.is_none());
    }
}
