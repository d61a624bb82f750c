//! CLI module for Lectern.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Lectern - Study Notes, Quizzes and a Teaching Faculty
///
/// Turn lecture text into notes and quizzes, or ask a team of AI teaching
/// agents to prepare learning material on a topic.
#[derive(Parser, Debug)]
#[command(name = "lectern")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate study notes and a quiz from lecture text (offline)
    Study {
        /// Read lecture text from a file ("-" for stdin)
        #[arg(short, long, conflicts_with = "text")]
        input: Option<String>,

        /// Lecture text given inline
        #[arg(short, long)]
        text: Option<String>,

        /// Lecture identifier (defaults to the file stem, or the sample lecture id)
        #[arg(long)]
        id: Option<String>,

        /// Output format (html, markdown, json)
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Maximum number of bullet notes
        #[arg(long)]
        max_notes: Option<usize>,

        /// Number of quiz questions
        #[arg(long)]
        questions: Option<usize>,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Deploy the teaching faculty on a topic
    Faculty {
        /// What you want to learn (e.g. "Python fundamentals", "AWS basics")
        topic: String,

        /// Use persona agents with optional web search instead of topic templates
        #[arg(long)]
        team: bool,

        /// OpenAI API key
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// SerpAPI key for web search (team mode only, optional)
        #[arg(long, env = "SERPAPI_API_KEY", hide_env_values = true)]
        serpapi_key: Option<String>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Directory for markdown reports
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Do not save reports
        #[arg(long)]
        no_save: bool,
    },

    /// List the teaching agents
    Agents,

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

/// Build the tracing filter directive.
///
/// `RUST_LOG` wins, then the `-v` count, then the configured level.
pub fn log_directive(verbose: u8, configured: &str, rust_log: Option<String>) -> String {
    if let Some(directive) = rust_log.filter(|d| !d.trim().is_empty()) {
        return directive;
    }

    let level = match verbose {
        0 => configured.trim(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let level = if level.is_empty() { "warn" } else { level };

    format!("lectern={}", level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directive_uses_configured_level() {
        assert_eq!(log_directive(0, "debug", None), "lectern=debug");
        assert_eq!(log_directive(0, "  ", None), "lectern=warn");
    }

    #[test]
    fn test_log_directive_precedence() {
        assert_eq!(log_directive(2, "error", None), "lectern=debug");
        assert_eq!(log_directive(5, "error", None), "lectern=trace");
        assert_eq!(
            log_directive(1, "debug", Some("lectern=trace,reqwest=debug".to_string())),
            "lectern=trace,reqwest=debug"
        );
        assert_eq!(log_directive(0, "info", Some(String::new())), "lectern=info");
    }

    #[test]
    fn test_parse_faculty_command() {
        let cli = Cli::try_parse_from([
            "lectern",
            "faculty",
            "AWS basics",
            "--team",
            "--api-key",
            "sk-test",
            "--no-save",
        ])
        .unwrap();

        match cli.command {
            Commands::Faculty {
                topic,
                team,
                api_key,
                no_save,
                ..
            } => {
                assert_eq!(topic, "AWS basics");
                assert!(team);
                assert_eq!(api_key.as_deref(), Some("sk-test"));
                assert!(no_save);
            }
            other => panic!("Expected faculty command, got {:?}", other),
        }
    }

    #[test]
    fn test_study_input_conflicts_with_text() {
        let result = Cli::try_parse_from(["lectern", "study", "-i", "notes.txt", "-t", "A. B."]);
        assert!(result.is_err());
    }
}
