//! Lectern - Study Notes, Quizzes and a Teaching Faculty
//!
//! A local-first CLI for turning lecture text into study notes and quizzes,
//! and for asking a fixed team of LLM "faculty" personas to prepare learning
//! material on a topic.
//!
//! # Overview
//!
//! Lectern allows you to:
//! - Split lecture text into bullet notes and a True/False quiz, offline
//! - Render results as HTML, Markdown or JSON
//! - Run four teaching agents (Professor, Academic Advisor, Research
//!   Librarian, Teaching Assistant) on a topic and save their reports
//! - Serve both flows over a small HTTP API
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `study` - Sentence splitting, notes, quiz generation, lecture store, rendering
//! - `faculty` - Agent roster, chat and search backends, runner, report files
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use lectern::config::Settings;
//! use lectern::faculty::{FacultyRunner, RunRequest, Variant};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let request = RunRequest::from_settings(&settings, "AWS basics", None, None, Variant::Faculty)?;
//!     let runner = FacultyRunner::for_request(&request, &settings)?;
//!
//!     for run in runner.run_all(&request).await {
//!         println!("{}: {}", run.agent, run.content().unwrap_or("(failed)"));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod faculty;
pub mod openai;
pub mod study;

pub use error::{LecternError, Result};
