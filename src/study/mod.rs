//! Local study pipeline: lecture text to bullet notes and a True/False quiz.
//!
//! Runs entirely offline. Text is split into sentences, the leading ones
//! become notes and quiz stems, and results are kept in a [`LectureStore`]
//! keyed by lecture id.

mod render;
mod store;
pub mod text;

pub use render::{render, RenderFormat};
pub use store::{LectureRecord, LectureStore, NO_NOTES, NO_QUIZ};
pub use text::{generate_quiz, split_sentences, summarize};

use serde::{Deserialize, Serialize};

/// Sample lecture used when no input is given.
pub const SAMPLE_LECTURE_ID: &str = "IT101_Lecture1";

/// Sample lecture text.
pub const SAMPLE_LECTURE: &str = "
    Introduction to Programming. Programming involves writing code. Python is a popular language.
    It is used for web development. Variables store data. Loops repeat tasks.
    ";

/// A single True/False question.
///
/// `correct` is always "True": the question restates a sentence from the
/// lecture unchanged. Treat it as a placeholder, not a checked answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub correct: String,
}

impl QuizItem {
    /// Build a question asking whether `statement` is true.
    pub fn true_false(statement: &str) -> Self {
        Self {
            question: format!("Is this statement true? {}", statement),
            options: vec!["True".to_string(), "False".to_string()],
            correct: "True".to_string(),
        }
    }
}

/// A quiz lookup result: a stored question or the "not available" placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuizEntry {
    Item(QuizItem),
    Unavailable(String),
}
