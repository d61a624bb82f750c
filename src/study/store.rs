//! In-memory store of processed lectures.

use super::text::{generate_quiz, split_sentences, summarize, DEFAULT_MAX_NOTES, DEFAULT_QUIZ_QUESTIONS};
use super::{QuizEntry, QuizItem};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Placeholder returned for notes of an unknown lecture.
pub const NO_NOTES: &str = "No notes available.";

/// Placeholder returned for the quiz of an unknown lecture.
pub const NO_QUIZ: &str = "No quiz available.";

/// One processed lecture.
#[derive(Debug, Clone, Serialize)]
pub struct LectureRecord {
    pub lecture_id: String,
    pub source: String,
    pub notes: Vec<String>,
    pub quiz: Vec<QuizItem>,
    pub processed_at: DateTime<Utc>,
}

/// Notes and quizzes keyed by lecture id.
///
/// Not synchronized; wrap it in a lock to share across tasks.
#[derive(Debug)]
pub struct LectureStore {
    records: HashMap<String, LectureRecord>,
    max_notes: usize,
    quiz_questions: usize,
}

impl LectureStore {
    /// Create a store with the default limits (5 notes, 3 questions).
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_NOTES, DEFAULT_QUIZ_QUESTIONS)
    }

    /// Create a store with custom note and question limits.
    pub fn with_limits(max_notes: usize, quiz_questions: usize) -> Self {
        Self {
            records: HashMap::new(),
            max_notes,
            quiz_questions,
        }
    }

    /// Generate notes and quiz for a lecture, replacing any previous entry.
    pub fn process(&mut self, lecture_id: &str, content: &str) -> &LectureRecord {
        let sentences = split_sentences(content);
        let record = LectureRecord {
            lecture_id: lecture_id.to_string(),
            source: content.to_string(),
            notes: summarize(&sentences, self.max_notes),
            quiz: generate_quiz(&sentences, self.quiz_questions),
            processed_at: Utc::now(),
        };

        debug!(
            "Processed lecture {}: {} sentences, {} notes, {} questions",
            lecture_id,
            sentences.len(),
            record.notes.len(),
            record.quiz.len()
        );

        self.records.insert(lecture_id.to_string(), record);
        &self.records[lecture_id]
    }

    /// Stored notes, or the single-element placeholder.
    pub fn notes(&self, lecture_id: &str) -> Vec<String> {
        match self.records.get(lecture_id) {
            Some(record) => record.notes.clone(),
            None => vec![NO_NOTES.to_string()],
        }
    }

    /// Stored quiz, or the single-element placeholder.
    pub fn quiz(&self, lecture_id: &str) -> Vec<QuizEntry> {
        match self.records.get(lecture_id) {
            Some(record) => record.quiz.iter().cloned().map(QuizEntry::Item).collect(),
            None => vec![QuizEntry::Unavailable(NO_QUIZ.to_string())],
        }
    }

    /// Full record for a lecture, if processed.
    pub fn get(&self, lecture_id: &str) -> Option<&LectureRecord> {
        self.records.get(lecture_id)
    }

    /// Ids of all processed lectures, sorted.
    pub fn lecture_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.records.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for LectureStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_end_to_end() {
        let mut store = LectureStore::new();
        store.process("L1", "A. B! C?");

        assert_eq!(store.notes("L1"), vec!["- A", "- B", "- C"]);

        let quiz = store.quiz("L1");
        assert_eq!(quiz.len(), 3);
        let questions: Vec<&str> = quiz
            .iter()
            .map(|entry| match entry {
                QuizEntry::Item(item) => {
                    assert_eq!(item.correct, "True");
                    item.question.as_str()
                }
                QuizEntry::Unavailable(_) => panic!("Expected stored quiz item"),
            })
            .collect();
        assert_eq!(
            questions,
            vec![
                "Is this statement true? A",
                "Is this statement true? B",
                "Is this statement true? C",
            ]
        );
    }

    #[test]
    fn test_unknown_lecture_returns_placeholders() {
        let store = LectureStore::new();
        assert_eq!(store.notes("missing"), vec![NO_NOTES.to_string()]);
        assert_eq!(
            store.quiz("missing"),
            vec![QuizEntry::Unavailable(NO_QUIZ.to_string())]
        );
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_reprocessing_replaces_previous_entry() {
        let mut store = LectureStore::new();
        store.process("L1", "One. Two. Three. Four.");
        store.process("L1", "Only.");

        assert_eq!(store.notes("L1"), vec!["- Only"]);
        assert_eq!(store.quiz("L1").len(), 1);
        assert_eq!(store.get("L1").unwrap().source, "Only.");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sample_lecture_limits() {
        let mut store = LectureStore::new();
        let record = store.process(crate::study::SAMPLE_LECTURE_ID, crate::study::SAMPLE_LECTURE);
        assert_eq!(record.notes.len(), 5);
        assert_eq!(record.quiz.len(), 3);
        assert_eq!(record.notes[0], "- Introduction to Programming");
    }

    #[test]
    fn test_custom_limits_and_ids() {
        let mut store = LectureStore::with_limits(1, 2);
        store.process("b", "X. Y. Z.");
        store.process("a", "P.");

        assert_eq!(store.notes("b"), vec!["- X"]);
        assert_eq!(store.quiz("b").len(), 2);
        assert_eq!(store.lecture_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_text_stores_empty_lists() {
        let mut store = LectureStore::new();
        store.process("blank", "   ");
        assert!(store.notes("blank").is_empty());
        assert!(store.quiz("blank").is_empty());
    }
}
