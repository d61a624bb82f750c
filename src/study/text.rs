//! Sentence splitting, note extraction and quiz generation.
//!
//! These are deliberately naive: sentences end at any run of `.`, `!` or `?`,
//! so abbreviations ("e.g.") and decimals ("3.14") split mid-sentence.

use super::QuizItem;
use regex::Regex;
use std::sync::LazyLock;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("Invalid regex"));

/// Default number of bullet notes.
pub const DEFAULT_MAX_NOTES: usize = 5;

/// Default number of quiz questions.
pub const DEFAULT_QUIZ_QUESTIONS: usize = 3;

/// Split text into trimmed, non-empty sentences in original order.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Take the first `max_notes` sentences as `- ` bullet points.
pub fn summarize(sentences: &[String], max_notes: usize) -> Vec<String> {
    sentences
        .iter()
        .take(max_notes)
        .map(|s| format!("- {}", s))
        .collect()
}

/// Turn the first `num_questions` sentences into True/False questions.
///
/// Every question's correct answer is "True" because the statement is taken
/// verbatim from the text; no negated distractors are produced.
pub fn generate_quiz(sentences: &[String], num_questions: usize) -> Vec<QuizItem> {
    sentences
        .iter()
        .take(num_questions)
        .map(|s| QuizItem::true_false(s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_mixed_punctuation() {
        let sentences = split_sentences("A. B! C?");
        assert_eq!(sentences, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_split_collapses_runs_and_drops_empty() {
        let sentences = split_sentences("  Wait...  what?!  \n Really.  ");
        assert_eq!(sentences, vec!["Wait", "what", "Really"]);
        assert!(split_sentences("...!?").is_empty());
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn test_split_has_no_abbreviation_handling() {
        let sentences = split_sentences("Pi is 3.14 roughly.");
        assert_eq!(sentences, vec!["Pi is 3", "14 roughly"]);
    }

    #[test]
    fn test_split_keeps_text_without_terminator() {
        assert_eq!(split_sentences("no punctuation here"), vec!["no punctuation here"]);
    }

    #[test]
    fn test_sentence_count_matches_nonempty_segments() {
        let inputs = ["a.b.c", "x!! ?y", " . . ", "one. two? three! four"];
        for input in inputs {
            let expected = input
                .split(['.', '!', '?'])
                .filter(|s| !s.trim().is_empty())
                .count();
            assert_eq!(split_sentences(input).len(), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_summarize_is_bounded_and_ordered() {
        let sentences = split_sentences("One. Two. Three. Four. Five. Six. Seven.");
        let notes = summarize(&sentences, DEFAULT_MAX_NOTES);
        assert_eq!(notes, vec!["- One", "- Two", "- Three", "- Four", "- Five"]);

        let short = split_sentences("Only one.");
        assert_eq!(summarize(&short, DEFAULT_MAX_NOTES), vec!["- Only one"]);
        assert!(summarize(&short, 0).is_empty());
    }

    #[test]
    fn test_generate_quiz_always_true() {
        let sentences = split_sentences("A. B! C? D.");
        let quiz = generate_quiz(&sentences, DEFAULT_QUIZ_QUESTIONS);

        assert_eq!(quiz.len(), 3);
        assert_eq!(quiz[0].question, "Is this statement true? A");
        assert_eq!(quiz[2].question, "Is this statement true? C");
        for item in &quiz {
            assert_eq!(item.correct, "True");
            assert_eq!(item.options, vec!["True", "False"]);
        }
    }

    #[test]
    fn test_generate_quiz_limited_by_sentences() {
        let sentences = split_sentences("Just this.");
        assert_eq!(generate_quiz(&sentences, 10).len(), 1);
        assert!(generate_quiz(&[], 3).is_empty());
    }
}
