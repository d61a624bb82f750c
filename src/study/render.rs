//! Rendering notes and quizzes for display (HTML, Markdown, JSON).

use super::QuizEntry;
use serde::Serialize;

/// Supported render formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderFormat {
    Html,
    Markdown,
    Json,
}

impl std::str::FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(RenderFormat::Html),
            "markdown" | "md" => Ok(RenderFormat::Markdown),
            "json" => Ok(RenderFormat::Json),
            _ => Err(format!("Unknown format: {}. Use html, markdown, or json.", s)),
        }
    }
}

#[derive(Serialize)]
struct LectureExport<'a> {
    lecture_id: &'a str,
    notes: &'a [String],
    quiz: &'a [QuizEntry],
}

/// Render a lecture's notes and quiz in the given format.
pub fn render(
    lecture_id: &str,
    notes: &[String],
    quiz: &[QuizEntry],
    format: RenderFormat,
) -> crate::error::Result<String> {
    match format {
        RenderFormat::Html => Ok(format_html(lecture_id, notes, quiz)),
        RenderFormat::Markdown => Ok(format_markdown(lecture_id, notes, quiz)),
        RenderFormat::Json => Ok(serde_json::to_string_pretty(&LectureExport {
            lecture_id,
            notes,
            quiz,
        })?),
    }
}

fn format_html(lecture_id: &str, notes: &[String], quiz: &[QuizEntry]) -> String {
    let mut html = format!("<h2>Lecture {} Summary</h2><ul>", escape_html(lecture_id));
    for note in notes {
        html.push_str(&format!("<li>{}</li>", escape_html(note)));
    }
    html.push_str("</ul><h2>Quiz</h2><ol>");

    for entry in quiz {
        match entry {
            QuizEntry::Item(item) => {
                html.push_str(&format!("<li>{}<br>", escape_html(&item.question)));
                // Radio group name comes from the question prefix, so questions
                // sharing their first 10 characters share a group.
                let group: String = item.question.chars().take(10).collect();
                for option in &item.options {
                    html.push_str(&format!(
                        "<input type='radio' name='q{}' value='{}'> {}<br>",
                        escape_html(&group),
                        escape_html(option),
                        escape_html(option)
                    ));
                }
                html.push_str(&format!(
                    "<p>Correct Answer: {}</p></li>",
                    escape_html(&item.correct)
                ));
            }
            QuizEntry::Unavailable(message) => {
                html.push_str(&format!("<li>{}</li>", escape_html(message)));
            }
        }
    }

    html.push_str("</ol>");
    html
}

fn format_markdown(lecture_id: &str, notes: &[String], quiz: &[QuizEntry]) -> String {
    let mut md = format!("## Lecture {} Summary\n\n", lecture_id);
    for note in notes {
        // Notes already carry their "- " bullet; the placeholder does not.
        if note.starts_with("- ") {
            md.push_str(&format!("{}\n", note));
        } else {
            md.push_str(&format!("- {}\n", note));
        }
    }

    md.push_str("\n## Quiz\n\n");
    for (i, entry) in quiz.iter().enumerate() {
        match entry {
            QuizEntry::Item(item) => {
                md.push_str(&format!("{}. {}\n", i + 1, item.question));
                for option in &item.options {
                    md.push_str(&format!("   - [ ] {}\n", option));
                }
                md.push_str(&format!("   Correct Answer: {}\n", item.correct));
            }
            QuizEntry::Unavailable(message) => {
                md.push_str(&format!("{}\n", message));
            }
        }
    }
    md
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::{LectureStore, NO_NOTES, NO_QUIZ};

    fn sample() -> (Vec<String>, Vec<QuizEntry>) {
        let mut store = LectureStore::new();
        store.process("L1", "A. B.");
        (store.notes("L1"), store.quiz("L1"))
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("HTML".parse::<RenderFormat>().unwrap(), RenderFormat::Html);
        assert_eq!("md".parse::<RenderFormat>().unwrap(), RenderFormat::Markdown);
        assert!("pdf".parse::<RenderFormat>().is_err());
    }

    #[test]
    fn test_html_layout() {
        let (notes, quiz) = sample();
        let html = render("L1", &notes, &quiz, RenderFormat::Html).unwrap();

        assert!(html.starts_with("<h2>Lecture L1 Summary</h2><ul><li>- A</li><li>- B</li></ul>"));
        assert!(html.contains("<h2>Quiz</h2><ol><li>Is this statement true? A<br>"));
        assert!(html.contains("<input type='radio' name='qIs this st' value='True'> True<br>"));
        assert!(html.contains("<input type='radio' name='qIs this st' value='False'> False<br>"));
        assert_eq!(html.matches("<p>Correct Answer: True</p></li>").count(), 2);
        assert!(html.ends_with("</ol>"));
    }

    #[test]
    fn test_html_escapes_content() {
        let notes = vec!["- 1 < 2 & 3".to_string()];
        let html = render("x", &notes, &[], RenderFormat::Html).unwrap();
        assert!(html.contains("<li>- 1 &lt; 2 &amp; 3</li>"));
    }

    #[test]
    fn test_placeholders_render_as_plain_items() {
        let store = LectureStore::new();
        let html = render(
            "none",
            &store.notes("none"),
            &store.quiz("none"),
            RenderFormat::Html,
        )
        .unwrap();
        assert!(html.contains(&format!("<li>{}</li>", NO_NOTES)));
        assert!(html.contains(&format!("<ol><li>{}</li></ol>", NO_QUIZ)));
    }

    #[test]
    fn test_markdown_output() {
        let (notes, quiz) = sample();
        let md = render("L1", &notes, &quiz, RenderFormat::Markdown).unwrap();
        assert!(md.contains("## Lecture L1 Summary\n\n- A\n- B\n"));
        assert!(md.contains("1. Is this statement true? A\n   - [ ] True\n   - [ ] False\n   Correct Answer: True\n"));
    }

    #[test]
    fn test_json_output() {
        let (notes, quiz) = sample();
        let json = render("L1", &notes, &quiz, RenderFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["lecture_id"], "L1");
        assert_eq!(value["notes"][1], "- B");
        assert_eq!(value["quiz"][0]["correct"], "True");
    }
}
