//! Study command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::study::{render, LectureStore, RenderFormat, SAMPLE_LECTURE, SAMPLE_LECTURE_ID};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::info;

/// Run the study command.
#[allow(clippy::too_many_arguments)]
pub async fn run_study(
    input: Option<String>,
    text: Option<String>,
    id: Option<String>,
    format: &str,
    max_notes: Option<usize>,
    questions: Option<usize>,
    output: Option<String>,
    settings: &Settings,
) -> Result<()> {
    let format: RenderFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let content = match (&input, text) {
        (Some(path), _) if path == "-" => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
        (Some(path), _) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read lecture file {}", path))?,
        (None, Some(text)) => text,
        (None, None) => {
            Output::info("No input given, using the sample lecture.");
            SAMPLE_LECTURE.to_string()
        }
    };

    let lecture_id = lecture_id(id, input.as_deref());

    let mut store = LectureStore::with_limits(
        max_notes.unwrap_or(settings.study.max_notes),
        questions.unwrap_or(settings.study.quiz_questions),
    );
    let record = store.process(&lecture_id, &content);
    info!(
        "Lecture {}: {} notes, {} questions",
        lecture_id,
        record.notes.len(),
        record.quiz.len()
    );
    if record.notes.is_empty() {
        Output::warning("No sentences found in the lecture text.");
    }

    let rendered = render(
        &lecture_id,
        &store.notes(&lecture_id),
        &store.quiz(&lecture_id),
        format,
    )?;

    match output {
        Some(path) if path != "-" => {
            tokio::fs::write(&path, &rendered).await?;
            Output::success(&format!("Wrote lecture {} to {}", lecture_id, path));
        }
        _ => {
            println!("{}", rendered);
        }
    }

    Ok(())
}

/// Pick a lecture id: explicit, then the input file stem, then a default.
fn lecture_id(explicit: Option<String>, input: Option<&str>) -> String {
    if let Some(id) = explicit.filter(|id| !id.trim().is_empty()) {
        return id;
    }
    match input {
        Some("-") => "stdin".to_string(),
        Some(path) => Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| SAMPLE_LECTURE_ID.to_string()),
        None => SAMPLE_LECTURE_ID.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lecture_id_resolution() {
        assert_eq!(lecture_id(Some("CS50".to_string()), Some("x.txt")), "CS50");
        assert_eq!(lecture_id(None, Some("notes/week1.txt")), "week1");
        assert_eq!(lecture_id(None, Some("-")), "stdin");
        assert_eq!(lecture_id(Some("  ".to_string()), None), SAMPLE_LECTURE_ID);
    }

    #[tokio::test]
    async fn test_run_study_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("lecture.md");

        run_study(
            None,
            Some("A. B! C?".to_string()),
            Some("L1".to_string()),
            "markdown",
            None,
            Some(2),
            Some(out.to_string_lossy().to_string()),
            &Settings::default(),
        )
        .await
        .unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.contains("## Lecture L1 Summary"));
        assert!(written.contains("- C"));
        assert!(written.contains("2. Is this statement true? B"));
        assert!(!written.contains("3. Is this statement true? C"));
    }

    #[tokio::test]
    async fn test_run_study_rejects_unknown_format() {
        let result = run_study(None, None, None, "pdf", None, None, None, &Settings::default()).await;
        assert!(result.is_err());
    }
}
