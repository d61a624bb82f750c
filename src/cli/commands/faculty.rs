//! Faculty command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::faculty::{AgentRun, FacultyRunner, RunEvent, RunRequest, Variant};
use anyhow::Result;
use indicatif::ProgressBar;

/// Run the faculty command.
#[allow(clippy::too_many_arguments)]
pub async fn run_faculty(
    topic: &str,
    team: bool,
    api_key: Option<String>,
    serpapi_key: Option<String>,
    model: Option<String>,
    output_dir: Option<String>,
    no_save: bool,
    settings: Settings,
) -> Result<()> {
    let variant = if team { Variant::Team } else { Variant::Faculty };

    let request = RunRequest::from_settings(
        &settings,
        topic,
        api_key.as_deref(),
        serpapi_key.as_deref(),
        variant,
    )?;

    let output_dir = if no_save {
        None
    } else {
        Some(
            output_dir
                .map(|dir| Settings::expand_path(&dir))
                .unwrap_or_else(|| settings.output_dir()),
        )
    };
    let request = request.with_output_dir(output_dir);

    let mut runner = FacultyRunner::for_request(&request, &settings)?;
    if let Some(model) = &model {
        runner = runner.with_model(model);
    }

    Output::success(&format!("Deploying AI Teaching Faculty for: {}", request.topic));
    if variant == Variant::Team && !request.search_enabled() {
        Output::info("No SerpAPI key given; agents will recommend well-known resources without web search.");
    }

    let mut spinner: Option<ProgressBar> = None;
    let runs = runner
        .run_all_with_progress(&request, |event| match event {
            RunEvent::Started(agent) => {
                spinner = Some(Output::spinner(agent.progress_message()));
            }
            RunEvent::Finished(run) => {
                if let Some(spinner) = spinner.take() {
                    spinner.finish_and_clear();
                }
                print_run(run);
            }
        })
        .await;

    print_documents(&runs);

    let failed = runs.iter().filter(|r| !r.is_success()).count();
    if failed == runs.len() {
        anyhow::bail!("All {} agents failed", failed);
    }
    if failed > 0 {
        Output::warning(&format!("{} of {} agents failed", failed, runs.len()));
    } else {
        Output::success("Complete teaching package generated!");
    }

    Ok(())
}

fn print_run(run: &AgentRun) {
    Output::agent_heading(run.agent.name(), run.agent.persona(), run.agent.deliverable());

    match &run.outcome {
        Ok(response) => {
            println!("\n{}\n", response.content);
            if !response.tool_calls.is_empty() {
                Output::info(&format!("Tool calls ({})", response.tool_calls.len()));
                for call in &response.tool_calls {
                    Output::list_item(&call.to_string());
                }
            }
        }
        Err(e) => Output::error(&format!("Error: {}", e)),
    }
}

fn print_documents(runs: &[AgentRun]) {
    let saved: Vec<&AgentRun> = runs.iter().filter(|r| r.report.is_some()).collect();
    if saved.is_empty() {
        return;
    }

    Output::header("Generated Documents");
    for run in saved {
        match &run.report {
            Some(Ok(path)) => Output::list_item(&format!("{}: {}", run.agent, path.display())),
            Some(Err(e)) => Output::error(&format!("{}: {}", run.agent, e)),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LecternError;

    #[tokio::test]
    async fn test_missing_key_is_returned_before_any_output() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_faculty(
            "AWS basics",
            false,
            None,
            None,
            None,
            Some(dir.path().to_string_lossy().to_string()),
            false,
            Settings::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LecternError>(),
            Some(LecternError::MissingCredential(_))
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_blank_topic_is_rejected() {
        let err = run_faculty(
            "   ",
            true,
            Some("sk-test".to_string()),
            None,
            None,
            None,
            true,
            Settings::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LecternError>(),
            Some(LecternError::MissingTopic(_))
        ));
    }
}
