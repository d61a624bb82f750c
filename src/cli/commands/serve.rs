//! HTTP API server for integration with other systems.
//!
//! Exposes the study pipeline and the teaching faculty as JSON endpoints so a
//! web form (or any other front end) can drive them.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::LecternError;
use crate::faculty::{AgentKind, AgentRun, FacultyRunner, RunRequest, Variant};
use crate::study::{render, LectureStore, QuizEntry, RenderFormat};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    settings: Settings,
    lectures: RwLock<LectureStore>,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Lectern API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Agents", "GET  /agents");
    Output::kv("Study", "POST /study");
    Output::kv("List Lectures", "GET  /lectures");
    Output::kv("Get Lecture", "GET  /lectures/:lecture_id");
    Output::kv("Faculty", "POST /faculty");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, router(settings)).await?;

    Ok(())
}

fn router(settings: Settings) -> Router {
    let lectures = LectureStore::with_limits(settings.study.max_notes, settings.study.quiz_questions);
    let state = Arc::new(AppState {
        settings,
        lectures: RwLock::new(lectures),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/agents", get(list_agents))
        .route("/study", post(study))
        .route("/lectures", get(list_lectures))
        .route("/lectures/{lecture_id}", get(get_lecture))
        .route("/faculty", post(faculty))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Serialize)]
struct AgentInfo {
    id: AgentKind,
    name: &'static str,
    persona: &'static str,
    role: &'static str,
    deliverable: &'static str,
    uses_search: bool,
}

#[derive(Deserialize)]
struct StudyRequest {
    lecture_id: String,
    content: String,
    /// Optional rendering (html, markdown, json).
    #[serde(default)]
    format: Option<String>,
}

#[derive(Serialize)]
struct LectureResponse {
    lecture_id: String,
    notes: Vec<String>,
    quiz: Vec<QuizEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rendered: Option<String>,
}

#[derive(Serialize)]
struct LectureListResponse {
    lectures: Vec<String>,
    total: usize,
}

#[derive(Deserialize)]
struct FacultyRequest {
    topic: String,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    serpapi_key: Option<String>,
    #[serde(default)]
    team: bool,
    #[serde(default)]
    save: bool,
}

#[derive(Serialize)]
struct FacultyResponse {
    topic: String,
    variant: Variant,
    results: Vec<AgentResult>,
}

#[derive(Serialize)]
struct AgentResult {
    agent: AgentKind,
    name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report_error: Option<String>,
}

impl From<AgentRun> for AgentResult {
    fn from(run: AgentRun) -> Self {
        let (content, error) = match run.outcome {
            Ok(response) => (Some(response.content), None),
            Err(e) => (None, Some(e.message)),
        };
        let (report, report_error) = match run.report {
            Some(Ok(path)) => (Some(path.display().to_string()), None),
            Some(Err(e)) => (None, Some(e.message)),
            None => (None, None),
        };
        Self {
            agent: run.agent,
            name: run.agent.name(),
            content,
            error,
            report,
            report_error,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: impl ToString) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_agents() -> impl IntoResponse {
    let agents: Vec<AgentInfo> = AgentKind::ALL
        .into_iter()
        .map(|agent| AgentInfo {
            id: agent,
            name: agent.name(),
            persona: agent.persona(),
            role: agent.role(),
            deliverable: agent.deliverable(),
            uses_search: agent.uses_search(),
        })
        .collect();
    Json(agents)
}

async fn study(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StudyRequest>,
) -> impl IntoResponse {
    if req.lecture_id.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "lecture_id must not be empty");
    }

    let format = match req.format.as_deref().map(str::parse::<RenderFormat>) {
        None => None,
        Some(Ok(format)) => Some(format),
        Some(Err(e)) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    let (notes, quiz) = {
        let mut store = state.lectures.write().unwrap_or_else(PoisonError::into_inner);
        store.process(&req.lecture_id, &req.content);
        (store.notes(&req.lecture_id), store.quiz(&req.lecture_id))
    };

    let rendered = match format {
        Some(format) => match render(&req.lecture_id, &notes, &quiz, format) {
            Ok(rendered) => Some(rendered),
            Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
        },
        None => None,
    };

    Json(LectureResponse {
        lecture_id: req.lecture_id,
        notes,
        quiz,
        rendered,
    })
    .into_response()
}

async fn list_lectures(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let lectures = state
        .lectures
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .lecture_ids();
    Json(LectureListResponse {
        total: lectures.len(),
        lectures,
    })
}

async fn get_lecture(
    State(state): State<Arc<AppState>>,
    Path(lecture_id): Path<String>,
) -> impl IntoResponse {
    let store = state.lectures.read().unwrap_or_else(PoisonError::into_inner);
    Json(LectureResponse {
        notes: store.notes(&lecture_id),
        quiz: store.quiz(&lecture_id),
        lecture_id,
        rendered: None,
    })
}

async fn faculty(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FacultyRequest>,
) -> impl IntoResponse {
    let variant = if req.team { Variant::Team } else { Variant::Faculty };
    let settings = &state.settings;

    let request = match RunRequest::from_settings(
        settings,
        &req.topic,
        req.api_key.as_deref(),
        req.serpapi_key.as_deref(),
        variant,
    ) {
        Ok(request) => request,
        Err(e @ (LecternError::MissingCredential(_) | LecternError::MissingTopic(_))) => {
            return error_response(StatusCode::BAD_REQUEST, e)
        }
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    };
    let request = request.with_output_dir(req.save.then(|| settings.output_dir()));

    let runner = match FacultyRunner::for_request(&request, settings) {
        Ok(runner) => runner,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    };

    let runs = runner.run_all(&request).await;

    Json(FacultyResponse {
        topic: request.topic.clone(),
        variant,
        results: runs.into_iter().map(AgentResult::from).collect(),
    })
    .into_response()
}
