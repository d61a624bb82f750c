//! Runs faculty agents against a chat model.

use super::chat::{ChatMessage, ChatModel, ChatRequest, ChatReply, OpenAiChat, ToolInvocation, ToolSpec};
use super::report::write_report;
use super::request::{RunRequest, Variant};
use super::search::{format_hits, parse_search_arguments, search_tool_spec, WebSearch, SEARCH_TOOL_NAME};
use super::{AgentKind, AgentResponse, AgentRun, RunFailure, ToolCallRecord};
use crate::config::{LlmSettings, Prompts, Settings};
use crate::error::Result;
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Progress notifications from [`FacultyRunner::run_all_with_progress`].
#[derive(Debug)]
pub enum RunEvent<'a> {
    Started(AgentKind),
    Finished(&'a AgentRun),
}

/// Runs the faculty roster with fixed model parameters.
pub struct FacultyRunner {
    chat: Arc<dyn ChatModel>,
    prompts: Prompts,
    model: String,
    max_tokens: u32,
    temperature: f32,
    system_prompt: String,
    max_iterations: usize,
}

impl FacultyRunner {
    /// Create a runner over any chat backend.
    pub fn new(chat: Arc<dyn ChatModel>, prompts: Prompts, llm: &LlmSettings) -> Self {
        Self {
            chat,
            prompts,
            model: llm.model.clone(),
            max_tokens: llm.max_tokens,
            temperature: llm.temperature,
            system_prompt: llm.system_prompt.clone(),
            max_iterations: llm.max_iterations.max(1),
        }
    }

    /// Create a runner backed by OpenAI using the request's key and configured prompts.
    pub fn for_request(request: &RunRequest, settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let chat = OpenAiChat::new(
            &request.api_key,
            Duration::from_secs(settings.llm.timeout_secs),
        )?;
        Ok(Self::new(Arc::new(chat), prompts, &settings.llm))
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    fn chat_request(&self, messages: Vec<ChatMessage>, tools: Vec<ToolSpec>) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            tools,
        }
    }

    /// Run one agent with its topic template and the fixed system preamble.
    #[instrument(skip(self))]
    pub async fn run(&self, agent: AgentKind, topic: &str) -> std::result::Result<AgentResponse, RunFailure> {
        let prompt = self
            .prompts
            .render_topic(&self.prompts.for_agent(agent).template, topic);

        let request = self.chat_request(
            vec![
                ChatMessage::System(self.system_prompt.clone()),
                ChatMessage::User(prompt),
            ],
            Vec::new(),
        );

        let reply = self
            .chat
            .complete(&request)
            .await
            .map_err(|e| RunFailure::external(e.to_string()))?;

        Self::finish(reply, Vec::new(), 1)
    }

    /// Run one agent with its persona instructions, offering web search when
    /// the agent has the capability and a backend is present.
    #[instrument(skip(self, search), fields(search = search.is_some()))]
    pub async fn run_team(
        &self,
        agent: AgentKind,
        topic: &str,
        search: Option<&dyn WebSearch>,
    ) -> std::result::Result<AgentResponse, RunFailure> {
        let prompt = self.prompts.for_agent(agent);
        let mut messages = vec![
            ChatMessage::System(format!(
                "Your role: {}\n\n{}",
                agent.role(),
                self.prompts.render_topic(&prompt.instructions, topic)
            )),
            ChatMessage::User(self.prompts.render_topic(&self.prompts.team_user, topic)),
        ];

        let search = search.filter(|_| agent.uses_search());
        let tools = match search {
            Some(_) => vec![search_tool_spec()],
            None => Vec::new(),
        };

        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(RunFailure::external(format!(
                    "Agent exceeded maximum iterations ({})",
                    self.max_iterations
                )));
            }

            debug!("{} iteration {}", agent, iterations);

            let request = self.chat_request(messages.clone(), tools.clone());
            let reply = self
                .chat
                .complete(&request)
                .await
                .map_err(|e| RunFailure::external(e.to_string()))?;

            let backend = match search {
                Some(backend) if !reply.tool_calls.is_empty() => backend,
                _ => return Self::finish(reply, tool_calls_made, iterations),
            };

            messages.push(ChatMessage::Assistant {
                content: reply.content.clone(),
                tool_calls: reply.tool_calls.clone(),
            });

            for tool_call in &reply.tool_calls {
                let record = Self::execute_tool_call(backend, tool_call).await;
                messages.push(ChatMessage::Tool {
                    call_id: tool_call.id.clone(),
                    content: record.result.clone(),
                });
                tool_calls_made.push(record);
            }
        }
    }

    /// Run one agent in the request's variant.
    pub async fn run_agent(
        &self,
        agent: AgentKind,
        request: &RunRequest,
    ) -> std::result::Result<AgentResponse, RunFailure> {
        match request.variant {
            Variant::Faculty => self.run(agent, &request.topic).await,
            Variant::Team => {
                self.run_team(agent, &request.topic, request.search.as_deref())
                    .await
            }
        }
    }

    /// Run every agent in roster order.
    pub async fn run_all(&self, request: &RunRequest) -> Vec<AgentRun> {
        self.run_all_with_progress(request, |_| {}).await
    }

    /// Run every agent in roster order, reporting progress.
    ///
    /// A failing agent is recorded and the next one still runs.
    #[instrument(skip(self, request, on_event), fields(topic = %request.topic, variant = %request.variant))]
    pub async fn run_all_with_progress<F>(&self, request: &RunRequest, mut on_event: F) -> Vec<AgentRun>
    where
        F: FnMut(RunEvent<'_>) + Send,
    {
        let mut runs = Vec::with_capacity(AgentKind::ALL.len());

        for agent in AgentKind::ALL {
            on_event(RunEvent::Started(agent));
            info!("Running {}", agent);

            let outcome = self.run_agent(agent, request).await;

            let report = match (&outcome, &request.output_dir) {
                (Ok(response), Some(dir)) => Some(write_report(
                    dir,
                    agent.file_label(),
                    &request.topic,
                    &response.content,
                    &Local::now(),
                )),
                _ => None,
            };

            match (&outcome, &report) {
                (Err(e), _) => warn!("{} failed: {}", agent, e),
                (Ok(_), Some(Err(e))) => warn!("{} report not saved: {}", agent, e),
                _ => {}
            }

            let run = AgentRun {
                agent,
                topic: request.topic.clone(),
                outcome,
                report,
            };
            on_event(RunEvent::Finished(&run));
            runs.push(run);
        }

        runs
    }

    /// Execute one tool call; failures become text for the model.
    async fn execute_tool_call(search: &dyn WebSearch, tool_call: &ToolInvocation) -> ToolCallRecord {
        let name = &tool_call.name;
        let arguments = &tool_call.arguments;

        info!("Agent calling tool: {} with args: {}", name, arguments);

        let result = if name == SEARCH_TOOL_NAME {
            match parse_search_arguments(arguments) {
                Ok(query) => match search.search(&query).await {
                    Ok(hits) => format_hits(&hits),
                    Err(e) => format!("Tool error: {}", e),
                },
                Err(e) => format!("Failed to parse tool call: {}", e),
            }
        } else {
            format!("Unknown tool: {}", name)
        };

        ToolCallRecord {
            name: name.clone(),
            arguments: arguments.clone(),
            result,
        }
    }

    fn finish(
        reply: ChatReply,
        tool_calls: Vec<ToolCallRecord>,
        iterations: usize,
    ) -> std::result::Result<AgentResponse, RunFailure> {
        let content = reply
            .content
            .ok_or_else(|| RunFailure::external("Empty response from model"))?;

        Ok(AgentResponse {
            content,
            tool_calls,
            iterations,
        })
    }
}
