//! Agents command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::faculty::AgentKind;
use anyhow::Result;

/// Run the agents command.
pub fn run_agents(settings: &Settings) -> Result<()> {
    let search_configured = settings.resolve_search_key(None).is_some();

    Output::header("Your AI Teaching Faculty");
    for agent in AgentKind::ALL {
        println!();
        Output::list_item(&format!("{} ({})", agent.persona(), agent.name()));
        Output::kv("Role", agent.role());
        Output::kv("Delivers", agent.deliverable());
        if agent.uses_search() {
            let status = if search_configured {
                "web search (team mode)"
            } else {
                "web search in team mode when a SerpAPI key is set"
            };
            Output::kv("Tools", status);
        }
    }
    println!();

    Ok(())
}
