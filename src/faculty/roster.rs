//! The fixed roster of teaching agents.

use serde::{Deserialize, Serialize};

/// One of the four faculty personas, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Professor,
    AcademicAdvisor,
    ResearchLibrarian,
    TeachingAssistant,
}

impl AgentKind {
    /// All agents in the order they run.
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Professor,
        AgentKind::AcademicAdvisor,
        AgentKind::ResearchLibrarian,
        AgentKind::TeachingAssistant,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::Professor => "Professor",
            AgentKind::AcademicAdvisor => "Academic Advisor",
            AgentKind::ResearchLibrarian => "Research Librarian",
            AgentKind::TeachingAssistant => "Teaching Assistant",
        }
    }

    /// Name used in report file names and headers.
    pub fn file_label(&self) -> &'static str {
        match self {
            AgentKind::Professor => "Professor",
            AgentKind::AcademicAdvisor => "Academic_Advisor",
            AgentKind::ResearchLibrarian => "Research_Librarian",
            AgentKind::TeachingAssistant => "Teaching_Assistant",
        }
    }

    /// The persona the agent speaks as.
    pub fn persona(&self) -> &'static str {
        match self {
            AgentKind::Professor => "Dr. Sarah Mitchell",
            AgentKind::AcademicAdvisor => "James Chen",
            AgentKind::ResearchLibrarian => "Maria Rodriguez",
            AgentKind::TeachingAssistant => "Alex Kim",
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            AgentKind::Professor => "Knowledge Foundation Builder for ADHD Adult Learner",
            AgentKind::AcademicAdvisor => "Learning Path Designer for Career Changer",
            AgentKind::ResearchLibrarian => "ADHD-Friendly Resource Curator",
            AgentKind::TeachingAssistant => "Practice Coordinator for Adult ADHD Learner",
        }
    }

    /// Heading for the agent's section of the output.
    pub fn deliverable(&self) -> &'static str {
        match self {
            AgentKind::Professor => "Knowledge Foundation",
            AgentKind::AcademicAdvisor => "Learning Roadmap",
            AgentKind::ResearchLibrarian => "Resource Library",
            AgentKind::TeachingAssistant => "Practice Materials",
        }
    }

    /// Progress message shown while the agent works.
    pub fn progress_message(&self) -> &'static str {
        match self {
            AgentKind::Professor => "Creating knowledge foundation...",
            AgentKind::AcademicAdvisor => "Designing learning roadmap...",
            AgentKind::ResearchLibrarian => "Curating learning resources...",
            AgentKind::TeachingAssistant => "Creating practice materials...",
        }
    }

    /// Whether the agent gets the web-search tool when a search key is configured.
    pub fn uses_search(&self) -> bool {
        matches!(
            self,
            AgentKind::ResearchLibrarian | AgentKind::TeachingAssistant
        )
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "professor" => Ok(AgentKind::Professor),
            "academic_advisor" | "advisor" => Ok(AgentKind::AcademicAdvisor),
            "research_librarian" | "librarian" => Ok(AgentKind::ResearchLibrarian),
            "teaching_assistant" | "assistant" => Ok(AgentKind::TeachingAssistant),
            _ => Err(format!("Unknown agent: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_order() {
        let names: Vec<&str> = AgentKind::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(
            names,
            vec!["Professor", "Academic Advisor", "Research Librarian", "Teaching Assistant"]
        );
    }

    #[test]
    fn test_search_capability() {
        let with_search: Vec<AgentKind> =
            AgentKind::ALL.into_iter().filter(|a| a.uses_search()).collect();
        assert_eq!(
            with_search,
            vec![AgentKind::ResearchLibrarian, AgentKind::TeachingAssistant]
        );
    }

    #[test]
    fn test_parse_agent_names() {
        assert_eq!("Teaching Assistant".parse::<AgentKind>().unwrap(), AgentKind::TeachingAssistant);
        assert_eq!("academic_advisor".parse::<AgentKind>().unwrap(), AgentKind::AcademicAdvisor);
        assert_eq!("librarian".parse::<AgentKind>().unwrap(), AgentKind::ResearchLibrarian);
        assert!("dean".parse::<AgentKind>().is_err());
    }
}
