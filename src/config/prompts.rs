//! Prompt templates for the teaching faculty.
//!
//! Every agent carries two prompts: a `template` used by the single-call
//! faculty variant (must contain `{{topic}}`), and persona `instructions`
//! used as the system message by the team variant. Both can be overridden by
//! an `agents.toml` file in the custom prompts directory.

use crate::error::{LecternError, Result};
use crate::faculty::AgentKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Placeholder substituted with the user's topic.
pub const TOPIC_PLACEHOLDER: &str = "{{topic}}";

/// Prompts for a single agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPrompt {
    /// Instruction template for the faculty variant.
    pub template: String,
    /// Persona instructions (system message) for the team variant.
    pub instructions: String,
}

/// Collection of all agent prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompts {
    pub professor: AgentPrompt,
    pub academic_advisor: AgentPrompt,
    pub research_librarian: AgentPrompt,
    pub teaching_assistant: AgentPrompt,
    /// User message template for the team variant.
    pub team_user: String,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Partial override of one agent's prompts, as read from `agents.toml`.
#[derive(Debug, Default, Deserialize)]
struct AgentPromptOverride {
    template: Option<String>,
    instructions: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PromptOverrides {
    professor: Option<AgentPromptOverride>,
    academic_advisor: Option<AgentPromptOverride>,
    research_librarian: Option<AgentPromptOverride>,
    teaching_assistant: Option<AgentPromptOverride>,
    team_user: Option<String>,
}

impl AgentPromptOverride {
    fn apply(self, prompt: &mut AgentPrompt) {
        if let Some(template) = self.template {
            prompt.template = template;
        }
        if let Some(instructions) = self.instructions {
            prompt.instructions = instructions;
        }
    }
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            professor: AgentPrompt {
                template: r#"You are Dr. Sarah Mitchell, creating a knowledge foundation for a 30-year-old male IT student at Media Design School Auckland who has ADHD and has been away from computers for 12 years.

TOPIC: {{topic}}

Create a comprehensive but ADHD-friendly knowledge base that includes:
1. 🎯 Why this matters for IT careers in Auckland (specific jobs and salaries)
2. ⚡ Simple explanation with everyday analogies
3. 📚 Core concepts in bite-sized chunks (2-3 sentences each)
4. 💻 Real applications at Auckland tech companies
5. 🔗 Connections to current semester subjects (Data Structures, Cloud Computing, Networking, Cybersecurity)
6. 🧠 Memory aids for ADHD learners

Use lots of white space, clear headers, and confidence-building language."#.to_string(),

                instructions: r#"You are Dr. Sarah Mitchell, creating a knowledge base for a 30-year-old male IT student at Media Design School Auckland who has ADHD and has been away from computers for 12 years.

STUDENT PROFILE:
- Returning to tech after 12-year gap
- ADHD - needs structure, frequent breaks, bite-sized information
- Adult learner - values career relevance and practical applications
- Currently studying: Data Structures & Algorithms, Cloud Computing, Data & Networking, Cybersecurity

CREATE COMPREHENSIVE KNOWLEDGE BASE:
1. Start with "Why this matters for your IT career in Auckland"
2. Use simple, everyday language with analogies (cars, cooking, etc.)
3. Break complex topics into small chunks (2-3 sentences max)
4. Include frequent break suggestions
5. Connect to real Auckland job opportunities and salaries
6. Use ADHD-friendly formatting with lots of white space
7. Include confidence-building statements throughout
8. Relate to current semester subjects when possible

Format with clear headers, bullet points, and visual breaks."#.to_string(),
            },

            academic_advisor: AgentPrompt {
                template: r#"You are James Chen, academic advisor for career changers with ADHD at Media Design School.

TOPIC: {{topic}}

Create a realistic learning roadmap for a 30-year-old returning to tech:
1. 🎯 4-6 week timeline with ADHD accommodations
2. ⏰ Daily 20-30 minute study sessions
3. ⚡ Energy-based task scheduling
4. 💰 Auckland job market connections
5. 🏆 Milestone celebrations and progress tracking
6. 💪 Confidence building for career changers

Format as week-by-week plan with specific daily tasks."#.to_string(),

                instructions: r#"You are James Chen, academic advisor specializing in career transitions for ADHD learners.

Create a learning roadmap that:
1. Acknowledges the student is 30 and changing careers
2. Provides realistic timelines with ADHD accommodations
3. Breaks learning into 15-30 minute daily sessions
4. Includes energy-based scheduling (high/medium/low energy tasks)
5. Connects to Auckland job market and salary expectations
6. Addresses age concerns positively
7. Integrates with current semester subjects
8. Includes milestone celebrations and progress tracking

Format as a week-by-week plan with specific daily tasks."#.to_string(),
            },

            research_librarian: AgentPrompt {
                template: r#"You are Maria Rodriguez, expert in ADHD-friendly learning resources.

TOPIC: {{topic}}

Curate learning resources that are:
1. 🎥 ADHD-friendly (visual, short, engaging)
2. 📖 Time-estimated for planning
3. ⭐ Difficulty-rated clearly
4. 🌏 Relevant to Auckland/NZ job market
5. 🛠️ Connected to semester tools (AWS, Python, NETCAD, VS)
6. 📱 Available in multiple formats

Include free resources, time estimates, and why each is good for ADHD learners."#.to_string(),

                instructions: r#"You are Maria Rodriguez, expert librarian specializing in ADHD-friendly learning resources.

Curate resources that:
1. Are ADHD-friendly (short videos, interactive content, visual learning)
2. Include time estimates for each resource
3. Rate difficulty levels clearly
4. Focus on Auckland/NZ job market relevance
5. Provide multiple learning modalities (visual, hands-on, reading)
6. Include both free and premium options
7. Connect to current semester tools (AWS, Python, VS, NETCAD)
8. Suggest optimal times to use each resource type

If the search_web tool is available, search for current resources. Otherwise, recommend well-known platforms."#.to_string(),
            },

            teaching_assistant: AgentPrompt {
                template: r#"You are Alex Kim, specializing in hands-on ADHD learning.

TOPIC: {{topic}}

Create practice materials with:
1. 🏆 5-10 minute "quick wins" for immediate satisfaction
2. 📈 Progressive difficulty building
3. 📋 Step-by-step instructions with checkpoints
4. 💼 Portfolio-building opportunities
5. 🌏 Auckland business scenarios
6. 🔧 Integration with semester tools
7. 🎉 Achievement celebrations

Focus on confidence building and hireable skills for Auckland IT market."#.to_string(),

                instructions: r#"You are Alex Kim, teaching assistant specializing in hands-on learning for ADHD students.

Create practice materials that:
1. Start with 5-10 minute "quick wins" for immediate satisfaction
2. Build to longer projects gradually
3. Include step-by-step instructions with visual confirmations
4. Provide troubleshooting for common mistakes
5. Connect exercises to portfolio building
6. Include real-world Auckland business scenarios
7. Integrate with semester tools and subjects
8. Offer multiple difficulty levels for different energy states
9. Include achievement celebrations and progress tracking

Focus on building confidence while developing hireable skills."#.to_string(),
            },

            team_user: "Topic: {{topic}}. Remember this is for a 30-year-old ADHD student at Media Design School Auckland changing careers to IT.".to_string(),

            variables: HashMap::new(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    ///
    /// A custom `agents.toml` may override any subset of the built-in prompts.
    /// Templates that lose the `{{topic}}` placeholder are rejected here so a
    /// bad override fails at startup rather than mid-run.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let agents_path = PathBuf::from(shellexpand::tilde(dir).to_string()).join("agents.toml");
            if agents_path.exists() {
                let content = std::fs::read_to_string(&agents_path)?;
                let overrides: PromptOverrides = toml::from_str(&content)?;
                prompts.apply(overrides);
            }
        }

        prompts.validate()?;
        Ok(prompts)
    }

    fn apply(&mut self, overrides: PromptOverrides) {
        if let Some(o) = overrides.professor {
            o.apply(&mut self.professor);
        }
        if let Some(o) = overrides.academic_advisor {
            o.apply(&mut self.academic_advisor);
        }
        if let Some(o) = overrides.research_librarian {
            o.apply(&mut self.research_librarian);
        }
        if let Some(o) = overrides.teaching_assistant {
            o.apply(&mut self.teaching_assistant);
        }
        if let Some(team_user) = overrides.team_user {
            self.team_user = team_user;
        }
    }

    /// Check that every topic-bearing template still has its placeholder.
    pub fn validate(&self) -> Result<()> {
        for agent in AgentKind::ALL {
            if !self.for_agent(agent).template.contains(TOPIC_PLACEHOLDER) {
                return Err(LecternError::Config(format!(
                    "Prompt template for {} is missing the {} placeholder",
                    agent.name(),
                    TOPIC_PLACEHOLDER
                )));
            }
        }
        if !self.team_user.contains(TOPIC_PLACEHOLDER) {
            return Err(LecternError::Config(format!(
                "team_user prompt is missing the {} placeholder",
                TOPIC_PLACEHOLDER
            )));
        }
        Ok(())
    }

    /// Prompts for one agent.
    pub fn for_agent(&self, agent: AgentKind) -> &AgentPrompt {
        match agent {
            AgentKind::Professor => &self.professor,
            AgentKind::AcademicAdvisor => &self.academic_advisor,
            AgentKind::ResearchLibrarian => &self.research_librarian,
            AgentKind::TeachingAssistant => &self.teaching_assistant,
        }
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }

    /// Render a template with the topic substituted.
    pub fn render_topic(&self, template: &str, topic: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("topic".to_string(), topic.to_string());
        self.render_with_custom(template, &vars)
    }
}
