//! CLI command implementations.

mod agents;
mod config;
mod faculty;
mod serve;
mod study;

pub use agents::run_agents;
pub use config::run_config;
pub use faculty::run_faculty;
pub use serve::run_serve;
pub use study::run_study;
