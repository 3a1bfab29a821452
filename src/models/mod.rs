//! Data models and structures for the skills compatibility tester

pub mod config;
pub mod results;

// Re-export main model types
pub use config::Config;
pub use results::{Guidance, GuidanceFlags, ProbeName, ProbeResults};
