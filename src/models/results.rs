//! Probe outcomes, the ordered result mapping and report guidance

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six probes, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeName {
    SdkVersion,
    ApiConnection,
    BetaApi,
    SkillsApi,
    CodeExecution,
    FullSkills,
}

impl ProbeName {
    /// All probes in the order they run
    pub const ALL: [ProbeName; 6] = [
        ProbeName::SdkVersion,
        ProbeName::ApiConnection,
        ProbeName::BetaApi,
        ProbeName::SkillsApi,
        ProbeName::CodeExecution,
        ProbeName::FullSkills,
    ];

    /// Stable key used in the summary
    pub fn key(&self) -> &'static str {
        match self {
            Self::SdkVersion => "sdk_version",
            Self::ApiConnection => "api_connection",
            Self::BetaApi => "beta_api",
            Self::SkillsApi => "skills_api",
            Self::CodeExecution => "code_execution",
            Self::FullSkills => "full_skills",
        }
    }

    /// Section title printed before the probe runs
    pub fn title(&self) -> &'static str {
        match self {
            Self::SdkVersion => "Client SDK version",
            Self::ApiConnection => "Basic API connection",
            Self::BetaApi => "Beta API support (container parameter)",
            Self::SkillsApi => "Skills API (list skills)",
            Self::CodeExecution => "Code execution tool",
            Self::FullSkills => "Full skills workflow",
        }
    }

    /// One-based position in the checklist
    pub fn number(&self) -> usize {
        match self {
            Self::SdkVersion => 1,
            Self::ApiConnection => 2,
            Self::BetaApi => 3,
            Self::SkillsApi => 4,
            Self::CodeExecution => 5,
            Self::FullSkills => 6,
        }
    }
}

impl fmt::Display for ProbeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Ordered mapping from probe name to pass/fail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResults {
    entries: Vec<(ProbeName, bool)>,
}

impl ProbeResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome. Re-recording a probe replaces its value in place.
    pub fn record(&mut self, name: ProbeName, passed: bool) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = passed,
            None => self.entries.push((name, passed)),
        }
    }

    /// Outcome of a probe; probes that never ran count as failed
    pub fn passed(&self, name: ProbeName) -> bool {
        self.get(name).unwrap_or(false)
    }

    pub fn get(&self, name: ProbeName) -> Option<bool> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, passed)| *passed)
    }

    pub fn contains(&self, name: ProbeName) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProbeName, bool)> + '_ {
        self.entries.iter().copied()
    }

    pub fn passed_count(&self) -> usize {
        self.entries.iter().filter(|(_, passed)| *passed).count()
    }

    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flags the guidance decision table is keyed on
    pub fn guidance_flags(&self) -> GuidanceFlags {
        GuidanceFlags {
            full_skills: self.passed(ProbeName::FullSkills),
            api_connection: self.passed(ProbeName::ApiConnection),
            beta_api: self.passed(ProbeName::BetaApi),
            skills_api: self.passed(ProbeName::SkillsApi),
        }
    }
}

/// Inputs to the guidance decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidanceFlags {
    pub full_skills: bool,
    pub api_connection: bool,
    pub beta_api: bool,
    pub skills_api: bool,
}

/// Closing advice printed under the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Guidance {
    /// The end-to-end skills workflow produced a file
    FullySupported,
    /// Plain messages work but the beta namespace does not
    BetaApiMissing,
    /// Beta messages work but skills cannot be listed
    SkillsListingMissing,
    /// Anything else
    Unsupported,
}

impl Guidance {
    /// Decision table; rows are checked top to bottom
    pub fn select(flags: GuidanceFlags) -> Self {
        if flags.full_skills {
            Self::FullySupported
        } else if flags.api_connection && !flags.beta_api {
            Self::BetaApiMissing
        } else if flags.beta_api && !flags.skills_api {
            Self::SkillsListingMissing
        } else {
            Self::Unsupported
        }
    }

    /// Headline line of the guidance block
    pub fn headline(&self) -> &'static str {
        match self {
            Self::FullySupported => "Your environment fully supports Claude Skills!",
            Self::BetaApiMissing => "Problem detected: the API connection works, but the Beta API is unavailable",
            Self::SkillsListingMissing => "Problem detected: the Beta API works, but the Skills API is unavailable",
            Self::Unsupported => "Your environment does not currently support Claude Skills",
        }
    }

    /// Follow-up lines, already indented for display
    pub fn details(&self) -> &'static [&'static str] {
        match self {
            Self::FullySupported => &[
                "You can use the skills tutorials and notebooks directly.",
            ],
            Self::BetaApiMissing => &[
                "Possible solutions:",
                "  1. If you are using a third-party provider such as Zhipu AI:",
                "     - it may not support Anthropic's Skills feature",
                "     - use the provider's own tool/plugin system instead",
                "  2. If you are using another third-party API:",
                "     - confirm that the service is compatible with the Anthropic API",
                "     - check its documentation for Skills/Tools support",
                "  3. To use the full Skills feature:",
                "     - use the official Anthropic API",
                "     - sign up at https://console.anthropic.com/",
            ],
            Self::SkillsListingMissing => &[
                "Possible causes:",
                "  - the third-party API does not support listing skills",
                "  - skills may still be usable (see the full workflow result)",
            ],
            Self::Unsupported => &[
                "Suggestions:",
                "  1. Use the official Anthropic API: https://console.anthropic.com/",
                "  2. Or ask your provider whether it offers a similar tool/plugin feature",
            ],
        }
    }
}
