//! The individual probes and the requests they send

use super::{CompatibilityChecker, MIN_SDK_VERSION};
use crate::{
    client::{betas, ClientProvider, ContainerParams, MessageRequest, MessagesApi, SkillReference, ToolSpec},
    error::{AppError, Result},
};
use semver::Version;

/// Source filter used when listing skills
pub const SKILL_SOURCE: &str = "anthropic";

/// Skill attached to the full workflow request
const WORKFLOW_SKILL: &str = "xlsx";

/// Skills listed by id in the report
const LISTED_SKILLS: usize = 5;

/// Beta flags of the full workflow request
pub const FULL_SKILLS_BETAS: [&str; 3] = [betas::CODE_EXECUTION, betas::FILES_API, betas::SKILLS];

pub fn connection_request(model: &str) -> MessageRequest {
    MessageRequest::new(model, 50, "Say 'API connected'")
}

pub fn beta_request(model: &str) -> MessageRequest {
    MessageRequest::new(model, 50, "Say 'Beta API works'").with_container(ContainerParams::empty())
}

pub fn code_execution_request(model: &str) -> MessageRequest {
    MessageRequest::new(model, 1024, "Use Python to calculate 2+2, then tell me the result")
        .with_tool(ToolSpec::code_execution())
}

pub fn full_skills_request(model: &str) -> MessageRequest {
    MessageRequest::new(model, 4096, "Create a simple Excel file with cell A1 set to 'Hello'")
        .with_container(ContainerParams::empty().with_skill(SkillReference::anthropic(WORKFLOW_SKILL)))
        .with_tool(ToolSpec::code_execution())
}

/// Compare a reported binding version with the minimum; a leading `v` is allowed
pub(crate) fn meets_minimum(reported: &str) -> Result<bool> {
    let reported = Version::parse(reported.trim().trim_start_matches('v'))?;
    let minimum = Version::parse(MIN_SDK_VERSION)?;
    Ok(reported >= minimum)
}

impl<P: ClientProvider> CompatibilityChecker<P> {
    pub(super) fn check_sdk_version(&mut self) -> bool {
        let Some(reported) = self.provider.sdk_version() else {
            self.failure("Client SDK binding not available");
            self.detail(&format!("Build with a Messages API client binding >= {}", MIN_SDK_VERSION));
            return false;
        };

        self.success(&format!("Client SDK version: {}", reported));

        match meets_minimum(&reported) {
            Ok(true) => {
                self.success("SDK version supports Skills");
                true
            }
            Ok(false) => {
                self.warning(&format!("SDK version too old, need >= {}", MIN_SDK_VERSION));
                self.detail("Upgrade the client binding");
                false
            }
            Err(e) => {
                self.failure(&format!("Error: {}", e));
                false
            }
        }
    }

    /// Returns the connected client when the basic request succeeded
    pub(super) async fn check_connection(&mut self) -> Option<P::Client> {
        let Some(api_key) = self.config.api_key.clone() else {
            self.failure("ANTHROPIC_API_KEY not found");
            self.detail("Set it in the .env file or the environment");
            return None;
        };

        if let Some(preview) = self.config.api_key_preview() {
            self.success(&format!("API key loaded: {}", preview));
        }

        let client = match self.provider.connect(&api_key) {
            Ok(client) => client,
            Err(e) => {
                self.probe_failed("api_connection", &e).await;
                self.failure(&format!("API connection failed: {}", e));
                return None;
            }
        };

        match client.create_message(&connection_request(&self.config.model)).await {
            Ok(message) => {
                self.success("Basic API connection succeeded");
                let text = message.first_text().unwrap_or("(no text content)").to_string();
                self.detail(&format!("Response: {}", text));
                Some(client)
            }
            Err(e) => {
                self.probe_failed("api_connection", &e).await;
                self.failure(&format!("API connection failed: {}", e));
                None
            }
        }
    }

    pub(super) async fn check_beta_api(&mut self, client: &P::Client) -> bool {
        let request = beta_request(&self.config.model);

        match client.create_beta_message(&request, &[]).await {
            Ok(_) => {
                self.success("Beta API (/v1/messages?beta=true) is available");
                self.success("container parameter accepted");
                true
            }
            Err(e) => {
                self.probe_failed("beta_api", &e).await;
                if e.is_missing_endpoint() {
                    self.failure("Beta messages endpoint does not exist");
                    self.detail("The endpoint does not expose the Beta API");
                } else if e.mentions_parameter("container") {
                    self.failure("container parameter not recognized");
                    self.detail("The API does not support the Skills feature");
                } else {
                    self.warning(&format!("Other error: {}", e));
                }
                false
            }
        }
    }

    pub(super) async fn check_skills_listing(&mut self, client: &P::Client) -> bool {
        match client.list_skills(SKILL_SOURCE).await {
            Ok(skills) => {
                self.success("Skills API is available");
                self.detail(&format!("Found {} Anthropic-managed skills:", skills.data.len()));
                for skill in skills.data.iter().take(LISTED_SKILLS) {
                    let title = skill.display_title.as_deref().unwrap_or("(untitled)");
                    self.detail(&format!("  - {}: {}", skill.id, title));
                }
                true
            }
            Err(e) => {
                self.probe_failed("skills_api", &e).await;
                if e.is_missing_endpoint() {
                    self.failure("Skills endpoint (/v1/skills) does not exist");
                    self.detail("The endpoint does not support the Skills API");
                } else {
                    self.warning(&format!("Skills API call failed: {}", e));
                    self.detail("Possible causes:");
                    self.detail("  1. The provider does not support the Skills feature");
                    self.detail("  2. A special API key or permission is required");
                }
                false
            }
        }
    }

    pub(super) async fn check_code_execution(&mut self, client: &P::Client) -> bool {
        let request = code_execution_request(&self.config.model);

        match client.create_beta_message(&request, &[betas::CODE_EXECUTION]).await {
            Ok(_) => {
                self.success("Code execution tool is available");
                true
            }
            Err(e) => {
                self.probe_failed("code_execution", &e).await;
                self.failure(&format!("Code execution unavailable: {}", e));
                false
            }
        }
    }

    pub(super) async fn check_full_skills(&mut self, client: &P::Client) -> bool {
        let request = full_skills_request(&self.config.model);

        let message = match client.create_beta_message(&request, &FULL_SKILLS_BETAS).await {
            Ok(message) => message,
            Err(e) => {
                self.probe_failed("full_skills", &e).await;
                self.failure(&format!("Skills call failed: {}", e));
                self.detail("Possible causes:");
                self.detail("  1. The provider does not support Anthropic Skills");
                self.detail("  2. The API endpoint differs and needs special configuration");
                self.detail("  3. The provider's own skill system must be used instead");
                return false;
            }
        };

        self.success("Skills request succeeded");
        self.detail(&format!("Input tokens: {}", message.usage.input_tokens));
        self.detail(&format!("Output tokens: {}", message.usage.output_tokens));

        let file_ids = message.produced_file_ids();
        match file_ids.first() {
            Some(file_id) => {
                self.success(&format!("File creation detected (file_id: {})", file_id));
                self.success("Skills feature fully available!");
                true
            }
            None => {
                self.warning("Skills API call succeeded, but no file creation was detected");
                self.detail("Possible causes:");
                self.detail("  1. The skill loaded but did not run");
                self.detail("  2. File creation failed without an error");
                false
            }
        }
    }

    async fn probe_failed(&self, probe: &str, error: &AppError) {
        let mut builder = self
            .logger
            .warn("Probe request failed")
            .field("probe", probe)
            .error_info(error);

        if let Some(id) = self.logger.current_correlation_id().await {
            builder = builder.correlation_id(&id);
        }

        builder.log().await;
    }
}
