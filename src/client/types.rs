//! Request and response shapes of the Messages, beta and Skills endpoints

use serde::{Deserialize, Serialize};

/// Beta feature flags sent in the `anthropic-beta` header
pub mod betas {
    pub const CODE_EXECUTION: &str = "code-execution-2025-08-25";
    pub const FILES_API: &str = "files-api-2025-04-14";
    pub const SKILLS: &str = "skills-2025-10-02";
}

pub const CODE_EXECUTION_TOOL_TYPE: &str = "code_execution_20250825";
pub const CODE_EXECUTION_TOOL_NAME: &str = "code_execution";

/// Body of `POST /v1/messages`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<InputMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerParams>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolSpec>,
}

impl MessageRequest {
    /// Single-turn request with one user prompt
    pub fn new<M: Into<String>, P: Into<String>>(model: M, max_tokens: u32, prompt: P) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            messages: vec![InputMessage::user(prompt)],
            container: None,
            tools: Vec::new(),
        }
    }

    pub fn with_container(mut self, container: ContainerParams) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_tool(mut self, tool: ToolSpec) -> Self {
        self.tools.push(tool);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputMessage {
    pub role: String,
    pub content: String,
}

impl InputMessage {
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// The `container` parameter; serializes to `{}` when no skills are attached
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContainerParams {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<SkillReference>,
}

impl ContainerParams {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_skill(mut self, skill: SkillReference) -> Self {
        self.skills.push(skill);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillReference {
    /// `anthropic` for managed skills, `custom` for uploaded ones
    #[serde(rename = "type")]
    pub source: String,
    pub skill_id: String,
    pub version: String,
}

impl SkillReference {
    pub fn anthropic<S: Into<String>>(skill_id: S) -> Self {
        Self {
            source: "anthropic".to_string(),
            skill_id: skill_id.into(),
            version: "latest".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

impl ToolSpec {
    pub fn code_execution() -> Self {
        Self {
            kind: CODE_EXECUTION_TOOL_TYPE.to_string(),
            name: CODE_EXECUTION_TOOL_NAME.to_string(),
        }
    }
}

/// Response of `POST /v1/messages`.
///
/// Every field is defaulted: third-party endpoints often omit some of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Usage,
}

impl Message {
    /// Text of the first text block
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| block.text.as_deref())
    }

    /// File ids produced by server-side tool runs, in response order
    pub fn produced_file_ids(&self) -> Vec<String> {
        self.content.iter().flat_map(ContentBlock::produced_file_ids).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

/// One block of a response's `content` array
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
    /// Payload of tool result blocks; shape depends on the tool
    #[serde(default)]
    pub content: Option<serde_json::Value>,
}

impl ContentBlock {
    /// `tool_result`, `code_execution_tool_result`, `bash_code_execution_tool_result`, ...
    pub fn is_tool_result(&self) -> bool {
        self.kind.ends_with("tool_result")
    }

    /// Non-empty `file_id`s carried by this block's tool output
    pub fn produced_file_ids(&self) -> Vec<String> {
        if !self.is_tool_result() {
            return Vec::new();
        }

        let Some(payload) = self.content.clone() else {
            return Vec::new();
        };

        let outputs = match serde_json::from_value::<ToolResultPayload>(payload) {
            Ok(ToolResultPayload::Execution { content }) => content,
            Ok(ToolResultPayload::Outputs(outputs)) => outputs,
            Err(_) => return Vec::new(),
        };

        outputs
            .into_iter()
            .filter_map(|output| output.file_id)
            .filter(|id| !id.trim().is_empty())
            .collect()
    }
}

/// Server tool results nest outputs under `content.content`; plain tool results
/// carry an array directly.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ToolResultPayload {
    Execution {
        #[serde(default)]
        content: Vec<ExecutionOutput>,
    },
    Outputs(Vec<ExecutionOutput>),
}

#[derive(Debug, Deserialize)]
struct ExecutionOutput {
    #[serde(default)]
    file_id: Option<String>,
}

/// Response of `GET /v1/skills`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillList {
    #[serde(default)]
    pub data: Vec<SkillSummary>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillSummary {
    pub id: String,
    #[serde(default)]
    pub display_title: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub latest_version: Option<String>,
}

/// Error body: `{"type": "error", "error": {"type": ..., "message": ...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}
