//! Wire and domain types for the assistant platform

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_PROVIDER: &str = "openai";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 50;
pub const DEFAULT_TEMPERATURE: f64 = 0.0;
pub const DEFAULT_STATUS: &str = "active";

pub const SYSTEM_ROLE: &str = "system";

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// One entry of the model's message list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: SYSTEM_ROLE.to_string(),
            content: content.into(),
        }
    }
}

/// Model configuration as the platform reports it
///
/// Everything is optional on read. Fields Voxdesk does not manage are kept in
/// `extra` so a write-back does not drop them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelConfiguration {
    /// Content of the first system message, or "" when there is none
    pub fn system_prompt(&self) -> &str {
        self.messages
            .iter()
            .find(|m| m.role == SYSTEM_ROLE)
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }

    /// Build the complete configuration to send for a new system prompt
    ///
    /// Prior provider, model, tool ids, token limit, and temperature are kept;
    /// unset ones fall back to the platform defaults. The message list is
    /// replaced by a single system message holding `prompt`.
    pub fn with_system_prompt(base: Option<&ModelConfiguration>, prompt: &str) -> Self {
        let base = base.cloned().unwrap_or_default();

        let mut tool_ids = base.tool_ids.unwrap_or_default();
        let mut seen = std::collections::HashSet::new();
        tool_ids.retain(|id| seen.insert(id.clone()));

        Self {
            provider: Some(base.provider.unwrap_or_else(|| DEFAULT_PROVIDER.to_string())),
            model: Some(base.model.unwrap_or_else(|| DEFAULT_MODEL.to_string())),
            messages: vec![Message::system(prompt)],
            tool_ids: Some(tool_ids),
            max_tokens: Some(base.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)),
            temperature: Some(base.temperature.unwrap_or(DEFAULT_TEMPERATURE)),
            extra: base.extra,
        }
    }

    /// Whether every field the platform replaces is present
    pub fn is_complete(&self) -> bool {
        self.provider.is_some()
            && self.model.is_some()
            && self.tool_ids.is_some()
            && self.max_tokens.is_some()
            && self.temperature.is_some()
    }
}

/// Projection of an assistant owned by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantResource {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_status")]
    pub status: String,
}

/// An assistant together with its model configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantSnapshot {
    pub assistant: AssistantResource,
    pub model: Option<ModelConfiguration>,
}

/// Body returned by GET and PATCH `/assistant/{id}` and POST `/assistant`
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantPayload {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub model: Option<ModelConfiguration>,
}

impl From<AssistantPayload> for AssistantSnapshot {
    fn from(payload: AssistantPayload) -> Self {
        Self {
            assistant: AssistantResource {
                id: payload.id,
                name: payload.name.unwrap_or_default(),
                status: payload.status.unwrap_or_else(default_status),
            },
            model: payload.model,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateAssistantRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UpdateAssistantRequest<'a> {
    pub model: &'a ModelConfiguration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_payload_defaults_status_to_active() {
        let payload: AssistantPayload =
            serde_json::from_value(json!({"id": "a1", "name": "X"})).unwrap();
        let snapshot = AssistantSnapshot::from(payload);

        assert_eq!(snapshot.assistant.status, "active");
        assert_eq!(snapshot.assistant.name, "X");
        assert!(snapshot.model.is_none());
    }

    #[test]
    fn test_system_prompt_reads_first_system_message() {
        let model: ModelConfiguration = serde_json::from_value(json!({
            "messages": [
                {"role": "assistant", "content": "Hi there"},
                {"role": "system", "content": "Hello"},
                {"role": "system", "content": "Ignored"}
            ]
        }))
        .unwrap();
        assert_eq!(model.system_prompt(), "Hello");

        assert_eq!(ModelConfiguration::default().system_prompt(), "");
    }

    #[test]
    fn test_with_system_prompt_fills_defaults() {
        let merged = ModelConfiguration::with_system_prompt(None, "Take pizza orders");

        assert!(merged.is_complete());
        assert_eq!(
            serde_json::to_value(&merged).unwrap(),
            json!({
                "provider": "openai",
                "model": "gpt-4o",
                "messages": [{"role": "system", "content": "Take pizza orders"}],
                "toolIds": [],
                "maxTokens": 50,
                "temperature": 0.0
            })
        );
    }

    #[test]
    fn test_with_system_prompt_preserves_prior_settings() {
        let base: ModelConfiguration = serde_json::from_value(json!({
            "provider": "anthropic",
            "model": "claude-3-5-sonnet",
            "messages": [
                {"role": "system", "content": "Old"},
                {"role": "user", "content": "dropped"}
            ],
            "toolIds": ["t1", "t2", "t1"],
            "maxTokens": 250,
            "temperature": 0.7,
            "emotionRecognitionEnabled": true
        }))
        .unwrap();

        let merged = ModelConfiguration::with_system_prompt(Some(&base), "New");

        assert_eq!(merged.provider.as_deref(), Some("anthropic"));
        assert_eq!(merged.model.as_deref(), Some("claude-3-5-sonnet"));
        assert_eq!(merged.messages, vec![Message::system("New")]);
        assert_eq!(merged.tool_ids, Some(vec!["t1".to_string(), "t2".to_string()]));
        assert_eq!(merged.max_tokens, Some(250));
        assert_eq!(merged.temperature, Some(0.7));
        assert_eq!(
            merged.extra.get("emotionRecognitionEnabled"),
            Some(&json!(true))
        );
    }
}
