// ABOUTME: Local view state of a client's dashboard
// ABOUTME: Tagged workflow status plus the assistant projection, draft, and messages

use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

use voxdesk_assistant::{AssistantResource, AssistantSnapshot, ModelConfiguration};

/// How long a success notice stays visible
pub const SUCCESS_NOTICE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    #[default]
    Uninitialized,
    Loading,
    NoAssistant,
    Creating,
    Configured,
    Saving,
    Error,
}

impl WorkflowStatus {
    /// A remote round trip is in flight; no other operation may start
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            WorkflowStatus::Loading | WorkflowStatus::Creating | WorkflowStatus::Saving
        )
    }
}

#[derive(Debug, Clone)]
struct SuccessNotice {
    message: String,
    expires_at: Instant,
}

/// Mutable state behind one user's dashboard; never persisted
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub status: WorkflowStatus,
    pub assistant: Option<AssistantResource>,
    pub model: Option<ModelConfiguration>,
    pub draft: String,
    pub error: Option<String>,
    pub warning: Option<String>,
    notice: Option<SuccessNotice>,
}

impl ViewState {
    pub fn with_status(status: WorkflowStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Rebuild from a successful read; the draft becomes the stored prompt
    pub fn configured(snapshot: AssistantSnapshot) -> Self {
        let draft = snapshot
            .model
            .as_ref()
            .map(|model| model.system_prompt().to_string())
            .unwrap_or_default();

        Self {
            status: WorkflowStatus::Configured,
            assistant: Some(snapshot.assistant),
            model: snapshot.model,
            draft,
            ..Default::default()
        }
    }

    pub fn set_notice(&mut self, message: impl Into<String>, now: Instant) {
        self.notice = Some(SuccessNotice {
            message: message.into(),
            expires_at: now + SUCCESS_NOTICE_DURATION,
        });
    }

    /// The notice text while it is still visible at `now`
    pub fn notice(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|notice| now < notice.expires_at)
            .map(|notice| notice.message.as_str())
    }

    pub fn clear_expired_notice(&mut self, now: Instant) {
        if self.notice(now).is_none() {
            self.notice = None;
        }
    }

    pub fn to_view(&self, now: Instant) -> DashboardView {
        DashboardView {
            status: self.status,
            assistant: self.assistant.clone(),
            model: self.model.clone(),
            system_prompt_draft: self.draft.clone(),
            error: self.error.clone(),
            warning: self.warning.clone(),
            success_notice: self.notice(now).map(str::to_string),
        }
    }
}

/// Snapshot of the dashboard as the client renders it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub status: WorkflowStatus,
    pub assistant: Option<AssistantResource>,
    pub model: Option<ModelConfiguration>,
    pub system_prompt_draft: String,
    pub error: Option<String>,
    pub warning: Option<String>,
    pub success_notice: Option<String>,
}

impl DashboardView {
    /// Whether the dashboard offers configuration instead of creation
    pub fn has_assistant(&self) -> bool {
        self.assistant.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use voxdesk_assistant::Message;

    fn snapshot(model: Option<ModelConfiguration>) -> AssistantSnapshot {
        AssistantSnapshot {
            assistant: AssistantResource {
                id: "a1".to_string(),
                name: "X".to_string(),
                status: "active".to_string(),
            },
            model,
        }
    }

    #[test]
    fn test_busy_statuses() {
        assert!(WorkflowStatus::Loading.is_busy());
        assert!(WorkflowStatus::Creating.is_busy());
        assert!(WorkflowStatus::Saving.is_busy());
        assert!(!WorkflowStatus::Configured.is_busy());
        assert!(!WorkflowStatus::Error.is_busy());
    }

    #[test]
    fn test_configured_takes_draft_from_first_system_message() {
        let model = ModelConfiguration {
            messages: vec![Message::system("Hello")],
            ..Default::default()
        };
        let state = ViewState::configured(snapshot(Some(model)));

        assert_eq!(state.status, WorkflowStatus::Configured);
        assert_eq!(state.draft, "Hello");
    }

    #[test]
    fn test_configured_without_messages_has_empty_draft() {
        assert_eq!(ViewState::configured(snapshot(None)).draft, "");
        assert_eq!(
            ViewState::configured(snapshot(Some(ModelConfiguration::default()))).draft,
            ""
        );
    }

    #[tokio::test]
    async fn test_notice_hidden_once_duration_elapsed() {
        let now = Instant::now();
        let mut state = ViewState::with_status(WorkflowStatus::Configured);
        state.set_notice("Saved", now);

        assert_eq!(state.notice(now + Duration::from_millis(2999)), Some("Saved"));
        assert_eq!(state.notice(now + SUCCESS_NOTICE_DURATION), None);

        state.clear_expired_notice(now + SUCCESS_NOTICE_DURATION);
        assert_eq!(state.to_view(now).success_notice, None);
    }
}
