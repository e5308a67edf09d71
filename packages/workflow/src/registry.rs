// ABOUTME: Per-user registry of dashboard workflows
// ABOUTME: Hands out one ConfigurationSync per signed-in client and resets it on sign-out

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use voxdesk_assistant::AssistantApi;

use crate::linker::ProfileStore;
use crate::sync::ConfigurationSync;

pub struct DashboardRegistry {
    assistants: Arc<dyn AssistantApi>,
    profiles: Arc<dyn ProfileStore>,
    workflows: RwLock<HashMap<String, Arc<ConfigurationSync>>>,
}

impl DashboardRegistry {
    pub fn new(assistants: Arc<dyn AssistantApi>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            assistants,
            profiles,
            workflows: RwLock::new(HashMap::new()),
        }
    }

    /// The workflow for `user_id`, created on first use
    pub async fn workflow(&self, user_id: &str) -> Arc<ConfigurationSync> {
        if let Some(existing) = self.workflows.read().await.get(user_id) {
            return existing.clone();
        }

        let mut workflows = self.workflows.write().await;
        workflows
            .entry(user_id.to_string())
            .or_insert_with(|| {
                debug!("Starting dashboard workflow for {}", user_id);
                Arc::new(ConfigurationSync::new(
                    user_id,
                    self.assistants.clone(),
                    self.profiles.clone(),
                ))
            })
            .clone()
    }

    /// Clear the view state of `user_id`'s dashboard, if one was started
    ///
    /// The workflow is dropped when nobody else holds it and it has nothing
    /// in flight or waiting to be linked; otherwise it is kept and reset.
    pub async fn reset(&self, user_id: &str) {
        let mut workflows = self.workflows.write().await;
        let Some(workflow) = workflows.get(user_id).cloned() else {
            return;
        };

        // The map and `workflow` are the only handles
        if Arc::strong_count(&workflow) == 2 && workflow.is_idle().await {
            workflows.remove(user_id);
            debug!("Dropped dashboard workflow for {}", user_id);
            return;
        }
        drop(workflows);
        workflow.reset().await;
    }

    pub async fn len(&self) -> usize {
        self.workflows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.workflows.read().await.is_empty()
    }
}
