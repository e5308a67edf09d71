// ABOUTME: Configuration sync workflow for one client's assistant
// ABOUTME: Fetches or creates on mount, then edits, saves, and refreshes the system prompt

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use voxdesk_assistant::{AssistantApi, AssistantSnapshot, ModelConfiguration};
use voxdesk_core::UserProfile;

use crate::error::{WorkflowError, WorkflowResult};
use crate::linker::ProfileStore;
use crate::state::{DashboardView, ViewState, WorkflowStatus};

pub const SAVED_NOTICE: &str = "Assistant configuration saved.";
pub const PROFILE_UNAVAILABLE: &str = "Could not fetch user profile.";
pub const LINK_WARNING: &str = "Your assistant was created but could not be saved to your profile. \
     It will be linked again the next time you open the dashboard.";

struct Inner {
    view: ViewState,
    profile: Option<UserProfile>,
    /// Assistant created in an earlier operation whose link write failed
    pending_link: Option<String>,
    /// Bumped by `reset`; results of operations started before it are dropped
    epoch: u64,
    /// Set from `begin` until `finish`, across resets
    in_flight: bool,
}

/// Dashboard workflow for a single signed-in client
///
/// Operations never overlap: while one is in flight every other operation is
/// rejected with a validation error, even after a `reset` has cleared the
/// view. The state lock is not held across remote calls, so `view` stays
/// responsive during a round trip.
pub struct ConfigurationSync {
    user_id: String,
    assistants: Arc<dyn AssistantApi>,
    profiles: Arc<dyn ProfileStore>,
    inner: Mutex<Inner>,
}

impl ConfigurationSync {
    pub fn new(
        user_id: impl Into<String>,
        assistants: Arc<dyn AssistantApi>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            assistants,
            profiles,
            inner: Mutex::new(Inner {
                view: ViewState::default(),
                profile: None,
                pending_link: None,
                epoch: 0,
                in_flight: false,
            }),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Current dashboard snapshot; drops an expired success notice
    pub async fn view(&self) -> DashboardView {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();
        inner.view.clear_expired_notice(now);
        inner.view.to_view(now)
    }

    /// Load the dashboard from the profile and, when linked, the assistant
    pub async fn mount(&self) -> WorkflowResult<DashboardView> {
        let (epoch, pending) = self
            .begin(WorkflowStatus::Loading, |inner| Ok(inner.pending_link.clone()))
            .await?;

        let profile = match self.profiles.get_profile(&self.user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Could not load profile {}: {}", self.user_id, e);
                return Ok(self
                    .finish(epoch, |inner| {
                        inner.view = ViewState::with_status(WorkflowStatus::Error);
                        inner.view.error = Some(PROFILE_UNAVAILABLE.to_string());
                    })
                    .await);
            }
        };

        let mut pending = pending;
        let mut warning = None;
        let assistant_id = match (profile.assistant_id.clone(), pending.clone()) {
            (Some(id), _) => {
                pending = None;
                Some(id)
            }
            (None, Some(id)) => {
                match self.profiles.link_assistant(&self.user_id, &id).await {
                    Ok(()) => {
                        info!("Linked pending assistant {} to {}", id, self.user_id);
                        pending = None;
                    }
                    Err(e) => {
                        warn!("Retrying link of assistant {} failed: {}", id, e);
                        warning = Some(LINK_WARNING.to_string());
                    }
                }
                Some(id)
            }
            (None, None) => None,
        };

        let Some(assistant_id) = assistant_id else {
            debug!("No assistant linked to {}", self.user_id);
            return Ok(self
                .settle(
                    epoch,
                    |inner| inner.pending_link = None,
                    |inner| {
                        inner.profile = Some(profile);
                        inner.view = ViewState::with_status(WorkflowStatus::NoAssistant);
                    },
                )
                .await);
        };

        let result = self.assistants.get(&assistant_id).await;
        Ok(self
            .settle(
                epoch,
                |inner| inner.pending_link = pending,
                |inner| {
                    inner.profile = Some(profile);
                    inner.view = match result {
                        Ok(snapshot) => {
                            info!("Loaded assistant {} for {}", assistant_id, self.user_id);
                            ViewState::configured(snapshot)
                        }
                        Err(e) => {
                            let err = WorkflowError::from(e);
                            warn!("Loading assistant {} failed: {}", assistant_id, err);
                            let mut view = ViewState::with_status(WorkflowStatus::Error);
                            view.error = Some(err.to_string());
                            view
                        }
                    };
                    inner.view.warning = warning;
                },
            )
            .await)
    }

    /// Create the client's assistant, then read it back and link it
    ///
    /// `name` defaults to "<display name>'s Assistant".
    pub async fn create(&self, name: Option<&str>) -> WorkflowResult<DashboardView> {
        let (epoch, name) = self
            .begin(WorkflowStatus::Creating, |inner| {
                if inner.view.status != WorkflowStatus::NoAssistant {
                    return Err(WorkflowError::validation(
                        "An assistant can only be created when none exists",
                    ));
                }
                assistant_name(name, inner.profile.as_ref())
            })
            .await?;

        let created = match self.assistants.create(&name).await {
            Ok(created) => created,
            Err(e) => {
                let err = WorkflowError::from(e);
                warn!("Creating assistant for {} failed: {}", self.user_id, err);
                let view = self
                    .finish(epoch, |inner| {
                        inner.view.status = WorkflowStatus::NoAssistant;
                        if !err.is_validation() {
                            inner.view.error = Some(err.to_string());
                        }
                    })
                    .await;
                return if err.is_validation() { Err(err) } else { Ok(view) };
            }
        };
        info!("Created assistant {} for {}", created.id, self.user_id);

        let (fetched, linked) = tokio::join!(
            self.assistants.get(&created.id),
            self.profiles.link_assistant(&self.user_id, &created.id)
        );

        let warning = match linked {
            Ok(()) => None,
            Err(e) => {
                warn!(
                    "Assistant {} created but linking to {} failed: {}",
                    created.id, self.user_id, e
                );
                Some(LINK_WARNING.to_string())
            }
        };

        let unlinked = warning.as_ref().map(|_| created.id.clone());
        Ok(self
            .settle(
                epoch,
                |inner| inner.pending_link = unlinked,
                |inner| {
                    if warning.is_none() {
                        if let Some(profile) = inner.profile.as_mut() {
                            profile.assistant_id = Some(created.id.clone());
                        }
                    }

                    inner.view = match fetched {
                        Ok(snapshot) => ViewState::configured(snapshot),
                        Err(e) => {
                            let err = WorkflowError::from(e);
                            warn!("Reading new assistant {} failed: {}", created.id, err);
                            let mut view = ViewState::configured(AssistantSnapshot {
                                assistant: created,
                                model: None,
                            });
                            view.error = Some(err.to_string());
                            view
                        }
                    };
                    inner.view.warning = warning;
                },
            )
            .await)
    }

    /// Replace the local system prompt draft; nothing is sent
    pub async fn edit_draft(&self, draft: impl Into<String>) -> WorkflowResult<DashboardView> {
        let mut inner = self.inner.lock().await;
        if inner.in_flight {
            return Err(busy());
        }
        if inner.view.status != WorkflowStatus::Configured {
            return Err(WorkflowError::validation("There is no assistant to configure yet"));
        }

        inner.view.draft = draft.into();
        Ok(inner.view.to_view(Instant::now()))
    }

    /// Write the draft as the assistant's system prompt
    ///
    /// Reloads the current configuration first so settings changed elsewhere
    /// since mount are kept, then confirms with a final read.
    pub async fn save(&self) -> WorkflowResult<DashboardView> {
        let (epoch, (assistant_id, draft)) = self
            .begin(WorkflowStatus::Saving, |inner| {
                if inner.view.status != WorkflowStatus::Configured {
                    return Err(WorkflowError::validation("There is no assistant to save"));
                }
                let assistant_id = configured_id(&inner.view)?;
                Ok((assistant_id, inner.view.draft.clone()))
            })
            .await?;

        let result = self.push_system_prompt(&assistant_id, &draft).await;

        let err = match result {
            Ok(snapshot) => {
                info!("Saved system prompt of assistant {}", assistant_id);
                return Ok(self
                    .finish(epoch, |inner| {
                        let warning = inner.view.warning.take();
                        inner.view = ViewState::configured(snapshot);
                        inner.view.warning = warning;
                        inner.view.set_notice(SAVED_NOTICE, Instant::now());
                    })
                    .await);
            }
            Err(err) => err,
        };

        warn!("Saving assistant {} failed: {}", assistant_id, err);
        let view = self
            .finish(epoch, |inner| {
                inner.view.status = WorkflowStatus::Configured;
                if !err.is_validation() {
                    inner.view.error = Some(err.to_string());
                }
            })
            .await;
        if err.is_validation() {
            Err(err)
        } else {
            Ok(view)
        }
    }

    /// Re-read an assistant that has no model configuration yet
    pub async fn refresh(&self) -> WorkflowResult<DashboardView> {
        let (epoch, assistant_id) = self
            .begin(WorkflowStatus::Loading, |inner| {
                if inner.view.status != WorkflowStatus::Configured || inner.view.model.is_some() {
                    return Err(WorkflowError::validation(
                        "Refresh is only available while the assistant has no configuration",
                    ));
                }
                configured_id(&inner.view)
            })
            .await?;

        let result = self.assistants.get(&assistant_id).await;
        Ok(self
            .finish(epoch, |inner| match result {
                Ok(snapshot) => {
                    let warning = inner.view.warning.take();
                    inner.view = ViewState::configured(snapshot);
                    inner.view.warning = warning;
                }
                Err(e) => {
                    let err = WorkflowError::from(e);
                    warn!("Refreshing assistant {} failed: {}", assistant_id, err);
                    inner.view.status = WorkflowStatus::Configured;
                    inner.view.error = Some(err.to_string());
                }
            })
            .await)
    }

    /// Whether nothing is in flight and no link is waiting to be retried
    pub async fn is_idle(&self) -> bool {
        let inner = self.inner.lock().await;
        !inner.in_flight && inner.pending_link.is_none()
    }

    /// Forget the view state, as on sign-out
    ///
    /// A pending link survives so the next mount can still record it. An
    /// operation still in flight keeps the workflow claimed until it ends.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.view = ViewState::default();
        inner.profile = None;
        inner.epoch += 1;
        debug!("Reset dashboard of {}", self.user_id);
    }

    /// Read-modify-write of the system prompt
    async fn push_system_prompt(
        &self,
        assistant_id: &str,
        draft: &str,
    ) -> WorkflowResult<AssistantSnapshot> {
        let current = self.assistants.get(assistant_id).await?;
        let merged = ModelConfiguration::with_system_prompt(current.model.as_ref(), draft);
        self.assistants.update(assistant_id, &merged).await?;
        Ok(self.assistants.get(assistant_id).await?)
    }

    /// Claim the workflow for one operation and move it to `next`
    async fn begin<T>(
        &self,
        next: WorkflowStatus,
        check: impl FnOnce(&Inner) -> WorkflowResult<T>,
    ) -> WorkflowResult<(u64, T)> {
        let mut inner = self.inner.lock().await;
        if inner.in_flight {
            return Err(busy());
        }
        let value = check(&inner)?;

        inner.in_flight = true;
        inner.view.status = next;
        inner.view.error = None;
        debug!("Dashboard of {} is now {:?}", self.user_id, next);
        Ok((inner.epoch, value))
    }

    async fn finish(&self, epoch: u64, apply: impl FnOnce(&mut Inner)) -> DashboardView {
        self.settle(epoch, |_| {}, apply).await
    }

    /// Release the workflow; `record` always runs, `apply` only if no reset
    /// happened since `begin`
    async fn settle(
        &self,
        epoch: u64,
        record: impl FnOnce(&mut Inner),
        apply: impl FnOnce(&mut Inner),
    ) -> DashboardView {
        let mut inner = self.inner.lock().await;
        inner.in_flight = false;
        record(&mut inner);
        if inner.epoch == epoch {
            apply(&mut inner);
        } else {
            debug!("Dropping result of an operation started before reset");
        }
        inner.view.to_view(Instant::now())
    }
}

fn busy() -> WorkflowError {
    WorkflowError::validation("Another dashboard operation is still in progress")
}

fn configured_id(view: &ViewState) -> WorkflowResult<String> {
    view.assistant
        .as_ref()
        .map(|assistant| assistant.id.clone())
        .ok_or_else(|| WorkflowError::validation("There is no assistant to configure yet"))
}

fn assistant_name(requested: Option<&str>, profile: Option<&UserProfile>) -> WorkflowResult<String> {
    match requested {
        Some(name) if name.trim().is_empty() => {
            Err(WorkflowError::validation("Assistant name must not be empty"))
        }
        Some(name) => Ok(name.trim().to_string()),
        None => Ok(match profile {
            Some(profile) => format!("{}'s Assistant", profile.display_name()),
            None => "Voxdesk Assistant".to_string(),
        }),
    }
}
