//! Voxdesk Assistant Platform Client
//!
//! Wraps the three calls Voxdesk makes against the voice assistant platform:
//! create an assistant, read it, and replace its model configuration.

pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

pub use client::{AssistantClient, AssistantClientConfig};
pub use error::{AssistantError, AssistantResult};
pub use types::*;

/// Operations the dashboard workflow needs from the platform
///
/// No call is retried; each failure is terminal for that attempt.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Create an assistant with a display name
    async fn create(&self, name: &str) -> AssistantResult<AssistantResource>;

    /// Read an assistant and its model configuration, if any
    async fn get(&self, id: &str) -> AssistantResult<AssistantSnapshot>;

    /// Replace the assistant's model configuration
    ///
    /// The platform swaps the whole model object, so `model` must be complete.
    async fn update(&self, id: &str, model: &ModelConfiguration)
        -> AssistantResult<AssistantSnapshot>;
}
