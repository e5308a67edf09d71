// ABOUTME: Profile store seam used by the dashboard workflow
// ABOUTME: Reads a user's profile and persists the assistant linked to it

use async_trait::async_trait;

use voxdesk_core::UserProfile;
use voxdesk_storage::{ProfileStorage, StorageResult};

/// Profile reads and the assistant link write the workflow depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> StorageResult<UserProfile>;

    /// Persist `assistant_id` for `user_id`; repeating the same link is a no-op
    async fn link_assistant(&self, user_id: &str, assistant_id: &str) -> StorageResult<()>;
}

#[async_trait]
impl ProfileStore for ProfileStorage {
    async fn get_profile(&self, user_id: &str) -> StorageResult<UserProfile> {
        ProfileStorage::get_profile(self, user_id).await
    }

    async fn link_assistant(&self, user_id: &str, assistant_id: &str) -> StorageResult<()> {
        ProfileStorage::link_assistant(self, user_id, assistant_id).await
    }
}
