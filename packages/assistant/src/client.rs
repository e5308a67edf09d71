use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::{AssistantError, AssistantResult};
use crate::types::{
    AssistantPayload, AssistantResource, AssistantSnapshot, CreateAssistantRequest,
    ModelConfiguration, UpdateAssistantRequest,
};
use crate::AssistantApi;

/// Connection settings for the assistant platform
#[derive(Debug, Clone)]
pub struct AssistantClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl AssistantClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the assistant platform (`/assistant` endpoints)
#[derive(Clone)]
pub struct AssistantClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl AssistantClient {
    pub fn new(config: AssistantClientConfig) -> AssistantResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AssistantError::config("Assistant API key is not set"));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get authorization header value
    fn get_auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    fn assistant_url(&self, id: &str) -> String {
        format!("{}/assistant/{}", self.base_url, urlencoding::encode(id))
    }

    /// Turn a response into `T`, or a `RemoteService` error carrying the raw body
    async fn read_response<T: DeserializeOwned>(response: Response) -> AssistantResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            error!("Assistant service returned {}: {}", status, body);
            return Err(AssistantError::remote(status.as_u16(), body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AssistantError::InvalidResponse(e.to_string()))
    }
}

fn require_non_empty(value: &str, what: &str) -> AssistantResult<()> {
    if value.trim().is_empty() {
        return Err(AssistantError::validation(format!("{} must not be empty", what)));
    }
    Ok(())
}

#[async_trait]
impl AssistantApi for AssistantClient {
    async fn create(&self, name: &str) -> AssistantResult<AssistantResource> {
        require_non_empty(name, "Assistant name")?;
        debug!("Creating assistant {:?}", name);

        let response = self
            .http_client
            .post(format!("{}/assistant", self.base_url))
            .header("Authorization", self.get_auth_header())
            .json(&CreateAssistantRequest { name })
            .send()
            .await?;

        let payload: AssistantPayload = Self::read_response(response).await?;
        Ok(AssistantSnapshot::from(payload).assistant)
    }

    async fn get(&self, id: &str) -> AssistantResult<AssistantSnapshot> {
        require_non_empty(id, "Assistant id")?;
        debug!("Fetching assistant {}", id);

        let response = self
            .http_client
            .get(self.assistant_url(id))
            .header("Authorization", self.get_auth_header())
            .send()
            .await?;

        let payload: AssistantPayload = Self::read_response(response).await?;
        Ok(payload.into())
    }

    async fn update(
        &self,
        id: &str,
        model: &ModelConfiguration,
    ) -> AssistantResult<AssistantSnapshot> {
        require_non_empty(id, "Assistant id")?;
        if !model.is_complete() {
            return Err(AssistantError::validation(
                "Model configuration must be complete; the platform replaces it wholesale",
            ));
        }
        debug!("Updating model configuration of assistant {}", id);

        let response = self
            .http_client
            .patch(self.assistant_url(id))
            .header("Authorization", self.get_auth_header())
            .json(&UpdateAssistantRequest { model })
            .send()
            .await?;

        let payload: AssistantPayload = Self::read_response(response).await?;
        Ok(payload.into())
    }
}
