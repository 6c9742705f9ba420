use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Display name used when no API credential is configured.
pub const FALLBACK_NO_CREDENTIAL: &str = "New Flatland";
/// Display name used when the generation call fails.
pub const FALLBACK_UNAVAILABLE: &str = "Unnamed Flatland";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const PROMPT: &str = "Invent a short, evocative name for a small blocky voxel world.";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    name: String,
}

/// Errors from the naming collaborator. All of them are recovered locally
/// with a fallback string; none reach the simulation core.
#[derive(Debug, Error)]
pub enum NamingError {
    #[error("no api credential configured")]
    MissingCredential,
    #[error("name generation request failed")]
    Generation(#[from] reqwest::Error),
    #[error("name service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("name service returned an empty name")]
    EmptyName,
}

// Thin reqwest client for the text-generation service.
#[derive(Debug, Clone)]
pub struct NameClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl NameClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// Read the credential from the `VOXSHOT_NAME_API_KEY` environment
    /// variable; absence is handled at call time, not here.
    pub fn from_env(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::new(base_url, std::env::var("VOXSHOT_NAME_API_KEY").ok())
    }

    /// Ask the service for a world name.
    ///
    /// Errors before issuing any request when no credential is configured.
    pub async fn generate_name(&self) -> Result<String, NamingError> {
        let Some(key) = &self.api_key else {
            return Err(NamingError::MissingCredential);
        };

        let url = format!("{}/v1/generate", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(key)
            .json(&GenerateRequest { prompt: PROMPT })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NamingError::Status(response.status()));
        }

        let body: GenerateResponse = response.json().await?;
        let name = body.name.trim().to_string();
        if name.is_empty() {
            return Err(NamingError::EmptyName);
        }
        Ok(name)
    }

    /// Fire-and-forget variant: always yields a usable display name.
    ///
    /// Missing credential and service failure map to distinct fixed
    /// fallbacks so the two conditions stay distinguishable in the UI.
    pub async fn generate_or_fallback(&self) -> String {
        match self.generate_name().await {
            Ok(name) => name,
            Err(NamingError::MissingCredential) => {
                tracing::warn!("no naming credential; using fallback name");
                FALLBACK_NO_CREDENTIAL.to_string()
            }
            Err(err) => {
                tracing::warn!(%err, "name generation failed; using fallback name");
                FALLBACK_UNAVAILABLE.to_string()
            }
        }
    }
}
