//! Provider configuration and the per-invocation context.
//!
//! Configuration is an explicit struct built once by the host (or from the
//! environment) and turned into a `ProviderContext`, which every handler
//! receives by reference.

use crate::clock::{Clock, TokioClock};
use crate::error::ProviderError;
use crate::validation::exactly_one_of;
use hcp_client::{HcpClientTrait, Location};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default HCP API endpoint
pub const DEFAULT_API_ADDRESS: &str = "https://api.cloud.hashicorp.com";
/// Default identity endpoint for service-principal token exchange
pub const DEFAULT_AUTH_URL: &str = "https://auth.idp.hashicorp.com";
/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variables read by `ProviderConfig::from_env`
pub const ENV_API_ADDRESS: &str = "HCP_API_ADDRESS";
pub const ENV_AUTH_URL: &str = "HCP_AUTH_URL";
pub const ENV_CLIENT_ID: &str = "HCP_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "HCP_CLIENT_SECRET";
pub const ENV_TOKEN: &str = "HCP_TOKEN";
pub const ENV_PROJECT_ID: &str = "HCP_PROJECT_ID";

/// How the provider authenticates against the API
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Pre-issued bearer token
    Token(String),
    /// Client-credentials pair exchanged for a token at configure time
    ServicePrincipal {
        client_id: String,
        client_secret: String,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.write_str("Token(***)"),
            Credentials::ServicePrincipal { client_id, .. } => f
                .debug_struct("ServicePrincipal")
                .field("client_id", client_id)
                .field("client_secret", &"***")
                .finish(),
        }
    }
}

/// Provider-level configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the HCP API
    pub api_address: String,
    /// Token endpoint for the service principal exchange
    pub auth_url: String,
    /// Token or service principal, exactly one
    pub credentials: Credentials,
    /// Default project set on the provider itself
    pub project_id: Option<String>,
    /// Project taken from `HCP_PROJECT_ID`, consulted after `project_id`
    pub env_project_id: Option<String>,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// Retries of a transient HTTP failure before giving up
    pub max_retries: u32,
}

impl ProviderConfig {
    /// Defaults for everything except the credentials
    pub fn new(credentials: Credentials) -> Self {
        Self {
            api_address: DEFAULT_API_ADDRESS.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            credentials,
            project_id: None,
            env_project_id: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_retries: hcp_client::common::DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the provider-level default project
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_api_address(mut self, api_address: impl Into<String>) -> Self {
        self.api_address = api_address.into();
        self
    }

    /// Load configuration from `HCP_*` environment variables
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = get(ENV_TOKEN);
        let client_id = get(ENV_CLIENT_ID);
        let client_secret = get(ENV_CLIENT_SECRET);

        exactly_one_of(ENV_TOKEN, ENV_CLIENT_ID, token.is_some(), client_id.is_some())?;
        let credentials = match token {
            Some(token) => Credentials::Token(token),
            None => Credentials::ServicePrincipal {
                client_id: client_id.unwrap_or_default(),
                client_secret: client_secret.ok_or_else(|| {
                    ProviderError::InvalidConfig(format!("{} is set but {} is missing", ENV_CLIENT_ID, ENV_CLIENT_SECRET))
                })?,
            },
        };

        let mut config = Self::new(credentials);
        if let Some(address) = get(ENV_API_ADDRESS) {
            config.api_address = normalize_address(&address);
        }
        if let Some(auth_url) = get(ENV_AUTH_URL) {
            config.auth_url = normalize_address(&auth_url);
        }
        config.env_project_id = get(ENV_PROJECT_ID);
        Ok(config)
    }
}

/// Accept bare host names as well as full URLs
fn normalize_address(address: &str) -> String {
    let trimmed = address.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Everything a handler needs: client handle, default location and clock.
///
/// Read-only after construction, so one context can serve concurrent
/// invocations for independent resources.
#[derive(Clone)]
pub struct ProviderContext {
    client: Arc<dyn HcpClientTrait>,
    default_location: Location,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for ProviderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderContext")
            .field("base_url", &self.client.base_url())
            .field("default_location", &self.default_location)
            .finish()
    }
}

impl ProviderContext {
    /// Context on the tokio clock
    pub fn new(client: Arc<dyn HcpClientTrait>, default_location: Location) -> Self {
        Self {
            client,
            default_location,
            clock: Arc::new(TokioClock),
        }
    }

    /// Replace the clock used for polling
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// API client shared by every handler
    pub fn client(&self) -> &dyn HcpClientTrait {
        self.client.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Organization and project resolved at configure time
    pub fn default_location(&self) -> &Location {
        &self.default_location
    }

    pub fn organization_id(&self) -> &str {
        &self.default_location.organization_id
    }

    /// Location for a resource, falling back to the provider default project.
    ///
    /// The organization is always the provider's: credentials are issued by
    /// one organization, so a project named here (an import prefix or a
    /// `project_id` attribute) must belong to it.
    pub fn location(&self, project_id: Option<&str>) -> Location {
        match project_id.filter(|p| !p.is_empty()) {
            Some(project_id) => Location::new(self.default_location.organization_id.clone(), project_id),
            None => self.default_location.clone(),
        }
    }
}
