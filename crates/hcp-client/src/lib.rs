//! HCP REST API Client
//!
//! A Rust client library for the HashiCorp Cloud Platform REST API.
//! Provides type-safe models and methods for resource-manager, operation,
//! network and Vault cluster endpoints.
//!
//! # Example
//!
//! ```no_run
//! use hcp_client::{HcpClient, HcpClientTrait, Location};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = HcpClient::new(
//!     "https://api.cloud.hashicorp.com".to_string(),
//!     "your-bearer-token".to_string(),
//! )?;
//!
//! // Find the projects of the first organization
//! let organizations = client.list_organizations().await?;
//! let projects = client.list_projects(&organizations[0].id).await?;
//!
//! // Fetch an HVN
//! let location = Location::new(&organizations[0].id, &projects[0].id);
//! let hvn = client.get_hvn(&location, "main-hvn").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Resource manager**: Organizations and projects, with pagination
//! - **Operations**: Status of long-running operations
//! - **Network**: HVNs, peerings, routes, DNS forwarding
//! - **Vault**: Cluster lifecycle and configuration updates
//! - **Retry Logic**: Automatic retry of transient failures with exponential backoff

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod hcp_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::HcpClient;
pub use common::backoff::ExponentialBackoff;
pub use common::{HttpClient, Paginated};
pub use error::HcpError;
pub use models::*;
pub use hcp_trait::HcpClientTrait;
#[cfg(feature = "test-util")]
pub use mock::{MockHcpClient, OperationBehavior};
