//! HCP infrastructure provider
//!
//! Handler bodies for managing HashiCorp Cloud Platform resources from a
//! declarative plugin host: HVNs, peerings, routes, Vault clusters and DNS
//! forwarding, plus the shared machinery they depend on.
//!
//! # Example
//!
//! ```no_run
//! use hcp_provider::{DynResource, Provider, ProviderConfig};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), hcp_provider::ProviderError> {
//! hcp_provider::logging::init();
//!
//! let config = ProviderConfig::from_env()?;
//! let provider = Provider::configure(&config).await?;
//!
//! if let Some(hvn) = provider.resource("hcp_hvn") {
//!     let state = hvn
//!         .create(
//!             provider.context(),
//!             json!({ "hvn_id": "main-hvn", "cloud_provider": "aws", "region": "us-west-2" }),
//!         )
//!         .await?;
//!     println!("{}", state["self_link"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod data_sources;
pub mod error;
pub mod import;
pub mod link;
pub mod logging;
pub mod operation;
pub mod project;
pub mod provider;
pub mod resource;
pub mod resource_helpers;
pub mod resources;
pub mod schema;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use clock::{Clock, ManualClock, TokioClock};
pub use config::{Credentials, ProviderConfig, ProviderContext};
pub use error::ProviderError;
pub use import::{ImportId, ImportIdFormat};
pub use link::{decode_link, decode_link_any, encode_link, new_link, self_link};
pub use operation::{poll_until, wait_for_operation};
pub use provider::Provider;
pub use resource::{DataSource, DataSourceAdapter, DynDataSource, DynResource, Resource, ResourceAdapter};
pub use resource_helpers::Timeouts;
pub use schema::{Attribute, AttributeMode, Schema};
