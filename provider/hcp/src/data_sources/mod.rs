//! Read-only data source types

pub mod hvn;
pub mod organization;
pub mod project;

pub use hvn::HvnDataSource;
pub use organization::OrganizationDataSource;
pub use project::ProjectDataSource;
