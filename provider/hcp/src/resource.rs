//! Resource and data-source handler traits.
//!
//! `Resource` and `DataSource` are implemented with a typed state struct per
//! type. The host talks JSON, so `ResourceAdapter` and `DataSourceAdapter`
//! erase the typed state behind `serde_json::Value` and expose the object-safe
//! `DynResource` / `DynDataSource` the registry stores.

use crate::config::ProviderContext;
use crate::error::ProviderError;
use crate::import::ImportIdFormat;
use crate::schema::Schema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Typed CRUD handlers of one resource type
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    type State: Serialize + DeserializeOwned + Clone + Send + Sync;

    /// Host-visible type name, e.g. `hcp_hvn`
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Accepted import-ID shapes
    fn import_format(&self) -> ImportIdFormat;

    /// Validate, create remotely, wait, then return the state read back
    async fn create(&self, ctx: &ProviderContext, planned: Self::State) -> Result<Self::State, ProviderError>;

    /// Current remote state, or `None` when the resource no longer exists
    async fn read(&self, ctx: &ProviderContext, current: &Self::State) -> Result<Option<Self::State>, ProviderError>;

    /// Apply in-place changes and return the state read back, or `None` when
    /// the resource no longer exists. Types without mutable attributes keep
    /// the default, which re-reads a plan with no configurable change and
    /// rejects anything else.
    async fn update(
        &self,
        ctx: &ProviderContext,
        prior: &Self::State,
        planned: Self::State,
    ) -> Result<Option<Self::State>, ProviderError> {
        let changed = self
            .schema()
            .changed_attributes(&to_wire(self.type_name(), prior)?, &to_wire(self.type_name(), &planned)?);
        if changed.is_empty() {
            return self.read(ctx, prior).await;
        }
        Err(ProviderError::UpdateNotSupported {
            resource: self.type_name().to_string(),
            attributes: changed.into_iter().map(str::to_string).collect(),
        })
    }

    /// Delete remotely; an already absent resource is not an error
    async fn delete(&self, ctx: &ProviderContext, current: &Self::State) -> Result<(), ProviderError>;

    /// Build state from an import ID and read it; absence is an error here
    async fn import_state(&self, ctx: &ProviderContext, id: &str) -> Result<Self::State, ProviderError>;
}

/// Read-only lookup of one data-source type
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    type State: Serialize + DeserializeOwned + Send + Sync;

    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Fill computed attributes from the remote side; absence is an error
    async fn read(&self, ctx: &ProviderContext, config: Self::State) -> Result<Self::State, ProviderError>;
}

pub(crate) fn to_wire<T: Serialize>(resource: &str, state: &T) -> Result<Value, ProviderError> {
    serde_json::to_value(state).map_err(|source| ProviderError::Wire {
        resource: resource.to_string(),
        source,
    })
}

pub(crate) fn from_wire<T: DeserializeOwned>(resource: &str, value: Value) -> Result<T, ProviderError> {
    serde_json::from_value(value).map_err(|source| ProviderError::Wire {
        resource: resource.to_string(),
        source,
    })
}

/// Resource handlers over the host's JSON representation
#[async_trait::async_trait]
pub trait DynResource: Send + Sync {
    fn type_name(&self) -> &'static str;
    fn schema(&self) -> Schema;
    /// Force-new attributes whose planned value differs from the prior state
    fn requires_replace(&self, prior: &Value, planned: &Value) -> Vec<&'static str>;
    async fn create(&self, ctx: &ProviderContext, planned: Value) -> Result<Value, ProviderError>;
    async fn read(&self, ctx: &ProviderContext, current: Value) -> Result<Option<Value>, ProviderError>;
    async fn update(&self, ctx: &ProviderContext, prior: Value, planned: Value) -> Result<Option<Value>, ProviderError>;
    async fn delete(&self, ctx: &ProviderContext, current: Value) -> Result<(), ProviderError>;
    async fn import_state(&self, ctx: &ProviderContext, id: &str) -> Result<Value, ProviderError>;
}

/// Data-source handlers over the host's JSON representation
#[async_trait::async_trait]
pub trait DynDataSource: Send + Sync {
    fn type_name(&self) -> &'static str;
    fn schema(&self) -> Schema;
    async fn read(&self, ctx: &ProviderContext, config: Value) -> Result<Value, ProviderError>;
}

/// Wraps a typed `Resource` as a `DynResource`
#[derive(Debug, Clone, Default)]
pub struct ResourceAdapter<R>(pub R);

#[async_trait::async_trait]
impl<R: Resource> DynResource for ResourceAdapter<R> {
    fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    fn schema(&self) -> Schema {
        self.0.schema()
    }

    fn requires_replace(&self, prior: &Value, planned: &Value) -> Vec<&'static str> {
        self.0.schema().requires_replace(prior, planned)
    }

    async fn create(&self, ctx: &ProviderContext, planned: Value) -> Result<Value, ProviderError> {
        let name = self.0.type_name();
        let state = self.0.create(ctx, from_wire(name, planned)?).await?;
        to_wire(name, &state)
    }

    async fn read(&self, ctx: &ProviderContext, current: Value) -> Result<Option<Value>, ProviderError> {
        let name = self.0.type_name();
        let current: R::State = from_wire(name, current)?;
        match self.0.read(ctx, &current).await? {
            Some(state) => Ok(Some(to_wire(name, &state)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, ctx: &ProviderContext, prior: Value, planned: Value) -> Result<Option<Value>, ProviderError> {
        let name = self.0.type_name();
        let replace = self.requires_replace(&prior, &planned);
        if !replace.is_empty() {
            return Err(ProviderError::UpdateNotSupported {
                resource: name.to_string(),
                attributes: replace.into_iter().map(str::to_string).collect(),
            });
        }

        let prior: R::State = from_wire(name, prior)?;
        let planned: R::State = from_wire(name, planned)?;
        match self.0.update(ctx, &prior, planned).await? {
            Some(state) => Ok(Some(to_wire(name, &state)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, ctx: &ProviderContext, current: Value) -> Result<(), ProviderError> {
        let current: R::State = from_wire(self.0.type_name(), current)?;
        self.0.delete(ctx, &current).await
    }

    async fn import_state(&self, ctx: &ProviderContext, id: &str) -> Result<Value, ProviderError> {
        debug!("Importing {} {}", self.0.type_name(), id);
        let state = self.0.import_state(ctx, id).await?;
        to_wire(self.0.type_name(), &state)
    }
}

/// Wraps a typed `DataSource` as a `DynDataSource`
#[derive(Debug, Clone, Default)]
pub struct DataSourceAdapter<D>(pub D);

#[async_trait::async_trait]
impl<D: DataSource> DynDataSource for DataSourceAdapter<D> {
    fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    fn schema(&self) -> Schema {
        self.0.schema()
    }

    async fn read(&self, ctx: &ProviderContext, config: Value) -> Result<Value, ProviderError> {
        let name = self.0.type_name();
        let state = self.0.read(ctx, from_wire(name, config)?).await?;
        to_wire(name, &state)
    }
}
