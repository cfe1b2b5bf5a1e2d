//! # ActorClient Trait
//!
//! Common interface for resource-specific clients: default `get`, `list` and `delete` on top
//! of a generic [`ResourceClient`].

use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard CRUD operations.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Every entity, in creation order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}

/// Recovers an entity's typed error from a framework error.
///
/// Framework `NotFound` becomes `not_found(id)`; channel failures become `communication`.
pub(crate) fn recover_entity_error<E>(
    e: FrameworkError,
    not_found: impl FnOnce(String) -> E,
    communication: impl FnOnce(String) -> E,
) -> E
where
    E: std::error::Error + Send + Sync + 'static,
{
    match e.into_entity_error::<E>() {
        Ok(typed) => typed,
        Err(FrameworkError::NotFound(id)) => not_found(id),
        Err(other) => communication(other.to_string()),
    }
}
