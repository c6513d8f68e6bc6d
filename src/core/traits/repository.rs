use async_trait::async_trait;

use crate::core::error::Result;

/// Append-only repository: entities are recorded once and never updated or removed
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Record a new entity after every previously recorded one
    async fn append(&self, entity: T) -> Result<()>;

    /// All recorded entities, in arrival order
    async fn list(&self) -> Result<Vec<T>>;
}
