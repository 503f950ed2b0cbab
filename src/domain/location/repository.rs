//! Location repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Location, NewLocation};
use crate::domain::DomainResult;

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Location>>;
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Location>>;
    async fn find_all(&self) -> DomainResult<Vec<Location>>;
    async fn save(&self, location: NewLocation) -> DomainResult<Location>;
    async fn update(&self, location: Location) -> DomainResult<Location>;
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Locations ranked by the number of rentals of bicycles stationed there,
    /// optionally restricted to rentals started within `[from, to]`.
    /// Locations without a matching rental are not returned.
    async fn find_top_by_rentals(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: u64,
    ) -> DomainResult<Vec<Location>>;
}
