//! Bicycle repository interface

use async_trait::async_trait;

use super::model::{Bicycle, BicycleFilter, NewBicycle};
use crate::domain::DomainResult;

#[async_trait]
pub trait BicycleRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Bicycle>>;
    async fn find_all(&self, filter: &BicycleFilter) -> DomainResult<Vec<Bicycle>>;
    async fn save(&self, bicycle: NewBicycle) -> DomainResult<Bicycle>;
    async fn update(&self, bicycle: Bicycle) -> DomainResult<Bicycle>;
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Bicycle with the most rental records; equal counts go to the lowest ID.
    /// `None` when no rentals exist.
    async fn find_most_rented(&self) -> DomainResult<Option<Bicycle>>;
}
