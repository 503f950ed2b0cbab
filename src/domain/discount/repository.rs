//! Discount repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Discount, NewDiscount};
use crate::domain::DomainResult;

#[async_trait]
pub trait DiscountRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Discount>>;
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Discount>>;
    async fn find_all(&self) -> DomainResult<Vec<Discount>>;
    /// Active discounts whose window contains `at`
    async fn find_active_at(&self, at: DateTime<Utc>) -> DomainResult<Vec<Discount>>;
    async fn save(&self, discount: NewDiscount) -> DomainResult<Discount>;
    async fn update(&self, discount: Discount) -> DomainResult<Discount>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
