//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::bicycle::BicycleRepository;
use super::discount::DiscountRepository;
use super::location::LocationRepository;
use super::rental::RentalRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// One provider is built per process around an explicit database handle and
/// passed to every service. Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let bike = repos.bicycles().find_by_id(1).await?;
///     let history = repos.rentals().find_by_bicycle(1).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn bicycles(&self) -> &dyn BicycleRepository;
    fn locations(&self) -> &dyn LocationRepository;
    fn users(&self) -> &dyn UserRepository;
    fn discounts(&self) -> &dyn DiscountRepository;
    fn rentals(&self) -> &dyn RentalRepository;
}
