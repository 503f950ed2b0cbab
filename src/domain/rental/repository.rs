//! Rental repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{NewRental, Rental};
use crate::domain::DomainResult;

#[async_trait]
pub trait RentalRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Rental>>;
    async fn find_all(&self) -> DomainResult<Vec<Rental>>;
    /// Rentals with `rental_start_time >= from` and `rental_end_time <= to`
    async fn find_within(&self, from: DateTime<Utc>, to: DateTime<Utc>)
        -> DomainResult<Vec<Rental>>;
    async fn find_by_bicycle(&self, bicycle_id: i32) -> DomainResult<Vec<Rental>>;
    async fn count_by_user(&self, user_id: i32) -> DomainResult<u64>;

    /// Store a rental. An open rental (no return time) also moves its bicycle
    /// from `available` to `rented` in the same transaction, and fails with
    /// `InvalidState` storing nothing when the bicycle is no longer available.
    async fn check_out(&self, rental: NewRental) -> DomainResult<Rental>;

    /// Store `updated` over `previous` and reconcile bicycle status in the
    /// same transaction: a bicycle the rental stops holding (returned or
    /// swapped out) goes from `rented` to `available`, and a bicycle it starts
    /// holding goes from `available` to `rented`. Bicycles in any other status
    /// are left alone.
    async fn update(&self, previous: &Rental, updated: Rental) -> DomainResult<Rental>;

    /// Remove a rental; an open one releases its bicycle.
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Sum of `total_price` over the same window as [`Self::find_within`];
    /// `0.0` when nothing matches.
    async fn total_revenue_within(&self, from: DateTime<Utc>, to: DateTime<Utc>)
        -> DomainResult<f64>;
}
