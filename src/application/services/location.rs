//! Location service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{
    DomainError, DomainResult, Location, LocationPatch, NewLocation, RepositoryProvider,
};

/// Default size of the "top locations" ranking
pub const DEFAULT_TOP_LIMIT: u64 = 5;
/// Largest ranking a single request may ask for
pub const MAX_TOP_LIMIT: u64 = 100;

pub struct LocationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl LocationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<Location>> {
        self.repos.locations().find_all().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Location> {
        self.repos
            .locations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Location", id))
    }

    pub async fn create(&self, location: NewLocation) -> DomainResult<Location> {
        self.ensure_name_free(&location.name, None).await?;
        let saved = self.repos.locations().save(location).await?;
        info!(location_id = saved.id, name = %saved.name, "Location created");
        Ok(saved)
    }

    pub async fn update(&self, id: i32, patch: LocationPatch) -> DomainResult<Location> {
        let mut location = self.get(id).await?;
        if let Some(name) = patch.name.as_deref() {
            self.ensure_name_free(name, Some(id)).await?;
        }
        patch.apply(&mut location);
        self.repos.locations().update(location).await
    }

    /// Bicycles stationed here are detached, not deleted.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.locations().delete(id).await?;
        info!(location_id = id, "Location deleted");
        Ok(())
    }

    /// Locations ranked by rentals started within the optional window.
    pub async fn top_by_rentals(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: u64,
    ) -> DomainResult<Vec<Location>> {
        if !(1..=MAX_TOP_LIMIT).contains(&limit) {
            return Err(DomainError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_TOP_LIMIT
            )));
        }
        self.repos
            .locations()
            .find_top_by_rentals(from, to, limit)
            .await
    }

    async fn ensure_name_free(&self, name: &str, except: Option<i32>) -> DomainResult<()> {
        match self.repos.locations().find_by_name(name).await? {
            Some(existing) if Some(existing.id) != except => Err(DomainError::conflict(
                "Location",
                format!("location named '{}' already exists", name),
            )),
            _ => Ok(()),
        }
    }
}
