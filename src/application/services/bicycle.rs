//! Bicycle service

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    Bicycle, BicycleFilter, BicyclePatch, BicycleStatus, DomainError, DomainResult, NewBicycle,
    RepositoryProvider,
};

pub struct BicycleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BicycleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self, filter: &BicycleFilter) -> DomainResult<Vec<Bicycle>> {
        self.repos.bicycles().find_all(filter).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Bicycle> {
        self.repos
            .bicycles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bicycle", id))
    }

    pub async fn create(&self, bicycle: NewBicycle) -> DomainResult<Bicycle> {
        ensure_positive_price(bicycle.price_per_hour)?;
        ensure_manual_status(BicycleStatus::Available, bicycle.status)?;
        if let Some(location_id) = bicycle.current_location_id {
            self.ensure_location(location_id).await?;
        }
        let saved = self.repos.bicycles().save(bicycle).await?;
        info!(
            bicycle_id = saved.id,
            brand = %saved.brand,
            model = %saved.model,
            "Bicycle registered"
        );
        Ok(saved)
    }

    pub async fn update(&self, id: i32, patch: BicyclePatch) -> DomainResult<Bicycle> {
        let mut bicycle = self.get(id).await?;
        if let Some(price) = patch.price_per_hour {
            ensure_positive_price(price)?;
        }
        if let Some(status) = patch.status {
            ensure_manual_status(bicycle.status, status)?;
        }
        if let Some(location_id) = patch.target_location() {
            self.ensure_location(location_id).await?;
        }
        patch.apply(&mut bicycle);
        let updated = self.repos.bicycles().update(bicycle).await?;
        info!(bicycle_id = id, status = %updated.status, "Bicycle updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.bicycles().delete(id).await?;
        info!(bicycle_id = id, "Bicycle deleted");
        Ok(())
    }

    /// Bicycle with the highest number of rentals; lowest id wins a tie.
    /// `None` when nothing has been rented yet.
    pub async fn most_rented(&self) -> DomainResult<Option<Bicycle>> {
        self.repos.bicycles().find_most_rented().await
    }

    async fn ensure_location(&self, location_id: i32) -> DomainResult<()> {
        self.repos
            .locations()
            .find_by_id(location_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Location", location_id))
    }
}

/// Only rentals move a bicycle into or out of `rented`; by hand it can go
/// between `available` and `under_repair`.
fn ensure_manual_status(from: BicycleStatus, to: BicycleStatus) -> DomainResult<()> {
    if from == to || (from != BicycleStatus::Rented && to != BicycleStatus::Rented) {
        return Ok(());
    }
    Err(DomainError::invalid_state(
        "Bicycle",
        format!(
            "status cannot change from {} to {} outside a rental",
            from, to
        ),
    ))
}

fn ensure_positive_price(price: f64) -> DomainResult<()> {
    if price > 0.0 && price.is_finite() {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "price_per_hour must be positive, got {}",
            price
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_fixtures::*;
    use crate::domain::NewRental;
    use crate::infrastructure::database::repositories::test_support::migrated_repos;

    fn new_bicycle(location: Option<i32>) -> NewBicycle {
        NewBicycle {
            brand: "Giant".into(),
            model: "Escape 3".into(),
            bike_type: "city".into(),
            price_per_hour: 8.5,
            status: BicycleStatus::Available,
            current_location_id: location,
        }
    }

    #[tokio::test]
    async fn create_rejects_unknown_location() {
        let repos = migrated_repos().await;
        let service = BicycleService::new(repos);

        let err = service.create(new_bicycle(Some(77))).await.unwrap_err();
        match err {
            DomainError::NotFound { entity, value, .. } => {
                assert_eq!(entity, "Location");
                assert_eq!(value, "77");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_rejects_non_positive_price() {
        let repos = migrated_repos().await;
        let service = BicycleService::new(repos);
        let mut bicycle = new_bicycle(None);
        bicycle.price_per_hour = 0.0;

        assert!(matches!(
            service.create(bicycle).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn patch_moves_and_detaches_bicycle() {
        let repos = migrated_repos().await;
        let service = BicycleService::new(repos.clone());
        let park = add_location(&repos, "Park").await;
        let created = service.create(new_bicycle(None)).await.unwrap();

        let moved = service
            .update(
                created.id,
                BicyclePatch {
                    current_location_id: Some(Some(park.id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.current_location_id, Some(park.id));
        assert_eq!(moved.brand, "Giant");

        let detached = service
            .update(
                created.id,
                BicyclePatch {
                    current_location_id: Some(None),
                    status: Some(BicycleStatus::UnderRepair),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(detached.current_location_id, None);
        assert_eq!(detached.status, BicycleStatus::UnderRepair);
    }

    #[tokio::test]
    async fn rented_status_is_left_to_the_rental_workflow() {
        let repos = migrated_repos().await;
        let service = BicycleService::new(repos.clone());

        let mut claimed = new_bicycle(None);
        claimed.status = BicycleStatus::Rented;
        assert!(matches!(
            service.create(claimed).await,
            Err(DomainError::InvalidState { entity: "Bicycle", .. })
        ));

        let bike = service.create(new_bicycle(None)).await.unwrap();
        let to_rented = BicyclePatch {
            status: Some(BicycleStatus::Rented),
            ..Default::default()
        };
        assert!(matches!(
            service.update(bike.id, to_rented).await,
            Err(DomainError::InvalidState { entity: "Bicycle", .. })
        ));

        let user = add_user(&repos, "+380000000001").await;
        repos
            .rentals()
            .check_out(NewRental {
                user_id: user.id,
                bicycle_id: bike.id,
                rental_start_time: at(2024, 4, 1),
                rental_end_time: at(2024, 4, 2),
                actual_return_time: None,
                total_price: 30.0,
                discount_id: None,
            })
            .await
            .unwrap();

        // an open rental keeps the bicycle rented
        let freed = BicyclePatch {
            status: Some(BicycleStatus::Available),
            ..Default::default()
        };
        assert!(matches!(
            service.update(bike.id, freed).await,
            Err(DomainError::InvalidState { .. })
        ));

        // other fields stay editable, including a no-op status
        let repriced = service
            .update(
                bike.id,
                BicyclePatch {
                    price_per_hour: Some(9.0),
                    status: Some(BicycleStatus::Rented),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(repriced.price_per_hour, 9.0);
        assert_eq!(repriced.status, BicycleStatus::Rented);
    }

    #[tokio::test]
    async fn update_of_missing_bicycle_is_not_found() {
        let repos = migrated_repos().await;
        let service = BicycleService::new(repos);

        let err = service
            .update(5, BicyclePatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Bicycle", .. }));
    }

    #[tokio::test]
    async fn most_rented_prefers_lowest_id_on_tie() {
        let repos = migrated_repos().await;
        let service = BicycleService::new(repos.clone());
        assert_eq!(service.most_rented().await.unwrap(), None);

        let user = add_user(&repos, "+380000000001").await;
        let first = add_bicycle(&repos, None).await;
        let second = add_bicycle(&repos, None).await;
        let third = add_bicycle(&repos, None).await;

        for day in 1..=3 {
            insert_rental(&repos, user.id, second.id, at(2024, 3, day)).await;
            insert_rental(&repos, user.id, first.id, at(2024, 4, day)).await;
        }
        insert_rental(&repos, user.id, third.id, at(2024, 5, 1)).await;

        let top = service.most_rented().await.unwrap().unwrap();
        assert_eq!(top.id, first.id);
    }
}
