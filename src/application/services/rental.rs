//! Rental workflow
//!
//! Enforces the cross-entity rules (user, bicycle availability, discount
//! eligibility) before anything is written. Check-out and return are
//! delegated to the repository, which pairs the rental write with the
//! bicycle status change in one transaction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{
    Discount, DomainError, DomainResult, NewRental, Rental, RentalPatch, RepositoryProvider,
};

/// Closed time window: rentals starting at or after `from` and planned to
/// end at or before `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RentalWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

pub struct RentalService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RentalService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self, window: Option<RentalWindow>) -> DomainResult<Vec<Rental>> {
        match window {
            Some(w) => self.repos.rentals().find_within(w.from, w.to).await,
            None => self.repos.rentals().find_all().await,
        }
    }

    pub async fn get(&self, id: i32) -> DomainResult<Rental> {
        self.repos
            .rentals()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental", id))
    }

    /// Open a rental. Checks run in a fixed order and the first failure is
    /// returned: user, bicycle, bicycle availability, discount.
    pub async fn create(&self, rental: NewRental) -> DomainResult<Rental> {
        self.ensure_user(rental.user_id).await?;

        let bicycle = self
            .repos
            .bicycles()
            .find_by_id(rental.bicycle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bicycle", rental.bicycle_id))?;

        if !bicycle.is_available() {
            record_rejection("bicycle_unavailable");
            warn!(
                bicycle_id = bicycle.id,
                status = %bicycle.status,
                "Rental rejected: bicycle not available"
            );
            return Err(DomainError::invalid_state(
                "Bicycle",
                format!("bicycle {} is {}", bicycle.id, bicycle.status),
            ));
        }

        if let Some(discount_id) = rental.discount_id {
            self.ensure_discount_eligible(discount_id, rental.rental_start_time)
                .await?;
        }

        let opened = self.repos.rentals().check_out(rental).await?;
        metrics::counter!("bike_rental_checkouts_total").increment(1);
        info!(
            rental_id = opened.id,
            user_id = opened.user_id,
            bicycle_id = opened.bicycle_id,
            start = %opened.rental_start_time,
            "Bicycle checked out"
        );
        Ok(opened)
    }

    /// Apply a partial update. A changed discount is re-validated against
    /// the start time already on record, not one supplied in the same patch.
    /// Availability of a newly referenced bicycle is not re-checked; the
    /// repository moves bicycle status along with the rental.
    pub async fn update(&self, id: i32, patch: RentalPatch) -> DomainResult<Rental> {
        let current = self.get(id).await?;

        if let Some(user_id) = patch.user_id.filter(|u| *u != current.user_id) {
            self.ensure_user(user_id).await?;
        }
        if let Some(bicycle_id) = patch.changed_bicycle(&current) {
            self.repos
                .bicycles()
                .find_by_id(bicycle_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Bicycle", bicycle_id))?;
        }
        if let Some(discount_id) = patch.changed_discount(&current) {
            self.ensure_discount_eligible(discount_id, current.rental_start_time)
                .await?;
        }

        let returning = patch.records_return(&current);
        let mut staged = current.clone();
        patch.apply(&mut staged);

        let stored = self.repos.rentals().update(&current, staged).await?;
        if returning {
            metrics::counter!("bike_rental_returns_total").increment(1);
            info!(
                rental_id = stored.id,
                bicycle_id = stored.bicycle_id,
                "Bicycle returned"
            );
        }
        Ok(stored)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.rentals().delete(id).await?;
        info!(rental_id = id, "Rental deleted");
        Ok(())
    }

    pub async fn history_for_bicycle(&self, bicycle_id: i32) -> DomainResult<Vec<Rental>> {
        self.repos
            .bicycles()
            .find_by_id(bicycle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Bicycle", bicycle_id))?;
        self.repos.rentals().find_by_bicycle(bicycle_id).await
    }

    /// Sum of `total_price` over rentals inside the window; 0.0 when none match.
    pub async fn revenue(&self, window: RentalWindow) -> DomainResult<f64> {
        if window.from >= window.to {
            return Err(DomainError::Validation(
                "start_date must be earlier than end_date".into(),
            ));
        }
        self.repos
            .rentals()
            .total_revenue_within(window.from, window.to)
            .await
    }

    async fn ensure_user(&self, user_id: i32) -> DomainResult<()> {
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("User", user_id))
    }

    async fn ensure_discount_eligible(
        &self,
        discount_id: i32,
        start: DateTime<Utc>,
    ) -> DomainResult<Discount> {
        let discount = self
            .repos
            .discounts()
            .find_by_id(discount_id)
            .await?
            .ok_or_else(|| {
                record_rejection("discount_missing");
                warn!(discount_id, "Rental rejected: unknown discount");
                DomainError::invalid_state(
                    "Discount",
                    format!("discount {} does not exist", discount_id),
                )
            })?;

        if !discount.is_eligible_at(start) {
            record_rejection("discount_ineligible");
            warn!(
                discount_id,
                start = %start,
                is_active = discount.is_active,
                "Rental rejected: discount not applicable"
            );
            return Err(DomainError::invalid_state(
                "Discount",
                format!(
                    "discount {} is not applicable to a rental starting at {}",
                    discount.name, start
                ),
            ));
        }
        Ok(discount)
    }
}

fn record_rejection(reason: &'static str) {
    metrics::counter!("bike_rental_rejections_total", "reason" => reason).increment(1);
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::application::services::test_fixtures::*;
    use crate::domain::{BicyclePatch, BicycleStatus};
    use crate::infrastructure::database::repositories::test_support::migrated_repos;
    use crate::shared::types::time::parse_timestamp;

    fn ts(s: &str) -> DateTime<Utc> {
        parse_timestamp(s).unwrap()
    }

    fn two_hour_rental(user_id: i32, bicycle_id: i32, discount_id: Option<i32>) -> NewRental {
        NewRental {
            user_id,
            bicycle_id,
            rental_start_time: ts("2024-01-01T10:00:00Z"),
            rental_end_time: ts("2024-01-01T12:00:00Z"),
            actual_return_time: None,
            total_price: 20.0,
            discount_id,
        }
    }

    #[tokio::test]
    async fn checkout_echoes_input_and_marks_bicycle_rented() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let bike = add_bicycle(&repos, None).await;

        let rental = service
            .create(two_hour_rental(user.id, bike.id, None))
            .await
            .unwrap();

        assert!(rental.id > 0);
        assert_eq!(rental.user_id, user.id);
        assert_eq!(rental.bicycle_id, bike.id);
        assert_eq!(rental.rental_start_time, ts("2024-01-01T10:00:00Z"));
        assert_eq!(rental.rental_end_time, ts("2024-01-01T12:00:00Z"));
        assert_eq!(rental.total_price, 20.0);
        assert_eq!(rental.actual_return_time, None);

        let bike = repos.bicycles().find_by_id(bike.id).await.unwrap().unwrap();
        assert_eq!(bike.status, BicycleStatus::Rented);
    }

    #[tokio::test]
    async fn second_checkout_of_rented_bicycle_is_invalid_state() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let bike = add_bicycle(&repos, None).await;

        service
            .create(two_hour_rental(user.id, bike.id, None))
            .await
            .unwrap();
        let err = service
            .create(two_hour_rental(user.id, bike.id, None))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidState { entity: "Bicycle", .. }));
        assert_eq!(repos.rentals().find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bicycle_under_repair_cannot_be_rented() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let mut bike = add_bicycle(&repos, None).await;
        BicyclePatch {
            status: Some(BicycleStatus::UnderRepair),
            ..Default::default()
        }
        .apply(&mut bike);
        repos.bicycles().update(bike.clone()).await.unwrap();

        let err = service
            .create(two_hour_rental(user.id, bike.id, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { entity: "Bicycle", .. }));
    }

    #[tokio::test]
    async fn checks_run_in_order_user_then_bicycle() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());

        // neither exists: the user is reported first
        let err = service.create(two_hour_rental(1, 1, None)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));

        let user = add_user(&repos, "+380000000001").await;
        let err = service
            .create(two_hour_rental(user.id, 99, Some(42)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Bicycle", .. }));
    }

    #[tokio::test]
    async fn missing_or_ineligible_discount_is_invalid_state() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let bike = add_bicycle(&repos, None).await;
        let inactive = add_discount(
            &repos,
            "Paused",
            ts("2024-01-01T00:00:00Z"),
            ts("2024-01-02T00:00:00Z"),
            false,
        )
        .await;
        let expired = add_discount(
            &repos,
            "Last year",
            ts("2023-01-01T00:00:00Z"),
            ts("2023-12-31T23:59:59Z"),
            true,
        )
        .await;

        for discount_id in [999, inactive.id, expired.id] {
            let err = service
                .create(two_hour_rental(user.id, bike.id, Some(discount_id)))
                .await
                .unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidState { entity: "Discount", .. }),
                "discount {}: {:?}",
                discount_id,
                err
            );
        }

        // rejected attempts must not have claimed the bicycle
        let bike = repos.bicycles().find_by_id(bike.id).await.unwrap().unwrap();
        assert!(bike.is_available());
    }

    #[tokio::test]
    async fn naive_start_inside_discount_window_is_eligible() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let bike = add_bicycle(&repos, None).await;
        let discount = add_discount(
            &repos,
            "New year",
            ts("2024-01-01T00:00:00Z"),
            ts("2024-01-02T00:00:00Z"),
            true,
        )
        .await;

        let mut request = two_hour_rental(user.id, bike.id, Some(discount.id));
        request.rental_start_time = ts("2024-01-01T10:00:00");

        let rental = service.create(request).await.unwrap();
        assert_eq!(rental.discount_id, Some(discount.id));
    }

    #[tokio::test]
    async fn discount_on_update_is_checked_against_existing_start() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let bike = add_bicycle(&repos, None).await;
        let march = add_discount(
            &repos,
            "March",
            ts("2024-03-01T00:00:00Z"),
            ts("2024-03-31T00:00:00Z"),
            true,
        )
        .await;
        let rental = service
            .create(two_hour_rental(user.id, bike.id, None))
            .await
            .unwrap();

        // moving the start into March in the same patch does not help
        let err = service
            .update(
                rental.id,
                RentalPatch {
                    rental_start_time: Some(ts("2024-03-10T10:00:00Z")),
                    discount_id: Some(Some(march.id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { entity: "Discount", .. }));
        assert_eq!(service.get(rental.id).await.unwrap(), rental);
    }

    #[tokio::test]
    async fn patch_keeps_unsupplied_fields_and_empty_patch_is_no_op() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let bike = add_bicycle(&repos, None).await;
        let rental = service
            .create(two_hour_rental(user.id, bike.id, None))
            .await
            .unwrap();

        let unchanged = service
            .update(rental.id, RentalPatch::default())
            .await
            .unwrap();
        assert_eq!(unchanged, rental);

        let repriced = service
            .update(
                rental.id,
                RentalPatch {
                    total_price: Some(18.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(repriced.total_price, 18.0);
        assert_eq!(repriced.rental_start_time, rental.rental_start_time);
        assert_eq!(repriced.bicycle_id, rental.bicycle_id);
    }

    #[tokio::test]
    async fn update_to_unknown_bicycle_is_not_found_but_rented_one_is_accepted() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let first = add_bicycle(&repos, None).await;
        let second = add_bicycle(&repos, None).await;
        let rental = service
            .create(two_hour_rental(user.id, first.id, None))
            .await
            .unwrap();
        service
            .create(two_hour_rental(user.id, second.id, None))
            .await
            .unwrap();

        let err = service
            .update(
                rental.id,
                RentalPatch {
                    bicycle_id: Some(404),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Bicycle", .. }));

        let moved = service
            .update(
                rental.id,
                RentalPatch {
                    bicycle_id: Some(second.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.bicycle_id, second.id);
        // the first bicycle is no longer held; the second keeps its own rental
        assert!(repos.bicycles().find_by_id(first.id).await.unwrap().unwrap().is_available());
    }

    #[tokio::test]
    async fn recording_return_makes_bicycle_available() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let bike = add_bicycle(&repos, None).await;
        let rental = service
            .create(two_hour_rental(user.id, bike.id, None))
            .await
            .unwrap();

        let returned_at = Utc.with_ymd_and_hms(2024, 1, 1, 11, 50, 0).unwrap();
        let closed = service
            .update(
                rental.id,
                RentalPatch {
                    actual_return_time: Some(Some(returned_at)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(closed.actual_return_time, Some(returned_at));

        let bike = repos.bicycles().find_by_id(bike.id).await.unwrap().unwrap();
        assert!(bike.is_available());

        // the bicycle can be rented again
        service
            .create(two_hour_rental(user.id, bike.id, None))
            .await
            .unwrap();
    }

    async fn status_of(repos: &Arc<dyn RepositoryProvider>, bicycle_id: i32) -> BicycleStatus {
        repos
            .bicycles()
            .find_by_id(bicycle_id)
            .await
            .unwrap()
            .unwrap()
            .status
    }

    #[tokio::test]
    async fn rental_created_as_returned_does_not_hold_the_bicycle() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let bike = add_bicycle(&repos, None).await;

        let mut past = two_hour_rental(user.id, bike.id, None);
        past.actual_return_time = Some(ts("2024-01-01T11:55:00Z"));
        let stored = service.create(past).await.unwrap();
        assert!(stored.is_returned());
        assert_eq!(status_of(&repos, bike.id).await, BicycleStatus::Available);

        service
            .create(two_hour_rental(user.id, bike.id, None))
            .await
            .unwrap();
        assert_eq!(status_of(&repos, bike.id).await, BicycleStatus::Rented);
    }

    #[tokio::test]
    async fn deleting_open_rental_releases_its_bicycle() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let bike = add_bicycle(&repos, None).await;
        let finished = insert_rental(&repos, user.id, bike.id, at(2023, 12, 1)).await;
        let open = service
            .create(two_hour_rental(user.id, bike.id, None))
            .await
            .unwrap();

        // a returned rental going away leaves the current one in charge
        service.delete(finished.id).await.unwrap();
        assert_eq!(status_of(&repos, bike.id).await, BicycleStatus::Rented);

        service.delete(open.id).await.unwrap();
        assert_eq!(status_of(&repos, bike.id).await, BicycleStatus::Available);
        assert!(service.list(None).await.unwrap().is_empty());

        assert!(matches!(
            service.delete(open.id).await,
            Err(DomainError::NotFound { entity: "Rental", .. })
        ));
    }

    #[tokio::test]
    async fn moving_open_rental_swaps_bicycle_status() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let first = add_bicycle(&repos, None).await;
        let second = add_bicycle(&repos, None).await;
        let rental = service
            .create(two_hour_rental(user.id, first.id, None))
            .await
            .unwrap();

        service
            .update(
                rental.id,
                RentalPatch {
                    bicycle_id: Some(second.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(status_of(&repos, first.id).await, BicycleStatus::Available);
        assert_eq!(status_of(&repos, second.id).await, BicycleStatus::Rented);

        service
            .update(
                rental.id,
                RentalPatch {
                    actual_return_time: Some(Some(ts("2024-01-01T11:30:00Z"))),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(status_of(&repos, first.id).await, BicycleStatus::Available);
        assert_eq!(status_of(&repos, second.id).await, BicycleStatus::Available);
    }

    #[tokio::test]
    async fn clearing_return_time_reclaims_the_bicycle() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let bike = add_bicycle(&repos, None).await;
        let rental = service
            .create(two_hour_rental(user.id, bike.id, None))
            .await
            .unwrap();
        service
            .update(
                rental.id,
                RentalPatch {
                    actual_return_time: Some(Some(ts("2024-01-01T11:30:00Z"))),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(status_of(&repos, bike.id).await, BicycleStatus::Available);

        let reopened = service
            .update(
                rental.id,
                RentalPatch {
                    actual_return_time: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!reopened.is_returned());
        assert_eq!(status_of(&repos, bike.id).await, BicycleStatus::Rented);
    }

    #[tokio::test]
    async fn window_listing_and_revenue_share_bounds() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let bike = add_bicycle(&repos, None).await;

        // 10:00-12:00 each day
        insert_priced_rental(&repos, user.id, bike.id, at(2024, 5, 1), 12.5).await;
        insert_priced_rental(&repos, user.id, bike.id, at(2024, 5, 2), 7.5).await;
        insert_priced_rental(&repos, user.id, bike.id, at(2024, 5, 3), 100.0).await;

        let window = RentalWindow {
            from: at(2024, 5, 1),
            to: at(2024, 5, 2) + Duration::hours(2),
        };
        let listed = service.list(Some(window)).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(service.revenue(window).await.unwrap(), 20.0);

        let empty = RentalWindow {
            from: at(2030, 1, 1),
            to: at(2030, 2, 1),
        };
        assert_eq!(service.revenue(empty).await.unwrap(), 0.0);
        assert_eq!(service.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn revenue_rejects_inverted_window() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos);
        let instant = at(2024, 5, 1);

        let err = service
            .revenue(RentalWindow {
                from: instant,
                to: instant,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn history_requires_existing_bicycle() {
        let repos = migrated_repos().await;
        let service = RentalService::new(repos.clone());
        let user = add_user(&repos, "+380000000001").await;
        let bike = add_bicycle(&repos, None).await;
        let other = add_bicycle(&repos, None).await;
        insert_rental(&repos, user.id, bike.id, at(2024, 7, 1)).await;
        insert_rental(&repos, user.id, other.id, at(2024, 7, 1)).await;
        insert_rental(&repos, user.id, bike.id, at(2024, 7, 2)).await;

        let history = service.history_for_bicycle(bike.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|r| r.bicycle_id == bike.id));

        assert!(matches!(
            service.history_for_bicycle(500).await,
            Err(DomainError::NotFound { entity: "Bicycle", .. })
        ));
    }
}
