//! Discount service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{
    Discount, DiscountPatch, DomainError, DomainResult, NewDiscount, RepositoryProvider,
};

pub struct DiscountService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DiscountService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// All discounts, or only those usable right now when `active_only` is set.
    pub async fn list(&self, active_only: bool) -> DomainResult<Vec<Discount>> {
        if active_only {
            self.repos.discounts().find_active_at(Utc::now()).await
        } else {
            self.repos.discounts().find_all().await
        }
    }

    pub async fn get(&self, id: i32) -> DomainResult<Discount> {
        self.repos
            .discounts()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Discount", id))
    }

    pub async fn create(&self, discount: NewDiscount) -> DomainResult<Discount> {
        validate_terms(
            discount.percentage_amount,
            discount.valid_from,
            discount.valid_to,
        )?;
        self.ensure_name_free(&discount.name, None).await?;
        let saved = self.repos.discounts().save(discount).await?;
        info!(
            discount_id = saved.id,
            name = %saved.name,
            percentage = saved.percentage_amount,
            "Discount created"
        );
        Ok(saved)
    }

    pub async fn update(&self, id: i32, patch: DiscountPatch) -> DomainResult<Discount> {
        let mut discount = self.get(id).await?;
        if let Some(name) = patch.name.as_deref() {
            self.ensure_name_free(name, Some(id)).await?;
        }
        patch.apply(&mut discount);
        validate_terms(
            discount.percentage_amount,
            discount.valid_from,
            discount.valid_to,
        )?;
        self.repos.discounts().update(discount).await
    }

    /// Rentals referencing the discount keep existing with the reference cleared.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.discounts().delete(id).await?;
        info!(discount_id = id, "Discount deleted");
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str, except: Option<i32>) -> DomainResult<()> {
        match self.repos.discounts().find_by_name(name).await? {
            Some(existing) if Some(existing.id) != except => Err(DomainError::conflict(
                "Discount",
                format!("discount named '{}' already exists", name),
            )),
            _ => Ok(()),
        }
    }
}

fn validate_terms(
    percentage: f64,
    valid_from: DateTime<Utc>,
    valid_to: DateTime<Utc>,
) -> DomainResult<()> {
    if !(0.0..=100.0).contains(&percentage) {
        return Err(DomainError::Validation(format!(
            "percentage_amount must be within 0..=100, got {}",
            percentage
        )));
    }
    if valid_from > valid_to {
        return Err(DomainError::Validation(
            "valid_from must not be later than valid_to".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::application::services::test_fixtures::*;
    use crate::infrastructure::database::repositories::test_support::migrated_repos;

    fn new_discount(name: &str, percentage: f64) -> NewDiscount {
        NewDiscount {
            name: name.into(),
            percentage_amount: percentage,
            valid_from: at(2024, 1, 1),
            valid_to: at(2024, 12, 31),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn percentage_outside_range_is_rejected() {
        let repos = migrated_repos().await;
        let service = DiscountService::new(repos);

        assert!(matches!(
            service.create(new_discount("Too much", 120.0)).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            service.create(new_discount("Negative", -1.0)).await,
            Err(DomainError::Validation(_))
        ));
        assert!(service.create(new_discount("Free ride", 100.0)).await.is_ok());
    }

    #[tokio::test]
    async fn inverted_window_is_rejected_on_update() {
        let repos = migrated_repos().await;
        let service = DiscountService::new(repos);
        let created = service.create(new_discount("Spring", 15.0)).await.unwrap();

        let err = service
            .update(
                created.id,
                DiscountPatch {
                    valid_to: Some(at(2023, 6, 1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // stored row is untouched
        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn duplicate_name_conflicts() {
        let repos = migrated_repos().await;
        let service = DiscountService::new(repos);
        service.create(new_discount("Student", 20.0)).await.unwrap();

        assert!(matches!(
            service.create(new_discount("Student", 25.0)).await,
            Err(DomainError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn active_only_lists_discounts_valid_now() {
        let repos = migrated_repos().await;
        let service = DiscountService::new(repos.clone());
        let now = Utc::now();

        let current = add_discount(
            &repos,
            "Current",
            now - Duration::days(1),
            now + Duration::days(1),
            true,
        )
        .await;
        add_discount(
            &repos,
            "Switched off",
            now - Duration::days(1),
            now + Duration::days(1),
            false,
        )
        .await;
        add_discount(
            &repos,
            "Expired",
            now - Duration::days(10),
            now - Duration::days(5),
            true,
        )
        .await;

        let active = service.list(true).await.unwrap();
        assert_eq!(active, vec![current]);
        assert_eq!(service.list(false).await.unwrap().len(), 3);
    }
}
