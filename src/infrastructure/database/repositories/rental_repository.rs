//! SeaORM implementation of RentalRepository
//!
//! Every write that opens, closes, moves or removes a rental runs in one
//! transaction with conditional status writes on the bicycle rows involved.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::bicycle::BicycleStatus;
use crate::domain::rental::{NewRental, Rental, RentalRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{bicycle, rental};

use super::bicycle_repository::status_to_entity;
use super::db_err;

const ENTITY: &str = "Rental";

pub struct SeaOrmRentalRepository {
    db: DatabaseConnection,
}

impl SeaOrmRentalRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: rental::Model) -> Rental {
    Rental {
        id: m.id,
        user_id: m.user_id,
        bicycle_id: m.bicycle_id,
        rental_start_time: m.rental_start_time,
        rental_end_time: m.rental_end_time,
        actual_return_time: m.actual_return_time,
        total_price: m.total_price,
        discount_id: m.discount_id,
    }
}

fn domain_to_active(r: Rental) -> rental::ActiveModel {
    rental::ActiveModel {
        id: Set(r.id),
        user_id: Set(r.user_id),
        bicycle_id: Set(r.bicycle_id),
        rental_start_time: Set(r.rental_start_time),
        rental_end_time: Set(r.rental_end_time),
        actual_return_time: Set(r.actual_return_time),
        total_price: Set(r.total_price),
        discount_id: Set(r.discount_id),
    }
}

/// Move a bicycle from `from` to `to` only if it currently is in `from`.
/// Returns the number of rows changed (0 or 1).
async fn transition_bicycle<C: ConnectionTrait>(
    conn: &C,
    bicycle_id: i32,
    from: BicycleStatus,
    to: BicycleStatus,
) -> Result<u64, DbErr> {
    let result = bicycle::Entity::update_many()
        .col_expr(bicycle::Column::Status, Expr::value(status_to_entity(to)))
        .filter(bicycle::Column::Id.eq(bicycle_id))
        .filter(bicycle::Column::Status.eq(status_to_entity(from)))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

async fn update_in<C: ConnectionTrait>(conn: &C, r: Rental) -> DomainResult<Rental> {
    let id = r.id;
    match domain_to_active(r).update(conn).await {
        Ok(updated) => Ok(model_to_domain(updated)),
        Err(DbErr::RecordNotUpdated) => Err(DomainError::not_found(ENTITY, id)),
        Err(e) => Err(db_err(ENTITY)(e)),
    }
}

// ── RentalRepository impl ──────────────────────────────────────

#[async_trait]
impl RentalRepository for SeaOrmRentalRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Rental>> {
        let model = rental::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Rental>> {
        let models = rental::Entity::find()
            .order_by_asc(rental::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_within(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Rental>> {
        let models = rental::Entity::find()
            .filter(rental::Column::RentalStartTime.gte(from))
            .filter(rental::Column::RentalEndTime.lte(to))
            .order_by_asc(rental::Column::RentalStartTime)
            .order_by_asc(rental::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_bicycle(&self, bicycle_id: i32) -> DomainResult<Vec<Rental>> {
        let models = rental::Entity::find()
            .filter(rental::Column::BicycleId.eq(bicycle_id))
            .order_by_asc(rental::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count_by_user(&self, user_id: i32) -> DomainResult<u64> {
        rental::Entity::find()
            .filter(rental::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(db_err(ENTITY))
    }

    async fn check_out(&self, r: NewRental) -> DomainResult<Rental> {
        let txn = self.db.begin().await.map_err(db_err(ENTITY))?;

        // a rental recorded as already returned never holds the bicycle
        if r.actual_return_time.is_none() {
            let claimed = transition_bicycle(
                &txn,
                r.bicycle_id,
                BicycleStatus::Available,
                BicycleStatus::Rented,
            )
            .await
            .map_err(db_err(ENTITY))?;

            if claimed == 0 {
                // dropping `txn` rolls back
                return Err(DomainError::invalid_state(
                    "Bicycle",
                    format!("bicycle {} is no longer available", r.bicycle_id),
                ));
            }
        }

        let model = rental::ActiveModel {
            id: NotSet,
            user_id: Set(r.user_id),
            bicycle_id: Set(r.bicycle_id),
            rental_start_time: Set(r.rental_start_time),
            rental_end_time: Set(r.rental_end_time),
            actual_return_time: Set(r.actual_return_time),
            total_price: Set(r.total_price),
            discount_id: Set(r.discount_id),
        };
        let inserted = model.insert(&txn).await.map_err(db_err(ENTITY))?;

        txn.commit().await.map_err(db_err(ENTITY))?;
        info!(
            "Rental {} stored: bicycle {} -> user {} (open: {})",
            inserted.id,
            inserted.bicycle_id,
            inserted.user_id,
            inserted.actual_return_time.is_none()
        );
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, previous: &Rental, updated: Rental) -> DomainResult<Rental> {
        let was_out = !previous.is_returned();
        let is_out = !updated.is_returned();
        let moved = previous.bicycle_id != updated.bicycle_id;
        let release = was_out && (!is_out || moved);
        let claim = is_out && (!was_out || moved);

        if !release && !claim {
            debug!("Updating rental: {}", updated.id);
            return update_in(&self.db, updated).await;
        }

        let txn = self.db.begin().await.map_err(db_err(ENTITY))?;
        let stored = update_in(&txn, updated).await?;

        if release {
            let released = transition_bicycle(
                &txn,
                previous.bicycle_id,
                BicycleStatus::Rented,
                BicycleStatus::Available,
            )
            .await
            .map_err(db_err(ENTITY))?;
            if released == 0 {
                debug!(
                    "Rental {}: bicycle {} was not marked rented",
                    stored.id, previous.bicycle_id
                );
            }
        }
        if claim {
            let claimed = transition_bicycle(
                &txn,
                stored.bicycle_id,
                BicycleStatus::Available,
                BicycleStatus::Rented,
            )
            .await
            .map_err(db_err(ENTITY))?;
            if claimed == 0 {
                debug!(
                    "Rental {}: bicycle {} was not available, status left as is",
                    stored.id, stored.bicycle_id
                );
            }
        }

        txn.commit().await.map_err(db_err(ENTITY))?;
        info!(
            "Rental {} updated: bicycle {} (released: {}, claimed: {})",
            stored.id, stored.bicycle_id, release, claim
        );
        Ok(stored)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err(ENTITY))?;

        let existing = rental::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err(ENTITY))?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;

        rental::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err(ENTITY))?;

        if existing.actual_return_time.is_none() {
            transition_bicycle(
                &txn,
                existing.bicycle_id,
                BicycleStatus::Rented,
                BicycleStatus::Available,
            )
            .await
            .map_err(db_err(ENTITY))?;
        }

        txn.commit().await.map_err(db_err(ENTITY))?;
        info!("Rental deleted: {}", id);
        Ok(())
    }

    async fn total_revenue_within(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<f64> {
        let total = rental::Entity::find()
            .select_only()
            .column_as(rental::Column::TotalPrice.sum(), "total")
            .filter(rental::Column::RentalStartTime.gte(from))
            .filter(rental::Column::RentalEndTime.lte(to))
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(total.flatten().unwrap_or(0.0))
    }
}
