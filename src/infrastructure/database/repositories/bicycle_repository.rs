//! SeaORM implementation of BicycleRepository

use async_trait::async_trait;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, NotSet,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::domain::bicycle::{
    Bicycle, BicycleFilter, BicycleRepository, BicycleStatus, NewBicycle,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{bicycle, rental};

use super::db_err;

const ENTITY: &str = "Bicycle";

pub struct SeaOrmBicycleRepository {
    db: DatabaseConnection,
}

impl SeaOrmBicycleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn status_to_entity(status: BicycleStatus) -> bicycle::BicycleStatus {
    match status {
        BicycleStatus::Available => bicycle::BicycleStatus::Available,
        BicycleStatus::Rented => bicycle::BicycleStatus::Rented,
        BicycleStatus::UnderRepair => bicycle::BicycleStatus::UnderRepair,
    }
}

fn status_to_domain(status: bicycle::BicycleStatus) -> BicycleStatus {
    match status {
        bicycle::BicycleStatus::Available => BicycleStatus::Available,
        bicycle::BicycleStatus::Rented => BicycleStatus::Rented,
        bicycle::BicycleStatus::UnderRepair => BicycleStatus::UnderRepair,
    }
}

fn model_to_domain(m: bicycle::Model) -> Bicycle {
    Bicycle {
        id: m.id,
        brand: m.brand,
        model: m.model,
        bike_type: m.bike_type,
        price_per_hour: m.price_per_hour,
        status: status_to_domain(m.status),
        current_location_id: m.current_location_id,
    }
}

// ── BicycleRepository impl ──────────────────────────────────────

#[async_trait]
impl BicycleRepository for SeaOrmBicycleRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Bicycle>> {
        let model = bicycle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self, filter: &BicycleFilter) -> DomainResult<Vec<Bicycle>> {
        let mut query = bicycle::Entity::find();

        if let Some(location_id) = filter.location_id {
            query = query.filter(bicycle::Column::CurrentLocationId.eq(location_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(bicycle::Column::Status.eq(status_to_entity(status)));
        }
        if filter.sort_by_price {
            query = query.order_by_asc(bicycle::Column::PricePerHour);
        }

        let models = query
            .order_by_asc(bicycle::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, b: NewBicycle) -> DomainResult<Bicycle> {
        let model = bicycle::ActiveModel {
            id: NotSet,
            brand: Set(b.brand),
            model: Set(b.model),
            bike_type: Set(b.bike_type),
            price_per_hour: Set(b.price_per_hour),
            status: Set(status_to_entity(b.status)),
            current_location_id: Set(b.current_location_id),
        };
        let result = model.insert(&self.db).await.map_err(db_err(ENTITY))?;
        info!("Bicycle saved: {} {} ({})", result.brand, result.model, result.id);
        Ok(model_to_domain(result))
    }

    async fn update(&self, b: Bicycle) -> DomainResult<Bicycle> {
        debug!("Updating bicycle: {}", b.id);

        let id = b.id;
        let model = bicycle::ActiveModel {
            id: Set(b.id),
            brand: Set(b.brand),
            model: Set(b.model),
            bike_type: Set(b.bike_type),
            price_per_hour: Set(b.price_per_hour),
            status: Set(status_to_entity(b.status)),
            current_location_id: Set(b.current_location_id),
        };
        match model.update(&self.db).await {
            Ok(updated) => Ok(model_to_domain(updated)),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::not_found(ENTITY, id)),
            Err(e) => Err(db_err(ENTITY)(e)),
        }
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = bicycle::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found(ENTITY, id));
        }
        info!("Bicycle deleted: {}", id);
        Ok(())
    }

    async fn find_most_rented(&self) -> DomainResult<Option<Bicycle>> {
        let model = bicycle::Entity::find()
            .join(JoinType::InnerJoin, bicycle::Relation::Rental.def())
            .group_by(bicycle::Column::Id)
            .order_by_desc(rental::Column::Id.count())
            .order_by_asc(bicycle::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(model.map(model_to_domain))
    }
}
