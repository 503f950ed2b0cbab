//! SeaORM implementation of LocationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, NotSet,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::domain::location::{Location, LocationRepository, NewLocation};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{bicycle, location, rental};

use super::db_err;

const ENTITY: &str = "Location";

pub struct SeaOrmLocationRepository {
    db: DatabaseConnection,
}

impl SeaOrmLocationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: location::Model) -> Location {
    Location {
        id: m.id,
        name: m.name,
        address: m.address,
    }
}

#[async_trait]
impl LocationRepository for SeaOrmLocationRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Location>> {
        let model = location::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Location>> {
        let model = location::Entity::find()
            .filter(location::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Location>> {
        let models = location::Entity::find()
            .order_by_asc(location::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, l: NewLocation) -> DomainResult<Location> {
        let model = location::ActiveModel {
            id: NotSet,
            name: Set(l.name),
            address: Set(l.address),
        };
        let result = model.insert(&self.db).await.map_err(db_err(ENTITY))?;
        info!("Location saved: {} ({})", result.name, result.id);
        Ok(model_to_domain(result))
    }

    async fn update(&self, l: Location) -> DomainResult<Location> {
        debug!("Updating location: {}", l.id);

        let id = l.id;
        let model = location::ActiveModel {
            id: Set(l.id),
            name: Set(l.name),
            address: Set(l.address),
        };
        match model.update(&self.db).await {
            Ok(updated) => Ok(model_to_domain(updated)),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::not_found(ENTITY, id)),
            Err(e) => Err(db_err(ENTITY)(e)),
        }
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = location::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found(ENTITY, id));
        }
        info!("Location deleted: {}", id);
        Ok(())
    }

    async fn find_top_by_rentals(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: u64,
    ) -> DomainResult<Vec<Location>> {
        let mut query = location::Entity::find()
            .join(JoinType::InnerJoin, location::Relation::Bicycle.def())
            .join(JoinType::InnerJoin, bicycle::Relation::Rental.def());

        if let Some(from) = from {
            query = query.filter(rental::Column::RentalStartTime.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(rental::Column::RentalStartTime.lte(to));
        }

        let models = query
            .group_by(location::Column::Id)
            .order_by_desc(rental::Column::Id.count())
            .order_by_asc(location::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
