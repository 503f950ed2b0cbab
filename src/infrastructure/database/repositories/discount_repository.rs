//! SeaORM implementation of DiscountRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::discount::{Discount, DiscountRepository, NewDiscount};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::discount;

use super::db_err;

const ENTITY: &str = "Discount";

pub struct SeaOrmDiscountRepository {
    db: DatabaseConnection,
}

impl SeaOrmDiscountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: discount::Model) -> Discount {
    Discount {
        id: m.id,
        name: m.name,
        percentage_amount: m.percentage_amount,
        valid_from: m.valid_from,
        valid_to: m.valid_to,
        is_active: m.is_active,
    }
}

#[async_trait]
impl DiscountRepository for SeaOrmDiscountRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Discount>> {
        let model = discount::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Discount>> {
        let model = discount::Entity::find()
            .filter(discount::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Discount>> {
        let models = discount::Entity::find()
            .order_by_asc(discount::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_active_at(&self, at: DateTime<Utc>) -> DomainResult<Vec<Discount>> {
        let models = discount::Entity::find()
            .filter(discount::Column::IsActive.eq(true))
            .filter(discount::Column::ValidFrom.lte(at))
            .filter(discount::Column::ValidTo.gte(at))
            .order_by_asc(discount::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, d: NewDiscount) -> DomainResult<Discount> {
        let model = discount::ActiveModel {
            id: NotSet,
            name: Set(d.name),
            percentage_amount: Set(d.percentage_amount),
            valid_from: Set(d.valid_from),
            valid_to: Set(d.valid_to),
            is_active: Set(d.is_active),
        };
        let result = model.insert(&self.db).await.map_err(db_err(ENTITY))?;
        info!("Discount saved: {} ({})", result.name, result.id);
        Ok(model_to_domain(result))
    }

    async fn update(&self, d: Discount) -> DomainResult<Discount> {
        debug!("Updating discount: {}", d.id);

        let id = d.id;
        let model = discount::ActiveModel {
            id: Set(d.id),
            name: Set(d.name),
            percentage_amount: Set(d.percentage_amount),
            valid_from: Set(d.valid_from),
            valid_to: Set(d.valid_to),
            is_active: Set(d.is_active),
        };
        match model.update(&self.db).await {
            Ok(updated) => Ok(model_to_domain(updated)),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::not_found(ENTITY, id)),
            Err(e) => Err(db_err(ENTITY)(e)),
        }
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = discount::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found(ENTITY, id));
        }
        info!("Discount deleted: {}", id);
        Ok(())
    }
}
