//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::user::{NewUser, User, UserRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::user;

use super::db_err;

const ENTITY: &str = "User";

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_one_by(&self, column: user::Column, value: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(column.eq(value))
            .one(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(model.map(model_to_domain))
    }
}

fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        phone: m.phone,
        email: m.email,
        address: m.address,
        is_active: m.is_active,
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.find_one_by(user::Column::Email, email).await
    }

    async fn find_by_phone(&self, phone: &str) -> DomainResult<Option<User>> {
        self.find_one_by(user::Column::Phone, phone).await
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, u: NewUser) -> DomainResult<User> {
        let model = user::ActiveModel {
            id: NotSet,
            first_name: Set(u.first_name),
            last_name: Set(u.last_name),
            phone: Set(u.phone),
            email: Set(u.email),
            address: Set(u.address),
            is_active: Set(u.is_active),
        };
        let result = model.insert(&self.db).await.map_err(db_err(ENTITY))?;
        info!("User saved: {}", result.id);
        Ok(model_to_domain(result))
    }

    async fn update(&self, u: User) -> DomainResult<User> {
        debug!("Updating user: {}", u.id);

        let id = u.id;
        let model = user::ActiveModel {
            id: Set(u.id),
            first_name: Set(u.first_name),
            last_name: Set(u.last_name),
            phone: Set(u.phone),
            email: Set(u.email),
            address: Set(u.address),
            is_active: Set(u.is_active),
        };
        match model.update(&self.db).await {
            Ok(updated) => Ok(model_to_domain(updated)),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::not_found(ENTITY, id)),
            Err(e) => Err(db_err(ENTITY)(e)),
        }
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err(ENTITY))?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found(ENTITY, id));
        }
        info!("User deleted: {}", id);
        Ok(())
    }
}
