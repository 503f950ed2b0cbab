//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod bicycle_repository;
pub mod discount_repository;
pub mod location_repository;
pub mod rental_repository;
pub mod repository_provider;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// Map a database error for `entity` into the domain vocabulary.
///
/// Constraint violations become `Conflict`; everything else is a storage failure.
pub(crate) fn db_err(entity: &'static str) -> impl Fn(DbErr) -> DomainError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            DomainError::conflict(entity, format!("duplicate value ({})", msg))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            DomainError::conflict(entity, format!("reference constraint violated ({})", msg))
        }
        _ => DomainError::Storage(e.to_string()),
    }
}
