//! User service

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, NewUser, RepositoryProvider, User, UserPatch};

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_all().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    pub async fn get_by_email(&self, email: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "User",
                field: "email",
                value: email.to_string(),
            })
    }

    pub async fn get_by_phone(&self, phone: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_phone(phone)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "User",
                field: "phone",
                value: phone.to_string(),
            })
    }

    pub async fn create(&self, user: NewUser) -> DomainResult<User> {
        self.ensure_phone_free(&user.phone, None).await?;
        if let Some(email) = user.email.as_deref() {
            self.ensure_email_free(email, None).await?;
        }
        let saved = self.repos.users().save(user).await?;
        info!(user_id = saved.id, name = %saved.full_name(), "User registered");
        Ok(saved)
    }

    pub async fn update(&self, id: i32, patch: UserPatch) -> DomainResult<User> {
        let mut user = self.get(id).await?;
        if let Some(phone) = patch.phone.as_deref() {
            self.ensure_phone_free(phone, Some(id)).await?;
        }
        if let Some(Some(email)) = patch.email.as_ref() {
            self.ensure_email_free(email, Some(id)).await?;
        }
        patch.apply(&mut user);
        self.repos.users().update(user).await
    }

    /// Users with rental history cannot be removed.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        let rentals = self.repos.rentals().count_by_user(id).await?;
        if rentals > 0 {
            return Err(DomainError::conflict(
                "User",
                format!("user {} has {} rental(s) on record", id, rentals),
            ));
        }
        self.repos.users().delete(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn ensure_phone_free(&self, phone: &str, except: Option<i32>) -> DomainResult<()> {
        match self.repos.users().find_by_phone(phone).await? {
            Some(existing) if Some(existing.id) != except => Err(DomainError::conflict(
                "User",
                format!("phone {} is already registered", phone),
            )),
            _ => Ok(()),
        }
    }

    async fn ensure_email_free(&self, email: &str, except: Option<i32>) -> DomainResult<()> {
        match self.repos.users().find_by_email(email).await? {
            Some(existing) if Some(existing.id) != except => Err(DomainError::conflict(
                "User",
                format!("email {} is already registered", email),
            )),
            _ => Ok(()),
        }
    }
}
