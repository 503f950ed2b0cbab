//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail};

use crate::domain::{DomainError, DomainResult, NewUser, User, UserPatch};
use crate::shared::types::patch::nullable;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            phone: u.phone,
            email: u.email,
            address: u.address,
            is_active: u.is_active,
        }
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(length(min = 1, max = 20, message = "phone must be 1-20 characters"))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl From<CreateUserRequest> for NewUser {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            first_name: r.first_name,
            last_name: r.last_name,
            phone: r.phone,
            email: r.email,
            address: r.address,
            is_active: r.is_active,
        }
    }
}

/// Partial update; `null` clears `email` or `address`
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub phone: Option<String>,
    /// Checked in `into_patch`
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    pub fn into_patch(self) -> DomainResult<UserPatch> {
        if let Some(Some(email)) = self.email.as_ref() {
            if !email.validate_email() {
                return Err(DomainError::Validation(format!(
                    "email: '{}' is not a valid address",
                    email
                )));
            }
        }
        Ok(UserPatch {
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            is_active: self.is_active,
        })
    }
}
