//! User domain entity

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Unique, required
    pub phone: String,
    /// Unique when present
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl UserPatch {
    pub fn apply(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(phone) = self.phone {
            user.phone = phone;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(address) = self.address {
            user.address = address;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            first_name: "Olena".into(),
            last_name: "Koval".into(),
            phone: "+380501112233".into(),
            email: Some("olena@example.com".into()),
            address: None,
            is_active: true,
        }
    }

    #[test]
    fn deactivation_keeps_contact_details() {
        let mut user = sample_user();
        UserPatch {
            is_active: Some(false),
            ..Default::default()
        }
        .apply(&mut user);

        assert!(!user.is_active);
        assert_eq!(user.phone, "+380501112233");
        assert_eq!(user.email.as_deref(), Some("olena@example.com"));
        assert_eq!(user.full_name(), "Olena Koval");
    }
}
