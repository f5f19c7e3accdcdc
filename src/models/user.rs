use serde::{Deserialize, Serialize};

/// Signed-in admin profile, mirrored to storage under the `user` key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub name: String,
    pub id: i64,
}

impl User {
    /// Display name is the local part of the email address.
    pub fn from_email(email: &str, id: i64) -> Self {
        let name = email.split('@').next().unwrap_or_default().to_string();
        User {
            email: email.to_string(),
            name,
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_local_part() {
        let user = User::from_email("priya@example.com", 1700000000000);
        assert_eq!(user.name, "priya");
        assert_eq!(user.email, "priya@example.com");
    }

    #[test]
    fn name_without_at_sign_is_whole_email() {
        let user = User::from_email("admin", 1);
        assert_eq!(user.name, "admin");
    }
}
