use chrono::Utc;
use log::{info, warn};

use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use crate::store::SessionStore;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Signs an admin in.
///
/// Placeholder policy: any non-empty email/password pair is accepted. The
/// user id is the sign-in time in epoch milliseconds.
pub fn login(store: &mut SessionStore, email: &str, password: &str) -> AppResult<User> {
    if email.is_empty() || password.is_empty() {
        warn!("Rejected login with missing credentials");
        return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let user = User::from_email(email, Utc::now().timestamp_millis());
    store.sign_in(user.clone());
    info!("User {} signed in", user.email);
    Ok(user)
}

pub fn logout(store: &mut SessionStore) {
    if let Some(user) = store.user() {
        info!("User {} signed out", user.email);
    }
    store.sign_out();
}

/// Gate for the protected views; errors when nobody is signed in.
pub fn require_session(store: &SessionStore) -> AppResult<&User> {
    match store.user() {
        Some(user) if store.is_authenticated() => Ok(user),
        _ => Err(AppError::Auth("Sign in to continue".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStorage;

    fn store() -> SessionStore {
        SessionStore::new(Box::new(MemoryStorage::new()), Vec::new())
    }

    #[test]
    fn login_accepts_any_non_empty_pair() {
        let mut store = store();
        let user = login(&mut store, "hr.admin@company.in", "secret").unwrap();
        assert_eq!(user.name, "hr.admin");
        assert!(user.id > 0);
        assert!(store.is_authenticated());
        assert_eq!(require_session(&store).unwrap().email, "hr.admin@company.in");
    }

    #[test]
    fn login_rejects_blank_fields() {
        let mut store = store();
        for (email, password) in [("", "secret"), ("a@b.c", ""), ("", "")] {
            let err = login(&mut store, email, password).unwrap_err();
            assert!(matches!(err, AppError::Auth(ref msg) if msg == INVALID_CREDENTIALS));
        }
        assert!(!store.is_authenticated());
        assert!(require_session(&store).is_err());
    }

    #[test]
    fn logout_clears_session() {
        let mut store = store();
        login(&mut store, "a@b.c", "pw").unwrap();
        logout(&mut store);
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
    }
}
