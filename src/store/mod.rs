//! Session and roster store shared by the admin views.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};

use crate::db::{LocalStorage, AUTH_KEY, USER_KEY};
use crate::models::employee::Employee;
use crate::models::user::User;

pub type SharedStore = Rc<RefCell<SessionStore>>;

pub type RosterListener = Box<dyn FnMut(&[Employee])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct SessionStore {
    storage: Box<dyn LocalStorage>,
    is_authenticated: bool,
    user: Option<User>,
    employees: Vec<Employee>,
    listeners: Vec<(SubscriptionId, RosterListener)>,
    next_subscription: u64,
}

impl SessionStore {
    /// Builds the store and restores a previously persisted session, if any.
    pub fn new(storage: Box<dyn LocalStorage>, roster: Vec<Employee>) -> Self {
        let mut store = SessionStore {
            storage,
            is_authenticated: false,
            user: None,
            employees: roster,
            listeners: Vec::new(),
            next_subscription: 0,
        };
        store.restore();
        store
    }

    pub fn into_shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }

    fn restore(&mut self) {
        let flag = self.storage.get_item(AUTH_KEY).unwrap_or_else(|err| {
            warn!("Failed to read {}: {}", AUTH_KEY, err);
            None
        });
        if flag.as_deref() != Some("true") {
            return;
        }
        let raw_user = match self.storage.get_item(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(err) => {
                warn!("Failed to read {}: {}", USER_KEY, err);
                return;
            }
        };
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => {
                info!("Restored session for {}", user.email);
                self.is_authenticated = true;
                self.user = Some(user);
            }
            Err(err) => warn!("Ignoring stored user profile: {}", err),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn sign_in(&mut self, user: User) {
        if let Err(err) = self.storage.set_item(AUTH_KEY, "true") {
            warn!("Failed to persist {}: {}", AUTH_KEY, err);
        }
        match serde_json::to_string(&user) {
            Ok(raw) => {
                if let Err(err) = self.storage.set_item(USER_KEY, &raw) {
                    warn!("Failed to persist {}: {}", USER_KEY, err);
                }
            }
            Err(err) => warn!("Failed to serialize user profile: {}", err),
        }
        self.is_authenticated = true;
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        self.is_authenticated = false;
        self.user = None;
        if let Err(err) = self.storage.clear() {
            warn!("Failed to clear session storage: {}", err);
        }
    }

    /// Replaces the roster and notifies every subscriber.
    pub fn update_employees(&mut self, employees: Vec<Employee>) {
        self.employees = employees;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.employees);
        }
    }

    /// Listeners run while the store is mutably borrowed and must not borrow it again.
    pub fn subscribe(&mut self, listener: RosterListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}
