use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::debug;

use crate::models::employee::{Employee, Gender, Status};
use crate::store::{SessionStore, SharedStore, SubscriptionId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub male: usize,
}

impl DashboardMetrics {
    pub fn from_roster(roster: &[Employee]) -> Self {
        DashboardMetrics {
            total: roster.len(),
            active: roster.iter().filter(|e| e.status == Status::Active).count(),
            inactive: roster.iter().filter(|e| e.status == Status::Inactive).count(),
            male: roster.iter().filter(|e| e.gender == Gender::Male).count(),
        }
    }

    /// Metric cards in display order.
    pub fn cards(&self) -> [(&'static str, usize); 4] {
        [
            ("Total employees", self.total),
            ("Active employees", self.active),
            ("Inactive employees", self.inactive),
            ("Male employees", self.male),
        ]
    }
}

/// Live headcount view kept current through a store subscription.
pub struct Dashboard {
    metrics: Rc<Cell<DashboardMetrics>>,
    store: Weak<RefCell<SessionStore>>,
    subscription: SubscriptionId,
}

impl Dashboard {
    pub fn attach(store: &SharedStore) -> Self {
        let mut guard = store.borrow_mut();
        let metrics = Rc::new(Cell::new(DashboardMetrics::from_roster(guard.employees())));
        let sink = metrics.clone();
        let subscription = guard.subscribe(Box::new(move |roster| {
            let next = DashboardMetrics::from_roster(roster);
            debug!("Dashboard metrics refreshed: {:?}", next);
            sink.set(next);
        }));
        drop(guard);

        Dashboard {
            metrics,
            store: Rc::downgrade(store),
            subscription,
        }
    }

    pub fn metrics(&self) -> DashboardMetrics {
        self.metrics.get()
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            if let Ok(mut store) = store.try_borrow_mut() {
                store.unsubscribe(self.subscription);
            }
        }
    }
}
