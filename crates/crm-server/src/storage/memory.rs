//! In-memory customer store
//!
//! A list behind a single mutex. The lock serializes all access, which is
//! the only concurrency guarantee this backend makes. Ids come from a
//! monotonic counter starting at 1 and are never reused after a delete.

use async_trait::async_trait;
use crm_core::{Customer, CustomerError, CustomerRegistration, CustomerStore, Result};
use std::sync::{Mutex, MutexGuard};

pub struct MemoryStore {
    inner: Mutex<Inner>,
}

struct Inner {
    customers: Vec<Customer>,
    next_id: i64,
}

impl Inner {
    fn insert(&mut self, registration: CustomerRegistration) {
        let id = self.next_id;
        self.next_id += 1;
        self.customers.push(Customer {
            id,
            name: registration.name,
            email: registration.email,
            age: registration.age,
        });
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_seed(Vec::new())
    }

    /// Create a store pre-populated with seed rows. Each row is assigned an
    /// id from the counter, in order.
    pub fn with_seed(seed: Vec<CustomerRegistration>) -> Self {
        let mut inner = Inner {
            customers: Vec::new(),
            next_id: 1,
        };
        for registration in seed {
            inner.insert(registration);
        }
        Self {
            inner: Mutex::new(inner),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| CustomerError::Database("customer store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn select_all(&self) -> Result<Vec<Customer>> {
        Ok(self.lock()?.customers.clone())
    }

    async fn select_by_id(&self, id: i64) -> Result<Option<Customer>> {
        Ok(self.lock()?.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, registration: CustomerRegistration) -> Result<()> {
        self.lock()?.insert(registration);
        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self.lock()?.customers.iter().any(|c| c.email == email))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.lock()?.customers.iter().any(|c| c.id == id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.lock()?.customers.retain(|c| c.id != id);
        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<()> {
        let mut inner = self.lock()?;
        if let Some(existing) = inner.customers.iter_mut().find(|c| c.id == customer.id) {
            *existing = customer.clone();
        }
        Ok(())
    }
}
