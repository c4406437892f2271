//! Storage trait for customer persistence

use crate::types::{Customer, CustomerRegistration};
use crate::Result;
use async_trait::async_trait;

/// Customer store
///
/// The contract both storage backends satisfy. Absence of a row is a normal
/// outcome (`Ok(None)` / `Ok(false)`), never an error; only storage I/O
/// failures surface as `Err`. Ids are assigned inside the backend on insert
/// and are never reused, even after a delete.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All customers, in a stable per-backend order (insertion order for the
    /// in-memory backend, ascending id for SQLite).
    async fn select_all(&self) -> Result<Vec<Customer>>;

    async fn select_by_id(&self, id: i64) -> Result<Option<Customer>>;

    /// Persist a new customer; the backend assigns the id.
    async fn insert(&self, registration: CustomerRegistration) -> Result<()>;

    /// Exact, case-sensitive match.
    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    async fn exists_by_id(&self, id: i64) -> Result<bool>;

    /// Deleting a missing id is a silent no-op at this layer; the service
    /// checks existence first.
    async fn delete_by_id(&self, id: i64) -> Result<()>;

    /// Overwrite name/email/age of the row matching `customer.id`; no-op if
    /// the id is absent.
    async fn update(&self, customer: &Customer) -> Result<()>;
}
