//! CRM Core Library
//!
//! Domain types, the storage port, and error types for the customer
//! management service. No HTTP and no SQL in here; the server crate plugs
//! concrete backends into the `CustomerStore` port.

pub mod error;
pub mod ports;
pub mod types;

pub use error::{CustomerError, Result};
pub use ports::CustomerStore;
pub use types::*;
