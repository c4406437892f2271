//! Customer types

use serde::{Deserialize, Serialize};

/// Customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Customer registration request
///
/// Carries no id; the storage backend assigns one on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRegistration {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Partial update request
///
/// `None` means "no change requested" for that field. A field that is
/// present but equal to the current value is also a no-op, but the two
/// cases stay distinct in the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}
