//! Customer service
//!
//! Business rules the storage layer does not enforce: existence checks,
//! email uniqueness, and partial-update diffing. The exists-then-write
//! sequences here are not atomic with the write; concurrent callers
//! targeting the same email can race past the check.

use crm_core::{
    Customer, CustomerError, CustomerRegistration, CustomerStore, CustomerUpdate, Result,
};
use std::sync::Arc;
use tracing::{debug, info};

pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Customer>> {
        self.store.select_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Customer> {
        self.store
            .select_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    pub async fn register(&self, registration: CustomerRegistration) -> Result<()> {
        info!("Registering customer: email={}", registration.email);

        if self.store.exists_by_email(&registration.email).await? {
            return Err(CustomerError::DuplicateEmail(registration.email));
        }

        self.store.insert(registration).await
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<()> {
        info!("Deleting customer: id={}", id);

        if !self.store.exists_by_id(id).await? {
            return Err(CustomerError::NotFound(id));
        }

        self.store.delete_by_id(id).await
    }

    /// Apply a partial update. A field is written only when the request
    /// supplies it and the value differs from the current one; the email
    /// uniqueness check runs only when the email actually changes, so the
    /// customer's own current email never counts as a duplicate.
    pub async fn update(&self, id: i64, update: CustomerUpdate) -> Result<()> {
        debug!("Updating customer {}: {:?}", id, update);

        let mut customer = self.get_by_id(id).await?;
        let mut changed = false;

        if let Some(name) = update.name {
            if name != customer.name {
                customer.name = name;
                changed = true;
            }
        }

        if let Some(email) = update.email {
            if email != customer.email {
                if self.store.exists_by_email(&email).await? {
                    return Err(CustomerError::DuplicateEmail(email));
                }
                customer.email = email;
                changed = true;
            }
        }

        if let Some(age) = update.age {
            if age != customer.age {
                customer.age = age;
                changed = true;
            }
        }

        if !changed {
            return Err(CustomerError::NoChanges);
        }

        self.store.update(&customer).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn service() -> CustomerService {
        CustomerService::new(Arc::new(MemoryStore::new()))
    }

    fn registration(name: &str, email: &str, age: i32) -> CustomerRegistration {
        CustomerRegistration {
            name: name.to_string(),
            email: email.to_string(),
            age,
        }
    }

    #[tokio::test]
    async fn get_by_id_missing_fails_not_found() {
        let service = service();

        let err = service.get_by_id(42).await.unwrap_err();
        assert!(matches!(err, CustomerError::NotFound(42)));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_without_inserting() {
        let service = service();
        service
            .register(registration("Baki", "baki@test.com", 34))
            .await
            .unwrap();

        let err = service
            .register(registration("Fake Baki", "baki@test.com", 50))
            .await
            .unwrap_err();
        assert!(matches!(err, CustomerError::DuplicateEmail(_)));
        assert_eq!(service.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_fails_not_found() {
        let service = service();
        service
            .register(registration("Baki", "baki@test.com", 34))
            .await
            .unwrap();

        let err = service.delete_by_id(42).await.unwrap_err();
        assert!(matches!(err, CustomerError::NotFound(42)));
        assert_eq!(service.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_exactly_that_row() {
        let service = service();
        service
            .register(registration("Baki", "baki@test.com", 34))
            .await
            .unwrap();
        service
            .register(registration("Maki", "maki@test.com", 33))
            .await
            .unwrap();

        service.delete_by_id(1).await.unwrap();

        let remaining = service.get_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 2);
        assert!(matches!(
            service.get_by_id(1).await.unwrap_err(),
            CustomerError::NotFound(1)
        ));
    }

    #[tokio::test]
    async fn update_with_equal_values_fails_no_changes() {
        let service = service();
        service
            .register(registration("Baki", "baki@test.com", 34))
            .await
            .unwrap();

        let update = CustomerUpdate {
            name: Some("Baki".to_string()),
            email: Some("baki@test.com".to_string()),
            age: Some(34),
        };
        let err = service.update(1, update).await.unwrap_err();
        assert!(matches!(err, CustomerError::NoChanges));

        let customer = service.get_by_id(1).await.unwrap();
        assert_eq!(customer.name, "Baki");
        assert_eq!(customer.email, "baki@test.com");
        assert_eq!(customer.age, 34);
    }

    #[tokio::test]
    async fn update_with_all_fields_absent_fails_no_changes() {
        let service = service();
        service
            .register(registration("Baki", "baki@test.com", 34))
            .await
            .unwrap();

        let err = service.update(1, CustomerUpdate::default()).await.unwrap_err();
        assert!(matches!(err, CustomerError::NoChanges));
    }

    #[tokio::test]
    async fn update_name_only_leaves_other_fields() {
        let service = service();
        service
            .register(registration("Baki", "baki@test.com", 34))
            .await
            .unwrap();

        let update = CustomerUpdate {
            name: Some("Baki Hanma".to_string()),
            ..Default::default()
        };
        service.update(1, update).await.unwrap();

        let customer = service.get_by_id(1).await.unwrap();
        assert_eq!(customer.name, "Baki Hanma");
        assert_eq!(customer.email, "baki@test.com");
        assert_eq!(customer.age, 34);
    }

    #[tokio::test]
    async fn update_email_to_fresh_value_moves_uniqueness() {
        let store = Arc::new(MemoryStore::new());
        let service = CustomerService::new(store.clone());
        service
            .register(registration("Baki", "baki@test.com", 34))
            .await
            .unwrap();

        let update = CustomerUpdate {
            email: Some("baki2@test.com".to_string()),
            ..Default::default()
        };
        service.update(1, update).await.unwrap();

        assert!(store.exists_by_email("baki2@test.com").await.unwrap());
        assert!(!store.exists_by_email("baki@test.com").await.unwrap());
    }

    #[tokio::test]
    async fn update_email_to_taken_value_fails_duplicate() {
        let service = service();
        service
            .register(registration("Baki", "baki@test.com", 34))
            .await
            .unwrap();
        service
            .register(registration("Maki", "maki@test.com", 33))
            .await
            .unwrap();

        let update = CustomerUpdate {
            email: Some("baki@test.com".to_string()),
            ..Default::default()
        };
        let err = service.update(2, update).await.unwrap_err();
        assert!(matches!(err, CustomerError::DuplicateEmail(_)));
        assert_eq!(service.get_by_id(2).await.unwrap().email, "maki@test.com");
    }

    #[tokio::test]
    async fn update_email_to_own_value_is_no_change_not_duplicate() {
        let service = service();
        service
            .register(registration("Baki", "baki@test.com", 34))
            .await
            .unwrap();

        let update = CustomerUpdate {
            email: Some("baki@test.com".to_string()),
            ..Default::default()
        };
        let err = service.update(1, update).await.unwrap_err();
        assert!(matches!(err, CustomerError::NoChanges));
    }

    #[tokio::test]
    async fn update_missing_customer_fails_not_found() {
        let service = service();

        let update = CustomerUpdate {
            name: Some("Nobody".to_string()),
            ..Default::default()
        };
        let err = service.update(42, update).await.unwrap_err();
        assert!(matches!(err, CustomerError::NotFound(42)));
    }

    // The end-to-end partial-update scenario: change only the email, then
    // submit the same change again.
    #[tokio::test]
    async fn email_only_update_then_repeat_is_no_changes() {
        let service = service();
        service
            .register(registration("Baki", "baki@test.com", 34))
            .await
            .unwrap();

        let update = CustomerUpdate {
            name: None,
            email: Some("baki2@test.com".to_string()),
            age: None,
        };
        service.update(1, update.clone()).await.unwrap();

        let customer = service.get_by_id(1).await.unwrap();
        assert_eq!(
            customer,
            Customer {
                id: 1,
                name: "Baki".to_string(),
                email: "baki2@test.com".to_string(),
                age: 34,
            }
        );

        let err = service.update(1, update).await.unwrap_err();
        assert!(matches!(err, CustomerError::NoChanges));
    }
}
