//! SQLite customer store (embedded, no external dependencies)

use anyhow::Context;
use async_trait::async_trait;
use crm_core::{Customer, CustomerError, CustomerRegistration, CustomerStore, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> anyhow::Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
        // AUTOINCREMENT keeps deleted ids from ever being reassigned.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS customer (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                age INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

fn db_err(e: sqlx::Error) -> CustomerError {
    CustomerError::Database(e.to_string())
}

#[async_trait]
impl CustomerStore for Database {
    async fn select_all(&self) -> Result<Vec<Customer>> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, age
            FROM customer
            ORDER BY id
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn select_by_id(&self, id: i64) -> Result<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, age
            FROM customer WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn insert(&self, registration: CustomerRegistration) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customer (name, email, age)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&registration.name)
        .bind(&registration.email)
        .bind(registration.age)
        .execute(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(1) FROM customer WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_one(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(count > 0)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(1) FROM customer WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_one(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM customer WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE customer SET name = ?1, email = ?2, age = ?3
            WHERE id = ?4
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.age)
        .bind(customer.id)
        .execute(&*self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    age: i32,
}

impl From<CustomerRow> for Customer {
    fn from(r: CustomerRow) -> Self {
        Customer {
            id: r.id,
            name: r.name,
            email: r.email,
            age: r.age,
        }
    }
}
