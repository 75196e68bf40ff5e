/**
 * Account Model and Identity Store
 *
 * This module defines the account record and the `AccountStore` trait the
 * credential flow depends on. Two implementations are provided:
 *
 * - `PgAccountStore` - PostgreSQL via sqlx, with a unique index on `gmail`
 * - `MemoryAccountStore` - in-process map used for development and tests
 *
 * Both enforce `gmail` uniqueness atomically at insert time and report a
 * taken address as `StoreError::Duplicate`.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;

/// Account struct representing a row in the `accounts` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Internal primary key, used as the token subject
    pub id: uuid::Uuid,
    /// Display name (not unique)
    pub name: String,
    /// Login identifier (unique)
    pub gmail: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// `{name}_{unix millis}` assigned at creation
    pub unique_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub gmail: String,
    pub password_hash: String,
    pub unique_id: String,
}

/// Identity store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The login identifier is already registered
    #[error("an account with this gmail already exists")]
    Duplicate,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Durable account storage
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Get account by login identifier
    async fn find_by_gmail(&self, gmail: &str) -> Result<Option<Account>, StoreError>;

    /// Insert a new account
    ///
    /// Fails with `StoreError::Duplicate` when `gmail` is taken, even if a
    /// concurrent insert won the race after the caller's own lookup.
    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;
}

/// PostgreSQL-backed account store
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_gmail(&self, gmail: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, gmail, password_hash, unique_id, created_at, updated_at
            FROM accounts
            WHERE gmail = $1
            "#,
        )
        .bind(gmail)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let id = uuid::Uuid::new_v4();
        let now = Utc::now();

        let result = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, name, gmail, password_hash, unique_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, gmail, password_hash, unique_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&account.name)
        .bind(&account.gmail)
        .bind(&account.password_hash)
        .bind(&account.unique_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(account) => Ok(account),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory account store keyed by `gmail`
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_gmail(&self, gmail: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(gmail).cloned())
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.gmail) {
            return Err(StoreError::Duplicate);
        }

        let now = Utc::now();
        let stored = Account {
            id: uuid::Uuid::new_v4(),
            name: account.name,
            gmail: account.gmail,
            password_hash: account.password_hash,
            unique_id: account.unique_id,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(stored.gmail.clone(), stored.clone());

        Ok(stored)
    }
}
