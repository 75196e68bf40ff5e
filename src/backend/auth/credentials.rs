/**
 * Credential Service
 *
 * Registration and login, independent of HTTP. Handlers validate the wire
 * format and call into here; every collaborator failure is mapped to an
 * `ApiError` before it leaves this module.
 *
 * # Registration
 *
 * 1. Fast-path lookup by `gmail` (409 if found)
 * 2. Hash the password with bcrypt
 * 3. Insert; a unique violation from the store is also a 409
 *
 * The store's unique constraint is what actually prevents duplicates. The
 * lookup only spares the bcrypt cost for the common case.
 *
 * # Login
 *
 * Unknown accounts and wrong passwords both yield the same
 * `Unauthorized("Invalid credentials")`.
 */

use chrono::Utc;

use crate::backend::auth::passwords::{hash_password, verify_password};
use crate::backend::auth::sessions::SessionKeys;
use crate::backend::auth::users::{Account, AccountStore, NewAccount, StoreError};
use crate::backend::error::ApiError;

pub const USER_EXISTS_MESSAGE: &str = "User already exists";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Validated registration input
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub gmail: String,
    pub password: String,
}

/// Build the human-traceable id stored alongside each account
pub fn external_id(name: &str, created_at_millis: i64) -> String {
    format!("{}_{}", name, created_at_millis)
}

/// Register a new account
pub async fn register(
    accounts: &dyn AccountStore,
    bcrypt_cost: u32,
    registration: Registration,
) -> Result<Account, ApiError> {
    let existing = accounts
        .find_by_gmail(&registration.gmail)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to look up account: {}", e)))?;

    if existing.is_some() {
        tracing::warn!("Account already exists: {}", registration.gmail);
        return Err(ApiError::conflict(USER_EXISTS_MESSAGE));
    }

    let password_hash = hash_password(&registration.password, bcrypt_cost)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;

    let unique_id = external_id(&registration.name, Utc::now().timestamp_millis());

    let account = accounts
        .insert(NewAccount {
            name: registration.name,
            gmail: registration.gmail,
            password_hash,
            unique_id,
        })
        .await
        .map_err(|e| match e {
            StoreError::Duplicate => {
                tracing::warn!("Concurrent registration lost the unique-index race");
                ApiError::conflict(USER_EXISTS_MESSAGE)
            }
            other => ApiError::internal(format!("Failed to create account: {}", other)),
        })?;

    tracing::info!("Account created: {} ({})", account.unique_id, account.id);

    Ok(account)
}

/// Verify credentials and issue a session token
pub async fn login(
    accounts: &dyn AccountStore,
    keys: &SessionKeys,
    gmail: &str,
    password: &str,
) -> Result<String, ApiError> {
    let account = accounts
        .find_by_gmail(gmail)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to look up account: {}", e)))?
        .ok_or_else(|| {
            tracing::warn!("Login for unknown account: {}", gmail);
            ApiError::unauthorized(INVALID_CREDENTIALS_MESSAGE)
        })?;

    let valid = verify_password(password, &account.password_hash)
        .await
        .map_err(|e| ApiError::internal(format!("Password verification error: {}", e)))?;

    if !valid {
        tracing::warn!("Invalid password for account: {}", account.id);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS_MESSAGE));
    }

    let token = keys
        .issue(account.id)
        .map_err(|e| ApiError::internal(format!("Failed to create token: {}", e)))?;

    tracing::info!("Account logged in: {}", account.id);

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::MemoryAccountStore;
    use assert_matches::assert_matches;

    const COST: u32 = crate::backend::auth::passwords::MIN_COST;

    fn alice(password: &str) -> Registration {
        Registration {
            name: "Alice".to_string(),
            gmail: "alice@x.com".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_external_id_format() {
        assert_eq!(external_id("Alice", 1700000000123), "Alice_1700000000123");
    }

    #[tokio::test]
    async fn test_register_stores_hash() {
        let store = MemoryAccountStore::new();
        let account = register(&store, COST, alice("pw123")).await.unwrap();

        assert_ne!(account.password_hash, "pw123");
        assert!(verify_password("pw123", &account.password_hash).await.unwrap());
        assert!(!verify_password("pw456", &account.password_hash).await.unwrap());
        assert!(account.unique_id.starts_with("Alice_"));
    }

    #[tokio::test]
    async fn test_register_duplicate_conflicts() {
        let store = MemoryAccountStore::new();
        register(&store, COST, alice("pw123")).await.unwrap();

        let second = Registration {
            name: "Alice2".to_string(),
            ..alice("pw456")
        };
        let result = register(&store, COST, second).await;

        assert_matches!(result, Err(ApiError::Conflict { ref message }) if message == USER_EXISTS_MESSAGE);
        assert_eq!(store.len().await, 1);

        let kept = store.find_by_gmail("alice@x.com").await.unwrap().unwrap();
        assert_eq!(kept.name, "Alice");
    }

    #[tokio::test]
    async fn test_login_success() {
        let store = MemoryAccountStore::new();
        let keys = SessionKeys::new("secret");
        let account = register(&store, COST, alice("pw123")).await.unwrap();

        let token = login(&store, &keys, "alice@x.com", "pw123").await.unwrap();
        assert_eq!(keys.account_id(&token).unwrap(), account.id);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let store = MemoryAccountStore::new();
        let keys = SessionKeys::new("secret");
        register(&store, COST, alice("pw123")).await.unwrap();

        let unknown = login(&store, &keys, "bob@x.com", "pw123").await.unwrap_err();
        let wrong = login(&store, &keys, "alice@x.com", "wrong").await.unwrap_err();

        assert_eq!(unknown.status_code(), wrong.status_code());
        assert_eq!(unknown.message(), wrong.message());
        assert_eq!(unknown.message(), INVALID_CREDENTIALS_MESSAGE);
    }
}
