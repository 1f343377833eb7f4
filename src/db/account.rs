/// Account database models and operations
use crate::error::{FingerError, FingerResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;
use validator::ValidateEmail;

/// Longest username accepted at account creation
const MAX_USERNAME_LEN: usize = 150;

/// Account record in the database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Email address, if the account has a non-empty one
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }
}

/// Read-side account lookups used by the lookup strategies
///
/// Each method returns the single record holding the value, or `None`.
/// Uniqueness is the store's responsibility.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Find the account with this username
    async fn find_by_username(&self, username: &str) -> FingerResult<Option<Account>>;

    /// Find the account with this email address
    async fn find_by_email(&self, email: &str) -> FingerResult<Option<Account>>;
}

/// Account store backed by the SQLite account database
#[derive(Clone)]
pub struct SqliteAccountStore {
    db: SqlitePool,
}

impl SqliteAccountStore {
    /// Create a new account store
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Create a new account
    pub async fn create_account(
        &self,
        username: &str,
        email: Option<&str>,
    ) -> FingerResult<Account> {
        validate_username(username)?;

        if let Some(email) = email {
            if !email.validate_email() {
                return Err(FingerError::Validation(format!(
                    "Invalid email address: {}",
                    email
                )));
            }
        }

        if self.find_by_username(username).await?.is_some() {
            return Err(FingerError::Conflict(format!(
                "Username {} already taken",
                username
            )));
        }

        if let Some(email) = email {
            if self.find_by_email(email).await?.is_some() {
                return Err(FingerError::Conflict("Email already registered".to_string()));
            }
        }

        let account = Account {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.map(str::to_string),
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO account (id, username, email, created_at) VALUES (?1, ?2, ?3, ?4)")
            .bind(&account.id)
            .bind(&account.username)
            .bind(&account.email)
            .bind(account.created_at)
            .execute(&self.db)
            .await?;

        tracing::info!("Created account {}", account.username);

        Ok(account)
    }

    /// Number of stored accounts
    pub async fn count(&self) -> FingerResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM account")
            .fetch_one(&self.db)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn find_by_username(&self, username: &str) -> FingerResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, email, created_at FROM account WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> FingerResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, email, created_at FROM account WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(account)
    }
}

/// Usernames are ASCII alphanumerics plus `.`, `_` and `-`
fn validate_username(username: &str) -> FingerResult<()> {
    if username.is_empty() {
        return Err(FingerError::Validation("Username cannot be empty".to_string()));
    }

    if username.len() > MAX_USERNAME_LEN {
        return Err(FingerError::Validation(format!(
            "Username too long (max {} characters)",
            MAX_USERNAME_LEN
        )));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(FingerError::Validation(
            "Username contains invalid characters".to_string(),
        ));
    }

    Ok(())
}
