//! Account directory backed by `SQLite`.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, warn};

use super::model::{Account, AccountId};
use crate::{DirectoryConfig, Error, Result};

/// Owns the account table and answers existence, registration and
/// credential checks against it.
///
/// The directory holds its own connection pool; drop it or call
/// [`AccountDirectory::close`] to release the store.
#[derive(Debug, Clone)]
pub struct AccountDirectory {
    pool: SqlitePool,
}

impl AccountDirectory {
    /// Open the directory described by `config`.
    ///
    /// Creates the database file, its parent directory and the schema if
    /// they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn open(config: &DirectoryConfig) -> Result<Self> {
        if let Some(parent) = config.database_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await?;

        let directory = Self { pool };
        directory.initialize().await?;
        info!(
            "Account directory opened at {}",
            config.database_path.display()
        );
        Ok(directory)
    }

    /// Create an in-memory directory for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let directory = Self { pool };
        directory.initialize().await?;
        Ok(directory)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                login TEXT NOT NULL,
                password TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // One live account per login; soft-deleted rows don't count
        sqlx::query(
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_accounts_login
            ON accounts(login) WHERE deleted_at IS NULL
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns true if a live account with exactly this login exists.
    ///
    /// Store failures are logged and reported as `false`.
    pub async fn exists(&self, login: &str) -> bool {
        let result = sqlx::query(
            r"
            SELECT COUNT(*) AS matches
            FROM accounts
            WHERE login = ? AND deleted_at IS NULL
            ",
        )
        .bind(login)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => row.get::<i64, _>("matches") > 0,
            Err(e) => {
                warn!("Existence check for '{login}' failed: {e}");
                false
            }
        }
    }

    /// Register a new account.
    ///
    /// Uniqueness is enforced by the store, so two concurrent registrations
    /// of the same login can't both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateLogin`] if a live account already uses this
    /// login, or [`Error::Database`] if the insert fails for another reason.
    pub async fn register(&self, login: &str, password: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r"
            INSERT INTO accounts (login, password, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(login)
        .bind(password)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                debug!(
                    "Registered account {} for '{login}'",
                    AccountId::new(done.last_insert_rowid())
                );
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::DuplicateLogin(login.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check a login/password pair.
    ///
    /// Succeeds only when exactly one live account has this login and its
    /// password is identical to `password`. Unknown logins, duplicated
    /// logins, wrong passwords and store failures all return `false`.
    pub async fn validate(&self, login: &str, password: &str) -> bool {
        let result = sqlx::query(
            r"
            SELECT password
            FROM accounts
            WHERE login = ? AND deleted_at IS NULL
            ",
        )
        .bind(login)
        .fetch_all(&self.pool)
        .await;

        let rows = match result {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Credential lookup for '{login}' failed: {e}");
                return false;
            }
        };

        if rows.len() != 1 {
            if rows.len() > 1 {
                warn!("Login '{login}' matches {} live accounts", rows.len());
            }
            return false;
        }

        rows[0].get::<String, _>("password") == password
    }

    /// Get the live account for a login.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the stored row
    /// can't be decoded.
    pub async fn find(&self, login: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            r"
            SELECT id, login, password, created_at, updated_at, deleted_at
            FROM accounts
            WHERE login = ? AND deleted_at IS NULL
            LIMIT 1
            ",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_account).transpose()
    }

    /// Close the underlying connection pool.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Convert a database row to an Account.
fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Result<Account> {
    let deleted_at = row
        .get::<Option<String>, _>("deleted_at")
        .map(|s| parse_timestamp(&s))
        .transpose()?;

    Ok(Account {
        id: AccountId::new(row.get("id")),
        login: row.get("login"),
        password: row.get("password"),
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
        deleted_at,
    })
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(s)?;
    Ok(parsed.with_timezone(&Utc))
}
