//! PostgreSQL implementation of AccountRepository.
//!
//! Uniqueness is enforced by the `accounts_username_key_key` index on the
//! `username_key` column, so concurrent registrations cannot both succeed.
//! The key is computed with `Username::normalize` on the way in and out,
//! so the database collation never decides which names collide.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use crate::domain::account::{
    Account, DepositName, MembershipTier, PasswordHash, Username, VipStatus,
};
use crate::domain::foundation::{AccountId, DomainError, ErrorCode, Timestamp};
use crate::ports::AccountRepository;

const USERNAME_UNIQUE_INDEX: &str = "accounts_username_key_key";

const SELECT_COLUMNS: &str = r#"
    SELECT id, username, password_hash, tier, vip_status, vip_expiry, deposit_name,
           vip_requested_at, vip_reviewed_at, created_at, updated_at, version
    FROM accounts
"#;

/// PostgreSQL implementation of the AccountRepository port.
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an account.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    password_hash: String,
    tier: String,
    vip_status: Option<String>,
    vip_expiry: Option<DateTime<Utc>>,
    deposit_name: Option<String>,
    vip_requested_at: Option<DateTime<Utc>>,
    vip_reviewed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
}

impl TryFrom<AccountRow> for Account {
    type Error = DomainError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, e: &dyn std::fmt::Display| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Invalid stored {} for account {}: {}", field, row.id, e),
            )
        };

        let username = Username::parse(&row.username).map_err(|e| corrupt("username", &e))?;
        let tier = row
            .tier
            .parse::<MembershipTier>()
            .map_err(|e| corrupt("tier", &e))?;
        let vip_status =
            VipStatus::from_nullable(row.vip_status.as_deref()).map_err(|e| corrupt("vip_status", &e))?;
        let deposit_name = row
            .deposit_name
            .as_deref()
            .map(DepositName::parse)
            .transpose()
            .map_err(|e| corrupt("deposit_name", &e))?;

        Ok(Account {
            id: AccountId::from_uuid(row.id),
            username,
            password_hash: PasswordHash::from_encoded(row.password_hash),
            tier,
            vip_status,
            vip_expiry: row.vip_expiry.map(Timestamp::from_datetime),
            deposit_name,
            vip_requested_at: row.vip_requested_at.map(Timestamp::from_datetime),
            vip_reviewed_at: row.vip_reviewed_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            version: row.version,
        })
    }
}

/// Maps a driver error. Connectivity problems become `ServiceUnavailable`.
fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!(error = %e, "{}", context);
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => {
            DomainError::unavailable(format!("{}: database unreachable", context))
        }
        other => DomainError::new(ErrorCode::InternalError, format!("{}: {}", context, other)),
    }
}

/// Value bound against `username_key` when looking up raw input.
fn username_key(raw: &str) -> String {
    Username::normalize(raw)
}

fn timestamp(ts: &Option<Timestamp>) -> Option<DateTime<Utc>> {
    ts.map(|t| *t.as_datetime())
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, username, username_key, password_hash, tier, vip_status, vip_expiry,
                deposit_name, vip_requested_at, vip_reviewed_at, created_at, updated_at,
                version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(account.username.as_str())
        .bind(account.username.normalized())
        .bind(account.password_hash.as_str())
        .bind(account.tier.as_str())
        .bind(account.vip_status.as_str())
        .bind(timestamp(&account.vip_expiry))
        .bind(account.deposit_name.as_ref().map(|d| d.as_str()))
        .bind(timestamp(&account.vip_requested_at))
        .bind(timestamp(&account.vip_reviewed_at))
        .bind(account.created_at.as_datetime())
        .bind(account.updated_at.as_datetime())
        .bind(account.version)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(USERNAME_UNIQUE_INDEX) {
                    return DomainError::new(
                        ErrorCode::DuplicateUsername,
                        "Username already exists",
                    )
                    .with_detail("username", account.username.as_str());
                }
            }
            db_error("Failed to insert account", e)
        })?;

        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<i64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                password_hash = $3,
                tier = $4,
                vip_status = $5,
                vip_expiry = $6,
                deposit_name = $7,
                vip_requested_at = $8,
                vip_reviewed_at = $9,
                updated_at = $10,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(account.version)
        .bind(account.password_hash.as_str())
        .bind(account.tier.as_str())
        .bind(account.vip_status.as_str())
        .bind(timestamp(&account.vip_expiry))
        .bind(account.deposit_name.as_ref().map(|d| d.as_str()))
        .bind(timestamp(&account.vip_requested_at))
        .bind(timestamp(&account.vip_reviewed_at))
        .bind(account.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update account", e))?;

        if result.rows_affected() == 1 {
            return Ok(account.version + 1);
        }

        let stored: Option<i64> = sqlx::query_scalar("SELECT version FROM accounts WHERE id = $1")
            .bind(account.id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to read account version", e))?;

        Err(match stored {
            Some(version) => DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Account {} is at version {}, update expected {}",
                    account.id, version, account.version
                ),
            ),
            None => DomainError::new(ErrorCode::AccountNotFound, "Account not found")
                .with_detail("key", account.id.to_string()),
        })
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find account", e))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "{} WHERE username_key = $1",
            SELECT_COLUMNS
        ))
        .bind(username_key(username))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find account", e))?;

        row.map(Account::try_from).transpose()
    }

    async fn list_by_status(&self, status: VipStatus) -> Result<Vec<Account>, DomainError> {
        // Null status is stored-legacy `none`.
        let rows: Vec<AccountRow> = sqlx::query_as(&format!(
            "{} WHERE COALESCE(vip_status, 'none') = $1 \
             ORDER BY vip_requested_at ASC NULLS FIRST, created_at ASC",
            SELECT_COLUMNS
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list accounts", e))?;

        rows.into_iter().map(Account::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> AccountRow {
        let now = Utc::now();
        AccountRow {
            id: Uuid::new_v4(),
            username: "Mina".to_string(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
            tier: "regular".to_string(),
            vip_status: None,
            vip_expiry: None,
            deposit_name: None,
            vip_requested_at: None,
            vip_reviewed_at: None,
            created_at: now,
            updated_at: now,
            version: 3,
        }
    }

    #[test]
    fn null_status_maps_to_none() {
        let account = Account::try_from(row()).unwrap();
        assert_eq!(account.vip_status, VipStatus::None);
        assert_eq!(account.tier, MembershipTier::Regular);
        assert_eq!(account.version, 3);
    }

    #[test]
    fn stored_vip_row_round_trips_fields() {
        let expiry = Utc::now() + chrono::Duration::days(10);
        let account = Account::try_from(AccountRow {
            tier: "vip".to_string(),
            vip_status: Some("approved".to_string()),
            vip_expiry: Some(expiry),
            deposit_name: Some("Mina Park".to_string()),
            ..row()
        })
        .unwrap();

        assert_eq!(account.tier, MembershipTier::Vip);
        assert_eq!(account.vip_status, VipStatus::Approved);
        assert_eq!(account.vip_expiry, Some(Timestamp::from_datetime(expiry)));
        assert_eq!(account.deposit_name.unwrap().as_str(), "Mina Park");
    }

    #[test]
    fn unknown_tier_is_reported_as_internal_error() {
        let err = Account::try_from(AccountRow {
            tier: "platinum".to_string(),
            ..row()
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert!(err.message.contains("tier"));
    }

    #[test]
    fn lookup_key_matches_stored_key_for_non_ascii_names() {
        for (registered, typed) in [("Élodie", " ÉLODIE "), ("Ärger", "äRGER"), ("ΣΟΦΙΑ", "σοφια")] {
            let stored = Username::parse(registered).unwrap();
            assert_eq!(username_key(typed), stored.normalized());
        }
    }

    #[test]
    fn lookup_key_keeps_distinct_names_distinct() {
        let sharp = Username::parse("straße").unwrap();
        assert_ne!(username_key("STRASSE"), sharp.normalized());
    }

    #[test]
    fn pool_timeout_is_service_unavailable() {
        let err = db_error("Failed to find account", sqlx::Error::PoolTimedOut);
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
    }

    #[test]
    fn row_not_found_is_internal() {
        let err = db_error("Failed to find account", sqlx::Error::RowNotFound);
        assert_eq!(err.code, ErrorCode::InternalError);
    }
}
