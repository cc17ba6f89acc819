//! Repository for the `users` table, including login bookkeeping.

use moim_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, initials, role_id, is_active, \
                        last_login_at, failed_login_count, locked_until, created_at, updated_at";

/// Provides CRUD and account-state operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user. The unique email constraint is `uq_users_email`;
    /// violations surface as 409 at the API layer.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, initials, role_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.initials)
            .bind(input.role_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Email lookup, used by login and duplicate-signup checks.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Every user, newest first. Includes deactivated accounts; the public
    /// directory endpoint filters those out itself.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Apply the non-`None` fields of `input`; `None` leaves a column as-is.
    /// Returns `None` when the id does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                initials = COALESCE($4, initials),
                role_id = COALESCE($5, role_id),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.initials)
            .bind(input.role_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Flip `is_active` off. `false` means the user was missing or already
    /// inactive.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query("UPDATE users SET is_active = false WHERE id = $1 AND is_active = true")
            .bind(id)
            .execute(pool)
            .await
            .map(|r| r.rows_affected() > 0)
    }

    /// Replace the stored password hash.
    pub async fn set_password_hash(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await
            .map(|r| r.rows_affected() > 0)
    }

    /// Hard-delete a user, first stripping their id from every
    /// owner/assignee/attendee array. One transaction, so a failed delete
    /// leaves the arrays untouched.
    pub async fn delete_with_assignments(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        const ARRAY_STRIPS: [&str; 4] = [
            "UPDATE projects SET owner_ids = array_remove(owner_ids, $1)",
            "UPDATE goals SET assignee_ids = array_remove(assignee_ids, $1)",
            "UPDATE tasks SET assignee_ids = array_remove(assignee_ids, $1)",
            "UPDATE meetings SET attendee_ids = array_remove(attendee_ids, $1)",
        ];

        let mut tx = pool.begin().await?;
        for strip in ARRAY_STRIPS {
            sqlx::query(strip).bind(id).execute(&mut *tx).await?;
        }

        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }

    /// Bump the consecutive-failure counter after a bad password.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET failed_login_count = failed_login_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Lock the account; logins are refused until `until` has passed.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Clear the failure counter and any lock, and stamp `last_login_at`.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
