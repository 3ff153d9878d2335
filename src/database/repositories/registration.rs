//! Registration repository implementation

use sqlx::{PgPool, Postgres, Transaction};
use chrono::Utc;
use uuid::Uuid;
use crate::capacity::CountingPolicy;
use crate::models::registration::{Registration, RegistrationStatus, NewRegistration, RegistrationFilter};
use crate::utils::errors::PereirinhaError;

const REGISTRATION_COLUMNS: &str =
    "id, full_name, email, birth_date, category, guardian_name, phone, neighborhood, status, submitted_at";

#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new registration with status `pending`
    pub async fn create(&self, request: NewRegistration) -> Result<Registration, PereirinhaError> {
        let mut tx = self.pool.begin().await?;
        let registration = Self::insert(&mut tx, request).await?;
        tx.commit().await?;

        Ok(registration)
    }

    /// Insert a registration only if a slot is still free.
    ///
    /// The configuration row is locked for the duration of the transaction,
    /// so concurrent inserts through this path are serialized and the count
    /// they observe is exact. Returns `None` when no slot is left.
    pub async fn create_within_capacity(
        &self,
        request: NewRegistration,
        policy: CountingPolicy,
    ) -> Result<Option<Registration>, PereirinhaError> {
        let mut tx = self.pool.begin().await?;

        let total: Option<(i32,)> = sqlx::query_as(
            "SELECT total_slots FROM slot_configuration LIMIT 1 FOR UPDATE"
        )
        .fetch_optional(&mut *tx)
        .await?;
        let (total_slots,) = total.ok_or(PereirinhaError::ConfigurationMissing)?;

        let used: (i64,) = sqlx::query_as(count_query(policy))
            .fetch_one(&mut *tx)
            .await?;

        if used.0 >= i64::from(total_slots) {
            tx.rollback().await?;
            return Ok(None);
        }

        let registration = Self::insert(&mut tx, request).await?;
        tx.commit().await?;

        Ok(Some(registration))
    }

    async fn insert(tx: &mut Transaction<'_, Postgres>, request: NewRegistration) -> Result<Registration, PereirinhaError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            INSERT INTO registrations (id, full_name, email, birth_date, category, guardian_name, phone, neighborhood, status, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.full_name)
        .bind(request.email)
        .bind(request.birth_date)
        .bind(request.category)
        .bind(request.guardian_name)
        .bind(request.phone)
        .bind(request.neighborhood)
        .bind(RegistrationStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(registration)
    }

    /// Find registration by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Registration>, PereirinhaError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// List registrations matching the filter, newest first
    pub async fn list(&self, filter: &RegistrationFilter) -> Result<Vec<Registration>, PereirinhaError> {
        let pattern = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
            .map(|search| format!("%{}%", escape_like(search)));

        let registrations = sqlx::query_as::<_, Registration>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM registrations
            WHERE ($1::text IS NULL OR full_name ILIKE $1 OR email ILIKE $1 OR neighborhood ILIKE $1)
              AND ($2::registration_status IS NULL OR status = $2)
            ORDER BY submitted_at DESC
            "#
        ))
        .bind(pattern)
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Most recent registrations
    pub async fn recent(&self, limit: i64) -> Result<Vec<Registration>, PereirinhaError> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations ORDER BY submitted_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    /// Count registrations that hold a slot under the given policy
    pub async fn count(&self, policy: CountingPolicy) -> Result<i64, PereirinhaError> {
        let count: (i64,) = sqlx::query_as(count_query(policy))
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Update registration status
    pub async fn update_status(&self, id: Uuid, status: RegistrationStatus) -> Result<Registration, PereirinhaError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "UPDATE registrations SET status = $2 WHERE id = $1 RETURNING {REGISTRATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        registration.ok_or(PereirinhaError::RegistrationNotFound { id })
    }

    /// Delete registration
    pub async fn delete(&self, id: Uuid) -> Result<(), PereirinhaError> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PereirinhaError::RegistrationNotFound { id });
        }

        Ok(())
    }
}

fn count_query(policy: CountingPolicy) -> &'static str {
    match policy {
        CountingPolicy::AllRegistrations => "SELECT COUNT(*) FROM registrations",
        CountingPolicy::ExcludeCancelled => "SELECT COUNT(*) FROM registrations WHERE status <> 'cancelled'",
    }
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
