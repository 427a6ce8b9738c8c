use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::models::lead::{Lead, LeadFields};

/// Persistence seam for leads. The production implementation is
/// [`LeadService`] over Postgres; tests supply an in-memory double.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn create(&self, fields: LeadFields) -> Result<Lead>;
    async fn get(&self, id: i64) -> Result<Option<Lead>>;
    async fn list(&self) -> Result<Vec<Lead>>;
    /// Full overwrite of every writable field. `updated_at` is bumped.
    async fn update(&self, id: i64, fields: LeadFields) -> Result<Lead>;
    /// Deleting an unknown id is an error, not a no-op.
    async fn delete(&self, id: i64) -> Result<()>;
    /// Import dedupe identity: exact match on (first_name, last_name).
    async fn find_by_name(&self, first_name: &str, last_name: &str) -> Result<Option<Lead>>;
    async fn set_message(&self, id: i64, message: &str) -> Result<Lead>;
    async fn set_gender(&self, id: i64, gender: &str) -> Result<Lead>;
}

const LEAD_COLUMNS: &str = "id, first_name, last_name, email, job_title, country_code, \
                            company_name, message, gender, created_at, updated_at";

#[derive(Clone)]
pub struct LeadService {
    pool: PgPool,
}

impl LeadService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadStore for LeadService {
    async fn create(&self, fields: LeadFields) -> Result<Lead> {
        if fields.first_name.is_empty() {
            return Err(Error::BadRequest("First name is required".to_string()));
        }
        let sql = format!(
            "INSERT INTO leads (first_name, last_name, email, job_title, country_code, \
             company_name, message, gender) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {LEAD_COLUMNS}"
        );
        let lead = sqlx::query_as::<_, Lead>(&sql)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.email)
            .bind(&fields.job_title)
            .bind(&fields.country_code)
            .bind(&fields.company_name)
            .bind(&fields.message)
            .bind(&fields.gender)
            .fetch_one(&self.pool)
            .await?;
        Ok(lead)
    }

    async fn get(&self, id: i64) -> Result<Option<Lead>> {
        let sql = format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = $1");
        let lead = sqlx::query_as::<_, Lead>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(lead)
    }

    async fn list(&self) -> Result<Vec<Lead>> {
        let sql = format!("SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at DESC");
        let leads = sqlx::query_as::<_, Lead>(&sql).fetch_all(&self.pool).await?;
        Ok(leads)
    }

    async fn update(&self, id: i64, fields: LeadFields) -> Result<Lead> {
        if fields.first_name.is_empty() {
            return Err(Error::BadRequest("First name is required".to_string()));
        }
        let sql = format!(
            "UPDATE leads \
             SET first_name = $1, last_name = $2, email = $3, job_title = $4, \
                 country_code = $5, company_name = $6, message = $7, gender = $8, \
                 updated_at = NOW() \
             WHERE id = $9 \
             RETURNING {LEAD_COLUMNS}"
        );
        let lead = sqlx::query_as::<_, Lead>(&sql)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.email)
            .bind(&fields.job_title)
            .bind(&fields.country_code)
            .bind(&fields.company_name)
            .bind(&fields.message)
            .bind(&fields.gender)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => Error::NotFound("Lead not found".to_string()),
                other => other.into(),
            })?;
        Ok(lead)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Lead not found".to_string()));
        }
        Ok(())
    }

    async fn find_by_name(&self, first_name: &str, last_name: &str) -> Result<Option<Lead>> {
        let sql = format!(
            "SELECT {LEAD_COLUMNS} FROM leads \
             WHERE first_name = $1 AND last_name = $2 \
             ORDER BY id \
             LIMIT 1"
        );
        let lead = sqlx::query_as::<_, Lead>(&sql)
            .bind(first_name)
            .bind(last_name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(lead)
    }

    async fn set_message(&self, id: i64, message: &str) -> Result<Lead> {
        let sql = format!(
            "UPDATE leads SET message = $1, updated_at = NOW() \
             WHERE id = $2 \
             RETURNING {LEAD_COLUMNS}"
        );
        let lead = sqlx::query_as::<_, Lead>(&sql)
            .bind(message)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => Error::NotFound("Lead not found".to_string()),
                other => other.into(),
            })?;
        Ok(lead)
    }

    async fn set_gender(&self, id: i64, gender: &str) -> Result<Lead> {
        let sql = format!(
            "UPDATE leads SET gender = $1, updated_at = NOW() \
             WHERE id = $2 \
             RETURNING {LEAD_COLUMNS}"
        );
        let lead = sqlx::query_as::<_, Lead>(&sql)
            .bind(gender)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => Error::NotFound("Lead not found".to_string()),
                other => other.into(),
            })?;
        Ok(lead)
    }
}
