use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::stream::{BoxStream, StreamExt};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use crate::core::{
    attributes::{dedup_skills, AttributeIndex},
    intervals::IntervalIndex,
    normalize::{clean_slots, skill_key},
};
use crate::models::{CandidateDetail, CandidateIdentity, TimeSlot};
use crate::services::store::{CandidateStore, StoreError};

/// PostgreSQL-backed candidate pool
///
/// Every lookup is a single set-based query: skill membership and window
/// intersection are pushed down to the database, identities are streamed row
/// by row, and hydration loads all requested employees in one round trip.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings, filling in pool defaults
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace an employee with its skills and availability
    ///
    /// Skills are stored alongside their folded key so lookups compare keys
    /// the same way the in-memory pool does.
    pub async fn upsert_candidate(&self, candidate: &CandidateDetail) -> Result<(), StoreError> {
        let (labels, keys): (Vec<String>, Vec<String>) = skill_rows(&candidate.skills).into_iter().unzip();
        let (starts, ends): (Vec<DateTime<Utc>>, Vec<DateTime<Utc>>) = clean_slots(&candidate.availability)
            .into_iter()
            .map(|slot| (slot.start, slot.end))
            .unzip();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO employees (id, name) VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(&candidate.id)
        .bind(&candidate.name)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM employee_skills WHERE employee_id = $1")
            .bind(&candidate.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO employee_skills (employee_id, skill, skill_key)
            SELECT $1, label, key FROM UNNEST($2::text[], $3::text[]) AS t(label, key)
            "#,
        )
        .bind(&candidate.id)
        .bind(&labels)
        .bind(&keys)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM employee_availability WHERE employee_id = $1")
            .bind(&candidate.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO employee_availability (employee_id, start_time, end_time)
            SELECT $1, s, e FROM UNNEST($2::timestamptz[], $3::timestamptz[]) AS t(s, e)
            "#,
        )
        .bind(&candidate.id)
        .bind(&starts)
        .bind(&ends)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("Stored employee {} with {} skills", candidate.id, labels.len());
        Ok(())
    }
}

/// Trimmed label and folded key for each distinct skill, blanks dropped
fn skill_rows(skills: &[String]) -> Vec<(String, String)> {
    dedup_skills(skills)
        .into_iter()
        .filter_map(|label| {
            let key = skill_key(&label)?;
            Some((label.trim().to_string(), key))
        })
        .collect()
}

fn identity_from_row(row: PgRow) -> Result<CandidateIdentity, StoreError> {
    Ok(CandidateIdentity {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

fn detail_from_row(row: &PgRow) -> Result<CandidateDetail, StoreError> {
    let starts: Vec<DateTime<Utc>> = row.try_get("starts")?;
    let ends: Vec<DateTime<Utc>> = row.try_get("ends")?;

    Ok(CandidateDetail {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        skills: row.try_get("skills")?,
        availability: starts
            .into_iter()
            .zip(ends)
            .map(|(start, end)| TimeSlot { start, end })
            .collect(),
    })
}

#[async_trait]
impl CandidateStore for PostgresStore {
    async fn candidates_by_skills(&self, skills: &[String]) -> Result<AttributeIndex, StoreError> {
        let query = r#"
            SELECT employee_id, skill
            FROM employee_skills
            WHERE skill_key = ANY($1)
            ORDER BY employee_id, skill
        "#;

        let rows = sqlx::query(query).bind(skills).fetch_all(&self.pool).await?;

        let mut index = AttributeIndex::new();
        for row in &rows {
            let employee_id: String = row.try_get("employee_id")?;
            index.entry(employee_id).or_default().push(row.try_get("skill")?);
        }

        tracing::debug!("Skill lookup matched {} employees", index.len());
        Ok(index)
    }

    async fn candidates_by_window(&self, window: TimeSlot) -> Result<IntervalIndex, StoreError> {
        let query = r#"
            SELECT employee_id, start_time, end_time
            FROM employee_availability
            WHERE start_time < $2 AND end_time > $1
            ORDER BY employee_id, start_time, end_time
        "#;

        let rows = sqlx::query(query)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(&self.pool)
            .await?;

        let mut index = IntervalIndex::new();
        for row in &rows {
            let employee_id: String = row.try_get("employee_id")?;
            index.entry(employee_id).or_default().push(TimeSlot {
                start: row.try_get("start_time")?,
                end: row.try_get("end_time")?,
            });
        }

        tracing::debug!("Window lookup matched {} employees", index.len());
        Ok(index)
    }

    fn list_identities(&self) -> BoxStream<'_, Result<CandidateIdentity, StoreError>> {
        sqlx::query("SELECT id, name FROM employees ORDER BY id")
            .fetch(&self.pool)
            .map(|row| row.map_err(StoreError::from).and_then(identity_from_row))
            .boxed()
    }

    async fn candidate_details(&self, ids: &[String]) -> Result<Vec<CandidateDetail>, StoreError> {
        let query = r#"
            SELECT
                e.id,
                e.name,
                COALESCE(
                    (SELECT array_agg(s.skill ORDER BY s.skill)
                     FROM employee_skills s WHERE s.employee_id = e.id),
                    '{}'::text[]
                ) AS skills,
                COALESCE(
                    (SELECT array_agg(a.start_time ORDER BY a.start_time, a.end_time)
                     FROM employee_availability a WHERE a.employee_id = e.id),
                    '{}'::timestamptz[]
                ) AS starts,
                COALESCE(
                    (SELECT array_agg(a.end_time ORDER BY a.start_time, a.end_time)
                     FROM employee_availability a WHERE a.employee_id = e.id),
                    '{}'::timestamptz[]
                ) AS ends
            FROM employees e
            WHERE e.id = ANY($1)
        "#;

        let rows = sqlx::query(query).bind(ids).fetch_all(&self.pool).await?;

        rows.iter().map(detail_from_row).collect()
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
