//! Roast history service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{
    summarize_history, validate_humidity, validate_personal_rating, validate_roast_weights,
    CompletedSession, HistoryStats, PaginatedResponse, Pagination, PaginationMeta, RoastLevel,
    RoastMetrics, RoastRecord,
};

use crate::error::{AppError, AppResult};
use crate::services::bean::BeanService;

/// Roast service for stored roasts and their metrics
#[derive(Clone)]
pub struct RoastService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct RoastRow {
    id: Uuid,
    bean_id: Uuid,
    roast_date: DateTime<Utc>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    green_weight_grams: Decimal,
    roasted_weight_grams: Decimal,
    first_crack_time: Option<DateTime<Utc>>,
    development_start_time: Option<DateTime<Utc>>,
    cooling_start_time: Option<DateTime<Utc>>,
    cooling_end_time: Option<DateTime<Utc>>,
    ambient_temp_f: Option<Decimal>,
    humidity_percent: Option<Decimal>,
    drop_temp_f: Option<Decimal>,
    first_crack_temp_f: Option<Decimal>,
    end_temp_f: Option<Decimal>,
    roast_level: Option<String>,
    notes: Option<String>,
    personal_rating: Option<i32>,
    created_at: DateTime<Utc>,
}

impl RoastRow {
    fn into_record(self) -> AppResult<RoastRecord> {
        let roast_level = self
            .roast_level
            .as_deref()
            .map(|level| {
                RoastLevel::parse(level)
                    .ok_or_else(|| AppError::Internal(format!("Unknown roast level '{}'", level)))
            })
            .transpose()?;

        Ok(RoastRecord {
            id: self.id,
            bean_id: self.bean_id,
            roast_date: self.roast_date,
            start_time: self.start_time,
            end_time: self.end_time,
            green_weight_grams: self.green_weight_grams,
            roasted_weight_grams: self.roasted_weight_grams,
            first_crack_time: self.first_crack_time,
            development_start_time: self.development_start_time,
            cooling_start_time: self.cooling_start_time,
            cooling_end_time: self.cooling_end_time,
            ambient_temp_f: self.ambient_temp_f,
            humidity_percent: self.humidity_percent,
            drop_temp_f: self.drop_temp_f,
            first_crack_temp_f: self.first_crack_temp_f,
            end_temp_f: self.end_temp_f,
            roast_level,
            notes: self.notes,
            personal_rating: self.personal_rating,
            created_at: self.created_at,
        })
    }
}

/// A stored roast together with its derived metrics
#[derive(Debug, Clone, Serialize)]
pub struct RoastView {
    #[serde(flatten)]
    pub record: RoastRecord,
    pub metrics: RoastMetrics,
}

impl From<RoastRecord> for RoastView {
    fn from(record: RoastRecord) -> Self {
        let metrics = record.metrics();
        Self { record, metrics }
    }
}

/// Input for entering a roast by hand
#[derive(Debug, Deserialize)]
pub struct CreateRoastInput {
    pub bean_id: Uuid,
    pub roast_date: Option<DateTime<Utc>>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub green_weight_grams: Decimal,
    pub roasted_weight_grams: Decimal,
    pub first_crack_time: Option<DateTime<Utc>>,
    pub development_start_time: Option<DateTime<Utc>>,
    pub cooling_start_time: Option<DateTime<Utc>>,
    pub cooling_end_time: Option<DateTime<Utc>>,
    pub ambient_temp_f: Option<Decimal>,
    pub humidity_percent: Option<Decimal>,
    pub drop_temp_f: Option<Decimal>,
    pub first_crack_temp_f: Option<Decimal>,
    pub end_temp_f: Option<Decimal>,
    pub roast_level: Option<RoastLevel>,
    pub notes: Option<String>,
    pub personal_rating: Option<i32>,
}

/// Post-roast details entered on the review screen
#[derive(Debug, Deserialize)]
pub struct SaveSessionInput {
    pub bean_id: Uuid,
    pub green_weight_grams: Decimal,
    pub roasted_weight_grams: Decimal,
    pub ambient_temp_f: Option<Decimal>,
    pub humidity_percent: Option<Decimal>,
    pub drop_temp_f: Option<Decimal>,
    pub first_crack_temp_f: Option<Decimal>,
    pub end_temp_f: Option<Decimal>,
    pub roast_level: Option<RoastLevel>,
    pub notes: Option<String>,
    pub personal_rating: Option<i32>,
}

impl SaveSessionInput {
    /// Combine with the instants captured by the timer
    pub fn into_roast(self, session: &CompletedSession) -> CreateRoastInput {
        CreateRoastInput {
            bean_id: self.bean_id,
            roast_date: Some(session.start_time),
            start_time: session.start_time,
            end_time: session.end_time,
            green_weight_grams: self.green_weight_grams,
            roasted_weight_grams: self.roasted_weight_grams,
            first_crack_time: session.first_crack_time,
            development_start_time: session.development_start_time,
            cooling_start_time: Some(session.cooling_start_time),
            cooling_end_time: Some(session.cooling_end_time),
            ambient_temp_f: self.ambient_temp_f,
            humidity_percent: self.humidity_percent,
            drop_temp_f: self.drop_temp_f,
            first_crack_temp_f: self.first_crack_temp_f,
            end_temp_f: self.end_temp_f,
            roast_level: self.roast_level,
            notes: self.notes,
            personal_rating: self.personal_rating,
        }
    }
}

/// Check a roast before it is stored
pub fn validate_roast_input(input: &CreateRoastInput) -> AppResult<()> {
    validate_roast_weights(input.green_weight_grams, input.roasted_weight_grams).map_err(|m| {
        let field = if input.green_weight_grams <= Decimal::ZERO {
            "green_weight_grams"
        } else {
            "roasted_weight_grams"
        };
        AppError::validation(field, m)
    })?;

    if input.end_time < input.start_time {
        return Err(AppError::validation(
            "end_time",
            "End time must not be before start time",
        ));
    }

    let within_roast =
        |instant: DateTime<Utc>| instant >= input.start_time && instant <= input.end_time;

    if input.first_crack_time.is_some_and(|t| !within_roast(t)) {
        return Err(AppError::validation(
            "first_crack_time",
            "First crack must fall within the roast",
        ));
    }
    if input.development_start_time.is_some_and(|t| !within_roast(t)) {
        return Err(AppError::validation(
            "development_start_time",
            "Development must start within the roast",
        ));
    }

    // Cooling follows the drop, and ends after it starts
    if input.cooling_start_time.is_some_and(|t| t < input.end_time) {
        return Err(AppError::validation(
            "cooling_start_time",
            "Cooling must not start before the roast ends",
        ));
    }
    let cooling_floor = input.cooling_start_time.unwrap_or(input.end_time);
    if input.cooling_end_time.is_some_and(|t| t < cooling_floor) {
        return Err(AppError::validation(
            "cooling_end_time",
            "Cooling must not end before it starts",
        ));
    }

    if let Some(humidity) = input.humidity_percent {
        validate_humidity(humidity).map_err(|m| AppError::validation("humidity_percent", m))?;
    }
    if let Some(rating) = input.personal_rating {
        validate_personal_rating(rating).map_err(|m| AppError::validation("personal_rating", m))?;
    }

    Ok(())
}

impl RoastService {
    /// Create a new RoastService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Store a roast
    pub async fn create_roast(&self, input: CreateRoastInput) -> AppResult<RoastView> {
        validate_roast_input(&input)?;

        if !BeanService::new(self.db.clone()).bean_exists(input.bean_id).await? {
            return Err(AppError::NotFound("Bean".to_string()));
        }

        let roast_level = input.roast_level.map(|level| level.as_str().to_string());

        let row = sqlx::query_as::<_, RoastRow>(
            r#"
            INSERT INTO roasts (
                bean_id, roast_date, start_time, end_time,
                green_weight_grams, roasted_weight_grams,
                first_crack_time, development_start_time, cooling_start_time, cooling_end_time,
                ambient_temp_f, humidity_percent, drop_temp_f, first_crack_temp_f, end_temp_f,
                roast_level, notes, personal_rating
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING id, bean_id, roast_date, start_time, end_time,
                      green_weight_grams, roasted_weight_grams,
                      first_crack_time, development_start_time, cooling_start_time, cooling_end_time,
                      ambient_temp_f, humidity_percent, drop_temp_f, first_crack_temp_f, end_temp_f,
                      roast_level, notes, personal_rating, created_at
            "#,
        )
        .bind(input.bean_id)
        .bind(input.roast_date.unwrap_or(input.start_time))
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(input.green_weight_grams)
        .bind(input.roasted_weight_grams)
        .bind(input.first_crack_time)
        .bind(input.development_start_time)
        .bind(input.cooling_start_time)
        .bind(input.cooling_end_time)
        .bind(input.ambient_temp_f)
        .bind(input.humidity_percent)
        .bind(input.drop_temp_f)
        .bind(input.first_crack_temp_f)
        .bind(input.end_temp_f)
        .bind(&roast_level)
        .bind(&input.notes)
        .bind(input.personal_rating)
        .fetch_one(&self.db)
        .await?;

        let view = RoastView::from(row.into_record()?);

        tracing::info!(
            roast_id = %view.record.id,
            bean_id = %view.record.bean_id,
            weight_loss_percent = %view.metrics.weight_loss_percent,
            "Roast saved"
        );

        Ok(view)
    }

    /// Store the session the timer just finished
    pub async fn record_completed_session(
        &self,
        session: &CompletedSession,
        input: SaveSessionInput,
    ) -> AppResult<RoastView> {
        self.create_roast(input.into_roast(session)).await
    }

    /// Get a roast by ID
    pub async fn get_roast(&self, roast_id: Uuid) -> AppResult<RoastView> {
        let row = sqlx::query_as::<_, RoastRow>(
            r#"
            SELECT id, bean_id, roast_date, start_time, end_time,
                   green_weight_grams, roasted_weight_grams,
                   first_crack_time, development_start_time, cooling_start_time, cooling_end_time,
                   ambient_temp_f, humidity_percent, drop_temp_f, first_crack_temp_f, end_temp_f,
                   roast_level, notes, personal_rating, created_at
            FROM roasts
            WHERE id = $1
            "#,
        )
        .bind(roast_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Roast".to_string()))?;

        Ok(row.into_record()?.into())
    }

    /// Roasts newest first, one page at a time
    pub async fn list_roasts(
        &self,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<RoastView>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM roasts")
            .fetch_one(&self.db)
            .await?;

        let rows = sqlx::query_as::<_, RoastRow>(
            r#"
            SELECT id, bean_id, roast_date, start_time, end_time,
                   green_weight_grams, roasted_weight_grams,
                   first_crack_time, development_start_time, cooling_start_time, cooling_end_time,
                   ambient_temp_f, humidity_percent, drop_temp_f, first_crack_temp_f, end_temp_f,
                   roast_level, notes, personal_rating, created_at
            FROM roasts
            ORDER BY start_time DESC, created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(pagination.limit()))
        .bind(i64::try_from(pagination.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.db)
        .await?;

        let data = rows
            .into_iter()
            .map(|row| row.into_record().map(RoastView::from))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedResponse {
            data,
            pagination: PaginationMeta::new(pagination, total.max(0) as u64),
        })
    }

    /// Most recent roast, if any
    pub async fn latest_roast(&self) -> AppResult<Option<RoastView>> {
        let row = sqlx::query_as::<_, RoastRow>(
            r#"
            SELECT id, bean_id, roast_date, start_time, end_time,
                   green_weight_grams, roasted_weight_grams,
                   first_crack_time, development_start_time, cooling_start_time, cooling_end_time,
                   ambient_temp_f, humidity_percent, drop_temp_f, first_crack_temp_f, end_temp_f,
                   roast_level, notes, personal_rating, created_at
            FROM roasts
            ORDER BY start_time DESC, created_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.db)
        .await?;

        row.map(|row| row.into_record().map(RoastView::from))
            .transpose()
    }

    /// Delete a roast
    pub async fn delete_roast(&self, roast_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM roasts WHERE id = $1")
            .bind(roast_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Roast".to_string()));
        }

        tracing::info!(roast_id = %roast_id, "Roast deleted");

        Ok(())
    }

    /// Headline numbers for the history page
    pub async fn history_stats(&self) -> AppResult<HistoryStats> {
        let roasts = sqlx::query_as::<_, RoastRow>(
            r#"
            SELECT id, bean_id, roast_date, start_time, end_time,
                   green_weight_grams, roasted_weight_grams,
                   first_crack_time, development_start_time, cooling_start_time, cooling_end_time,
                   ambient_temp_f, humidity_percent, drop_temp_f, first_crack_temp_f, end_temp_f,
                   roast_level, notes, personal_rating, created_at
            FROM roasts
            "#,
        )
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(RoastRow::into_record)
        .collect::<AppResult<Vec<_>>>()?;

        let beans = BeanService::new(self.db.clone()).list_beans().await?;

        Ok(summarize_history(&roasts, &beans))
    }
}
