//! Green bean inventory service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{
    normalize_pounds, normalize_price, validate_adjustment_amount, validate_bean_name,
    validate_bean_origin, validate_cost_per_pound, validate_cupping_score,
    validate_quantity_pounds, AdjustmentReason, BeanRecord, InventoryAdjustment, UNKNOWN,
};

use crate::error::{AppError, AppResult};

/// Bean service for the green coffee shelf
#[derive(Clone)]
pub struct BeanService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct BeanRow {
    id: Uuid,
    name: String,
    origin: String,
    variety: String,
    process: String,
    cupping_score: Option<Decimal>,
    quantity_pounds: Decimal,
    cost_per_pound: Option<Decimal>,
    supplier: Option<String>,
    notes: Option<String>,
    purchase_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<BeanRow> for BeanRecord {
    fn from(row: BeanRow) -> Self {
        BeanRecord {
            id: row.id,
            name: row.name,
            origin: row.origin,
            variety: row.variety,
            process: row.process,
            cupping_score: row.cupping_score,
            quantity_pounds: row.quantity_pounds,
            cost_per_pound: row.cost_per_pound,
            supplier: row.supplier,
            notes: row.notes,
            purchase_date: row.purchase_date,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct AdjustmentRow {
    id: Uuid,
    bean_id: Uuid,
    amount_pounds: Decimal,
    reason: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl AdjustmentRow {
    fn into_adjustment(self) -> AppResult<InventoryAdjustment> {
        let reason = AdjustmentReason::parse(&self.reason).ok_or_else(|| {
            AppError::Internal(format!("Unknown adjustment reason '{}'", self.reason))
        })?;

        Ok(InventoryAdjustment {
            id: self.id,
            bean_id: self.bean_id,
            amount_pounds: self.amount_pounds,
            reason,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

/// Input for adding a bean to the shelf
#[derive(Debug, Deserialize)]
pub struct CreateBeanInput {
    pub name: String,
    pub origin: String,
    pub variety: Option<String>,
    pub process: Option<String>,
    pub cupping_score: Option<Decimal>,
    pub quantity_pounds: Option<Decimal>,
    pub cost_per_pound: Option<Decimal>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub purchase_date: Option<DateTime<Utc>>,
}

/// Input for a manual quantity change
#[derive(Debug, Deserialize)]
pub struct AdjustQuantityInput {
    /// Signed; negative amounts take stock off the shelf
    pub amount_pounds: Decimal,
    pub reason: AdjustmentReason,
    pub notes: Option<String>,
}

/// Bean after an adjustment, together with the adjustment row
#[derive(Debug, Serialize)]
pub struct AdjustmentOutcome {
    pub bean: BeanRecord,
    pub adjustment: InventoryAdjustment,
}

fn blank_to_unknown(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

impl BeanService {
    /// Create a new BeanService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Add a bean to the shelf
    pub async fn create_bean(&self, input: CreateBeanInput) -> AppResult<BeanRecord> {
        validate_bean_name(&input.name).map_err(|m| AppError::validation("name", m))?;
        validate_bean_origin(&input.origin).map_err(|m| AppError::validation("origin", m))?;

        let quantity = normalize_pounds(input.quantity_pounds.unwrap_or(Decimal::ZERO));
        validate_quantity_pounds(quantity)
            .map_err(|m| AppError::validation("quantity_pounds", m))?;

        let cost_per_pound = input.cost_per_pound.map(normalize_price);
        if let Some(cost) = cost_per_pound {
            validate_cost_per_pound(cost).map_err(|m| AppError::validation("cost_per_pound", m))?;
        }
        if let Some(score) = input.cupping_score {
            validate_cupping_score(score).map_err(|m| AppError::validation("cupping_score", m))?;
        }

        let purchase_date = input.purchase_date.unwrap_or_else(Utc::now);

        let row = sqlx::query_as::<_, BeanRow>(
            r#"
            INSERT INTO beans (
                name, origin, variety, process, cupping_score, quantity_pounds,
                cost_per_pound, supplier, notes, purchase_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, origin, variety, process, cupping_score, quantity_pounds,
                      cost_per_pound, supplier, notes, purchase_date, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(input.origin.trim())
        .bind(blank_to_unknown(input.variety))
        .bind(blank_to_unknown(input.process))
        .bind(input.cupping_score)
        .bind(quantity)
        .bind(cost_per_pound)
        .bind(&input.supplier)
        .bind(&input.notes)
        .bind(purchase_date)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(bean_id = %row.id, name = %row.name, "Bean added to inventory");

        Ok(row.into())
    }

    /// Get a bean by ID
    pub async fn get_bean(&self, bean_id: Uuid) -> AppResult<BeanRecord> {
        let row = sqlx::query_as::<_, BeanRow>(
            r#"
            SELECT id, name, origin, variety, process, cupping_score, quantity_pounds,
                   cost_per_pound, supplier, notes, purchase_date, created_at
            FROM beans
            WHERE id = $1
            "#,
        )
        .bind(bean_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bean".to_string()))?;

        Ok(row.into())
    }

    /// List every bean, by name
    pub async fn list_beans(&self) -> AppResult<Vec<BeanRecord>> {
        let rows = sqlx::query_as::<_, BeanRow>(
            r#"
            SELECT id, name, origin, variety, process, cupping_score, quantity_pounds,
                   cost_per_pound, supplier, notes, purchase_date, created_at
            FROM beans
            ORDER BY name, created_at
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(BeanRecord::from).collect())
    }

    /// Whether a bean exists, without loading it
    pub async fn bean_exists(&self, bean_id: Uuid) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM beans WHERE id = $1)")
                .bind(bean_id)
                .fetch_one(&self.db)
                .await?;

        Ok(exists)
    }

    /// Apply a signed quantity change and record it
    pub async fn adjust_quantity(
        &self,
        bean_id: Uuid,
        input: AdjustQuantityInput,
    ) -> AppResult<AdjustmentOutcome> {
        let amount = normalize_pounds(input.amount_pounds);
        validate_adjustment_amount(amount)
            .map_err(|m| AppError::validation("amount_pounds", m))?;

        let mut tx = self.db.begin().await?;

        let current = sqlx::query_scalar::<_, Decimal>(
            "SELECT quantity_pounds FROM beans WHERE id = $1 FOR UPDATE",
        )
        .bind(bean_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Bean".to_string()))?;

        let updated_quantity = normalize_pounds(current + amount);
        if updated_quantity < Decimal::ZERO {
            return Err(AppError::InsufficientInventory(format!(
                "Bean has {} lb on hand, cannot remove {} lb",
                current,
                amount.abs()
            )));
        }

        let bean = sqlx::query_as::<_, BeanRow>(
            r#"
            UPDATE beans
            SET quantity_pounds = $1
            WHERE id = $2
            RETURNING id, name, origin, variety, process, cupping_score, quantity_pounds,
                      cost_per_pound, supplier, notes, purchase_date, created_at
            "#,
        )
        .bind(updated_quantity)
        .bind(bean_id)
        .fetch_one(&mut *tx)
        .await?;

        let adjustment = sqlx::query_as::<_, AdjustmentRow>(
            r#"
            INSERT INTO bean_adjustments (bean_id, amount_pounds, reason, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, bean_id, amount_pounds, reason, notes, created_at
            "#,
        )
        .bind(bean_id)
        .bind(amount)
        .bind(input.reason.as_str())
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            bean_id = %bean_id,
            amount_pounds = %amount,
            quantity_pounds = %updated_quantity,
            reason = input.reason.as_str(),
            "Bean quantity adjusted"
        );

        Ok(AdjustmentOutcome {
            bean: bean.into(),
            adjustment: adjustment.into_adjustment()?,
        })
    }

    /// Adjustments for one bean, newest first
    pub async fn list_adjustments(&self, bean_id: Uuid) -> AppResult<Vec<InventoryAdjustment>> {
        if !self.bean_exists(bean_id).await? {
            return Err(AppError::NotFound("Bean".to_string()));
        }

        let rows = sqlx::query_as::<_, AdjustmentRow>(
            r#"
            SELECT id, bean_id, amount_pounds, reason, notes, created_at
            FROM bean_adjustments
            WHERE bean_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(bean_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(AdjustmentRow::into_adjustment).collect()
    }
}
