//! Bean and roast store tests
//!
//! These run against a real Postgres database named by `DATABASE_URL`
//! and are ignored by default.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::str::FromStr;

use roasted_backend::error::AppError;
use roasted_backend::services::bean::{AdjustQuantityInput, CreateBeanInput};
use roasted_backend::services::roast::SaveSessionInput;
use roasted_backend::services::{BeanService, RoastService};
use shared::{AdjustmentReason, BeanRecord, RoastLevel, RoastTimer};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn at(seconds: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 9, 7, 30, 0).unwrap() + Duration::seconds(seconds)
}

async fn connect() -> PgPool {
    let url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/roasted_test".to_string());
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

async fn shelve_bean(pool: &PgPool, quantity: &str, cost: Option<&str>) -> BeanRecord {
    BeanService::new(pool.clone())
        .create_bean(CreateBeanInput {
            name: "Kochere".to_string(),
            origin: "Ethiopia".to_string(),
            variety: None,
            process: Some("Washed".to_string()),
            cupping_score: Some(dec("87.5")),
            quantity_pounds: Some(dec(quantity)),
            cost_per_pound: cost.map(dec),
            supplier: None,
            notes: None,
            purchase_date: None,
        })
        .await
        .unwrap()
}

#[tokio::test]
#[ignore] // Requires database connection
async fn test_create_bean_rounds_cost_to_cents() {
    let pool = connect().await;
    let bean = shelve_bean(&pool, "5", Some("7.256")).await;

    assert_eq!(bean.variety, "Unknown");
    assert_eq!(bean.cost_per_pound, Some(dec("7.26")));

    let stored = BeanService::new(pool).get_bean(bean.id).await.unwrap();
    assert_eq!(stored.cost_per_pound, Some(dec("7.26")));
}

#[tokio::test]
#[ignore] // Requires database connection
async fn test_adjustment_below_zero_is_rejected() {
    let pool = connect().await;
    let beans = BeanService::new(pool.clone());
    let bean = shelve_bean(&pool, "1.5", None).await;

    let result = beans
        .adjust_quantity(
            bean.id,
            AdjustQuantityInput {
                amount_pounds: dec("-2"),
                reason: AdjustmentReason::Correction,
                notes: None,
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::InsufficientInventory(_))));

    // Nothing changed and nothing was recorded
    let stored = beans.get_bean(bean.id).await.unwrap();
    assert_eq!(stored.quantity_pounds, dec("1.5"));
    assert!(beans.list_adjustments(bean.id).await.unwrap().is_empty());

    let outcome = beans
        .adjust_quantity(
            bean.id,
            AdjustQuantityInput {
                amount_pounds: dec("-1.5"),
                reason: AdjustmentReason::Correction,
                notes: Some("Spilled".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome.bean.quantity_pounds, Decimal::ZERO);
    assert_eq!(outcome.adjustment.amount_pounds, dec("-1.5"));
}

#[tokio::test]
#[ignore] // Requires database connection
async fn test_record_completed_session() {
    let pool = connect().await;
    let bean = shelve_bean(&pool, "3", None).await;

    let mut timer = RoastTimer::new();
    timer.start_roast(at(0));
    timer.log_first_crack(at(510));
    timer.end_roast(at(630));
    timer.end_cooling(at(870));
    let session = timer.completed_session().unwrap();

    let roasts = RoastService::new(pool);
    let view = roasts
        .record_completed_session(
            &session,
            SaveSessionInput {
                bean_id: bean.id,
                green_weight_grams: dec("250"),
                roasted_weight_grams: dec("212.5"),
                ambient_temp_f: Some(dec("68")),
                humidity_percent: None,
                drop_temp_f: None,
                first_crack_temp_f: None,
                end_temp_f: None,
                roast_level: Some(RoastLevel::Medium),
                notes: None,
                personal_rating: Some(7),
            },
        )
        .await
        .unwrap();

    assert_eq!(view.record.roast_date, at(0));
    assert_eq!(view.record.start_time, at(0));
    assert_eq!(view.record.end_time, at(630));
    assert_eq!(view.record.first_crack_time, Some(at(510)));
    assert_eq!(view.record.cooling_end_time, Some(at(870)));
    assert_eq!(view.metrics.development_time_seconds, 120);
    assert_eq!(view.metrics.weight_loss_percent, dec("15"));

    let stored = roasts.get_roast(view.record.id).await.unwrap();
    assert_eq!(stored.record.cooling_start_time, Some(at(630)));
    assert_eq!(stored.record.roast_level, Some(RoastLevel::Medium));
}
