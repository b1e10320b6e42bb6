//! Database queries for the pricing catalog and registrations.
//!
//! Null catalog prices are coalesced to zero here so the calculator only ever
//! sees concrete amounts.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

use super::models::{Accommodation, NewRegistration, Package, Registration, Venue};

const REGISTRATION_COLUMNS: &str = r#"
    id, guest_name, institution, phone, visit_date,
    adults, children, teachers, free_teachers,
    nights, discount_percentage, down_payment,
    total_cost, discounted_cost, extra_bed_cost, remaining_balance,
    selections, cost_breakdown, created_at
"#;

/// Get all bookable packages
pub async fn get_packages(pool: &PgPool) -> Result<Vec<Package>, AppError> {
    let packages = sqlx::query_as::<_, Package>(
        r#"
        SELECT
            id, name, package_type,
            COALESCE(price_per_adult, 0) AS price_per_adult,
            COALESCE(price_per_child, 0) AS price_per_child,
            COALESCE(price_per_teacher, 0) AS price_per_teacher
        FROM packages
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(packages)
}

/// Get all accommodations
pub async fn get_accommodations(pool: &PgPool) -> Result<Vec<Accommodation>, AppError> {
    let accommodations = sqlx::query_as::<_, Accommodation>(
        r#"
        SELECT
            id, name, accommodation_type,
            COALESCE(price_per_night, 0) AS price_per_night,
            COALESCE(capacity, 0) AS capacity
        FROM accommodations
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(accommodations)
}

/// Get all venues
pub async fn get_venues(pool: &PgPool) -> Result<Vec<Venue>, AppError> {
    let venues = sqlx::query_as::<_, Venue>(
        r#"
        SELECT
            id, name,
            COALESCE(price, 0) AS price,
            COALESCE(capacity, 0) AS capacity,
            COALESCE(features, '{}') AS features
        FROM venues
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(venues)
}

/// Insert a registration with its computed cost snapshot
pub async fn insert_registration(
    pool: &PgPool,
    registration: &NewRegistration,
    cost_breakdown: serde_json::Value,
) -> Result<Registration, AppError> {
    let count = |n: u32| i32::try_from(n).unwrap_or(i32::MAX);
    let summary = &registration.summary;

    let row = sqlx::query_as::<_, Registration>(&format!(
        r#"
        INSERT INTO registrations (
            id, guest_name, institution, phone, visit_date,
            adults, children, teachers, free_teachers,
            nights, discount_percentage, down_payment,
            total_cost, discounted_cost, extra_bed_cost, remaining_balance,
            selections, cost_breakdown, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, NOW())
        RETURNING {}
        "#,
        REGISTRATION_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(&registration.guest_name)
    .bind(&registration.institution)
    .bind(&registration.phone)
    .bind(registration.visit_date)
    .bind(count(registration.participants.adults))
    .bind(count(registration.participants.children))
    .bind(count(registration.participants.teachers))
    .bind(count(registration.participants.free_teachers))
    .bind(count(registration.nights))
    .bind(registration.discount_percentage)
    .bind(registration.down_payment)
    .bind(summary.subtotal)
    .bind(summary.final_total)
    .bind(summary.extra_bed_cost)
    .bind(summary.remaining_balance)
    .bind(&registration.selections)
    .bind(cost_breakdown)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Get a registration by id
pub async fn get_registration(pool: &PgPool, id: Uuid) -> Result<Registration, AppError> {
    sqlx::query_as::<_, Registration>(&format!(
        "SELECT {} FROM registrations WHERE id = $1",
        REGISTRATION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// List registrations by visit date, optionally bounded on either side
pub async fn list_registrations(
    pool: &PgPool,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<Registration>, AppError> {
    let rows = sqlx::query_as::<_, Registration>(&format!(
        r#"
        SELECT {}
        FROM registrations
        WHERE ($1::date IS NULL OR visit_date >= $1)
          AND ($2::date IS NULL OR visit_date <= $2)
        ORDER BY visit_date, created_at
        "#,
        REGISTRATION_COLUMNS
    ))
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
