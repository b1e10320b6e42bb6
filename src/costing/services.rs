//! Costing service functions with database access.
//!
//! The calculator itself is pure; these functions supply it a catalog
//! (cache first, database second) and persist submitted registrations.

use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::CatalogCache;
use crate::error::AppError;

use super::allocator::{
    AllocationOutcome, AllocatorSnapshot, ParticipantAllocator, ParticipantCategory,
};
use super::calculators::{calculate, CostCalculationSummary};
use super::catalog::PricingCatalog;
use super::models::{NewRegistration, Registration};
use super::queries;
use super::requests::{CostSelectionRequest, SubmitRegistrationRequest};
use super::responses::{AllocationResponse, QuoteResponse};
use super::summary::summary_lines;

/// Load the full catalog from the database.
pub async fn fetch_catalog(pool: &PgPool) -> Result<PricingCatalog, AppError> {
    let packages = queries::get_packages(pool).await?;
    let accommodations = queries::get_accommodations(pool).await?;
    let venues = queries::get_venues(pool).await?;

    Ok(PricingCatalog::new(packages, accommodations, venues))
}

/// Catalog from cache, falling back to the database.
pub async fn load_catalog(pool: &PgPool, cache: &CatalogCache) -> Result<Arc<PricingCatalog>, AppError> {
    if let Some(catalog) = cache.get().await {
        debug!("Cache HIT for pricing catalog");
        return Ok(catalog);
    }

    debug!("Cache MISS for pricing catalog");
    let catalog = fetch_catalog(pool).await?;
    Ok(cache.insert(catalog).await)
}

/// Price a form selection.
///
/// Package allocations are replayed through the allocator first, so a
/// selection that over-allocates participants is priced as the form would
/// have clamped it.
pub fn quote(selection: &CostSelectionRequest, catalog: &PricingCatalog) -> QuoteResponse {
    let allocator = ParticipantAllocator::from_snapshot(&selection.allocator_snapshot());
    let inputs = selection.cost_inputs(allocator.selected_allocations());
    let summary = calculate(&inputs, catalog);

    QuoteResponse {
        lines: summary_lines(&summary),
        remaining: allocator.remaining_counts(),
        summary,
    }
}

/// Apply one participant count change to a form's allocator state.
pub fn allocate(
    snapshot: &AllocatorSnapshot,
    package_id: Uuid,
    category: ParticipantCategory,
    count: u32,
) -> AllocationResponse {
    let mut allocator = ParticipantAllocator::from_snapshot(snapshot);
    let outcome = allocator.set_participants(package_id, category, count);
    if outcome == AllocationOutcome::Refused {
        debug!(%package_id, ?category, count, "Allocation left unchanged");
    }

    AllocationResponse {
        outcome,
        remaining: allocator.remaining_counts(),
        allocator: allocator.snapshot(),
    }
}

/// Validate a submission and build the row to persist.
///
/// Totals are always recomputed from the catalog; client-side figures are
/// never trusted.
pub fn prepare_registration(
    req: &SubmitRegistrationRequest,
    catalog: &PricingCatalog,
) -> Result<NewRegistration, AppError> {
    let guest_name = req.guest_name.trim();
    if guest_name.is_empty() {
        return Err(AppError::Validation("Guest name is required".to_string()));
    }

    let selection = &req.selection;
    let allocator = ParticipantAllocator::from_snapshot(&selection.allocator_snapshot());
    let allocations = allocator.selected_allocations();
    let summary: CostCalculationSummary = calculate(&selection.cost_inputs(allocations.clone()), catalog);

    let selections = serde_json::json!({
        "packages": allocations,
        "rooms": selection.accommodation_counts,
        "extra_beds": selection.extra_bed_counts,
        "venues": selection.selected_venues,
    });

    let non_empty = |s: &Option<String>| {
        s.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Ok(NewRegistration {
        guest_name: guest_name.to_string(),
        institution: non_empty(&req.institution),
        phone: non_empty(&req.phone),
        visit_date: req.visit_date,
        participants: allocator.totals(),
        nights: summary.nights,
        discount_percentage: summary.discount_percentage,
        down_payment: summary.down_payment,
        selections,
        summary,
    })
}

/// Validate, price and persist a registration.
pub async fn submit_registration(
    pool: &PgPool,
    cache: &CatalogCache,
    req: &SubmitRegistrationRequest,
) -> Result<Registration, AppError> {
    let catalog = load_catalog(pool, cache).await?;
    let registration = prepare_registration(req, &catalog)?;

    let cost_breakdown = serde_json::to_value(&registration.summary)
        .map_err(|e| AppError::Internal(format!("Failed to serialize cost breakdown: {}", e)))?;

    let row = queries::insert_registration(pool, &registration, cost_breakdown).await?;
    info!(
        registration_id = %row.id,
        visit_date = %row.visit_date,
        total = %row.discounted_cost,
        "Registration submitted"
    );

    Ok(row)
}

pub async fn get_registration(pool: &PgPool, id: Uuid) -> Result<Registration, AppError> {
    queries::get_registration(pool, id).await
}

/// Visits ordered by date, optionally within `[from, to]`.
pub async fn list_registrations(
    pool: &PgPool,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<Registration>, AppError> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(AppError::Validation(format!(
                "Invalid range: {} is after {}",
                from, to
            )));
        }
    }

    queries::list_registrations(pool, from, to).await
}
