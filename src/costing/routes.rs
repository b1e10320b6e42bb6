//! HTTP routes for costing and registrations.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::cache::CacheStats;
use crate::error::Result;
use crate::AppState;

use super::catalog::PricingCatalog;
use super::requests::{
    AllocateParticipantsRequest, CostSelectionRequest, ListRegistrationsQuery,
    SubmitRegistrationRequest,
};
use super::responses::{AllocationResponse, QuoteResponse, RegistrationResponse};
use super::services;
use super::summary::{format_rupiah, summary_lines, SummaryLine};

/// Build the costing router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/catalog", get(catalog))
        .route("/api/catalog/invalidate", post(invalidate_catalog))
        .route("/api/costing/quote", post(quote))
        .route("/api/costing/allocate", post(allocate))
        .route(
            "/api/registrations",
            get(list_registrations).post(submit_registration),
        )
        .route("/api/registrations/:id", get(get_registration))
        .route("/registrations/:id/summary", get(registration_summary))
}

async fn catalog(State(state): State<AppState>) -> Result<Json<PricingCatalog>> {
    let catalog = services::load_catalog(&state.db, &state.cache).await?;
    Ok(Json((*catalog).clone()))
}

async fn invalidate_catalog(State(state): State<AppState>) -> Json<CacheStats> {
    state.cache.invalidate().await;
    Json(state.cache.stats().await)
}

async fn quote(
    State(state): State<AppState>,
    Json(req): Json<CostSelectionRequest>,
) -> Result<Json<QuoteResponse>> {
    let catalog = services::load_catalog(&state.db, &state.cache).await?;
    Ok(Json(services::quote(&req, &catalog)))
}

async fn allocate(Json(req): Json<AllocateParticipantsRequest>) -> Json<AllocationResponse> {
    Json(services::allocate(
        &req.allocator,
        req.package_id,
        req.category,
        req.count,
    ))
}

async fn submit_registration(
    State(state): State<AppState>,
    Json(req): Json<SubmitRegistrationRequest>,
) -> Result<Json<RegistrationResponse>> {
    let row = services::submit_registration(&state.db, &state.cache, &req).await?;
    Ok(Json(row.into()))
}

async fn list_registrations(
    State(state): State<AppState>,
    Query(query): Query<ListRegistrationsQuery>,
) -> Result<Json<Vec<RegistrationResponse>>> {
    let rows = services::list_registrations(&state.db, query.from, query.to).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegistrationResponse>> {
    let row = services::get_registration(&state.db, id).await?;
    Ok(Json(row.into()))
}

/// Printable cost summary of a stored registration
#[derive(Template)]
#[template(path = "registrations/summary.html")]
struct RegistrationSummaryTemplate {
    guest_name: String,
    institution: String,
    visit_date: String,
    nights: i32,
    lines: Vec<SummaryLine>,
    final_total: String,
}

async fn registration_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
    let row = services::get_registration(&state.db, id).await?;
    let lines = row
        .cost_summary()
        .map(|summary| summary_lines(&summary))
        .unwrap_or_default();

    let template = RegistrationSummaryTemplate {
        guest_name: row.guest_name,
        institution: row.institution.unwrap_or_default(),
        visit_date: row.visit_date.format("%d %B %Y").to_string(),
        nights: row.nights,
        lines,
        final_total: format_rupiah(row.discounted_cost),
    };

    Ok(Html(template.render()?))
}
