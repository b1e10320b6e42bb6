//! Response DTOs for costing and registration endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::allocator::{AllocationOutcome, AllocatorSnapshot, ParticipantCounts};
use super::calculators::CostCalculationSummary;
use super::models::Registration;
use super::summary::SummaryLine;

/// Response for a cost quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub summary: CostCalculationSummary,
    pub lines: Vec<SummaryLine>,
    /// Participants per category not yet assigned to a selected package.
    pub remaining: ParticipantCounts,
}

/// Response for a participant allocation change
#[derive(Debug, Serialize)]
pub struct AllocationResponse {
    pub outcome: AllocationOutcome,
    pub allocator: AllocatorSnapshot,
    pub remaining: ParticipantCounts,
}

/// Stored registration with its cost snapshot
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub id: Uuid,
    pub guest_name: String,
    pub institution: Option<String>,
    pub phone: Option<String>,
    pub visit_date: NaiveDate,
    pub participants: ParticipantCounts,
    pub nights: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub down_payment: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discounted_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_bed_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub remaining_balance: Decimal,
    pub selections: serde_json::Value,
    pub cost_breakdown: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<Registration> for RegistrationResponse {
    fn from(row: Registration) -> Self {
        let participants = row.participants();
        Self {
            id: row.id,
            guest_name: row.guest_name,
            institution: row.institution,
            phone: row.phone,
            visit_date: row.visit_date,
            participants,
            nights: row.nights,
            discount_percentage: row.discount_percentage,
            down_payment: row.down_payment,
            total_cost: row.total_cost,
            discounted_cost: row.discounted_cost,
            extra_bed_cost: row.extra_bed_cost,
            remaining_balance: row.remaining_balance,
            selections: row.selections,
            cost_breakdown: row.cost_breakdown,
            created_at: row.created_at,
        }
    }
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
}
