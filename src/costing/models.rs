//! Catalog models for cost calculation.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.
//! Prices are coalesced to zero in SQL, so every row carries concrete amounts.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::allocator::ParticipantCounts;
use super::calculators::CostCalculationSummary;

/// Markers in a package name or type that select the senior pricing tier.
const SENIOR_MARKERS: [&str; 2] = ["lansia", "senior"];

/// Package from packages
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Package {
    pub id: Uuid,
    pub name: String,
    pub package_type: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_adult: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_child: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_teacher: Decimal,
}

impl Package {
    /// Pricing tier this package falls into.
    pub fn tier(&self) -> PackageTier {
        let is_senior = |s: &str| {
            let s = s.to_lowercase();
            SENIOR_MARKERS.iter().any(|marker| s.contains(marker))
        };

        if is_senior(self.name.as_str()) || self.package_type.as_deref().is_some_and(is_senior) {
            PackageTier::Senior
        } else {
            PackageTier::Standard
        }
    }
}

/// Pricing tier of a package.
///
/// Senior ("lansia") packages are billed at catalog prices. Every other
/// package bills adults and teachers at fixed rates regardless of catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageTier {
    Senior,
    Standard,
}

/// Accommodation from accommodations
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Accommodation {
    pub id: Uuid,
    pub name: String,
    pub accommodation_type: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_night: Decimal,
    pub capacity: i32,
}

/// Venue from venues
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub capacity: i32,
    pub features: Vec<String>,
}

/// Registration from registrations
#[derive(Debug, Clone, FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub guest_name: String,
    pub institution: Option<String>,
    pub phone: Option<String>,
    pub visit_date: NaiveDate,
    pub adults: i32,
    pub children: i32,
    pub teachers: i32,
    pub free_teachers: i32,
    pub nights: i32,
    pub discount_percentage: Decimal,
    pub down_payment: Decimal,
    pub total_cost: Decimal,
    pub discounted_cost: Decimal,
    pub extra_bed_cost: Decimal,
    pub remaining_balance: Decimal,
    pub selections: serde_json::Value,
    pub cost_breakdown: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn participants(&self) -> ParticipantCounts {
        let count = |n: i32| u32::try_from(n).unwrap_or(0);
        ParticipantCounts::new(
            count(self.adults),
            count(self.children),
            count(self.teachers),
            count(self.free_teachers),
        )
    }

    /// Cost snapshot stored at submission, if it still parses.
    pub fn cost_summary(&self) -> Option<CostCalculationSummary> {
        serde_json::from_value(self.cost_breakdown.clone()).ok()
    }
}

/// Registration row to insert.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub guest_name: String,
    pub institution: Option<String>,
    pub phone: Option<String>,
    pub visit_date: NaiveDate,
    pub participants: ParticipantCounts,
    pub nights: u32,
    pub discount_percentage: Decimal,
    pub down_payment: Decimal,
    pub selections: serde_json::Value,
    pub summary: CostCalculationSummary,
}
