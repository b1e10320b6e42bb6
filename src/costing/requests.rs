//! Request DTOs for costing and registration endpoints.
//!
//! Numeric fields go through the lenient deserializers: partial form input
//! degrades to zero instead of rejecting the request.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::allocator::{AllocatorSnapshot, ParticipantCategory, ParticipantCounts};
use super::calculators::{CostInputs, NightsCount};
use super::lenient;

/// Participant totals as typed into the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParticipantTotalsRequest {
    #[serde(default, deserialize_with = "lenient::count")]
    pub adults: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub children: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub teachers: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub free_teachers: u32,
}

impl From<&ParticipantTotalsRequest> for ParticipantCounts {
    fn from(req: &ParticipantTotalsRequest) -> Self {
        ParticipantCounts::new(req.adults, req.children, req.teachers, req.free_teachers)
    }
}

/// Everything the registration form holds that affects cost.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CostSelectionRequest {
    #[serde(default)]
    pub participants: ParticipantTotalsRequest,
    #[serde(default)]
    pub selected_packages: Vec<Uuid>,
    #[serde(default)]
    pub package_participants: HashMap<Uuid, ParticipantTotalsRequest>,
    #[serde(default, deserialize_with = "lenient::count_map")]
    pub accommodation_counts: HashMap<Uuid, u32>,
    #[serde(default, deserialize_with = "lenient::count_map")]
    pub extra_bed_counts: HashMap<Uuid, u32>,
    #[serde(default)]
    pub selected_venues: HashSet<Uuid>,
    #[serde(default, deserialize_with = "lenient::percentage")]
    pub discount_percentage: Decimal,
    #[serde(default = "default_nights", deserialize_with = "lenient::count")]
    pub nights: u32,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub down_payment: Decimal,
}

fn default_nights() -> u32 {
    1
}

impl CostSelectionRequest {
    /// Allocator state implied by the request.
    pub fn allocator_snapshot(&self) -> AllocatorSnapshot {
        AllocatorSnapshot {
            totals: (&self.participants).into(),
            selected_packages: self.selected_packages.clone(),
            allocations: self
                .package_participants
                .iter()
                .map(|(id, counts)| (*id, counts.into()))
                .collect(),
        }
    }

    /// Calculator inputs using already-validated package allocations.
    pub fn cost_inputs(&self, package_participants: HashMap<Uuid, ParticipantCounts>) -> CostInputs {
        CostInputs {
            selected_packages: self.selected_packages.clone(),
            package_participants,
            accommodation_counts: self.accommodation_counts.clone(),
            extra_bed_counts: self.extra_bed_counts.clone(),
            selected_venues: self.selected_venues.clone(),
            discount_percentage: self.discount_percentage,
            nights: NightsCount::new(self.nights),
            down_payment: self.down_payment,
        }
    }
}

/// Request to change one package's participant count
#[derive(Debug, Deserialize)]
pub struct AllocateParticipantsRequest {
    #[serde(default)]
    pub allocator: AllocatorSnapshot,
    pub package_id: Uuid,
    pub category: ParticipantCategory,
    #[serde(default, deserialize_with = "lenient::count")]
    pub count: u32,
}

/// Request to submit a registration
#[derive(Debug, Deserialize)]
pub struct SubmitRegistrationRequest {
    pub guest_name: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub visit_date: NaiveDate,
    #[serde(flatten)]
    pub selection: CostSelectionRequest,
}

/// Query parameters for the visit listing
#[derive(Debug, Deserialize)]
pub struct ListRegistrationsQuery {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}
