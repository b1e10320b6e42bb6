//! Cost calculation engine for guest registrations.
//!
//! Prices packages per participant category, accommodation per night, extra
//! beds at a flat nightly rate and venues at a flat fee, with a percentage
//! discount that applies to the children subtotal only.

pub mod allocator;
pub mod calculators;
pub mod catalog;
pub mod lenient;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod summary;

// Re-export commonly used items
pub use allocator::{
    AllocationOutcome, AllocatorSnapshot, PackageParticipants, ParticipantAllocator,
    ParticipantCategory, ParticipantCounts,
};
pub use calculators::{
    calculate, remaining_balance, round_money, CostCalculationSummary, CostInputs, NightsCount,
    FIXED_EXTRA_BED_PRICE,
};
pub use catalog::PricingCatalog;
pub use models::{Accommodation, Package, PackageTier, Venue};
pub use routes::router;
pub use summary::{format_rupiah, summary_lines, SummaryLine};
