//! Core cost calculation functions.
//!
//! Pure functions for registration costing - no database access.
//! Every invocation recomputes the whole summary from its inputs.

use std::collections::{HashMap, HashSet};

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::allocator::PackageParticipants;
use super::catalog::PricingCatalog;
use super::models::PackageTier;

/// Flat nightly rate for an extra bed, whatever room it goes into.
pub const FIXED_EXTRA_BED_PRICE: Decimal = dec!(160000);

/// Adult rate applied to every non-senior package.
pub const STANDARD_ADULT_PRICE: Decimal = dec!(100000);

/// Teacher rate applied to every non-senior package.
pub const STANDARD_TEACHER_PRICE: Decimal = dec!(50000);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use agrowisata_booking::costing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Number of nights a stay lasts. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct NightsCount(u32);

impl NightsCount {
    pub fn new(nights: u32) -> Self {
        Self(nights.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for NightsCount {
    fn default() -> Self {
        Self(1)
    }
}

impl From<u32> for NightsCount {
    fn from(nights: u32) -> Self {
        Self::new(nights)
    }
}

impl From<NightsCount> for u32 {
    fn from(nights: NightsCount) -> Self {
        nights.0
    }
}

/// Everything the calculator needs besides the catalog.
#[derive(Debug, Clone, Default)]
pub struct CostInputs {
    pub selected_packages: Vec<Uuid>,
    pub package_participants: PackageParticipants,
    pub accommodation_counts: HashMap<Uuid, u32>,
    pub extra_bed_counts: HashMap<Uuid, u32>,
    pub selected_venues: HashSet<Uuid>,
    /// Percentage off the children subtotal, 0 to 100.
    pub discount_percentage: Decimal,
    pub nights: NightsCount,
    pub down_payment: Decimal,
}

/// Cost of one selected package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageBreakdown {
    pub package_id: Uuid,
    pub package_name: String,
    pub tier: PackageTier,
    pub adults: u32,
    pub children: u32,
    pub teachers: u32,
    pub free_teachers: u32,
    pub adult_price: Decimal,
    pub child_price: Decimal,
    pub teacher_price: Decimal,
    pub adult_cost: Decimal,
    pub children_cost: Decimal,
    pub teacher_cost: Decimal,
    /// Pre-discount total of this package.
    pub subtotal: Decimal,
}

/// Room charges of one accommodation over the whole stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccommodationBreakdown {
    pub accommodation_id: Uuid,
    pub name: String,
    pub rooms: u32,
    pub extra_beds: u32,
    pub price_per_night: Decimal,
    pub room_cost: Decimal,
    pub extra_bed_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueBreakdown {
    pub venue_id: Uuid,
    pub name: String,
    pub price: Decimal,
}

/// Itemized cost of a registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCalculationSummary {
    pub adult_cost: Decimal,
    pub children_cost: Decimal,
    pub children_discount_amount: Decimal,
    pub teacher_cost: Decimal,
    pub accommodation_cost: Decimal,
    pub extra_bed_cost: Decimal,
    pub venue_cost: Decimal,
    /// Sum of every component before the children discount.
    pub subtotal: Decimal,
    pub final_total: Decimal,
    pub down_payment: Decimal,
    pub remaining_balance: Decimal,
    pub free_teachers_count: u32,
    pub discount_percentage: Decimal,
    pub nights: u32,
    pub package_breakdown: Vec<PackageBreakdown>,
    pub accommodation_breakdown: Vec<AccommodationBreakdown>,
    pub venue_breakdown: Vec<VenueBreakdown>,
}

/// Balance still owed after the down payment. Negative when overpaid.
pub fn remaining_balance(final_total: Decimal, down_payment: Decimal) -> Decimal {
    final_total - down_payment
}

/// Price each selected package against its allocated participants.
///
/// Packages missing from the catalog or without an allocation are skipped.
fn price_packages(inputs: &CostInputs, catalog: &PricingCatalog) -> Vec<PackageBreakdown> {
    let mut seen = HashSet::new();

    inputs
        .selected_packages
        .iter()
        .filter(|id| seen.insert(**id))
        .filter_map(|id| {
            let package = catalog.package(*id)?;
            let participants = inputs.package_participants.get(id)?;

            let tier = package.tier();
            let (adult_price, teacher_price) = match tier {
                PackageTier::Senior => (package.price_per_adult, package.price_per_teacher),
                PackageTier::Standard => (STANDARD_ADULT_PRICE, STANDARD_TEACHER_PRICE),
            };
            let child_price = package.price_per_child;

            let adult_cost = adult_price * Decimal::from(participants.adults);
            let children_cost = child_price * Decimal::from(participants.children);
            let teacher_cost = teacher_price * Decimal::from(participants.teachers);

            Some(PackageBreakdown {
                package_id: package.id,
                package_name: package.name.clone(),
                tier,
                adults: participants.adults,
                children: participants.children,
                teachers: participants.teachers,
                free_teachers: participants.free_teachers,
                adult_price,
                child_price,
                teacher_price,
                adult_cost,
                children_cost,
                teacher_cost,
                subtotal: adult_cost + children_cost + teacher_cost,
            })
        })
        .collect()
}

/// Name shown for extra beds booked under an id missing from the catalog.
pub const UNLISTED_ACCOMMODATION: &str = "Unlisted accommodation";

/// Room and extra-bed charges.
///
/// Catalog rooms come first, in catalog order. Extra beds booked under ids
/// the catalog does not know follow, sorted by id, with no room charge.
fn price_accommodations(
    inputs: &CostInputs,
    catalog: &PricingCatalog,
) -> Vec<AccommodationBreakdown> {
    let nights = Decimal::from(inputs.nights.get());
    let count = |counts: &HashMap<Uuid, u32>, id: &Uuid| counts.get(id).copied().unwrap_or(0);

    let listed = catalog.accommodations.iter().filter_map(|accommodation| {
        let rooms = count(&inputs.accommodation_counts, &accommodation.id);
        let extra_beds = count(&inputs.extra_bed_counts, &accommodation.id);
        if rooms == 0 && extra_beds == 0 {
            return None;
        }

        Some(AccommodationBreakdown {
            accommodation_id: accommodation.id,
            name: accommodation.name.clone(),
            rooms,
            extra_beds,
            price_per_night: accommodation.price_per_night,
            room_cost: accommodation.price_per_night * Decimal::from(rooms) * nights,
            extra_bed_cost: FIXED_EXTRA_BED_PRICE * Decimal::from(extra_beds) * nights,
        })
    });

    let mut unlisted: Vec<(Uuid, u32)> = inputs
        .extra_bed_counts
        .iter()
        .filter(|(id, beds)| **beds > 0 && catalog.accommodation(**id).is_none())
        .map(|(id, beds)| (*id, *beds))
        .collect();
    unlisted.sort();

    let unlisted = unlisted.into_iter().map(|(id, extra_beds)| AccommodationBreakdown {
        accommodation_id: id,
        name: UNLISTED_ACCOMMODATION.to_string(),
        rooms: 0,
        extra_beds,
        price_per_night: Decimal::ZERO,
        room_cost: Decimal::ZERO,
        extra_bed_cost: FIXED_EXTRA_BED_PRICE * Decimal::from(extra_beds) * nights,
    });

    listed.chain(unlisted).collect()
}

/// Calculate the itemized cost of a registration.
///
/// The children discount is the only discount: adult, teacher,
/// accommodation, extra-bed and venue charges are never reduced. Nights
/// multiply room and extra-bed charges only. Unknown ids contribute nothing,
/// except extra beds, which are billed at the flat rate wherever they go.
pub fn calculate(inputs: &CostInputs, catalog: &PricingCatalog) -> CostCalculationSummary {
    let package_breakdown = price_packages(inputs, catalog);

    let adult_cost: Decimal = package_breakdown.iter().map(|p| p.adult_cost).sum();
    let children_cost: Decimal = package_breakdown.iter().map(|p| p.children_cost).sum();
    let teacher_cost: Decimal = package_breakdown.iter().map(|p| p.teacher_cost).sum();
    let free_teachers_count = package_breakdown
        .iter()
        .map(|p| p.free_teachers)
        .fold(0, u32::saturating_add);

    let discount_percentage = inputs
        .discount_percentage
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let children_discount_amount = children_cost * discount_percentage / Decimal::ONE_HUNDRED;

    let accommodation_breakdown = price_accommodations(inputs, catalog);
    let accommodation_cost: Decimal = accommodation_breakdown.iter().map(|a| a.room_cost).sum();
    let extra_bed_cost: Decimal = accommodation_breakdown
        .iter()
        .map(|a| a.extra_bed_cost)
        .sum();

    let mut venue_ids: Vec<Uuid> = inputs.selected_venues.iter().copied().collect();
    venue_ids.sort();
    let venue_breakdown: Vec<VenueBreakdown> = venue_ids
        .iter()
        .filter_map(|id| catalog.venue(*id))
        .map(|venue| VenueBreakdown {
            venue_id: venue.id,
            name: venue.name.clone(),
            price: venue.price,
        })
        .collect();
    let venue_cost: Decimal = venue_breakdown.iter().map(|v| v.price).sum();

    let subtotal = adult_cost
        + children_cost
        + teacher_cost
        + accommodation_cost
        + extra_bed_cost
        + venue_cost;
    let final_total = adult_cost
        + (children_cost - children_discount_amount)
        + teacher_cost
        + accommodation_cost
        + extra_bed_cost
        + venue_cost;

    CostCalculationSummary {
        adult_cost,
        children_cost,
        children_discount_amount,
        teacher_cost,
        accommodation_cost,
        extra_bed_cost,
        venue_cost,
        subtotal,
        final_total,
        down_payment: inputs.down_payment,
        remaining_balance: remaining_balance(final_total, inputs.down_payment),
        free_teachers_count,
        discount_percentage,
        nights: inputs.nights.get(),
        package_breakdown,
        accommodation_breakdown,
        venue_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::allocator::ParticipantCounts;
    use crate::costing::models::{Accommodation, Package, Venue};

    fn package(name: &str, adult: Decimal, child: Decimal, teacher: Decimal) -> Package {
        Package {
            id: Uuid::new_v4(),
            name: name.to_string(),
            package_type: None,
            price_per_adult: adult,
            price_per_child: child,
            price_per_teacher: teacher,
        }
    }

    fn accommodation(name: &str, price_per_night: Decimal) -> Accommodation {
        Accommodation {
            id: Uuid::new_v4(),
            name: name.to_string(),
            accommodation_type: None,
            price_per_night,
            capacity: 4,
        }
    }

    fn venue(name: &str, price: Decimal) -> Venue {
        Venue {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price,
            capacity: 100,
            features: vec![],
        }
    }

    fn with_package(package: &Package, counts: ParticipantCounts) -> CostInputs {
        CostInputs {
            selected_packages: vec![package.id],
            package_participants: HashMap::from([(package.id, counts)]),
            ..Default::default()
        }
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(4.5), 0), dec!(4));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
    }

    // ==================== nights tests ====================

    #[test]
    fn test_nights_count_is_at_least_one() {
        assert_eq!(NightsCount::new(0).get(), 1);
        assert_eq!(NightsCount::new(3).get(), 3);
        assert_eq!(NightsCount::default().get(), 1);
    }

    // ==================== package tests ====================

    #[test]
    fn test_standard_package_with_children_discount() {
        let agro_junior = package("Agro Junior", dec!(85000), dec!(50000), dec!(40000));
        let catalog = PricingCatalog::new(vec![agro_junior.clone()], vec![], vec![]);
        let mut inputs = with_package(&agro_junior, ParticipantCounts::new(10, 5, 0, 0));
        inputs.discount_percentage = dec!(20);

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.adult_cost, dec!(1000000));
        assert_eq!(summary.children_cost, dec!(250000));
        assert_eq!(summary.children_discount_amount, dec!(50000));
        assert_eq!(summary.teacher_cost, dec!(0));
        assert_eq!(summary.subtotal, dec!(1250000));
        assert_eq!(summary.final_total, dec!(1200000));
    }

    #[test]
    fn test_standard_package_overrides_adult_and_teacher_prices() {
        let p = package("Paket Petik Buah", dec!(75000), dec!(35000), dec!(20000));
        let catalog = PricingCatalog::new(vec![p.clone()], vec![], vec![]);
        let inputs = with_package(&p, ParticipantCounts::new(1, 1, 1, 0));

        let summary = calculate(&inputs, &catalog);
        let row = &summary.package_breakdown[0];

        assert_eq!(row.tier, PackageTier::Standard);
        assert_eq!(row.adult_price, STANDARD_ADULT_PRICE);
        assert_eq!(row.teacher_price, STANDARD_TEACHER_PRICE);
        assert_eq!(row.child_price, dec!(35000));
        assert_eq!(summary.teacher_cost, dec!(50000));
    }

    #[test]
    fn test_senior_package_uses_catalog_prices() {
        let p = package("Paket Lansia", dec!(75000), dec!(35000), dec!(20000));
        let catalog = PricingCatalog::new(vec![p.clone()], vec![], vec![]);
        let inputs = with_package(&p, ParticipantCounts::new(4, 0, 2, 0));

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.adult_cost, dec!(300000));
        assert_eq!(summary.teacher_cost, dec!(40000));
        assert_eq!(summary.package_breakdown[0].tier, PackageTier::Senior);
    }

    #[test]
    fn test_free_teachers_are_counted_not_charged() {
        let p = package("Agro Junior", dec!(85000), dec!(50000), dec!(40000));
        let catalog = PricingCatalog::new(vec![p.clone()], vec![], vec![]);
        let inputs = with_package(&p, ParticipantCounts::new(0, 0, 1, 3));

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.free_teachers_count, 3);
        assert_eq!(summary.final_total, dec!(50000));
        assert_eq!(summary.package_breakdown[0].free_teachers, 3);
    }

    #[test]
    fn test_multiple_packages_accumulate() {
        let a = package("Agro Junior", dec!(0), dec!(50000), dec!(0));
        let b = package("Edukasi Sawah", dec!(0), dec!(30000), dec!(0));
        let catalog = PricingCatalog::new(vec![a.clone(), b.clone()], vec![], vec![]);
        let inputs = CostInputs {
            selected_packages: vec![a.id, b.id],
            package_participants: HashMap::from([
                (a.id, ParticipantCounts::new(2, 4, 0, 0)),
                (b.id, ParticipantCounts::new(1, 10, 1, 1)),
            ]),
            ..Default::default()
        };

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.package_breakdown.len(), 2);
        assert_eq!(summary.package_breakdown[0].package_id, a.id);
        assert_eq!(summary.adult_cost, dec!(300000));
        assert_eq!(summary.children_cost, dec!(500000));
        assert_eq!(summary.teacher_cost, dec!(50000));
        assert_eq!(summary.package_breakdown[1].subtotal, dec!(450000));
    }

    #[test]
    fn test_unselected_and_unknown_packages_are_skipped() {
        let a = package("Agro Junior", dec!(0), dec!(50000), dec!(0));
        let b = package("Edukasi Sawah", dec!(0), dec!(30000), dec!(0));
        let unknown = Uuid::new_v4();
        let catalog = PricingCatalog::new(vec![a.clone(), b.clone()], vec![], vec![]);
        let inputs = CostInputs {
            // b has no allocation record, `unknown` is not in the catalog
            selected_packages: vec![a.id, b.id, unknown, a.id],
            package_participants: HashMap::from([
                (a.id, ParticipantCounts::new(1, 0, 0, 0)),
                (unknown, ParticipantCounts::new(5, 5, 5, 5)),
            ]),
            ..Default::default()
        };

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.package_breakdown.len(), 1);
        assert_eq!(summary.final_total, dec!(100000));
    }

    // ==================== discount tests ====================

    #[test]
    fn test_discount_applies_only_to_children() {
        let p = package("Agro Junior", dec!(0), dec!(50000), dec!(0));
        let room = accommodation("Homestay", dec!(500000));
        let hall = venue("Pendopo", dec!(1000000));
        let catalog = PricingCatalog::new(vec![p.clone()], vec![room.clone()], vec![hall.clone()]);
        let mut inputs = with_package(&p, ParticipantCounts::new(3, 2, 1, 0));
        inputs.accommodation_counts = HashMap::from([(room.id, 1)]);
        inputs.extra_bed_counts = HashMap::from([(room.id, 1)]);
        inputs.selected_venues = HashSet::from([hall.id]);
        inputs.discount_percentage = dec!(50);

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.children_discount_amount, dec!(50000));
        assert_eq!(summary.subtotal - summary.final_total, dec!(50000));
        assert_eq!(summary.adult_cost, dec!(300000));
        assert_eq!(summary.teacher_cost, dec!(50000));
        assert_eq!(summary.accommodation_cost, dec!(500000));
        assert_eq!(summary.extra_bed_cost, dec!(160000));
        assert_eq!(summary.venue_cost, dec!(1000000));
    }

    #[test]
    fn test_discount_without_children_changes_nothing() {
        let p = package("Agro Junior", dec!(0), dec!(50000), dec!(0));
        let catalog = PricingCatalog::new(vec![p.clone()], vec![], vec![]);
        let mut inputs = with_package(&p, ParticipantCounts::new(4, 0, 0, 0));
        inputs.discount_percentage = dec!(30);

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.children_discount_amount, dec!(0));
        assert_eq!(summary.final_total, summary.subtotal);
    }

    #[test]
    fn test_discount_is_exact() {
        let p = package("Agro Junior", dec!(0), dec!(33333), dec!(0));
        let catalog = PricingCatalog::new(vec![p.clone()], vec![], vec![]);
        let mut inputs = with_package(&p, ParticipantCounts::new(0, 1, 0, 0));
        inputs.discount_percentage = dec!(15);

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.children_discount_amount, dec!(4999.95));
        assert_eq!(summary.final_total, dec!(28333.05));
    }

    #[test]
    fn test_discount_outside_range_is_clamped() {
        let p = package("Agro Junior", dec!(0), dec!(50000), dec!(0));
        let catalog = PricingCatalog::new(vec![p.clone()], vec![], vec![]);
        let mut inputs = with_package(&p, ParticipantCounts::new(0, 2, 0, 0));
        inputs.discount_percentage = dec!(250);

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.discount_percentage, dec!(100));
        assert_eq!(summary.final_total, dec!(0));
    }

    // ==================== accommodation tests ====================

    #[test]
    fn test_rooms_and_extra_beds_over_nights() {
        let room = accommodation("Villa", dec!(500000));
        let catalog = PricingCatalog::new(vec![], vec![room.clone()], vec![]);
        let inputs = CostInputs {
            accommodation_counts: HashMap::from([(room.id, 2)]),
            extra_bed_counts: HashMap::from([(room.id, 1)]),
            nights: NightsCount::new(3),
            ..Default::default()
        };

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.accommodation_cost, dec!(3000000));
        assert_eq!(summary.extra_bed_cost, dec!(480000));
        assert_eq!(summary.accommodation_breakdown.len(), 1);
        assert_eq!(summary.accommodation_breakdown[0].room_cost, dec!(3000000));
        assert_eq!(summary.accommodation_breakdown[0].extra_bed_cost, dec!(480000));
    }

    #[test]
    fn test_doubling_nights_doubles_only_per_night_costs() {
        let p = package("Agro Junior", dec!(0), dec!(50000), dec!(0));
        let room = accommodation("Villa", dec!(350000));
        let hall = venue("Aula", dec!(750000));
        let catalog = PricingCatalog::new(vec![p.clone()], vec![room.clone()], vec![hall.clone()]);
        let mut inputs = with_package(&p, ParticipantCounts::new(2, 3, 1, 0));
        inputs.accommodation_counts = HashMap::from([(room.id, 3)]);
        inputs.extra_bed_counts = HashMap::from([(room.id, 2)]);
        inputs.selected_venues = HashSet::from([hall.id]);
        inputs.nights = NightsCount::new(2);

        let short = calculate(&inputs, &catalog);
        inputs.nights = NightsCount::new(4);
        let long = calculate(&inputs, &catalog);

        assert_eq!(long.accommodation_cost, short.accommodation_cost * dec!(2));
        assert_eq!(long.extra_bed_cost, short.extra_bed_cost * dec!(2));
        assert_eq!(long.venue_cost, short.venue_cost);
        assert_eq!(long.adult_cost, short.adult_cost);
        assert_eq!(long.children_cost, short.children_cost);
        assert_eq!(long.teacher_cost, short.teacher_cost);
    }

    #[test]
    fn test_unknown_accommodation_contributes_zero() {
        let room = accommodation("Villa", dec!(500000));
        let catalog = PricingCatalog::new(vec![], vec![room.clone()], vec![]);
        let inputs = CostInputs {
            accommodation_counts: HashMap::from([(room.id, 1), (Uuid::new_v4(), 5)]),
            ..Default::default()
        };

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.accommodation_cost, dec!(500000));
    }

    #[test]
    fn test_extra_bed_price_is_independent_of_room() {
        let cheap = accommodation("Tenda", dec!(100000));
        let fancy = accommodation("Villa", dec!(900000));
        let catalog = PricingCatalog::new(vec![], vec![cheap.clone(), fancy.clone()], vec![]);
        let inputs = CostInputs {
            extra_bed_counts: HashMap::from([(cheap.id, 1), (fancy.id, 1)]),
            ..Default::default()
        };

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.extra_bed_cost, FIXED_EXTRA_BED_PRICE * dec!(2));
        assert_eq!(summary.accommodation_cost, dec!(0));
    }

    #[test]
    fn test_extra_beds_for_unknown_rooms_get_their_own_rows() {
        let room = accommodation("Villa", dec!(500000));
        let catalog = PricingCatalog::new(vec![], vec![room.clone()], vec![]);
        let unknown = Uuid::new_v4();
        let inputs = CostInputs {
            accommodation_counts: HashMap::from([(room.id, 1), (unknown, 4)]),
            extra_bed_counts: HashMap::from([(room.id, 1), (unknown, 2)]),
            nights: NightsCount::new(2),
            ..Default::default()
        };

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.accommodation_breakdown.len(), 2);
        let unlisted = &summary.accommodation_breakdown[1];
        assert_eq!(unlisted.accommodation_id, unknown);
        assert_eq!(unlisted.name, UNLISTED_ACCOMMODATION);
        assert_eq!(unlisted.rooms, 0);
        assert_eq!(unlisted.room_cost, dec!(0));
        assert_eq!(unlisted.extra_bed_cost, dec!(640000));

        assert_eq!(summary.accommodation_cost, dec!(1000000));
        assert_eq!(summary.extra_bed_cost, dec!(960000));
        let rows: Decimal = summary
            .accommodation_breakdown
            .iter()
            .map(|a| a.room_cost + a.extra_bed_cost)
            .sum();
        assert_eq!(rows, summary.accommodation_cost + summary.extra_bed_cost);
    }

    #[test]
    fn test_extra_bed_counts_at_u32_max_do_not_wrap() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let inputs = CostInputs {
            extra_bed_counts: HashMap::from([(a, u32::MAX), (b, 2)]),
            ..Default::default()
        };

        let summary = calculate(&inputs, &PricingCatalog::default());

        let beds = Decimal::from(u64::from(u32::MAX) + 2);
        assert_eq!(summary.extra_bed_cost, FIXED_EXTRA_BED_PRICE * beds);
        assert_eq!(summary.final_total, summary.extra_bed_cost);
    }

    #[test]
    fn test_participant_counts_at_u32_max() {
        let a = package("Paket Lansia", dec!(75000), dec!(35000), dec!(20000));
        let b = package("Lansia Sehat", dec!(75000), dec!(35000), dec!(20000));
        let catalog = PricingCatalog::new(vec![a.clone(), b.clone()], vec![], vec![]);
        let max = ParticipantCounts::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX);
        let inputs = CostInputs {
            selected_packages: vec![a.id, b.id],
            package_participants: HashMap::from([(a.id, max), (b.id, max)]),
            discount_percentage: dec!(10),
            ..Default::default()
        };

        let summary = calculate(&inputs, &catalog);

        let twice_max = Decimal::from(u64::from(u32::MAX) * 2);
        assert_eq!(summary.adult_cost, dec!(75000) * twice_max);
        assert_eq!(summary.children_cost, dec!(35000) * twice_max);
        assert_eq!(summary.free_teachers_count, u32::MAX);
    }

    // ==================== venue tests ====================

    #[test]
    fn test_venue_is_flat_fee() {
        let hall = venue("Pendopo", dec!(1500000));
        let catalog = PricingCatalog::new(vec![], vec![], vec![hall.clone()]);
        let mut selected = HashSet::new();
        selected.insert(hall.id);
        selected.insert(hall.id);
        let inputs = CostInputs {
            selected_venues: selected,
            nights: NightsCount::new(5),
            ..Default::default()
        };

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.venue_cost, dec!(1500000));
        assert_eq!(summary.venue_breakdown.len(), 1);
    }

    #[test]
    fn test_unknown_venue_contributes_zero() {
        let catalog = PricingCatalog::default();
        let inputs = CostInputs {
            selected_venues: HashSet::from([Uuid::new_v4()]),
            ..Default::default()
        };

        let summary = calculate(&inputs, &catalog);

        assert_eq!(summary.venue_cost, dec!(0));
        assert_eq!(summary.final_total, dec!(0));
    }

    // ==================== balance tests ====================

    #[test]
    fn test_remaining_balance() {
        assert_eq!(remaining_balance(dec!(1680000), dec!(500000)), dec!(1180000));
        assert_eq!(remaining_balance(dec!(100000), dec!(250000)), dec!(-150000));
    }

    #[test]
    fn test_summary_carries_down_payment() {
        let room = accommodation("Villa", dec!(500000));
        let catalog = PricingCatalog::new(vec![], vec![room.clone()], vec![]);
        let inputs = CostInputs {
            accommodation_counts: HashMap::from([(room.id, 2)]),
            extra_bed_counts: HashMap::from([(room.id, 1)]),
            down_payment: dec!(500000),
            ..Default::default()
        };

        let summary = calculate(&inputs, &catalog);

        // 2 * 500000 + 160000
        assert_eq!(summary.final_total, dec!(1160000));
        assert_eq!(summary.remaining_balance, dec!(660000));
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        let summary = calculate(&CostInputs::default(), &PricingCatalog::default());

        assert_eq!(summary.subtotal, dec!(0));
        assert_eq!(summary.final_total, dec!(0));
        assert_eq!(summary.nights, 1);
        assert!(summary.package_breakdown.is_empty());
    }
}
