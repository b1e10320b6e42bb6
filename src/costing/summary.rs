//! Display line items for a cost summary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculators::{round_money, CostCalculationSummary, FIXED_EXTRA_BED_PRICE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Charge,
    Discount,
    Total,
    Balance,
}

impl LineKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            LineKind::Charge => "charge",
            LineKind::Discount => "discount",
            LineKind::Total => "total",
            LineKind::Balance => "balance",
        }
    }
}

/// One display row of a cost summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub label: String,
    pub detail: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub kind: LineKind,
}

impl SummaryLine {
    fn new(label: impl Into<String>, detail: impl Into<String>, amount: Decimal, kind: LineKind) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
            amount,
            kind,
        }
    }

    /// Amount rendered as Rupiah.
    pub fn formatted_amount(&self) -> String {
        format_rupiah(self.amount)
    }
}

/// Format an amount as Rupiah, e.g. `Rp 1.250.000`.
///
/// Rupiah has no minor unit in practice, so the amount is rounded to whole
/// units with banker's rounding.
pub fn format_rupiah(amount: Decimal) -> String {
    let rounded = round_money(amount, 0);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

fn unit_detail(count: u32, unit_price: Decimal) -> String {
    format!("{} x {}", count, format_rupiah(unit_price))
}

/// Convert a summary into ordered display lines.
///
/// Zero-count participant categories and empty sections are omitted. Free
/// teachers are listed with a zero amount so the head count stays visible.
pub fn summary_lines(summary: &CostCalculationSummary) -> Vec<SummaryLine> {
    let mut lines = Vec::new();

    for package in &summary.package_breakdown {
        let name = &package.package_name;
        if package.adults > 0 {
            lines.push(SummaryLine::new(
                format!("{} - Adults", name),
                unit_detail(package.adults, package.adult_price),
                package.adult_cost,
                LineKind::Charge,
            ));
        }
        if package.children > 0 {
            lines.push(SummaryLine::new(
                format!("{} - Children", name),
                unit_detail(package.children, package.child_price),
                package.children_cost,
                LineKind::Charge,
            ));
        }
        if package.teachers > 0 {
            lines.push(SummaryLine::new(
                format!("{} - Teachers", name),
                unit_detail(package.teachers, package.teacher_price),
                package.teacher_cost,
                LineKind::Charge,
            ));
        }
        if package.free_teachers > 0 {
            lines.push(SummaryLine::new(
                format!("{} - Free teachers", name),
                format!("{} x free", package.free_teachers),
                Decimal::ZERO,
                LineKind::Charge,
            ));
        }
    }

    for room in &summary.accommodation_breakdown {
        if room.rooms > 0 {
            lines.push(SummaryLine::new(
                room.name.clone(),
                format!(
                    "{} room(s) x {} x {} night(s)",
                    room.rooms,
                    format_rupiah(room.price_per_night),
                    summary.nights
                ),
                room.room_cost,
                LineKind::Charge,
            ));
        }
    }

    let beds: u64 = summary
        .accommodation_breakdown
        .iter()
        .map(|room| u64::from(room.extra_beds))
        .sum();
    if beds > 0 {
        lines.push(SummaryLine::new(
            "Extra beds",
            format!(
                "{} bed(s) x {} x {} night(s)",
                beds,
                format_rupiah(FIXED_EXTRA_BED_PRICE),
                summary.nights
            ),
            summary.extra_bed_cost,
            LineKind::Charge,
        ));
    }

    for venue in &summary.venue_breakdown {
        lines.push(SummaryLine::new(
            venue.name.clone(),
            "Venue",
            venue.price,
            LineKind::Charge,
        ));
    }

    if summary.children_discount_amount > Decimal::ZERO {
        lines.push(SummaryLine::new(
            "Children discount",
            format!("{}%", summary.discount_percentage.normalize()),
            -summary.children_discount_amount,
            LineKind::Discount,
        ));
    }

    lines.push(SummaryLine::new("Subtotal", "", summary.subtotal, LineKind::Total));
    lines.push(SummaryLine::new("Total", "", summary.final_total, LineKind::Total));

    if summary.down_payment != Decimal::ZERO {
        lines.push(SummaryLine::new(
            "Down payment",
            "",
            summary.down_payment,
            LineKind::Balance,
        ));
        lines.push(SummaryLine::new(
            "Remaining balance",
            "",
            summary.remaining_balance,
            LineKind::Balance,
        ));
    }

    lines
}
