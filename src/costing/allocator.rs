//! Participant allocation across selected packages.
//!
//! A booking declares how many adults, children, teachers and free teachers
//! attend. The allocator tracks how those participants are spread over the
//! selected packages and refuses any increase that would allocate more
//! participants of a category than the booking declares.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Participant category on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantCategory {
    Adult,
    Child,
    Teacher,
    FreeTeacher,
}

impl ParticipantCategory {
    pub const ALL: [ParticipantCategory; 4] = [
        ParticipantCategory::Adult,
        ParticipantCategory::Child,
        ParticipantCategory::Teacher,
        ParticipantCategory::FreeTeacher,
    ];
}

/// Head count per participant category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantCounts {
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub teachers: u32,
    #[serde(default)]
    pub free_teachers: u32,
}

impl ParticipantCounts {
    pub fn new(adults: u32, children: u32, teachers: u32, free_teachers: u32) -> Self {
        Self {
            adults,
            children,
            teachers,
            free_teachers,
        }
    }

    pub fn get(&self, category: ParticipantCategory) -> u32 {
        match category {
            ParticipantCategory::Adult => self.adults,
            ParticipantCategory::Child => self.children,
            ParticipantCategory::Teacher => self.teachers,
            ParticipantCategory::FreeTeacher => self.free_teachers,
        }
    }

    pub fn set(&mut self, category: ParticipantCategory, count: u32) {
        match category {
            ParticipantCategory::Adult => self.adults = count,
            ParticipantCategory::Child => self.children = count,
            ParticipantCategory::Teacher => self.teachers = count,
            ParticipantCategory::FreeTeacher => self.free_teachers = count,
        }
    }

    pub fn is_empty(&self) -> bool {
        ParticipantCategory::ALL.iter().all(|c| self.get(*c) == 0)
    }
}

/// Per-package participant allocation, keyed by package id.
pub type PackageParticipants = HashMap<Uuid, ParticipantCounts>;

/// Result of a `set_participants` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationOutcome {
    Applied,
    /// The increase would exceed the booking total; state is unchanged.
    Refused,
}

/// Serializable allocator state, as held by a registration form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocatorSnapshot {
    #[serde(default)]
    pub totals: ParticipantCounts,
    #[serde(default)]
    pub selected_packages: Vec<Uuid>,
    #[serde(default)]
    pub allocations: PackageParticipants,
}

/// Allocation state owned by a single registration session.
///
/// Invariant: for every category, the sum over selected packages never
/// exceeds the booking total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantAllocator {
    totals: ParticipantCounts,
    selected: Vec<Uuid>,
    allocations: PackageParticipants,
}

impl ParticipantAllocator {
    pub fn new(totals: ParticipantCounts) -> Self {
        Self {
            totals,
            selected: Vec::new(),
            allocations: HashMap::new(),
        }
    }

    /// Rebuild an allocator from untrusted state.
    ///
    /// Every selection and count is replayed through the normal operations,
    /// so allocations that would break the invariant are clamped on select
    /// or refused on set, exactly as the live form would have done.
    pub fn from_snapshot(snapshot: &AllocatorSnapshot) -> Self {
        let mut allocator = Self::new(snapshot.totals);

        // Unselected packages keep their counts too; store those first.
        for (package_id, counts) in &snapshot.allocations {
            if !snapshot.selected_packages.contains(package_id) {
                allocator.allocations.insert(*package_id, *counts);
            }
        }

        for package_id in &snapshot.selected_packages {
            allocator.select_package(*package_id);
            if let Some(counts) = snapshot.allocations.get(package_id) {
                for category in ParticipantCategory::ALL {
                    allocator.set_participants(*package_id, category, counts.get(category));
                }
            }
        }

        allocator
    }

    pub fn snapshot(&self) -> AllocatorSnapshot {
        AllocatorSnapshot {
            totals: self.totals,
            selected_packages: self.selected.clone(),
            allocations: self.allocations.clone(),
        }
    }

    pub fn totals(&self) -> ParticipantCounts {
        self.totals
    }

    pub fn selected_packages(&self) -> &[Uuid] {
        &self.selected
    }

    pub fn is_selected(&self, package_id: Uuid) -> bool {
        self.selected.contains(&package_id)
    }

    /// Stored allocation for a package, selected or not.
    pub fn allocation(&self, package_id: Uuid) -> ParticipantCounts {
        self.allocations.get(&package_id).copied().unwrap_or_default()
    }

    /// Allocations of the currently selected packages only.
    pub fn selected_allocations(&self) -> PackageParticipants {
        self.selected
            .iter()
            .filter_map(|id| self.allocations.get(id).map(|counts| (*id, *counts)))
            .collect()
    }

    /// Sum of a category over selected packages, optionally leaving one out.
    fn allocated(&self, category: ParticipantCategory, excluding: Option<Uuid>) -> u32 {
        self.selected
            .iter()
            .filter(|id| Some(**id) != excluding)
            .map(|id| self.allocation(*id).get(category))
            .fold(0, u32::saturating_add)
    }

    /// Participants of a category not yet assigned to a selected package.
    pub fn remaining(&self, category: ParticipantCategory) -> u32 {
        let allocated = self.allocated(category, None);
        debug_assert!(allocated <= self.totals.get(category));
        self.totals.get(category).saturating_sub(allocated)
    }

    pub fn remaining_counts(&self) -> ParticipantCounts {
        let mut counts = ParticipantCounts::default();
        for category in ParticipantCategory::ALL {
            counts.set(category, self.remaining(category));
        }
        counts
    }

    /// Assign `count` participants of `category` to a package.
    ///
    /// Decreases always apply. An increase is refused, leaving state
    /// untouched, when it would push the category's allocation across
    /// selected packages above the booking total.
    pub fn set_participants(
        &mut self,
        package_id: Uuid,
        category: ParticipantCategory,
        count: u32,
    ) -> AllocationOutcome {
        let current = self.allocation(package_id).get(category);

        if count > current {
            let elsewhere = self.allocated(category, Some(package_id));
            if count > self.totals.get(category).saturating_sub(elsewhere) {
                debug!(
                    %package_id,
                    ?category,
                    count,
                    remaining = self.remaining(category),
                    "Refused participant allocation above booking total"
                );
                return AllocationOutcome::Refused;
            }
        }

        self.allocations
            .entry(package_id)
            .or_default()
            .set(category, count);
        AllocationOutcome::Applied
    }

    /// Select a package, restoring any allocation it held before.
    ///
    /// Restored counts are clamped to what is still unallocated.
    pub fn select_package(&mut self, package_id: Uuid) {
        if self.is_selected(package_id) {
            return;
        }

        if let Some(mut counts) = self.allocations.get(&package_id).copied() {
            for category in ParticipantCategory::ALL {
                let available = self.remaining(category);
                if counts.get(category) > available {
                    counts.set(category, available);
                }
            }
            self.allocations.insert(package_id, counts);
        }

        self.selected.push(package_id);
    }

    /// Deselect a package. Its stored allocation is kept.
    pub fn deselect_package(&mut self, package_id: Uuid) {
        self.selected.retain(|id| *id != package_id);
    }

    /// Change the booking totals.
    ///
    /// When a total shrinks below what is allocated, the excess is taken
    /// back from the most recently selected packages first.
    pub fn set_totals(&mut self, totals: ParticipantCounts) {
        self.totals = totals;

        for category in ParticipantCategory::ALL {
            let mut excess = self
                .allocated(category, None)
                .saturating_sub(totals.get(category));

            for package_id in self.selected.iter().rev() {
                if excess == 0 {
                    break;
                }
                let counts = self.allocations.entry(*package_id).or_default();
                let taken = counts.get(category).min(excess);
                counts.set(category, counts.get(category) - taken);
                excess -= taken;
            }
        }
    }
}
