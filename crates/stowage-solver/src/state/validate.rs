// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::state::plan::{Cell, StowagePlan};
use std::collections::HashSet;
use stowage_model::prelude::{
    ContainerIndex, ContainerRegistry, SizeClass, SlotCoord, VesselGeometry,
};

/// A structural rule a plan breaks. Produced by [`validate_plan`], which
/// checks everything the repair engine guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanViolation {
    /// A container index appears in more than one primary cell.
    DuplicateContainer {
        container: ContainerIndex,
        at: SlotCoord,
    },
    /// A primary cell sits on a coordinate that is not a valid slot.
    InvalidSlot { container: ContainerIndex, at: SlotCoord },
    /// A 40-foot primary whose paired cell is missing or tagged for a
    /// different container.
    BrokenPair { container: ContainerIndex, at: SlotCoord },
    /// A marker cell with no matching 40-foot primary one bay forward.
    OrphanMarker { at: SlotCoord },
    /// An occupied under-deck 20-foot cell with an empty valid slot below
    /// it in the same column.
    FloatingUnderDeck { container: ContainerIndex, at: SlotCoord },
}

impl std::fmt::Display for PlanViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanViolation::DuplicateContainer { container, at } => {
                write!(f, "container {container} placed more than once, second at {at}")
            }
            PlanViolation::InvalidSlot { container, at } => {
                write!(f, "container {container} placed on invalid slot {at}")
            }
            PlanViolation::BrokenPair { container, at } => {
                write!(f, "40ft container {container} at {at} has no matching marker cell")
            }
            PlanViolation::OrphanMarker { at } => {
                write!(f, "marker cell at {at} has no owning 40ft placement")
            }
            PlanViolation::FloatingUnderDeck { container, at } => {
                write!(f, "container {container} at {at} floats above an empty under-deck slot")
            }
        }
    }
}

impl std::error::Error for PlanViolation {}

/// Checks every structural invariant of a stowage plan: slot validity,
/// single placement per container, 40-foot pairing, marker ownership and
/// the under-deck no-floating rule.
pub fn validate_plan(
    plan: &StowagePlan,
    geometry: &VesselGeometry,
    registry: &ContainerRegistry,
) -> Result<(), PlanViolation> {
    let shape = plan.shape();
    let mut seen: HashSet<ContainerIndex> = HashSet::new();

    for (coord, idx) in plan.iter_primary() {
        if !seen.insert(idx) {
            return Err(PlanViolation::DuplicateContainer {
                container: idx,
                at: coord,
            });
        }
        if !geometry.is_valid_twenty(coord) {
            return Err(PlanViolation::InvalidSlot {
                container: idx,
                at: coord,
            });
        }
        if registry.get(idx).size() == SizeClass::Forty {
            let paired = coord.paired_bay();
            let pair_ok = shape.contains(paired)
                && geometry.is_valid_twenty(paired)
                && plan.cell(paired) == Cell::SecondaryOf(idx);
            if !pair_ok {
                return Err(PlanViolation::BrokenPair {
                    container: idx,
                    at: coord,
                });
            }
        }
    }

    for coord in plan.iter_occupied() {
        if let Cell::SecondaryOf(idx) = plan.cell(coord) {
            if coord.bay == 0 {
                return Err(PlanViolation::OrphanMarker { at: coord });
            }
            let owner = SlotCoord::new(coord.tier, coord.bay - 1, coord.row);
            if plan.cell(owner) != Cell::Primary(idx) {
                return Err(PlanViolation::OrphanMarker { at: coord });
            }
        }
    }

    // No-floating rule: scanning each column bottom-up, once an empty
    // valid under-deck slot appears, no 20-foot container may sit above it.
    for bay in 0..shape.bays {
        for row in 0..shape.rows {
            let mut gap_below = false;
            for tier in 0..shape.tiers {
                if !geometry.tier_index_under_deck(tier) {
                    break;
                }
                let coord = SlotCoord::new(tier, bay, row);
                if !geometry.is_valid_twenty(coord) {
                    continue;
                }
                match plan.cell(coord) {
                    Cell::Empty => gap_below = true,
                    Cell::Primary(idx) => {
                        if gap_below && registry.get(idx).size() == SizeClass::Twenty {
                            return Err(PlanViolation::FloatingUnderDeck {
                                container: idx,
                                at: coord,
                            });
                        }
                    }
                    Cell::SecondaryOf(_) => {}
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use stowage_core::prelude::Weight;
    use stowage_model::cargo::container::{Container, ContainerIdentifier};
    use stowage_model::prelude::ShipProfile;

    /// Two odd bays over two under-deck tiers and one on-deck tier,
    /// single row, everything valid.
    fn geometry() -> VesselGeometry {
        let mut profile = ShipProfile::default();
        profile.bay_lcg.insert(1, -5.0);
        profile.bay_lcg.insert(3, 5.0);
        profile.tier_vcg.insert(2, 4.0);
        profile.tier_vcg.insert(4, 7.0);
        profile.tier_vcg.insert(82, 17.0);
        profile.row_tcg.insert(0, 0.0);
        for bay in [1u32, 3] {
            let mut tiers = BTreeMap::new();
            tiers.insert(2, vec![0]);
            tiers.insert(4, vec![0]);
            tiers.insert(82, vec![0]);
            profile.layout.insert(bay, tiers);
        }
        profile.allowed_forty_bays.insert(2);
        VesselGeometry::build(&profile)
    }

    fn registry() -> ContainerRegistry {
        let mut reg = ContainerRegistry::new();
        reg.insert(Container::new(
            ContainerIdentifier::new("T0".into()),
            Weight::new(2000.0),
            SizeClass::Twenty,
        ));
        reg.insert(Container::new(
            ContainerIdentifier::new("T1".into()),
            Weight::new(1000.0),
            SizeClass::Twenty,
        ));
        reg.insert(Container::new(
            ContainerIdentifier::new("F0".into()),
            Weight::new(3000.0),
            SizeClass::Forty,
        ));
        reg
    }

    fn idx(i: u32) -> ContainerIndex {
        ContainerIndex::new(i)
    }

    #[test]
    fn test_legal_plan_passes() {
        let geometry = geometry();
        let registry = registry();
        let mut plan = StowagePlan::empty(geometry.shape());
        plan.place_twenty(SlotCoord::new(0, 0, 0), idx(0));
        plan.place_forty(SlotCoord::new(1, 0, 0), idx(2));
        assert!(validate_plan(&plan, &geometry, &registry).is_ok());
    }

    #[test]
    fn test_duplicate_container_rejected() {
        let geometry = geometry();
        let registry = registry();
        let mut plan = StowagePlan::empty(geometry.shape());
        plan.place_twenty(SlotCoord::new(0, 0, 0), idx(0));
        plan.place_twenty(SlotCoord::new(0, 1, 0), idx(0));
        assert!(matches!(
            validate_plan(&plan, &geometry, &registry),
            Err(PlanViolation::DuplicateContainer { .. })
        ));
    }

    #[test]
    fn test_forty_without_marker_rejected() {
        let geometry = geometry();
        let registry = registry();
        let mut plan = StowagePlan::empty(geometry.shape());
        // Primary only, marker never written.
        plan.set(SlotCoord::new(0, 0, 0), Cell::Primary(idx(2)));
        assert!(matches!(
            validate_plan(&plan, &geometry, &registry),
            Err(PlanViolation::BrokenPair { .. })
        ));
    }

    #[test]
    fn test_orphan_marker_rejected() {
        let geometry = geometry();
        let registry = registry();
        let mut plan = StowagePlan::empty(geometry.shape());
        plan.set(SlotCoord::new(0, 1, 0), Cell::SecondaryOf(idx(2)));
        assert!(matches!(
            validate_plan(&plan, &geometry, &registry),
            Err(PlanViolation::OrphanMarker { .. })
        ));
    }

    #[test]
    fn test_floating_under_deck_rejected() {
        let geometry = geometry();
        let registry = registry();
        let mut plan = StowagePlan::empty(geometry.shape());
        // Tier index 1 occupied, tier index 0 empty: floats.
        plan.place_twenty(SlotCoord::new(1, 0, 0), idx(0));
        assert!(matches!(
            validate_plan(&plan, &geometry, &registry),
            Err(PlanViolation::FloatingUnderDeck { .. })
        ));
    }

    #[test]
    fn test_on_deck_gap_is_allowed() {
        let geometry = geometry();
        let registry = registry();
        let mut plan = StowagePlan::empty(geometry.shape());
        // Under-deck column empty, container on deck (tier index 2): fine.
        plan.place_twenty(SlotCoord::new(2, 0, 0), idx(0));
        assert!(validate_plan(&plan, &geometry, &registry).is_ok());
    }

    #[test]
    fn test_invalid_slot_rejected() {
        let mut profile = ShipProfile::default();
        profile.bay_lcg.insert(1, 0.0);
        profile.tier_vcg.insert(2, 4.0);
        profile.row_tcg.insert(0, 0.0);
        profile.row_tcg.insert(1, 2.5);
        let mut tiers = BTreeMap::new();
        tiers.insert(2, vec![0]);
        profile.layout.insert(1, tiers);
        let geometry = VesselGeometry::build(&profile);
        let registry = registry();

        let mut plan = StowagePlan::empty(geometry.shape());
        // Row 1 exists in the grid but is not a valid slot.
        plan.place_twenty(SlotCoord::new(0, 0, 1), idx(0));
        assert!(matches!(
            validate_plan(&plan, &geometry, &registry),
            Err(PlanViolation::InvalidSlot { .. })
        ));
    }
}
