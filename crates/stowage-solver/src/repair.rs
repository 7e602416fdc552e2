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

use crate::state::ceiling::CeilingTable;
use crate::state::plan::StowagePlan;
use stowage_model::prelude::{ContainerIndex, ContainerRegistry, SizeClass, SlotCoord, VesselGeometry};

/// The legal plan produced by one repair pass.
///
/// `dropped` counts 20-foot containers that were present in the input but
/// did not fit into any eligible slot. Dropping instead of failing is the
/// intended overload behavior; the count makes the loss observable.
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    pub plan: StowagePlan,
    pub dropped: usize,
}

/// Maps an arbitrary candidate plan back onto a legal one.
///
/// 40-foot placements are taken as fixed wherever the input put them.
/// Every 20-foot container found anywhere in the input is reassigned from
/// scratch: heaviest container into the lowest eligible slot. The result
/// satisfies all plan invariants and the under-deck ceiling rule, and is
/// deterministic for a given input plan, geometry and container weights.
#[derive(Debug, Clone, Copy)]
pub struct RepairEngine<'a> {
    geometry: &'a VesselGeometry,
    registry: &'a ContainerRegistry,
}

impl<'a> RepairEngine<'a> {
    #[inline]
    pub fn new(geometry: &'a VesselGeometry, registry: &'a ContainerRegistry) -> Self {
        Self { geometry, registry }
    }

    pub fn repair(&self, plan: &StowagePlan) -> RepairOutcome {
        let mut repaired = StowagePlan::empty(plan.shape());

        // 40-foot placements are never moved: re-pin each one at its
        // current coordinate and rebuild its marker cell.
        for (coord, idx) in plan.iter_primary() {
            if self.registry.get(idx).size() == SizeClass::Forty {
                repaired.place_forty(coord, idx);
            }
        }

        let ceilings = CeilingTable::from_plan(&repaired);

        // Every 20-foot container in the input is reassigned, regardless
        // of how legal its previous position was.
        let mut twenty: Vec<ContainerIndex> = plan
            .iter_primary()
            .filter(|&(_, idx)| self.registry.get(idx).size() == SizeClass::Twenty)
            .map(|(_, idx)| idx)
            .collect();
        twenty.sort_by(|&a, &b| {
            self.registry
                .get(b)
                .weight()
                .kilograms()
                .total_cmp(&self.registry.get(a).weight().kilograms())
        });

        let slots = self.eligible_twenty_slots(&repaired, &ceilings);
        let placed = twenty.len().min(slots.len());
        for i in 0..placed {
            repaired.place_twenty(slots[i], twenty[i]);
        }

        let dropped = twenty.len() - placed;
        if dropped > 0 {
            tracing::warn!(
                dropped,
                eligible = slots.len(),
                "not every 20ft container fits an eligible slot"
            );
        }

        RepairOutcome {
            plan: repaired,
            dropped,
        }
    }

    /// All unoccupied valid 20-foot slots that may receive a container
    /// given the current occupancy, lowest vcg first. On-deck slots are
    /// always admissible; under-deck slots obey the column ceiling rule.
    pub fn eligible_twenty_slots(
        &self,
        plan: &StowagePlan,
        ceilings: &CeilingTable,
    ) -> Vec<SlotCoord> {
        let mut slots: Vec<(SlotCoord, f64)> = self
            .geometry
            .iter_twenty_slots()
            .filter(|&(coord, _)| !plan.is_occupied(coord))
            .filter(|&(coord, _)| {
                !self.geometry.tier_index_under_deck(coord.tier)
                    || ceilings.admits_under_deck(coord)
            })
            .map(|(coord, arms)| (coord, arms.vcg))
            .collect();
        slots.sort_by(|a, b| a.1.total_cmp(&b.1));
        slots.into_iter().map(|(coord, _)| coord).collect()
    }
}
