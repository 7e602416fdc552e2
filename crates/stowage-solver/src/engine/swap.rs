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
use rand::Rng;
use stowage_model::prelude::{ContainerIndex, ContainerRegistry, SizeClass, SlotCoord};

/// Exchanges the occupants of two uniformly chosen occupied cells.
///
/// With equal probability the swap acts on two 20-foot primaries or on two
/// 40-foot primaries (whose marker cells are re-tagged along with them).
/// Occupied coordinates never change, only which container sits where, so
/// a swapped plan is always repairable. Returns false when fewer than two
/// candidates of the drawn size exist and nothing was changed.
pub fn safe_swap<R: Rng>(
    plan: &mut StowagePlan,
    registry: &ContainerRegistry,
    rng: &mut R,
) -> bool {
    let size = if rng.random_bool(0.5) {
        SizeClass::Twenty
    } else {
        SizeClass::Forty
    };
    swap_same_size(plan, registry, size, rng)
}

fn swap_same_size<R: Rng>(
    plan: &mut StowagePlan,
    registry: &ContainerRegistry,
    size: SizeClass,
    rng: &mut R,
) -> bool {
    let cells: Vec<(SlotCoord, ContainerIndex)> = plan
        .iter_primary()
        .filter(|&(_, idx)| registry.get(idx).size() == size)
        .collect();
    if cells.len() < 2 {
        return false;
    }

    let picks = rand::seq::index::sample(rng, cells.len(), 2);
    let (first_coord, first) = cells[picks.index(0)];
    let (second_coord, second) = cells[picks.index(1)];

    plan.set(first_coord, Cell::Primary(second));
    plan.set(second_coord, Cell::Primary(first));
    if size == SizeClass::Forty {
        plan.set(first_coord.paired_bay(), Cell::SecondaryOf(second));
        plan.set(second_coord.paired_bay(), Cell::SecondaryOf(first));
    }
    true
}
