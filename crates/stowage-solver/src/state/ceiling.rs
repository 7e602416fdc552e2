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

use crate::state::plan::StowagePlan;
use stowage_model::prelude::SlotCoord;

/// Per (bay, row) column: the highest occupied tier index, counting both
/// primary and marker cells. Derived from a plan snapshot and thrown away
/// when the plan changes; it is never updated incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CeilingTable {
    rows: usize,
    highest: Vec<Option<usize>>,
}

impl CeilingTable {
    pub fn from_plan(plan: &StowagePlan) -> Self {
        let shape = plan.shape();
        let mut highest = vec![None; shape.bays * shape.rows];
        for coord in plan.iter_occupied() {
            let slot = &mut highest[coord.bay * shape.rows + coord.row];
            *slot = Some(slot.map_or(coord.tier, |t: usize| t.max(coord.tier)));
        }
        Self {
            rows: shape.rows,
            highest,
        }
    }

    /// Highest occupied tier index of the column, or `None` for an empty
    /// column.
    #[inline]
    pub fn highest_occupied_tier(&self, bay: usize, row: usize) -> Option<usize> {
        self.highest[bay * self.rows + row]
    }

    /// Whether an under-deck slot at this coordinate may receive a
    /// container: the column must be empty, or the slot strictly below
    /// the column's highest occupied cell. Nothing is stacked on top of
    /// or floated above an existing under-deck stack.
    #[inline]
    pub fn admits_under_deck(&self, coord: SlotCoord) -> bool {
        match self.highest_occupied_tier(coord.bay, coord.row) {
            None => true,
            Some(top) => coord.tier < top,
        }
    }
}
