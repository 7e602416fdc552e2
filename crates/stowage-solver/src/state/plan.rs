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

use stowage_model::prelude::{ContainerIndex, Grid3, GridShape, SlotCoord};

/// One grid cell of a stowage plan.
///
/// A 20-foot container occupies a single `Primary` cell. A 40-foot
/// container occupies its `Primary` cell plus the `SecondaryOf` cell one
/// bay aft at the same tier and row; the secondary cell must never be
/// assigned independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Primary(ContainerIndex),
    SecondaryOf(ContainerIndex),
}

impl Cell {
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub const fn is_occupied(&self) -> bool {
        !self.is_empty()
    }

    #[inline]
    pub const fn primary(&self) -> Option<ContainerIndex> {
        match self {
            Cell::Primary(idx) => Some(*idx),
            _ => None,
        }
    }
}

/// A candidate assignment of containers to slots. The plan does not know
/// about validity or stacking rules; the repair engine is responsible for
/// turning any plan into a legal one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StowagePlan {
    cells: Grid3<Cell>,
}

impl StowagePlan {
    #[inline]
    pub fn empty(shape: GridShape) -> Self {
        Self {
            cells: Grid3::filled(shape, Cell::Empty),
        }
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.cells.shape()
    }

    #[inline]
    pub fn cell(&self, coord: SlotCoord) -> Cell {
        self.cells.copied(coord)
    }

    #[inline]
    pub fn set(&mut self, coord: SlotCoord, cell: Cell) {
        self.cells.set(coord, cell);
    }

    #[inline]
    pub fn is_occupied(&self, coord: SlotCoord) -> bool {
        self.cells.get(coord).is_occupied()
    }

    /// Places a 20-foot container on a single cell.
    #[inline]
    pub fn place_twenty(&mut self, coord: SlotCoord, container: ContainerIndex) {
        self.cells.set(coord, Cell::Primary(container));
    }

    /// Places a 40-foot container: primary cell at `coord`, paired marker
    /// one bay aft.
    #[inline]
    pub fn place_forty(&mut self, coord: SlotCoord, container: ContainerIndex) {
        self.cells.set(coord, Cell::Primary(container));
        self.cells.set(coord.paired_bay(), Cell::SecondaryOf(container));
    }

    /// All primary cells in canonical scan order (tier, bay, row).
    pub fn iter_primary(&self) -> impl Iterator<Item = (SlotCoord, ContainerIndex)> + '_ {
        self.cells
            .enumerate()
            .filter_map(|(coord, cell)| cell.primary().map(|idx| (coord, idx)))
    }

    /// All occupied cells (primary and secondary) in canonical scan order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = SlotCoord> + '_ {
        self.cells
            .enumerate()
            .filter_map(|(coord, cell)| cell.is_occupied().then_some(coord))
    }

    #[inline]
    pub fn primary_count(&self) -> usize {
        self.iter_primary().count()
    }
}
