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

/// A cell address in the slot grid. Tier, bay and row are indices into the
/// ordered tier/bay sequences and the row range, not the painted hull
/// numbers. The derived ordering (tier, then bay, then row) is the
/// canonical scan order of the whole crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotCoord {
    pub tier: usize,
    pub bay: usize,
    pub row: usize,
}

impl SlotCoord {
    #[inline]
    pub const fn new(tier: usize, bay: usize, row: usize) -> Self {
        Self { tier, bay, row }
    }

    /// The cell one bay aft, i.e. the second half of a 40-foot placement
    /// whose first half sits at `self`.
    #[inline]
    pub const fn paired_bay(&self) -> SlotCoord {
        SlotCoord::new(self.tier, self.bay + 1, self.row)
    }
}

impl std::fmt::Display for SlotCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(t{}, b{}, r{})", self.tier, self.bay, self.row)
    }
}

/// Extent of the slot grid along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub tiers: usize,
    pub bays: usize,
    pub rows: usize,
}

impl GridShape {
    #[inline]
    pub const fn new(tiers: usize, bays: usize, rows: usize) -> Self {
        Self { tiers, bays, rows }
    }

    #[inline]
    pub const fn cell_count(&self) -> usize {
        self.tiers * self.bays * self.rows
    }

    #[inline]
    pub const fn contains(&self, c: SlotCoord) -> bool {
        c.tier < self.tiers && c.bay < self.bays && c.row < self.rows
    }

    #[inline]
    const fn offset(&self, c: SlotCoord) -> usize {
        (c.tier * self.bays + c.bay) * self.rows + c.row
    }
}

/// A dense 3-D tensor over (tier, bay, row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid3<T> {
    shape: GridShape,
    cells: Vec<T>,
}

impl<T: Clone> Grid3<T> {
    #[inline]
    pub fn filled(shape: GridShape, value: T) -> Self {
        Self {
            shape,
            cells: vec![value; shape.cell_count()],
        }
    }
}

impl<T> Grid3<T> {
    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[inline]
    pub fn get(&self, c: SlotCoord) -> &T {
        &self.cells[self.shape.offset(c)]
    }

    #[inline]
    pub fn get_mut(&mut self, c: SlotCoord) -> &mut T {
        let off = self.shape.offset(c);
        &mut self.cells[off]
    }

    #[inline]
    pub fn set(&mut self, c: SlotCoord, value: T) {
        let off = self.shape.offset(c);
        self.cells[off] = value;
    }

    /// Exchanges the contents of two cells.
    #[inline]
    pub fn swap(&mut self, a: SlotCoord, b: SlotCoord) {
        let ia = self.shape.offset(a);
        let ib = self.shape.offset(b);
        self.cells.swap(ia, ib);
    }

    /// All coordinates in canonical scan order (tier, bay, row).
    pub fn coords(&self) -> impl Iterator<Item = SlotCoord> + '_ {
        let shape = self.shape;
        (0..shape.tiers).flat_map(move |t| {
            (0..shape.bays)
                .flat_map(move |b| (0..shape.rows).map(move |r| SlotCoord::new(t, b, r)))
        })
    }

    /// All (coordinate, value) pairs in canonical scan order.
    pub fn enumerate(&self) -> impl Iterator<Item = (SlotCoord, &T)> + '_ {
        self.coords().map(move |c| (c, self.get(c)))
    }
}

impl<T: Copy> Grid3<T> {
    #[inline]
    pub fn copied(&self, c: SlotCoord) -> T {
        *self.get(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_cell_count_and_contains() {
        let shape = GridShape::new(2, 3, 4);
        assert_eq!(shape.cell_count(), 24);
        assert!(shape.contains(SlotCoord::new(1, 2, 3)));
        assert!(!shape.contains(SlotCoord::new(2, 0, 0)));
        assert!(!shape.contains(SlotCoord::new(0, 3, 0)));
        assert!(!shape.contains(SlotCoord::new(0, 0, 4)));
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut g = Grid3::filled(GridShape::new(2, 2, 2), 0_i32);
        g.set(SlotCoord::new(1, 0, 1), 7);
        assert_eq!(g.copied(SlotCoord::new(1, 0, 1)), 7);
        assert_eq!(g.copied(SlotCoord::new(0, 0, 0)), 0);
        *g.get_mut(SlotCoord::new(0, 1, 0)) = 3;
        assert_eq!(g.copied(SlotCoord::new(0, 1, 0)), 3);
    }

    #[test]
    fn test_swap_exchanges_cells() {
        let mut g = Grid3::filled(GridShape::new(1, 2, 1), 0_i32);
        g.set(SlotCoord::new(0, 0, 0), 1);
        g.set(SlotCoord::new(0, 1, 0), 2);
        g.swap(SlotCoord::new(0, 0, 0), SlotCoord::new(0, 1, 0));
        assert_eq!(g.copied(SlotCoord::new(0, 0, 0)), 2);
        assert_eq!(g.copied(SlotCoord::new(0, 1, 0)), 1);
    }

    #[test]
    fn test_scan_order_is_tier_bay_row() {
        let g = Grid3::filled(GridShape::new(2, 2, 2), ());
        let coords: Vec<SlotCoord> = g.coords().collect();
        assert_eq!(coords.len(), 8);
        assert_eq!(coords[0], SlotCoord::new(0, 0, 0));
        assert_eq!(coords[1], SlotCoord::new(0, 0, 1));
        assert_eq!(coords[2], SlotCoord::new(0, 1, 0));
        assert_eq!(coords[4], SlotCoord::new(1, 0, 0));
        assert_eq!(coords[7], SlotCoord::new(1, 1, 1));

        let mut sorted = coords.clone();
        sorted.sort();
        assert_eq!(coords, sorted, "scan order matches the derived ordering");
    }

    #[test]
    fn test_paired_bay_same_tier_row() {
        let c = SlotCoord::new(3, 4, 5);
        assert_eq!(c.paired_bay(), SlotCoord::new(3, 5, 5));
    }
}
