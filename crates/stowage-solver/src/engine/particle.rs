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
use rand_chacha::ChaCha8Rng;
use stowage_core::prelude::Fitness;

/// One member of the swarm. A particle owns its current position, its
/// personal-best position and its own random stream; no state is shared
/// between particles, which makes the per-iteration evaluation
/// embarrassingly parallel.
#[derive(Debug, Clone)]
pub struct Particle {
    pub(crate) position: StowagePlan,
    pub(crate) best_position: StowagePlan,
    pub(crate) best_fitness: Fitness,
    pub(crate) rng: ChaCha8Rng,
}

impl Particle {
    /// Creates a particle from its evaluated initial position, which also
    /// becomes its first personal best.
    pub fn new(position: StowagePlan, fitness: Fitness, rng: ChaCha8Rng) -> Self {
        Self {
            best_position: position.clone(),
            position,
            best_fitness: fitness,
            rng,
        }
    }

    #[inline]
    pub fn position(&self) -> &StowagePlan {
        &self.position
    }

    #[inline]
    pub fn best_position(&self) -> &StowagePlan {
        &self.best_position
    }

    #[inline]
    pub fn best_fitness(&self) -> Fitness {
        self.best_fitness
    }

    /// Replaces the current position and, on strict improvement, the
    /// personal best. Equal fitness keeps the earlier best.
    pub fn advance(&mut self, position: StowagePlan, fitness: Fitness) {
        if fitness.improves(self.best_fitness) {
            self.best_fitness = fitness;
            self.best_position = position.clone();
        }
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use stowage_model::prelude::{ContainerIndex, GridShape, SlotCoord};

    fn plan_with(idx: u32) -> StowagePlan {
        let mut plan = StowagePlan::empty(GridShape::new(1, 1, 1));
        plan.place_twenty(SlotCoord::new(0, 0, 0), ContainerIndex::new(idx));
        plan
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0)
    }

    #[test]
    fn test_initial_best_is_initial_position() {
        let p = Particle::new(plan_with(1), Fitness::new(5.0), rng());
        assert_eq!(p.position(), p.best_position());
        assert_eq!(p.best_fitness(), Fitness::new(5.0));
    }

    #[test]
    fn test_advance_updates_best_on_improvement() {
        let mut p = Particle::new(plan_with(1), Fitness::new(5.0), rng());
        p.advance(plan_with(2), Fitness::new(3.0));
        assert_eq!(p.best_fitness(), Fitness::new(3.0));
        assert_eq!(p.best_position(), &plan_with(2));
    }

    #[test]
    fn test_advance_keeps_best_on_tie_or_worse() {
        let mut p = Particle::new(plan_with(1), Fitness::new(5.0), rng());
        p.advance(plan_with(2), Fitness::new(5.0));
        assert_eq!(p.best_position(), &plan_with(1), "tie keeps earlier best");
        p.advance(plan_with(3), Fitness::new(9.0));
        assert_eq!(p.best_position(), &plan_with(1));
        // The current position still moves every time.
        assert_eq!(p.position(), &plan_with(3));
    }
}
