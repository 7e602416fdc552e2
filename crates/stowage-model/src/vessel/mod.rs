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

use stowage_core::prelude::{MomentAccumulator, MomentArms, Weight};

/// The vessel's own unladen weight and its center of gravity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lightship {
    weight: Weight,
    arms: MomentArms,
}

impl Lightship {
    #[inline]
    pub const fn new(weight: Weight, arms: MomentArms) -> Self {
        Self { weight, arms }
    }

    #[inline]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    #[inline]
    pub fn arms(&self) -> MomentArms {
        self.arms
    }
}

/// One ballast or fuel tank at its current filling.
#[derive(Debug, Clone, PartialEq)]
pub struct Tank {
    name: String,
    weight: Weight,
    arms: MomentArms,
}

impl Tank {
    #[inline]
    pub fn new(name: impl Into<String>, weight: Weight, arms: MomentArms) -> Self {
        Self {
            name: name.into(),
            weight,
            arms,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    #[inline]
    pub fn arms(&self) -> MomentArms {
        self.arms
    }
}

/// Everything on board that is not cargo: lightship plus tank fillings.
/// Fixed for the duration of one planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselCondition {
    lightship: Lightship,
    tanks: Vec<Tank>,
}

impl VesselCondition {
    #[inline]
    pub fn new(lightship: Lightship, tanks: Vec<Tank>) -> Self {
        Self { lightship, tanks }
    }

    #[inline]
    pub fn lightship(&self) -> &Lightship {
        &self.lightship
    }

    #[inline]
    pub fn tanks(&self) -> &[Tank] {
        &self.tanks
    }

    /// Sums lightship and tank weights/moments into the accumulator.
    pub fn accumulate(&self, acc: &mut MomentAccumulator) {
        acc.add(self.lightship.weight(), self.lightship.arms());
        for tank in &self.tanks {
            acc.add(tank.weight(), tank.arms());
        }
    }

    /// The longitudinal center of gravity of the vessel without cargo.
    /// A natural default for the target lcg: loading cargo around this
    /// value keeps the trim where the ballast plan put it. Zero when the
    /// condition is massless.
    pub fn ballast_trim_lcg(&self) -> f64 {
        let mut acc = MomentAccumulator::new();
        self.accumulate(&mut acc);
        acc.center_of_gravity().map(|cg| cg.arms.lcg).unwrap_or(0.0)
    }
}
