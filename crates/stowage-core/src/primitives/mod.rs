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

use num_traits::Zero;
use serde::Serialize;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// A mass quantity in kilograms.
///
/// Manifest weights arrive in metric tons and are converted once at the
/// ingestion boundary; everything downstream works in kilograms.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
pub struct Weight(f64);

impl Weight {
    pub const ZERO: Weight = Weight(0.0);

    #[inline]
    pub const fn new(kilograms: f64) -> Self {
        Weight(kilograms)
    }

    #[inline]
    pub fn from_tons(tons: f64) -> Self {
        Weight(tons * 1000.0)
    }

    #[inline]
    pub const fn kilograms(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn tons(&self) -> f64 {
        self.0 / 1000.0
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kg", self.0)
    }
}

impl Add for Weight {
    type Output = Weight;

    #[inline]
    fn add(self, rhs: Weight) -> Weight {
        Weight(self.0 + rhs.0)
    }
}

impl AddAssign for Weight {
    #[inline]
    fn add_assign(&mut self, rhs: Weight) {
        self.0 += rhs.0;
    }
}

impl Sub for Weight {
    type Output = Weight;

    #[inline]
    fn sub(self, rhs: Weight) -> Weight {
        Weight(self.0 - rhs.0)
    }
}

impl SubAssign for Weight {
    #[inline]
    fn sub_assign(&mut self, rhs: Weight) {
        self.0 -= rhs.0;
    }
}

impl Mul<f64> for Weight {
    type Output = f64;

    /// Weight times a lever arm yields a raw moment.
    #[inline]
    fn mul(self, arm: f64) -> f64 {
        self.0 * arm
    }
}

impl Sum for Weight {
    #[inline]
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Weight {
        iter.fold(Weight::ZERO, |acc, w| acc + w)
    }
}

impl Zero for Weight {
    #[inline]
    fn zero() -> Self {
        Weight::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

/// Lever arms of a weight relative to the ship reference point:
/// longitudinal (lcg), vertical (vcg) and transverse (tcg).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MomentArms {
    pub lcg: f64,
    pub vcg: f64,
    pub tcg: f64,
}

impl MomentArms {
    #[inline]
    pub const fn new(lcg: f64, vcg: f64, tcg: f64) -> Self {
        Self { lcg, vcg, tcg }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl std::fmt::Display for MomentArms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(lcg: {}, vcg: {}, tcg: {})",
            self.lcg, self.vcg, self.tcg
        )
    }
}

/// A scalar penalty score. Lower is better.
///
/// Wraps an `f64` with the total order of `f64::total_cmp` so scores can be
/// compared and sorted without `Option` plumbing. `Fitness::INFINITE` is the
/// defined result of evaluating a zero-weight condition and the starting
/// value of any best-so-far tracker.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fitness(f64);

impl Fitness {
    pub const INFINITE: Fitness = Fitness(f64::INFINITY);

    #[inline]
    pub const fn new(score: f64) -> Self {
        Fitness(score)
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Strict improvement. Ties are not improvements, so the first plan
    /// that reached a score keeps it.
    #[inline]
    pub fn improves(&self, incumbent: Fitness) -> bool {
        self.0.total_cmp(&incumbent.0) == std::cmp::Ordering::Less
    }
}

impl Eq for Fitness {}

impl Ord for Fitness {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Fitness {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Fitness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fitness({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_conversions() {
        let w = Weight::from_tons(2.5);
        assert_eq!(w.kilograms(), 2500.0);
        assert_eq!(w.tons(), 2.5);
        assert_eq!(w.to_string(), "2500 kg");
    }

    #[test]
    fn test_weight_arithmetic_and_sum() {
        let a = Weight::new(100.0);
        let b = Weight::new(250.0);
        assert_eq!((a + b).kilograms(), 350.0);
        assert_eq!((b - a).kilograms(), 150.0);

        let mut acc = Weight::ZERO;
        acc += a;
        acc += b;
        assert_eq!(acc.kilograms(), 350.0);

        let total: Weight = vec![a, b, Weight::new(50.0)].into_iter().sum();
        assert_eq!(total.kilograms(), 400.0);
    }

    #[test]
    fn test_weight_zero_trait() {
        assert!(Weight::ZERO.is_zero());
        assert!(!Weight::new(1.0).is_zero());
        assert_eq!(Weight::zero(), Weight::ZERO);
    }

    #[test]
    fn test_weight_times_arm_is_moment() {
        let w = Weight::new(1000.0);
        assert_eq!(w * -7.5, -7500.0);
    }

    #[test]
    fn test_fitness_strict_improvement() {
        let a = Fitness::new(10.0);
        let b = Fitness::new(10.0);
        let c = Fitness::new(9.0);
        assert!(!b.improves(a), "equal score is not an improvement");
        assert!(c.improves(a));
        assert!(!a.improves(c));
    }

    #[test]
    fn test_fitness_infinite_is_worst() {
        assert!(Fitness::new(1e30).improves(Fitness::INFINITE));
        assert!(!Fitness::INFINITE.improves(Fitness::new(1e30)));
        assert!(!Fitness::INFINITE.is_finite());
    }

    #[test]
    fn test_fitness_total_order_sorts() {
        let mut v = vec![
            Fitness::INFINITE,
            Fitness::new(3.0),
            Fitness::new(-1.0),
            Fitness::new(0.0),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                Fitness::new(-1.0),
                Fitness::new(0.0),
                Fitness::new(3.0),
                Fitness::INFINITE
            ]
        );
    }

    #[test]
    fn test_moment_arms_display() {
        let arms = MomentArms::new(1.0, 2.0, -0.5);
        assert_eq!(arms.to_string(), "(lcg: 1, vcg: 2, tcg: -0.5)");
    }
}
