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

use crate::cargo::container::{Container, ContainerIndex, ContainerRegistry, SizeClass};
use crate::cargo::err::InsufficientContainersError;

/// The containers selected for loading, partitioned by size class.
///
/// Heavier containers come first in both lists. That priority runs through
/// the whole planner: the heaviest container is assigned to the most
/// favorable (lowest) position at every construction and repair pass,
/// which approximates good vertical stability without exhaustive search.
#[derive(Debug, Clone)]
pub struct LoadList {
    registry: ContainerRegistry,
    twenty: Vec<ContainerIndex>,
    forty: Vec<ContainerIndex>,
}

impl LoadList {
    /// Partitions the manifest into 20-foot and 40-foot subsets, each
    /// sorted by descending weight (ties keep manifest order) and
    /// truncated to the requested load counts.
    ///
    /// Fails when the manifest holds fewer containers of either size than
    /// requested. This is a precondition of the whole run, checked before
    /// any optimization starts.
    pub fn classify(
        manifest: &[Container],
        twenty_target: usize,
        forty_target: usize,
    ) -> Result<Self, InsufficientContainersError> {
        let mut twenty: Vec<&Container> = manifest
            .iter()
            .filter(|c| c.size() == SizeClass::Twenty)
            .collect();
        let mut forty: Vec<&Container> = manifest
            .iter()
            .filter(|c| c.size() == SizeClass::Forty)
            .collect();

        if twenty.len() < twenty_target {
            return Err(InsufficientContainersError::new(
                SizeClass::Twenty,
                twenty_target,
                twenty.len(),
            ));
        }
        if forty.len() < forty_target {
            return Err(InsufficientContainersError::new(
                SizeClass::Forty,
                forty_target,
                forty.len(),
            ));
        }

        sort_heaviest_first(&mut twenty);
        sort_heaviest_first(&mut forty);
        twenty.truncate(twenty_target);
        forty.truncate(forty_target);

        let mut registry = ContainerRegistry::with_capacity(twenty.len() + forty.len());
        let twenty = twenty
            .into_iter()
            .map(|c| registry.insert(c.clone()))
            .collect();
        let forty = forty
            .into_iter()
            .map(|c| registry.insert(c.clone()))
            .collect();

        Ok(Self {
            registry,
            twenty,
            forty,
        })
    }

    #[inline]
    pub fn registry(&self) -> &ContainerRegistry {
        &self.registry
    }

    /// Selected 20-foot containers, heaviest first.
    #[inline]
    pub fn twenty(&self) -> &[ContainerIndex] {
        &self.twenty
    }

    /// Selected 40-foot containers, heaviest first.
    #[inline]
    pub fn forty(&self) -> &[ContainerIndex] {
        &self.forty
    }
}

fn sort_heaviest_first(containers: &mut [&Container]) {
    containers.sort_by(|a, b| {
        b.weight()
            .kilograms()
            .total_cmp(&a.weight().kilograms())
    });
}
