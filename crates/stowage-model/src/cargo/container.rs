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

use crate::common::{Identifier, IdentifierMarkerName};
use std::collections::HashMap;
use stowage_core::prelude::Weight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerIdentifierMarker;

impl IdentifierMarkerName for ContainerIdentifierMarker {
    const NAME: &'static str = "ContainerId";
}

/// The container's booking identifier from the manifest.
pub type ContainerIdentifier = Identifier<String, ContainerIdentifierMarker>;

/// Length class of a container. A 20-foot box occupies one slot, a
/// 40-foot box occupies two longitudinally adjacent slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Twenty,
    Forty,
}

impl SizeClass {
    /// Parses the manifest size column.
    #[inline]
    pub fn from_feet(feet: u32) -> Option<Self> {
        match feet {
            20 => Some(SizeClass::Twenty),
            40 => Some(SizeClass::Forty),
            _ => None,
        }
    }

    #[inline]
    pub const fn feet(&self) -> u32 {
        match self {
            SizeClass::Twenty => 20,
            SizeClass::Forty => 40,
        }
    }
}

impl std::fmt::Display for SizeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ft", self.feet())
    }
}

/// One container from the manifest. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    id: ContainerIdentifier,
    weight: Weight,
    size: SizeClass,
}

impl Container {
    #[inline]
    pub fn new(id: ContainerIdentifier, weight: Weight, size: SizeClass) -> Self {
        Self { id, weight, size }
    }

    #[inline]
    pub fn id(&self) -> &ContainerIdentifier {
        &self.id
    }

    #[inline]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    #[inline]
    pub fn size(&self) -> SizeClass {
        self.size
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.id, self.size, self.weight)
    }
}

/// Dense handle into a [`ContainerRegistry`]. Plans store these instead of
/// identifier strings so grid cells stay `Copy`.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerIndex(u32);

impl ContainerIndex {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn value(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ContainerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The containers selected for one planning run, addressable by dense
/// index and by identifier.
#[derive(Debug, Clone, Default)]
pub struct ContainerRegistry {
    containers: Vec<Container>,
    by_id: HashMap<ContainerIdentifier, ContainerIndex>,
}

impl ContainerRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            containers: Vec::with_capacity(cap),
            by_id: HashMap::with_capacity(cap),
        }
    }

    /// Registers a container and returns its handle. A re-registered
    /// identifier returns the existing handle unchanged.
    pub fn insert(&mut self, container: Container) -> ContainerIndex {
        if let Some(&idx) = self.by_id.get(container.id()) {
            return idx;
        }
        let idx = ContainerIndex::new(self.containers.len() as u32);
        self.by_id.insert(container.id().clone(), idx);
        self.containers.push(container);
        idx
    }

    #[inline]
    pub fn get(&self, index: ContainerIndex) -> &Container {
        &self.containers[index.value()]
    }

    #[inline]
    pub fn lookup(&self, id: &ContainerIdentifier) -> Option<ContainerIndex> {
        self.by_id.get(id).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (ContainerIndex, &Container)> {
        self.containers
            .iter()
            .enumerate()
            .map(|(i, c)| (ContainerIndex::new(i as u32), c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(s: &str) -> ContainerIdentifier {
        ContainerIdentifier::new(s.to_string())
    }

    #[test]
    fn test_size_class_parse_and_feet() {
        assert_eq!(SizeClass::from_feet(20), Some(SizeClass::Twenty));
        assert_eq!(SizeClass::from_feet(40), Some(SizeClass::Forty));
        assert_eq!(SizeClass::from_feet(45), None);
        assert_eq!(SizeClass::Twenty.feet(), 20);
        assert_eq!(SizeClass::Forty.to_string(), "40ft");
    }

    #[test]
    fn test_registry_insert_and_lookup() {
        let mut reg = ContainerRegistry::new();
        let a = reg.insert(Container::new(cid("A"), Weight::new(1000.0), SizeClass::Twenty));
        let b = reg.insert(Container::new(cid("B"), Weight::new(2000.0), SizeClass::Forty));
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(a).id(), &cid("A"));
        assert_eq!(reg.get(b).weight().kilograms(), 2000.0);
        assert_eq!(reg.lookup(&cid("B")), Some(b));
        assert_eq!(reg.lookup(&cid("C")), None);
    }

    #[test]
    fn test_registry_duplicate_id_keeps_first() {
        let mut reg = ContainerRegistry::new();
        let first = reg.insert(Container::new(cid("A"), Weight::new(1.0), SizeClass::Twenty));
        let second = reg.insert(Container::new(cid("A"), Weight::new(9.0), SizeClass::Forty));
        assert_eq!(first, second);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(first).weight().kilograms(), 1.0);
    }

    #[test]
    fn test_registry_iter_in_insertion_order() {
        let mut reg = ContainerRegistry::new();
        reg.insert(Container::new(cid("X"), Weight::new(1.0), SizeClass::Twenty));
        reg.insert(Container::new(cid("Y"), Weight::new(2.0), SizeClass::Twenty));
        let ids: Vec<&str> = reg.iter().map(|(_, c)| c.id().value().as_str()).collect();
        assert_eq!(ids, vec!["X", "Y"]);
    }
}
