//! Per-tab measured geometry.
//!
//! ## Usage
//!
//! The host reports each tab's rectangle the first time it is laid out and on
//! every re-layout. Unmeasured tabs are absent, never zero-sized, so dependent
//! computations can tell "not ready" apart from a collapsed tab.

use tracing::trace;

use crate::{geometry::LayoutRect, state::Shared};

/// Accumulated tab layouts, at most one per index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutRegistry {
    entries: Vec<Option<LayoutRect>>,
    measured: usize,
    generation: u64,
}

impl LayoutRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the layout for `index`. Last write wins.
    pub fn record(&mut self, index: usize, rect: LayoutRect) {
        if index >= self.entries.len() {
            self.entries.resize(index + 1, None);
        }
        let slot = &mut self.entries[index];
        if *slot == Some(rect) {
            return;
        }
        if slot.is_none() {
            self.measured += 1;
        }
        *slot = Some(rect);
        self.generation = self.generation.wrapping_add(1);
        trace!(index, ?rect, "tab layout recorded");
    }

    /// Returns the layout for `index`, if it has been measured.
    pub fn get(&self, index: usize) -> Option<LayoutRect> {
        self.entries.get(index).copied().flatten()
    }

    /// Returns `true` iff every index in `[0, tab_count)` has been measured.
    pub fn is_complete(&self, tab_count: usize) -> bool {
        self.entries.len() >= tab_count && self.entries[..tab_count].iter().all(Option::is_some)
    }

    /// Number of measured tabs.
    pub fn len(&self) -> usize {
        self.measured
    }

    /// Returns `true` if no tab has been measured yet.
    pub fn is_empty(&self) -> bool {
        self.measured == 0
    }

    /// Counter bumped on every change; used to detect re-layouts.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Right edge of the furthest measured tab.
    pub fn content_extent(&self) -> f32 {
        self.entries
            .iter()
            .flatten()
            .map(LayoutRect::right)
            .fold(0.0, f32::max)
    }

    /// Index of the measured tab containing `point`.
    pub fn hit_test(&self, point: crate::geometry::Point) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.is_some_and(|rect| rect.contains(point)))
    }
}

/// Shared handle to a widget's layout registry.
pub type SharedRegistry = Shared<LayoutRegistry>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn rect(x: f32, width: f32) -> LayoutRect {
        LayoutRect::new(x, 0.0, width, 48.0)
    }

    #[test]
    fn test_absent_until_recorded() {
        let mut registry = LayoutRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.get(0), None);
        registry.record(2, rect(10.0, 20.0));
        assert_eq!(registry.get(0), None);
        assert_eq!(registry.get(2), Some(rect(10.0, 20.0)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = LayoutRegistry::new();
        registry.record(0, rect(0.0, 80.0));
        registry.record(0, rect(0.0, 95.0));
        assert_eq!(registry.get(0), Some(rect(0.0, 95.0)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_completeness() {
        let mut registry = LayoutRegistry::new();
        registry.record(0, rect(0.0, 80.0));
        registry.record(2, rect(186.0, 70.0));
        assert!(!registry.is_complete(3));
        registry.record(1, rect(88.0, 90.0));
        assert!(registry.is_complete(3));
        assert!(registry.is_complete(2));
        assert!(!registry.is_complete(4));
    }

    #[test]
    fn test_generation_only_moves_on_change() {
        let mut registry = LayoutRegistry::new();
        registry.record(0, rect(0.0, 80.0));
        let generation = registry.generation();
        registry.record(0, rect(0.0, 80.0));
        assert_eq!(registry.generation(), generation);
        registry.record(0, rect(0.0, 81.0));
        assert_ne!(registry.generation(), generation);
    }

    #[test]
    fn test_hit_test_and_extent() {
        let mut registry = LayoutRegistry::new();
        registry.record(0, rect(0.0, 80.0));
        registry.record(1, rect(88.0, 90.0));
        assert_eq!(registry.hit_test(Point::new(100.0, 10.0)), Some(1));
        assert_eq!(registry.hit_test(Point::new(84.0, 10.0)), None);
        assert_eq!(registry.content_extent(), 178.0);
    }
}
