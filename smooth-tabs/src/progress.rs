//! Continuous page position reported by the paged content host.

use tracing::trace;

use crate::state::Shared;

/// One per-frame scroll report from the paged content host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageScroll {
    /// Page the swipe started from.
    pub position: usize,
    /// Progress toward the next page, in `[0, 1)`.
    pub offset: f32,
}

impl PageScroll {
    /// Creates a scroll report.
    pub fn new(position: usize, offset: f32) -> Self {
        Self { position, offset }
    }

    /// Combined fractional page value.
    pub fn value(&self) -> f32 {
        self.position as f32 + self.offset
    }
}

/// Shared scroll-progress value in `[0, tab_count - 1]`.
///
/// The integer part is the source page and the fractional part is the swipe
/// progress toward the next one. No smoothing is applied here.
#[derive(Clone, Debug, Default)]
pub struct ScrollProgress {
    value: Shared<f32>,
}

impl ScrollProgress {
    /// Creates a tracker resting on page `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the value carried by a scroll report.
    pub fn apply(&self, scroll: PageScroll) {
        let value = scroll.value();
        trace!(value, "scroll progress");
        self.value.set(value);
    }

    /// Moves straight to an integer page, without waiting for scroll events.
    pub fn jump_to(&self, page: usize) {
        self.value.set(page as f32);
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_combines_position_and_offset() {
        let progress = ScrollProgress::new();
        progress.apply(PageScroll::new(2, 0.25));
        assert_eq!(progress.value(), 2.25);
    }

    #[test]
    fn test_jump_to_integer_page() {
        let progress = ScrollProgress::new();
        progress.apply(PageScroll::new(0, 0.6));
        progress.jump_to(3);
        assert_eq!(progress.value(), 3.0);
    }

    #[test]
    fn test_clones_share_value() {
        let progress = ScrollProgress::new();
        let render_side = progress.clone();
        progress.apply(PageScroll::new(1, 0.5));
        assert_eq!(render_side.value(), 1.5);
    }
}
