//! Horizontal scroll state of the tab strip.

use tracing::trace;

use crate::{
    host::TabStripScroller,
    spring::{Spring1D, SpringSpec},
};

/// Scroll position of a tab strip wider than its viewport.
///
/// Offsets are clamped to `[0, content_width - viewport_width]`.
#[derive(Clone, Debug)]
pub struct StripScroll {
    viewport_width: f32,
    content_width: f32,
    offset: Spring1D,
    spec: SpringSpec,
}

impl StripScroll {
    /// Creates a strip scrolled to the start.
    pub fn new(viewport_width: f32, spec: SpringSpec) -> Self {
        Self {
            viewport_width: viewport_width.max(0.0),
            content_width: 0.0,
            offset: Spring1D::new(0.0),
            spec,
        }
    }

    /// Largest reachable offset.
    pub fn max_offset(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Updates the viewport width and re-clamps the offset.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width.max(0.0);
        self.clamp_to_bounds();
    }

    /// Applies a direct user drag, without animation.
    pub fn scroll_by(&mut self, delta: f32) {
        let next = self.clamp(self.offset.target() + delta);
        self.offset.snap_to(next);
    }

    /// Advances the scroll animation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.offset.update(dt, &self.spec);
    }

    /// Current offset.
    pub fn offset(&self) -> f32 {
        self.offset.value()
    }

    /// Offset the strip is heading to.
    pub fn target(&self) -> f32 {
        self.offset.target()
    }

    /// Returns `true` while the offset is animating.
    pub fn is_animating(&self) -> bool {
        self.offset.is_animating(&self.spec)
    }

    fn clamp(&self, offset: f32) -> f32 {
        if offset.is_finite() {
            offset.clamp(0.0, self.max_offset())
        } else {
            0.0
        }
    }

    fn clamp_to_bounds(&mut self) {
        let value = self.clamp(self.offset.value());
        let target = self.clamp(self.offset.target());
        if value != self.offset.value() {
            self.offset.snap_to(value);
        }
        self.offset.set_target(target);
    }
}

impl TabStripScroller for StripScroll {
    fn scroll_to(&mut self, x: f32, animated: bool) {
        let target = self.clamp(x);
        trace!(requested = x, target, animated, "strip scroll");
        if animated {
            self.offset.set_target(target);
        } else {
            self.offset.snap_to(target);
        }
    }

    fn set_content_width(&mut self, width: f32) {
        self.content_width = width.max(0.0);
        self.clamp_to_bounds();
    }

    fn set_viewport_width(&mut self, width: f32) {
        StripScroll::set_viewport_width(self, width);
    }
}
