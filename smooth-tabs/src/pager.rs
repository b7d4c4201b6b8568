//! Headless paged content host.
//!
//! ## Usage
//!
//! Feed drag input and frame ticks from the host toolkit; forward the
//! returned [`PageEvent`]s to the container. Toolkits with a native pager can
//! implement [`PagedContentHost`] on it instead.

use derive_setters::Setters;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    host::{PageEvent, PagedContentHost},
    progress::PageScroll,
};

const SETTLE_DISTANCE_PX: f32 = 0.5;

/// Snapping behaviour of [`PagerModel`].
#[derive(Clone, Copy, Debug, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagerConfig {
    /// Fraction of a page that must be crossed to snap to the next page.
    pub snap_threshold: f32,
    /// Smoothing factor for snapping animations.
    pub scroll_smoothing: f32,
    /// Release speed, in pages per second, that flings to the next page
    /// regardless of the threshold.
    pub fling_velocity: f32,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 0.5,
            scroll_smoothing: 0.12,
            fling_velocity: 0.6,
        }
    }
}

/// Events produced by one pager update.
pub type PageEvents = SmallVec<[PageEvent; 2]>;

/// Horizontal pager, one full-width page per tab.
#[derive(Clone, Debug)]
pub struct PagerModel {
    page_count: usize,
    page_width: f32,
    scroll_offset: f32,
    target_offset: f32,
    current_page: usize,
    is_dragging: bool,
    in_transition: bool,
    pending_settle: bool,
    config: PagerConfig,
}

impl PagerModel {
    /// Creates a pager resting on page `0`.
    pub fn new(page_count: usize, page_width: f32, config: PagerConfig) -> Self {
        Self {
            page_count,
            page_width: page_width.max(0.0),
            scroll_offset: 0.0,
            target_offset: 0.0,
            current_page: 0,
            is_dragging: false,
            in_transition: false,
            pending_settle: false,
            config,
        }
    }

    /// Fractional page position.
    pub fn progress(&self) -> f32 {
        if self.page_width <= f32::EPSILON {
            self.current_page as f32
        } else {
            self.scroll_offset / self.page_width
        }
    }

    /// Returns `true` while a finger is on the pager.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Returns `true` between the first movement and the settle.
    pub fn in_transition(&self) -> bool {
        self.in_transition || self.pending_settle
    }

    /// Updates the page width, keeping the current page in view.
    pub fn set_page_width(&mut self, page_width: f32) {
        let page_width = page_width.max(0.0);
        if (page_width - self.page_width).abs() <= f32::EPSILON {
            return;
        }
        let progress = self.progress();
        let target_page = self.target_page_index();
        self.page_width = page_width;
        self.scroll_offset = progress * page_width;
        self.target_offset = self.offset_for_page(target_page);
    }

    /// Starts a user drag.
    pub fn begin_drag(&mut self) {
        self.is_dragging = true;
        self.target_offset = self.scroll_offset;
    }

    /// Moves the content by a finger delta; negative `dx` advances pages.
    pub fn drag_by(&mut self, dx: f32) -> Option<PageEvent> {
        if !self.is_dragging || self.page_width <= f32::EPSILON || !dx.is_finite() {
            return None;
        }
        let next = self.clamp_offset(self.scroll_offset - dx);
        if next == self.scroll_offset {
            return None;
        }
        self.scroll_offset = next;
        self.target_offset = next;
        self.in_transition = true;
        Some(self.scroll_event())
    }

    /// Ends a user drag with the release velocity in pages per second.
    pub fn end_drag(&mut self, velocity: f32) {
        if !self.is_dragging {
            return;
        }
        self.is_dragging = false;
        let page = self.snap_target_page(velocity);
        self.target_offset = self.offset_for_page(page);
        debug!(page, velocity, "pager released");
    }

    /// Advances snapping by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> PageEvents {
        let mut events = PageEvents::new();
        if self.pending_settle {
            self.pending_settle = false;
            events.push(PageEvent::Settled {
                position: self.current_page,
            });
        }
        if self.is_dragging || !self.in_transition || self.page_width <= f32::EPSILON {
            return events;
        }

        let diff = self.target_offset - self.scroll_offset;
        if diff.abs() < SETTLE_DISTANCE_PX {
            self.scroll_offset = self.target_offset;
        } else {
            let smoothing = self.config.scroll_smoothing.clamp(0.0, 1.0);
            let factor = ((1.0 - smoothing) * dt.max(0.0) * 60.0).min(1.0);
            self.scroll_offset += diff * factor;
        }
        events.push(self.scroll_event());

        if self.scroll_offset == self.target_offset {
            self.in_transition = false;
            self.current_page = self.target_page_index();
            trace!(page = self.current_page, "pager settled");
            events.push(PageEvent::Settled {
                position: self.current_page,
            });
        }
        events
    }

    fn scroll_event(&self) -> PageEvent {
        let progress = self.progress().max(0.0);
        let last = self.page_count.saturating_sub(1);
        let position = (progress.floor() as usize).min(last);
        let offset = (progress - position as f32).clamp(0.0, 1.0);
        PageEvent::Scroll(PageScroll::new(position, offset))
    }

    fn target_page_index(&self) -> usize {
        if self.page_width <= f32::EPSILON {
            return self.current_page;
        }
        let page = (self.target_offset / self.page_width).round();
        self.clamp_page(if page.is_finite() { page.max(0.0) as usize } else { 0 })
    }

    fn snap_target_page(&self, velocity: f32) -> usize {
        let progress = self.progress();
        let base = progress.floor();
        let fraction = progress - base;
        let threshold = self.config.snap_threshold.clamp(0.0, 1.0);
        let fling = self.config.fling_velocity.abs();
        let advance = if fraction <= f32::EPSILON {
            false
        } else if velocity >= fling && fling > 0.0 {
            true
        } else if velocity <= -fling && fling > 0.0 {
            false
        } else {
            fraction >= threshold
        };
        let page = if advance { base + 1.0 } else { base };
        self.clamp_page(if page.is_finite() { page.max(0.0) as usize } else { 0 })
    }

    fn clamp_page(&self, page: usize) -> usize {
        page.min(self.page_count.saturating_sub(1))
    }

    fn offset_for_page(&self, page: usize) -> f32 {
        self.page_width * page as f32
    }

    fn clamp_offset(&self, offset: f32) -> f32 {
        let max = self.offset_for_page(self.page_count.saturating_sub(1));
        offset.clamp(0.0, max)
    }
}

impl PagedContentHost for PagerModel {
    fn set_page(&mut self, index: usize) {
        let index = self.clamp_page(index);
        if index == self.current_page && !self.in_transition() && !self.is_dragging {
            return;
        }
        let offset = self.offset_for_page(index);
        self.scroll_offset = offset;
        self.target_offset = offset;
        self.current_page = index;
        self.is_dragging = false;
        self.in_transition = false;
        self.pending_settle = true;
        debug!(page = index, "pager jumped");
    }

    fn current_page(&self) -> usize {
        self.current_page
    }
}
