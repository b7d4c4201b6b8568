//! Capabilities the widget consumes from its host toolkit.

use crate::progress::PageScroll;

/// Event reported by a paged content host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageEvent {
    /// Per-frame report while the content is moving.
    Scroll(PageScroll),
    /// The content came to rest on `position`. Sent exactly once per
    /// transition, after every scroll report of that transition.
    Settled {
        /// Page the content rests on.
        position: usize,
    },
}

/// Swipeable full-screen pages, one per tab.
pub trait PagedContentHost {
    /// Moves to `index`. Calling it with the current page is a no-op.
    fn set_page(&mut self, index: usize);

    /// Page the host currently shows.
    fn current_page(&self) -> usize;
}

/// The horizontally scrolling tab strip.
pub trait TabStripScroller {
    /// Scrolls so that content offset `x` sits at the viewport's left edge.
    ///
    /// Implementations clamp `x` to their content bounds.
    fn scroll_to(&mut self, x: f32, animated: bool);

    /// Reports the total width of the laid-out tabs.
    fn set_content_width(&mut self, _width: f32) {}

    /// Reports the width of the visible strip area.
    fn set_viewport_width(&mut self, _width: f32) {}
}
