//! Recording host doubles.
//!
//! Enabled for unit tests and behind the `testing` feature, so downstream
//! crates and the demo can drive a [`TabContainer`](crate::container::TabContainer)
//! without a real toolkit.

use crate::host::{PageEvent, PagedContentHost, TabStripScroller};

/// Paged host that records every `set_page` call.
#[derive(Clone, Debug, Default)]
pub struct RecordingPager {
    current: usize,
    /// Every index passed to `set_page`, in call order.
    pub calls: Vec<usize>,
    pending_settle: Option<usize>,
}

impl RecordingPager {
    /// Creates a pager resting on page `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settle report owed for the last page change, if any.
    pub fn take_settle(&mut self) -> Option<PageEvent> {
        self.pending_settle
            .take()
            .map(|position| PageEvent::Settled { position })
    }
}

impl PagedContentHost for RecordingPager {
    fn set_page(&mut self, index: usize) {
        self.calls.push(index);
        if index != self.current {
            self.current = index;
            self.pending_settle = Some(index);
        }
    }

    fn current_page(&self) -> usize {
        self.current
    }
}

/// Strip scroller that records every `scroll_to` call.
#[derive(Clone, Debug, Default)]
pub struct RecordingStrip {
    /// `(x, animated)` for every `scroll_to`, in call order.
    pub scrolls: Vec<(f32, bool)>,
    /// Last reported content width.
    pub content_width: f32,
    /// Last reported viewport width.
    pub viewport_width: f32,
}

impl RecordingStrip {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target of the most recent scroll.
    pub fn last_target(&self) -> Option<f32> {
        self.scrolls.last().map(|(x, _)| *x)
    }
}

impl TabStripScroller for RecordingStrip {
    fn scroll_to(&mut self, x: f32, animated: bool) {
        self.scrolls.push((x, animated));
    }

    fn set_content_width(&mut self, width: f32) {
        self.content_width = width;
    }

    fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }
}
