//! Keeps the active tab centred in the strip after swipes.
//!
//! ## Usage
//!
//! The container re-evaluates the coordinator after every state change. It
//! fires only when its inputs changed, every tab is measured and the active
//! tab changed because the content was swiped. A tapped tab is already on
//! screen, so re-scrolling the strip there would only jolt it.

use tracing::{debug, trace};

use crate::{geometry::LayoutRect, registry::LayoutRegistry};

/// Why the active tab last changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerMode {
    /// A tap or long press on the strip.
    Press,
    /// The content host settled after a swipe.
    #[default]
    Scroll,
    /// The settle that followed a press has been consumed.
    None,
}

impl TriggerMode {
    /// Mode after a settle event: a press is consumed, anything else means
    /// the content was swiped.
    pub fn after_settle(self) -> Self {
        match self {
            Self::Press => Self::None,
            Self::Scroll | Self::None => Self::Scroll,
        }
    }
}

/// Strip offset that centres `rect` in a viewport `viewport_width` wide.
///
/// Only the lower bound is clamped; the scroll container clamps to its
/// content.
pub fn centered_offset(rect: LayoutRect, viewport_width: f32) -> f32 {
    (rect.center_x() - viewport_width / 2.0).max(0.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Inputs {
    active_tab: usize,
    generation: u64,
    trigger: TriggerMode,
}

/// Decides when the strip should scroll to the active tab.
#[derive(Clone, Debug, Default)]
pub struct AutoScrollCoordinator {
    last_seen: Option<Inputs>,
    fired: u64,
}

impl AutoScrollCoordinator {
    /// Creates a coordinator that has seen nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the scroll target if the strip should move now.
    ///
    /// Unchanged inputs never fire twice. The trigger mode is left alone;
    /// settle handling owns its transitions.
    pub fn evaluate(
        &mut self,
        registry: &LayoutRegistry,
        active_tab: usize,
        tab_count: usize,
        trigger: TriggerMode,
        viewport_width: f32,
    ) -> Option<f32> {
        let inputs = Inputs {
            active_tab,
            generation: registry.generation(),
            trigger,
        };
        if self.last_seen == Some(inputs) {
            return None;
        }
        self.last_seen = Some(inputs);

        if trigger != TriggerMode::Scroll {
            trace!(?trigger, "auto-scroll suppressed");
            return None;
        }
        if !registry.is_complete(tab_count) {
            trace!(measured = registry.len(), tab_count, "auto-scroll waiting for layout");
            return None;
        }
        let rect = registry.get(active_tab)?;
        let target = centered_offset(rect, viewport_width);
        self.fired += 1;
        debug!(active_tab, target, "auto-scrolling tab strip");
        Some(target)
    }

    /// Number of times the coordinator has fired.
    pub fn fired(&self) -> u64 {
        self.fired
    }
}
