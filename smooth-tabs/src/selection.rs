//! Active-tab state shared by every part of one tab widget.
//!
//! ## Usage
//!
//! The container writes through [`SelectionState`]; anything else that needs
//! to stay in sync with the strip (custom chrome, headers, badges) holds an
//! [`ActiveTabReader`].

use tracing::{debug, warn};

use crate::state::Shared;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Selection {
    active: usize,
    tab_count: usize,
    version: u64,
}

/// Writable handle to the active tab of one widget instance.
///
/// Starts at tab `0` on mount. Out-of-range writes are clamped to the last
/// tab, so `active < tab_count` always holds.
#[derive(Clone, Debug)]
pub struct SelectionState {
    inner: Shared<Selection>,
}

impl SelectionState {
    /// Creates the state for a widget with `tab_count` tabs.
    ///
    /// `tab_count` is raised to one if zero is passed.
    pub fn new(tab_count: usize) -> Self {
        Self {
            inner: Shared::new(Selection {
                active: 0,
                tab_count: tab_count.max(1),
                version: 0,
            }),
        }
    }

    /// Returns the active tab.
    pub fn read(&self) -> usize {
        self.inner.with(|s| s.active)
    }

    /// Replaces the active tab and returns the committed index.
    ///
    /// Indices past the last tab are clamped and reported at `warn` level.
    pub fn write(&self, index: usize) -> usize {
        self.inner.with_mut(|s| {
            let committed = if index >= s.tab_count {
                let clamped = s.tab_count - 1;
                warn!(
                    requested = index,
                    clamped,
                    tab_count = s.tab_count,
                    "active tab out of range, clamping"
                );
                clamped
            } else {
                index
            };
            if committed != s.active {
                debug!(from = s.active, to = committed, "active tab changed");
                s.active = committed;
                s.version = s.version.wrapping_add(1);
            }
            committed
        })
    }

    /// Number of tabs this state was created for.
    pub fn tab_count(&self) -> usize {
        self.inner.with(|s| s.tab_count)
    }

    /// Counter bumped on every change of the active tab.
    pub fn version(&self) -> u64 {
        self.inner.with(|s| s.version)
    }

    /// Returns a read-only accessor for descendant consumers.
    pub fn reader(&self) -> ActiveTabReader {
        ActiveTabReader {
            inner: self.inner.clone(),
        }
    }
}

/// Read-only, widget-scoped accessor to the active tab.
#[derive(Clone, Debug)]
pub struct ActiveTabReader {
    inner: Shared<Selection>,
}

impl ActiveTabReader {
    /// Returns the active tab.
    pub fn get(&self) -> usize {
        self.inner.with(|s| s.active)
    }

    /// Returns `true` if `index` is the active tab.
    pub fn is_active(&self, index: usize) -> bool {
        self.get() == index
    }
}
