//! Tab descriptors supplied by the host at mount.

use crate::error::TabsError;

/// One tab in the strip.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabDescriptor {
    /// Dense, zero-based position shared by the strip and the paged content.
    pub index: usize,
    /// Label shown in the strip.
    pub title: String,
}

impl TabDescriptor {
    /// Creates a descriptor.
    pub fn new(index: usize, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
        }
    }
}

/// Validated, immutable tab sequence.
///
/// The strip order and the paged-content order are the same sequence, so the
/// number of content panes must equal the number of descriptors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabSet {
    tabs: Vec<TabDescriptor>,
}

impl TabSet {
    /// Validates `tabs` against the number of content panes.
    ///
    /// Fails on an empty sequence, on indices that do not match their
    /// position, and on a pane count that differs from the tab count.
    pub fn new(tabs: Vec<TabDescriptor>, pane_count: usize) -> Result<Self, TabsError> {
        if tabs.is_empty() {
            return Err(TabsError::EmptyTabs);
        }
        if let Some((position, tab)) = tabs
            .iter()
            .enumerate()
            .find(|(position, tab)| tab.index != *position)
        {
            return Err(TabsError::NonDenseIndex {
                position,
                index: tab.index,
            });
        }
        if tabs.len() != pane_count {
            return Err(TabsError::PaneCountMismatch {
                tabs: tabs.len(),
                panes: pane_count,
            });
        }
        Ok(Self { tabs })
    }

    /// Builds a set from titles, assigning indices by position.
    pub fn from_titles<I, S>(titles: I) -> Result<Self, TabsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tabs: Vec<_> = titles
            .into_iter()
            .enumerate()
            .map(|(index, title)| TabDescriptor::new(index, title))
            .collect();
        let count = tabs.len();
        Self::new(tabs, count)
    }

    /// Number of tabs. Always at least one.
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Looks up a descriptor by index.
    pub fn get(&self, index: usize) -> Option<&TabDescriptor> {
        self.tabs.get(index)
    }

    /// Iterates descriptors in strip order.
    pub fn iter(&self) -> impl Iterator<Item = &TabDescriptor> {
        self.tabs.iter()
    }
}
