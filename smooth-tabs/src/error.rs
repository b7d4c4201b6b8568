//! Error types.

use thiserror::Error;

/// Errors raised while constructing a tab widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabsError {
    /// A tab widget needs at least one tab.
    #[error("a tab widget needs at least one tab")]
    EmptyTabs,
    /// Descriptor indices must be dense and match their position.
    #[error("tab at position {position} declares index {index}")]
    NonDenseIndex {
        /// Position in the descriptor sequence.
        position: usize,
        /// Index the descriptor declared.
        index: usize,
    },
    /// The number of content panes differs from the number of tabs.
    #[error("{tabs} tabs were supplied with {panes} content panes")]
    PaneCountMismatch {
        /// Number of tab descriptors.
        tabs: usize,
        /// Number of content panes.
        panes: usize,
    },
}

/// Errors that make a single indicator frame impossible to evaluate.
///
/// These never leave the frame driver: the frame is skipped and the last good
/// frame is reused.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FrameError {
    /// The scroll-progress value was NaN or infinite.
    #[error("scroll progress {0} is not finite")]
    NonFiniteProgress(f32),
    /// A measured tab rectangle contained a non-finite component.
    #[error("layout of tab {index} is not finite")]
    NonFiniteGeometry {
        /// Tab whose layout is invalid.
        index: usize,
    },
}
