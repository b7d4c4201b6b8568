//! smooth-tabs keeps a scrollable tab strip, a sliding indicator and a pager
//! of full-screen content panes in sync.
//!
//! The crate is headless. It owns the synchronization state and exposes the
//! values a toolkit needs to draw: per-tab label views, the indicator
//! rectangle for every frame, and scroll requests for the strip.
//!
//! # Threads
//!
//! - **UI thread**: owns the [`TabContainer`] and applies every state change,
//!   either by direct calls or by draining a [`UiInbox`] with
//!   [`TabContainer::pump`].
//! - **Input thread**: runs [`TabStripInput`], which recognizes taps and long
//!   presses and posts [`GestureIntent`]s.
//! - **Render thread**: calls [`IndicatorDriver::next_frame`] once per frame.
//!   It only reads shared state and never blocks on the UI thread for long.
//!
//! # Example
//!
//! ```
//! use smooth_tabs::{
//!     LayoutRect, PageEvent, PageScroll, TabContainer, TabDescriptor, TabsConfig, TabsStyle,
//!     pager::PagerModel, strip::StripScroll,
//! };
//!
//! let tabs = vec![TabDescriptor::new(0, "Popular"), TabDescriptor::new(1, "Top Rated")];
//! let config = TabsConfig::default();
//! let pager = PagerModel::new(2, config.viewport_width, config.pager);
//! let strip = StripScroll::new(config.viewport_width, config.strip_spring);
//! let mut tabs = TabContainer::new(tabs, 2, pager, strip, config, TabsStyle::default())?;
//!
//! tabs.on_measure(0, LayoutRect::new(0.0, 0.0, 80.0, 48.0));
//! tabs.on_measure(1, LayoutRect::new(88.0, 0.0, 90.0, 48.0));
//! tabs.on_page_event(PageEvent::Scroll(PageScroll::new(0, 0.5)));
//!
//! let mut driver = tabs.indicator_driver();
//! let frame = driver.next_frame(std::time::Duration::from_millis(16));
//! assert_eq!(frame.target.width, 85.0);
//! # Ok::<(), smooth_tabs::TabsError>(())
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod auto_scroll;
pub mod config;
pub mod container;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod indicator;
pub mod pager;
pub mod progress;
pub mod registry;
pub mod selection;
pub mod spring;
pub mod state;
pub mod strip;
pub mod style;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use crate::{
    auto_scroll::{AutoScrollCoordinator, TriggerMode},
    config::TabsConfig,
    container::{TabContainer, TabItemView},
    descriptor::{TabDescriptor, TabSet},
    dispatch::{UiDispatcher, UiInbox, UiMessage, ui_channel},
    error::{FrameError, TabsError},
    geometry::{LayoutRect, Point},
    gesture::{GestureConfig, GestureIntent, IntentKind, PointerEvent, TabStripInput},
    host::{PageEvent, PagedContentHost, TabStripScroller},
    indicator::{IndicatorDriver, IndicatorFrame, compute_target},
    progress::{PageScroll, ScrollProgress},
    registry::LayoutRegistry,
    selection::{ActiveTabReader, SelectionState},
    spring::SpringSpec,
    style::{Color, TabsStyle},
};
