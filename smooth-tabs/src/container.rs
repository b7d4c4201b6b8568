//! The tab widget: a strip of labels synchronized with swipeable pages.
//!
//! ## Usage
//!
//! The UI thread owns the [`TabContainer`]. Measurements, gesture intents and
//! page events are fed to it directly or posted through a
//! [`UiDispatcher`](crate::dispatch::UiDispatcher) and drained with
//! [`TabContainer::pump`]. Drawing happens elsewhere: hand an
//! [`IndicatorDriver`] to the render loop and read [`TabContainer::tab_items`]
//! for the labels.

use tracing::{debug, trace, warn};

use crate::{
    auto_scroll::{AutoScrollCoordinator, TriggerMode},
    config::TabsConfig,
    descriptor::{TabDescriptor, TabSet},
    dispatch::{UiDispatcher, UiInbox, UiMessage},
    error::TabsError,
    geometry::LayoutRect,
    gesture::{GestureIntent, IntentKind, TabStripInput},
    host::{PageEvent, PagedContentHost, TabStripScroller},
    indicator::{Emphasis, IndicatorAnimator, IndicatorDriver},
    progress::ScrollProgress,
    registry::{LayoutRegistry, SharedRegistry},
    selection::{ActiveTabReader, SelectionState},
    state::Shared,
    style::{TabsStyle, TextStyle},
};

/// What a host needs to draw one tab label.
#[derive(Clone, Debug, PartialEq)]
pub struct TabItemView {
    /// Tab index.
    pub index: usize,
    /// Label text.
    pub title: String,
    /// Whether this is the active tab.
    pub is_active: bool,
    /// Resolved label style.
    pub text_style: TextStyle,
}

/// Synchronizes the tab strip, the indicator and the paged content.
pub struct TabContainer<P, S> {
    tabs: TabSet,
    config: TabsConfig,
    style: TabsStyle,
    registry: SharedRegistry,
    selection: SelectionState,
    progress: ScrollProgress,
    emphasis: Emphasis,
    trigger: TriggerMode,
    coordinator: AutoScrollCoordinator,
    pager: P,
    strip: S,
    viewport_width: f32,
}

impl<P: PagedContentHost, S: TabStripScroller> TabContainer<P, S> {
    /// Builds a widget for `tabs` showing `pane_count` content panes.
    ///
    /// Fails when there are no tabs, when descriptor indices are not
    /// `0..n` in order, or when `pane_count` differs from the tab count.
    pub fn new(
        tabs: Vec<TabDescriptor>,
        pane_count: usize,
        pager: P,
        strip: S,
        config: TabsConfig,
        style: TabsStyle,
    ) -> Result<Self, TabsError> {
        let tabs = TabSet::new(tabs, pane_count)?;
        let tab_count = tabs.len();
        debug!(tab_count, "tab container created");
        Ok(Self {
            selection: SelectionState::new(tab_count),
            tabs,
            viewport_width: config.viewport_width.max(0.0),
            config,
            style,
            registry: Shared::new(LayoutRegistry::new()),
            progress: ScrollProgress::new(),
            emphasis: Emphasis::new(),
            trigger: TriggerMode::default(),
            coordinator: AutoScrollCoordinator::new(),
            pager,
            strip,
        })
    }

    /// Records the laid-out rectangle of tab `index`.
    pub fn on_measure(&mut self, index: usize, rect: LayoutRect) {
        if index >= self.tabs.len() {
            warn!(index, tab_count = self.tabs.len(), "ignoring measurement for unknown tab");
            return;
        }
        let (changed, extent) = self.registry.with_mut(|registry| {
            let before = registry.generation();
            registry.record(index, rect);
            (registry.generation() != before, registry.content_extent())
        });
        if !changed {
            return;
        }
        trace!(index, ?rect, "tab measured");
        self.strip
            .set_content_width(extent + self.style.scroll_content.padding.right);
        self.auto_scroll();
    }

    /// Updates the strip viewport width used for centring and clamping.
    pub fn set_viewport_width(&mut self, width: f32) {
        if !width.is_finite() {
            warn!(width, "ignoring non-finite viewport width");
            return;
        }
        self.viewport_width = width.max(0.0);
        self.strip.set_viewport_width(self.viewport_width);
    }

    /// Makes `index` the active tab, as a press on its label does.
    ///
    /// Selecting the active tab does nothing. Returns `true` if the
    /// selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        let index = self.clamp_index(index);
        if index == self.selection.read() {
            trace!(index, "tab already active");
            return false;
        }
        self.set_trigger(TriggerMode::Press);
        let committed = self.selection.write(index);
        self.pager.set_page(committed);
        self.progress.jump_to(committed);
        self.auto_scroll();
        true
    }

    /// Selects `index` and grows the indicator while it is held.
    pub fn begin_emphasis(&mut self, index: usize) {
        let index = self.clamp_index(index);
        self.select(index);
        if let Some(previous) = self.emphasis.begin(index, self.config.emphasis_scale) {
            debug!(previous, "emphasis taken over");
        }
        debug!(tab = index, "emphasis started");
    }

    /// Returns the indicator to its normal size if `index` holds the
    /// emphasis. Returns `true` if it did.
    pub fn end_emphasis(&mut self, index: usize) -> bool {
        let index = self.clamp_index(index);
        let released = self.emphasis.end(index);
        if released {
            debug!(tab = index, "emphasis ended");
        } else {
            trace!(tab = index, "stale emphasis end");
        }
        released
    }

    /// Applies a recognized gesture.
    pub fn on_gesture(&mut self, intent: GestureIntent) {
        match intent.kind {
            IntentKind::Select => {
                self.select(intent.tab);
            }
            IntentKind::EmphasisStart => self.begin_emphasis(intent.tab),
            IntentKind::EmphasisEnd => {
                self.end_emphasis(intent.tab);
            }
        }
    }

    /// Applies a report from the paged content host.
    pub fn on_page_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::Scroll(scroll) => self.progress.apply(scroll),
            PageEvent::Settled { position } => {
                let committed = self.selection.write(position);
                self.progress.jump_to(committed);
                self.set_trigger(self.trigger.after_settle());
                debug!(page = committed, "content settled");
                self.auto_scroll();
            }
        }
    }

    /// Applies one message posted from another thread.
    pub fn apply(&mut self, message: UiMessage) {
        match message {
            UiMessage::Gesture(intent) => self.on_gesture(intent),
            UiMessage::Page(event) => self.on_page_event(event),
            UiMessage::Measured { index, rect } => self.on_measure(index, rect),
            UiMessage::Viewport(width) => self.set_viewport_width(width),
        }
    }

    /// Applies every queued message in arrival order. Returns how many were
    /// applied.
    pub fn pump(&mut self, inbox: &UiInbox) -> usize {
        let mut applied = 0;
        while let Some(message) = inbox.try_next() {
            self.apply(message);
            applied += 1;
        }
        applied
    }

    /// Creates a frame driver for the indicator.
    ///
    /// Each driver has its own springs; create one per render loop.
    pub fn indicator_driver(&self) -> IndicatorDriver {
        IndicatorDriver::new(
            self.registry.clone(),
            self.progress.clone(),
            self.selection.reader(),
            self.emphasis.clone(),
            self.tabs.len(),
            IndicatorAnimator::new(self.config.indicator_spring, self.config.emphasis_spring),
        )
    }

    /// Creates the input-thread gesture front end, posting to `dispatcher`.
    pub fn gesture_input(&self, dispatcher: UiDispatcher) -> TabStripInput {
        TabStripInput::new(
            self.tabs.len(),
            self.config.gesture,
            self.registry.clone(),
            dispatcher,
        )
    }

    /// Read-only handle to the active tab.
    pub fn active_tab_reader(&self) -> ActiveTabReader {
        self.selection.reader()
    }

    /// Currently active tab.
    pub fn active_tab(&self) -> usize {
        self.selection.read()
    }

    /// Label views in tab order.
    pub fn tab_items(&self) -> Vec<TabItemView> {
        let active = self.selection.read();
        self.tabs
            .iter()
            .map(|tab| {
                let is_active = tab.index == active;
                TabItemView {
                    index: tab.index,
                    title: tab.title.clone(),
                    is_active,
                    text_style: self.style.text_for(is_active),
                }
            })
            .collect()
    }

    /// Why the active tab last changed.
    pub fn trigger_mode(&self) -> TriggerMode {
        self.trigger
    }

    /// Fractional page position reported by the content host.
    pub fn scroll_progress(&self) -> f32 {
        self.progress.value()
    }

    /// Number of tabs.
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Behavioural configuration.
    pub fn config(&self) -> &TabsConfig {
        &self.config
    }

    /// Styling overrides.
    pub fn style(&self) -> &TabsStyle {
        &self.style
    }

    /// The paged content host.
    pub fn pager(&self) -> &P {
        &self.pager
    }

    /// Mutable access to the paged content host, for feeding it input.
    pub fn pager_mut(&mut self) -> &mut P {
        &mut self.pager
    }

    /// The strip scroller.
    pub fn strip(&self) -> &S {
        &self.strip
    }

    /// Mutable access to the strip scroller.
    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    fn clamp_index(&self, index: usize) -> usize {
        let last = self.tabs.len().saturating_sub(1);
        if index > last {
            warn!(requested = index, clamped = last, "tab index out of range, clamping");
            last
        } else {
            index
        }
    }

    fn set_trigger(&mut self, trigger: TriggerMode) {
        if trigger != self.trigger {
            debug!(from = ?self.trigger, to = ?trigger, "trigger mode changed");
            self.trigger = trigger;
        }
    }

    fn auto_scroll(&mut self) {
        let active = self.selection.read();
        let tab_count = self.tabs.len();
        let (trigger, viewport_width) = (self.trigger, self.viewport_width);
        let coordinator = &mut self.coordinator;
        let target = self.registry.with(|registry| {
            coordinator.evaluate(registry, active, tab_count, trigger, viewport_width)
        });
        if let Some(x) = target {
            self.strip.scroll_to(x, true);
        }
    }
}
