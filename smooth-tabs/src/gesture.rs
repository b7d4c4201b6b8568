//! Tap and long-press recognition for tab labels.
//!
//! ## Usage
//!
//! Recognizers may run on an input thread. They never touch widget state
//! directly: [`TabStripInput`] turns touches into [`GestureIntent`]s and posts
//! them to the UI thread through a [`UiDispatcher`].
//!
//! Each tab composes a [`TapDetector`] and a [`LongPressDetector`]. Whichever
//! commits first takes the winner lock for the rest of the touch sequence: a
//! release before the hold threshold is a tap, holding past it is a long
//! press, and moving beyond the touch slop first fails both.

use std::time::{Duration, Instant};

use derive_setters::Setters;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    dispatch::{UiDispatcher, UiMessage},
    geometry::{LayoutRect, Point},
    registry::SharedRegistry,
};

/// Thresholds shared by every tab's recognizer.
#[derive(Clone, Copy, Debug, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureConfig {
    /// Hold time after which a press becomes a long press.
    pub long_press_threshold: Duration,
    /// Movement allowed before the press is treated as a drag.
    pub touch_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_threshold: Duration::from_millis(500),
            touch_slop: 10.0,
        }
    }
}

/// Raw pointer input in strip-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Finger or button went down.
    Down {
        /// Where the pointer went down.
        position: Point,
        /// When it went down.
        at: Instant,
    },
    /// Pointer moved while down.
    Move {
        /// Current position.
        position: Point,
        /// Time of the move.
        at: Instant,
    },
    /// Pointer was released.
    Up {
        /// Release position.
        position: Point,
        /// Release time.
        at: Instant,
    },
    /// The platform took the sequence away (scroll, system gesture).
    Cancel {
        /// Cancellation time.
        at: Instant,
    },
}

/// Gesture that won a touch sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    /// Quick press and release.
    Tap,
    /// Press held past the threshold.
    LongPress,
}

/// What a recognized gesture asks the widget to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentKind {
    /// Select the tab.
    Select,
    /// Select the tab and start the emphasis animation.
    EmphasisStart,
    /// End the emphasis animation started by the paired start.
    EmphasisEnd,
}

/// A recognized gesture on one tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureIntent {
    /// Tab the gesture happened on.
    pub tab: usize,
    /// Requested action.
    pub kind: IntentKind,
}

impl GestureIntent {
    fn new(tab: usize, kind: IntentKind) -> Self {
        Self { tab, kind }
    }
}

/// Intents produced by a single input event.
pub type Intents = SmallVec<[GestureIntent; 2]>;

#[derive(Clone, Copy, Debug, PartialEq)]
enum TapState {
    Idle,
    Possible { origin: Point },
    Failed,
}

/// Recognizes a press followed by a release in place.
#[derive(Clone, Debug)]
pub struct TapDetector {
    state: TapState,
}

impl Default for TapDetector {
    fn default() -> Self {
        Self {
            state: TapState::Idle,
        }
    }
}

impl TapDetector {
    fn down(&mut self, origin: Point) {
        self.state = TapState::Possible { origin };
    }

    fn moved(&mut self, position: Point, slop: f32) {
        if let TapState::Possible { origin } = self.state
            && origin.distance_to(position) > slop
        {
            self.state = TapState::Failed;
        }
    }

    fn up(&mut self, position: Point, slop: f32, hit: Option<LayoutRect>) -> bool {
        self.moved(position, slop);
        let recognized = matches!(self.state, TapState::Possible { .. })
            && hit.is_some_and(|rect| rect.contains(position));
        self.state = TapState::Idle;
        recognized
    }

    fn fail(&mut self) {
        if matches!(self.state, TapState::Possible { .. }) {
            self.state = TapState::Failed;
        }
    }

    fn reset(&mut self) {
        self.state = TapState::Idle;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum LongPressState {
    Idle,
    Pressing { origin: Point, down_at: Instant },
    Emphasized,
    Failed,
}

/// Recognizes a press held past the threshold without moving.
#[derive(Clone, Debug)]
pub struct LongPressDetector {
    state: LongPressState,
}

impl Default for LongPressDetector {
    fn default() -> Self {
        Self {
            state: LongPressState::Idle,
        }
    }
}

impl LongPressDetector {
    fn down(&mut self, origin: Point, at: Instant) {
        self.state = LongPressState::Pressing {
            origin,
            down_at: at,
        };
    }

    fn moved(&mut self, position: Point, slop: f32) {
        if let LongPressState::Pressing { origin, .. } = self.state
            && origin.distance_to(position) > slop
        {
            self.state = LongPressState::Failed;
        }
    }

    /// Returns `true` when the hold threshold is crossed.
    fn poll(&mut self, now: Instant, threshold: Duration) -> bool {
        if let LongPressState::Pressing { down_at, .. } = self.state
            && now.saturating_duration_since(down_at) >= threshold
        {
            self.state = LongPressState::Emphasized;
            return true;
        }
        false
    }

    /// Ends the sequence; returns `true` if an emphasis was in progress.
    fn finish(&mut self) -> bool {
        let was_emphasized = self.state == LongPressState::Emphasized;
        self.state = LongPressState::Idle;
        was_emphasized
    }

    fn is_emphasized(&self) -> bool {
        self.state == LongPressState::Emphasized
    }
}

/// Per-tab recognizer with exclusive tap and long-press detection.
#[derive(Clone, Debug)]
pub struct TabGestureRecognizer {
    tab: usize,
    config: GestureConfig,
    tap: TapDetector,
    long_press: LongPressDetector,
    winner: Option<GestureKind>,
}

impl TabGestureRecognizer {
    /// Creates a recognizer for `tab`.
    pub fn new(tab: usize, config: GestureConfig) -> Self {
        Self {
            tab,
            config,
            tap: TapDetector::default(),
            long_press: LongPressDetector::default(),
            winner: None,
        }
    }

    /// Tab this recognizer belongs to.
    pub fn tab(&self) -> usize {
        self.tab
    }

    /// Gesture that won the current sequence, if any.
    pub fn winner(&self) -> Option<GestureKind> {
        self.winner
    }

    /// Feeds one pointer event. `hit` is the tab's current hit area.
    pub fn handle(&mut self, event: PointerEvent, hit: Option<LayoutRect>) -> Intents {
        let mut intents = Intents::new();
        match event {
            PointerEvent::Down { position, at } => {
                self.finish_sequence(&mut intents);
                if hit.is_some_and(|rect| rect.contains(position)) {
                    self.tap.down(position);
                    self.long_press.down(position, at);
                }
            }
            PointerEvent::Move { position, at } => {
                intents.extend(self.poll(at));
                if self.winner.is_none() {
                    self.tap.moved(position, self.config.touch_slop);
                    self.long_press.moved(position, self.config.touch_slop);
                }
            }
            PointerEvent::Up { position, at } => {
                intents.extend(self.poll(at));
                if self.winner.is_none()
                    && self.tap.up(position, self.config.touch_slop, hit)
                {
                    self.winner = Some(GestureKind::Tap);
                    trace!(tab = self.tab, "tap recognized");
                    intents.push(GestureIntent::new(self.tab, IntentKind::Select));
                }
                self.finish_sequence(&mut intents);
            }
            PointerEvent::Cancel { .. } => {
                self.finish_sequence(&mut intents);
            }
        }
        intents
    }

    /// Checks the hold threshold without new input.
    pub fn poll(&mut self, now: Instant) -> Option<GestureIntent> {
        if self.winner.is_some() {
            return None;
        }
        if self.long_press.poll(now, self.config.long_press_threshold) {
            self.winner = Some(GestureKind::LongPress);
            self.tap.fail();
            trace!(tab = self.tab, "long press recognized");
            return Some(GestureIntent::new(self.tab, IntentKind::EmphasisStart));
        }
        None
    }

    /// Abandons any sequence in progress, ending an active emphasis.
    pub fn reset(&mut self) -> Option<GestureIntent> {
        let mut intents = Intents::new();
        self.finish_sequence(&mut intents);
        intents.pop()
    }

    /// Returns `true` while a long press holds the emphasis.
    pub fn is_emphasized(&self) -> bool {
        self.long_press.is_emphasized()
    }

    fn finish_sequence(&mut self, intents: &mut Intents) {
        if self.long_press.finish() {
            intents.push(GestureIntent::new(self.tab, IntentKind::EmphasisEnd));
        }
        self.tap.reset();
        self.winner = None;
    }
}

/// Input-thread front end for a tab strip.
///
/// Captures the tab under the pointer on `Down`, routes the rest of the
/// sequence to that tab's recognizer and posts every intent to the UI thread.
pub struct TabStripInput {
    registry: SharedRegistry,
    recognizers: Vec<TabGestureRecognizer>,
    captured: Option<usize>,
    dispatcher: UiDispatcher,
}

impl TabStripInput {
    /// Creates recognizers for `tab_count` tabs.
    ///
    /// `registry` is only read, to hit-test touches against measured tabs.
    pub fn new(
        tab_count: usize,
        config: GestureConfig,
        registry: SharedRegistry,
        dispatcher: UiDispatcher,
    ) -> Self {
        Self {
            registry,
            recognizers: (0..tab_count)
                .map(|tab| TabGestureRecognizer::new(tab, config))
                .collect(),
            captured: None,
            dispatcher,
        }
    }

    /// Tab that owns the current touch sequence.
    pub fn captured(&self) -> Option<usize> {
        self.captured
    }

    /// Routes one pointer event.
    pub fn handle(&mut self, event: PointerEvent) {
        if let PointerEvent::Down { position, .. } = event {
            self.reset();
            self.captured = self.registry.with(|registry| registry.hit_test(position));
            trace!(captured = ?self.captured, "pointer down");
        }

        let Some(tab) = self.captured else {
            return;
        };
        let hit = self.registry.with(|registry| registry.get(tab));
        let intents = match self.recognizers.get_mut(tab) {
            Some(recognizer) => recognizer.handle(event, hit),
            None => Intents::new(),
        };
        if matches!(event, PointerEvent::Up { .. } | PointerEvent::Cancel { .. }) {
            self.captured = None;
        }
        self.post(intents);
    }

    /// Checks the captured tab's hold threshold.
    pub fn poll(&mut self, now: Instant) {
        let intent = self
            .captured
            .and_then(|tab| self.recognizers.get_mut(tab))
            .and_then(|recognizer| recognizer.poll(now));
        self.post(intent);
    }

    /// Abandons the current sequence, posting a pending emphasis end.
    pub fn reset(&mut self) {
        let intent = self
            .captured
            .take()
            .and_then(|tab| self.recognizers.get_mut(tab))
            .and_then(TabGestureRecognizer::reset);
        self.post(intent);
    }

    fn post(&self, intents: impl IntoIterator<Item = GestureIntent>) {
        for intent in intents {
            if !self.dispatcher.post(UiMessage::Gesture(intent)) {
                debug!(?intent, "ui thread gone, dropping gesture intent");
            }
        }
    }
}

impl Drop for TabStripInput {
    fn drop(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dispatch::ui_channel, registry::LayoutRegistry, state::Shared};

    const HIT: LayoutRect = LayoutRect::new(0.0, 0.0, 80.0, 48.0);

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    fn down(base: Instant, ms: u64, x: f32) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, 20.0),
            at: at(base, ms),
        }
    }

    fn moved(base: Instant, ms: u64, x: f32) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, 20.0),
            at: at(base, ms),
        }
    }

    fn up(base: Instant, ms: u64, x: f32) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, 20.0),
            at: at(base, ms),
        }
    }

    fn kinds(intents: &[GestureIntent]) -> Vec<IntentKind> {
        intents.iter().map(|intent| intent.kind).collect()
    }

    #[test]
    fn test_quick_release_is_tap() {
        let base = Instant::now();
        let mut recognizer = TabGestureRecognizer::new(3, GestureConfig::default());
        assert!(recognizer.handle(down(base, 0, 40.0), Some(HIT)).is_empty());
        let intents = recognizer.handle(up(base, 120, 42.0), Some(HIT));
        assert_eq!(intents.as_slice(), &[GestureIntent::new(3, IntentKind::Select)]);
    }

    #[test]
    fn test_release_outside_hit_area_is_not_tap() {
        let base = Instant::now();
        let mut recognizer = TabGestureRecognizer::new(0, GestureConfig::default().touch_slop(100.0));
        recognizer.handle(down(base, 0, 70.0), Some(HIT));
        assert!(recognizer.handle(up(base, 100, 90.0), Some(HIT)).is_empty());
    }

    #[test]
    fn test_drag_fails_both_detectors() {
        let base = Instant::now();
        let mut recognizer = TabGestureRecognizer::new(0, GestureConfig::default());
        recognizer.handle(down(base, 0, 10.0), Some(HIT));
        assert!(recognizer.handle(moved(base, 50, 40.0), Some(HIT)).is_empty());
        assert_eq!(recognizer.poll(at(base, 900)), None);
        assert!(recognizer.handle(up(base, 1000, 12.0), Some(HIT)).is_empty());
    }

    #[test]
    fn test_hold_emits_start_then_single_end() {
        let base = Instant::now();
        let mut recognizer = TabGestureRecognizer::new(1, GestureConfig::default());
        recognizer.handle(down(base, 0, 40.0), Some(HIT));
        assert_eq!(recognizer.poll(at(base, 499)), None);
        assert_eq!(
            recognizer.poll(at(base, 500)),
            Some(GestureIntent::new(1, IntentKind::EmphasisStart))
        );
        assert_eq!(recognizer.winner(), Some(GestureKind::LongPress));
        assert_eq!(recognizer.poll(at(base, 800)), None);
        let intents = recognizer.handle(up(base, 900, 40.0), Some(HIT));
        assert_eq!(kinds(&intents), vec![IntentKind::EmphasisEnd]);
        assert!(!recognizer.is_emphasized());
    }

    #[test]
    fn test_release_after_threshold_without_poll_pairs_start_and_end() {
        let base = Instant::now();
        let mut recognizer = TabGestureRecognizer::new(0, GestureConfig::default());
        recognizer.handle(down(base, 0, 40.0), Some(HIT));
        let intents = recognizer.handle(up(base, 700, 40.0), Some(HIT));
        assert_eq!(
            kinds(&intents),
            vec![IntentKind::EmphasisStart, IntentKind::EmphasisEnd]
        );
    }

    #[test]
    fn test_movement_after_emphasis_keeps_it() {
        let base = Instant::now();
        let mut recognizer = TabGestureRecognizer::new(0, GestureConfig::default());
        recognizer.handle(down(base, 0, 40.0), Some(HIT));
        recognizer.poll(at(base, 600));
        assert!(recognizer.handle(moved(base, 650, 200.0), Some(HIT)).is_empty());
        assert!(recognizer.is_emphasized());
    }

    #[test]
    fn test_cancel_ends_emphasis() {
        let base = Instant::now();
        let mut recognizer = TabGestureRecognizer::new(2, GestureConfig::default());
        recognizer.handle(down(base, 0, 40.0), Some(HIT));
        recognizer.poll(at(base, 600));
        let intents = recognizer.handle(PointerEvent::Cancel { at: at(base, 650) }, Some(HIT));
        assert_eq!(intents.as_slice(), &[GestureIntent::new(2, IntentKind::EmphasisEnd)]);
        assert!(
            recognizer
                .handle(PointerEvent::Cancel { at: at(base, 700) }, Some(HIT))
                .is_empty()
        );
    }

    #[test]
    fn test_cancel_before_threshold_emits_nothing() {
        let base = Instant::now();
        let mut recognizer = TabGestureRecognizer::new(2, GestureConfig::default());
        recognizer.handle(down(base, 0, 40.0), Some(HIT));
        assert!(
            recognizer
                .handle(PointerEvent::Cancel { at: at(base, 100) }, Some(HIT))
                .is_empty()
        );
        assert_eq!(recognizer.poll(at(base, 900)), None);
    }

    #[test]
    fn test_reset_ends_emphasis() {
        let base = Instant::now();
        let mut recognizer = TabGestureRecognizer::new(4, GestureConfig::default());
        recognizer.handle(down(base, 0, 40.0), Some(HIT));
        recognizer.poll(at(base, 600));
        assert_eq!(
            recognizer.reset(),
            Some(GestureIntent::new(4, IntentKind::EmphasisEnd))
        );
        assert_eq!(recognizer.reset(), None);
    }

    #[test]
    fn test_down_outside_hit_area_is_ignored() {
        let base = Instant::now();
        let mut recognizer = TabGestureRecognizer::new(0, GestureConfig::default());
        recognizer.handle(down(base, 0, 200.0), Some(HIT));
        assert_eq!(recognizer.poll(at(base, 900)), None);
        assert!(recognizer.handle(up(base, 950, 200.0), Some(HIT)).is_empty());
    }

    fn strip() -> (TabStripInput, crate::dispatch::UiInbox) {
        let mut registry = LayoutRegistry::new();
        registry.record(0, LayoutRect::new(0.0, 0.0, 80.0, 48.0));
        registry.record(1, LayoutRect::new(88.0, 0.0, 90.0, 48.0));
        let (dispatcher, inbox) = ui_channel();
        let input = TabStripInput::new(2, GestureConfig::default(), Shared::new(registry), dispatcher);
        (input, inbox)
    }

    fn drain(inbox: &crate::dispatch::UiInbox) -> Vec<UiMessage> {
        std::iter::from_fn(|| inbox.try_next()).collect()
    }

    #[test]
    fn test_strip_routes_tap_to_hit_tab() {
        let base = Instant::now();
        let (mut input, inbox) = strip();
        input.handle(down(base, 0, 100.0));
        assert_eq!(input.captured(), Some(1));
        input.handle(up(base, 80, 101.0));
        assert_eq!(input.captured(), None);
        assert_eq!(
            drain(&inbox),
            vec![UiMessage::Gesture(GestureIntent::new(1, IntentKind::Select))]
        );
    }

    #[test]
    fn test_strip_ignores_gaps() {
        let base = Instant::now();
        let (mut input, inbox) = strip();
        input.handle(down(base, 0, 84.0));
        assert_eq!(input.captured(), None);
        input.handle(up(base, 50, 84.0));
        assert!(drain(&inbox).is_empty());
    }

    #[test]
    fn test_strip_drop_ends_emphasis() {
        let base = Instant::now();
        let (mut input, inbox) = strip();
        input.handle(down(base, 0, 10.0));
        input.poll(at(base, 600));
        drop(input);
        assert_eq!(
            drain(&inbox),
            vec![
                UiMessage::Gesture(GestureIntent::new(0, IntentKind::EmphasisStart)),
                UiMessage::Gesture(GestureIntent::new(0, IntentKind::EmphasisEnd)),
            ]
        );
    }
}
