//! Indicator geometry and its per-frame animation.
//!
//! ## Usage
//!
//! [`compute_target`] is the pure mapping from measured tab layouts and scroll
//! progress to the indicator rectangle. [`IndicatorDriver`] is what the host
//! registers as its per-frame callback: it re-reads the shared inputs on every
//! call, feeds the target through springs and never blocks.

use std::time::Duration;

use tracing::{trace, warn};

use crate::{
    error::FrameError,
    geometry::{LayoutRect, lerp_clamped},
    progress::ScrollProgress,
    registry::{LayoutRegistry, SharedRegistry},
    selection::ActiveTabReader,
    spring::{Spring1D, SpringSpec},
    state::Shared,
};

/// Scale of a tab that is not emphasized.
pub const NEUTRAL_SCALE: f32 = 1.0;

/// Computes the indicator rectangle for a scroll-progress value.
///
/// - No measurements yet: a zero-sized rectangle at the origin.
/// - Either bracketing tab unmeasured: the active tab's rectangle, or zero-size
///   if that is unmeasured too.
/// - Otherwise `x` and `width` are interpolated between `floor(progress)` and
///   the next tab, never extrapolating past either; `height` and `y` come from
///   the lower tab.
pub fn compute_target(
    registry: &LayoutRegistry,
    progress: f32,
    active_tab: usize,
    tab_count: usize,
) -> Result<LayoutRect, FrameError> {
    if !progress.is_finite() {
        return Err(FrameError::NonFiniteProgress(progress));
    }
    if registry.is_empty() {
        return Ok(LayoutRect::ZERO);
    }

    let last = tab_count.saturating_sub(1);
    let floor = progress.floor();
    let bracket = if floor < 0.0 || floor as usize > last {
        None
    } else {
        let lo = floor as usize;
        let hi = (lo + 1).min(last);
        registry
            .get(lo)
            .zip(registry.get(hi))
            .map(|(from, to)| (lo, from, hi, to))
    };

    let Some((lo, from, hi, to)) = bracket else {
        let fallback = registry.get(active_tab).unwrap_or(LayoutRect::ZERO);
        if !fallback.is_finite() {
            return Err(FrameError::NonFiniteGeometry { index: active_tab });
        }
        return Ok(fallback);
    };

    if !from.is_finite() {
        return Err(FrameError::NonFiniteGeometry { index: lo });
    }
    if !to.is_finite() {
        return Err(FrameError::NonFiniteGeometry { index: hi });
    }

    let fraction = progress - floor;
    Ok(LayoutRect {
        x: lerp_clamped(from.x, to.x, fraction),
        y: from.y,
        width: lerp_clamped(from.width, to.width, fraction),
        height: from.height,
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EmphasisTarget {
    owner: Option<usize>,
    scale: f32,
}

/// Shared long-press emphasis target.
///
/// At most one tab owns the emphasis at a time; a new owner replaces the old
/// one instead of stacking a second animation.
#[derive(Clone, Debug)]
pub struct Emphasis {
    inner: Shared<EmphasisTarget>,
}

impl Default for Emphasis {
    fn default() -> Self {
        Self::new()
    }
}

impl Emphasis {
    /// Creates a neutral emphasis target.
    pub fn new() -> Self {
        Self {
            inner: Shared::new(EmphasisTarget {
                owner: None,
                scale: NEUTRAL_SCALE,
            }),
        }
    }

    /// Gives the emphasis to `tab`, returning the previous owner.
    pub fn begin(&self, tab: usize, scale: f32) -> Option<usize> {
        self.inner.with_mut(|target| {
            let previous = target.owner.replace(tab);
            target.scale = scale;
            previous
        })
    }

    /// Releases the emphasis if `tab` owns it. Returns `true` on release.
    pub fn end(&self, tab: usize) -> bool {
        self.inner.with_mut(|target| {
            if target.owner == Some(tab) {
                target.owner = None;
                target.scale = NEUTRAL_SCALE;
                true
            } else {
                false
            }
        })
    }

    /// Tab currently holding the emphasis.
    pub fn owner(&self) -> Option<usize> {
        self.inner.with(|target| target.owner)
    }

    /// Scale the emphasis spring should head toward.
    pub fn target_scale(&self) -> f32 {
        self.inner.with(|target| target.scale)
    }
}

/// Indicator values for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndicatorFrame {
    /// Rectangle to draw; `x` and `width` are spring-smoothed.
    pub rect: LayoutRect,
    /// Unsmoothed rectangle from [`compute_target`].
    pub target: LayoutRect,
    /// Emphasis scale transform.
    pub scale: f32,
}

impl Default for IndicatorFrame {
    fn default() -> Self {
        Self {
            rect: LayoutRect::ZERO,
            target: LayoutRect::ZERO,
            scale: NEUTRAL_SCALE,
        }
    }
}

/// Spring state for the indicator, carried from frame to frame.
#[derive(Clone, Debug)]
pub struct IndicatorAnimator {
    x: Spring1D,
    width: Spring1D,
    scale: Spring1D,
    position_spec: SpringSpec,
    emphasis_spec: SpringSpec,
    anchor: LayoutRect,
    initialized: bool,
}

impl IndicatorAnimator {
    /// Creates an animator with the given position and emphasis springs.
    pub fn new(position_spec: SpringSpec, emphasis_spec: SpringSpec) -> Self {
        Self {
            x: Spring1D::new(0.0),
            width: Spring1D::new(0.0),
            scale: Spring1D::new(NEUTRAL_SCALE),
            position_spec,
            emphasis_spec,
            anchor: LayoutRect::ZERO,
            initialized: false,
        }
    }

    /// Points the springs at a new target.
    ///
    /// The first real target snaps. Zero-sized placeholders are shown as-is
    /// until then; afterwards they hold the springs on the last real target.
    /// A placeholder is any target with no width and no height, so a tab
    /// that genuinely measures 0x0 also holds the springs where they are.
    pub fn retarget(&mut self, target: LayoutRect, scale: f32) {
        let placeholder = target.width <= 0.0 && target.height <= 0.0;
        if !placeholder {
            self.anchor = target;
            if self.initialized {
                self.x.set_target(target.x);
                self.width.set_target(target.width);
            } else {
                self.x.snap_to(target.x);
                self.width.snap_to(target.width);
                self.initialized = true;
            }
        }
        self.scale.set_target(scale);
    }

    /// Advances every spring by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.x.update(dt, &self.position_spec);
        self.width.update(dt, &self.position_spec);
        self.scale.update(dt, &self.emphasis_spec);
    }

    /// Builds the frame for `target` from the current spring values.
    pub fn frame(&self, target: LayoutRect) -> IndicatorFrame {
        let rect = if self.initialized {
            LayoutRect {
                x: self.x.value(),
                y: self.anchor.y,
                width: self.width.value().max(0.0),
                height: self.anchor.height,
            }
        } else {
            target
        };
        IndicatorFrame {
            rect,
            target,
            scale: self.scale.value(),
        }
    }

    /// Returns `true` while any spring is still moving.
    pub fn is_animating(&self) -> bool {
        self.x.is_animating(&self.position_spec)
            || self.width.is_animating(&self.position_spec)
            || self.scale.is_animating(&self.emphasis_spec)
    }
}

/// Per-frame indicator callback.
///
/// Owns the animator and handles to the shared inputs, so it can be moved to
/// a render thread. Each call reads the latest registry, progress, selection
/// and emphasis values.
pub struct IndicatorDriver {
    registry: SharedRegistry,
    progress: ScrollProgress,
    selection: ActiveTabReader,
    emphasis: Emphasis,
    tab_count: usize,
    animator: IndicatorAnimator,
    last_good: IndicatorFrame,
    skipped_frames: u64,
}

impl IndicatorDriver {
    pub(crate) fn new(
        registry: SharedRegistry,
        progress: ScrollProgress,
        selection: ActiveTabReader,
        emphasis: Emphasis,
        tab_count: usize,
        animator: IndicatorAnimator,
    ) -> Self {
        Self {
            registry,
            progress,
            selection,
            emphasis,
            tab_count,
            animator,
            last_good: IndicatorFrame::default(),
            skipped_frames: 0,
        }
    }

    /// Evaluates the indicator for a frame `dt` after the previous one.
    ///
    /// A frame that cannot be evaluated is skipped: the previous frame is
    /// returned and the springs are left untouched.
    pub fn next_frame(&mut self, dt: Duration) -> IndicatorFrame {
        match self.evaluate(dt) {
            Ok(frame) => {
                self.last_good = frame;
                frame
            }
            Err(err) => {
                self.skipped_frames += 1;
                warn!(error = %err, skipped = self.skipped_frames, "skipping indicator frame");
                self.last_good
            }
        }
    }

    fn evaluate(&mut self, dt: Duration) -> Result<IndicatorFrame, FrameError> {
        let progress = self.progress.value();
        let active_tab = self.selection.get();
        let target = self
            .registry
            .with(|registry| compute_target(registry, progress, active_tab, self.tab_count))?;

        self.animator.retarget(target, self.emphasis.target_scale());
        self.animator.step(dt.as_secs_f32());
        let frame = self.animator.frame(target);
        trace!(progress, ?frame, "indicator frame");
        Ok(frame)
    }

    /// Returns `true` while the host should keep requesting frames.
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Most recent successfully evaluated frame.
    pub fn last_frame(&self) -> IndicatorFrame {
        self.last_good
    }

    /// Number of frames skipped because they could not be evaluated.
    pub fn skipped_frames(&self) -> u64 {
        self.skipped_frames
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{progress::PageScroll, selection::SelectionState};

    const XS: [f32; 5] = [0.0, 88.0, 186.0, 264.0, 372.0];
    const WIDTHS: [f32; 5] = [80.0, 90.0, 70.0, 100.0, 85.0];

    fn measured() -> LayoutRegistry {
        let mut registry = LayoutRegistry::new();
        for (index, (x, width)) in XS.iter().zip(WIDTHS).enumerate() {
            registry.record(index, LayoutRect::new(*x, 0.0, width, 48.0));
        }
        registry
    }

    #[test]
    fn test_empty_registry_yields_zero_rect() {
        let rect = compute_target(&LayoutRegistry::new(), 1.5, 0, 5).expect("finite input");
        assert_eq!(rect, LayoutRect::ZERO);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    fn test_integer_progress_matches_tab(#[case] index: usize) {
        let registry = measured();
        let rect = compute_target(&registry, index as f32, 0, 5).expect("finite input");
        assert_eq!(Some(rect), registry.get(index));
    }

    #[test]
    fn test_values_stay_within_bracket() {
        let registry = measured();
        for step in 0..=400 {
            let value = step as f32 / 100.0;
            let rect = compute_target(&registry, value, 0, 5).expect("finite input");
            let lo = registry.get(value.floor() as usize).expect("measured");
            let hi = registry.get(value.ceil() as usize).expect("measured");
            let (min_x, max_x) = (lo.x.min(hi.x), lo.x.max(hi.x));
            let (min_w, max_w) = (lo.width.min(hi.width), lo.width.max(hi.width));
            assert!(rect.x >= min_x && rect.x <= max_x, "x at {value}");
            assert!(rect.width >= min_w && rect.width <= max_w, "width at {value}");
        }
    }

    #[test]
    fn test_midpoint_interpolation() {
        let rect = compute_target(&measured(), 0.5, 0, 5).expect("finite input");
        assert_eq!(rect.x, 44.0);
        assert_eq!(rect.width, 85.0);
        assert_eq!(rect.height, 48.0);
    }

    #[test]
    fn test_past_last_tab_does_not_extrapolate() {
        let rect = compute_target(&measured(), 4.7, 0, 5).expect("finite input");
        assert_eq!(rect, LayoutRect::new(372.0, 0.0, 85.0, 48.0));
    }

    #[test]
    fn test_unmeasured_bracket_falls_back_to_active() {
        let mut registry = LayoutRegistry::new();
        registry.record(0, LayoutRect::new(0.0, 0.0, 80.0, 48.0));
        registry.record(3, LayoutRect::new(264.0, 0.0, 100.0, 48.0));
        let rect = compute_target(&registry, 1.5, 3, 5).expect("finite input");
        assert_eq!(rect, LayoutRect::new(264.0, 0.0, 100.0, 48.0));
        let rect = compute_target(&registry, 1.5, 2, 5).expect("finite input");
        assert_eq!(rect, LayoutRect::ZERO);
    }

    #[test]
    fn test_negative_progress_falls_back() {
        let rect = compute_target(&measured(), -0.3, 2, 5).expect("finite input");
        assert_eq!(rect, LayoutRect::new(186.0, 0.0, 70.0, 48.0));
    }

    #[test]
    fn test_non_finite_inputs_are_errors() {
        assert!(matches!(
            compute_target(&measured(), f32::NAN, 0, 5),
            Err(FrameError::NonFiniteProgress(_))
        ));
        let mut registry = measured();
        registry.record(1, LayoutRect::new(f32::INFINITY, 0.0, 90.0, 48.0));
        assert_eq!(
            compute_target(&registry, 0.5, 0, 5),
            Err(FrameError::NonFiniteGeometry { index: 1 })
        );
    }

    #[test]
    fn test_emphasis_single_owner() {
        let emphasis = Emphasis::new();
        assert_eq!(emphasis.begin(1, 1.2), None);
        assert_eq!(emphasis.begin(2, 1.2), Some(1));
        assert!(!emphasis.end(1));
        assert_eq!(emphasis.target_scale(), 1.2);
        assert!(emphasis.end(2));
        assert_eq!(emphasis.target_scale(), NEUTRAL_SCALE);
        assert_eq!(emphasis.owner(), None);
    }

    fn driver(registry: LayoutRegistry) -> (IndicatorDriver, ScrollProgress, SelectionState, Emphasis) {
        let progress = ScrollProgress::new();
        let selection = SelectionState::new(5);
        let emphasis = Emphasis::new();
        let driver = IndicatorDriver::new(
            Shared::new(registry),
            progress.clone(),
            selection.reader(),
            emphasis.clone(),
            5,
            IndicatorAnimator::new(SpringSpec::INDICATOR, SpringSpec::EMPHASIS),
        );
        (driver, progress, selection, emphasis)
    }

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_first_frame_snaps_then_springs() {
        let (mut driver, progress, _, _) = driver(measured());
        let frame = driver.next_frame(FRAME);
        assert_eq!(frame.rect, frame.target);

        progress.jump_to(3);
        let frame = driver.next_frame(FRAME);
        assert_eq!(frame.target.x, 264.0);
        assert!(frame.rect.x > 0.0 && frame.rect.x < 264.0);
        assert!(driver.is_animating());

        for _ in 0..300 {
            driver.next_frame(FRAME);
        }
        let frame = driver.last_frame();
        assert_eq!(frame.rect, frame.target);
        assert!(!driver.is_animating());
    }

    #[test]
    fn test_scroll_updates_target_immediately() {
        let (mut driver, progress, _, _) = driver(measured());
        driver.next_frame(FRAME);
        progress.apply(PageScroll::new(0, 0.5));
        let frame = driver.next_frame(FRAME);
        assert_eq!(frame.target.width, 85.0);
    }

    #[test]
    fn test_emphasis_returns_to_neutral() {
        let (mut driver, _, _, emphasis) = driver(measured());
        emphasis.begin(0, 1.2);
        for _ in 0..10 {
            driver.next_frame(FRAME);
        }
        assert!(driver.last_frame().scale > NEUTRAL_SCALE);
        emphasis.end(0);
        for _ in 0..300 {
            driver.next_frame(FRAME);
        }
        assert_eq!(driver.last_frame().scale, NEUTRAL_SCALE);
    }

    #[test]
    fn test_bad_frame_keeps_last_good() {
        let (mut driver, progress, _, _) = driver(measured());
        progress.jump_to(1);
        let good = driver.next_frame(FRAME);
        progress.apply(PageScroll::new(0, f32::NAN));
        let skipped = driver.next_frame(FRAME);
        assert_eq!(skipped, good);
        assert_eq!(driver.skipped_frames(), 1);
    }

    #[test]
    fn test_placeholder_holds_springs() {
        let mut registry = LayoutRegistry::new();
        registry.record(0, LayoutRect::new(0.0, 0.0, 80.0, 48.0));
        let (mut driver, progress, selection, _) = driver(registry);
        driver.next_frame(FRAME);
        progress.jump_to(2);
        selection.write(2);
        let frame = driver.next_frame(FRAME);
        assert_eq!(frame.target, LayoutRect::ZERO);
        assert_eq!(frame.rect, LayoutRect::new(0.0, 0.0, 80.0, 48.0));
    }

    #[test]
    fn test_measured_empty_tab_holds_springs() {
        let mut registry = measured();
        registry.record(2, LayoutRect::new(186.0, 0.0, 0.0, 0.0));
        let (mut driver, progress, _, _) = driver(registry);
        progress.jump_to(1);
        driver.next_frame(FRAME);
        progress.jump_to(2);
        let frame = driver.next_frame(FRAME);
        assert_eq!(frame.target, LayoutRect::new(186.0, 0.0, 0.0, 0.0));
        assert_eq!(frame.rect, LayoutRect::new(88.0, 0.0, 90.0, 48.0));
    }
}
