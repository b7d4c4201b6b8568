//! Behavioural configuration of a tab widget.

use derive_setters::Setters;

use crate::{gesture::GestureConfig, pager::PagerConfig, spring::SpringSpec};

/// Tuning knobs for [`TabContainer`](crate::container::TabContainer).
///
/// # Examples
///
/// ```
/// use smooth_tabs::{config::TabsConfig, spring::SpringSpec};
///
/// let config = TabsConfig::default()
///     .viewport_width(320.0)
///     .indicator_spring(SpringSpec::critically_damped(400.0));
/// assert_eq!(config.viewport_width, 320.0);
/// assert_eq!(config.emphasis_scale, 1.2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TabsConfig {
    /// Initial width of the strip viewport.
    pub viewport_width: f32,
    /// Tap and long-press thresholds.
    pub gesture: GestureConfig,
    /// Spring for the indicator's position and width.
    pub indicator_spring: SpringSpec,
    /// Spring for the long-press emphasis scale.
    pub emphasis_spring: SpringSpec,
    /// Scale the indicator grows to while a tab is held.
    pub emphasis_scale: f32,
    /// Snapping of the reference pager.
    pub pager: PagerConfig,
    /// Spring for animated strip scrolling.
    pub strip_spring: SpringSpec,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            viewport_width: 390.0,
            gesture: GestureConfig::default(),
            indicator_spring: SpringSpec::INDICATOR,
            emphasis_spring: SpringSpec::EMPHASIS,
            emphasis_scale: 1.2,
            pager: PagerConfig::default(),
            strip_spring: SpringSpec::critically_damped(300.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = TabsConfig::default();
        assert_eq!(config.gesture.long_press_threshold, Duration::from_millis(500));
        assert_eq!(config.indicator_spring.stiffness, 100.0);
        assert_eq!(config.emphasis_spring.stiffness, 900.0);
        assert_eq!(config.pager.snap_threshold, 0.5);
    }

    #[test]
    fn test_emphasis_spring_is_stiffer() {
        let config = TabsConfig::default();
        assert!(config.emphasis_spring.stiffness > config.indicator_spring.stiffness);
    }
}
