//! Frame-stepped damped springs.
//!
//! Springs carry their state from frame to frame and cost O(1) per update, so
//! they can be evaluated inside a render pass without blocking it.

use derive_setters::Setters;

/// Largest frame delta a spring will integrate in one update, in seconds.
const MAX_FRAME_DT: f32 = 0.05;
/// Integration sub-step, in seconds.
const SUBSTEP_DT: f32 = 1.0 / 240.0;

/// Physical parameters of a damped spring.
#[derive(Clone, Copy, Debug, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringSpec {
    /// Spring constant.
    pub stiffness: f32,
    /// Damping coefficient (not a ratio).
    pub damping: f32,
    /// Mass attached to the spring.
    pub mass: f32,
    /// Displacement below which the spring may come to rest.
    pub rest_delta: f32,
    /// Speed below which the spring may come to rest.
    pub rest_velocity: f32,
}

impl SpringSpec {
    /// Spring that follows the indicator along the strip.
    pub const INDICATOR: Self = Self {
        stiffness: 100.0,
        damping: 30.0,
        mass: 1.0,
        rest_delta: 0.5,
        rest_velocity: 0.5,
    };

    /// Stiffer spring for the long-press scale.
    pub const EMPHASIS: Self = Self {
        stiffness: 900.0,
        damping: 50.0,
        mass: 5.0,
        rest_delta: 0.001,
        rest_velocity: 0.01,
    };

    /// Unit-mass spring with the given damping ratio.
    pub fn from_damping_ratio(stiffness: f32, damping_ratio: f32) -> Self {
        let stiffness = stiffness.max(0.0);
        Self {
            stiffness,
            damping: 2.0 * damping_ratio.max(0.0) * stiffness.sqrt(),
            mass: 1.0,
            rest_delta: 0.5,
            rest_velocity: 0.5,
        }
    }

    /// Unit-mass spring with no overshoot.
    pub fn critically_damped(stiffness: f32) -> Self {
        Self::from_damping_ratio(stiffness, 1.0)
    }

    /// Damping ratio implied by these parameters.
    pub fn damping_ratio(&self) -> f32 {
        let critical = 2.0 * (self.stiffness * self.mass).sqrt();
        if critical <= f32::EPSILON {
            0.0
        } else {
            self.damping / critical
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::INDICATOR
    }
}

/// One-dimensional spring state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring1D {
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring1D {
    /// Spring at rest on `value`.
    pub fn new(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
        }
    }

    /// Jumps to `value` and stops.
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Moves the target; the current value and velocity carry over.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current target.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Current velocity.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Advances the spring by `dt` seconds.
    pub fn update(&mut self, dt: f32, spec: &SpringSpec) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        if spec.stiffness <= 0.0 || spec.mass <= 0.0 {
            self.snap_to(self.target);
            return;
        }

        let damping = spec.damping.max(0.0);
        let mut remaining = dt;
        while remaining > 0.0 {
            let step = remaining.min(SUBSTEP_DT);
            let displacement = self.value - self.target;
            let acceleration = (-spec.stiffness * displacement - damping * self.velocity) / spec.mass;
            self.velocity += acceleration * step;
            self.value += self.velocity * step;
            remaining -= step;
        }

        if !self.is_animating(spec) {
            self.snap_to(self.target);
        }
    }

    /// Returns `true` while the spring is away from its target or still moving.
    pub fn is_animating(&self, spec: &SpringSpec) -> bool {
        (self.value - self.target).abs() >= spec.rest_delta
            || self.velocity.abs() >= spec.rest_velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring1D, spec: &SpringSpec, seconds: f32) {
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            spring.update(1.0 / 60.0, spec);
        }
    }

    #[test]
    fn test_converges_to_target() {
        let spec = SpringSpec::INDICATOR;
        let mut spring = Spring1D::new(0.0);
        spring.set_target(88.0);
        run(&mut spring, &spec, 3.0);
        assert_eq!(spring.value(), 88.0);
        assert!(!spring.is_animating(&spec));
    }

    #[test]
    fn test_emphasis_settles_back_to_neutral() {
        let spec = SpringSpec::EMPHASIS;
        let mut spring = Spring1D::new(1.0);
        spring.set_target(1.2);
        run(&mut spring, &spec, 0.2);
        assert!(spring.value() > 1.0);
        spring.set_target(1.0);
        run(&mut spring, &spec, 3.0);
        assert_eq!(spring.value(), 1.0);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let spec = SpringSpec::INDICATOR;
        let mut spring = Spring1D::new(0.0);
        spring.set_target(100.0);
        run(&mut spring, &spec, 0.1);
        let velocity = spring.velocity();
        assert!(velocity > 0.0);
        spring.set_target(200.0);
        assert_eq!(spring.velocity(), velocity);
        assert_eq!(spring.target(), 200.0);
    }

    #[test]
    fn test_overdamped_never_overshoots() {
        let spec = SpringSpec::INDICATOR;
        let mut spring = Spring1D::new(0.0);
        spring.set_target(50.0);
        for _ in 0..300 {
            spring.update(1.0 / 60.0, &spec);
            assert!(spring.value() <= 50.0);
        }
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let spec = SpringSpec::critically_damped(700.0);
        let mut spring = Spring1D::new(0.0);
        spring.set_target(10.0);
        spring.update(10.0, &spec);
        assert!(spring.value() < 10.0);
        assert!(spring.value().is_finite());
    }

    #[test]
    fn test_zero_stiffness_snaps() {
        let spec = SpringSpec::INDICATOR.stiffness(0.0);
        let mut spring = Spring1D::new(0.0);
        spring.set_target(42.0);
        spring.update(1.0 / 60.0, &spec);
        assert_eq!(spring.value(), 42.0);
    }

    #[test]
    fn test_damping_ratio() {
        let spec = SpringSpec::critically_damped(400.0);
        assert!((spec.damping_ratio() - 1.0).abs() < 1e-6);
        assert!(SpringSpec::INDICATOR.damping_ratio() > 1.0);
        assert!(SpringSpec::EMPHASIS.damping_ratio() < 1.0);
    }
}
