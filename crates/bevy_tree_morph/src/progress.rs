//! Per-group progress integration.
//!
//! Progress is exponential smoothing toward the live target, not a
//! fixed-duration tween: each tick closes a `lerp_speed * dt` fraction of the
//! remaining gap, so convergence is asymptotic and a mid-flight toggle simply
//! reverses direction of the same continuous value.

use bevy::prelude::*;

use crate::data::{GroupConfig, TreeState};

/// Continuous convergence state of one group, in [0, 1]. 0 is the chaos
/// cloud, 1 the assembled tree. Only the integrator writes it.
#[derive(Component, Clone, Copy, Debug, Default, Reflect)]
#[reflect(Component, Default)]
pub struct GroupProgress {
    pub value: f32,
}

/// Sanitize a frame delta: negative or non-finite samples collapse to zero
/// so one bad clock reading stalls the animation for a frame instead of
/// corrupting it.
pub fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// One smoothing step of `progress` toward `target`. The blend fraction is
/// capped at 1 so an arbitrarily long frame lands exactly on the target
/// instead of overshooting, and the result is clamped against float drift.
pub fn advance(progress: f32, target: f32, lerp_speed: f32, dt: f32) -> f32 {
    let k = (lerp_speed * sanitize_delta(dt)).min(1.0);
    (progress + (target - progress) * k).clamp(0.0, 1.0)
}

/// Advance every group's progress toward the current global target.
/// Reads `TreeState` live each tick.
pub fn integrate_progress(
    time: Res<Time>,
    state: Res<TreeState>,
    mut groups: Query<(&GroupConfig, &mut GroupProgress)>,
) {
    let dt = time.delta_secs();
    let target = state.target();
    for (config, mut progress) in &mut groups {
        progress.value = advance(progress.value, target, config.lerp_speed, dt);
    }
}
