//! Position blending policies.
//!
//! Two independent strategies coexist, bound to a group by its role:
//!
//! - The point-cloud policy drives every vertex from one eased progress
//!   scalar. The per-vertex mix runs in the foliage vertex shader;
//!   [`ease_in_out_cubic`] is the single CPU source of the curve and
//!   [`point_blend`] is its CPU reference (used by the test suite and by
//!   anything that wants host-side positions).
//! - The instance policy pulls each particle toward the live endpoint with a
//!   distance-weighted lerp, so far-away instances close the gap faster and
//!   arrivals stagger organically.

use bevy::prelude::*;

use crate::progress::sanitize_delta;

/// Cubic ease-in-out: accelerate through the first half, decelerate through
/// the second. Input and output both clamped to [0, 1].
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Point-cloud policy, host-side reference: eased lerp from origin to
/// destination. The result always lies on the segment between the two
/// endpoints.
pub fn point_blend(origin: Vec3, destination: Vec3, progress: f32) -> Vec3 {
    origin.lerp(destination, ease_in_out_cubic(progress))
}

/// Ambient wind sway overlaid once the cloud is nearly formed
/// (progress > 0.8). Amplitude fades with height so the treetop barely
/// moves. Mirrored by the foliage vertex shader; exposed here as the CPU
/// reference.
pub fn sway_offset(position: Vec3, elapsed: f32) -> Vec3 {
    let amplitude = 0.05 * (1.0 - position.y / 10.0);
    Vec3::new(
        (elapsed * 2.0 + position.y).sin() * amplitude,
        0.0,
        (elapsed * 1.5 + position.y).cos() * amplitude,
    )
}

/// Instance policy: one distance-weighted pull of `current` toward
/// `endpoint`. The speed term grows with the remaining distance, so each
/// particle has its own implicit convergence rate; the blend fraction is
/// capped at 1 so a long frame lands on the endpoint instead of overshooting.
pub fn instance_step(current: Vec3, endpoint: Vec3, lerp_speed: f32, dt: f32) -> Vec3 {
    let dt = sanitize_delta(dt);
    let speed = lerp_speed + current.distance(endpoint) * 0.1;
    let k = (speed * dt * 0.5).clamp(0.0, 1.0);
    current.lerp(endpoint, k)
}

/// Spin direction alternates by index parity so neighboring ornaments
/// counter-rotate.
pub fn spin_direction(index: usize) -> f32 {
    if index % 2 == 0 { 1.0 } else { -1.0 }
}

/// Small per-instance wobble around Z, phase-shifted by index.
pub fn wobble_angle(elapsed: f32, index: usize) -> f32 {
    (elapsed + index as f32).sin() * 0.1
}

/// Render-time twinkle for lights. Returns the display scale; the stored
/// base scale is never written back.
pub fn light_pulse(base_scale: f32, elapsed: f32, index: usize) -> f32 {
    base_scale * (1.0 + (elapsed * 5.0 + index as f32).sin() * 0.3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_hits_endpoints_and_midpoint() {
        assert!(ease_in_out_cubic(0.0).abs() < 1e-6);
        assert!((ease_in_out_cubic(1.0) - 1.0).abs() < 1e-6);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        // Acceleration phase: early progress maps below linear.
        assert!(ease_in_out_cubic(0.25) < 0.25);
        // Deceleration phase: late progress maps above linear.
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn ease_clamps_out_of_range_input() {
        assert_eq!(ease_in_out_cubic(-0.5), 0.0);
        assert_eq!(ease_in_out_cubic(1.5), 1.0);
    }

    #[test]
    fn point_blend_stays_on_segment() {
        let origin = Vec3::new(-10.0, 4.0, 2.0);
        let destination = Vec3::new(3.0, -1.0, 8.0);
        let length = origin.distance(destination);
        for i in 0..=20 {
            let progress = i as f32 / 20.0;
            let p = point_blend(origin, destination, progress);
            // On the segment: the two partial distances sum to the length.
            let total = origin.distance(p) + p.distance(destination);
            assert!((total - length).abs() < 1e-3);
        }
    }

    #[test]
    fn instance_step_never_overshoots() {
        let endpoint = Vec3::new(5.0, 0.0, 0.0);
        let mut current = Vec3::new(-20.0, 10.0, 3.0);
        let start_dist = current.distance(endpoint);
        let mut dist = start_dist;
        for _ in 0..600 {
            current = instance_step(current, endpoint, 2.0, 1.0 / 60.0);
            let next = current.distance(endpoint);
            assert!(next <= dist + 1e-5, "distance grew: {next} > {dist}");
            dist = next;
        }
        assert!(dist < start_dist * 0.01);
    }

    #[test]
    fn instance_step_large_frame_lands_on_endpoint() {
        let endpoint = Vec3::splat(2.0);
        let stepped = instance_step(Vec3::ZERO, endpoint, 10.0, 10.0);
        assert!(stepped.distance(endpoint) < 1e-6);
    }

    #[test]
    fn instance_step_reverses_without_discontinuity() {
        let origin = Vec3::ZERO;
        let destination = Vec3::new(10.0, 0.0, 0.0);
        let mut current = origin;
        for _ in 0..30 {
            current = instance_step(current, destination, 2.0, 1.0 / 60.0);
        }
        let before = current;
        // Retarget to the origin: movement continues from the same position,
        // bounded by one tick's maximum step.
        let after = instance_step(before, origin, 2.0, 1.0 / 60.0);
        let max_step =
            (2.0 + before.distance(origin) * 0.1) * (1.0 / 60.0) * 0.5 * before.distance(origin);
        assert!(after.distance(origin) < before.distance(origin));
        assert!(before.distance(after) <= max_step + 1e-5);
    }

    #[test]
    fn instance_step_ignores_bad_deltas() {
        let current = Vec3::new(1.0, 2.0, 3.0);
        let endpoint = Vec3::new(4.0, 5.0, 6.0);
        for bad in [-0.1, f32::NAN, f32::INFINITY] {
            assert_eq!(instance_step(current, endpoint, 2.0, bad), current);
        }
    }

    #[test]
    fn far_particles_close_faster() {
        let endpoint = Vec3::ZERO;
        let near = Vec3::new(1.0, 0.0, 0.0);
        let far = Vec3::new(30.0, 0.0, 0.0);
        let dt = 1.0 / 60.0;
        let near_frac = 1.0 - instance_step(near, endpoint, 1.0, dt).x / near.x;
        let far_frac = 1.0 - instance_step(far, endpoint, 1.0, dt).x / far.x;
        assert!(far_frac > near_frac);
    }

    #[test]
    fn pulse_leaves_base_scale_alone() {
        let base = 1.3;
        for i in 0..8 {
            let display = light_pulse(base, i as f32 * 0.37, i);
            assert!(display >= base * 0.7 - 1e-6);
            assert!(display <= base * 1.3 + 1e-6);
        }
    }

    #[test]
    fn spin_parity_alternates() {
        assert_eq!(spin_direction(0), 1.0);
        assert_eq!(spin_direction(1), -1.0);
        assert_eq!(spin_direction(2), 1.0);
    }

    #[test]
    fn sway_fades_with_height() {
        let low = sway_offset(Vec3::new(0.0, -6.0, 0.0), 1.0);
        let high = sway_offset(Vec3::new(0.0, 8.0, 0.0), 1.0);
        assert!(high.length() < low.length());
        assert_eq!(low.y, 0.0);
    }
}
