//! Small geometric helpers shared by the kinematic controllers.

use glam::Vec3;

/// Whether an axis has reached or gone past its target.
///
/// `remaining` is `target - position` on that axis and `direction` the travel
/// direction on the same axis. Exact zero counts as reached, as does any
/// axis the segment does not travel along.
#[inline]
pub fn reached_or_passed(remaining: f32, direction: f32) -> bool {
    remaining == 0.0 || direction == 0.0 || (remaining > 0.0) != (direction > 0.0)
}

/// Snap every axis that reached or passed `target` exactly onto it.
///
/// Returns `true` once all three axes sit on the target.
pub fn snap_to_target(position: &mut Vec3, target: Vec3, direction: Vec3) -> bool {
    let remaining = target - *position;
    let mut snapped = 0;
    for i in 0..3 {
        if reached_or_passed(remaining[i], direction[i]) {
            position[i] = target[i];
            snapped += 1;
        }
    }
    snapped == 3
}

/// Unit vector from `from` to `to`, or zero when the points coincide.
#[inline]
pub fn segment_direction(from: Vec3, to: Vec3) -> Vec3 {
    (to - from).normalize_or_zero()
}

/// `value` lies strictly inside the interval spanned by `a` and `b`.
#[inline]
pub fn strictly_between(value: f32, a: f32, b: f32) -> bool {
    value > a.min(b) && value < a.max(b)
}
