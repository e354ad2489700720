//! Movement controller.
//!
//! Turns held keys into a unit intent vector, then integrates it into the
//! target position, clamps to the arena and smooths the visible position.

use glam::DVec2;

use creepfield_core::constants::MIN_DIRECTION;
use creepfield_core::input::{KeyState, KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_UP};
use creepfield_core::types::Bounds;

use crate::entity::Body;

/// Unit (or zero) direction from the movement keys.
pub fn compute_intent(keys: &KeyState) -> DVec2 {
    let mut d = DVec2::ZERO;
    if keys.is_down(KEY_UP) {
        d.y -= 1.0;
    }
    if keys.is_down(KEY_DOWN) {
        d.y += 1.0;
    }
    if keys.is_down(KEY_LEFT) {
        d.x -= 1.0;
    }
    if keys.is_down(KEY_RIGHT) {
        d.x += 1.0;
    }

    let magnitude = d.length();
    if magnitude < f64::EPSILON {
        return DVec2::ZERO;
    }

    let snap = |v: f64| {
        if !v.is_finite() || v.abs() <= MIN_DIRECTION {
            0.0
        } else {
            v
        }
    };
    let n = d / magnitude;
    DVec2::new(snap(n.x), snap(n.y))
}

/// Keep an AABB of `size` inside `bounds`. Collapses to 0 when it cannot fit.
pub fn clamp_target(target: DVec2, size: DVec2, bounds: Bounds) -> DVec2 {
    let max = bounds.as_vec() - size;
    DVec2::new(
        0.0_f64.max(max.x.min(target.x)),
        0.0_f64.max(max.y.min(target.y)),
    )
}

/// Advance the target by `intent * speed`, clamp it, and move the visible
/// position a `smoothing` fraction of the way there.
pub fn integrate(body: &mut Body, intent: DVec2, bounds: Bounds, smoothing: f64) {
    let motion = &mut body.motion;
    motion.target += intent * body.speed;
    motion.target = clamp_target(motion.target, body.size, bounds);
    motion.current += (motion.target - motion.current) * smoothing;
    body.position = motion.current;
}

#[cfg(test)]
mod tests {
    use super::*;
    use creepfield_core::input::ARROW_UP;

    fn body_at(x: f64, y: f64) -> Body {
        Body::checked("test", x, y, 15.0, 15.0, 2.0).unwrap()
    }

    #[test]
    fn test_intent_is_unit_or_zero_for_all_combinations() {
        let movement = [KEY_UP, KEY_DOWN, KEY_LEFT, KEY_RIGHT];
        for mask in 0u8..16 {
            let keys = KeyState::pressed(
                movement
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, k)| *k),
            );
            let len = compute_intent(&keys).length();
            assert!(
                len == 0.0 || (len - 1.0).abs() < 1e-12,
                "mask {mask:04b} gave length {len}"
            );
        }
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let keys = KeyState::pressed([KEY_LEFT, KEY_RIGHT]);
        assert_eq!(compute_intent(&keys), DVec2::ZERO);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let keys = KeyState::pressed([KEY_UP, KEY_RIGHT]);
        let intent = compute_intent(&keys);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!((intent - DVec2::new(h, -h)).length() < 1e-12);
    }

    #[test]
    fn test_arrow_keys_do_not_move() {
        assert_eq!(compute_intent(&KeyState::pressed([ARROW_UP])), DVec2::ZERO);
    }

    #[test]
    fn test_smoothing_idempotent_at_rest() {
        let mut body = body_at(100.0, 100.0);
        for _ in 0..10 {
            integrate(&mut body, DVec2::ZERO, Bounds::default(), 0.1);
        }
        assert_eq!(body.position, DVec2::new(100.0, 100.0));
        assert_eq!(body.motion.target, body.motion.current);
    }

    #[test]
    fn test_smoothing_covers_fraction_of_gap() {
        let mut body = body_at(100.0, 100.0);
        integrate(&mut body, DVec2::X, Bounds::default(), 0.1);
        assert_eq!(body.motion.target.x, 102.0);
        assert!((body.position.x - 100.2).abs() < 1e-12);
    }

    #[test]
    fn test_target_clamped_to_bounds() {
        let bounds = Bounds::new(200.0, 100.0);
        let mut body = body_at(180.0, 0.0);
        for _ in 0..50 {
            integrate(&mut body, DVec2::new(1.0, -1.0), bounds, 0.1);
            assert!(body.motion.target.x <= 185.0 && body.motion.target.x >= 0.0);
            assert!(body.motion.target.y >= 0.0 && body.motion.target.y <= 85.0);
        }
        assert_eq!(body.motion.target, DVec2::new(185.0, 0.0));
    }

    #[test]
    fn test_clamp_collapses_when_too_small() {
        let clamped = clamp_target(
            DVec2::new(5.0, 5.0),
            DVec2::new(20.0, 20.0),
            Bounds::new(10.0, 10.0),
        );
        assert_eq!(clamped, DVec2::ZERO);
    }
}
