/// Pure movement functions.
///
/// Each takes plain values and returns the new value; the player runs them
/// in order every tick (thrust, integrate, push back, damp, roll).

use crate::input::{Input, Key};
use crate::vector::{Vector2, Vector2Ext};

/// Velocity increment from the directional keys currently held.
pub fn thrust(input: &Input, acceleration: f32) -> Vector2 {
    Vector2::new(
        input.axis(Key::Left, Key::Right),
        input.axis(Key::Up, Key::Down),
    ) * acceleration
}

pub fn integrate(position: Vector2, velocity: Vector2) -> Vector2 {
    position + velocity
}

/// Soft boundary: on an axis where `position` has left `[min, max]`, push
/// the velocity back inward by `(|v| + push_back) * gain`.
///
/// The position itself is never clamped, so the body overshoots a little
/// and bounces back.
pub fn push_back(
    position: Vector2,
    velocity: Vector2,
    min: Vector2,
    max: Vector2,
    push_back: f32,
    gain: f32,
) -> Vector2 {
    let axis = |p: f32, v: f32, lo: f32, hi: f32| {
        let force = (v.abs() + push_back) * gain;
        if p < lo {
            v + force
        } else if p > hi {
            v - force
        } else {
            v
        }
    };
    Vector2::new(
        axis(position.x, velocity.x, min.x, max.x),
        axis(position.y, velocity.y, min.y, max.y),
    )
}

/// Exponential decay toward rest, snapping residue below `epsilon` to zero.
pub fn damp(velocity: Vector2, damping: f32, epsilon: f32) -> Vector2 {
    (velocity * damping).zero_below(epsilon)
}

/// Tilt driven by lateral input (-1, 0, 1); decays toward zero when idle.
pub fn update_roll(roll: f32, lateral: f32, rate: f32, damping: f32, max_roll: f32) -> f32 {
    let roll = if lateral == 0.0 {
        let decayed = roll * damping;
        if decayed.abs() < 1e-3 {
            0.0
        } else {
            decayed
        }
    } else {
        roll + lateral * rate
    };
    roll.clamp(-max_roll, max_roll)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thrust_follows_held_keys() {
        let mut input = Input::new();
        input.press(Key::Left);
        input.press(Key::Down);
        assert_eq!(thrust(&input, 0.5), Vector2::new(-0.5, 0.5));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut input = Input::new();
        input.press(Key::Left);
        input.press(Key::Right);
        assert_eq!(thrust(&input, 0.5).x, 0.0);
    }

    #[test]
    fn roll_is_clamped() {
        let mut roll = 0.0;
        for _ in 0..100 {
            roll = update_roll(roll, 1.0, 0.05, 0.8, 0.5);
        }
        assert_eq!(roll, 0.5);
    }

    #[test]
    fn roll_settles_when_idle() {
        let mut roll = 0.5;
        for _ in 0..100 {
            roll = update_roll(roll, 0.0, 0.05, 0.8, 0.5);
        }
        assert_eq!(roll, 0.0);
    }
}
