/// 2D vector used for positions, sizes and velocities.
///
/// `glam::Vec2` already covers addition, scalar scaling, `normalize_or_zero`
/// (the zero vector stays zero) and `distance`; this module only adds the
/// few helpers the simulation needs on top.

pub use glam::Vec2 as Vector2;

pub trait Vector2Ext {
    /// Zero every component whose magnitude is below `epsilon`.
    fn zero_below(self, epsilon: f32) -> Self;
    /// Clamp each component to be non-negative.
    fn non_negative(self) -> Self;
}

impl Vector2Ext for Vector2 {
    fn zero_below(self, epsilon: f32) -> Self {
        let snap = |v: f32| if v.abs() < epsilon { 0.0 } else { v };
        Vector2::new(snap(self.x), snap(self.y))
    }

    fn non_negative(self) -> Self {
        self.max(Vector2::ZERO)
    }
}
