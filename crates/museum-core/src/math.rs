use std::f32::consts::{PI, TAU};

/// Wrap an angle difference into `(-PI, PI]`.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    PI - (PI - a).rem_euclid(TAU)
}

/// Step `from` toward `to` by `t` along the shorter arc.
#[inline]
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    from + wrap_angle(to - from) * t
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
