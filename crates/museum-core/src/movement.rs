//! Character kinematics.
//!
//! Two poses are kept apart on purpose: the *logical* pose in the store is
//! clamped and drives gameplay (bounds, proximity); the *rendered* pose here
//! trails it with exponential smoothing and only feeds visuals.

use crate::config::{MovementCfg, RoomBounds};
use crate::constants::*;
use crate::input::KeyCode;
use crate::math::{lerp, lerp_angle};
use crate::store::Store;
use glam::Vec2;

/// Visual-only character transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedPose {
    /// `(x, z)`
    pub position: Vec2,
    pub rotation: f32,
    /// Vertical offset from the walk bob.
    pub bob: f32,
    /// Roll from side-to-side sway.
    pub sway: f32,
    /// Pitch from the forward/back lean.
    pub tilt: f32,
}

impl RenderedPose {
    fn at(position: Vec2) -> Self {
        Self {
            position,
            rotation: INITIAL_RENDERED_ROTATION,
            bob: 0.0,
            sway: 0.0,
            tilt: 0.0,
        }
    }
}

/// Unit-step direction from the pressed keys; each axis is -1, 0 or 1.
#[must_use]
pub fn input_axes(store: &Store) -> Vec2 {
    let held = |a: KeyCode, b: KeyCode| store.is_pressed(a) || store.is_pressed(b);
    let mut axes = Vec2::ZERO;
    if held(KeyCode::ArrowUp, KeyCode::KeyW) {
        axes.y -= 1.0;
    }
    if held(KeyCode::ArrowDown, KeyCode::KeyS) {
        axes.y += 1.0;
    }
    if held(KeyCode::ArrowLeft, KeyCode::KeyA) {
        axes.x -= 1.0;
    }
    if held(KeyCode::ArrowRight, KeyCode::KeyD) {
        axes.x += 1.0;
    }
    axes
}

/// Displacement for one frame: `speed * delta` along each held axis, with
/// diagonals rescaled so their length is exactly `speed * delta`.
#[must_use]
pub fn frame_displacement(axes: Vec2, speed: f32, delta: f32) -> Vec2 {
    axes.normalize_or_zero() * (speed * delta)
}

#[derive(Clone, Debug)]
pub struct MovementIntegrator {
    cfg: MovementCfg,
    bounds: RoomBounds,
    rendered: RenderedPose,
    walk_phase: f32,
}

impl MovementIntegrator {
    pub fn new(cfg: MovementCfg, bounds: RoomBounds) -> Self {
        Self {
            cfg,
            bounds,
            rendered: RenderedPose::at(cfg.start),
            walk_phase: 0.0,
        }
    }

    #[inline]
    pub fn rendered(&self) -> &RenderedPose {
        &self.rendered
    }

    /// Advance one frame. Returns whether movement input was applied.
    /// Does nothing while the menu is open.
    pub fn step(&mut self, store: &mut Store, delta: f32) -> bool {
        if store.is_menu_open() {
            return false;
        }

        let d = frame_displacement(input_axes(store), self.cfg.move_speed, delta);
        let moving = d != Vec2::ZERO;

        if moving {
            let next = self.bounds.clamp(store.character().position + d);
            store.set_character_position(next);
            store.set_character_rotation(d.x.atan2(d.y));
            self.walk_phase += delta * WALK_CYCLE_RATE;
        }

        let logical = *store.character();
        let r = &mut self.rendered;
        r.position = r.position.lerp(logical.position, self.cfg.position_smoothing);
        r.rotation = lerp_angle(r.rotation, logical.rotation, self.cfg.rotation_smoothing);

        if moving {
            r.bob = self.walk_phase.sin().abs() * WALK_BOB_AMPLITUDE;
            r.sway = self.walk_phase.sin() * WALK_SWAY_AMPLITUDE;
            r.tilt = (self.walk_phase * 2.0).sin() * WALK_TILT_AMPLITUDE;
        } else {
            r.bob = lerp(r.bob, 0.0, WALK_SETTLE);
            r.sway = lerp(r.sway, 0.0, WALK_SETTLE);
            r.tilt = lerp(r.tilt, 0.0, WALK_SETTLE);
        }
        moving
    }

    /// Snap the rendered pose back onto `start` (restart).
    pub fn reset(&mut self, start: Vec2) {
        self.rendered = RenderedPose::at(start);
        self.walk_phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AppPhase;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn setup(start: Vec2) -> (Store, MovementIntegrator) {
        let mut store = Store::new(start);
        store.set_phase(AppPhase::Museum);
        let cfg = MovementCfg {
            start,
            ..MovementCfg::default()
        };
        (store, MovementIntegrator::new(cfg, RoomBounds::default()))
    }

    #[test]
    fn opposing_keys_cancel_and_duplicates_count_once() {
        let (mut store, _) = setup(Vec2::ZERO);
        store.press_key(KeyCode::KeyW);
        store.press_key(KeyCode::ArrowUp);
        assert_eq!(input_axes(&store), Vec2::new(0.0, -1.0));
        store.press_key(KeyCode::KeyS);
        assert_eq!(input_axes(&store), Vec2::ZERO);
    }

    #[test]
    fn diagonal_keeps_speed_at_extreme_deltas() {
        for delta in [1e-30_f32, 1e20] {
            let step = MOVE_SPEED * delta;
            let d = frame_displacement(Vec2::new(1.0, -1.0), MOVE_SPEED, delta);
            let per_axis = step * std::f32::consts::FRAC_1_SQRT_2;
            assert!(d.is_finite(), "delta {delta}: {d:?}");
            assert!(((d.x - per_axis) / per_axis).abs() < 1e-5, "delta {delta}: {d:?}");
            assert!(((-d.y - per_axis) / per_axis).abs() < 1e-5, "delta {delta}: {d:?}");
            let straight = frame_displacement(Vec2::new(0.0, -1.0), MOVE_SPEED, delta);
            assert_eq!(straight, Vec2::new(0.0, -step));
        }
    }

    #[test]
    fn tiny_delta_does_not_jump_to_a_corner() {
        let start = Vec2::new(0.0, -4.0);
        let (mut store, mut mover) = setup(start);
        store.press_key(KeyCode::KeyW);
        store.press_key(KeyCode::KeyD);
        mover.step(&mut store, 1e-30);
        assert!(store.character().position.distance(start) < 1e-3);
    }

    #[test]
    fn diagonal_is_not_faster() {
        let d = frame_displacement(Vec2::new(1.0, -1.0), MOVE_SPEED, 0.1);
        assert!((d.length() - MOVE_SPEED * 0.1).abs() < 1e-6);
        let straight = frame_displacement(Vec2::new(1.0, 0.0), MOVE_SPEED, 0.1);
        assert!((straight.length() - MOVE_SPEED * 0.1).abs() < 1e-6);
    }

    #[test]
    fn facing_follows_movement_and_holds_when_idle() {
        let (mut store, mut m) = setup(Vec2::ZERO);
        store.press_key(KeyCode::KeyD);
        assert!(m.step(&mut store, 0.016));
        assert!((store.character().rotation - FRAC_PI_2).abs() < 1e-6);

        store.release_key(KeyCode::KeyD);
        assert!(!m.step(&mut store, 0.016));
        assert!((store.character().rotation - FRAC_PI_2).abs() < 1e-6);

        store.press_key(KeyCode::KeyW);
        m.step(&mut store, 0.016);
        assert!((store.character().rotation.abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn clamps_at_the_wall_but_still_turns() {
        let (mut store, mut m) = setup(Vec2::new(ROOM_MAX_X, 0.0));
        store.press_key(KeyCode::ArrowRight);
        assert!(m.step(&mut store, 0.5));
        assert_eq!(store.character().position.x, ROOM_MAX_X);
        assert!((store.character().rotation - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn menu_freezes_everything() {
        let (mut store, mut m) = setup(Vec2::ZERO);
        store.press_key(KeyCode::KeyA);
        store.toggle_menu();
        let before = *m.rendered();
        assert!(!m.step(&mut store, 0.1));
        assert_eq!(store.character().position, Vec2::ZERO);
        assert_eq!(*m.rendered(), before);
    }

    #[test]
    fn rendered_pose_trails_logical() {
        let (mut store, mut m) = setup(Vec2::ZERO);
        store.press_key(KeyCode::KeyD);
        m.step(&mut store, 0.1);
        let logical = store.character().position.x;
        let rendered = m.rendered().position.x;
        assert!(rendered > 0.0 && rendered < logical);
        assert!((rendered - logical * POSITION_SMOOTHING).abs() < 1e-6);
    }

    #[test]
    fn walk_animation_settles_when_idle() {
        let (mut store, mut m) = setup(Vec2::ZERO);
        store.press_key(KeyCode::KeyS);
        for _ in 0..10 {
            m.step(&mut store, 0.016);
        }
        assert!(m.rendered().bob > 0.0);
        store.release_key(KeyCode::KeyS);
        for _ in 0..200 {
            m.step(&mut store, 0.016);
        }
        let r = m.rendered();
        assert!(r.bob.abs() < 1e-4 && r.sway.abs() < 1e-4 && r.tilt.abs() < 1e-4);
    }
}
