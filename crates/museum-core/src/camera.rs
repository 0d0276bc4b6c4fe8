//! Camera rig: a declarative target pose per interaction state, and an actual
//! pose that only ever eases toward it.
//!
//! There is no stored "current state"; the mode is re-derived from the store
//! every frame. Because the actual pose is always interpolated, switching mode
//! mid-flight bends the motion instead of cutting.

use crate::catalog::{ExhibitCatalog, WallSide};
use crate::config::CameraCfg;
use crate::constants::{CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR};
use crate::store::{Focus, Store};
use glam::{Mat4, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    FreeFollow,
    ExhibitZoom,
    ProfileZoom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub current_position: Vec3,
    pub current_look_at: Vec3,
    pub target_position: Vec3,
    pub target_look_at: Vec3,
}

impl CameraPose {
    /// Distance of the actual pose from its target (position + look-at).
    #[must_use]
    pub fn error(&self) -> f32 {
        self.current_position.distance(self.target_position)
            + self.current_look_at.distance(self.target_look_at)
    }

    /// Perspective camera for renderers that want matrices.
    #[must_use]
    pub fn to_camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.current_position,
            target: self.current_look_at,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[derive(Clone, Debug)]
pub struct CameraRig {
    cfg: CameraCfg,
    pose: CameraPose,
}

impl CameraRig {
    /// Start at the configured initial position, looking at the character.
    pub fn new(cfg: CameraCfg, character: Vec2) -> Self {
        let look = Vec3::new(character.x, cfg.follow_look_height, character.y);
        Self {
            cfg,
            pose: CameraPose {
                current_position: cfg.initial_position,
                current_look_at: look,
                target_position: cfg.initial_position,
                target_look_at: look,
            },
        }
    }

    #[inline]
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// Which rule applies for the store's current flags.
    #[must_use]
    pub fn mode(store: &Store) -> CameraMode {
        let flags = store.flags();
        if !flags.is_amplified() {
            return CameraMode::FreeFollow;
        }
        match flags.focus() {
            Focus::Profile => CameraMode::ProfileZoom,
            Focus::Exhibit(_) => CameraMode::ExhibitZoom,
            Focus::None => CameraMode::FreeFollow,
        }
    }

    /// Target `(position, look_at)` for the store's state.
    #[must_use]
    pub fn target(&self, store: &Store, catalog: &ExhibitCatalog) -> (CameraMode, Vec3, Vec3) {
        let c = &self.cfg;
        let mode = Self::mode(store);
        let exhibit = store
            .flags()
            .active_exhibit_id()
            .and_then(|id| catalog.get(id));
        match (mode, exhibit) {
            (CameraMode::ProfileZoom, _) => (mode, c.profile_position, c.profile_look_at),
            (CameraMode::ExhibitZoom, Some(e)) => {
                let f = e.frame_position;
                let look = Vec3::new(f.x, c.frame_look_height, f.y);
                let pos = match e.wall {
                    WallSide::Left => Vec3::new(f.x + c.zoom_wall_distance, c.height, f.y),
                    WallSide::Right => Vec3::new(f.x - c.zoom_wall_distance, c.height, f.y),
                    WallSide::Center => Vec3::new(0.0, c.height, f.y + c.zoom_center_distance),
                };
                (mode, pos, look)
            }
            _ => {
                // Unknown exhibit ids fall back to following.
                let p = store.character().position;
                let pos = Vec3::new(p.x * c.follow_x_scale, c.height, p.y + c.follow_distance);
                let look = Vec3::new(p.x, c.follow_look_height, p.y - c.follow_look_ahead);
                (CameraMode::FreeFollow, pos, look)
            }
        }
    }

    /// Recompute the target and ease the actual pose toward it.
    pub fn step(&mut self, store: &Store, catalog: &ExhibitCatalog) -> CameraMode {
        let (mode, pos, look) = self.target(store, catalog);
        let t = match mode {
            CameraMode::FreeFollow => self.cfg.follow_lerp,
            CameraMode::ExhibitZoom | CameraMode::ProfileZoom => self.cfg.zoom_lerp,
        };
        let p = &mut self.pose;
        p.target_position = pos;
        p.target_look_at = look;
        p.current_position = p.current_position.lerp(pos, t);
        p.current_look_at = p.current_look_at.lerp(look, t);
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExhibitDescriptor;

    fn catalog() -> ExhibitCatalog {
        ExhibitCatalog::new(vec![
            ExhibitDescriptor::on_wall("l", Vec2::new(-3.5, -2.0), WallSide::Left),
            ExhibitDescriptor::on_wall("r", Vec2::new(3.5, -5.5), WallSide::Right),
            ExhibitDescriptor::on_wall("c", Vec2::new(0.0, -18.0), WallSide::Center),
        ])
        .expect("catalog")
    }

    #[test]
    fn follow_target_trails_character() {
        let rig = CameraRig::new(CameraCfg::default(), Vec2::ZERO);
        let store = Store::new(Vec2::new(1.0, -4.0));
        let (mode, pos, look) = rig.target(&store, &catalog());
        assert_eq!(mode, CameraMode::FreeFollow);
        assert!((pos - Vec3::new(0.3, 2.1, 3.0)).length() < 1e-5);
        assert!((look - Vec3::new(1.0, 1.1, -9.0)).length() < 1e-5);
    }

    #[test]
    fn exhibit_zoom_offsets_from_the_wall() {
        let rig = CameraRig::new(CameraCfg::default(), Vec2::ZERO);
        let mut store = Store::new(Vec2::ZERO);

        store.focus_exhibit("l");
        let (mode, pos, look) = rig.target(&store, &catalog());
        assert_eq!(mode, CameraMode::ExhibitZoom);
        assert!((pos - Vec3::new(0.5, 2.1, -2.0)).length() < 1e-5);
        assert!((look - Vec3::new(-3.5, 2.8, -2.0)).length() < 1e-5);

        store.focus_exhibit("r");
        let (_, pos, _) = rig.target(&store, &catalog());
        assert!((pos - Vec3::new(-0.5, 2.1, -5.5)).length() < 1e-5);

        store.focus_exhibit("c");
        let (_, pos, look) = rig.target(&store, &catalog());
        assert!((pos - Vec3::new(0.0, 2.1, -13.0)).length() < 1e-5);
        assert!((look - Vec3::new(0.0, 2.8, -18.0)).length() < 1e-5);
    }

    #[test]
    fn profile_zoom_uses_fixed_pose() {
        let rig = CameraRig::new(CameraCfg::default(), Vec2::ZERO);
        let mut store = Store::new(Vec2::ZERO);
        store.focus_profile();
        let (mode, pos, look) = rig.target(&store, &catalog());
        assert_eq!(mode, CameraMode::ProfileZoom);
        assert_eq!(pos, CameraCfg::default().profile_position);
        assert_eq!(look, CameraCfg::default().profile_look_at);
    }

    #[test]
    fn focus_without_amplification_follows() {
        let mut store = Store::new(Vec2::ZERO);
        store.focus_profile();
        store.suspend_amplification();
        assert_eq!(CameraRig::mode(&store), CameraMode::FreeFollow);
    }

    #[test]
    fn unknown_exhibit_falls_back_to_follow() {
        let rig = CameraRig::new(CameraCfg::default(), Vec2::ZERO);
        let mut store = Store::new(Vec2::ZERO);
        store.focus_exhibit("not-in-catalog");
        let (mode, _, _) = rig.target(&store, &catalog());
        assert_eq!(mode, CameraMode::FreeFollow);
    }

    #[test]
    fn mode_switch_never_jumps() {
        let cat = catalog();
        let mut rig = CameraRig::new(CameraCfg::default(), Vec2::ZERO);
        let mut store = Store::new(Vec2::ZERO);
        for _ in 0..30 {
            rig.step(&store, &cat);
        }
        let before = rig.pose().current_position;
        store.focus_exhibit("l");
        rig.step(&store, &cat);
        let after = rig.pose().current_position;
        let full = before.distance(rig.pose().target_position);
        assert!(before.distance(after) <= full * ZOOM + 1e-5);
    }

    const ZOOM: f32 = crate::constants::ZOOM_LERP;

    #[test]
    fn matrices_are_finite() {
        let rig = CameraRig::new(CameraCfg::default(), Vec2::new(0.0, -4.0));
        let cam = rig.pose().to_camera(16.0 / 9.0);
        assert!(cam.view_proj().is_finite());
    }
}
