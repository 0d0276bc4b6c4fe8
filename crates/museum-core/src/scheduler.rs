//! Frame scheduler: owns the store and every per-frame component and runs
//! them in a fixed order (movement, proximity, camera) on each tick.

use crate::camera::{CameraMode, CameraPose, CameraRig};
use crate::catalog::{CatalogError, ExhibitCatalog};
use crate::config::{ConfigError, NavConfig};
use crate::input::{self, KeyCode};
use crate::movement::MovementIntegrator;
use crate::proximity::{ProximityDetector, TriggerKey, Transitions};
use crate::store::{AppPhase, InteractionFlags, Store};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MuseumError {
    #[error("invalid navigation config: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid exhibit catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Anything that advances by a frame delta in seconds.
pub trait Tick {
    fn tick(&mut self, delta: f32);
}

/// Deterministic fixed-rate driver.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    dt: f32,
    frames: u64,
}

impl FixedClock {
    pub fn new(fps: u32) -> Self {
        Self {
            dt: 1.0 / fps.max(1) as f32,
            frames: 0,
        }
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.dt
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed(&self) -> f32 {
        self.frames as f32 * self.dt
    }

    pub fn step<T: Tick + ?Sized>(&mut self, target: &mut T) {
        target.tick(self.dt);
        self.frames += 1;
    }

    /// Run as many whole frames as fit in `seconds` (rounded).
    pub fn run_for<T: Tick + ?Sized>(&mut self, target: &mut T, seconds: f32) {
        let n = (seconds / self.dt).round().max(0.0) as u64;
        for _ in 0..n {
            self.step(target);
        }
    }
}

/// Character transform for the renderer, built from the rendered pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterTransform {
    /// World position; `y` is the walk bob.
    pub position: Vec3,
    pub rotation: f32,
    pub sway: f32,
    pub tilt: f32,
    /// Hidden while a zoomed view is active.
    pub visible: bool,
}

pub const FRAME_OUTPUT_LEN: usize = 14;

/// Everything a renderer needs for one frame, packed as plain `f32`s.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FrameOutput {
    pub character_position: [f32; 3],
    pub character_rotation: f32,
    pub character_sway: f32,
    pub character_tilt: f32,
    pub character_visible: f32,
    pub camera_position: [f32; 3],
    pub camera_look_at: [f32; 3],
    pub amplified: f32,
}

const _: () = assert!(std::mem::size_of::<FrameOutput>() == FRAME_OUTPUT_LEN * 4);

impl FrameOutput {
    #[inline]
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}

pub struct Museum {
    cfg: NavConfig,
    catalog: ExhibitCatalog,
    store: Store,
    movement: MovementIntegrator,
    proximity: ProximityDetector,
    camera: CameraRig,
    last_transitions: Transitions,
    last_mode: CameraMode,
}

impl Default for Museum {
    fn default() -> Self {
        Self::build(NavConfig::default(), ExhibitCatalog::default_gallery())
    }
}

impl Museum {
    pub fn new(cfg: NavConfig, catalog: ExhibitCatalog) -> Result<Self, MuseumError> {
        cfg.validate()?;
        Ok(Self::build(cfg, catalog))
    }

    /// Build from optional TOML documents; `None` keeps the defaults.
    pub fn from_toml(config: Option<&str>, catalog: Option<&str>) -> Result<Self, MuseumError> {
        let cfg = match config {
            Some(text) => NavConfig::from_toml_str(text)?,
            None => NavConfig::default(),
        };
        let catalog = match catalog {
            Some(text) => ExhibitCatalog::from_toml_str(text)?,
            None => ExhibitCatalog::default_gallery(),
        };
        Self::new(cfg, catalog)
    }

    fn build(cfg: NavConfig, catalog: ExhibitCatalog) -> Self {
        let proximity = ProximityDetector::new(&catalog, &cfg.proximity);
        for (key, at) in proximity.trigger_points() {
            if cfg.bounds.distance_to(at) >= proximity.radius() {
                log::warn!(
                    "[museum] trigger {:?} at ({}, {}) is out of reach of the walkable area",
                    key,
                    at.x,
                    at.y
                );
            }
        }
        log::info!("[museum] {} exhibits", catalog.len());
        Self {
            store: Store::new(cfg.movement.start),
            movement: MovementIntegrator::new(cfg.movement, cfg.bounds),
            camera: CameraRig::new(cfg.camera, cfg.movement.start),
            proximity,
            catalog,
            cfg,
            last_transitions: Transitions::new(),
            last_mode: CameraMode::FreeFollow,
        }
    }

    // ---- input ----
    pub fn key_down(&mut self, key: KeyCode) {
        input::on_key_down(&mut self.store, key);
    }
    pub fn key_up(&mut self, key: KeyCode) {
        input::on_key_up(&mut self.store, key);
    }
    /// DOM `KeyboardEvent.code` entry point. Returns whether the code is known.
    pub fn key_down_code(&mut self, code: &str) -> bool {
        match KeyCode::from_code(code) {
            Some(k) => {
                self.key_down(k);
                true
            }
            None => false,
        }
    }
    pub fn key_up_code(&mut self, code: &str) -> bool {
        match KeyCode::from_code(code) {
            Some(k) => {
                self.key_up(k);
                true
            }
            None => false,
        }
    }

    // ---- phase ----
    #[inline]
    pub fn phase(&self) -> AppPhase {
        self.store.phase()
    }
    pub fn set_phase(&mut self, phase: AppPhase) {
        self.store.set_phase(phase);
    }

    /// Set the phase from an outside label; unknown or missing is `Loading`.
    pub fn set_phase_label(&mut self, label: Option<&str>) {
        let phase = AppPhase::from_label(label);
        log::info!("[museum] phase {:?} -> {}", label, phase.label());
        self.store.set_phase(phase);
    }

    /// Run one frame. Does nothing until the museum phase begins.
    pub fn tick(&mut self, delta: f32) {
        self.last_transitions.clear();
        if self.store.phase() != AppPhase::Museum {
            return;
        }
        let delta = if delta.is_finite() && delta > 0.0 {
            delta
        } else {
            0.0
        };
        self.movement.step(&mut self.store, delta);
        self.last_transitions = self.proximity.step(&mut self.store);
        let mode = self.camera.step(&self.store, &self.catalog);
        if mode != self.last_mode {
            log::debug!("[museum] camera {:?} -> {:?}", self.last_mode, mode);
            self.last_mode = mode;
        }
    }

    /// Put the character back at the start and forget all focus and
    /// hysteresis. The phase is kept.
    pub fn restart(&mut self) {
        let phase = self.store.phase();
        let start = self.cfg.movement.start;
        self.store = Store::new(start);
        self.store.set_phase(phase);
        self.movement.reset(start);
        self.proximity.reset();
        self.camera = CameraRig::new(self.cfg.camera, start);
        self.last_transitions.clear();
        self.last_mode = CameraMode::FreeFollow;
        log::info!("[museum] restart");
    }

    // ---- outputs ----
    pub fn character_transform(&self) -> CharacterTransform {
        let r = self.movement.rendered();
        CharacterTransform {
            position: Vec3::new(r.position.x, r.bob, r.position.y),
            rotation: r.rotation,
            sway: r.sway,
            tilt: r.tilt,
            visible: !self.store.flags().is_amplified(),
        }
    }

    #[inline]
    pub fn camera_pose(&self) -> &CameraPose {
        self.camera.pose()
    }

    #[inline]
    pub fn camera_mode(&self) -> CameraMode {
        self.last_mode
    }

    pub fn frame_output(&self) -> FrameOutput {
        let c = self.character_transform();
        let cam = self.camera.pose();
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        FrameOutput {
            character_position: c.position.to_array(),
            character_rotation: c.rotation,
            character_sway: c.sway,
            character_tilt: c.tilt,
            character_visible: flag(c.visible),
            camera_position: cam.current_position.to_array(),
            camera_look_at: cam.current_look_at.to_array(),
            amplified: flag(self.store.flags().is_amplified()),
        }
    }

    #[inline]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[inline]
    pub fn flags(&self) -> &InteractionFlags {
        self.store.flags()
    }

    pub fn pressed_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.store.pressed_keys()
    }

    #[inline]
    pub fn catalog(&self) -> &ExhibitCatalog {
        &self.catalog
    }

    #[inline]
    pub fn config(&self) -> &NavConfig {
        &self.cfg
    }

    /// Proximity transitions fired by the most recent tick.
    #[inline]
    pub fn last_transitions(&self) -> &Transitions {
        &self.last_transitions
    }

    /// Trigger circles as `(key, center, radius)`, for debug drawing.
    pub fn trigger_circles(&self) -> impl Iterator<Item = (&TriggerKey, glam::Vec2, f32)> {
        let r = self.proximity.radius();
        self.proximity.trigger_points().map(move |(k, p)| (k, p, r))
    }
}

impl Tick for Museum {
    fn tick(&mut self, delta: f32) {
        Museum::tick(self, delta);
    }
}
