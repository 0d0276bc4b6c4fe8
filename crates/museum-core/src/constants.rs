use glam::{Vec2, Vec3};

// Shared navigation/camera tuning constants used by both web and native frontends.

// Movement
pub const MOVE_SPEED: f32 = 3.5; // world units per second
pub const ROOM_MIN_X: f32 = -2.0;
pub const ROOM_MAX_X: f32 = 2.0;
pub const ROOM_MIN_Z: f32 = -17.8;
pub const ROOM_MAX_Z: f32 = 2.0;
pub const START_POSITION: [f32; 2] = [0.0, -4.0]; // (x, z)

// Rendered-pose smoothing (per frame lerp factors)
pub const POSITION_SMOOTHING: f32 = 0.15;
pub const ROTATION_SMOOTHING: f32 = 0.12;
pub const INITIAL_RENDERED_ROTATION: f32 = std::f32::consts::PI;

// Procedural walk animation
pub const WALK_CYCLE_RATE: f32 = 15.0; // radians of walk phase per second
pub const WALK_BOB_AMPLITUDE: f32 = 0.04;
pub const WALK_SWAY_AMPLITUDE: f32 = 0.03;
pub const WALK_TILT_AMPLITUDE: f32 = 0.02;
pub const WALK_SETTLE: f32 = 0.1; // lerp back to neutral when idle

// Proximity
pub const ACTIVATION_RADIUS: f32 = 0.6;
pub const TRIGGER_WALL_INSET: f32 = 2.1; // |x| of the rope-line triggers for wall exhibits
pub const CENTER_TRIGGER_STANDOFF: f32 = 1.5; // +z offset of a center exhibit's trigger
pub const PROFILE_TRIGGER: [f32; 2] = [0.0, -17.0];

// Camera
pub const CAMERA_HEIGHT: f32 = 2.1;
pub const CAMERA_INITIAL_POSITION: [f32; 3] = [0.0, 2.1, 12.0];
pub const FOLLOW_LERP: f32 = 0.02; // free-roam smoothing, deliberately lenient
pub const ZOOM_LERP: f32 = 0.05;
pub const FOLLOW_X_SCALE: f32 = 0.3; // camera x tracks a fraction of character x
pub const FOLLOW_DISTANCE: f32 = 7.0; // +z behind the character
pub const FOLLOW_LOOK_HEIGHT: f32 = 1.1;
pub const FOLLOW_LOOK_AHEAD: f32 = 5.0; // -z ahead of the character
pub const ZOOM_WALL_DISTANCE: f32 = 4.0; // perpendicular standoff from a wall frame
pub const ZOOM_CENTER_DISTANCE: f32 = 5.0;
pub const FRAME_LOOK_HEIGHT: f32 = 2.8;
pub const PROFILE_CAMERA_POSITION: [f32; 3] = [0.0, 2.1, -6.5];
pub const PROFILE_CAMERA_LOOK_AT: [f32; 3] = [0.0, 4.3, -10.5];
pub const CAMERA_FOVY_DEG: f32 = 50.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Loading sequence
pub const LOADING_PROGRESS_STEP: u8 = 2; // percent per interval
pub const LOADING_INTERVAL_MS: u64 = 40;
pub const LOADING_FLASH_MS: u64 = 400;
pub const LOADING_SAFETY_TIMEOUT_MS: u64 = 8_000;

#[inline]
pub fn start_position_vec2() -> Vec2 {
    Vec2::from(START_POSITION)
}

#[inline]
pub fn profile_trigger_vec2() -> Vec2 {
    Vec2::from(PROFILE_TRIGGER)
}

#[inline]
pub fn camera_initial_position_vec3() -> Vec3 {
    Vec3::from(CAMERA_INITIAL_POSITION)
}
