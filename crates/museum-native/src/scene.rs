//! Flat-shaded gallery built from instanced quads: floor, walls, frames,
//! trigger discs, the profile panel and the character.

use glam::Vec3;
use museum_core::{Museum, TriggerKey, WallSide};
use std::f32::consts::FRAC_PI_2;

pub const MAX_INSTANCES: usize = 256;

// Shader quad kinds
pub const KIND_UPRIGHT: f32 = 0.0;
pub const KIND_FLOOR: f32 = 1.0;
pub const KIND_DISC: f32 = 2.0;

const WALL_HEIGHT: f32 = 5.0;
const WALL_MARGIN: f32 = 1.6; // walls stand this far outside the walkable x range
const FRAME_SIZE: [f32; 2] = [1.8, 1.4];
const CHARACTER_SIZE: [f32; 2] = [0.6, 1.6];
const PROFILE_PANEL_SIZE: [f32; 2] = [3.0, 2.0];

const FLOOR_COLOR: [f32; 4] = [0.12, 0.11, 0.10, 1.0];
const WALL_COLOR: [f32; 4] = [0.30, 0.28, 0.26, 1.0];
const FRAME_COLOR: [f32; 4] = [0.55, 0.45, 0.25, 1.0];
const FRAME_ACTIVE_COLOR: [f32; 4] = [0.95, 0.80, 0.40, 1.0];
const DISC_COLOR: [f32; 4] = [0.40, 0.60, 0.90, 0.25];
const DISC_ACTIVE_COLOR: [f32; 4] = [0.50, 0.80, 1.00, 0.60];
const CHARACTER_COLOR: [f32; 4] = [0.85, 0.85, 0.90, 1.0];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub pos: [f32; 3],
    pub yaw: f32,
    pub size: [f32; 2],
    pub kind: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

impl InstanceData {
    fn new(pos: Vec3, yaw: f32, size: [f32; 2], kind: f32, color: [f32; 4]) -> Self {
        Self {
            pos: pos.to_array(),
            yaw,
            size,
            kind,
            _pad: 0.0,
            color,
        }
    }
}

fn wall_yaw(side: WallSide) -> f32 {
    match side {
        WallSide::Left => FRAC_PI_2,
        WallSide::Right => -FRAC_PI_2,
        WallSide::Center => 0.0,
    }
}

/// Rebuild the instance list for the current frame, back to front.
pub fn build_instances(museum: &Museum, out: &mut Vec<InstanceData>) {
    out.clear();
    let cfg = museum.config();
    let b = cfg.bounds;
    let flags = museum.flags();

    let left = b.min_x - WALL_MARGIN;
    let right = b.max_x + WALL_MARGIN;
    let near = b.max_z + 1.0;
    let far = b.min_z - 1.0;
    let mid_z = (near + far) * 0.5;
    let length = near - far;
    let width = right - left;

    out.push(InstanceData::new(
        Vec3::new((left + right) * 0.5, 0.0, mid_z),
        0.0,
        [width, length],
        KIND_FLOOR,
        FLOOR_COLOR,
    ));
    let half_h = WALL_HEIGHT * 0.5;
    out.push(InstanceData::new(
        Vec3::new(left, half_h, mid_z),
        FRAC_PI_2,
        [length, WALL_HEIGHT],
        KIND_UPRIGHT,
        WALL_COLOR,
    ));
    out.push(InstanceData::new(
        Vec3::new(right, half_h, mid_z),
        -FRAC_PI_2,
        [length, WALL_HEIGHT],
        KIND_UPRIGHT,
        WALL_COLOR,
    ));
    out.push(InstanceData::new(
        Vec3::new((left + right) * 0.5, half_h, far),
        0.0,
        [width, WALL_HEIGHT],
        KIND_UPRIGHT,
        WALL_COLOR,
    ));

    for (key, center, radius) in museum.trigger_circles() {
        let active = match key {
            TriggerKey::Profile => flags.is_profile_active(),
            TriggerKey::Exhibit(id) => flags.active_exhibit_id() == Some(id.as_str()),
        };
        out.push(InstanceData::new(
            Vec3::new(center.x, 0.01, center.y),
            0.0,
            [radius * 2.0, radius * 2.0],
            KIND_DISC,
            if active { DISC_ACTIVE_COLOR } else { DISC_COLOR },
        ));
    }

    for e in museum.catalog().iter() {
        let active = flags.active_exhibit_id() == Some(e.id.as_str());
        // Nudge frames off their wall plane toward the room.
        let inset = match e.wall {
            WallSide::Left => 0.05,
            WallSide::Right => -0.05,
            WallSide::Center => 0.0,
        };
        out.push(InstanceData::new(
            Vec3::new(e.frame_position.x + inset, cfg.camera.frame_look_height, e.frame_position.y),
            wall_yaw(e.wall),
            FRAME_SIZE,
            KIND_UPRIGHT,
            if active { FRAME_ACTIVE_COLOR } else { FRAME_COLOR },
        ));
    }

    out.push(InstanceData::new(
        cfg.camera.profile_look_at,
        0.0,
        PROFILE_PANEL_SIZE,
        KIND_UPRIGHT,
        if flags.is_profile_active() {
            FRAME_ACTIVE_COLOR
        } else {
            FRAME_COLOR
        },
    ));

    let ch = museum.character_transform();
    if ch.visible {
        let pos = ch.position + Vec3::new(ch.sway, CHARACTER_SIZE[1] * 0.5, 0.0);
        out.push(InstanceData::new(
            pos,
            ch.rotation,
            CHARACTER_SIZE,
            KIND_UPRIGHT,
            CHARACTER_COLOR,
        ));
    }
    out.truncate(MAX_INSTANCES);
}
