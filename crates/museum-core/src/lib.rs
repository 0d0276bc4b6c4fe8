//! Platform-neutral navigation core for a walkable 3D gallery: keyboard
//! aggregation, character kinematics, proximity triggers, and the camera rig.
//! Hosts (web, native) feed key events and frame deltas and read back poses.

pub mod camera;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod input;
pub mod loading;
pub mod math;
pub mod movement;
pub mod proximity;
pub mod scheduler;
pub mod store;

pub use camera::{Camera, CameraMode, CameraPose, CameraRig};
pub use catalog::{CatalogError, ExhibitCatalog, ExhibitDescriptor, WallSide};
pub use config::{ConfigError, NavConfig, RoomBounds};
pub use input::KeyCode;
pub use loading::{LoadingSequencer, LoadingView};
pub use movement::RenderedPose;
pub use proximity::{ActivationRecord, Transition, TriggerKey};
pub use scheduler::{
    CharacterTransform, FixedClock, FrameOutput, Museum, MuseumError, Tick, FRAME_OUTPUT_LEN,
};
pub use store::{AppPhase, CharacterState, Focus, InteractionFlags, Store};
