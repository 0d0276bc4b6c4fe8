//! Keyboard aggregation: raw key-down/key-up codes into the store's
//! pressed-key set and interaction/menu flags. No geometry happens here.

use crate::store::{AppPhase, Store};

/// Physical key codes the core reacts to, named after DOM `KeyboardEvent.code`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    Escape,
    KeyM,
}

pub const MOVEMENT_KEYS: [KeyCode; 8] = [
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
    KeyCode::KeyW,
    KeyCode::KeyA,
    KeyCode::KeyS,
    KeyCode::KeyD,
];

pub const MENU_TOGGLE_KEY: KeyCode = KeyCode::KeyM;
pub const CANCEL_KEY: KeyCode = KeyCode::Escape;

impl KeyCode {
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "KeyW" => KeyCode::KeyW,
            "KeyA" => KeyCode::KeyA,
            "KeyS" => KeyCode::KeyS,
            "KeyD" => KeyCode::KeyD,
            "Escape" => KeyCode::Escape,
            "KeyM" => KeyCode::KeyM,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_code(self) -> &'static str {
        match self {
            KeyCode::ArrowUp => "ArrowUp",
            KeyCode::ArrowDown => "ArrowDown",
            KeyCode::ArrowLeft => "ArrowLeft",
            KeyCode::ArrowRight => "ArrowRight",
            KeyCode::KeyW => "KeyW",
            KeyCode::KeyA => "KeyA",
            KeyCode::KeyS => "KeyS",
            KeyCode::KeyD => "KeyD",
            KeyCode::Escape => "Escape",
            KeyCode::KeyM => "KeyM",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_movement(self) -> bool {
        MOVEMENT_KEYS.contains(&self)
    }
}

/// Handle a key-down. Ignored entirely while the app is still loading.
pub fn on_key_down(store: &mut Store, code: KeyCode) {
    if store.phase() == AppPhase::Loading {
        return;
    }
    if store.is_menu_open() && code != MENU_TOGGLE_KEY && code != CANCEL_KEY {
        return;
    }

    if code.is_movement() {
        store.press_key(code);
    }

    if code == CANCEL_KEY {
        if store.flags().is_amplified() {
            store.clear_focus();
            log::info!("[input] cancel: left focused view");
        } else if store.is_menu_open() {
            store.toggle_menu();
            log::info!("[input] cancel: menu closed");
        }
    }

    if code == MENU_TOGGLE_KEY && !store.flags().is_amplified() {
        if !store.is_menu_open() {
            store.clear_keys();
        }
        store.toggle_menu();
        log::info!("[input] menu open={}", store.is_menu_open());
    }
}

/// Handle a key-up. Movement keys are always released so nothing sticks.
pub fn on_key_up(store: &mut Store, code: KeyCode) {
    if code.is_movement() {
        store.release_key(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn museum_store() -> Store {
        let mut s = Store::new(glam::Vec2::ZERO);
        s.set_phase(AppPhase::Museum);
        s
    }

    #[test]
    fn codes_round_trip_and_unknown_is_none() {
        for k in MOVEMENT_KEYS.iter().chain([&CANCEL_KEY, &MENU_TOGGLE_KEY]) {
            assert_eq!(KeyCode::from_code(k.as_code()), Some(*k));
        }
        assert_eq!(KeyCode::from_code("KeyQ"), None);
        assert_eq!(KeyCode::from_code("w"), None);
    }

    #[test]
    fn repeated_key_down_is_idempotent() {
        let mut s = museum_store();
        on_key_down(&mut s, KeyCode::KeyW);
        on_key_down(&mut s, KeyCode::KeyW);
        assert_eq!(s.pressed_keys().count(), 1);
        on_key_up(&mut s, KeyCode::KeyW);
        assert!(!s.is_pressed(KeyCode::KeyW));
    }

    #[test]
    fn menu_blocks_movement_but_not_release() {
        let mut s = museum_store();
        on_key_down(&mut s, KeyCode::KeyA);
        on_key_down(&mut s, KeyCode::KeyM);
        assert!(s.is_menu_open());
        assert_eq!(s.pressed_keys().count(), 0, "opening the menu clears keys");

        on_key_down(&mut s, KeyCode::KeyD);
        assert!(!s.is_pressed(KeyCode::KeyD));

        on_key_down(&mut s, KeyCode::Escape);
        assert!(!s.is_menu_open());
    }

    #[test]
    fn key_up_releases_even_with_menu_open() {
        let mut s = museum_store();
        on_key_down(&mut s, KeyCode::ArrowUp);
        // Menu opened by some other path without clearing keys.
        s.toggle_menu();
        on_key_up(&mut s, KeyCode::ArrowUp);
        assert!(!s.is_pressed(KeyCode::ArrowUp));
    }

    #[test]
    fn cancel_leaves_focus_before_touching_menu() {
        let mut s = museum_store();
        s.focus_exhibit("a");
        on_key_down(&mut s, KeyCode::Escape);
        assert!(!s.flags().is_amplified());
        assert_eq!(s.flags().active_exhibit_id(), None);
        assert!(!s.flags().is_profile_active());
        assert!(!s.is_menu_open());
    }

    #[test]
    fn menu_toggle_is_ignored_while_amplified() {
        let mut s = museum_store();
        s.focus_profile();
        on_key_down(&mut s, KeyCode::KeyM);
        assert!(!s.is_menu_open());
    }

    #[test]
    fn input_is_ignored_while_loading() {
        let mut s = Store::new(glam::Vec2::ZERO);
        on_key_down(&mut s, KeyCode::KeyW);
        on_key_down(&mut s, KeyCode::KeyM);
        assert_eq!(s.pressed_keys().count(), 0);
        assert!(!s.is_menu_open());
    }
}
