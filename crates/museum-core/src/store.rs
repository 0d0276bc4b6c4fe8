//! Application state shared by the per-frame components.
//!
//! The store is a plain struct owned by [`crate::Museum`] and lent to each
//! component in turn. Focus changes go through methods so an exhibit and the
//! profile panel can never be active together.

use crate::input::KeyCode;
use fnv::FnvHashSet;
use glam::Vec2;

/// Coarse application phase, written by the loading sequencer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppPhase {
    #[default]
    Loading,
    Museum,
}

impl AppPhase {
    /// Fail-safe parse: anything other than `MUSEUM` is treated as loading.
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("museum") => AppPhase::Museum,
            _ => AppPhase::Loading,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AppPhase::Loading => "LOADING",
            AppPhase::Museum => "MUSEUM",
        }
    }
}

/// Authoritative, bounds-clamped character pose on the floor plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CharacterState {
    /// `(x, z)`
    pub position: Vec2,
    /// Facing angle in radians, `atan2(dx, dz)` of the last movement.
    pub rotation: f32,
}

/// What the camera is focused on, if anything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    None,
    Exhibit(String),
    Profile,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionFlags {
    focus: Focus,
    amplified: bool,
}

impl InteractionFlags {
    #[inline]
    #[must_use]
    pub fn focus(&self) -> &Focus {
        &self.focus
    }
    #[inline]
    #[must_use]
    pub fn active_exhibit_id(&self) -> Option<&str> {
        match &self.focus {
            Focus::Exhibit(id) => Some(id),
            _ => None,
        }
    }
    #[inline]
    #[must_use]
    pub fn is_profile_active(&self) -> bool {
        self.focus == Focus::Profile
    }
    #[inline]
    #[must_use]
    pub fn is_amplified(&self) -> bool {
        self.amplified
    }
    /// True when amplification agrees with whether anything is focused.
    #[inline]
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.amplified == (self.focus != Focus::None)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Store {
    phase: AppPhase,
    character: CharacterState,
    flags: InteractionFlags,
    keys: FnvHashSet<KeyCode>,
    menu_open: bool,
}

impl Store {
    pub fn new(start: Vec2) -> Self {
        Self {
            character: CharacterState {
                position: start,
                rotation: 0.0,
            },
            ..Self::default()
        }
    }

    // ---- phase ----
    #[inline]
    pub fn phase(&self) -> AppPhase {
        self.phase
    }
    pub fn set_phase(&mut self, phase: AppPhase) {
        if self.phase != phase {
            log::info!("[museum] phase {} -> {}", self.phase.label(), phase.label());
            self.phase = phase;
        }
    }

    // ---- character ----
    #[inline]
    pub fn character(&self) -> &CharacterState {
        &self.character
    }
    pub fn set_character_position(&mut self, position: Vec2) {
        self.character.position = position;
    }
    pub fn set_character_rotation(&mut self, rotation: f32) {
        self.character.rotation = rotation;
    }

    // ---- interaction ----
    #[inline]
    pub fn flags(&self) -> &InteractionFlags {
        &self.flags
    }
    /// Focus an exhibit and amplify; replaces any previous focus.
    pub fn focus_exhibit(&mut self, id: &str) {
        self.flags.focus = Focus::Exhibit(id.to_owned());
        self.flags.amplified = true;
    }
    /// Focus the profile panel and amplify; replaces any previous focus.
    pub fn focus_profile(&mut self) {
        self.flags.focus = Focus::Profile;
        self.flags.amplified = true;
    }
    /// Re-assert amplification for the current focus. No-op when unfocused.
    pub fn reamplify(&mut self) {
        if self.flags.focus != Focus::None {
            self.flags.amplified = true;
        }
    }
    /// Drop focus and amplification together.
    pub fn clear_focus(&mut self) {
        self.flags.focus = Focus::None;
        self.flags.amplified = false;
    }
    /// Drop amplification only, keeping focus. A character still inside the
    /// circle gets it back from the detector's Sustain rule next frame.
    pub fn suspend_amplification(&mut self) {
        self.flags.amplified = false;
    }

    // ---- keys ----
    pub fn press_key(&mut self, key: KeyCode) {
        self.keys.insert(key);
    }
    pub fn release_key(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }
    pub fn clear_keys(&mut self) {
        self.keys.clear();
    }
    #[inline]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }
    pub fn pressed_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys.iter().copied()
    }

    // ---- menu ----
    #[inline]
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_label_parse_is_fail_safe() {
        assert_eq!(AppPhase::from_label(Some("MUSEUM")), AppPhase::Museum);
        assert_eq!(AppPhase::from_label(Some(" museum ")), AppPhase::Museum);
        assert_eq!(AppPhase::from_label(Some("LOADING")), AppPhase::Loading);
        assert_eq!(AppPhase::from_label(Some("garbage")), AppPhase::Loading);
        assert_eq!(AppPhase::from_label(None), AppPhase::Loading);
        assert_eq!(AppPhase::default(), AppPhase::Loading);
    }

    #[test]
    fn exhibit_and_profile_focus_are_exclusive() {
        let mut s = Store::new(Vec2::ZERO);
        s.focus_exhibit("a");
        assert_eq!(s.flags().active_exhibit_id(), Some("a"));
        assert!(!s.flags().is_profile_active());

        s.focus_profile();
        assert_eq!(s.flags().active_exhibit_id(), None);
        assert!(s.flags().is_profile_active());
        assert!(s.flags().is_settled());

        s.focus_exhibit("b");
        assert!(!s.flags().is_profile_active());
        assert!(s.flags().is_amplified());
    }

    #[test]
    fn reamplify_needs_a_focus() {
        let mut s = Store::new(Vec2::ZERO);
        s.reamplify();
        assert!(!s.flags().is_amplified());

        s.focus_exhibit("a");
        s.suspend_amplification();
        assert!(!s.flags().is_settled());
        s.reamplify();
        assert!(s.flags().is_amplified());
        assert!(s.flags().is_settled());
    }

    #[test]
    fn clear_focus_resets_everything() {
        let mut s = Store::new(Vec2::ZERO);
        s.focus_profile();
        s.clear_focus();
        assert_eq!(s.flags(), &InteractionFlags::default());
    }
}
