// Host-side tests for pure keyboard functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]

mod keyboard {
    include!("../src/keyboard.rs");
}

use keyboard::*;
use museum_core::KeyCode;

#[test]
fn every_game_key_maps_to_a_core_key() {
    for code in GAME_KEY_CODES {
        let key = KeyCode::from_code(code).unwrap_or_else(|| panic!("{code} unknown to core"));
        assert_eq!(key.as_code(), code);
    }
}

#[test]
fn non_game_keys_are_left_alone() {
    for code in ["KeyQ", "Space", "Enter", "Tab", "F5", "Digit1", ""] {
        assert!(!is_game_key(code), "{code}");
        assert!(!should_prevent_default(code), "{code}");
    }
}

#[test]
fn movement_keys_and_escape_suppress_browser_defaults() {
    let suppressed: Vec<&str> = GAME_KEY_CODES
        .into_iter()
        .filter(|c| should_prevent_default(c))
        .collect();
    assert_eq!(
        suppressed,
        [
            "ArrowUp",
            "ArrowDown",
            "ArrowLeft",
            "ArrowRight",
            "KeyW",
            "KeyA",
            "KeyS",
            "KeyD",
            "Escape"
        ]
    );
    assert!(!should_prevent_default("KeyM"));
}

#[test]
fn form_fields_keep_their_keys() {
    assert!(is_text_entry_tag("INPUT"));
    assert!(is_text_entry_tag("textarea"));
    assert!(is_text_entry_tag("Select"));
    assert!(!is_text_entry_tag("CANVAS"));
    assert!(!is_text_entry_tag("DIV"));
}
