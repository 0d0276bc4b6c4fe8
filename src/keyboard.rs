// Pure key-code helpers for the browser listeners (no web-sys here so the
// host-side tests can include this file directly).

/// DOM `KeyboardEvent.code` values the navigation core understands.
pub const GAME_KEY_CODES: [&str; 10] = [
    "ArrowUp",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "KeyW",
    "KeyA",
    "KeyS",
    "KeyD",
    "Escape",
    "KeyM",
];

#[inline]
pub fn is_game_key(code: &str) -> bool {
    GAME_KEY_CODES.contains(&code)
}

/// Movement keys and Escape have browser defaults (scrolling, leaving
/// fullscreen); swallow them while walking. `KeyM` has none.
#[inline]
pub fn should_prevent_default(code: &str) -> bool {
    matches!(
        code,
        "ArrowUp"
            | "ArrowDown"
            | "ArrowLeft"
            | "ArrowRight"
            | "KeyW"
            | "KeyA"
            | "KeyS"
            | "KeyD"
            | "Escape"
    )
}

/// Keys typed into a form field belong to the field, not the museum.
#[inline]
pub fn is_text_entry_tag(tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("input")
        || tag_name.eq_ignore_ascii_case("textarea")
        || tag_name.eq_ignore_ascii_case("select")
}
